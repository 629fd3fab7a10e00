pub mod api;
pub mod health;
pub mod modules;
pub mod shared;

pub use modules::admin;
pub use modules::auth;
pub use modules::email;
pub use modules::funding;
pub use modules::kyc;
pub use modules::referral;
pub use modules::storage;

use crate::admin::adapter::outgoing::AdminQueryPostgres;
use crate::admin::application::admin_use_cases::AdminUseCases;
use crate::admin::application::service::{
    GetAnalyticsService, GetDashboardService, GetUserDetailService, ListUsersService,
};
use crate::api::openapi::ApiDoc;
use crate::auth::adapter::outgoing::jwt::{JwtConfig, JwtTokenService};
use crate::auth::adapter::outgoing::security::BcryptHasher;
use crate::auth::adapter::outgoing::token_repository_redis::RedisTokenRepository;
use crate::auth::adapter::outgoing::user_query_postgres::UserQueryPostgres;
use crate::auth::adapter::outgoing::user_repository_postgres::UserRepositoryPostgres;
use crate::auth::adapter::outgoing::verification_token_repository_postgres::VerificationTokenRepositoryPostgres;
use crate::auth::application::orchestrator::user_registration::UserRegistrationOrchestrator;
use crate::auth::application::ports::outgoing::{PasswordHasher, TokenProvider, TokenRepository};
use crate::auth::application::services::user_profile::{
    FetchUserProfileService, UpdateUserProfileService, UploadAvatarService,
};
use crate::auth::application::use_cases::{
    create_user::CreateUserUseCase,
    fetch_profile::FetchUserProfileUseCase,
    login_user::{ILoginUserUseCase, LoginUserUseCase},
    logout_user::{ILogoutUseCase, LogoutUseCase},
    request_password_reset::{IRequestPasswordResetUseCase, RequestPasswordResetUseCase},
    resend_verification::{IResendVerificationUseCase, ResendVerificationUseCase},
    reset_password::{IResetPasswordUseCase, ResetPasswordUseCase},
    update_profile::UpdateUserProfileUseCase,
    upload_avatar::UploadAvatarUseCase,
    verify_user_email::{IVerifyUserEmailUseCase, VerifyUserEmailUseCase},
};
use crate::email::adapter::outgoing::log_sender::LogEmailSender;
use crate::email::adapter::outgoing::smtp_sender::SmtpEmailSender;
use crate::email::application::ports::outgoing::email_sender::EmailSender;
use crate::email::application::ports::outgoing::user_email_notifier::UserEmailNotifier;
use crate::email::application::services::UserEmailService;
use crate::funding::adapter::outgoing::{FundingQueryPostgres, FundingRepositoryPostgres};
use crate::funding::application::funding_use_cases::FundingUseCases;
use crate::funding::application::service::{
    ApproveFundingRequestService, CreateFundingRequestService, ListFundingRequestsService,
    ListMyFundingRequestsService, RejectFundingRequestService,
};
use crate::kyc::adapter::outgoing::{KycQueryPostgres, KycRepositoryPostgres};
use crate::kyc::application::kyc_use_cases::KycUseCases;
use crate::kyc::application::service::{
    ApproveKycService, GetKycStatusService, ListKycSubmissionsService, RejectKycService,
    SubmitKycService,
};
use crate::referral::adapter::outgoing::ReferralQueryPostgres;
use crate::referral::application::referral_use_cases::ReferralUseCases;
use crate::referral::application::service::GetReferralStatsService;
use crate::shared::api::{custom_json_config, custom_path_config, custom_query_config};
use crate::shared::config::{AppConfig, RuntimeSettings};
use crate::storage::adapter::outgoing::LocalFileStorage;
use crate::storage::application::domain::UploadPolicy;
use crate::storage::application::ports::outgoing::FileStorage;

use actix_files::Files;
use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use deadpool_redis::{Config, Runtime};
use sea_orm::{ConnectOptions, Database};
use std::sync::Arc;
use std::time::Duration;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[cfg(test)]
mod tests;

#[derive(Clone)]
pub struct AppState {
    pub register_user_orchestrator: Arc<UserRegistrationOrchestrator>,
    pub verify_user_email_use_case: Arc<dyn IVerifyUserEmailUseCase + Send + Sync>,
    pub resend_verification_use_case: Arc<dyn IResendVerificationUseCase + Send + Sync>,
    pub login_user_use_case: Arc<dyn ILoginUserUseCase + Send + Sync>,
    pub logout_user_use_case: Arc<dyn ILogoutUseCase + Send + Sync>,
    pub request_password_reset_use_case: Arc<dyn IRequestPasswordResetUseCase + Send + Sync>,
    pub reset_password_use_case: Arc<dyn IResetPasswordUseCase + Send + Sync>,
    pub fetch_user_profile_use_case: Arc<dyn FetchUserProfileUseCase + Send + Sync>,
    pub update_user_profile_use_case: Arc<dyn UpdateUserProfileUseCase + Send + Sync>,
    pub upload_avatar_use_case: Arc<dyn UploadAvatarUseCase + Send + Sync>,
    pub kyc: KycUseCases,
    pub referral: ReferralUseCases,
    pub admin: AdminUseCases,
    pub funding: FundingUseCases,
    pub settings: RuntimeSettings,
}

#[actix_web::main]
#[cfg(not(tarpaulin_include))]
async fn start() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting application...");

    let config = AppConfig::from_env()?;
    info!(env = %config.app_env, "Configuration loaded");

    // Database connection
    let mut opt = ConnectOptions::new(config.database_url.clone());
    opt.max_connections(50)
        .min_connections(5)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(300))
        .max_lifetime(Duration::from_secs(1800))
        .sqlx_logging(false);

    let db_arc = Arc::new(
        Database::connect(opt)
            .await
            .context("Failed to connect to database")?,
    );

    // Redis connection
    let redis_arc = Arc::new(
        Config::from_url(&config.redis_url)
            .create_pool(Some(Runtime::Tokio1))
            .context("Failed to create Redis pool")?,
    );

    // Mail
    let email_sender: Arc<dyn EmailSender + Send + Sync> = match &config.smtp {
        Some(smtp) => Arc::new(
            SmtpEmailSender::new(
                &smtp.server,
                &smtp.username,
                &smtp.password,
                &config.email_from,
            )
            .context("Failed to configure SMTP transport")?,
        ),
        None => {
            warn!("SMTP is not configured; outgoing mail will only be logged");
            Arc::new(LogEmailSender)
        }
    };
    let email_notifier: Arc<dyn UserEmailNotifier + Send + Sync> =
        Arc::new(UserEmailService::new(
            email_sender,
            config.app_url.clone(),
            config.verification_token_expiry,
            config.password_reset_expiry,
        ));

    // Uploads
    tokio::fs::create_dir_all(&config.upload_dir)
        .await
        .with_context(|| format!("Failed to create upload dir {}", config.upload_dir))?;
    let storage: Arc<dyn FileStorage> = Arc::new(LocalFileStorage::new(&config.upload_dir));
    let max_upload = config.max_upload_bytes as u64;

    // Adapters
    let jwt_service = JwtTokenService::new(JwtConfig::from_app_config(&config));
    let token_provider: Arc<dyn TokenProvider> = Arc::new(jwt_service.clone());
    let password_hasher: Arc<dyn PasswordHasher> = Arc::new(BcryptHasher::default());

    let user_query = UserQueryPostgres::new(Arc::clone(&db_arc));
    let user_repo = UserRepositoryPostgres::new(Arc::clone(&db_arc));
    let token_repo = VerificationTokenRepositoryPostgres::new(Arc::clone(&db_arc));
    let deny_list = RedisTokenRepository::new(Arc::clone(&redis_arc));
    let kyc_repo = KycRepositoryPostgres::new(Arc::clone(&db_arc));
    let kyc_query = KycQueryPostgres::new(Arc::clone(&db_arc));
    let referral_query = ReferralQueryPostgres::new(Arc::clone(&db_arc));
    let admin_query = AdminQueryPostgres::new(Arc::clone(&db_arc));
    let funding_query = FundingQueryPostgres::new(Arc::clone(&db_arc));
    let funding_repo = FundingRepositoryPostgres::new(Arc::clone(&db_arc));

    // Registration
    let create_user_use_case = CreateUserUseCase::new(
        user_query.clone(),
        user_repo.clone(),
        token_repo.clone(),
        password_hasher.clone(),
        config.verification_token_expiry,
    );
    let register_user_orchestrator =
        UserRegistrationOrchestrator::new(Arc::new(create_user_use_case), email_notifier.clone());

    let kyc = KycUseCases {
        submit: Arc::new(SubmitKycService::new(
            user_query.clone(),
            kyc_repo.clone(),
            storage.clone(),
            UploadPolicy::kyc_documents(max_upload),
        )),
        get_status: Arc::new(GetKycStatusService::new(user_query.clone())),
        approve: Arc::new(ApproveKycService::new(user_query.clone(), kyc_repo.clone())),
        reject: Arc::new(RejectKycService::new(user_query.clone(), kyc_repo)),
        list_submissions: Arc::new(ListKycSubmissionsService::new(kyc_query)),
    };

    let referral = ReferralUseCases {
        get_stats: Arc::new(GetReferralStatsService::new(
            user_query.clone(),
            referral_query,
        )),
    };

    let admin = AdminUseCases {
        list_users: Arc::new(ListUsersService::new(admin_query.clone())),
        get_user: Arc::new(GetUserDetailService::new(
            user_query.clone(),
            admin_query.clone(),
        )),
        analytics: Arc::new(GetAnalyticsService::new(admin_query.clone())),
        dashboard: Arc::new(GetDashboardService::new(admin_query, funding_query.clone())),
    };

    let funding = FundingUseCases {
        create: Arc::new(CreateFundingRequestService::new(
            user_query.clone(),
            funding_repo.clone(),
        )),
        list_mine: Arc::new(ListMyFundingRequestsService::new(funding_query.clone())),
        list_all: Arc::new(ListFundingRequestsService::new(funding_query.clone())),
        approve: Arc::new(ApproveFundingRequestService::new(
            funding_query.clone(),
            funding_repo.clone(),
        )),
        reject: Arc::new(RejectFundingRequestService::new(funding_query, funding_repo)),
    };

    let state = AppState {
        register_user_orchestrator: Arc::new(register_user_orchestrator),
        verify_user_email_use_case: Arc::new(VerifyUserEmailUseCase::new(
            user_query.clone(),
            user_repo.clone(),
            token_repo.clone(),
            token_provider.clone(),
        )),
        resend_verification_use_case: Arc::new(ResendVerificationUseCase::new(
            user_query.clone(),
            token_repo.clone(),
            email_notifier.clone(),
            config.verification_token_expiry,
        )),
        login_user_use_case: Arc::new(LoginUserUseCase::new(
            user_query.clone(),
            password_hasher.clone(),
            token_provider,
        )),
        logout_user_use_case: Arc::new(LogoutUseCase::new(Arc::new(deny_list.clone()))),
        request_password_reset_use_case: Arc::new(RequestPasswordResetUseCase::new(
            user_query.clone(),
            token_repo.clone(),
            email_notifier,
            config.password_reset_expiry,
        )),
        reset_password_use_case: Arc::new(ResetPasswordUseCase::new(
            user_query.clone(),
            user_repo.clone(),
            token_repo,
            password_hasher,
        )),
        fetch_user_profile_use_case: Arc::new(FetchUserProfileService::new(user_query.clone())),
        update_user_profile_use_case: Arc::new(UpdateUserProfileService::new(
            user_query.clone(),
            user_repo.clone(),
        )),
        upload_avatar_use_case: Arc::new(UploadAvatarService::new(
            user_query,
            user_repo,
            storage,
            UploadPolicy::avatar(max_upload),
        )),
        kyc,
        referral,
        admin,
        funding,
        settings: RuntimeSettings::from(&config),
    };

    let token_provider_arc: Arc<dyn TokenProvider + Send + Sync> = Arc::new(jwt_service);
    let deny_list_arc: Arc<dyn TokenRepository + Send + Sync> = Arc::new(deny_list);
    let openapi = ApiDoc::openapi();
    let upload_dir = config.upload_dir.clone();
    let server_url = config.server_url();
    info!(address = %server_url, "Server listening");

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(Arc::clone(&token_provider_arc)))
            .app_data(web::Data::new(Arc::clone(&deny_list_arc)))
            .app_data(web::Data::new(Arc::clone(&db_arc)))
            .app_data(web::Data::new(Arc::clone(&redis_arc)))
            .app_data(custom_json_config())
            .app_data(custom_query_config())
            .app_data(custom_path_config())
            .service(Files::new("/uploads", &upload_dir))
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi.clone()),
            )
            .configure(init_routes)
    })
    .bind(server_url)?
    .run()
    .await?;

    Ok(())
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    use crate::admin::adapter::incoming::web::routes as admin_routes;
    use crate::auth::adapter::incoming::web::routes as auth_routes;
    use crate::funding::adapter::incoming::web::routes as funding_routes;
    use crate::kyc::adapter::incoming::web::routes as kyc_routes;
    use crate::referral::adapter::incoming::web::routes as referral_routes;

    // Health
    cfg.service(crate::health::health);
    cfg.service(crate::health::readiness);
    // Auth
    cfg.service(auth_routes::register_user_handler);
    cfg.service(auth_routes::verify_user_email_handler);
    cfg.service(auth_routes::resend_verification_handler);
    cfg.service(auth_routes::login_user_handler);
    cfg.service(auth_routes::logout_user_handler);
    cfg.service(auth_routes::auth_me_handler);
    cfg.service(auth_routes::forgot_password_handler);
    cfg.service(auth_routes::reset_password_handler);
    // Profile
    cfg.service(auth_routes::profile_me_handler);
    cfg.service(auth_routes::update_profile_handler);
    cfg.service(auth_routes::upload_avatar_handler);
    // KYC
    cfg.service(kyc_routes::submit_kyc_handler);
    cfg.service(kyc_routes::kyc_status_handler);
    // Referral
    cfg.service(referral_routes::referral_stats_handler);
    // Funding
    cfg.service(funding_routes::request_deposit_handler);
    cfg.service(funding_routes::request_withdrawal_handler);
    cfg.service(funding_routes::my_funding_requests_handler);
    // Admin
    cfg.service(admin_routes::list_users_handler);
    cfg.service(admin_routes::get_user_handler);
    cfg.service(admin_routes::analytics_handler);
    cfg.service(admin_routes::dashboard_handler);
    cfg.service(kyc_routes::list_kyc_submissions_handler);
    cfg.service(kyc_routes::approve_kyc_handler);
    cfg.service(kyc_routes::reject_kyc_handler);
    cfg.service(funding_routes::list_funding_requests_handler);
    cfg.service(funding_routes::approve_funding_request_handler);
    cfg.service(funding_routes::reject_funding_request_handler);
}

#[cfg(not(tarpaulin_include))]
fn main() {
    if let Err(e) = start() {
        eprintln!("Error starting app: {e:#}");
    }
}

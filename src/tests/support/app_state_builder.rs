use actix_web::web;
use std::sync::Arc;

use crate::admin::application::admin_use_cases::AdminUseCases;
use crate::admin::application::service::{
    GetAnalyticsService, GetDashboardService, GetUserDetailService, ListUsersService,
};
use crate::auth::adapter::outgoing::security::BcryptHasher;
use crate::auth::application::orchestrator::user_registration::UserRegistrationOrchestrator;
use crate::auth::application::ports::outgoing::{PasswordHasher, TokenProvider};
use crate::auth::application::services::user_profile::{
    FetchUserProfileService, UpdateUserProfileService, UploadAvatarService,
};
use crate::auth::application::use_cases::{
    create_user::CreateUserUseCase, login_user::LoginUserUseCase, logout_user::LogoutUseCase,
    request_password_reset::RequestPasswordResetUseCase,
    resend_verification::ResendVerificationUseCase, reset_password::ResetPasswordUseCase,
    verify_user_email::VerifyUserEmailUseCase,
};
use crate::funding::application::funding_use_cases::FundingUseCases;
use crate::funding::application::service::{
    ApproveFundingRequestService, CreateFundingRequestService, ListFundingRequestsService,
    ListMyFundingRequestsService, RejectFundingRequestService,
};
use crate::kyc::application::kyc_use_cases::KycUseCases;
use crate::kyc::application::service::{
    ApproveKycService, GetKycStatusService, ListKycSubmissionsService, RejectKycService,
    SubmitKycService,
};
use crate::referral::application::referral_use_cases::ReferralUseCases;
use crate::referral::application::service::GetReferralStatsService;
use crate::shared::config::RuntimeSettings;
use crate::storage::application::domain::UploadPolicy;
use crate::tests::support::fixtures::jwt_service;
use crate::tests::support::in_memory::{
    InMemoryDenyList, InMemoryFunding, InMemoryStorage, InMemoryUsers,
    InMemoryVerificationTokens,
};
use crate::tests::support::stubs::RecordingNotifier;
use crate::AppState;

const VERIFICATION_TTL_SECS: i64 = 86_400;
const RESET_TTL_SECS: i64 = 3_600;
const TEST_BCRYPT_COST: u32 = 4;

/// Every outgoing port of the application, held in memory.
/// Clones share state, so a test can seed and inspect it around requests.
#[derive(Clone, Default)]
pub struct InMemoryBackend {
    pub users: InMemoryUsers,
    pub tokens: InMemoryVerificationTokens,
    pub storage: InMemoryStorage,
    pub deny_list: InMemoryDenyList,
    pub funding: InMemoryFunding,
    pub notifier: RecordingNotifier,
}

/// Wires the real services over an [`InMemoryBackend`].
pub struct TestAppStateBuilder {
    backend: InMemoryBackend,
    settings: RuntimeSettings,
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self::new(InMemoryBackend::default())
    }
}

impl TestAppStateBuilder {
    pub fn new(backend: InMemoryBackend) -> Self {
        Self {
            backend,
            settings: RuntimeSettings {
                expose_verification_token: true,
                ..RuntimeSettings::default()
            },
        }
    }

    pub fn backend(&self) -> &InMemoryBackend {
        &self.backend
    }

    pub fn with_max_upload_bytes(mut self, max: usize) -> Self {
        self.settings.max_upload_bytes = max;
        self
    }

    pub fn with_exposed_tokens(mut self, expose: bool) -> Self {
        self.settings.expose_verification_token = expose;
        self
    }

    pub fn build(self) -> web::Data<AppState> {
        let InMemoryBackend {
            users,
            tokens,
            storage,
            deny_list,
            funding,
            notifier,
        } = self.backend;
        let max_upload = self.settings.max_upload_bytes as u64;

        let hasher: Arc<dyn PasswordHasher> = Arc::new(BcryptHasher::new(TEST_BCRYPT_COST));
        let token_provider: Arc<dyn TokenProvider> = Arc::new(jwt_service());
        let notifier = Arc::new(notifier);
        let storage = Arc::new(storage);

        let create_user = CreateUserUseCase::new(
            users.clone(),
            users.clone(),
            tokens.clone(),
            hasher.clone(),
            VERIFICATION_TTL_SECS,
        );

        let kyc = KycUseCases {
            submit: Arc::new(SubmitKycService::new(
                users.clone(),
                users.clone(),
                storage.clone(),
                UploadPolicy::kyc_documents(max_upload),
            )),
            get_status: Arc::new(GetKycStatusService::new(users.clone())),
            approve: Arc::new(ApproveKycService::new(users.clone(), users.clone())),
            reject: Arc::new(RejectKycService::new(users.clone(), users.clone())),
            list_submissions: Arc::new(ListKycSubmissionsService::new(users.clone())),
        };

        let referral = ReferralUseCases {
            get_stats: Arc::new(GetReferralStatsService::new(users.clone(), users.clone())),
        };

        let admin = AdminUseCases {
            list_users: Arc::new(ListUsersService::new(users.clone())),
            get_user: Arc::new(GetUserDetailService::new(users.clone(), users.clone())),
            analytics: Arc::new(GetAnalyticsService::new(users.clone())),
            dashboard: Arc::new(GetDashboardService::new(users.clone(), funding.clone())),
        };

        let funding = FundingUseCases {
            create: Arc::new(CreateFundingRequestService::new(
                users.clone(),
                funding.clone(),
            )),
            list_mine: Arc::new(ListMyFundingRequestsService::new(funding.clone())),
            list_all: Arc::new(ListFundingRequestsService::new(funding.clone())),
            approve: Arc::new(ApproveFundingRequestService::new(
                funding.clone(),
                funding.clone(),
            )),
            reject: Arc::new(RejectFundingRequestService::new(
                funding.clone(),
                funding,
            )),
        };

        web::Data::new(AppState {
            register_user_orchestrator: Arc::new(UserRegistrationOrchestrator::new(
                Arc::new(create_user),
                notifier.clone(),
            )),
            verify_user_email_use_case: Arc::new(VerifyUserEmailUseCase::new(
                users.clone(),
                users.clone(),
                tokens.clone(),
                token_provider.clone(),
            )),
            resend_verification_use_case: Arc::new(ResendVerificationUseCase::new(
                users.clone(),
                tokens.clone(),
                notifier.clone(),
                VERIFICATION_TTL_SECS,
            )),
            login_user_use_case: Arc::new(LoginUserUseCase::new(
                users.clone(),
                hasher.clone(),
                token_provider,
            )),
            logout_user_use_case: Arc::new(LogoutUseCase::new(Arc::new(deny_list))),
            request_password_reset_use_case: Arc::new(RequestPasswordResetUseCase::new(
                users.clone(),
                tokens.clone(),
                notifier,
                RESET_TTL_SECS,
            )),
            reset_password_use_case: Arc::new(ResetPasswordUseCase::new(
                users.clone(),
                users.clone(),
                tokens,
                hasher,
            )),
            fetch_user_profile_use_case: Arc::new(FetchUserProfileService::new(users.clone())),
            update_user_profile_use_case: Arc::new(UpdateUserProfileService::new(
                users.clone(),
                users.clone(),
            )),
            upload_avatar_use_case: Arc::new(UploadAvatarService::new(
                users.clone(),
                users,
                storage,
                UploadPolicy::avatar(max_upload),
            )),
            kyc,
            referral,
            admin,
            funding,
            settings: self.settings,
        })
    }
}

use actix_web::{dev::Payload, web, Error as ActixError, FromRequest, HttpRequest, HttpResponse};
use chrono::{DateTime, Utc};
use futures::future::LocalBoxFuture;
use std::sync::Arc;
use tracing::error;
use uuid::Uuid;

use crate::auth::application::domain::entities::{Role, UserId};
use crate::auth::application::ports::outgoing::token_provider::{
    TokenError, TokenProvider, SESSION_TOKEN_TYPE,
};
use crate::auth::application::ports::outgoing::token_repository::TokenRepository;
use crate::shared::api::ApiResponse;

/// Caller identified by a valid, unrevoked session token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub role: Role,
    pub jti: Uuid,
    pub expires_at: DateTime<Utc>,
}

impl AuthenticatedUser {
    pub fn id(&self) -> UserId {
        UserId::from(self.user_id)
    }
}

fn create_api_error(response: HttpResponse) -> ActixError {
    actix_web::error::InternalError::from_response("", response).into()
}

fn token_error_response(e: &TokenError) -> HttpResponse {
    match e {
        TokenError::TokenExpired => ApiResponse::unauthorized("TOKEN_EXPIRED", "Token has expired"),
        TokenError::InvalidTokenType(_) => {
            ApiResponse::unauthorized("INVALID_TOKEN_TYPE", "Invalid token type")
        }
        _ => ApiResponse::unauthorized("INVALID_TOKEN", "Invalid or expired token"),
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token_provider = req
            .app_data::<web::Data<Arc<dyn TokenProvider + Send + Sync>>>()
            .cloned();
        let token_repository = req
            .app_data::<web::Data<Arc<dyn TokenRepository + Send + Sync>>>()
            .cloned();
        let token = extract_token_from_header(req);

        Box::pin(async move {
            let (Some(token_provider), Some(token_repository)) = (token_provider, token_repository)
            else {
                error!("Token provider or token repository is not registered as app data");
                return Err(create_api_error(ApiResponse::internal_error()));
            };

            let token = token.ok_or_else(|| {
                create_api_error(ApiResponse::unauthorized(
                    "MISSING_AUTH_HEADER",
                    "Missing or invalid authorization header",
                ))
            })?;

            let claims = token_provider
                .verify_token(&token)
                .map_err(|e| create_api_error(token_error_response(&e)))?;

            if claims.token_type != SESSION_TOKEN_TYPE {
                return Err(create_api_error(ApiResponse::unauthorized(
                    "INVALID_TOKEN_TYPE",
                    "Invalid token type",
                )));
            }

            match token_repository.is_token_revoked(claims.jti).await {
                Ok(false) => {}
                Ok(true) => {
                    return Err(create_api_error(ApiResponse::unauthorized(
                        "TOKEN_REVOKED",
                        "Token has been revoked",
                    )));
                }
                Err(e) => {
                    error!(jti = %claims.jti, "Failed to check token deny list: {}", e);
                    return Err(create_api_error(ApiResponse::internal_error()));
                }
            }

            Ok(AuthenticatedUser {
                user_id: claims.sub,
                role: claims.role,
                jti: claims.jti,
                expires_at: claims.expires_at(),
            })
        })
    }
}

/// Authenticated caller whose token carries the admin role.
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthenticatedUser);

impl AdminUser {
    pub fn id(&self) -> UserId {
        self.0.id()
    }
}

impl FromRequest for AdminUser {
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let authenticated = AuthenticatedUser::from_request(req, payload);

        Box::pin(async move {
            let user = authenticated.await?;
            if !user.role.is_admin() {
                return Err(create_api_error(ApiResponse::forbidden(
                    "ADMIN_REQUIRED",
                    "Administrator access required",
                )));
            }
            Ok(AdminUser(user))
        })
    }
}

fn extract_token_from_header(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get("Authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

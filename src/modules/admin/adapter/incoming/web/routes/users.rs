use crate::admin::application::ports::incoming::use_cases::{
    AdminUserDetail, GetUserDetailError, ListUsersError,
};
use crate::admin::application::ports::outgoing::{AdminUserSummary, UserFilter};
use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::auth::AdminUser;
use crate::auth::application::domain::entities::UserId;
use crate::kyc::application::domain::entities::KycStatus;
use crate::shared::api::ApiResponse;
use crate::shared::{PageRequest, PageResult};
use crate::AppState;
use actix_web::{get, web, Responder};
use serde::Deserialize;
use tracing::error;
use utoipa::IntoParams;
use uuid::Uuid;

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListUsersQuery {
    /// Matches email, first name, last name or username.
    pub search: Option<String>,
    /// `none`, `submitted`, `verified` or `rejected`.
    pub kyc_status: Option<String>,
    pub page: Option<u32>,
    /// 1 to 100, default 20.
    pub per_page: Option<u32>,
}

impl ListUsersQuery {
    fn filter(&self) -> Result<UserFilter, String> {
        let kyc_status = self
            .kyc_status
            .as_deref()
            .map(str::parse::<KycStatus>)
            .transpose()?;
        let search = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        Ok(UserFilter { search, kyc_status })
    }
}

/// List users
#[utoipa::path(
    get,
    path = "/api/admin/users",
    tag = "admin",
    security(("bearer_auth" = [])),
    params(ListUsersQuery),
    responses(
        (status = 200, description = "Page of users with referral counts", body = inline(SuccessResponse<PageResult<AdminUserSummary>>)),
        (status = 400, description = "Unknown KYC status", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[get("/api/admin/users")]
pub async fn list_users_handler(
    _admin: AdminUser,
    query: web::Query<ListUsersQuery>,
    data: web::Data<AppState>,
) -> impl Responder {
    let filter = match query.filter() {
        Ok(filter) => filter,
        Err(msg) => return ApiResponse::bad_request("VALIDATION_ERROR", &msg),
    };
    let page = PageRequest::from_query(query.page, query.per_page);

    match data.admin.list_users.execute(filter, page).await {
        Ok(result) => ApiResponse::success(result),
        Err(ListUsersError::QueryFailed(e)) => {
            error!(error = %e, "Failed to list users");
            ApiResponse::internal_error()
        }
    }
}

/// User detail
#[utoipa::path(
    get,
    path = "/api/admin/users/{id}",
    tag = "admin",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "Sanitized user, KYC record and referral count", body = inline(SuccessResponse<AdminUserDetail>)),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[get("/api/admin/users/{id}")]
pub async fn get_user_handler(
    _admin: AdminUser,
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    let user_id = path.into_inner();

    match data.admin.get_user.execute(UserId::from(user_id)).await {
        Ok(detail) => ApiResponse::success(detail),
        Err(GetUserDetailError::UserNotFound) => {
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }
        Err(GetUserDetailError::QueryFailed(e)) => {
            error!(user_id = %user_id, error = %e, "Failed to load user detail");
            ApiResponse::internal_error()
        }
    }
}

use actix_web::{http::StatusCode, HttpResponse};
use serde::Serialize;

/// JSON envelope for every API reply: `{ success, data }` or `{ success, error }`.
#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

/// Stable machine-readable `code` plus a message for humans.
#[derive(Serialize, Clone, Debug)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: &str, message: &str) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
        }
    }
}

fn reply<T: Serialize>(status: StatusCode, body: ApiResponse<T>) -> HttpResponse {
    HttpResponse::build(status).json(body)
}

impl<T: Serialize> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn success(data: T) -> HttpResponse {
        reply(StatusCode::OK, Self::ok(data))
    }

    pub fn created(data: T) -> HttpResponse {
        reply(StatusCode::CREATED, Self::ok(data))
    }
}

impl ApiResponse<()> {
    pub fn error(status: StatusCode, code: &str, message: &str) -> HttpResponse {
        reply(
            status,
            ApiResponse::<()> {
                success: false,
                data: None,
                error: Some(ApiError::new(code, message)),
            },
        )
    }

    pub fn bad_request(code: &str, message: &str) -> HttpResponse {
        Self::error(StatusCode::BAD_REQUEST, code, message)
    }

    pub fn unauthorized(code: &str, message: &str) -> HttpResponse {
        Self::error(StatusCode::UNAUTHORIZED, code, message)
    }

    pub fn forbidden(code: &str, message: &str) -> HttpResponse {
        Self::error(StatusCode::FORBIDDEN, code, message)
    }

    pub fn not_found(code: &str, message: &str) -> HttpResponse {
        Self::error(StatusCode::NOT_FOUND, code, message)
    }

    pub fn conflict(code: &str, message: &str) -> HttpResponse {
        Self::error(StatusCode::CONFLICT, code, message)
    }

    /// Uploads over the configured byte limit.
    pub fn payload_too_large(code: &str, message: &str) -> HttpResponse {
        Self::error(StatusCode::PAYLOAD_TOO_LARGE, code, message)
    }

    /// Details stay in the logs; clients only see a generic code.
    pub fn internal_error() -> HttpResponse {
        Self::error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_ERROR",
            "An unexpected error occurred",
        )
    }
}

use serde::Serialize;
use utoipa::ToSchema;

/// Standard success response wrapper
#[derive(Serialize, ToSchema)]
#[serde(bound = "T: Serialize")]
pub struct SuccessResponse<T> {
    /// Always true for successful responses
    #[schema(example = true)]
    pub success: bool,
    /// Response data
    pub data: T,
}

/// Standard error response wrapper
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Always false for error responses
    #[schema(example = false)]
    pub success: bool,
    /// Error details
    pub error: ErrorDetail,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorDetail {
    /// Error code for programmatic handling
    #[schema(example = "VALIDATION_ERROR")]
    pub code: String,

    /// Human-readable error message
    #[schema(example = "firstName is required")]
    pub message: String,
}

/// Body of endpoints that only acknowledge an action
#[derive(Serialize, ToSchema, Debug)]
pub struct MessageResponse {
    #[schema(example = "Logged out successfully")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

use crate::shared::api::ApiResponse;
use actix_web::error::InternalError;
use actix_web::web::{JsonConfig, PathConfig, QueryConfig};

/// Malformed or mistyped JSON bodies become `400 VALIDATION_ERROR` envelopes.
pub fn custom_json_config() -> JsonConfig {
    JsonConfig::default().error_handler(|err, _req| {
        let message = err.to_string();
        InternalError::from_response(err, ApiResponse::bad_request("VALIDATION_ERROR", &message))
            .into()
    })
}

/// Same envelope for unparsable query strings such as `?page=abc`.
pub fn custom_query_config() -> QueryConfig {
    QueryConfig::default().error_handler(|err, _req| {
        let message = err.to_string();
        InternalError::from_response(err, ApiResponse::bad_request("INVALID_QUERY", &message))
            .into()
    })
}

/// Path segments that fail to parse (a malformed id) name nothing that exists.
pub fn custom_path_config() -> PathConfig {
    PathConfig::default().error_handler(|err, _req| {
        let message = err.to_string();
        InternalError::from_response(err, ApiResponse::not_found("INVALID_ID", &message)).into()
    })
}

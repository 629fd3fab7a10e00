use actix_web::web;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::application::domain::entities::{Role, User};
use crate::auth::application::ports::outgoing::{TokenProvider, TokenRepository};
use crate::tests::support::fixtures::jwt_service;
use crate::tests::support::in_memory::InMemoryDenyList;

pub fn token_provider_data() -> web::Data<Arc<dyn TokenProvider + Send + Sync>> {
    let provider: Arc<dyn TokenProvider + Send + Sync> = Arc::new(jwt_service());
    web::Data::new(provider)
}

pub fn deny_list_data(
    deny_list: &InMemoryDenyList,
) -> web::Data<Arc<dyn TokenRepository + Send + Sync>> {
    let repository: Arc<dyn TokenRepository + Send + Sync> = Arc::new(deny_list.clone());
    web::Data::new(repository)
}

/// `Authorization` header value carrying a fresh session token.
pub fn bearer(user_id: Uuid, role: Role) -> String {
    let issued = jwt_service()
        .generate_session_token(user_id, role)
        .expect("test token should encode");
    format!("Bearer {}", issued.token)
}

pub fn bearer_for(user: &User) -> String {
    bearer(user.id.value(), user.role)
}

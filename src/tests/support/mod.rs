pub mod app_state_builder;
pub mod auth_helper;
pub mod fixtures;
pub mod in_memory;
pub mod multipart;
pub mod stubs;

/// Spins up a test service over a [`TestAppStateBuilder`](app_state_builder::TestAppStateBuilder),
/// with the token provider, deny list and JSON error handler registered.
macro_rules! test_app {
    ($builder:expr; $($service:expr),+ $(,)?) => {{
        let builder = $builder;
        let deny_list = builder.backend().deny_list.clone();
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(builder.build())
                .app_data($crate::tests::support::auth_helper::token_provider_data())
                .app_data($crate::tests::support::auth_helper::deny_list_data(&deny_list))
                .app_data($crate::shared::api::custom_json_config())
                .app_data($crate::shared::api::custom_query_config())
                .app_data($crate::shared::api::custom_path_config())
                $(.service($service))+,
        )
        .await
    }};
}

pub(crate) use test_app;

//! Shared helpers for the infra integration tests

use std::sync::Once;

use peopleai_domain::{ClientConfig, Credentials};
use peopleai_infra::ApiClient;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const AUTH_PATH: &str = "/auth/v1/tokens";
pub const JOBS_PATH: &str = "/pull/v1/export/activities/jobs";

static TRACING: Once = Once::new();

/// Route client logs through the test harness writer.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("peopleai_infra=debug")
            .with_test_writer()
            .try_init();
    });
}

/// Client pointed at the mock server, authenticating with client credentials.
pub fn client_for(server: &MockServer) -> ApiClient {
    init_tracing();
    let credentials = Credentials::new("<api_key>", "<api_secret>").with_endpoint(server.uri());
    ApiClient::new(ClientConfig::new(credentials)).expect("api client should build")
}

/// Mount the token endpoint, expecting `calls` exchanges.
pub async fn mount_auth(server: &MockServer, expires_in: i64, calls: u64) {
    Mock::given(method("POST"))
        .and(path(AUTH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            r#"{{"access_token": "shiny-token", "expires_in": {}}}"#,
            expires_in
        )))
        .expect(calls)
        .mount(server)
        .await;
}

/// Number of requests the server received on `route`.
pub async fn requests_to(server: &MockServer, route: &str) -> usize {
    server
        .received_requests()
        .await
        .expect("request recording enabled")
        .iter()
        .filter(|request| request.url.path() == route)
        .count()
}

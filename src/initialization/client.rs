//! HTTP client initialization.
//!
//! Two clients are built: the probe client never follows redirects so every
//! hop can be observed, the fallback client follows them itself.

use std::sync::Arc;

use reqwest::ClientBuilder;

use crate::config::{Config, FALLBACK_MAX_REDIRECTS};

/// Initializes the HTTP client used for HEAD probes.
///
/// Creates a `reqwest::Client` with redirects disabled so the resolver can
/// record each `Location` by hand. Deadlines are applied per attempt, not here.
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_probe_client(config: &Config) -> Result<Arc<reqwest::Client>, reqwest::Error> {
    let client = ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .user_agent(config.user_agent.clone())
        .build()?;
    Ok(Arc::new(client))
}

/// Initializes the HTTP client used for the GET fallback.
///
/// Follows up to `FALLBACK_MAX_REDIRECTS` redirects; intermediate hops are not
/// visible on this path.
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_fallback_client(config: &Config) -> Result<Arc<reqwest::Client>, reqwest::Error> {
    let client = ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::limited(FALLBACK_MAX_REDIRECTS))
        .user_agent(config.user_agent.clone())
        .build()?;
    Ok(Arc::new(client))
}

#[cfg(test)]
mod tests {
    use super::*;
    use httptest::{matchers::*, responders::*, Expectation, Server};

    #[tokio::test]
    async fn test_probe_client_sends_user_agent_and_does_not_follow() {
        let server = Server::run();
        server.expect(
            Expectation::matching(httptest::all_of![
                request::method_path("HEAD", "/"),
                request::headers(contains(("user-agent", "redirect-checker-test/1.0"))),
            ])
            .respond_with(status_code(301).insert_header("Location", "/elsewhere")),
        );

        let config = Config {
            user_agent: "redirect-checker-test/1.0".to_string(),
            ..Default::default()
        };
        let client = init_probe_client(&config).expect("client");
        let response = client
            .head(server.url("/").to_string())
            .send()
            .await
            .expect("request should succeed");

        assert_eq!(response.status(), 301);
    }

    #[tokio::test]
    async fn test_fallback_client_follows_redirects() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/a"))
                .respond_with(status_code(307).insert_header("Location", "/b")),
        );
        server.expect(
            Expectation::matching(request::method_path("GET", "/b"))
                .respond_with(status_code(200)),
        );

        let client = init_fallback_client(&Config::default()).expect("client");
        let response = client
            .get(server.url("/a").to_string())
            .send()
            .await
            .expect("request should succeed");

        assert_eq!(response.status(), 200);
        assert_eq!(response.url().path(), "/b");
    }
}

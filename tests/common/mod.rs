//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests.

#![allow(dead_code)]

/// Test helper functions
pub mod helpers {
    use keysword::config::Settings;
    use secrecy::SecretString;
    use serde_json::json;
    use wiremock::matchers::{basic_auth, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub const USERNAME: &str = "svc-keysword";
    pub const PASSWORD: &str = "hunter2";

    pub const INVENTORY_PAGE: &str = "<html>\n\
        <input type=\"hidden\" name=\"session-token\" value=\"ABC123\">\n\
        <a id=\"SHOW_KEY\" onclick=\"retrieveFV2Key(77,'individual')\">Show Key</a>\n\
        </html>\n";

    /// Create settings pointing at a mock JSS
    pub fn create_test_settings(server: &MockServer) -> Settings {
        let mut settings = Settings::default();
        settings.jamf.host = server.uri();
        settings.jamf.username = USERNAME.to_string();
        settings.jamf.password = SecretString::from(PASSWORD.to_string());
        settings
    }

    /// Mount the canned JSS conversation for computer `mbp-alice` / id 42
    pub async fn mount_canned_jss(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/JSSResource/computers/name/mbp-alice"))
            .and(basic_auth(USERNAME, PASSWORD))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"computer": {"general": {"id": "42"}}})),
            )
            .mount(server)
            .await;

        Mock::given(method("POST"))
            .and(path("/"))
            .and(query_param("failover", ""))
            .respond_with(
                ResponseTemplate::new(200).insert_header("set-cookie", "JSESSIONID=s1; Path=/"),
            )
            .mount(server)
            .await;

        Mock::given(method("GET"))
            .and(path("/legacy/computers.html"))
            .and(query_param("id", "42"))
            .respond_with(ResponseTemplate::new(200).set_body_string(INVENTORY_PAGE))
            .mount(server)
            .await;

        Mock::given(method("POST"))
            .and(path("/computers.ajax"))
            .and(query_param("id", "42"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("<individualKey>SUPERSECRET</individualKey>"),
            )
            .mount(server)
            .await;
    }
}

//! Integration tests for Skraper
//!
//! These tests use wiremock to serve small linked sites and exercise the
//! crawler and the session driver end-to-end.

mod crawl_tests;
mod session_tests;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Serves `body` as HTML at `route`, expecting exactly `hits` requests
pub async fn mount_page(server: &MockServer, route: &str, body: String, hits: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .expect(hits)
        .mount(server)
        .await;
}

/// A page whose body is only links to `targets`, in order
pub fn links_page(base: &str, targets: &[&str]) -> String {
    let anchors: Vec<String> = targets
        .iter()
        .map(|t| format!(r#"<a href="{}{}">{}</a>"#, base, t, t))
        .collect();
    format!("<html><body>{}</body></html>", anchors.join("\n"))
}

//! Crawl traversal tests against a mock server

use crate::{links_page, mount_page};
use skraper::config::{CrawlerConfig, HttpConfig};
use skraper::crawler::{Fetcher, Scheduler};
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn scheduler(max_depth: u32, page_limit: usize) -> Scheduler {
    let fetcher = Fetcher::new(&HttpConfig::default()).expect("Failed to build client");
    Scheduler::new(
        fetcher,
        CrawlerConfig {
            max_depth,
            page_limit,
        },
    )
}

fn paths(urls: Vec<Url>) -> Vec<String> {
    urls.into_iter().map(|u| u.path().to_string()).collect()
}

#[tokio::test]
async fn test_cycle_visits_each_page_once() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", links_page(&base, &["/b"]), 1).await;
    mount_page(&server, "/b", links_page(&base, &["/", "/b"]), 1).await;

    let seed = Url::parse(&base).unwrap();
    let visited = scheduler(5, 100).crawl(&seed).await;

    assert_eq!(paths(visited.into_vec()), vec!["/", "/b"]);
}

#[tokio::test]
async fn test_depth_limit() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", links_page(&base, &["/1"]), 1).await;
    mount_page(&server, "/1", links_page(&base, &["/2"]), 1).await;
    mount_page(&server, "/2", links_page(&base, &["/3"]), 1).await;
    mount_page(&server, "/3", links_page(&base, &[]), 0).await;

    let seed = Url::parse(&base).unwrap();
    let visited = scheduler(2, 100).crawl(&seed).await;

    assert_eq!(paths(visited.into_vec()), vec!["/", "/1", "/2"]);
}

#[tokio::test]
async fn test_depth_zero_fetches_seed_only() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", links_page(&base, &["/a", "/b"]), 1).await;
    mount_page(&server, "/a", links_page(&base, &[]), 0).await;
    mount_page(&server, "/b", links_page(&base, &[]), 0).await;

    let seed = Url::parse(&base).unwrap();
    let visited = scheduler(0, 100).crawl(&seed).await;

    assert_eq!(visited.len(), 1);
}

#[tokio::test]
async fn test_page_limit() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", links_page(&base, &["/a", "/b", "/c", "/d"]), 1).await;
    mount_page(&server, "/a", links_page(&base, &[]), 1).await;
    mount_page(&server, "/b", links_page(&base, &[]), 1).await;
    mount_page(&server, "/c", links_page(&base, &[]), 0).await;
    mount_page(&server, "/d", links_page(&base, &[]), 0).await;

    let seed = Url::parse(&base).unwrap();
    let visited = scheduler(3, 3).crawl(&seed).await;

    assert_eq!(paths(visited.into_vec()), vec!["/", "/a", "/b"]);
}

#[tokio::test]
async fn test_depth_first_document_order() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", links_page(&base, &["/a", "/b"]), 1).await;
    mount_page(&server, "/a", links_page(&base, &["/a1", "/b"]), 1).await;
    mount_page(&server, "/a1", links_page(&base, &[]), 1).await;
    mount_page(&server, "/b", links_page(&base, &[]), 1).await;

    let seed = Url::parse(&base).unwrap();
    let visited = scheduler(3, 100).crawl(&seed).await;

    assert_eq!(paths(visited.into_vec()), vec!["/", "/a", "/a1", "/b"]);
}

#[tokio::test]
async fn test_dead_branch_does_not_stop_crawl() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", links_page(&base, &["/missing", "/ok"]), 1).await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;
    mount_page(&server, "/ok", links_page(&base, &[]), 1).await;

    let seed = Url::parse(&base).unwrap();
    let mut on_visit = Vec::new();
    let visited = scheduler(2, 100)
        .crawl_with(&seed, |url, _| on_visit.push(url.path().to_string()))
        .await;

    // Failed fetches still count as visited, but never reach the callback
    assert_eq!(paths(visited.into_vec()), vec!["/", "/missing", "/ok"]);
    assert_eq!(on_visit, vec!["/", "/ok"]);
}

#[tokio::test]
async fn test_unreachable_seed_yields_single_visit() {
    // Nothing listens on this port once the server is dropped
    let base = {
        let server = MockServer::start().await;
        server.uri()
    };

    let seed = Url::parse(&base).unwrap();
    let visited = scheduler(3, 100).crawl(&seed).await;

    assert_eq!(visited.len(), 1);
}

#[tokio::test]
async fn test_fragments_and_relative_links_deduplicated() {
    let server = MockServer::start().await;
    let base = server.uri();

    let body = r##"<html><body>
        <a href="/page#top">top</a>
        <a href="page#bottom">bottom</a>
        <a href="#">self</a>
        <a href="mailto:someone@example.com">mail</a>
        </body></html>"##
        .to_string();
    mount_page(&server, "/", body, 1).await;
    mount_page(&server, "/page", links_page(&base, &[]), 1).await;

    let seed = Url::parse(&base).unwrap();
    let visited = scheduler(2, 100).crawl(&seed).await;

    assert_eq!(paths(visited.into_vec()), vec!["/", "/page"]);
}

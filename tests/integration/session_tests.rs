//! Session driver tests: extraction, output files, scripts and downloads

use crate::{links_page, mount_page};
use skraper::config::Config;
use skraper::driver::{parse_script, Command, Session};
use skraper::extract::{Extraction, Record, ResultSet};
use skraper::output::{hashed_file_name, OutputFormat};
use skraper::SkraperError;
use std::path::{Path, PathBuf};
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn session(dir: &Path) -> Session {
    let mut config = Config::default();
    config.output.output_dir = dir.join("out");
    config.output.media_dir = dir.join("media");
    Session::new(config).expect("Failed to build session")
}

fn expected_path(dir: &Path, base: &Url, ext: &str) -> PathBuf {
    let site = format!("{}:{}", base.host_str().unwrap(), base.port().unwrap());
    dir.join("out")
        .join(site)
        .join(".extracted_data")
        .join(format!("{}.{}", hashed_file_name("output"), ext))
}

#[tokio::test]
async fn test_extract_tags_to_json() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let base = Url::parse(&server.uri()).unwrap();

    let body = "<html><body><h1>Hello</h1><p>one</p><h1></h1><p>two</p></body></html>";
    mount_page(&server, "/", body.to_string(), 1).await;

    let mut session = session(dir.path());
    let commands = vec![
        Command::SetUrl(base.clone()),
        Command::Extract(Extraction::Tags(vec!["h1".to_string(), "p".to_string()])),
        Command::Output(OutputFormat::Json),
    ];
    assert_eq!(session.run(&commands).await, 0);

    let written = std::fs::read(expected_path(dir.path(), &base, "json")).unwrap();
    let results: ResultSet = serde_json::from_slice(&written).unwrap();
    let texts: Vec<(String, String)> = results
        .iter()
        .map(|r| match r {
            Record::Tag { name, text } => (name.clone(), text.clone()),
            other => panic!("unexpected record {:?}", other),
        })
        .collect();

    assert_eq!(
        texts,
        vec![
            ("h1".to_string(), "Hello".to_string()),
            ("h1".to_string(), String::new()),
            ("p".to_string(), "one".to_string()),
            ("p".to_string(), "two".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_table_to_csv() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let base = Url::parse(&server.uri()).unwrap();

    let body = r#"<table>
        <tr><th>Name</th><th>Age</th></tr>
        <tr><td>Ann</td><td>30</td></tr>
        <tr><td>Bo</td><td>40</td></tr>
    </table>"#;
    mount_page(&server, "/", body.to_string(), 1).await;

    let mut session = session(dir.path());
    session.execute(&Command::SetUrl(base.clone())).await.unwrap();
    session
        .execute(&Command::Extract(Extraction::Tables))
        .await
        .unwrap();
    let path = session.write(OutputFormat::Csv).unwrap();

    assert_eq!(path, expected_path(dir.path(), &base, "csv"));
    assert_eq!(
        std::fs::read_to_string(path).unwrap(),
        "Name,Age\nAnn,30\nBo,40\n"
    );
}

#[tokio::test]
async fn test_repeated_output_overwrites_same_file() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let base = Url::parse(&server.uri()).unwrap();

    mount_page(&server, "/", r#"<img src="a.png"><img src="b.png">"#.to_string(), 2).await;

    let mut session = session(dir.path());
    session.execute(&Command::SetUrl(base)).await.unwrap();
    session
        .execute(&Command::Extract(Extraction::Images))
        .await
        .unwrap();
    let first = session.write(OutputFormat::Xlsx).unwrap();

    session
        .execute(&Command::Extract(Extraction::Images))
        .await
        .unwrap();
    let second = session.write(OutputFormat::Xlsx).unwrap();

    assert_eq!(first, second);
    assert_eq!(session.results().len(), 4);
    assert!(std::fs::read(second).unwrap().starts_with(b"PK"));
}

#[tokio::test]
async fn test_fetch_failure_leaves_results_unchanged() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut session = session(dir.path());
    session
        .execute(&Command::SetUrl(Url::parse(&server.uri()).unwrap()))
        .await
        .unwrap();

    let result = session.execute(&Command::Extract(Extraction::Meta)).await;
    assert!(matches!(result, Err(SkraperError::Fetch(_))));
    assert!(session.results().is_empty());
}

#[tokio::test]
async fn test_crawl_with_extraction() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let base = server.uri();

    let root = format!(
        r#"<html><body><img src="root.png"><a href="{}/child">child</a></body></html>"#,
        base
    );
    mount_page(&server, "/", root, 1).await;
    mount_page(&server, "/child", r#"<img src="child.png">"#.to_string(), 1).await;

    let mut config = Config::default();
    config.crawler.max_depth = 1;
    config.output.output_dir = dir.path().to_path_buf();
    let mut session = Session::new(config).unwrap();

    session
        .execute(&Command::SetUrl(Url::parse(&base).unwrap()))
        .await
        .unwrap();
    session
        .execute(&Command::Crawl {
            extract: vec![Extraction::Images],
        })
        .await
        .unwrap();

    let sources: Vec<&str> = session
        .results()
        .iter()
        .filter_map(|r| match r {
            Record::Image { src } => Some(src.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(sources, vec!["root.png", "child.png"]);
}

#[tokio::test]
async fn test_store_html() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let base = Url::parse(&server.uri()).unwrap();

    let body = "<html><body>raw</body></html>";
    mount_page(&server, "/", body.to_string(), 1).await;

    let mut session = session(dir.path());
    session.execute(&Command::SetUrl(base.clone())).await.unwrap();
    let path = session.store_html().await.unwrap();

    assert_eq!(path, expected_path(dir.path(), &base, "html"));
    assert_eq!(std::fs::read_to_string(path).unwrap(), body);
}

#[tokio::test]
async fn test_search() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    mount_page(
        &server,
        "/",
        "<p>Rust is a Systems language</p>".to_string(),
        2,
    )
    .await;

    let mut session = session(dir.path());
    session
        .execute(&Command::SetUrl(Url::parse(&server.uri()).unwrap()))
        .await
        .unwrap();

    assert!(session.search("systems\\s+LANGUAGE").await.unwrap());
    assert!(!session.search("python").await.unwrap());
}

#[tokio::test]
async fn test_download_images() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    let page = r#"<img src="/img/logo.png"><img src="/img/gone.png"><img src="data:image/png;base64,AAAA">"#;
    mount_page(&server, "/", page.to_string(), 1).await;
    Mock::given(method("GET"))
        .and(path("/img/logo.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0x89, b'P', b'N', b'G']))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/img/gone.png"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = session(dir.path());
    let commands = vec![
        Command::SetUrl(Url::parse(&server.uri()).unwrap()),
        Command::DownloadImages,
    ];
    assert_eq!(session.run(&commands).await, 0);

    let saved = dir.path().join("media").join("logo.png");
    assert_eq!(std::fs::read(saved).unwrap(), vec![0x89, b'P', b'N', b'G']);
    assert!(!dir.path().join("media").join("gone.png").exists());
}

#[tokio::test]
async fn test_script_rebinds_target_between_sites() {
    let first = MockServer::start().await;
    let second = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    mount_page(&first, "/", "<title>First</title>".to_string(), 1).await;
    mount_page(&second, "/", links_page(&second.uri(), &["/x"]), 1).await;

    let script = format!(
        "// two sites\n-u {}\n--extract title --output json\n\n-u {}\n--extract a --output json\n",
        first.uri(),
        second.uri()
    );
    let commands = parse_script(&script).unwrap();

    let mut session = session(dir.path());
    assert_eq!(session.run(&commands).await, 0);

    let first_file = expected_path(dir.path(), &Url::parse(&first.uri()).unwrap(), "json");
    let second_file = expected_path(dir.path(), &Url::parse(&second.uri()).unwrap(), "json");
    assert!(first_file.exists());
    assert!(second_file.exists());

    // Results accumulate across targets
    let second_results: ResultSet =
        serde_json::from_slice(&std::fs::read(second_file).unwrap()).unwrap();
    assert_eq!(second_results.len(), 2);
}

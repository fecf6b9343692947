//! Scan module tests.

use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;
use crate::dns::{Resolution, ResolutionStatus, Resolver};
use crate::error_handling::ScanError;
use crate::fetch::RedirectTracer;

/// Resolver answering from a fixed table and remembering what was asked.
#[derive(Default)]
struct FakeResolver {
    answers: HashMap<String, Resolution>,
    queries: Mutex<Vec<String>>,
}

impl FakeResolver {
    fn with(mut self, host: &str, resolution: Resolution) -> Self {
        self.answers.insert(host.to_string(), resolution);
        self
    }

    fn queries(&self) -> Vec<String> {
        self.queries.lock().expect("queries lock").clone()
    }
}

#[async_trait]
impl Resolver for FakeResolver {
    async fn query(&self, host: &str) -> Resolution {
        self.queries
            .lock()
            .expect("queries lock")
            .push(host.to_string());
        self.answers
            .get(host)
            .cloned()
            .unwrap_or_else(|| Resolution::failed(ResolutionStatus::NameNotFound))
    }
}

fn localhost() -> Vec<IpAddr> {
    vec![IpAddr::V4(Ipv4Addr::LOCALHOST)]
}

fn create_test_scanner(resolver: FakeResolver) -> Scanner<FakeResolver> {
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(Duration::from_secs(3))
        .build()
        .expect("Failed to build test client");
    Scanner::new(
        resolver,
        RedirectTracer::new(client, Duration::from_secs(3), 20),
    )
}

/// `host:port` of a mock server (its URI without the scheme).
fn authority(server: &MockServer) -> String {
    server.uri().trim_start_matches("http://").to_string()
}

#[test]
fn test_canonical_url_bare_host() {
    let url = canonical_url("example.com", None).expect("valid target");
    assert_eq!(url.as_str(), "http://example.com/");
}

#[test]
fn test_canonical_url_keeps_path_and_query() {
    let url = canonical_url("example.com/path?q=1", None).expect("valid target");
    assert_eq!(url.as_str(), "http://example.com/path?q=1");
}

#[test]
fn test_canonical_url_scheme_inside_query() {
    let url = canonical_url("example.com/go?to=http://other.example/", None)
        .expect("valid target");
    assert_eq!(url.as_str(), "http://example.com/go?to=http://other.example/");
    assert_eq!(url.host_str(), Some("example.com"));
}

#[test]
fn test_canonical_url_with_prefix() {
    let url = canonical_url("example.com", Some("www")).expect("valid target");
    assert_eq!(url.as_str(), "http://www.example.com/");
}

#[test]
fn test_canonical_url_prefix_keeps_port_and_credentials() {
    let url = canonical_url("https://user:pw@example.com:8443/x", Some("www"))
        .expect("valid target");
    assert_eq!(url.as_str(), "https://user:pw@www.example.com:8443/x");
}

#[test]
fn test_canonical_url_host_and_port() {
    let url = canonical_url("example.com:8080", None).expect("valid target");
    assert_eq!(url.as_str(), "http://example.com:8080/");
    assert_eq!(url.host_str(), Some("example.com"));
}

#[test]
fn test_canonical_url_rejects_garbage() {
    assert!(canonical_url("exa mple.com", None).is_err());
}

#[tokio::test]
async fn test_process_target_success_with_alias() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .mount(&server)
        .await;

    let resolver = FakeResolver::default().with(
        "127.0.0.1",
        Resolution::ok(Some("web.example.net".to_string()), localhost()),
    );
    let scanner = create_test_scanner(resolver);

    let result = scanner
        .process_target(&authority(&server), None)
        .await
        .expect("no fatal error");

    assert!(result.is_ok());
    assert_eq!(result.target(), format!("{}/", server.uri()));
    assert_eq!(
        result.step_texts(),
        vec!["ALIAS web.example.net", "ADDRESS 127.0.0.1"]
    );
}

#[tokio::test]
async fn test_process_target_redirect_chain() {
    let server = MockServer::start().await;
    let new_location = format!("{}/new", server.uri());
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(301).insert_header("Location", new_location.as_str()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/new"))
        .respond_with(ResponseTemplate::new(200).set_body_string("welcome"))
        .mount(&server)
        .await;

    let scanner =
        create_test_scanner(FakeResolver::default().with("127.0.0.1", Resolution::ok(None, localhost())));
    let result = scanner
        .process_target(&authority(&server), None)
        .await
        .expect("no fatal error");

    assert!(result.is_ok());
    assert_eq!(
        result.step_texts(),
        vec![
            "ADDRESS 127.0.0.1".to_string(),
            format!("REDIRECT 301 {}", new_location),
        ]
    );
}

#[tokio::test]
async fn test_process_target_is_idempotent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(302))
        .mount(&server)
        .await;

    let scanner =
        create_test_scanner(FakeResolver::default().with("127.0.0.1", Resolution::ok(None, localhost())));
    let first = scanner
        .process_target(&authority(&server), None)
        .await
        .expect("no fatal error");
    let second = scanner
        .process_target(&authority(&server), None)
        .await
        .expect("no fatal error");

    assert_eq!(first, second);
    assert_eq!(
        first.step_texts(),
        vec!["ADDRESS 127.0.0.1", "INVALID REDIRECT 302 WITHOUT LOCATION"]
    );
}

#[tokio::test]
async fn test_process_target_dns_failures() {
    let cases = [
        (ResolutionStatus::NameNotFound, "RESOLVED NODATA example.com"),
        (ResolutionStatus::NoData, "RESOLVED NODATA example.com"),
        (
            ResolutionStatus::ServerFailure,
            "RESOLVER SERVER_FAILURE example.com",
        ),
        (ResolutionStatus::Timeout, "RESOLVER TIMEOUT example.com"),
    ];
    for (status, expected) in cases {
        let scanner = create_test_scanner(
            FakeResolver::default().with("example.com", Resolution::failed(status)),
        );
        let result = scanner
            .process_target("example.com", None)
            .await
            .expect("no fatal error");

        assert!(!result.is_ok());
        assert_eq!(result.target(), "http://example.com/");
        assert_eq!(result.step_texts(), vec![expected]);
    }
}

#[tokio::test]
async fn test_process_target_strips_port_for_dns() {
    let resolver = FakeResolver::default();
    let scanner = create_test_scanner(resolver);
    let result = scanner
        .process_target("missing.example:8080/x", None)
        .await
        .expect("no fatal error");

    assert_eq!(result.target(), "http://missing.example:8080/x");
    assert_eq!(result.step_texts(), vec!["RESOLVED NODATA missing.example"]);
}

#[tokio::test]
async fn test_prohibited_alias_is_requeried_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&server)
        .await;

    // The alias itself is an IP literal so the HTTP probe reaches the mock server
    let resolver = FakeResolver::default()
        .with("localhost", Resolution::prohibited_alias("127.0.0.1"))
        .with("127.0.0.1", Resolution::ok(None, localhost()));
    let scanner = create_test_scanner(resolver);
    let port = server.address().port();

    let result = scanner
        .process_target(&format!("127.0.0.1:{}", port), None)
        .await
        .expect("no fatal error");
    assert!(result.is_ok());

    let result = scanner
        .process_target(&format!("localhost:{}", port), None)
        .await
        .expect("no fatal error");
    assert_eq!(
        result.step_texts()[..2],
        ["ALIAS 127.0.0.1".to_string(), "ADDRESS 127.0.0.1".to_string()]
    );
    assert_eq!(
        scanner.resolver().queries(),
        vec!["127.0.0.1", "localhost", "127.0.0.1"]
    );
}

#[tokio::test]
async fn test_prohibited_alias_chain_is_not_followed() {
    let resolver = FakeResolver::default()
        .with("a.example", Resolution::prohibited_alias("b.example"))
        .with("b.example", Resolution::prohibited_alias("c.example"))
        .with("c.example", Resolution::ok(None, localhost()));
    let scanner = create_test_scanner(resolver);

    let result = scanner
        .process_target("a.example", None)
        .await
        .expect("no fatal error");

    assert!(!result.is_ok());
    assert_eq!(
        result.step_texts(),
        vec!["RESOLVER PROHIBITED_ALIAS a.example"]
    );
    assert_eq!(scanner.resolver().queries(), vec!["a.example", "b.example"]);
}

#[tokio::test]
async fn test_unsupported_resolver_status_is_fatal() {
    let resolver = FakeResolver::default().with(
        "example.com",
        Resolution::failed(ResolutionStatus::Other("refused".to_string())),
    );
    let scanner = create_test_scanner(resolver);

    let err = scanner
        .process_target("example.com", None)
        .await
        .expect_err("unsupported status must abort");
    assert!(matches!(
        err,
        ScanError::UnsupportedResolverStatus { ref host, ref detail }
            if host == "example.com" && detail == "refused"
    ));
}

#[tokio::test]
async fn test_invalid_target_skips_dns() {
    let scanner = create_test_scanner(FakeResolver::default());
    let result = scanner
        .process_target("exa mple.com", None)
        .await
        .expect("no fatal error");

    assert!(!result.is_ok());
    assert_eq!(result.target(), "exa mple.com");
    assert_eq!(result.steps().len(), 1);
    assert!(result.step_texts()[0].starts_with("INVALID TARGET "));
    assert!(scanner.resolver().queries().is_empty());
}

#[tokio::test]
async fn test_read_csv_targets_skips_header_and_uses_first_field() {
    let dir = tempfile::tempdir().expect("temp dir");
    let csv_path = dir.path().join("names.csv");
    std::fs::write(
        &csv_path,
        "Name;Owner\nexample.com;team a\n;nobody\nexample.org\n",
    )
    .expect("write csv");

    let targets = read_csv_targets(&csv_path).await.expect("valid csv");
    assert_eq!(targets, vec!["example.com", "example.org"]);
}

#[tokio::test]
async fn test_read_csv_targets_missing_file() {
    let err = read_csv_targets(std::path::Path::new("/nonexistent/names.csv"))
        .await
        .expect_err("missing file");
    assert!(matches!(err, ScanError::Source { .. }));
}

#[tokio::test]
async fn test_read_csv_targets_invalid_utf8() {
    let dir = tempfile::tempdir().expect("temp dir");
    let csv_path = dir.path().join("names.csv");
    std::fs::write(
        &csv_path,
        b"Name;Owner\nexample.com;M\xfcller\n\xff\xfe;x\nb.example;\xe9\n",
    )
    .expect("write csv");

    let targets = read_csv_targets(&csv_path)
        .await
        .expect("bytes outside the first field are ignored");
    assert_eq!(targets, vec!["example.com", "b.example"]);
}

#[test]
fn test_target_source_from_descriptor() {
    let file = tempfile::NamedTempFile::new().expect("temp file");
    let descriptor = file.path().to_string_lossy().to_string();
    assert_eq!(
        TargetSource::from_descriptor(&descriptor),
        TargetSource::CsvFile(file.path().to_path_buf())
    );
    assert_eq!(
        TargetSource::from_descriptor("example.com"),
        TargetSource::Target("example.com".to_string())
    );
}

#[tokio::test]
async fn test_run_batch_with_www_doubles_csv_rows() {
    let dir = tempfile::tempdir().expect("temp dir");
    let csv_path = dir.path().join("names.csv");
    std::fs::write(&csv_path, "Name\na.example\nb.example\n").expect("write csv");

    let scanner = create_test_scanner(FakeResolver::default());
    let descriptors = vec![
        "first.example".to_string(),
        csv_path.to_string_lossy().to_string(),
        "last.example".to_string(),
    ];
    let results = run_batch(&scanner, &descriptors, true, &CancellationToken::new())
        .await
        .expect("batch completes");

    let targets: Vec<&str> = results.iter().map(|r| r.target()).collect();
    assert_eq!(
        targets,
        vec![
            "http://first.example/",
            "http://a.example/",
            "http://www.a.example/",
            "http://b.example/",
            "http://www.b.example/",
            "http://last.example/",
        ]
    );
}

#[tokio::test]
async fn test_run_batch_cancelled() {
    let scanner = create_test_scanner(FakeResolver::default());
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = run_batch(&scanner, &["example.com".to_string()], false, &cancel)
        .await
        .expect_err("cancelled batch must not complete");
    assert!(matches!(err, ScanError::Interrupted));
}

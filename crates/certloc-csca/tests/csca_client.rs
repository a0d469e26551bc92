//! Integration tests for CscaClient.
//!
//! Uses wiremock for HTTP mocking. Tests cover environment routing, body
//! decoding, status mapping (404/500) and the absence of retries.

use certloc_csca::{
    fetch_trust_anchor_table, CscaClient, CscaConfig, CscaError, CscaResolver, Environment,
    FetchError, TrustAnchorTable, CSCA_USER_AGENT,
};
use serial_test::serial;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn create_test_client(mock_server: &MockServer) -> CscaClient {
    let config = CscaConfig::default()
        .with_api_url(mock_server.uri())
        .with_staging_api_url(format!("{}/staging", mock_server.uri()))
        .with_timeout_secs(5);
    CscaClient::new(config).expect("failed to create client")
}

fn fetch_error(result: Result<TrustAnchorTable, CscaError>) -> FetchError {
    match result {
        Err(CscaError::Fetch { source, .. }) => source,
        other => panic!("expected CscaError::Fetch, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_table_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ski-pem"))
        .and(header("user-agent", CSCA_USER_AGENT))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{"data": {"abcd": "MIIB..."}}"#),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server).await;
    let table = client
        .fetch_table(Environment::Production)
        .await
        .expect("fetch failed");

    let expected: TrustAnchorTable = [("abcd", "MIIB...")].into_iter().collect();
    assert_eq!(table, expected);
}

#[tokio::test]
async fn test_fetch_table_staging_uses_staging_url() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/staging/ski-pem"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"data": {"AB:CD": "MIIB-staging", "ef01": "MIIC"}}"#),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server).await;
    let table = client
        .fetch_table(Environment::Staging)
        .await
        .expect("fetch failed");

    assert_eq!(table.len(), 2);
    assert_eq!(table.get("abcd"), Some("MIIB-staging"));
}

#[tokio::test]
async fn test_fetch_table_missing_data_field() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ski-pem"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"entries": {}}"#))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server).await;
    let err = fetch_error(client.fetch_table(Environment::Production).await);
    assert!(matches!(err, FetchError::MalformedResponse { .. }));
}

#[tokio::test]
async fn test_fetch_table_invalid_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ski-pem"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server).await;
    let err = fetch_error(client.fetch_table(Environment::Production).await);
    assert!(matches!(err, FetchError::MalformedResponse { .. }));
}

#[tokio::test]
async fn test_fetch_table_http_error_carries_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ski-pem"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server).await;
    let result = client.fetch_table(Environment::Production).await;

    match result {
        Err(CscaError::Fetch { url, source }) => {
            assert_eq!(url, format!("{}/ski-pem", mock_server.uri()));
            assert_eq!(source, FetchError::Http { status: 404 });
        }
        other => panic!("expected Fetch error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_table_server_error_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ski-pem"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server).await;
    let err = fetch_error(client.fetch_table(Environment::Production).await);

    assert_eq!(err, FetchError::Http { status: 503 });
    assert!(err.is_transient());
}

#[tokio::test]
async fn test_fetch_table_transport_error() {
    // Nothing listens on the discard port of localhost.
    let config = CscaConfig::default()
        .with_api_url("http://127.0.0.1:9")
        .with_timeout_secs(2);
    let client = CscaClient::new(config).unwrap();

    let err = fetch_error(client.fetch_table(Environment::Production).await);
    assert!(matches!(err, FetchError::Transport { .. }));
}

#[tokio::test]
async fn test_fetched_table_feeds_resolver() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ski-pem"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{"data": {"a1b2": "MIIBprod"}}"#),
        )
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server).await;
    let production = client.fetch_table(Environment::Production).await.unwrap();
    let resolver = CscaResolver::new(TrustAnchorTable::new(), production);

    let pem = resolver.resolve("A1:B2", None).unwrap();
    assert_eq!(
        pem,
        "-----BEGIN CERTIFICATE-----\nMIIBprod\n-----END CERTIFICATE-----"
    );
}

#[tokio::test]
#[serial]
async fn test_fetch_trust_anchor_table_reads_env() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ski-pem"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"status": "ok", "data": {"CA:FE": "MIIBenv"}}"#),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    std::env::set_var("CERTLOC_API_URL", mock_server.uri());
    std::env::set_var("CERTLOC_TIMEOUT", "5");
    let result = fetch_trust_anchor_table(Environment::Production).await;
    std::env::remove_var("CERTLOC_API_URL");
    std::env::remove_var("CERTLOC_TIMEOUT");

    let table = result.expect("fetch failed");
    assert_eq!(table.get("cafe"), Some("MIIBenv"));
}

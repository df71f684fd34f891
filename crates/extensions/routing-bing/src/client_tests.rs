use super::*;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn descriptor(base: &str) -> RequestDescriptor {
    RequestDescriptor::get(format!(
        "{}/Routes?wayPoint.1=52.5%2c13.4&wayPoint.2=52.4%2c13.1&key=secret-key",
        base
    ))
}

#[test]
fn test_client_id() {
    let client = BingRoutingClient::new(DEFAULT_TIMEOUT).unwrap();
    assert_eq!(client.id(), "bing");
    assert_eq!(client.timeout(), Duration::from_secs(30));
}

#[tokio::test]
async fn test_call_returns_body() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Routes"))
        .and(query_param("wayPoint.1", "52.5,13.4"))
        .and(query_param("key", "secret-key"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"resourceSets":[]}"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = BingRoutingClient::new(DEFAULT_TIMEOUT).unwrap();
    let body = client.call(&descriptor(&mock_server.uri())).await.unwrap();
    assert_eq!(body, r#"{"resourceSets":[]}"#);
}

#[tokio::test]
async fn test_call_error_status() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Routes"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Access was denied"))
        .mount(&mock_server)
        .await;

    let client = BingRoutingClient::new(DEFAULT_TIMEOUT).unwrap();
    let err = client.call(&descriptor(&mock_server.uri())).await.unwrap_err();
    match err {
        RoutingError::ExternalCallFailure { status, message } => {
            assert_eq!(status, Some(401));
            assert!(message.contains("Access was denied"));
        }
        other => panic!("Expected ExternalCallFailure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_call_timeout() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&mock_server)
        .await;

    let client = BingRoutingClient::new(Duration::from_millis(200)).unwrap();
    let err = client.call(&descriptor(&mock_server.uri())).await.unwrap_err();
    assert!(matches!(err, RoutingError::Timeout(_)), "{:?}", err);
}

#[tokio::test]
async fn test_call_unreachable_host_hides_key() {
    // Nothing listens on port 9 of the loopback interface.
    let client = BingRoutingClient::new(Duration::from_secs(2)).unwrap();
    let err = client.call(&descriptor("http://127.0.0.1:9")).await.unwrap_err();

    assert!(err.is_external_call_failure() || matches!(err, RoutingError::Timeout(_)));
    assert!(!err.to_string().contains("secret-key"));
}

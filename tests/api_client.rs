use std::time::Duration;

use {
    geoflow::{
        config::ApiConfig,
        data::{ApiClient, ApiError, HttpTrackingSource, RequestOptions, TrackingError, TrackingSource},
        domain::TrackingHistoryResponse,
    },
    tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
        sync::oneshot,
    },
};

/// One-shot HTTP server: answers the first request with `response` and hands back
/// the raw request head. `None` accepts the connection and never answers.
async fn serve_once(response: Option<String>) -> (String, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut head = Vec::new();
        let mut buf = [0u8; 1024];
        while !head.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            head.extend_from_slice(&buf[..n]);
        }
        let _ = tx.send(String::from_utf8_lossy(&head).to_lowercase());

        match response {
            Some(response) => {
                socket.write_all(response.as_bytes()).await.unwrap();
                socket.shutdown().await.ok();
            }
            None => tokio::time::sleep(Duration::from_secs(30)).await,
        }
    });

    (base_url, rx)
}

fn http_response(status: &str, content_type: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {}\r\ncontent-type: {}\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
        status,
        content_type,
        body.len(),
        body
    )
}

fn client(base_url: &str) -> ApiClient {
    ApiClient::new(ApiConfig::new(base_url)).unwrap()
}

const HISTORY: &str = r#"{
    "data": [
        {"id": "a", "user_id": "user123", "latitude": -6.2, "longitude": 106.8,
         "accuracy": 5.0, "timestamp": "2025-01-01T08:00:00Z",
         "location": {"type": "Point", "coordinates": [106.8, -6.2]}},
        {"id": "b", "user_id": "user123", "latitude": -6.21, "longitude": 106.81,
         "timestamp": "2025-01-01T08:01:00Z"}
    ],
    "total": 2,
    "status": "success"
}"#;

#[tokio::test]
async fn history_is_fetched_from_the_versioned_endpoint() {
    let (base, request) = serve_once(Some(http_response("200 OK", "application/json", HISTORY))).await;
    let source = HttpTrackingSource::new(client(&base));

    let history = source.fetch_history("user123").await.unwrap();
    assert_eq!(history.point_count(), 2);
    assert_eq!(history.total, Some(2));

    let head = request.await.unwrap();
    assert!(head.starts_with("get /api/v1/tracking/history/user123 http/1.1"));
    assert!(head.contains("accept: application/json"));
    assert!(head.contains("content-type: application/json"));
}

#[tokio::test]
async fn caller_headers_override_the_fixed_ones() {
    let (base, request) = serve_once(Some(http_response("200 OK", "application/json", "{}"))).await;
    let options = RequestOptions::default().header("Accept", "application/geo+json");

    let _: TrackingHistoryResponse = client(&base).request("/x", options).await.unwrap();

    let head = request.await.unwrap();
    assert!(head.contains("accept: application/geo+json"));
    assert!(!head.contains("accept: application/json\r\n"));
}

#[tokio::test]
async fn error_body_message_becomes_the_error() {
    let body = r#"{"message": "user not registered", "status": 404, "code": "NOT_FOUND"}"#;
    let (base, _) = serve_once(Some(http_response("404 Not Found", "application/json", body))).await;

    let err = client(&base)
        .get_json::<TrackingHistoryResponse>("/api/v1/tracking/history/ghost")
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ApiError::RequestFailed {
            status: 404,
            message: "user not registered".into()
        }
    );
}

#[tokio::test]
async fn non_json_error_body_falls_back_to_the_status_code() {
    let (base, _) = serve_once(Some(http_response(
        "500 Internal Server Error",
        "text/html",
        "<h1>oops</h1>",
    )))
    .await;

    let err = client(&base)
        .get_json::<TrackingHistoryResponse>("/boom")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "HTTP 500");
}

#[tokio::test]
async fn malformed_success_body_is_a_decode_error() {
    let (base, _) = serve_once(Some(http_response("200 OK", "application/json", "not json"))).await;
    let err = client(&base)
        .get_json::<TrackingHistoryResponse>("/x")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn unreachable_host_is_a_connection_error() {
    // Grab a free port, then close it again.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let err = client(&base)
        .get_json::<TrackingHistoryResponse>("/x")
        .await
        .unwrap_err();
    assert_eq!(err, ApiError::Connection);
    assert_eq!(
        err.to_string(),
        "Connection to the server failed. Make sure the backend is running."
    );
}

#[tokio::test]
async fn silent_server_times_out() {
    let (base, _) = serve_once(None).await;
    let config = ApiConfig::new(base).with_timeout(Duration::from_millis(200));
    let client = ApiClient::new(config).unwrap();

    let err = client
        .get_json::<TrackingHistoryResponse>("/slow")
        .await
        .unwrap_err();
    assert_eq!(err, ApiError::Timeout(Duration::from_millis(200)));
    assert_eq!(err.to_string(), "Request timed out after 200ms");
}

#[tokio::test]
async fn validation_treats_fetch_errors_as_unknown_user() {
    let (base, _) = serve_once(Some(http_response("503 Service Unavailable", "text/plain", ""))).await;
    let source = HttpTrackingSource::new(client(&base));

    let result = source.validate_user("user123").await;
    assert!(!result.is_valid);
    assert_eq!(result.error, Some(TrackingError::UserNotFound));
}

#[tokio::test]
async fn validation_counts_history_records() {
    let (base, _) = serve_once(Some(http_response("200 OK", "application/json", HISTORY))).await;
    let source = HttpTrackingSource::new(client(&base));

    let result = source.validate_user("user123").await;
    assert!(result.is_valid);
    assert_eq!(result.point_count, Some(2));
}

//! Integration tests for the reqwest transport against a local server

mod common;

use std::net::SocketAddr;
use std::time::Duration;

use ::common::client::{HttpTransport, Transport, TransportError, FRAME_CONTENT_TYPE};
use axum::extract::Path;
use axum::http::{header::CONTENT_TYPE, HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::Router;
use bytes::Bytes;
use url::Url;

async fn spawn_server() -> SocketAddr {
    let app = Router::new()
        .route(
            "/set",
            post(|headers: HeaderMap, body: Bytes| async move {
                let content_type = headers
                    .get(CONTENT_TYPE)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                format!("{} {}", content_type, body.len())
            }),
        )
        .route(
            "/slow",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(3)).await;
                "late"
            }),
        )
        .route(
            "/get/:address",
            get(|Path(address): Path<String>| async move { address }),
        )
        .route(
            "/busy",
            post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "busy") }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn url(addr: SocketAddr, path: &str) -> Url {
    Url::parse(&format!("http://{}{}", addr, path)).unwrap()
}

#[tokio::test]
async fn test_post_sends_octet_stream_body() {
    common::init_tracing();
    let addr = spawn_server().await;
    let transport = HttpTransport::new().unwrap();

    let response = transport
        .post(
            &url(addr, "/set"),
            Bytes::from(vec![7u8; 120]),
            Duration::from_secs(1),
        )
        .await
        .unwrap();

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        Bytes::from(format!("{} 120", FRAME_CONTENT_TYPE))
    );
}

#[tokio::test]
async fn test_post_reports_status_without_judging_it() {
    let addr = spawn_server().await;
    let transport = HttpTransport::new().unwrap();

    let response = transport
        .post(&url(addr, "/busy"), Bytes::new(), Duration::from_secs(1))
        .await
        .unwrap();

    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.body, Bytes::from_static(b"busy"));
}

#[tokio::test]
async fn test_post_is_abandoned_after_timeout() {
    let addr = spawn_server().await;
    let transport = HttpTransport::new().unwrap();

    let err = transport
        .post(&url(addr, "/slow"), Bytes::new(), Duration::from_secs(1))
        .await
        .unwrap_err();

    match err {
        TransportError::Reqwest(e) => assert!(e.is_timeout()),
        other => panic!("expected timeout, got {:?}", other),
    }
}

#[tokio::test]
async fn test_get_returns_body() {
    let addr = spawn_server().await;
    let transport = HttpTransport::with_default_timeout(Some(Duration::from_secs(5))).unwrap();

    let response = transport.get(&url(addr, "/get/0xabc")).await.unwrap();

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, Bytes::from_static(b"0xabc"));
}

#[tokio::test]
async fn test_connection_refused_is_a_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let transport = HttpTransport::new().unwrap();
    let err = transport.get(&url(addr, "/get/0xabc")).await.unwrap_err();
    assert!(matches!(err, TransportError::Reqwest(_)));
}

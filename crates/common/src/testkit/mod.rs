/// In-process stand-ins for the storage fleet
///
/// [`RecordingTransport`] plugs into [`crate::client::Client`] in place of
/// the HTTP transport. It answers every request from a script keyed by
/// host and keeps a log of what was sent, so tests can assert on the exact
/// requests a client issues without touching the network.
///
/// # Example
///
/// ```rust,ignore
/// use common::client::Client;
/// use common::testkit::RecordingTransport;
///
/// #[tokio::test]
/// async fn test_write_hits_two_shards() {
///     let transport = RecordingTransport::new();
///     let client = Client::generate_with_transport(transport.clone());
///
///     client.write_value("name", &chrono::Utc::now(), "value").await.unwrap();
///
///     assert_eq!(transport.requests().len(), 2);
/// }
/// ```
mod transport;

pub use transport::{RecordedRequest, RecordingTransport};

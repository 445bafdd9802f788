//! Integration tests for replicated writes

mod common;

use std::time::Duration;

use ::common::client::{Client, ClientError, Response, WRITE_TIMEOUT};
use ::common::crypto::{signature_to_text, verify_signature, SecretKey, Signature};
use ::common::envelope::{Envelope, Frame, FRAME_HEADER_SIZE};
use ::common::shard::Shard;
use ::common::testkit::RecordingTransport;
use reqwest::{Method, StatusCode};

#[tokio::test]
async fn test_write_posts_frame_to_owner_and_successor() {
    let (client, transport) = common::setup_client();
    let public_key = SecretKey::from(common::SEED).public();
    let owner = Shard::of(&public_key);

    let receipt = client
        .write_value("temperature", &common::instant(), "21.5")
        .await
        .unwrap();
    assert!(receipt.fully_replicated());
    assert_eq!(receipt.primary.shard, owner);
    assert_eq!(receipt.replica.shard, owner.next());

    let requests = transport.requests();
    assert_eq!(requests.len(), 2);

    let mut urls: Vec<String> = requests.iter().map(|r| r.url.to_string()).collect();
    urls.sort();
    let mut expected = vec![
        format!("https://s{}.u00.io/set", owner.symbol()),
        format!("https://s{}.u00.io/set", owner.next().symbol()),
    ];
    expected.sort();
    assert_eq!(urls, expected);

    for request in &requests {
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.timeout, Some(Duration::from_secs(1)));

        let body = &request.body;
        assert_eq!(&body[..32], public_key.as_bytes());

        let signature = Signature::from_slice(&body[32..FRAME_HEADER_SIZE]).unwrap();
        assert!(verify_signature(
            &client.address(),
            &body[FRAME_HEADER_SIZE..],
            &signature_to_text(&signature),
        ));

        let envelope = Frame::from_bytes(body).unwrap().open().unwrap();
        assert_eq!(envelope.name(), "temperature");
        assert_eq!(envelope.value(), "21.5");
        assert_eq!(envelope.time_text(), "2024-03-07 09:05:03.250");
    }

    // both replicas carry the same frame
    assert_eq!(requests[0].body, requests[1].body);
    assert_eq!(WRITE_TIMEOUT, Duration::from_secs(1));
}

#[tokio::test]
async fn test_write_payload_matches_envelope_encoding() {
    let (client, transport) = common::setup_client();

    client
        .write_value("temperature", &common::instant(), "21.5")
        .await
        .unwrap();

    let expected = Envelope::new("temperature", &common::instant(), "21.5")
        .encode()
        .unwrap();
    let requests = transport.requests();
    assert_eq!(&requests[0].body[FRAME_HEADER_SIZE..], &expected[..]);
}

#[tokio::test]
async fn test_keyless_client_issues_no_requests() {
    common::init_tracing();
    let transport = RecordingTransport::new();
    let key = common::key_material();
    let client = Client::with_transport(&key[..63], transport.clone());

    assert_eq!(client.address(), "");
    assert!(client.public_key().is_none());

    let err = client
        .write_value("temperature", &common::instant(), "21.5")
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::KeyNotSet));

    let address = SecretKey::generate().public().address().to_string();
    let err = client.read_value(&address).await.unwrap_err();
    assert!(matches!(err, ClientError::PublicKeyNotSet));

    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn test_oversized_key_material_cannot_sign() {
    let transport = RecordingTransport::new();
    let mut key = common::key_material().to_vec();
    key.push(0);
    let client = Client::with_transport(&key, transport.clone());

    // the public half is still usable
    assert_eq!(
        client.address(),
        SecretKey::from(common::SEED).public().address().to_string()
    );

    let err = client
        .write_value("temperature", &common::instant(), "21.5")
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::KeyNotSet));
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn test_mismatched_key_material_cannot_sign() {
    let transport = RecordingTransport::new();
    let mut key = common::key_material();
    key[..32].copy_from_slice(&[0x22; 32]);
    let client = Client::with_transport(&key, transport.clone());

    let err = client
        .write_value("temperature", &common::instant(), "21.5")
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::KeyNotSet));
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn test_public_half_off_the_curve_still_names_the_client() {
    let transport = RecordingTransport::new();
    let mut key = common::key_material();
    // y = 258 has no matching x on edwards25519
    let mut tail = [0u8; 32];
    tail[..2].copy_from_slice(&[0x02, 0x01]);
    key[32..].copy_from_slice(&tail);
    let client = Client::with_transport(&key, transport.clone());

    assert_eq!(client.address(), format!("0x0201{}", "00".repeat(30)));
    assert!(client.public_key().is_none());

    let err = client
        .write_value("temperature", &common::instant(), "21.5")
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::KeyNotSet));
    assert!(transport.requests().is_empty());

    // reads only need the public half to be present
    let other = SecretKey::from([0x99; 32]).public();
    let err = client
        .read_value(&other.address().to_string())
        .await
        .unwrap_err();
    assert!(!matches!(err, ClientError::PublicKeyNotSet));

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::GET);
    assert_eq!(
        requests[0].url.as_str(),
        format!(
            "https://s{}.u00.io/get/{}",
            Shard::of(&other).symbol(),
            other.address()
        )
    );
}

#[tokio::test]
async fn test_one_failed_shard_does_not_fail_the_write() {
    let (client, transport) = common::setup_client();
    let owner = Shard::of(&client.public_key().unwrap());
    transport.fail(owner, "connection refused");

    let receipt = client
        .write_value("temperature", &common::instant(), "21.5")
        .await
        .unwrap();

    assert!(!receipt.fully_replicated());
    assert!(matches!(
        receipt.primary.result,
        Err(ClientError::Transport(_))
    ));
    assert_eq!(receipt.accepted_by(), vec![owner.next()]);
    // the sibling request was still issued
    assert_eq!(transport.requests().len(), 2);
}

#[tokio::test]
async fn test_non_ok_status_is_a_shard_failure() {
    let (client, transport) = common::setup_client();
    let replica = Shard::of(&client.public_key().unwrap()).next();
    transport.respond(
        replica,
        Response {
            status: StatusCode::SERVICE_UNAVAILABLE,
            body: "draining".into(),
        },
    );

    let receipt = client
        .write_value("temperature", &common::instant(), "21.5")
        .await
        .unwrap();

    match &receipt.replica.result {
        Err(ClientError::HttpStatus(status, body)) => {
            assert_eq!(*status, StatusCode::SERVICE_UNAVAILABLE);
            assert_eq!(body, "draining");
        }
        other => panic!("expected status error, got {:?}", other),
    }
    assert!(receipt.primary.is_ok());
}

#[tokio::test]
async fn test_both_shards_failing_is_an_error() {
    let (client, transport) = common::setup_client();
    let owner = Shard::of(&client.public_key().unwrap());
    transport.fail(owner, "timed out");
    transport.respond(
        owner.next(),
        Response {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: Default::default(),
        },
    );

    let err = client
        .write_value("temperature", &common::instant(), "21.5")
        .await
        .unwrap_err();

    match err {
        ClientError::WriteFailed { primary, replica } => {
            assert!(matches!(*primary, ClientError::Transport(_)));
            assert!(matches!(*replica, ClientError::HttpStatus(..)));
        }
        other => panic!("expected WriteFailed, got {:?}", other),
    }
    assert_eq!(transport.requests().len(), 2);
}

#[tokio::test]
async fn test_generated_clients_write_to_their_own_shards() {
    for _ in 0..8 {
        let transport = RecordingTransport::new();
        let client = Client::generate_with_transport(transport.clone());
        let owner = Shard::of(&client.public_key().unwrap());

        client
            .write_value("k", &common::instant(), "v")
            .await
            .unwrap();

        let hosts: Vec<String> = transport
            .requests()
            .iter()
            .map(|r| r.url.host_str().unwrap().to_string())
            .collect();
        assert!(hosts.contains(&owner.host()));
        assert!(hosts.contains(&owner.next().host()));
    }
}

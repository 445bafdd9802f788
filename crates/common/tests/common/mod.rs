//! Shared test utilities for client integration tests
#![allow(dead_code)]

use chrono::{DateTime, Utc};
use common::client::Client;
use common::crypto::SecretKey;
use common::testkit::RecordingTransport;

/// Fixed seed so shard placement is stable across runs
pub const SEED: [u8; 32] = [0x11; 32];

/// 64 bytes of seed || public key for [`SEED`]
pub fn key_material() -> [u8; 64] {
    SecretKey::from(SEED).to_bytes()
}

pub fn instant() -> DateTime<Utc> {
    "2024-03-07T09:05:03.250Z".parse().unwrap()
}

/// A client around [`SEED`] backed by a recording transport.
pub fn setup_client() -> (Client<RecordingTransport>, RecordingTransport) {
    init_tracing();
    let transport = RecordingTransport::new();
    let client = Client::with_transport(&key_material(), transport.clone());
    (client, transport)
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

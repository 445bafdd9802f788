use reqwest::StatusCode;

use super::transport::TransportError;
use crate::crypto::{Address, KeyError};
use crate::envelope::EnvelopeError;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("private key is not set or public key is empty")]
    KeyNotSet,
    #[error("public key is not set or invalid")]
    PublicKeyNotSet,
    #[error("invalid address: {0}")]
    InvalidAddress(#[from] KeyError),
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("HTTP status {0}: {1}")]
    HttpStatus(StatusCode, String),
    #[error("envelope error: {0}")]
    Envelope(#[from] EnvelopeError),
    #[error("stored frame is signed by {found}, expected {expected}")]
    AddressMismatch { expected: Address, found: Address },
    #[error("write failed on both shards: {primary}; {replica}")]
    WriteFailed {
        primary: Box<ClientError>,
        replica: Box<ClientError>,
    },
}

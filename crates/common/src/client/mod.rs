//! Client facade
//!
//! Ties the key pair, envelope codec and shard router together:
//!
//! - [`Client::write_value`] seals an envelope into a signed frame and
//!   posts it to the owning shard and its ring successor, independently
//!   and concurrently, each with a one second timeout.
//! - [`Client::read_value`] fetches a stored frame from the owning shard
//!   of an address, checks it was signed by that address and decodes it.
//!
//! Writes report per-shard outcomes in a [`WriteReceipt`]. The call only
//! errors when neither shard accepted the frame.

mod error;
mod transport;

use std::time::Duration;

use bytes::Bytes;
use chrono::{DateTime, TimeZone};
use reqwest::StatusCode;

use crate::crypto::{Address, PublicKey, SecretKey, PRIVATE_KEY_SIZE, PUBLIC_KEY_SIZE};
use crate::envelope::{Envelope, Frame};
use crate::shard::Shard;

pub use error::ClientError;
pub use transport::{HttpTransport, Response, Transport, TransportError, FRAME_CONTENT_TYPE};

/// Per-request timeout on shard writes
pub const WRITE_TIMEOUT: Duration = Duration::from_secs(1);

/// Outcome of posting a frame to one shard.
#[derive(Debug)]
pub struct ShardWrite {
    pub shard: Shard,
    pub result: Result<(), ClientError>,
}

impl ShardWrite {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Outcomes of a replicated write. At least one shard accepted the frame.
#[derive(Debug)]
pub struct WriteReceipt {
    pub primary: ShardWrite,
    pub replica: ShardWrite,
}

impl WriteReceipt {
    pub fn fully_replicated(&self) -> bool {
        self.primary.is_ok() && self.replica.is_ok()
    }

    pub fn accepted_by(&self) -> Vec<Shard> {
        [&self.primary, &self.replica]
            .into_iter()
            .filter(|write| write.is_ok())
            .map(|write| write.shard)
            .collect()
    }
}

/// Storage client holding an immutable key pair.
///
/// Private key material shorter than 64 bytes leaves the client keyless:
/// it still constructs, but writes fail with [`ClientError::KeyNotSet`]
/// and, without a public key, reads fail with
/// [`ClientError::PublicKeyNotSet`] before any request is made.
///
/// The public key is kept as raw bytes. It names the client's address
/// even when it is not a valid curve point.
#[derive(Debug)]
pub struct Client<T = HttpTransport> {
    secret_key: Option<SecretKey>,
    public_key: Option<[u8; PUBLIC_KEY_SIZE]>,
    transport: T,
}

impl Client<HttpTransport> {
    /// Client with a freshly generated key pair.
    pub fn new() -> Result<Self, ClientError> {
        Ok(Self::generate_with_transport(HttpTransport::new()?))
    }

    /// Client around caller-supplied private key material (seed || public).
    pub fn with_key(private_key: &[u8]) -> Result<Self, ClientError> {
        Ok(Self::with_transport(private_key, HttpTransport::new()?))
    }
}

impl<T: Transport> Client<T> {
    pub fn generate_with_transport(transport: T) -> Self {
        Self::from_secret_key(SecretKey::generate(), transport)
    }

    /// The public key is taken from bytes 32..64 whenever at least 64 bytes
    /// are supplied. Signing needs exactly 64 bytes whose tail matches the
    /// seed.
    pub fn with_transport(private_key: &[u8], transport: T) -> Self {
        let public_key = private_key
            .get(PUBLIC_KEY_SIZE..PRIVATE_KEY_SIZE)
            .and_then(|bytes| <[u8; PUBLIC_KEY_SIZE]>::try_from(bytes).ok());

        let secret_key = if private_key.len() == PRIVATE_KEY_SIZE {
            match SecretKey::from_bytes(private_key) {
                Ok(key) => Some(key),
                Err(e) => {
                    tracing::warn!("private key unusable for signing: {}", e);
                    None
                }
            }
        } else {
            None
        };

        Self {
            secret_key,
            public_key,
            transport,
        }
    }

    pub fn from_secret_key(secret_key: SecretKey, transport: T) -> Self {
        Self {
            public_key: Some(secret_key.public().to_bytes()),
            secret_key: Some(secret_key),
            transport,
        }
    }

    /// `0x`-prefixed hex of the public key, or empty if there is none.
    pub fn address(&self) -> String {
        self.public_key
            .map(|bytes| format!("0x{}", hex::encode(bytes)))
            .unwrap_or_default()
    }

    /// The public key as a verifying key, if it is a valid curve point.
    pub fn public_key(&self) -> Option<PublicKey> {
        self.public_key
            .and_then(|bytes| PublicKey::try_from(bytes.as_slice()).ok())
    }

    /// Sign `value` under `name` and replicate it to the owning shard and
    /// its successor.
    pub async fn write_value<Tz: TimeZone>(
        &self,
        name: &str,
        time: &DateTime<Tz>,
        value: &str,
    ) -> Result<WriteReceipt, ClientError> {
        let Some(secret_key) = &self.secret_key else {
            return Err(ClientError::KeyNotSet);
        };

        let envelope = Envelope::new(name, time, value);
        let frame = Frame::seal(secret_key, &envelope)?.to_bytes();

        let [primary, replica] = Shard::write_targets(&secret_key.public());
        let (primary_result, replica_result) = futures::join!(
            self.write_to_shard(primary, frame.clone()),
            self.write_to_shard(replica, frame),
        );

        match (primary_result, replica_result) {
            (Err(primary_err), Err(replica_err)) => Err(ClientError::WriteFailed {
                primary: Box::new(primary_err),
                replica: Box::new(replica_err),
            }),
            (primary_result, replica_result) => Ok(WriteReceipt {
                primary: ShardWrite {
                    shard: primary,
                    result: primary_result,
                },
                replica: ShardWrite {
                    shard: replica,
                    result: replica_result,
                },
            }),
        }
    }

    async fn write_to_shard(&self, shard: Shard, frame: Bytes) -> Result<(), ClientError> {
        let url = shard.set_url()?;
        let result = match self.transport.post(&url, frame, WRITE_TIMEOUT).await {
            Ok(response) if response.status == StatusCode::OK => Ok(()),
            Ok(response) => Err(status_error(response)),
            Err(e) => Err(e.into()),
        };
        match &result {
            Ok(()) => tracing::debug!(%shard, "write accepted"),
            Err(e) => tracing::warn!(%shard, "write failed: {}", e),
        }
        result
    }

    /// Fetch the value stored under `address` from its owning shard.
    ///
    /// Routing follows the requested address, not the client's own key, and
    /// the address is sent as lowercase hex whatever case it was given in.
    /// Only the owning shard is asked; there is no fallback to the replica.
    pub async fn read_value(&self, address: &str) -> Result<Envelope, ClientError> {
        if self.public_key.is_none() {
            return Err(ClientError::PublicKeyNotSet);
        }
        let address: Address = address.parse()?;
        let shard = Shard::of(address.public_key());
        let url = shard.get_url(&address)?;

        let response = self.transport.get(&url).await?;
        if response.status != StatusCode::OK {
            return Err(status_error(response));
        }
        tracing::debug!(%shard, response = %hex::encode(&response.body), "GET response");

        let frame = Frame::from_bytes(&response.body)?;
        if frame.public_key() != address.public_key() {
            return Err(ClientError::AddressMismatch {
                expected: address,
                found: frame.public_key().address(),
            });
        }
        Ok(frame.open()?)
    }
}

fn status_error(response: Response) -> ClientError {
    ClientError::HttpStatus(
        response.status,
        String::from_utf8_lossy(&response.body).into_owned(),
    )
}

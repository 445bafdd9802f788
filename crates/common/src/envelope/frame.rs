use bytes::{BufMut, Bytes, BytesMut};

use super::{Envelope, EnvelopeError};
use crate::crypto::{PublicKey, SecretKey, Signature, PUBLIC_KEY_SIZE, SIGNATURE_SIZE};

/// Bytes ahead of the archive payload: public key and signature
pub const FRAME_HEADER_SIZE: usize = PUBLIC_KEY_SIZE + SIGNATURE_SIZE;

/// The signed unit posted to a shard.
///
/// # Wire Format
///
/// ```text
/// [ public_key: 32 bytes ][ signature: 64 bytes ][ archive payload ]
/// ```
///
/// The signature covers the archive payload only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    public_key: PublicKey,
    signature: Signature,
    payload: Bytes,
}

impl Frame {
    /// Encode `envelope` and sign the resulting payload.
    pub fn seal(secret_key: &SecretKey, envelope: &Envelope) -> Result<Self, EnvelopeError> {
        let payload = Bytes::from(envelope.encode()?);
        Ok(Self {
            public_key: secret_key.public(),
            signature: secret_key.sign(&payload),
            payload,
        })
    }

    /// Split a frame into its parts without checking the signature.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EnvelopeError> {
        if bytes.len() < FRAME_HEADER_SIZE {
            return Err(EnvelopeError::FrameTooShort(bytes.len()));
        }
        let (public_key, rest) = bytes.split_at(PUBLIC_KEY_SIZE);
        let (signature, payload) = rest.split_at(SIGNATURE_SIZE);

        Ok(Self {
            public_key: PublicKey::try_from(public_key)?,
            signature: Signature::from_slice(signature).map_err(|_| EnvelopeError::BadSignature)?,
            payload: Bytes::copy_from_slice(payload),
        })
    }

    pub fn to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(FRAME_HEADER_SIZE + self.payload.len());
        buf.put_slice(self.public_key.as_bytes());
        buf.put_slice(&self.signature.to_bytes());
        buf.put_slice(&self.payload);
        buf.freeze()
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Check the signature against the embedded public key.
    pub fn verify(&self) -> Result<(), EnvelopeError> {
        self.public_key
            .verify(&self.payload, &self.signature)
            .map_err(|_| EnvelopeError::BadSignature)
    }

    /// Verify, then decode the payload.
    pub fn open(&self) -> Result<Envelope, EnvelopeError> {
        self.verify()?;
        Envelope::decode(&self.payload)
    }
}

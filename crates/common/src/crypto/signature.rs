use ed25519_dalek::{Signature, SIGNATURE_LENGTH};

use super::keys::{Address, SecretKey, PRIVATE_KEY_SIZE, PUBLIC_KEY_SIZE};

/// Length of a signature in text form: `0x` + 128 hex characters
pub const SIGNATURE_TEXT_LEN: usize = 2 + SIGNATURE_LENGTH * 2;

/// Raw key material as handed around by callers: 64 bytes of private key
/// (seed || public) and the 32-byte public key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPair {
    pub private_key: [u8; PRIVATE_KEY_SIZE],
    pub public_key: [u8; PUBLIC_KEY_SIZE],
}

impl From<&SecretKey> for KeyPair {
    fn from(secret_key: &SecretKey) -> Self {
        Self {
            private_key: secret_key.to_bytes(),
            public_key: secret_key.public().to_bytes(),
        }
    }
}

/// Generate a fresh Ed25519 key pair from the OS random source.
pub fn generate_key_pair() -> KeyPair {
    KeyPair::from(&SecretKey::generate())
}

/// Render a signature as `0x` + lowercase hex.
pub fn signature_to_text(signature: &Signature) -> String {
    format!("0x{}", hex::encode(signature.to_bytes()))
}

/// Sign `data` and return the signature in its `0x`-hex text form.
pub fn generate_signature(secret_key: &SecretKey, data: &[u8]) -> String {
    signature_to_text(&secret_key.sign(data))
}

/// Errors from parsing a signature out of its text form
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignatureError {
    #[error("invalid signature length, expected {}, got {0}", SIGNATURE_TEXT_LEN)]
    Length(usize),
    #[error("signature is missing the 0x prefix")]
    MissingPrefix,
    #[error("signature is not valid hex")]
    Hex,
}

/// Parse `0x` + 128 hex characters back into a signature.
pub fn parse_signature(text: &str) -> Result<Signature, SignatureError> {
    if text.len() != SIGNATURE_TEXT_LEN {
        return Err(SignatureError::Length(text.len()));
    }
    let signature_hex = text
        .strip_prefix("0x")
        .ok_or(SignatureError::MissingPrefix)?;
    let mut signature_bytes = [0u8; SIGNATURE_LENGTH];
    hex::decode_to_slice(signature_hex, &mut signature_bytes).map_err(|_| SignatureError::Hex)?;
    Ok(Signature::from_bytes(&signature_bytes))
}

/// Check `signature` over `data` against the key encoded in `address`.
///
/// Any malformed input (wrong lengths, missing `0x`, non-hex digits, an
/// address that is not a curve point) yields `false`.
pub fn verify_signature(address: &str, data: &[u8], signature: &str) -> bool {
    let Ok(signature) = parse_signature(signature) else {
        return false;
    };
    let Ok(address) = address.parse::<Address>() else {
        return false;
    };
    address.public_key().verify(data, &signature).is_ok()
}

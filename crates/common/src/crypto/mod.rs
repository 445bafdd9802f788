//! Key material and detached signatures
//!
//! Every write to the storage fleet is signed with an Ed25519 key. The
//! public half doubles as the writer's identity:
//!
//! - **Address**: `0x` followed by the 64 lowercase hex digits of the
//!   public key. Values are fetched by address.
//! - **Shard routing**: the leading nibble of the public key selects the
//!   shard that owns the writer's values.
//! - **Signatures**: detached 64-byte Ed25519 signatures, shown as `0x`
//!   followed by 128 hex digits when passed around as text.
//!
//! Private key material is 64 bytes, the 32-byte seed followed by the
//! public key. Clients hold it immutably and never persist it.

mod keys;
mod signature;

pub use ed25519_dalek::Signature;
pub use keys::{
    Address, KeyError, PublicKey, SecretKey, ADDRESS_LEN, PRIVATE_KEY_SIZE, PUBLIC_KEY_SIZE,
    SEED_SIZE,
};
pub use signature::{
    generate_key_pair, generate_signature, parse_signature, signature_to_text, verify_signature,
    KeyPair, SignatureError, SIGNATURE_TEXT_LEN,
};

/// Size of a detached Ed25519 signature in bytes
pub const SIGNATURE_SIZE: usize = ed25519_dalek::SIGNATURE_LENGTH;

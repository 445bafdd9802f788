use std::fmt;
use std::str::FromStr;

use ed25519_dalek::{Signer, SigningKey, VerifyingKey};

/// Size of the Ed25519 seed in bytes
pub const SEED_SIZE: usize = 32;
/// Size of Ed25519 private key material in bytes (seed || public key)
pub const PRIVATE_KEY_SIZE: usize = 64;
/// Size of Ed25519 public key in bytes
pub const PUBLIC_KEY_SIZE: usize = 32;
/// Length of an address in text form: `0x` + 64 hex characters
pub const ADDRESS_LEN: usize = 2 + PUBLIC_KEY_SIZE * 2;

/// Errors that can occur during key operations
#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    #[error("key error: {0}")]
    Default(#[from] anyhow::Error),
}

/// Public verification key, the identity a value is stored under.
///
/// The first byte of the key also decides which shard owns the
/// writer's values, see [`crate::shard::Shard::of`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublicKey(VerifyingKey);

impl TryFrom<&[u8]> for PublicKey {
    type Error = KeyError;
    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() != PUBLIC_KEY_SIZE {
            return Err(anyhow::anyhow!(
                "invalid public key size, expected {}, got {}",
                PUBLIC_KEY_SIZE,
                bytes.len()
            )
            .into());
        }
        let mut buff = [0; PUBLIC_KEY_SIZE];
        buff.copy_from_slice(bytes);
        let key = VerifyingKey::from_bytes(&buff)
            .map_err(|_| anyhow::anyhow!("public key is not a valid edwards point"))?;
        Ok(PublicKey(key))
    }
}

impl PublicKey {
    /// Parse a public key from a hexadecimal string
    ///
    /// Accepts both plain hex and "0x"-prefixed hex strings.
    pub fn from_hex(hex: &str) -> Result<Self, KeyError> {
        let hex = hex.strip_prefix("0x").unwrap_or(hex);
        let mut buff = [0; PUBLIC_KEY_SIZE];
        hex::decode_to_slice(hex, &mut buff)
            .map_err(|_| anyhow::anyhow!("public key hex decode error"))?;
        Self::try_from(&buff[..])
    }

    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_SIZE] {
        self.0.as_bytes()
    }

    /// Convert public key to raw bytes
    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_SIZE] {
        self.0.to_bytes()
    }

    /// Convert public key to hexadecimal string
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// The textual address this key is known by on the storage fleet
    pub fn address(&self) -> Address {
        Address(*self)
    }

    /// Verify an Ed25519 signature on a message.
    pub fn verify(
        &self,
        msg: &[u8],
        signature: &ed25519_dalek::Signature,
    ) -> Result<(), ed25519_dalek::SignatureError> {
        self.0.verify_strict(msg, signature)
    }
}

/// Private signing key material.
///
/// Serialized as 64 bytes: the 32-byte seed followed by the 32-byte
/// public key, which is the layout the storage fleet expects clients
/// to hand around.
///
/// # Examples
///
/// ```ignore
/// let secret_key = SecretKey::generate();
/// let bytes = secret_key.to_bytes();
/// assert_eq!(&bytes[32..], secret_key.public().as_bytes());
///
/// let recovered = SecretKey::from_bytes(&bytes)?;
/// ```
#[derive(Debug, Clone)]
pub struct SecretKey(SigningKey);

impl From<[u8; SEED_SIZE]> for SecretKey {
    fn from(seed: [u8; SEED_SIZE]) -> Self {
        Self(SigningKey::from_bytes(&seed))
    }
}

impl SecretKey {
    /// Generate a new random secret key using a cryptographically secure RNG
    pub fn generate() -> Self {
        let mut seed = [0u8; SEED_SIZE];
        getrandom::getrandom(&mut seed).expect("failed to generate random bytes");
        Self::from(seed)
    }

    /// Load 64 bytes of seed || public key material.
    ///
    /// Fails if the length is wrong or the trailing 32 bytes are not the
    /// public key of the leading seed.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        let bytes: &[u8; PRIVATE_KEY_SIZE] = bytes.try_into().map_err(|_| {
            anyhow::anyhow!(
                "invalid private key size, expected {}, got {}",
                PRIVATE_KEY_SIZE,
                bytes.len()
            )
        })?;
        let key = SigningKey::from_keypair_bytes(bytes)
            .map_err(|_| anyhow::anyhow!("private key does not match its public half"))?;
        Ok(Self(key))
    }

    /// Parse a secret key from a hexadecimal string of either the 32-byte
    /// seed or the full 64-byte key material.
    ///
    /// Accepts both plain hex and "0x"-prefixed hex strings.
    pub fn from_hex(hex: &str) -> Result<Self, KeyError> {
        let hex = hex.strip_prefix("0x").unwrap_or(hex);
        let bytes =
            hex::decode(hex).map_err(|_| anyhow::anyhow!("private key hex decode error"))?;
        if bytes.len() == SEED_SIZE {
            let mut seed = [0u8; SEED_SIZE];
            seed.copy_from_slice(&bytes);
            return Ok(Self::from(seed));
        }
        Self::from_bytes(&bytes)
    }

    /// Derive the public key from this secret key
    pub fn public(&self) -> PublicKey {
        PublicKey(self.0.verifying_key())
    }

    /// The 32-byte seed
    pub fn seed(&self) -> [u8; SEED_SIZE] {
        self.0.to_bytes()
    }

    /// Convert secret key to its 64-byte seed || public key form
    pub fn to_bytes(&self) -> [u8; PRIVATE_KEY_SIZE] {
        self.0.to_keypair_bytes()
    }

    /// Convert secret key to hexadecimal string (64 bytes)
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Encode the seed in PEM format for storage
    ///
    /// Returns a PEM-encoded string with tag "PRIVATE KEY".
    pub fn to_pem(&self) -> String {
        let pem = pem::Pem::new("PRIVATE KEY", self.seed());
        pem::encode(&pem)
    }

    /// Parse a secret key from PEM format
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The PEM string is malformed
    /// - The PEM tag is not "PRIVATE KEY"
    /// - The seed size is incorrect
    pub fn from_pem(pem_str: &str) -> Result<Self, KeyError> {
        let pem = pem::parse(pem_str).map_err(|e| anyhow::anyhow!("failed to parse PEM: {}", e))?;

        if pem.tag() != "PRIVATE KEY" {
            return Err(anyhow::anyhow!("invalid PEM tag, expected PRIVATE KEY").into());
        }

        let contents = pem.contents();
        if contents.len() != SEED_SIZE {
            return Err(anyhow::anyhow!(
                "invalid private key size in PEM, expected {}, got {}",
                SEED_SIZE,
                contents.len()
            )
            .into());
        }

        let mut seed = [0u8; SEED_SIZE];
        seed.copy_from_slice(contents);
        Ok(Self::from(seed))
    }

    /// Sign a message with this secret key using Ed25519.
    ///
    /// Returns a detached signature that can be verified with the corresponding public key.
    pub fn sign(&self, msg: &[u8]) -> ed25519_dalek::Signature {
        self.0.sign(msg)
    }
}

/// `0x`-prefixed lowercase hex rendering of a [`PublicKey`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Address(PublicKey);

impl Address {
    pub fn public_key(&self) -> &PublicKey {
        &self.0
    }
}

impl From<PublicKey> for Address {
    fn from(key: PublicKey) -> Self {
        Address(key)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.0.to_hex())
    }
}

impl FromStr for Address {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != ADDRESS_LEN {
            return Err(anyhow::anyhow!(
                "invalid address length, expected {}, got {}",
                ADDRESS_LEN,
                s.len()
            )
            .into());
        }
        let hex = s
            .strip_prefix("0x")
            .ok_or_else(|| anyhow::anyhow!("address must start with 0x"))?;
        Ok(Address(PublicKey::from_hex(hex)?))
    }
}

use clap::Args;

use common::crypto::{generate_key_pair, PublicKey};

/// Generate a key pair and print it without storing it anywhere
#[derive(Args, Debug, Clone)]
pub struct Keygen;

#[derive(Debug, thiserror::Error)]
pub enum KeygenError {
    #[error("keygen failed: {0}")]
    Key(#[from] common::crypto::KeyError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Keygen {
    type Error = KeygenError;
    type Output = String;

    async fn execute(&self, _ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let pair = generate_key_pair();
        let address = PublicKey::try_from(&pair.public_key[..])?.address();
        Ok(format!(
            "private key: 0x{}\naddress:     {}",
            hex::encode(pair.private_key),
            address
        ))
    }
}

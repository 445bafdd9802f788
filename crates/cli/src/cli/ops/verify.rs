use clap::Args;

use common::crypto::verify_signature;

/// Check a `0x`-hex signature over data against an address
#[derive(Args, Debug, Clone)]
pub struct Verify {
    pub address: String,
    /// Signed data, taken as UTF-8 bytes
    pub data: String,
    pub signature: String,
}

#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    #[error("signature does not verify")]
    Invalid,
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Verify {
    type Error = VerifyError;
    type Output = String;

    async fn execute(&self, _ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        if verify_signature(&self.address, self.data.as_bytes(), &self.signature) {
            Ok("valid".to_string())
        } else {
            Err(VerifyError::Invalid)
        }
    }
}

#[cfg(test)]
mod tests {
    use common::crypto::{generate_signature, SecretKey};

    use super::*;
    use crate::cli::op::{Op, OpContext};

    #[tokio::test]
    async fn test_verify_op() {
        let key = SecretKey::from([6u8; 32]);
        let op = Verify {
            address: key.public().address().to_string(),
            data: "hello".to_string(),
            signature: generate_signature(&key, b"hello"),
        };
        let ctx = OpContext::new(None);
        assert_eq!(op.execute(&ctx).await.unwrap(), "valid");

        let tampered = Verify {
            data: "hellO".to_string(),
            ..op
        };
        assert!(matches!(
            tampered.execute(&ctx).await,
            Err(VerifyError::Invalid)
        ));
    }
}

use clap::Args;

use common::crypto::generate_signature;

use crate::cli::op::ContextError;

/// Sign data with the configured key
#[derive(Args, Debug, Clone)]
pub struct Sign {
    /// Data to sign, taken as UTF-8 bytes
    pub data: String,
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Sign {
    type Error = ContextError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let key = ctx.state()?.load_key()?;
        Ok(generate_signature(&key, self.data.as_bytes()))
    }
}

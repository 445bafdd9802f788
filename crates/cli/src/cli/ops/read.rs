use clap::Args;

use common::client::ClientError;

use crate::cli::op::ContextError;

/// Fetch and verify the value stored under an address
#[derive(Args, Debug, Clone)]
pub struct Read {
    /// Address to read (defaults to the configured key)
    pub address: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error(transparent)]
    Context(#[from] ContextError),
    #[error("read failed: {0}")]
    Client(#[from] ClientError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Read {
    type Error = ReadError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let client = ctx.client()?;
        let address = self.address.clone().unwrap_or_else(|| client.address());

        let envelope = client.read_value(&address).await?;

        Ok(format!(
            "name:  {}\nvalue: {}\ntime:  {}",
            envelope.name(),
            envelope.value(),
            envelope.time_text()
        ))
    }
}

use chrono::{DateTime, FixedOffset, Local};
use clap::Args;

use common::client::{ClientError, ShardWrite};

use crate::cli::op::ContextError;

/// Sign a value and write it to its owning shard and the next one
#[derive(Args, Debug, Clone)]
pub struct Write {
    pub name: String,
    pub value: String,

    /// Timestamp to store (RFC 3339); defaults to now
    #[arg(long)]
    pub time: Option<DateTime<FixedOffset>>,
}

#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error(transparent)]
    Context(#[from] ContextError),
    #[error("write failed: {0}")]
    Client(#[from] ClientError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Write {
    type Error = WriteError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let client = ctx.client()?;
        let time = self
            .time
            .unwrap_or_else(|| Local::now().fixed_offset());

        let receipt = client.write_value(&self.name, &time, &self.value).await?;

        Ok(format!(
            "{}\n{}",
            describe(&receipt.primary),
            describe(&receipt.replica)
        ))
    }
}

fn describe(write: &ShardWrite) -> String {
    match &write.result {
        Ok(()) => format!("{}: ok", write.shard.host()),
        Err(e) => format!("{}: failed ({})", write.shard.host(), e),
    }
}

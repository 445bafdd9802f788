use clap::Args;

use common::crypto::{Address, KeyError};
use common::shard::Shard as ShardDomain;

use crate::cli::op::ContextError;

/// Show which shards an address is written to and read from
#[derive(Args, Debug, Clone)]
pub struct Shard {
    /// Address to route (defaults to the configured key)
    pub address: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ShardError {
    #[error(transparent)]
    Context(#[from] ContextError),
    #[error("invalid address: {0}")]
    Address(#[from] KeyError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Shard {
    type Error = ShardError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let address: Address = match &self.address {
            Some(address) => address.parse()?,
            None => ctx.client()?.address().parse()?,
        };
        let [owner, replica] = ShardDomain::write_targets(address.public_key());

        Ok(format!(
            "address: {}\nowner:   {} (reads, writes)\nreplica: {} (writes)",
            address,
            owner.host(),
            replica.host()
        ))
    }
}

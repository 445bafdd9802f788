use clap::Args;

use crate::cli::op::ContextError;

/// Print the address of the configured key
#[derive(Args, Debug, Clone)]
pub struct Address;

#[async_trait::async_trait]
impl crate::cli::op::Op for Address {
    type Error = ContextError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        Ok(ctx.client()?.address())
    }
}

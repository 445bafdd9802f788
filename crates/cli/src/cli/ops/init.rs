use clap::Args;

use common::crypto::{KeyError, SecretKey};

use crate::state::{AppConfig, AppState};

#[derive(Args, Debug, Clone)]
pub struct Init {
    /// Import existing key material as hex (32-byte seed or 64-byte seed || public key)
    #[arg(long)]
    pub key: Option<String>,

    /// Read timeout in seconds to store in config.toml
    #[arg(long)]
    pub read_timeout_secs: Option<u64>,
}

#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("init failed: {0}")]
    StateFailed(#[from] crate::state::StateError),
    #[error("invalid key: {0}")]
    Key(#[from] KeyError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Init {
    type Error = InitError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let key = self.key.as_deref().map(SecretKey::from_hex).transpose()?;
        let config = AppConfig {
            read_timeout_secs: self.read_timeout_secs,
            ..AppConfig::default()
        };

        let state = AppState::init(ctx.config_path.clone(), key, Some(config))?;
        let address = state.load_key()?.public().address();

        Ok(format!(
            "Initialized u00 directory at: {}\n\
             - Key: {}\n\
             - Config: {}\n\
             - Address: {}",
            state.u00_dir.display(),
            state.key_path.display(),
            state.config_path.display(),
            address,
        ))
    }
}

pub use clap::Parser;

use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "u00")]
#[command(about = "Signed, shard-replicated key-value storage client")]
pub struct Args {
    /// Path to the u00 config directory (defaults to ~/.u00)
    #[arg(long, global = true)]
    pub config_path: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace); overrides config.toml
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: crate::Command,
}

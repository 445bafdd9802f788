// CLI modules
mod cli;
mod state;

use clap::{Parser, Subcommand};
use cli::{args::Args, op::Op, Address, Init, Keygen, Read, Shard, Sign, Verify, Version, Write};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

command_enum! {
    (Address, Address),
    (Init, Init),
    (Keygen, Keygen),
    (Read, Read),
    (Shard, Shard),
    (Sign, Sign),
    (Verify, Verify),
    (Version, Version),
    (Write, Write),
}

/// Log level: explicit flag > config.toml > info. `RUST_LOG` still refines it.
fn init_tracing(explicit: Option<&str>, ctx: &cli::op::OpContext) {
    let configured = ctx.state().ok().map(|state| state.config.log_level);
    let log_level: tracing::Level = explicit
        .map(str::to_string)
        .or(configured)
        .and_then(|level| level.parse().ok())
        .unwrap_or(tracing::Level::INFO);

    let env_filter = EnvFilter::builder()
        .with_default_directive(log_level.into())
        .from_env_lossy();

    // stdout carries op output, so logs go to stderr
    let stderr_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(std::io::stderr)
        .with_filter(env_filter);

    tracing_subscriber::registry().with(stderr_layer).init();
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    let ctx = cli::op::OpContext::new(args.config_path);

    init_tracing(args.log_level.as_deref(), &ctx);

    match args.command.execute(&ctx).await {
        Ok(output) => {
            println!("{}", output);
            std::process::exit(0);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

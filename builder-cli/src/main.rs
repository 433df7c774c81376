//! Model builder import tool
//!
//! Reads a JSON document, reconciles it against a structured type from a
//! catalog or remote registry, and prints the resulting node tree.
//!
//! Usage:
//!   builder-import --type cdm.base.staticdata.party.Party --catalog types.json party.json

use anyhow::Result;
use builder_cli::{Args, read_input, render, run};
use clap::Parser;
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let document = read_input(args.input.as_deref())?;
    let root = run(&args, &document).await?;
    println!("{}", render(&root, args.compact)?);
    Ok(())
}

/// Logs go to stderr so stdout carries only the tree.
fn init_logging(verbose: bool) {
    if std::env::var_os("RUST_LOG").is_some() {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
        return;
    }

    let log_level = if verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

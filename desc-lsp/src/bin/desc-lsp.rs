use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use desc_analysis::schema;
use desc_config::Loader;
use desc_lsp::server::ServerSettings;
use desc_lsp::DescLanguageServer;
use tokio::io::{stdin, stdout};
use tower_lsp::{LspService, Server};
use tracing_subscriber::EnvFilter;

/// Language server for DESC world files, speaking LSP over stdio.
#[derive(Debug, Parser)]
#[command(name = "desc-lsp", version, about)]
struct Args {
    /// TOML file layered over the built-in defaults and ./desc.toml
    #[arg(long, short = 'c', value_name = "FILE")]
    config: Option<PathBuf>,

    /// Do not read desc.toml from the working directory
    #[arg(long)]
    no_project_config: bool,

    /// Log filter used when RUST_LOG is unset (overrides server.log_level)
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut loader = Loader::new();
    if !args.no_project_config {
        let cwd = std::env::current_dir().context("failed to read working directory")?;
        loader = loader.with_project_file(cwd);
    }
    if let Some(path) = &args.config {
        loader = loader.with_file(path);
    }
    if let Some(level) = &args.log_level {
        loader = loader.set_override("server.log_level", level.as_str())?;
    }
    let config = loader.build().context("failed to load configuration")?;

    // stdout carries the protocol, so logs must go to stderr.
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.server.log_level))
        .context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    if let Err(err) = schema().validate() {
        tracing::warn!(%err, "schema is inconsistent; value completion may fall back to literals");
    }

    let settings = ServerSettings::from(&config);
    tracing::info!(?settings, "starting desc-lsp");

    let (service, socket) =
        LspService::new(move |client| DescLanguageServer::with_settings(client, settings));
    Server::new(stdin(), stdout(), socket).serve(service).await;
    Ok(())
}

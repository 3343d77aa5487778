// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use the_atelier::config::{load_and_validate_config, validate_config, Config, RuntimeBuilder};
use the_atelier::errors::ConfigError;
use the_atelier::memory::MemoryStore;
use the_atelier::observability::init_tracing;
use the_atelier::server::{serve, AppState};

#[derive(Debug, Parser)]
#[command(name = "atelier", version, about = "Prompt to image to 3D model pipeline")]
struct Cli {
    /// YAML configuration file; built-in defaults when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the web form and pipeline endpoint
    Serve {
        /// Listen address, overriding `server.bind`
        #[arg(long)]
        bind: Option<String>,
    },
    /// Run the pipeline once and print the result document
    Run { prompt: String },
    /// Print the most recent memory records
    Memories {
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
}

fn load(path: Option<&PathBuf>) -> anyhow::Result<Config> {
    match path {
        Some(path) => load_and_validate_config(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => {
            let config = Config::default();
            validate_config(&config).map_err(ConfigError::Invalid)?;
            Ok(config)
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = load(cli.config.as_ref())?;

    match cli.command {
        Command::Serve { bind } => {
            let executor = RuntimeBuilder::from_config(&config)
                .await
                .context("Failed to initialize pipeline")?;
            let state = AppState::new(executor);
            let bind = bind.unwrap_or_else(|| config.server.bind.clone());

            serve(&bind, state.clone())
                .await
                .with_context(|| format!("Server on {} failed", bind))?;
            state.executor.lock().await.registry_mut().shutdown().await;
        }
        Command::Run { prompt } => {
            let mut executor = RuntimeBuilder::from_config(&config)
                .await
                .context("Failed to initialize pipeline")?;
            let result = executor.execute(&prompt).await;
            executor.registry_mut().shutdown().await;

            println!("{}", result.to_pretty_json());
            if !result.is_success() {
                std::process::exit(1);
            }
        }
        Command::Memories { limit } => {
            let store = MemoryStore::open(&config.pipeline.database)?;
            let records = store.recent(limit).await?;
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
    }

    Ok(())
}

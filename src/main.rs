// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Tagkeeper CLI - reconcile tags on data catalog entries from the command line.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tagkeeper::constants::{ENV_AUTH_TOKEN, ENV_ENDPOINT};
use tagkeeper::facade::CatalogFacade;
use tagkeeper::model::Tag;
use tagkeeper::rest::RestCatalogClient;
use tracing::{debug, info};
use url::Url;

/// Reconcile structured tags on remote data catalog entries.
#[derive(Parser, Debug)]
#[command(name = "tagkeeper", version, about)]
struct Cli {
    /// Catalog endpoint, e.g. https://catalog.example.com
    #[arg(long, env = ENV_ENDPOINT)]
    endpoint: Url,

    /// Bearer token for catalog authentication
    #[arg(long, env = ENV_AUTH_TOKEN, hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create or update a tag on an entry (one create or one update, never both)
    Upsert {
        /// Entry name, e.g. projects/acme/locations/us/entries/orders
        #[arg(long)]
        entry: String,

        /// Path to a JSON file describing the desired tag
        #[arg(long)]
        tag_file: PathBuf,
    },

    /// Delete the entry's tag matching the reference tag's template, if any
    Delete {
        /// Entry name
        #[arg(long)]
        entry: String,

        /// Path to a JSON file whose template identifies the tag to delete
        #[arg(long)]
        tag_file: PathBuf,
    },

    /// Fetch an entry by name
    GetEntry {
        /// Entry name
        name: String,
    },

    /// Fetch a tag template by identifier
    GetTemplate {
        /// Template identifier
        name: String,
    },

    /// Resolve an entry from the external resource it describes
    Lookup {
        /// Linked resource descriptor, e.g. //warehouse.example.com/datasets/orders
        linked_resource: String,
    },
}

fn main() -> Result<()> {
    // Build Tokio runtime with custom thread names
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(4)
        .thread_name("tagkeeper")
        .enable_all()
        .build()?;

    runtime.block_on(async_main())
}

async fn async_main() -> Result<()> {
    // Initialize logging with custom format
    //
    // Respects RUST_LOG environment variable if set, otherwise defaults to INFO level
    // Example: RUST_LOG=debug tagkeeper ...
    //
    // Respects RUST_LOG_FORMAT environment variable for output format
    // Example: RUST_LOG_FORMAT=json tagkeeper ...
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let log_format = std::env::var("RUST_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    match log_format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_file(true)
                .with_line_number(true)
                .with_target(false)
                .json()
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_file(true)
                .with_line_number(true)
                .with_target(false)
                .with_ansi(true)
                .compact()
                .init();
        }
    }

    let cli = Cli::parse();

    debug!("Connecting to catalog at {}", cli.endpoint);
    let client = RestCatalogClient::new(cli.endpoint.clone(), cli.token.clone())?;
    let facade = CatalogFacade::new(client);

    match cli.command {
        Command::Upsert { entry, tag_file } => {
            let desired = read_tag_file(&tag_file)?;
            info!(
                "Upserting tag (template {}) on entry {}",
                desired.template, entry
            );
            let tag = facade.upsert_tag(&entry, &desired).await?;
            print_json(&tag)?;
        }
        Command::Delete { entry, tag_file } => {
            let reference = read_tag_file(&tag_file)?;
            info!(
                "Deleting tag (template {}) from entry {}",
                reference.template, entry
            );
            facade.delete_tag(&entry, &reference).await?;
        }
        Command::GetEntry { name } => {
            let entry = facade.get_entry(&name).await?;
            print_json(&entry)?;
        }
        Command::GetTemplate { name } => {
            let template = facade.get_tag_template(&name).await?;
            print_json(&template)?;
        }
        Command::Lookup { linked_resource } => {
            let entry = facade.lookup_entry(&linked_resource).await?;
            print_json(&entry)?;
        }
    }

    Ok(())
}

/// Read and validate a desired-tag JSON file.
fn read_tag_file(path: &PathBuf) -> Result<Tag> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read tag file {}", path.display()))?;
    let tag: Tag = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse tag file {}", path.display()))?;

    if tag.template.is_empty() {
        anyhow::bail!("Tag file {} has an empty template field", path.display());
    }

    Ok(tag)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

//! Command line front end over the watchlist bindings.

use std::convert::Infallible;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::Value;

use crate::config::{Config, ConfigError};
use crate::notify::{Notification, NotificationSink, Severity};
use crate::storage::FileStorage;
use crate::watchlist::{ItemDraft, ItemId, WatchlistStore};

/// Exit code for `contains` when the id is not saved.
pub const EXIT_NOT_FOUND: u8 = 1;
/// Exit code for configuration, storage and usage errors.
pub const EXIT_ERROR: u8 = 2;

#[derive(Debug, Parser)]
#[command(name = "pawhaven")]
#[command(version, about = "Manage saved pets and products")]
#[command(after_help = "Environment:\n  RUST_LOG   Log filter override (logs go to stderr)")]
pub struct Cli {
    /// Config file (default: <config dir>/pawhaven/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Storage directory, overriding the config file
    #[arg(long, global = true)]
    pub storage_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Save an item
    Add {
        /// Item id; integers are stored as numbers
        #[arg(value_parser = parse_id)]
        id: ItemId,
        #[arg(long)]
        name: Option<String>,
        /// Extra descriptive field, repeatable (value parsed as JSON when possible)
        #[arg(long = "field", value_name = "KEY=VALUE", value_parser = parse_field)]
        fields: Vec<(String, Value)>,
    },
    /// Save an item given as a JSON object with an "id" field
    AddJson { json: String },
    /// Remove an item (succeeds when absent)
    Remove {
        #[arg(value_parser = parse_id)]
        id: ItemId,
    },
    /// Remove the item when saved, save it otherwise
    Toggle {
        #[arg(value_parser = parse_id)]
        id: ItemId,
        #[arg(long)]
        name: Option<String>,
    },
    /// Remove every saved item
    Clear,
    /// Print saved items in insertion order
    List {
        #[arg(long)]
        json: bool,
    },
    /// Print the number of saved items
    Count,
    /// Exit with 0 when the id is saved, 1 otherwise
    Contains {
        #[arg(value_parser = parse_id)]
        id: ItemId,
    },
}

impl Cli {
    pub fn load_config(&self) -> Result<Config, ConfigError> {
        match &self.config {
            Some(path) => Config::load_from(path),
            None => Config::load(),
        }
    }
}

/// Prints notifications to stdout.
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl NotificationSink for ConsoleSink {
    fn notify(&self, notification: &Notification) {
        let marker = match notification.severity {
            Severity::Success => '✓',
            Severity::Error => '✗',
        };
        println!("{} {}", marker, notification.message);
    }
}

pub fn run(cli: Cli, config: &Config) -> anyhow::Result<ExitCode> {
    let root = cli
        .storage_dir
        .clone()
        .unwrap_or_else(|| config.storage.resolved_dir());
    let storage = FileStorage::new(&root)
        .with_context(|| format!("failed to open storage at '{}'", root.display()))?;
    let store = WatchlistStore::open(
        Arc::new(storage),
        Arc::new(ConsoleSink),
        config.storage.key.clone(),
    );

    match cli.command {
        Command::Add { id, name, fields } => {
            let mut draft = ItemDraft::new(id);
            if let Some(name) = name {
                draft = draft.with_field("name", name);
            }
            for (key, value) in fields {
                draft = draft.with_field(key, value);
            }
            store.add_to_watchlist(draft);
        }
        Command::AddJson { json } => {
            let value: Value = serde_json::from_str(&json).context("invalid JSON item")?;
            store.add_json(value)?;
        }
        Command::Remove { id } => store.remove_from_watchlist(&id),
        Command::Toggle { id, name } => {
            let mut draft = ItemDraft::new(id);
            if let Some(name) = name {
                draft = draft.with_field("name", name);
            }
            store.toggle_watchlist(draft);
        }
        Command::Clear => store.clear_watchlist(),
        Command::List { json } => print_list(&store, json)?,
        Command::Count => println!("{}", store.get_watchlist_count()),
        Command::Contains { id } => {
            if !store.is_in_watchlist(&id) {
                return Ok(ExitCode::from(EXIT_NOT_FOUND));
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn print_list(store: &WatchlistStore, json: bool) -> anyhow::Result<()> {
    let items = store.watchlist();
    let mut out = io::stdout().lock();

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&items)?)?;
        return Ok(());
    }

    for item in &items {
        let added = item
            .added_at()
            .map(|ts| ts.to_rfc3339_opts(chrono::SecondsFormat::Millis, true))
            .unwrap_or_else(|| "-".to_string());
        writeln!(out, "{}\t{}\t{}", item.id(), item.label(), added)?;
    }
    Ok(())
}

/// Integers become numeric ids, anything else a text id.
fn parse_id(raw: &str) -> Result<ItemId, Infallible> {
    raw.parse()
}

/// Parse `KEY=VALUE`. The value is JSON when it parses, a string otherwise.
fn parse_field(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", raw))?;
    if key.is_empty() {
        return Err(format!("empty field name in '{}'", raw));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

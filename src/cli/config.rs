use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::field::config::GarlicOptions;

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "garlic",
    version,
    about = "Persist form field drafts under stable, structure-derived keys"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Directory holding the per-origin store files
    #[arg(long, global = true)]
    pub store_dir: Option<String>,

    /// Append lifecycle trace events (JSON lines) to this file
    #[arg(long, global = true)]
    pub trace: Option<String>,

    /// Path to config file (default: garlic.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the storage key of every eligible field in a document
    Keys {
        /// Document snapshot: JSON file path or http(s) URL
        #[arg(long)]
        document: String,

        /// Resolve only the node matching this selector (must match exactly one)
        #[arg(long)]
        selector: Option<String>,
    },

    /// Replay a YAML script of interactions against a document
    Replay {
        /// Document snapshot: JSON file path or http(s) URL
        #[arg(long)]
        document: String,

        /// Path to the replay script YAML file
        #[arg(long)]
        script: String,
    },

    /// Inspect or edit an origin's persisted entries
    Store {
        /// Origin whose store to open (e.g. example.com)
        #[arg(long)]
        origin: Option<String>,

        #[command(subcommand)]
        action: StoreAction,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum StoreAction {
    /// List every entry
    List,
    /// Print one entry
    Get { key: String },
    /// Write one entry (empty values are ignored)
    Set { key: String, value: String },
    /// Delete one entry
    Delete { key: String },
    /// Delete every entry under the garlic namespace
    Clean,
    /// Delete every entry
    Clear,
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `garlic.yaml`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub trace: TraceConfig,
    /// Call-site options applied to every bind
    #[serde(default)]
    pub options: GarlicOptions,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_dir")]
    pub dir: String,

    /// Origin used by `store` when --origin is not given
    pub origin: Option<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            dir: default_store_dir(),
            origin: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TraceConfig {
    pub path: Option<String>,
}

// Serde default helpers
fn default_store_dir() -> String { ".garlic".to_string() }

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or("garlic.yaml");
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_default(),
        Err(_) => AppConfig::default(),
    }
}

// ============================================================================
// Resolution (CLI flag > config file > default)
// ============================================================================

pub fn resolve_store_dir<'a>(cli: &'a Cli, config: &'a AppConfig) -> &'a str {
    cli.store_dir.as_deref().unwrap_or(&config.store.dir)
}

pub fn resolve_trace_path<'a>(cli: &'a Cli, config: &'a AppConfig) -> Option<&'a str> {
    cli.trace.as_deref().or(config.trace.path.as_deref())
}

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::store::storage::DEFAULT_STORAGE_KEY;

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "form-learner",
    version,
    about = "Learn form field values and auto-fill them on later visits"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: form-learner.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Directory holding the persisted knowledge base
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    /// JSONL file receiving status events
    #[arg(long, global = true)]
    pub status_log: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Learn a value for a single field
    Learn {
        /// Value the user committed
        #[arg(long)]
        value: String,

        #[command(flatten)]
        field: FieldArgs,

        /// Element tag (input, select, textarea)
        #[arg(long, default_value = "input")]
        tag: String,
    },

    /// Record a form submission
    Submit {
        /// Tag of the submitted element
        #[arg(long, default_value = "form")]
        tag: String,
    },

    /// Print the learned value for a field
    Suggest {
        #[command(flatten)]
        field: FieldArgs,

        /// Element tag (input, select, textarea)
        #[arg(long, default_value = "input")]
        tag: String,
    },

    /// Auto-fill one form of a page snapshot
    Fill {
        /// Page snapshot (JSON)
        #[arg(long)]
        page: String,

        /// Id of the form to fill
        #[arg(long)]
        form: String,

        /// Where to write the filled page (default: stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Install the tracker on a page and replay host events against it
    Replay {
        /// Page snapshot (JSON)
        #[arg(long)]
        page: String,

        /// Event list (JSON array)
        #[arg(long)]
        events: String,

        /// Where to write the final page (default: not written)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Show learned fields and counters
    Status,
}

/// Static attributes identifying a field.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct FieldArgs {
    #[arg(long, default_value = "")]
    pub id: String,

    #[arg(long, default_value = "")]
    pub name: String,

    #[arg(long, default_value = "")]
    pub placeholder: String,

    /// Field type attribute (text, email, password, ...)
    #[arg(long = "type", default_value = "")]
    pub field_type: String,
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `form-learner.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub status: StatusConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub dir: String,

    #[serde(default = "default_storage_key")]
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: default_data_dir(),
            key: default_storage_key(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusConfig {
    /// `null` disables the status log.
    #[serde(default = "default_status_log")]
    pub log_path: Option<String>,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            log_path: default_status_log(),
        }
    }
}

// Serde default helpers
fn default_data_dir() -> String { ".form-learner".to_string() }
fn default_storage_key() -> String { DEFAULT_STORAGE_KEY.to_string() }
fn default_status_log() -> Option<String> { Some("form_status.jsonl".to_string()) }

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or("form-learner.yaml");
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_default(),
        Err(_) => AppConfig::default(),
    }
}

// ============================================================================
// Settings Resolution (CLI > config file > defaults)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub data_dir: String,
    pub storage_key: String,
    pub status_log: Option<String>,
}

pub fn resolve_settings(cli: &Cli, config: &AppConfig) -> Settings {
    Settings {
        data_dir: cli
            .data_dir
            .clone()
            .unwrap_or_else(|| config.storage.dir.clone()),
        storage_key: config.storage.key.clone(),
        status_log: cli
            .status_log
            .clone()
            .or_else(|| config.status.log_path.clone()),
    }
}

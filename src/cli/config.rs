use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::resolver::resolver::ResolverConfig;

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "screen-locator",
    version,
    about = "Resolve semantic locators against a recorded window tree"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: screen-locator.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve locators to element ids
    Resolve {
        /// JSON window dump to resolve against
        #[arg(long)]
        tree: String,

        /// Candidate element types, comma separated (overrides --purpose)
        #[arg(long, value_delimiter = ',')]
        types: Vec<String>,

        /// Target purpose: press, write, read, select, selected, checkbox or any
        #[arg(long)]
        purpose: Option<String>,

        /// Output format: console or json
        #[arg(long)]
        format: Option<String>,

        /// Append one JSON line per resolve to this file
        #[arg(long)]
        trace: Option<String>,

        /// Locators, e.g. "User", "@ Password", "=Save", "A >> B"
        #[arg(required = true)]
        locators: Vec<String>,
    },

    /// Show how locators are parsed
    Parse {
        /// Output format: console or json
        #[arg(long)]
        format: Option<String>,

        #[arg(required = true)]
        locators: Vec<String>,
    },

    /// Scan a window dump and summarize the element index
    Inspect {
        /// JSON window dump to scan
        #[arg(long)]
        tree: String,

        /// Output format: console or json
        #[arg(long)]
        format: Option<String>,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `screen-locator.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub resolver: ResolverConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_console")]
    pub format: String,

    pub trace: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "console".to_string(),
            trace: None,
        }
    }
}

fn default_console() -> String { "console".to_string() }

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or("screen-locator.yaml");
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_else(|e| {
            warn!(path = config_path, error = %e, "Malformed config file; using defaults");
            AppConfig::default()
        }),
        Err(_) => AppConfig::default(),
    }
}

/// CLI value if given, else the config file's.
pub fn resolve_format(cli: Option<&str>, config: &AppConfig) -> String {
    cli.unwrap_or(&config.output.format).to_string()
}

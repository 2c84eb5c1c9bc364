//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// audio-depot - upload, convert and catalogue audio sketches by project
#[derive(Parser, Debug)]
#[command(name = "audio-depot")]
#[command(version)]
#[command(about = "Convert uploaded audio into a project-grouped library with a Markdown index")]
#[command(long_about = None)]
pub struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Increase log verbosity (debug)
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP upload service
    Serve {
        /// Address to listen on (e.g., 127.0.0.1:8000)
        #[arg(short = 'b', long, value_name = "ADDR")]
        bind: Option<String>,

        #[command(flatten)]
        library: LibraryArgs,
    },
    /// Convert a local file into the library
    Convert {
        /// Source audio file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Project label (output subdirectory)
        #[arg(short = 'p', long, value_name = "LABEL")]
        project: String,

        #[command(flatten)]
        library: LibraryArgs,
    },
    /// Print the library listing
    Index {
        /// Also write the listing file under the library root
        #[arg(short = 'w', long)]
        write: bool,

        #[command(flatten)]
        library: LibraryArgs,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Options shared by every command that touches the library
#[derive(clap::Args, Debug, Clone, Default)]
pub struct LibraryArgs {
    /// Library root directory
    #[arg(short = 'r', long, value_name = "DIR")]
    pub root: Option<String>,

    /// Transcoder executable
    #[arg(long, value_name = "PROGRAM")]
    pub transcoder: Option<String>,

    /// Output format (mp3, ogg, flac)
    #[arg(short = 'f', long, value_name = "FORMAT")]
    pub format: Option<String>,
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "bind",
    "library_root",
    "scratch_dir",
    "keep_scratch",
    "index_on_submit",
    "index_file",
    "max_upload_mb",
    "transcoder.program",
    "transcoder.format",
    "transcoder.quality",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}

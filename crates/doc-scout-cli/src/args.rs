use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "doc-scout")]
#[command(about = "Markdown document structure scanner and review target resolver")]
#[command(version)]
pub struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet output (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    /// .doc_structure.yaml content
    DocStructure,
    /// Classification result with confidence
    Yaml,
    /// Human-readable summary
    Summary,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan for Markdown directories and print the scan JSON
    Scan {
        /// Project root (default: nearest ancestor containing .git)
        root: Option<PathBuf>,

        /// Comma-separated top-level directories to skip
        #[arg(long, value_delimiter = ',', value_name = "DIR")]
        skip: Vec<String>,
    },

    /// Classify document directories as rules or specs
    Classify {
        /// Project root (default: nearest ancestor containing .git)
        root: Option<PathBuf>,

        /// Comma-separated top-level directories to skip
        #[arg(long, value_delimiter = ',', value_name = "DIR")]
        skip: Vec<String>,

        /// Output format
        #[arg(long, value_enum, default_value = "doc-structure")]
        format: OutputFormat,
    },

    /// Generate .doc_structure.yaml at the project root
    Init {
        /// Project root (default: nearest ancestor containing .git)
        root: Option<PathBuf>,

        /// Comma-separated top-level directories to skip
        #[arg(long, value_delimiter = ',', value_name = "DIR")]
        skip: Vec<String>,

        /// Overwrite an existing manifest
        #[arg(short, long)]
        force: bool,
    },

    /// Resolve review targets against the manifest
    Resolve {
        /// Project root (default: nearest ancestor containing .git)
        #[arg(long)]
        root: Option<PathBuf>,

        /// Target files, directories, or feature names; unknown flags are
        /// ignored
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        targets: Vec<String>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

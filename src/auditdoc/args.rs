use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "auditdoc")]
#[command(about = "Build and paginate ISO 14001 audit checklists", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding config.json
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a one-page document from the configured template
    New {
        /// Defaults to audit-document-<today>.json
        file: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Show pages and rows
    #[command(alias = "ls")]
    Show { file: PathBuf },

    /// Print the outline template
    Template,

    /// Replace the first page's rows from an outline file (`-` for stdin)
    Fill { file: PathBuf, outline: String },

    /// Insert a page break above a row
    Split {
        file: PathBuf,
        /// Page number, starting at 1
        page: usize,
        /// Row number on that page, starting at 1
        row: usize,
    },

    /// Merge all pages into the first one
    Merge { file: PathBuf },

    /// Append a page styled like the first one
    AddPage { file: PathBuf },

    /// Remove a page
    RemovePage { file: PathBuf, page: usize },

    /// Toggle a response on a question
    Respond {
        file: PathBuf,
        page: usize,
        row: usize,
        #[arg(value_enum)]
        option: ResponseArg,
    },

    /// Re-import and re-export a document, repairing damaged fields
    Normalize { file: PathBuf },

    /// Print the effective configuration
    Config,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResponseArg {
    Oui,
    Non,
    NonConcerne,
    Observe,
    Affirme,
}

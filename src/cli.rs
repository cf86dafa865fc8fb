// CLI module for argument parsing and configuration

use clap::{ArgAction, Parser, Subcommand};
use std::env;
use std::path::PathBuf;

/// NSI Explorer - browse and preview course documents from the terminal
///
/// Indexes .tex, .md, .ipynb, .csv, .py and .pdf files under a folder,
/// with search, inline previews and CSV export.
#[derive(Parser, Debug, Clone)]
#[command(name = "nsi-explorer")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory to scan for documents
    ///
    /// If not specified, defaults to the current directory.
    #[arg(short = 'd', long = "dir", global = true)]
    pub directory: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(
        long = "log-level",
        env = "NSI_EXPLORER_LOG_LEVEL",
        default_value = "info",
        global = true
    )]
    pub log_level: String,

    /// Emit logs as JSON lines
    #[arg(
        long = "log-json",
        env = "NSI_EXPLORER_LOG_JSON",
        action = ArgAction::SetTrue,
        global = true
    )]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Non-interactive commands. Without one, the terminal UI starts.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the indexed documents, one per line
    List {
        /// Only keep files whose name contains this text (case-insensitive)
        #[arg(short = 's', long = "search")]
        search: Option<String>,

        /// Print a JSON array instead of tab-separated lines
        #[arg(long = "json", action = ArgAction::SetTrue)]
        json: bool,
    },
    /// Write the listing as CSV (Fichier, Type, Complet)
    Export {
        /// Output file (defaults to liste_fichiers_nsi.csv in the current directory)
        #[arg(short = 'o', long = "output")]
        output: Option<PathBuf>,
    },
    /// Print the preview of one file as JSON
    Preview {
        /// File to preview
        file: PathBuf,

        /// Print the HTML embed element instead (PDF only)
        #[arg(long = "html", action = ArgAction::SetTrue)]
        html: bool,
    },
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Args::parse()
    }

    fn needs_directory(&self) -> bool {
        matches!(self.command, None | Some(Command::Export { .. }))
    }

    /// Validate the arguments and return any errors
    pub fn validate(&self) -> Result<(), String> {
        if !self.needs_directory() {
            return Ok(());
        }

        if let Some(ref directory) = self.directory {
            if !directory.exists() {
                return Err(format!(
                    "Directory does not exist: {}",
                    directory.display()
                ));
            }

            if !directory.is_dir() {
                return Err(format!(
                    "Path is not a directory: {}",
                    directory.display()
                ));
            }
        }

        Ok(())
    }
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub directory: PathBuf,
    pub log_level: String,
    pub log_json: bool,
    pub command: Option<Command>,
}

impl From<Args> for AppConfig {
    fn from(args: Args) -> Self {
        let directory = args
            .directory
            .unwrap_or_else(|| env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

        AppConfig {
            directory,
            log_level: args.log_level,
            log_json: args.log_json,
            command: args.command,
        }
    }
}

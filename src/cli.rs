//! Command-line interface for the psu tool

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "psu")]
#[command(about = "Inspect and modify PS2 PSU game save archives", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new empty archive seeded from the file name
    Create {
        /// Archive file to create (.psu)
        archive: PathBuf,
    },

    /// List archive contents
    List {
        /// Archive file
        archive: PathBuf,
    },

    /// Import a local file into an archive
    Import {
        /// Archive file
        archive: PathBuf,

        /// Local file to import
        file: PathBuf,

        /// Entry name to store the file under (defaults to the file name)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Export an entry from an archive to a local file
    Export {
        /// Archive file
        archive: PathBuf,

        /// Entry name to export
        entry: String,

        /// Destination path (defaults to the entry name)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Delete an entry from an archive
    Delete {
        /// Archive file
        archive: PathBuf,

        /// Entry name to delete
        entry: String,
    },
}

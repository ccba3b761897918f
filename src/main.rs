//! psu - command-line tool for PS2 PSU game save archives

use anyhow::{Context, Result};
use clap::Parser;
use psu_rs::Psu;

mod cli;
use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Create { archive } => {
            let base = archive
                .file_stem()
                .and_then(|stem| stem.to_str())
                .context("archive path has no usable file name")?;

            let mut psu = Psu::create(base);
            psu.save(&archive)
                .with_context(|| format!("failed to create {}", archive.display()))?;
            println!("Created {}", archive.display());
        }

        Commands::List { archive } => {
            let psu = Psu::load(&archive)
                .with_context(|| format!("failed to load {}", archive.display()))?;
            print!("{}", psu);
        }

        Commands::Import {
            archive,
            file,
            name,
        } => {
            let name = match name {
                Some(name) => name,
                None => file
                    .file_name()
                    .and_then(|n| n.to_str())
                    .context("imported file has no usable file name")?
                    .to_string(),
            };

            let mut psu = Psu::load(&archive)
                .with_context(|| format!("failed to load {}", archive.display()))?;
            psu.import_file(&file, &name)
                .with_context(|| format!("failed to import {}", file.display()))?;
            psu.save(&archive)?;
            println!("Imported {} as \"{}\"", file.display(), name);
        }

        Commands::Export {
            archive,
            entry,
            output,
        } => {
            let output = output.unwrap_or_else(|| entry.clone().into());

            let psu = Psu::load(&archive)
                .with_context(|| format!("failed to load {}", archive.display()))?;
            psu.export_file(&entry, &output)
                .with_context(|| format!("failed to export \"{}\"", entry))?;
            println!("Exported \"{}\" to {}", entry, output.display());
        }

        Commands::Delete { archive, entry } => {
            let mut psu = Psu::load(&archive)
                .with_context(|| format!("failed to load {}", archive.display()))?;
            psu.delete(&entry)
                .with_context(|| format!("failed to delete \"{}\"", entry))?;
            psu.save(&archive)?;
            println!("Deleted \"{}\"", entry);
        }
    }

    Ok(())
}

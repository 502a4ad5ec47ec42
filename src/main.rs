use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use sxi::index::{SuffixIndex, SuffixIndexConfig};
use sxi::output;
use sxi::utils::load_records;

#[derive(Parser)]
#[command(name = "sxi")]
#[command(about = "Incremental substring search over line records")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search a records file for a substring
    Search {
        /// Records file (one record per line)
        file: PathBuf,

        /// Substring to search for
        pattern: String,

        /// Maximum number of distinct matching records
        #[arg(short = 'n', long, default_value_t = 10)]
        limit: usize,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },
    /// Show index statistics for a records file
    Stats {
        /// Records file (one record per line)
        file: PathBuf,
    },
}

/// Rebuild the index from a records file by replaying insertions; the
/// index has no persisted layout.
fn build_index(path: &Path) -> Result<(SuffixIndex, Vec<sxi::index::Record>)> {
    let records = load_records(path)?;
    let mut index = SuffixIndex::new(SuffixIndexConfig::default());
    for record in &records {
        index
            .insert_record(record.id, &record.text)
            .with_context(|| format!("failed to index record {}", record.id))?;
    }
    Ok((index, records))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Search {
            file,
            pattern,
            limit,
            no_color,
        } => {
            let (index, records) = build_index(&file)?;
            let mut ids = index
                .query(&pattern, limit)
                .with_context(|| format!("query {:?} failed", pattern))?;
            ids.sort_unstable();
            output::print_matches(&records, &ids, &pattern, !no_color)?;
        }
        Commands::Stats { file } => {
            let (index, _) = build_index(&file)?;
            println!("{}", serde_json::to_string_pretty(&index.stats())?);
        }
    }

    Ok(())
}

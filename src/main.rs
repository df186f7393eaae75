use std::{fs::File, path::PathBuf, process};

use anyhow::{Context, Result};
use clap::Parser;
use keyclass::{
    config::{ConfigStore, FileConfigStore},
    import::import_csv,
    Language, SelectionRequest, TextResolver, TextStore,
};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// typing practice from files, a bundled corpus, or random passages
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Selects a practice passage from a file, from the bundled corpus by id, or at random from a difficulty band, and prints it for the typing session."
)]
pub struct Cli {
    /// file to use text from as sample text
    #[clap(short = 'f', long, value_name = "FILENAME")]
    file: Option<PathBuf>,

    /// id of the text to retrieve from the corpus (1-6000)
    #[clap(short = 'i', long, allow_negative_numbers = true)]
    id: Option<i64>,

    /// difficulty level of a random text (1-5)
    #[clap(short = 'd', long, value_name = "N", allow_negative_numbers = true)]
    difficulty: Option<i64>,

    /// language of the corpus text
    #[clap(short = 'l', long, value_enum)]
    language: Option<Language>,

    /// path of the text store, overriding the configured location
    #[clap(long, value_name = "PATH")]
    database: Option<PathBuf>,

    /// load English texts from a CSV file (id,txt,difficulty) and exit
    #[clap(long, value_name = "CSV")]
    import: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .init();

    let cli = Cli::parse();
    let config = FileConfigStore::new().load();

    let store = match cli.database.clone().or(config.database_path.clone()) {
        Some(path) => TextStore::new(path),
        None => TextStore::open_default(),
    };

    if let Some(ref csv_path) = cli.import {
        let file = File::open(csv_path)
            .with_context(|| format!("failed to open {}", csv_path.display()))?;
        let count = import_csv(&store, file)?;
        println!("Imported {count} texts into {}", store.path().display());
        return Ok(());
    }

    let request = SelectionRequest {
        file: cli.file,
        id: cli.id,
        difficulty: cli.difficulty,
        language: cli.language.unwrap_or(config.language),
        default_difficulty: config.default_difficulty,
    };

    match TextResolver::new(&store).resolve(&request) {
        Ok(selection) => {
            println!("{}", selection.text);
            println!();
            println!("Source: {}", selection.origin);
            Ok(())
        }
        Err(e) => match e.exit_code() {
            Some(code) => {
                println!("{e}");
                process::exit(code);
            }
            None => Err(e.into()),
        },
    }
}

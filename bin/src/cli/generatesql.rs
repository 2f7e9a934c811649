use std::{io::Write, path::PathBuf};

use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use clap::Args;
use pipeline::{
    emit::{NormalizedDataset, sql},
    records::{Candidate, PollingStation},
};

use crate::jsonio;

/// Generates SQL inserts from extracted polling station and candidate JSON.
#[derive(Args, Debug)]
pub struct Command {
    /// Polling station JSON written by the extract subcommand.
    #[arg(long)]
    polling_stations: PathBuf,

    /// Candidate JSON written by the extract subcommand.
    #[arg(long)]
    candidates: PathBuf,

    /// Path to write the SQL to.
    #[arg(long)]
    output: PathBuf,

    /// Also write the normalized tables as JSON to this path.
    #[arg(long)]
    normalized_json: Option<PathBuf>,
}

/// Runs the subcommand.
pub fn run(cmd: &Command) -> Result<()> {
    let stations: Vec<PollingStation> = jsonio::read_json(&cmd.polling_stations)?;
    let candidates: Vec<Candidate> = jsonio::read_json(&cmd.candidates)?;

    let dataset = NormalizedDataset::build(&stations, &candidates);

    let text = sql::render(&dataset).with_context(|| "rendering SQL")?;
    let mut file = AtomicWriteFile::open(&cmd.output)
        .with_context(|| format!("opening {:?} for writing", cmd.output))?;
    file.write_all(text.as_bytes())
        .with_context(|| format!("writing SQL to {:?}", cmd.output))?;
    file.commit()
        .with_context(|| format!("committing {:?}", cmd.output))?;

    if let Some(path) = &cmd.normalized_json {
        jsonio::write_json(path, &dataset)?;
    }

    Ok(())
}

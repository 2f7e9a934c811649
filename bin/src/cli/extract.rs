use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use pipeline::{
    config::{ExtractionConfig, ExtractionType},
    extract::{extract_candidates, extract_polling_stations},
    records::PollingStation,
    tabula_wrapper::singlethreaded::SingleThreadedTabulaDetector,
};

use crate::jsonio;

/// Extracts polling station or candidate tables from a gazette PDF as JSON.
#[derive(Args, Debug)]
pub struct Command {
    /// Path to the gazette PDF.
    #[arg(long)]
    pdf_path: PathBuf,

    /// Which tables to extract: polling_station_data or candidate_data.
    #[arg(long, value_parser = ExtractionType::from_key)]
    extraction_type: ExtractionType,

    /// Path to write the extracted records to, as JSON.
    #[arg(long)]
    output_path: PathBuf,

    /// Polling station JSON written by an earlier polling_station_data
    /// extraction. Candidates are bound to these stations.
    #[arg(long)]
    polling_stations: Option<PathBuf>,

    /// YAML file overriding the pages and Tabula settings of each extraction
    /// type.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Path to Tabula JAR file.
    #[arg(long, default_value = "tabula.jar")]
    tabula_jar: String,
}

/// Runs the subcommand.
pub fn run(cmd: &Command) -> Result<()> {
    let cfg = match &cmd.config {
        Some(path) => ExtractionConfig::load(path)?,
        None => ExtractionConfig::default(),
    };
    let settings = cfg.get(cmd.extraction_type);

    let vm = tabula::TabulaVM::new(&cmd.tabula_jar, false).with_context(|| "initialising Tabula")?;
    let env = vm.attach().with_context(|| "attaching to TabulaVM")?;
    let detector = SingleThreadedTabulaDetector::new(env);

    match cmd.extraction_type {
        ExtractionType::PollingStationData => {
            let stations = extract_polling_stations(&detector, &cmd.pdf_path, settings)?;
            jsonio::write_json(&cmd.output_path, &stations)
        }
        ExtractionType::CandidateData => {
            let stations: Vec<PollingStation> = match &cmd.polling_stations {
                Some(path) => jsonio::read_json(path)?,
                None => {
                    log::warn!(
                        "No --polling-stations given, candidates will not be bound to polling stations."
                    );
                    Vec::new()
                }
            };
            let candidates = extract_candidates(&detector, &cmd.pdf_path, settings, stations)?;
            jsonio::write_json(&cmd.output_path, &candidates)
        }
    }
}

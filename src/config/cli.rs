use crate::domain::model::ExtractionPolicy;
use crate::domain::target::OutputTarget;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "speaker-scraper")]
#[command(about = "Scrape conference speakers and save them as JSON, CSV or a Google spreadsheet")]
pub struct CliArgs {
    /// The filename to save. It could have one of these extensions: .json, .csv, .gsheets
    #[arg(short, long, value_parser = parse_output_target)]
    pub file: OutputTarget,

    /// Optional TOML site profile overriding URL, timeout and selectors
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Drop speakers with missing markup instead of aborting the run
    #[arg(long)]
    pub skip_incomplete: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,
}

impl CliArgs {
    pub fn extraction_policy(&self) -> ExtractionPolicy {
        if self.skip_incomplete {
            ExtractionPolicy::Skip
        } else {
            ExtractionPolicy::Abort
        }
    }
}

fn parse_output_target(value: &str) -> Result<OutputTarget, String> {
    OutputTarget::from_filename(value).map_err(|e| match e {
        crate::utils::error::ScrapeError::Argument { reason, .. } => reason,
        other => other.to_string(),
    })
}

pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliArgs;
pub use crate::config::{AppSettings, SheetsSettings, SiteProfile};

pub use crate::adapters::google::GoogleSheetsClient;
pub use crate::adapters::storage::LocalStorage;
pub use crate::app::pipelines::speaker_pipeline::SpeakerPipeline;
pub use crate::core::etl::{RunSummary, ScrapeEngine};
pub use crate::domain::model::{ExtractionPolicy, SpeakerRecord};
pub use crate::domain::target::OutputTarget;
pub use crate::utils::error::{Result, ScrapeError};

pub mod etl;
pub mod extractor;
pub mod fetcher;
pub mod selectors;

pub use crate::domain::model::SpeakerRecord;
pub use crate::domain::ports::{Pipeline, RecordWriter, SpreadsheetService, Storage};
pub use crate::utils::error::Result;

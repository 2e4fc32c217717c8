use crate::utils::error::{Result, ScrapeError};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["json", "csv", "gsheets"];

/// Where the scraped records go, decided by the `--file` extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Json(PathBuf),
    Csv(PathBuf),
    /// Spreadsheet title, used as given (including the `.gsheets` suffix).
    Sheet(String),
}

impl OutputTarget {
    pub fn from_filename(filename: &str) -> Result<Self> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| ScrapeError::Argument {
                value: filename.to_string(),
                reason: format!(
                    "File has no extension, choices are {}",
                    Self::extension_list()
                ),
            })?;

        match extension {
            "json" => Ok(OutputTarget::Json(PathBuf::from(filename))),
            "csv" => Ok(OutputTarget::Csv(PathBuf::from(filename))),
            "gsheets" => Ok(OutputTarget::Sheet(filename.to_string())),
            other => Err(ScrapeError::Argument {
                value: filename.to_string(),
                reason: format!(
                    "Invalid file extension .{}, choices are {}",
                    other,
                    Self::extension_list()
                ),
            }),
        }
    }

    pub fn is_sheet(&self) -> bool {
        matches!(self, OutputTarget::Sheet(_))
    }

    fn extension_list() -> String {
        SUPPORTED_EXTENSIONS
            .iter()
            .map(|ext| format!(".{}", ext))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromStr for OutputTarget {
    type Err = ScrapeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_filename(s)
    }
}

impl fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputTarget::Json(path) => write!(f, "JSON file {}", path.display()),
            OutputTarget::Csv(path) => write!(f, "CSV file {}", path.display()),
            OutputTarget::Sheet(title) => write!(f, "Google spreadsheet \"{}\"", title),
        }
    }
}

pub mod csv;
pub mod json;
pub mod sheets;

pub use self::csv::CsvWriter;
pub use self::json::JsonWriter;
pub use self::sheets::SheetsWriter;

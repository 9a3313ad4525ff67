use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Error type covering the different failure cases that can occur when the
/// tool fetches, transforms, or emits timesheet data.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when the configuration file cannot be parsed.
    #[error("configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// Raised when a configuration field fails validation at load time.
    #[error("invalid configuration: {field} {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    /// Errors bubbled up from the tracker's REST endpoint.
    #[error("tracker request failed: {0}")]
    Http(#[source] Box<ureq::Error>),

    /// Raised when the RSS/XML export cannot be parsed.
    #[error("feed parse error: {0}")]
    Xml(#[from] xmltree::ParseError),

    /// Errors bubbled up from the Excel writer implementation.
    #[error("Excel write error: {0}")]
    ExcelWrite(#[from] rust_xlsxwriter::XlsxError),

    /// Raised when the aggregated table is empty and nothing can be written.
    #[error("the aggregated table is empty; refusing to write a spreadsheet")]
    EmptyReport,
}

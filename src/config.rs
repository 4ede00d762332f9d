//! Run configuration.
//!
//! Everything a run needs is gathered in one [`RunConfig`] value, built by
//! the command line front end (or by a test) and handed to
//! [`job::run`](crate::core::job::run).

use std::path::PathBuf;

use crate::item::sink::Delimiters;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Template text rendered for every record
    pub template: String,
    /// Input file, standard input when `None`
    pub input: Option<PathBuf>,
    /// Output file, standard output when `None`
    pub output: Option<PathBuf>,
    /// Whether the first record holds the column names
    pub has_headers: bool,
    /// Separators written after each rendered record
    pub delimiters: Delimiters,
    /// Field delimiter of the input
    pub delimiter: u8,
    /// Reject records whose field count differs from the first record
    pub strict: bool,
    /// Number of records whose rendering may fail before the run fails
    pub skip_limit: usize,
}

impl RunConfig {
    /// A configuration reading CSV with a header from stdin and writing to stdout.
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            input: None,
            output: None,
            has_headers: true,
            delimiters: Delimiters::default(),
            delimiter: b',',
            strict: false,
            skip_limit: 0,
        }
    }
}

/// Parses a field delimiter given on the command line.
///
/// Accepts a single ASCII character, or `\t` / `tab` for a tab.
pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "\\t" | "tab" => Ok(b'\t'),
        _ => match value.as_bytes() {
            [byte] if byte.is_ascii() => Ok(*byte),
            _ => Err(format!(
                "delimiter must be a single ASCII character, got {value:?}"
            )),
        },
    }
}

//! Per-record naming context.
//!
//! A run keeps one [`ContextBuilder`] alive for its whole duration. The
//! builder owns the column names, the `Name` mapping and the ordinal `N`; each
//! call to [`ContextBuilder::build`] lends out a [`RenderContext`] that pairs
//! that state with the record currently held by the source.

use std::collections::HashMap;

use csv::StringRecord;
use log::debug;

use crate::{core::item::RecordSource, error::SourceError};

/// Column names captured from the first record.
///
/// The names are owned copies: the record they come from lives in the
/// source's reusable buffer and is overwritten by the next read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    columns: Vec<String>,
}

impl Header {
    /// A header with no columns, used when header capture is disabled.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Copies the fields of `record` into a new header.
    pub fn capture(record: &StringRecord) -> Self {
        Self {
            columns: record.iter().map(str::to_owned).collect(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Header {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            columns: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Binds the header of a run.
///
/// # Returns
/// - `Ok(Some(Header::empty()))` when `enabled` is false; nothing is read
/// - `Ok(Some(header))` with a copy of the first record when `enabled` is true
/// - `Ok(None)` when the input is empty, which ends the run successfully
/// - `Err(error)` when the first record is malformed
pub fn bind_header(
    source: &mut dyn RecordSource,
    enabled: bool,
) -> Result<Option<Header>, SourceError> {
    if !enabled {
        return Ok(Some(Header::empty()));
    }

    match source.read_record()? {
        Some(record) => {
            let header = Header::capture(record);
            debug!("Bound header with {} columns", header.len());
            Ok(Some(header))
        }
        None => Ok(None),
    }
}

/// The value a template is executed against.
///
/// `index` borrows the record held by the source and must not be kept past
/// the current iteration.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// 0-based ordinal of the record among successfully rendered records
    pub n: usize,
    /// Raw fields of the current record
    pub index: &'a StringRecord,
    /// Column name to field value, empty when headers are disabled
    pub name: &'a HashMap<String, String>,
}

/// Builds a [`RenderContext`] for every record of a run.
#[derive(Debug, Default)]
pub struct ContextBuilder {
    header: Header,
    name: HashMap<String, String>,
    n: usize,
}

impl ContextBuilder {
    /// `Name` starts with every header column mapped to the empty string.
    pub fn new(header: Header) -> Self {
        let name = header
            .columns
            .iter()
            .map(|column| (column.clone(), String::new()))
            .collect();
        Self { header, name, n: 0 }
    }

    /// Rebinds the `Name` mapping to `record` and returns the context.
    ///
    /// Every key already present is reset to the empty string first, so keys
    /// are never removed and a short record cannot leak values from the
    /// previous one. Fields beyond the header length stay unmapped.
    pub fn build<'a>(&'a mut self, record: &'a StringRecord) -> RenderContext<'a> {
        for value in self.name.values_mut() {
            value.clear();
        }

        for (column, field) in self.header.columns.iter().zip(record.iter()) {
            match self.name.get_mut(column) {
                Some(value) => {
                    value.clear();
                    value.push_str(field);
                }
                None => {
                    self.name.insert(column.clone(), field.to_owned());
                }
            }
        }

        RenderContext {
            n: self.n,
            index: record,
            name: &self.name,
        }
    }

    /// Moves the ordinal forward once a record has been rendered.
    pub fn advance(&mut self) {
        self.n += 1;
    }
}

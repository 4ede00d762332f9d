use std::io::Write;

use csv::StringRecord;

use crate::{
    core::context::RenderContext,
    error::SourceError,
    item::template::TemplateError,
};

/// Result of a single read from a [`RecordSource`].
///
/// - `Ok(Some(record))` when a record is available
/// - `Ok(None)` at end of stream
/// - `Err(error)` when the input is malformed
pub type RecordSourceResult<'a> = Result<Option<&'a StringRecord>, SourceError>;

/// A lazy, finite, non-restartable sequence of records.
///
/// The returned record borrows the source's internal buffer, which is
/// overwritten by the next call. Anything that must outlive one iteration has
/// to be copied out by the caller.
pub trait RecordSource {
    fn read_record(&mut self) -> RecordSourceResult<'_>;
}

/// A compiled template executed once per record.
pub trait Renderer {
    /// Renders `context` into `out`.
    ///
    /// A failure leaves whatever was already written in `out`; callers that
    /// must not emit partial rows render into a scratch buffer first.
    fn render(&self, context: &RenderContext<'_>, out: &mut dyn Write)
    -> Result<(), TemplateError>;
}

use std::io::{self, Write};

use serde::Serialize;

const NEW_LINE: &[u8] = b"\n";
const NULL_BYTE: &[u8] = &[0x00];

/// Separators written after every rendered record.
///
/// Both are independent: with both enabled each record is followed by `\n`
/// and then `\0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Delimiters {
    pub new_line: bool,
    pub zero: bool,
}

/// Output stream of a run.
///
/// Rendered bytes are written verbatim; [`Sink::end_record`] appends the
/// configured delimiters. Nothing is flushed before [`Sink::flush`] beyond
/// what the underlying stream does on its own.
pub struct Sink<W: Write> {
    stream: W,
    delimiters: Delimiters,
}

impl<W: Write> Sink<W> {
    /// Writes rendered output as is.
    pub fn emit(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.stream.write_all(bytes)
    }

    /// Writes the record delimiters: newline first, then the null byte.
    pub fn end_record(&mut self) -> io::Result<()> {
        if self.delimiters.new_line {
            self.stream.write_all(NEW_LINE)?;
        }
        if self.delimiters.zero {
            self.stream.write_all(NULL_BYTE)?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.stream.flush()
    }

    pub fn into_inner(self) -> W {
        self.stream
    }
}

/// A builder for configuring a [`Sink`].
///
/// # Examples
///
/// ```
/// use csveach::item::sink::SinkBuilder;
///
/// let mut sink = SinkBuilder::new().new_line(true).zero(true).from_writer(Vec::new());
///
/// sink.emit(b"row").unwrap();
/// sink.end_record().unwrap();
///
/// assert_eq!(sink.into_inner(), b"row\n\0");
/// ```
#[derive(Default)]
pub struct SinkBuilder {
    delimiters: Delimiters,
}

impl SinkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a newline after each record.
    pub fn new_line(mut self, yes: bool) -> Self {
        self.delimiters.new_line = yes;
        self
    }

    /// Appends a null byte after each record.
    pub fn zero(mut self, yes: bool) -> Self {
        self.delimiters.zero = yes;
        self
    }

    pub fn delimiters(mut self, delimiters: Delimiters) -> Self {
        self.delimiters = delimiters;
        self
    }

    pub fn from_writer<W: Write>(self, stream: W) -> Sink<W> {
        Sink {
            stream,
            delimiters: self.delimiters,
        }
    }
}

use csv::{Reader, ReaderBuilder, StringRecord, Trim};
use log::debug;
use std::io::Read;

use crate::core::item::{RecordSource, RecordSourceResult};

/// A CSV record source that implements the `RecordSource` trait.
///
/// Records are read one at a time into a single [`StringRecord`] buffer that
/// is reused for every call, so streaming a file of any size allocates only
/// for its widest row. The record handed out by
/// [`read_record`](RecordSource::read_record) borrows that buffer and is
/// overwritten by the next call.
///
/// The header row is not interpreted here: it comes back as an ordinary
/// record and the caller decides whether to bind it as column names.
///
/// # Examples
///
/// ```
/// use csveach::item::csv::csv_reader::CsvRecordSourceBuilder;
/// use csveach::core::item::RecordSource;
///
/// let data = "\
/// name,value
/// foo,123
/// bar
/// ";
///
/// let mut source = CsvRecordSourceBuilder::new().from_reader(data.as_bytes());
///
/// assert_eq!(*source.read_record().unwrap().unwrap(), vec!["name", "value"]);
/// assert_eq!(*source.read_record().unwrap().unwrap(), vec!["foo", "123"]);
/// // rows may be shorter or longer than the first one
/// assert_eq!(*source.read_record().unwrap().unwrap(), vec!["bar"]);
/// assert!(source.read_record().unwrap().is_none());
/// ```
pub struct CsvRecordSource<R> {
    reader: Reader<R>,
    /// Buffer reused by every read
    record: StringRecord,
}

impl<R: Read> RecordSource for CsvRecordSource<R> {
    /// Reads the next record into the internal buffer.
    ///
    /// # Returns
    /// - `Ok(Some(record))` if a record is successfully read
    /// - `Ok(None)` if there are no more records to read
    /// - `Err(SourceError::Csv(error))` if the record is malformed: invalid
    ///   UTF-8, or a field count that differs from the first record in strict mode
    ///
    /// Quoting is lenient: a stray quote inside a field is kept as data and an
    /// unterminated quoted field extends to the end of input.
    fn read_record(&mut self) -> RecordSourceResult<'_> {
        if self.reader.read_record(&mut self.record)? {
            Ok(Some(&self.record))
        } else {
            debug!(
                "End of csv input at line {}",
                self.reader.position().line()
            );
            Ok(None)
        }
    }
}

/// A builder for configuring CSV record reading.
///
/// # Default Configuration
///
/// - Delimiter: comma (,)
/// - Records end with `\n`, `\r` or `\r\n`
/// - Field count: rows may differ in length
/// - Trimming: none, fields are kept verbatim
///
/// # Examples
///
/// ```
/// use csveach::item::csv::csv_reader::CsvRecordSourceBuilder;
/// use csveach::core::item::RecordSource;
///
/// let mut source = CsvRecordSourceBuilder::new()
///     .delimiter(b';')
///     .strict(true)
///     .from_reader("name;age\nAlice;30".as_bytes());
///
/// assert_eq!(*source.read_record().unwrap().unwrap(), vec!["name", "age"]);
/// ```
pub struct CsvRecordSourceBuilder {
    /// The delimiter character (default: comma ',')
    delimiter: u8,
    /// Whether every record must have as many fields as the first one (default: false)
    strict: bool,
}

impl Default for CsvRecordSourceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvRecordSourceBuilder {
    pub fn new() -> Self {
        Self {
            delimiter: b',',
            strict: false,
        }
    }

    /// Sets the field delimiter.
    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Rejects records whose field count differs from the first record.
    ///
    /// Off by default: short and long rows are read as they are and the
    /// header binding maps them by position.
    pub fn strict(mut self, yes: bool) -> Self {
        self.strict = yes;
        self
    }

    /// Creates a `CsvRecordSource` from any reader.
    pub fn from_reader<R: Read>(self, rdr: R) -> CsvRecordSource<R> {
        let reader = ReaderBuilder::new()
            .trim(Trim::None)
            .delimiter(self.delimiter)
            // the header is bound by the caller, not by the csv reader
            .has_headers(false)
            .flexible(!self.strict)
            .from_reader(rdr);

        CsvRecordSource {
            reader,
            record: StringRecord::new(),
        }
    }
}

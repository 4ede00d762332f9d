//! CSV support for reading tabular data one record at a time.
//!
//! The reader hands out raw [`csv::StringRecord`]s without deserializing
//! them: the columns of the input are only known at run time, from its
//! first row.
//!
//! # Reading records
//!
//! ```
//! use csveach::item::csv::csv_reader::CsvRecordSourceBuilder;
//! use csveach::core::item::RecordSource;
//!
//! let csv_data = "\
//! city,country,pop
//! Boston,United States,4628910
//! Concord,United States,42695
//! ";
//!
//! let mut source = CsvRecordSourceBuilder::new()
//!     .delimiter(b',')
//!     .from_reader(csv_data.as_bytes());
//!
//! let mut cities = Vec::new();
//! while let Some(record) = source.read_record().unwrap() {
//!     cities.push(record.get(0).unwrap_or_default().to_string());
//! }
//!
//! assert_eq!(cities, vec!["city", "Boston", "Concord"]);
//! ```

/// A module providing facilities for reading CSV data records.
pub mod csv_reader;

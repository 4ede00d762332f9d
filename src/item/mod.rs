/// This module provides the CSV record source.
pub mod csv;

/// This module provides the output sink and its record delimiters.
pub mod sink;

/// This module provides the template engine rendering one record at a time.
pub mod template;

use std::{io, path::PathBuf};

use thiserror::Error;

use crate::item::template::TemplateError;

/// Example shown when no template text is given on the command line.
pub const USAGE_EXAMPLE: &str = r#"Output template expected.
Example:
echo -e "num,value\n1,one\n2,two\n8,eight" | csveach --new-line '{{ index .Index 0 }}:{{ index .Name "value" }}'"#;

#[derive(Error, Debug)]
/// Failure raised by a [`RecordSource`](crate::core::item::RecordSource).
pub enum SourceError {
    #[error("{0}")]
    Csv(#[from] csv::Error),

    #[error("malformed record: {0}")]
    Malformed(String),
}

#[derive(Error, Debug)]
/// Fatal conditions of a run. Each variant maps to its own process exit status.
pub enum CsvEachError {
    #[error("{}", USAGE_EXAMPLE)]
    MissingTemplate,

    #[error("Error opening input file {}: {source}", .path.display())]
    OpenInput { path: PathBuf, source: io::Error },

    #[error("Error opening output file {}: {source}", .path.display())]
    CreateOutput { path: PathBuf, source: io::Error },

    #[error("Error parsing output template: {0}")]
    TemplateParse(#[source] TemplateError),

    #[error("Error rendering record {record}: {source}")]
    Render {
        record: usize,
        #[source]
        source: TemplateError,
    },

    #[error("Error reading csv header: {0}")]
    HeaderRead(#[source] SourceError),

    #[error("Error reading csv: {0}")]
    RecordRead(#[source] SourceError),

    #[error("Error writing output: {0}")]
    Write(#[from] io::Error),
}

impl CsvEachError {
    /// Process exit status reported for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            CsvEachError::MissingTemplate => 1,
            CsvEachError::OpenInput { .. } => 2,
            CsvEachError::CreateOutput { .. } => 3,
            CsvEachError::TemplateParse(_) => 4,
            CsvEachError::Render { .. } => 5,
            CsvEachError::HeaderRead(_) => 6,
            CsvEachError::RecordRead(_) => 7,
            CsvEachError::Write(_) => 8,
        }
    }
}

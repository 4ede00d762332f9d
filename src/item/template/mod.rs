//! Text templates rendered once per record.
//!
//! Templates are Go `text/template` documents compiled and executed by
//! [`gtmpl`]. Each record is exposed as a struct-like value with three fields:
//!
//! - `.N`: 0-based ordinal of the record among rendered records
//! - `.Index`: the record's fields, by position (`{{index .Index 0}}`)
//! - `.Name`: the fields by header column (`{{.Name.city}}`, `{{index .Name "city"}}`)
//!
//! Every header column is always a key of `.Name`. A column absent from the
//! header is a missing map key: it yields gtmpl's no-value, which prints as
//! `<no value>` and is false in conditions. Indexing past the end of `.Index`
//! and unknown top-level fields are execution errors.
//!
//! # Examples
//!
//! ```
//! use std::collections::HashMap;
//!
//! use csv::StringRecord;
//! use csveach::core::{context::RenderContext, item::Renderer};
//! use csveach::item::template::Template;
//!
//! let template = Template::parse(r#"{{.N}}:{{index .Index 0}}:{{index .Name "value"}}"#).unwrap();
//!
//! let record = StringRecord::from(vec!["1", "one"]);
//! let name = HashMap::from([
//!     ("num".to_string(), "1".to_string()),
//!     ("value".to_string(), "one".to_string()),
//! ]);
//! let context = RenderContext { n: 0, index: &record, name: &name };
//!
//! let mut out = Vec::new();
//! template.render(&context, &mut out).unwrap();
//! assert_eq!(out, b"0:1:one");
//! ```

use std::{collections::HashMap, fmt, io, str::FromStr};

use gtmpl::{Context, Value};
use thiserror::Error;

use crate::core::{context::RenderContext, item::Renderer};

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("{0}")]
    Parse(String),

    #[error("{0}")]
    Exec(String),

    #[error("{0}")]
    Io(#[from] io::Error),
}

/// A compiled template.
pub struct Template {
    source: String,
    inner: gtmpl::Template,
}

impl Template {
    /// Compiles `source`.
    pub fn parse(source: impl Into<String>) -> Result<Self, TemplateError> {
        let source = source.into();
        let mut inner = gtmpl::Template::default();
        inner
            .parse(source.as_str())
            .map_err(|error| TemplateError::Parse(error.to_string()))?;
        Ok(Self { source, inner })
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Template")
            .field("source", &self.source)
            .finish()
    }
}

impl FromStr for Template {
    type Err = TemplateError;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        Template::parse(source)
    }
}

/// Converts a context into the value the template is executed against.
fn to_value(context: &RenderContext<'_>) -> Value {
    let index = context
        .index
        .iter()
        .map(|field| Value::String(field.to_owned()))
        .collect();
    let name = context
        .name
        .iter()
        .map(|(column, field)| (column.clone(), Value::String(field.clone())))
        .collect();

    let mut root = HashMap::with_capacity(3);
    root.insert("N".to_string(), Value::from(context.n as u64));
    root.insert("Index".to_string(), Value::Array(index));
    root.insert("Name".to_string(), Value::Map(name));
    Value::Object(root)
}

impl Renderer for Template {
    fn render(
        &self,
        context: &RenderContext<'_>,
        out: &mut dyn io::Write,
    ) -> Result<(), TemplateError> {
        let rendered = self
            .inner
            .render(&Context::from(to_value(context)))
            .map_err(|error| TemplateError::Exec(error.to_string()))?;
        out.write_all(rendered.as_bytes())?;
        Ok(())
    }
}

/*!
 # csveach

 Render a text template once for every record of a CSV stream.

 `csveach` reads CSV from a file or from standard input, binds the first row as
 column names and executes a template for each following row. The output of
 every row is written as is, optionally followed by a newline and/or a null
 byte, which makes it a handy building block for shell pipelines
 (`csveach -z ... | xargs -0 ...`).

 ## Core Concepts

- **RecordSource:** where records come from, one at a time, in a reused buffer.
- **Header:** an owned copy of the first record, mapping column positions to names.
- **RenderContext:** what the template sees for one record: `.N`, `.Index` and `.Name`.
- **Renderer:** the compiled template, executed against a context.
- **Sink:** the output stream and the delimiters written after each record.
- **RenderStep:** the loop tying them together, from the header to end of input.

 ## Template language

 Templates are Go `text/template` documents, executed by the `gtmpl` crate.
 Actions, pipelines, variables, `if`/`range`/`with`, trim markers, comments
 and the built-in functions (`printf`, `index`, `len`, `eq`, `lt`, `and`,
 `or`, ...) behave as `gtmpl` implements them. Each record exposes:

| **Field**                             | **Meaning**                                       |
|---------------------------------------|---------------------------------------------------|
| `{{.N}}`                              | zero-based ordinal of the rendered record         |
| `{{index .Index 0}}`                  | field by position, an error when out of range     |
| `{{.Name.col}}`, `{{index .Name "col"}}` | field by column name                           |

 Every header column is a key of `.Name`, empty when the record is short. A
 name that is not a header column prints `<no value>` and is false in
 conditions.

 ## Getting Started

```rust
use csveach::{config::RunConfig, core::job::run_with};

let csv = "num,value\n1,one\n2,two\n8,eight\n";

let mut config = RunConfig::new(r#"{{.N}}:{{index .Index 0}}:{{index .Name "value"}}"#);
config.delimiters.new_line = true;

let mut output = Vec::new();
let result = run_with(&config, csv.as_bytes(), &mut output).unwrap();

assert_eq!(result.render_count, 3);
assert_eq!(String::from_utf8(output).unwrap(), "0:1:one\n1:2:two\n2:8:eight\n");
```

 ## License
 Licensed under either of

 -   Apache License, Version 2.0
     ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
 -   MIT license
     ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)

 at your option.
 */

/// Run configuration built by the command line front end
pub mod config;

/// Core module: header binding, render context, step and job
pub mod core;

/// Error types and exit codes
pub mod error;

#[doc(inline)]
pub use error::*;

/// Record source, template engine and output sink
pub mod item;

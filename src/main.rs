use std::{path::PathBuf, process};

use clap::Parser;
use env_logger::Env;
use log::debug;

use csveach::{
    config::{RunConfig, parse_delimiter},
    core::job,
    item::sink::Delimiters,
};

/// Render a template once for every record of a CSV stream.
///
/// The template sees `.N` (ordinal of the rendered record, from 0), `.Index`
/// (fields by position) and `.Name` (fields by header column).
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Output template, e.g. '{{ index .Index 0 }}:{{ index .Name "value" }}'
    template: Option<String>,

    /// Read CSV from this file instead of stdin
    #[arg(short, long, value_name = "PATH")]
    input: Option<PathBuf>,

    /// Write output to this file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Treat the first record as data, not as column names
    #[arg(long)]
    no_header: bool,

    /// Write a newline after each record
    #[arg(short = 'n', long)]
    new_line: bool,

    /// Write a null byte after each record
    #[arg(short, long)]
    zero: bool,

    /// Field delimiter of the input
    #[arg(short, long, default_value = ",", value_parser = parse_delimiter)]
    delimiter: u8,

    /// Reject records whose field count differs from the first record
    #[arg(long)]
    strict: bool,

    /// Number of records whose rendering may fail before giving up
    #[arg(long, default_value_t = 0, value_name = "N")]
    skip_limit: usize,

    /// Print a JSON summary of the run to stderr
    #[arg(long)]
    stats: bool,
}

impl From<Cli> for RunConfig {
    fn from(cli: Cli) -> Self {
        RunConfig {
            template: cli.template.unwrap_or_default(),
            input: cli.input,
            output: cli.output,
            has_headers: !cli.no_header,
            delimiters: Delimiters {
                new_line: cli.new_line,
                zero: cli.zero,
            },
            delimiter: cli.delimiter,
            strict: cli.strict,
            skip_limit: cli.skip_limit,
        }
    }
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version are reported through the error path too
            let code = if err.use_stderr() { 1 } else { 0 };
            let _ = err.print();
            process::exit(code);
        }
    };

    let stats = cli.stats;
    let config = RunConfig::from(cli);
    debug!("{config:?}");

    match job::run(&config) {
        Ok(result) => {
            if stats {
                match serde_json::to_string(&result) {
                    Ok(json) => eprintln!("{json}"),
                    Err(err) => eprintln!("Error serializing run summary: {err}"),
                }
            }
        }
        Err(err) => {
            eprintln!("{err}");
            process::exit(err.exit_code());
        }
    }
}

use std::{
    fs::File,
    io::{self, BufWriter, Read, Write},
};

use log::{debug, info};

use crate::{
    config::RunConfig,
    core::step::{RenderStepBuilder, StepResult},
    error::CsvEachError,
    item::{csv::csv_reader::CsvRecordSourceBuilder, sink::SinkBuilder, template::Template},
};

type JobResult<T> = Result<T, CsvEachError>;

/// Runs `config` against the files or standard streams it names.
///
/// Fatal conditions are checked in this order, each with its own error:
/// 1. missing template text
/// 2. template syntax
/// 3. input file that cannot be opened
/// 4. output file that cannot be created
///
/// then the render loop runs until end of input.
pub fn run(config: &RunConfig) -> JobResult<StepResult> {
    let template = compile(config)?;

    let input: Box<dyn Read> = match &config.input {
        Some(path) => {
            let file = File::open(path).map_err(|source| CsvEachError::OpenInput {
                path: path.clone(),
                source,
            })?;
            Box::new(file)
        }
        None => Box::new(io::stdin().lock()),
    };

    let output: Box<dyn Write> = match &config.output {
        Some(path) => {
            let file = File::create(path).map_err(|source| CsvEachError::CreateOutput {
                path: path.clone(),
                source,
            })?;
            Box::new(file)
        }
        None => Box::new(io::stdout().lock()),
    };

    stream(config, &template, input, BufWriter::new(output))
}

/// Runs `config` against the given streams; `config.input` and
/// `config.output` are ignored.
pub fn run_with<R: Read, W: Write>(config: &RunConfig, input: R, output: W) -> JobResult<StepResult> {
    let template = compile(config)?;
    stream(config, &template, input, output)
}

fn compile(config: &RunConfig) -> JobResult<Template> {
    if config.template.is_empty() {
        return Err(CsvEachError::MissingTemplate);
    }
    let template = Template::parse(config.template.as_str()).map_err(CsvEachError::TemplateParse)?;
    debug!("Compiled template {:?}", template.source());
    Ok(template)
}

fn stream<R: Read, W: Write>(
    config: &RunConfig,
    template: &Template,
    input: R,
    output: W,
) -> JobResult<StepResult> {
    let mut source = CsvRecordSourceBuilder::new()
        .delimiter(config.delimiter)
        .strict(config.strict)
        .from_reader(input);

    let mut sink = SinkBuilder::new()
        .delimiters(config.delimiters)
        .from_writer(output);

    let mut step = RenderStepBuilder::new(&mut source, template, &mut sink)
        .has_headers(config.has_headers)
        .skip_limit(config.skip_limit)
        .build();

    let result = step.execute()?;

    info!(
        "Rendered {} of {} records in {:?}",
        result.render_count, result.read_count, result.duration
    );

    Ok(result)
}

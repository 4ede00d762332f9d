use std::{
    io::Write,
    time::{Duration, Instant},
};

use log::{debug, error, warn};
use serde::Serialize;

use crate::{
    core::{
        context::{ContextBuilder, bind_header},
        item::{RecordSource, Renderer},
    },
    error::CsvEachError,
    item::sink::Sink,
};

/// Lifecycle of a [`RenderStep`].
///
/// `Init → HeaderBound → Streaming → Done`, or `Failed` from any state but
/// `Done`. An empty input goes from `Init` straight to `Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StepStatus {
    Init,
    HeaderBound,
    Streaming,
    Done,
    Failed,
}

/// Summary of a finished step.
#[derive(Debug, Serialize)]
pub struct StepResult {
    pub status: StepStatus,
    /// Number of header columns, 0 when headers are disabled
    pub header_columns: usize,
    /// Data records read, header excluded
    pub read_count: usize,
    /// Records rendered and written to the sink
    pub render_count: usize,
    /// Records dropped because their template execution failed
    pub skip_count: usize,
    #[serde(skip)]
    pub duration: Duration,
    pub duration_ms: u64,
}

#[derive(Default)]
struct Counts {
    header_columns: usize,
    read: usize,
    rendered: usize,
    skipped: usize,
}

/// The streaming render loop.
///
/// Reads one record at a time, binds it to the header, renders the template
/// into a scratch buffer reused across records and, when rendering succeeds,
/// writes the buffer followed by the record delimiters.
///
/// A render failure is fatal unless the skip limit allows it; a skipped
/// record writes nothing and does not consume an ordinal.
pub struct RenderStep<'a, W: Write> {
    source: &'a mut dyn RecordSource,
    renderer: &'a dyn Renderer,
    sink: &'a mut Sink<W>,
    has_headers: bool,
    skip_limit: usize,
    status: StepStatus,
}

impl<W: Write> RenderStep<'_, W> {
    /// Runs the loop until end of input or the first fatal error.
    ///
    /// The sink is flushed in both cases so that everything rendered before
    /// a failure stays in the output.
    pub fn execute(&mut self) -> Result<StepResult, CsvEachError> {
        let start = Instant::now();
        let mut counts = Counts::default();

        debug!("Start of step");

        let outcome = self.stream(&mut counts);
        let flushed = self.sink.flush();

        match outcome.and_then(|()| flushed.map_err(CsvEachError::from)) {
            Ok(()) => {
                self.status = StepStatus::Done;
                debug!(
                    "End of step: {} read, {} rendered, {} skipped",
                    counts.read, counts.rendered, counts.skipped
                );
                let duration = start.elapsed();
                Ok(StepResult {
                    status: self.status,
                    header_columns: counts.header_columns,
                    read_count: counts.read,
                    render_count: counts.rendered,
                    skip_count: counts.skipped,
                    duration,
                    duration_ms: duration.as_millis() as u64,
                })
            }
            Err(err) => {
                error!("Step failed in state {:?}: {}", self.status, err);
                self.status = StepStatus::Failed;
                Err(err)
            }
        }
    }

    fn stream(&mut self, counts: &mut Counts) -> Result<(), CsvEachError> {
        self.status = StepStatus::Init;

        let header = match bind_header(&mut *self.source, self.has_headers) {
            Ok(Some(header)) => header,
            Ok(None) => {
                debug!("Empty input: nothing to render");
                return Ok(());
            }
            Err(err) => return Err(CsvEachError::HeaderRead(err)),
        };
        counts.header_columns = header.len();
        self.status = StepStatus::HeaderBound;

        let mut builder = ContextBuilder::new(header);
        let mut buffer: Vec<u8> = Vec::new();

        self.status = StepStatus::Streaming;
        loop {
            let record = match self.source.read_record() {
                Ok(Some(record)) => record,
                Ok(None) => return Ok(()),
                Err(err) => return Err(CsvEachError::RecordRead(err)),
            };
            counts.read += 1;

            buffer.clear();
            let context = builder.build(record);
            if let Err(source) = self.renderer.render(&context, &mut buffer) {
                counts.skipped += 1;
                if counts.skipped > self.skip_limit {
                    return Err(CsvEachError::Render {
                        record: counts.read,
                        source,
                    });
                }
                warn!("Skipping record {}: {}", counts.read, source);
                continue;
            }

            self.sink.emit(&buffer)?;
            builder.advance();
            self.sink.end_record()?;
            counts.rendered += 1;
        }
    }

    pub fn get_status(&self) -> StepStatus {
        self.status
    }
}

/// Builder for a [`RenderStep`].
///
/// Headers are enabled and the skip limit is 0 unless configured otherwise.
pub struct RenderStepBuilder<'a, W: Write> {
    source: &'a mut dyn RecordSource,
    renderer: &'a dyn Renderer,
    sink: &'a mut Sink<W>,
    has_headers: bool,
    skip_limit: usize,
}

impl<'a, W: Write> RenderStepBuilder<'a, W> {
    pub fn new(
        source: &'a mut dyn RecordSource,
        renderer: &'a dyn Renderer,
        sink: &'a mut Sink<W>,
    ) -> Self {
        Self {
            source,
            renderer,
            sink,
            has_headers: true,
            skip_limit: 0,
        }
    }

    /// Whether the first record holds the column names.
    pub fn has_headers(mut self, yes: bool) -> Self {
        self.has_headers = yes;
        self
    }

    /// Number of records whose rendering may fail before the step fails.
    pub fn skip_limit(mut self, skip_limit: usize) -> Self {
        self.skip_limit = skip_limit;
        self
    }

    pub fn build(self) -> RenderStep<'a, W> {
        RenderStep {
            source: self.source,
            renderer: self.renderer,
            sink: self.sink,
            has_headers: self.has_headers,
            skip_limit: self.skip_limit,
            status: StepStatus::Init,
        }
    }
}

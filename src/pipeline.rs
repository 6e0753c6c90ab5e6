use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::Instant;
use tracing::info;

use crate::aggregate::aggregate;
use crate::error::ImportError;
use crate::rank::{rank, SortSpec};
use crate::report::render;
use crate::source::{open_csv, EmailStream, SourceOptions};
use crate::stats::{AggregationResult, DomainCount, ImportSummary, SourceStats};
use crate::utils::validate_args;
use crate::Args;

/// Runs the consumer side against `stream` and joins its producer.
///
/// Email fields the reader could not decode are added to `invalid_count`, so every data
/// row with an email column ends up either in a domain count or in the invalid count.
pub fn count_domains(
    mut stream: EmailStream,
) -> crate::error::Result<(AggregationResult, SourceStats)> {
    let mut result = aggregate(&mut stream);
    let source = stream.finish()?;
    result.invalid_count += source.undecodable_emails;
    Ok((result, source))
}

pub fn run_import(args: &Args) -> Result<ImportSummary> {
    let total_start_time = Instant::now();
    let spec = args.sort_spec();
    info!(
        action = "start",
        component = "pipeline",
        input = ?args.input,
        sort = %spec.key,
        order = %spec.order,
        "Starting customer import"
    );

    validate_args(args)?;
    let delimiter = u8::try_from(args.delimiter)
        .ok()
        .filter(u8::is_ascii)
        .with_context(|| format!("Delimiter {:?} is not an ASCII character", args.delimiter))?;
    let options = SourceOptions { delimiter };
    let stream = open_csv(&args.input, options)
        .with_context(|| format!("Failed to read CSV file {:?}", args.input))?;

    let (result, source) = count_domains(stream)?;
    info!(
        action = "summary",
        component = "pipeline",
        unique_domains = result.unique_domains(),
        invalid_emails = result.invalid_count,
        short_rows = source.short_rows,
        parse_errors = source.parse_errors,
        "Aggregation finished"
    );

    let ranked = rank(&result, spec);
    let lines_written = write_report(&ranked, args.output.as_deref())?;

    info!(
        action = "complete",
        component = "pipeline",
        lines_written,
        duration_ms = total_start_time.elapsed().as_millis(),
        "Import completed successfully"
    );

    Ok(ImportSummary {
        source,
        unique_domains: result.unique_domains(),
        invalid_emails: result.invalid_count,
        lines_written,
    })
}

/// Renders `ranked` to `output`, or to stdout when no path is given.
pub fn write_report(ranked: &[DomainCount], output: Option<&Path>) -> Result<usize> {
    let mut writer: Box<dyn Write> = match output {
        Some(path) => {
            info!(action = "open", component = "sink", path = ?path, "Writing report to file");
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file {:?}", path))?;
            Box::new(BufWriter::new(file))
        }
        None => {
            info!(action = "open", component = "sink", "Writing report to terminal");
            Box::new(BufWriter::new(io::stdout().lock()))
        }
    };

    let lines = render(ranked, writer.as_mut())?;
    writer.flush().map_err(ImportError::SinkWrite)?;
    Ok(lines)
}

use crossbeam_channel::Receiver;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::thread::JoinHandle;
use std::time::Instant;
use tracing::{debug, error, info, warn};

use crate::error::{ImportError, Result};
use crate::stats::SourceStats;

/// Rendezvous hand-off: each send blocks until the consumer takes the email.
pub const HANDOFF_CAPACITY: usize = 0;

/// Zero-based column holding the email address.
pub const EMAIL_COLUMN: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceOptions {
    pub delimiter: u8,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

/// Emails coming off the producer thread, in file order.
///
/// Iterating blocks until the producer sends the next email or closes the channel.
/// Call [`EmailStream::finish`] once done to join the producer and get its counters.
pub struct EmailStream {
    receiver: Receiver<String>,
    producer: JoinHandle<Result<SourceStats>>,
}

impl Iterator for EmailStream {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.receiver.recv().ok()
    }
}

impl EmailStream {
    /// Joins the producer thread.
    ///
    /// Emails not yet taken are discarded: the receiver is dropped first so a producer
    /// blocked on a send sees the disconnect and exits. A read failure that cut the
    /// stream short comes back as [`ImportError::SourceRead`].
    pub fn finish(self) -> Result<SourceStats> {
        let EmailStream { receiver, producer } = self;
        drop(receiver);
        producer.join().map_err(|_| ImportError::ProducerPanicked)?
    }
}

/// Opens `path` and starts streaming its emails.
///
/// An open failure is returned here, before any thread is started.
pub fn open_csv(path: &Path, options: SourceOptions) -> Result<EmailStream> {
    let file = File::open(path).map_err(|source| ImportError::SourceOpen {
        path: path.to_path_buf(),
        source,
    })?;

    info!(action = "open", component = "record_source", path = ?path, "Opened input file");
    Ok(stream_reader(file, options))
}

/// Starts a producer thread that parses `reader` as CSV and hands emails over one by one.
pub fn stream_reader<R>(reader: R, options: SourceOptions) -> EmailStream
where
    R: Read + Send + 'static,
{
    let (tx, rx) = crossbeam_channel::bounded(HANDOFF_CAPACITY);
    let mut csv_reader = build_reader(reader, options);

    let producer = std::thread::spawn(move || {
        let start_time = Instant::now();
        let outcome = read_emails(&mut csv_reader, |email| tx.send(email).is_ok());

        // Release the input before the consumer sees end-of-stream.
        drop(csv_reader);
        drop(tx);

        match &outcome {
            Ok(stats) => info!(
                action = "complete",
                component = "record_source",
                records_read = stats.records_read,
                emitted = stats.emitted,
                short_rows = stats.short_rows,
                parse_errors = stats.parse_errors,
                undecodable_emails = stats.undecodable_emails,
                duration_ms = start_time.elapsed().as_millis(),
                "Finished reading records"
            ),
            Err(e) => error!(
                action = "read",
                component = "record_source",
                error = %e,
                "Input read failed"
            ),
        }
        outcome
    });

    EmailStream {
        receiver: rx,
        producer,
    }
}

pub fn build_reader<R: Read>(reader: R, options: SourceOptions) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(options.delimiter)
        .from_reader(reader)
}

/// Walks every record of `reader`, passing the email column of each data row to `emit`.
///
/// The first record is the header and is dropped whatever it holds, even when it fails to
/// parse. Records are read as raw bytes; only the email column has to be UTF-8. Rows too
/// short to have an email column are counted and dropped. Malformed records are logged and
/// skipped. Stops early when `emit` returns `false`.
///
/// An I/O failure of the underlying reader ends the walk with [`ImportError::SourceRead`].
pub fn read_emails<R, F>(reader: &mut csv::Reader<R>, mut emit: F) -> Result<SourceStats>
where
    R: Read,
    F: FnMut(String) -> bool,
{
    let mut stats = SourceStats::default();
    let mut record = csv::ByteRecord::new();

    loop {
        match reader.read_byte_record(&mut record) {
            Ok(true) => {}
            Ok(false) => break,
            Err(source) if matches!(source.kind(), csv::ErrorKind::Io(_)) => {
                let line = source
                    .position()
                    .map_or(reader.position().line(), csv::Position::line);
                return Err(ImportError::SourceRead { line, source });
            }
            Err(source) => {
                stats.parse_errors += 1;
                stats.header_skipped = true;
                let line = source.position().map_or(0, csv::Position::line);
                let err = ImportError::RecordParse { line, source };
                warn!(
                    action = "skip",
                    component = "record_source",
                    line,
                    error = %err,
                    "Skipping malformed record"
                );
                continue;
            }
        }

        stats.records_read += 1;
        if !stats.header_skipped {
            stats.header_skipped = true;
            continue;
        }

        let Some(field) = record.get(EMAIL_COLUMN) else {
            stats.short_rows += 1;
            continue;
        };

        let email = match String::from_utf8(field.to_vec()) {
            Ok(email) => email,
            Err(e) => {
                stats.undecodable_emails += 1;
                let line = record.position().map_or(0, csv::Position::line);
                warn!(
                    action = "skip",
                    component = "record_source",
                    line,
                    error = %e,
                    "Skipping email that is not valid UTF-8"
                );
                continue;
            }
        };

        if !emit(email) {
            debug!(
                action = "stop",
                component = "record_source",
                "Consumer went away, stopping early"
            );
            break;
        }
        stats.emitted += 1;
    }

    Ok(stats)
}

use std::io::Write;
use tracing::error;

use crate::error::{ImportError, Result};
use crate::stats::DomainCount;

pub fn format_line(entry: &DomainCount) -> String {
    format!("{}: {}\n", entry.domain, entry.count)
}

/// Writes one `"<domain>: <count>"` line per entry, in order.
///
/// Each line is a single `write_all`. The first failing write aborts rendering;
/// lines already written stay written. Returns the number of lines written.
pub fn render<W: Write + ?Sized>(ranked: &[DomainCount], writer: &mut W) -> Result<usize> {
    for (written, entry) in ranked.iter().enumerate() {
        if let Err(e) = writer.write_all(format_line(entry).as_bytes()) {
            error!(
                action = "write",
                component = "reporter",
                lines_written = written,
                error = %e,
                "Report write failed"
            );
            return Err(ImportError::SinkWrite(e));
        }
    }
    Ok(ranked.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    /// Accepts `limit` writes, then fails every call.
    struct FailingSink {
        accepted: Vec<u8>,
        writes: usize,
        limit: usize,
    }

    impl Write for FailingSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.writes += 1;
            if self.writes > self.limit {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"));
            }
            self.accepted.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn ranked() -> Vec<DomainCount> {
        vec![
            DomainCount::new("test.com", 8),
            DomainCount::new("example.com", 5),
            DomainCount::new("alpha.com", 3),
        ]
    }

    #[test]
    fn renders_one_line_per_entry() {
        let mut out = Vec::new();
        let written = render(&ranked(), &mut out).unwrap();

        assert_eq!(written, 3);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "test.com: 8\nexample.com: 5\nalpha.com: 3\n"
        );
    }

    #[test]
    fn empty_list_renders_nothing() {
        let mut out = Vec::new();
        assert_eq!(render(&[], &mut out).unwrap(), 0);
        assert!(out.is_empty());
    }

    #[test]
    fn rendering_twice_is_identical() {
        let list = ranked();
        let mut first = Vec::new();
        let mut second = Vec::new();
        render(&list, &mut first).unwrap();
        render(&list, &mut second).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn stops_at_first_failed_write() {
        let mut sink = FailingSink {
            accepted: Vec::new(),
            writes: 0,
            limit: 1,
        };

        let err = render(&ranked(), &mut sink).unwrap_err();

        assert!(matches!(
            err,
            ImportError::SinkWrite(ref e) if e.kind() == io::ErrorKind::BrokenPipe
        ));
        assert_eq!(String::from_utf8(sink.accepted).unwrap(), "test.com: 8\n");
        assert_eq!(sink.writes, 2);
    }
}

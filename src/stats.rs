use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainCount {
    pub domain: String,
    pub count: u64,
}

impl DomainCount {
    pub fn new(domain: impl Into<String>, count: u64) -> Self {
        Self {
            domain: domain.into(),
            count,
        }
    }
}

/// Per-domain counts for one run, plus the number of emails that had no usable domain.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AggregationResult {
    pub domain_counts: HashMap<String, u64>,
    pub invalid_count: u64,
}

impl AggregationResult {
    pub fn unique_domains(&self) -> usize {
        self.domain_counts.len()
    }

    /// Number of emails that produced a domain.
    pub fn valid_count(&self) -> u64 {
        self.domain_counts.values().sum()
    }
}

/// What the record reader saw while streaming the input.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SourceStats {
    pub records_read: u64,
    pub header_skipped: bool,
    pub short_rows: u64,
    pub parse_errors: u64,
    /// Email fields that were not valid UTF-8. They never reach extraction.
    pub undecodable_emails: u64,
    pub emitted: u64,
}

impl SourceStats {
    /// Data rows that parsed, i.e. everything but the header.
    pub fn data_rows(&self) -> u64 {
        self.emitted + self.undecodable_emails + self.short_rows
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    pub source: SourceStats,
    pub unique_domains: usize,
    pub invalid_emails: u64,
    pub lines_written: usize,
}

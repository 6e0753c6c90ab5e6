use clap::ValueEnum;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::ImportError;
use crate::stats::{AggregationResult, DomainCount};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SortKey {
    /// Alphabetical by domain
    #[default]
    Name,
    /// By number of uses
    Count,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortKey {
    /// Order used when none is given: names ascending, counts most-used first.
    pub fn default_order(self) -> SortOrder {
        match self {
            SortKey::Name => SortOrder::Asc,
            SortKey::Count => SortOrder::Desc,
        }
    }
}

impl FromStr for SortKey {
    type Err = ImportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "name" => Ok(SortKey::Name),
            "count" => Ok(SortKey::Count),
            _ => Err(ImportError::InvalidSortKey(s.to_string())),
        }
    }
}

impl FromStr for SortOrder {
    type Err = ImportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(ImportError::InvalidSortOrder(s.to_string())),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortKey::Name => "name",
            SortKey::Count => "count",
        })
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        })
    }
}

/// A sort key together with its resolved direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub key: SortKey,
    pub order: SortOrder,
}

impl SortSpec {
    pub fn new(key: SortKey, order: Option<SortOrder>) -> Self {
        Self {
            key,
            order: order.unwrap_or_else(|| key.default_order()),
        }
    }

    /// Builds a `SortSpec` from raw strings. Blank values fall back to the defaults.
    pub fn from_strs(key: &str, order: &str) -> Result<Self, ImportError> {
        let key = match key.trim() {
            "" => SortKey::default(),
            k => k.parse()?,
        };
        let order = match order.trim() {
            "" => None,
            o => Some(o.parse()?),
        };
        Ok(Self::new(key, order))
    }
}

impl Default for SortSpec {
    fn default() -> Self {
        Self::new(SortKey::default(), None)
    }
}

/// Orders the aggregated counts for reporting.
///
/// Equal counts are broken by domain name ascending, whatever the direction,
/// so the output does not depend on hash map iteration order.
pub fn rank(result: &AggregationResult, spec: SortSpec) -> Vec<DomainCount> {
    let mut ranked: Vec<DomainCount> = result
        .domain_counts
        .iter()
        .map(|(domain, count)| DomainCount::new(domain.as_str(), *count))
        .collect();

    ranked.sort_unstable_by(|a, b| compare(a, b, spec));
    ranked
}

fn compare(a: &DomainCount, b: &DomainCount, spec: SortSpec) -> Ordering {
    let by_name = a.domain.cmp(&b.domain);
    match (spec.key, spec.order) {
        (SortKey::Name, SortOrder::Asc) => by_name,
        (SortKey::Name, SortOrder::Desc) => by_name.reverse(),
        (SortKey::Count, SortOrder::Asc) => a.count.cmp(&b.count).then(by_name),
        (SortKey::Count, SortOrder::Desc) => b.count.cmp(&a.count).then(by_name),
    }
}

pub mod aggregate;
pub mod args;
pub mod domain;
pub mod error;
pub mod pipeline;
pub mod rank;
pub mod report;
pub mod source;
pub mod stats;
pub mod utils;

pub use aggregate::aggregate;
pub use args::Args;
pub use domain::extract_domain;
pub use error::ImportError;
pub use pipeline::run_import;
pub use rank::{rank, SortKey, SortOrder, SortSpec};
pub use report::render;
pub use source::{open_csv, stream_reader, EmailStream, SourceOptions};
pub use stats::{AggregationResult, DomainCount, ImportSummary, SourceStats};

use clap::Parser;
use std::path::PathBuf;

use crate::rank::{SortKey, SortOrder, SortSpec};

const EXAMPLES: &str = "Examples:
  customercli customers.csv
  customercli --sort=count customers.csv
  customercli --sort=count --order=asc --output=result.txt customers.csv";

#[derive(Parser, Debug)]
#[command(
    name = "customercli",
    about = "Count the email domains used by the customers in a CSV file",
    version,
    long_about = None,
    after_help = EXAMPLES
)]
pub struct Args {
    /// Path to the CSV file (header row first, email in the third column)
    pub input: PathBuf,

    /// Sort domains by name (alphabetical) or count (number of uses)
    #[arg(short, long, value_enum, ignore_case = true, default_value_t = SortKey::Name)]
    pub sort: SortKey,

    /// Sort direction [default: asc for name, desc for count]
    #[arg(long, value_enum, ignore_case = true)]
    pub order: Option<SortOrder>,

    /// Write the report to a file instead of the terminal
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Field delimiter of the input file
    #[arg(short, long, default_value_t = ',')]
    pub delimiter: char,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn sort_spec(&self) -> SortSpec {
        SortSpec::new(self.sort, self.order)
    }
}

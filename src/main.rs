use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use customer_importer::{run_import, utils, Args};

fn main() -> Result<()> {
    let args = Args::parse();
    utils::setup_logging(args.verbose);

    match run_import(&args) {
        Ok(summary) => {
            info!(
                action = "summary",
                component = "main",
                unique_domains = summary.unique_domains,
                invalid_emails = summary.invalid_emails,
                "Output successfully written"
            );
            Ok(())
        }
        Err(e) => {
            error!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

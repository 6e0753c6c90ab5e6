use std::fs;
use std::path::Path;
use time::macros::format_description;
use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Logs go to stderr; stdout is left for the report.
///
/// `RUST_LOG` wins when set, otherwise `--verbose` picks `info` over `warn`.
pub fn setup_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let timer = LocalTime::new(format_description!(
        "[hour]:[minute]:[second].[subsecond digits:3]"
    ));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(timer)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

pub fn validate_args(args: &crate::args::Args) -> anyhow::Result<()> {
    if !args.delimiter.is_ascii() {
        anyhow::bail!("--delimiter must be a single ASCII character");
    }

    if let Some(output) = &args.output {
        if same_file(output, &args.input) {
            anyhow::bail!("--output must not point at the input file");
        }
    }

    Ok(())
}

/// True when both paths name the same file. Paths that do not exist yet only match literally.
fn same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

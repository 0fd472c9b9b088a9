use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use noscript_html::batch::{self, FileOutcome};
use noscript_html::{Cleaner, FsStorage, NameMatching, Result, StdoutStorage};

/// Strip scripts, event handlers and unsafe resource URLs from HTML files.
#[derive(Parser, Debug)]
#[command(name = "noscripthtml", version, arg_required_else_help = true)]
struct Cli {
    /// HTML files to sanitize.
    #[arg(value_name = "INPUT", required = true)]
    inputs: Vec<PathBuf>,

    /// Write each result to DIR/<file name> instead of standard output.
    /// Repeated file names get a counter (`page-2.html`).
    #[arg(long, short = 'o', value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// Compare attribute names ASCII case-insensitively.
    #[arg(long)]
    ignore_case: bool,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(long, short = 'v', action = clap::ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,

    /// Only report failures, not per-file removal counts.
    #[arg(long, short = 'q')]
    quiet: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let matching = if cli.ignore_case {
        NameMatching::AsciiCaseInsensitive
    } else {
        NameMatching::Exact
    };
    let cleaner = Cleaner::builder().name_matching(matching).build();

    let outcomes = match &cli.out_dir {
        Some(dir) => batch::run(&cleaner, &cli.inputs, &FsStorage::new(dir)).await,
        None => batch::run(&cleaner, &cli.inputs, &StdoutStorage::new()).await,
    };

    summarize(&outcomes)
}

fn init_logging(verbose: u8, quiet: bool) {
    let default_level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "info",
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal())
                .with_target(false),
        )
        .init();
}

/// Log what each file lost. Failures were already logged by the batch run.
fn summarize(outcomes: &[Result<FileOutcome>]) -> ExitCode {
    let mut failed = false;
    for outcome in outcomes {
        match outcome {
            Ok(done) => {
                for finding in done.report.findings() {
                    tracing::debug!("{}: {finding}", done.path.display());
                }
                tracing::info!(
                    "{} -> {}: removed {} script nodes, blanked {} values, stripped {} attributes",
                    done.path.display(),
                    done.key,
                    done.report.removed_subtrees(),
                    done.report.blanked_values(),
                    done.report.stripped_attributes()
                );
            }
            Err(_) => failed = true,
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

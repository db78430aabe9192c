//! Journal file size check
//!
//! Prints one status line and exits with the monitoring plugin exit code.
//!
//! # Example
//!
//! ```bash
//! # Default: CRITICAL when the journal is smaller than 500 bytes
//! check_journalfile
//!
//! # Custom threshold with performance data
//! check_journalfile --critical 4096: --perfdata
//!
//! # Debug logging on stderr
//! check_journalfile -vv
//! ```

use std::io::Write;

use clap::Parser;
use journalfile_check::{journal_check, CheckConfig, ServiceState};
use tracing::Dispatch;
use tracing_subscriber::EnvFilter;

// =============================================================================
// Command Line
// =============================================================================

/// Check the size of the systemd journal file
#[derive(Parser, Debug)]
#[command(name = "check_journalfile", version, about)]
struct Cli {
    /// Return critical if the file size is outside RANGE
    #[arg(short, long, value_name = "RANGE", default_value = journalfile_check::config::DEFAULT_CRITICAL)]
    critical: String,

    /// Glob pattern locating the journal file
    #[arg(
        short,
        long,
        value_name = "GLOB",
        env = "CHECK_JOURNALFILE_PATTERN",
        default_value = journalfile_check::config::DEFAULT_PATTERN
    )]
    pattern: String,

    /// Append performance data to the status line
    #[arg(long)]
    perfdata: bool,

    /// Log to stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn into_config(self) -> CheckConfig {
        CheckConfig {
            pattern: self.pattern,
            critical: self.critical,
            perfdata: self.perfdata,
            dispatch: log_dispatch(self.verbose),
        }
    }
}

/// Build a stderr log sink for the requested verbosity
///
/// `RUST_LOG` takes precedence over the verbosity flags when set.
fn log_dispatch(verbosity: u8) -> Dispatch {
    let level = match verbosity {
        0 => return Dispatch::none(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("journalfile_check={level}")));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .finish();

    Dispatch::new(subscriber)
}

/// Print the status line and exit
///
/// A closed or broken stdout must not turn into a panic; the exit code
/// still reaches the monitoring agent.
fn report(line: &str, state: ServiceState) -> ! {
    let mut stdout = std::io::stdout().lock();
    let _ = writeln!(stdout, "{line}").and_then(|()| stdout.flush());
    std::process::exit(state.exit_code());
}

// =============================================================================
// Main Entry Point
// =============================================================================

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            // Usage errors must not look like CRITICAL (clap exits with 2)
            let _ = e.print();
            std::process::exit(ServiceState::Unknown.exit_code());
        }
    };

    let config = cli.into_config();
    let check = match journal_check(&config) {
        Ok(check) => check,
        Err(e) => report(&e.to_string(), ServiceState::Unknown),
    };

    let outcome = check.run();
    report(&outcome.status_line(config.perfdata), outcome.state);
}

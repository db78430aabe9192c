//! Journal File Check
//!
//! A monitoring plugin that measures the size of the systemd system
//! journal and reports it using the Nagios/Icinga plugin conventions: one
//! line of text on standard output and an exit code of 0 (OK), 1 (WARNING),
//! 2 (CRITICAL) or 3 (UNKNOWN).
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  metrics  ┌──────────────┐  results  ┌──────────────┐
//! │   Resource   │──────────▶│   Contexts   │──────────▶│   Summary    │
//! │ (JournalFile)│           │ warn / crit  │           │ ok / problem │
//! └──────────────┘           └──────────────┘           └──────┬───────┘
//!                                                              │
//!                                                       ┌──────▼───────┐
//!                                                       │   Outcome    │
//!                                                       │ line + exit  │
//!                                                       └──────────────┘
//! ```
//!
//! - [`Resource`]: produces [`Metric`]s, here the journal file size
//! - [`Context`]: classifies a metric against warning/critical [`Range`]s
//! - [`CheckResults`]: ordered results with the worst state derived
//! - [`Summary`]: formats the text for OK and non-OK runs
//! - [`Check`]: runs the cycle once and never fails; errors become UNKNOWN
//!
//! # Example
//!
//! ```rust,ignore
//! use journalfile_check::{journal_check, CheckConfig};
//!
//! let check = journal_check(&CheckConfig::default())?;
//! let outcome = check.run();
//! println!("{}", outcome.status_line(false));
//! std::process::exit(outcome.exit_code());
//! ```

pub mod check;
pub mod config;
pub mod context;
pub mod error;
pub mod journal;
pub mod range;
pub mod result;
pub mod types;

pub use check::{Check, CheckBuilder, DefaultSummary, Outcome, Resource, Summary};
pub use config::CheckConfig;
pub use context::{Context, Contexts};
pub use error::{Error, ProbeError, RangeError, Result};
pub use journal::{journal_check, JournalFile, JournalFileSummary, JOURNAL_CONTEXT};
pub use range::Range;
pub use result::{CheckResult, CheckResults};
pub use types::{Metric, ServiceState};

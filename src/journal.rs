//! Journal file size check
//!
//! Locates the systemd system journal with a glob pattern and reports its
//! size in bytes. A journal file that is (nearly) empty usually means
//! journald failed to write to it.
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

use std::fs;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::check::{Check, Resource, Summary};
use crate::config::CheckConfig;
use crate::context::Context;
use crate::error::{ProbeError, Result};
use crate::result::CheckResults;
use crate::types::Metric;

/// Context evaluating the journal size metric
pub const JOURNAL_CONTEXT: &str = "journal_size";

// ============================================================================
// Resource
// ============================================================================

/// The system journal file
#[derive(Debug, Clone)]
pub struct JournalFile {
    pattern: String,
}

impl JournalFile {
    /// Create a resource for the files matching `pattern`
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }

    /// Find the journal file
    ///
    /// With several matches the lexicographically smallest path wins, so
    /// repeated runs measure the same file regardless of directory order.
    /// When nothing matches but a directory could not be read, that read
    /// error is reported instead of [`ProbeError::NoMatch`].
    pub fn locate(&self) -> std::result::Result<PathBuf, ProbeError> {
        let entries = glob::glob(&self.pattern).map_err(|e| ProbeError::InvalidPattern {
            pattern: self.pattern.clone(),
            reason: e.to_string(),
        })?;

        let mut found: Option<PathBuf> = None;
        let mut unreadable: Option<glob::GlobError> = None;
        for entry in entries {
            match entry {
                Ok(path) => {
                    debug!(path = %path.display(), "Candidate journal file");
                    if found.as_ref().map_or(true, |current| path < *current) {
                        found = Some(path);
                    }
                }
                Err(e) => {
                    debug!(error = %e, "Skipping unreadable path");
                    unreadable.get_or_insert(e);
                }
            }
        }

        match (found, unreadable) {
            (Some(path), _) => Ok(path),
            (None, Some(e)) => Err(ProbeError::Unreadable {
                path: e.path().to_path_buf(),
                source: e.into_error(),
            }),
            (None, None) => Err(ProbeError::NoMatch {
                pattern: self.pattern.clone(),
            }),
        }
    }
}

impl Resource for JournalFile {
    fn name(&self) -> &str {
        "journalfile"
    }

    fn probe(&self) -> Result<Vec<Metric>> {
        let path = self.locate()?;
        let size = fs::metadata(&path)
            .map_err(|source| ProbeError::Metadata {
                path: path.clone(),
                source,
            })?
            .len();

        info!(path = %path.display(), size, "Journal file measured");

        Ok(vec![Metric::new(path.display().to_string(), size as f64, "B")
            .with_min(0.0)
            .with_context(JOURNAL_CONTEXT)])
    }
}

// ============================================================================
// Summary
// ============================================================================

/// Renders `path: size` for every reported journal file
#[derive(Debug, Clone, Copy, Default)]
pub struct JournalFileSummary;

impl Summary for JournalFileSummary {
    fn ok(&self, results: &CheckResults) -> String {
        results
            .iter()
            .map(|r| format!("{}: {}", r.metric.name, r.metric.value))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn problem(&self, results: &CheckResults) -> String {
        results
            .most_significant()
            .iter()
            .map(|r| r.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

// ============================================================================
// Assembly
// ============================================================================

/// Build the journal file check from its configuration
///
/// Fails only when the critical range cannot be parsed.
pub fn journal_check(config: &CheckConfig) -> Result<Check> {
    let critical = config.critical_range()?;

    Check::builder()
        .with_resource(JournalFile::new(config.pattern.clone()))
        .with_context(Context::new(JOURNAL_CONTEXT).with_critical(critical))
        .with_summary(JournalFileSummary)
        .with_dispatch(config.dispatch.clone())
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::types::ServiceState;
    use tempfile::TempDir;

    fn create_journal(root: &TempDir, machine_id: &str, size: usize) -> PathBuf {
        let dir = root.path().join(machine_id);
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("system.journal");
        fs::write(&path, vec![0u8; size]).unwrap();
        path
    }

    fn pattern(root: &TempDir) -> String {
        format!("{}/*/system.journal", root.path().display())
    }

    #[test]
    fn test_probe_reports_size() {
        let root = TempDir::new().unwrap();
        let path = create_journal(&root, "0123abcd", 1234);

        let metrics = JournalFile::new(pattern(&root)).probe().unwrap();
        assert_eq!(metrics.len(), 1);

        let metric = &metrics[0];
        assert_eq!(metric.name, path.display().to_string());
        assert_eq!(metric.value, 1234.0);
        assert_eq!(metric.uom, "B");
        assert_eq!(metric.min, Some(0.0));
        assert_eq!(metric.max, None);
        assert_eq!(metric.context, JOURNAL_CONTEXT);
    }

    #[test]
    fn test_locate_picks_smallest_path() {
        let root = TempDir::new().unwrap();
        create_journal(&root, "ffff", 10);
        let expected = create_journal(&root, "aaaa", 20);
        create_journal(&root, "bbbb", 30);

        let resource = JournalFile::new(pattern(&root));
        assert_eq!(resource.locate().unwrap(), expected);
    }

    #[test]
    fn test_locate_no_match() {
        let root = TempDir::new().unwrap();
        let err = JournalFile::new(pattern(&root)).locate().unwrap_err();
        assert!(matches!(err, ProbeError::NoMatch { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_directory_is_reported() {
        use std::os::unix::fs::PermissionsExt;

        let root = TempDir::new().unwrap();
        create_journal(&root, "m1", 12000);
        fs::set_permissions(root.path(), fs::Permissions::from_mode(0o300)).unwrap();

        // Permission bits do not apply to root
        let listable = fs::read_dir(root.path()).is_ok();

        let config = CheckConfig {
            pattern: pattern(&root),
            ..CheckConfig::default()
        };
        let outcome = journal_check(&config).unwrap().run();

        fs::set_permissions(root.path(), fs::Permissions::from_mode(0o700)).unwrap();

        if listable {
            return;
        }
        assert_eq!(outcome.state, ServiceState::Unknown);
        assert!(outcome
            .summary
            .starts_with(&format!("cannot read {}: ", root.path().display())));
        assert!(!outcome.summary.contains("no journal file matches"));
    }

    #[test]
    fn test_locate_invalid_pattern() {
        let err = JournalFile::new("/var/log/journal/[/system.journal")
            .locate()
            .unwrap_err();
        assert!(matches!(err, ProbeError::InvalidPattern { .. }));
    }

    #[test]
    fn test_summary_formats() {
        let context = Context::new(JOURNAL_CONTEXT)
            .with_critical(crate::range::Range::parse("500:").unwrap());
        let mut results = CheckResults::new();
        results.add(crate::result::CheckResult::evaluate(
            Metric::new("/j/a/system.journal", 12000.0, "B").with_context(JOURNAL_CONTEXT),
            &context,
        ));
        results.add(crate::result::CheckResult::evaluate(
            Metric::new("/j/b/system.journal", 200.0, "B").with_context(JOURNAL_CONTEXT),
            &context,
        ));

        assert_eq!(
            JournalFileSummary.ok(&results),
            "/j/a/system.journal: 12000, /j/b/system.journal: 200"
        );
        assert_eq!(
            JournalFileSummary.problem(&results),
            "/j/b/system.journal: 200B"
        );
    }

    #[test]
    fn test_journal_check_rejects_bad_range() {
        let config = CheckConfig {
            critical: "abc".to_string(),
            ..CheckConfig::default()
        };
        assert!(matches!(journal_check(&config), Err(Error::Parse(_))));
    }

    #[test]
    fn test_journal_check_states() {
        let root = TempDir::new().unwrap();
        let path = create_journal(&root, "m1", 200);
        let config = CheckConfig {
            pattern: pattern(&root),
            ..CheckConfig::default()
        };

        let outcome = journal_check(&config).unwrap().run();
        assert_eq!(outcome.state, ServiceState::Critical);
        assert_eq!(outcome.summary, format!("{}: 200B", path.display()));

        fs::write(&path, vec![0u8; 500]).unwrap();
        let outcome = journal_check(&config).unwrap().run();
        assert_eq!(outcome.state, ServiceState::Ok);
        assert_eq!(outcome.summary, format!("{}: 500", path.display()));
    }
}

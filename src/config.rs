//! Check configuration
//!
//! There is no configuration file; the binary fills [`CheckConfig`] from
//! its command line and everything else keeps the defaults below.

use std::fmt;

use tracing::Dispatch;

use crate::error::Result;
use crate::range::Range;

/// Where systemd keeps the persistent system journal
pub const DEFAULT_PATTERN: &str = "/var/log/journal/*/system.journal";

/// Journal files below 500 bytes are considered broken
pub const DEFAULT_CRITICAL: &str = "500:";

/// Configuration of the journal file check
#[derive(Clone)]
pub struct CheckConfig {
    /// Glob pattern locating the journal file
    pub pattern: String,

    /// Critical range for the file size in bytes
    pub critical: String,

    /// Append performance data to the status line
    pub perfdata: bool,

    /// Log sink for the check run; `Dispatch::none()` discards everything
    pub dispatch: Dispatch,
}

fn default_pattern() -> String {
    DEFAULT_PATTERN.to_string()
}

fn default_critical() -> String {
    DEFAULT_CRITICAL.to_string()
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            pattern: default_pattern(),
            critical: default_critical(),
            perfdata: false,
            dispatch: Dispatch::none(),
        }
    }
}

impl CheckConfig {
    /// Parse the critical range
    pub fn critical_range(&self) -> Result<Range> {
        Ok(Range::parse(&self.critical)?)
    }
}

impl fmt::Debug for CheckConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckConfig")
            .field("pattern", &self.pattern)
            .field("critical", &self.critical)
            .field("perfdata", &self.perfdata)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_config_default() {
        let config = CheckConfig::default();
        assert_eq!(config.pattern, "/var/log/journal/*/system.journal");
        assert_eq!(config.critical, "500:");
        assert!(!config.perfdata);
    }

    #[test]
    fn test_critical_range() {
        let config = CheckConfig::default();
        let range = config.critical_range().unwrap();
        assert_eq!(range.start, 500.0);
        assert!(range.is_violated(499.0));

        let config = CheckConfig {
            critical: "10:5".to_string(),
            ..CheckConfig::default()
        };
        assert!(matches!(config.critical_range(), Err(Error::Parse(_))));
    }
}

//! Threshold ranges
//!
//! Ranges use the compact monitoring-plugin syntax:
//!
//! ```text
//! [@][start:][end]
//! ```
//!
//! - `10`     → `0:10`, alert outside 0..=10
//! - `10:`    → alert below 10
//! - `~:10`   → alert above 10 (open start)
//! - `10:20`  → alert outside 10..=20
//! - `@10:20` → alert inside 10..=20
//!
//! Both bounds are inclusive. An empty string is the range `0:` which
//! accepts every non-negative value.

use std::fmt;
use std::str::FromStr;

use crate::error::RangeError;

/// A parsed threshold range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    /// Lower bound, `-inf` when open
    pub start: f64,
    /// Upper bound, `+inf` when open
    pub end: f64,
    /// Alert when the value is inside rather than outside
    pub invert: bool,
}

impl Default for Range {
    fn default() -> Self {
        Self {
            start: 0.0,
            end: f64::INFINITY,
            invert: false,
        }
    }
}

impl Range {
    /// Parse a range from its compact string form
    pub fn parse(spec: &str) -> Result<Self, RangeError> {
        let spec = spec.trim();
        let (invert, body) = match spec.strip_prefix('@') {
            Some(rest) => (true, rest),
            None => (false, spec),
        };

        let (start, end) = match body.split_once(':') {
            Some((_, end)) if end.contains(':') => {
                return Err(RangeError::TooManySeparators(spec.to_string()));
            }
            Some((start, end)) => (start, end),
            None => ("", body),
        };

        let start = if start == "~" {
            f64::NEG_INFINITY
        } else {
            parse_bound(start, 0.0)?
        };
        let end = parse_bound(end, f64::INFINITY)?;

        if start > end {
            return Err(RangeError::StartGreaterThanEnd { start, end });
        }

        Ok(Self { start, end, invert })
    }

    /// Check if a value lies within `start..=end`, ignoring inversion
    pub fn contains(&self, value: f64) -> bool {
        self.start <= value && value <= self.end
    }

    /// Check if a value is acceptable under this range
    ///
    /// Returns `true` when no alert should be raised.
    pub fn matches(&self, value: f64) -> bool {
        self.contains(value) != self.invert
    }

    /// Check if a value violates this range
    pub fn is_violated(&self, value: f64) -> bool {
        !self.matches(value)
    }
}

fn parse_bound(atom: &str, default: f64) -> Result<f64, RangeError> {
    if atom.is_empty() {
        return Ok(default);
    }
    let value: f64 = atom
        .parse()
        .map_err(|_| RangeError::InvalidNumber(atom.to_string()))?;
    if !value.is_finite() {
        return Err(RangeError::NonFiniteBound(atom.to_string()));
    }
    Ok(value)
}

impl FromStr for Range {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Range::parse(s)
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.invert {
            f.write_str("@")?;
        }
        if self.start == f64::NEG_INFINITY {
            f.write_str("~:")?;
        } else if self.start != 0.0 {
            write!(f, "{}:", self.start)?;
        }
        if self.end != f64::INFINITY {
            write!(f, "{}", self.end)?;
        }
        Ok(())
    }
}

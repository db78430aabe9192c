//! Core data types used throughout the check

use std::fmt;

// ============================================================================
// Service State
// ============================================================================

/// Severity of a check result
///
/// Variants are declared from best to worst, so `Ord` picks the most
/// severe state and `max()` over a set of results yields the aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ServiceState {
    /// Value within all thresholds
    Ok,

    /// Warning threshold violated
    Warning,

    /// Critical threshold violated
    Critical,

    /// State could not be determined
    Unknown,
}

impl ServiceState {
    /// Process exit code for this state
    pub fn exit_code(self) -> i32 {
        match self {
            ServiceState::Ok => 0,
            ServiceState::Warning => 1,
            ServiceState::Critical => 2,
            ServiceState::Unknown => 3,
        }
    }

    /// Check if the state is OK
    pub fn is_ok(self) -> bool {
        matches!(self, ServiceState::Ok)
    }
}

impl fmt::Display for ServiceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ServiceState::Ok => "OK",
            ServiceState::Warning => "WARNING",
            ServiceState::Critical => "CRITICAL",
            ServiceState::Unknown => "UNKNOWN",
        };
        f.write_str(text)
    }
}

// ============================================================================
// Metric
// ============================================================================

/// A single named measurement
#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    /// Metric name, unique within one run
    pub name: String,

    /// Measured value
    pub value: f64,

    /// Unit of measure, appended to the value for display (e.g. "B")
    pub uom: String,

    /// Lowest possible value, reported in performance data only
    pub min: Option<f64>,

    /// Highest possible value, reported in performance data only
    pub max: Option<f64>,

    /// Name of the context that evaluates this metric
    pub context: String,
}

impl Metric {
    /// Create a new metric bound to the context of the same name
    pub fn new(name: impl Into<String>, value: f64, uom: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            context: name.clone(),
            name,
            value,
            uom: uom.into(),
            min: None,
            max: None,
        }
    }

    /// Set the lower value bound
    pub fn with_min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Set the upper value bound
    pub fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Bind the metric to a differently named context
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }

    /// Value followed by its unit, e.g. `12000B`
    pub fn value_unit(&self) -> String {
        format!("{}{}", self.value, self.uom)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.uom)
    }
}

//! Metric evaluation contexts
//!
//! A [`Context`] holds the warning and critical ranges for one kind of
//! metric and turns a [`Metric`] into a [`ServiceState`]. Contexts are
//! looked up by the metric's `context` name through [`Contexts`].

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::range::Range;
use crate::types::{Metric, ServiceState};

// ============================================================================
// Context
// ============================================================================

/// Scalar threshold context
#[derive(Debug, Clone, PartialEq)]
pub struct Context {
    /// Key matched against `Metric::context`
    pub name: String,

    /// Range outside of which the metric is WARNING
    pub warning: Option<Range>,

    /// Range outside of which the metric is CRITICAL
    pub critical: Option<Range>,
}

impl Context {
    /// Create a context without thresholds; it always evaluates to OK
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            warning: None,
            critical: None,
        }
    }

    /// Set the warning range
    pub fn with_warning(mut self, range: Range) -> Self {
        self.warning = Some(range);
        self
    }

    /// Set the critical range
    pub fn with_critical(mut self, range: Range) -> Self {
        self.critical = Some(range);
        self
    }

    /// Classify a metric
    ///
    /// The critical range is tested first so a value violating both
    /// ranges reports CRITICAL.
    pub fn evaluate(&self, metric: &Metric) -> ServiceState {
        if self.critical.is_some_and(|r| r.is_violated(metric.value)) {
            return ServiceState::Critical;
        }
        if self.warning.is_some_and(|r| r.is_violated(metric.value)) {
            return ServiceState::Warning;
        }
        ServiceState::Ok
    }

    /// Render the metric as a performance data item
    ///
    /// Format: `'label'=value[uom];[warn];[crit];[min];[max]`, trailing
    /// empty fields dropped.
    pub fn performance(&self, metric: &Metric) -> String {
        let fields = [
            format!("{}={}", quote_label(&metric.name), metric.value_unit()),
            self.warning.map(|r| r.to_string()).unwrap_or_default(),
            self.critical.map(|r| r.to_string()).unwrap_or_default(),
            metric.min.map(|v| v.to_string()).unwrap_or_default(),
            metric.max.map(|v| v.to_string()).unwrap_or_default(),
        ];
        fields.join(";").trim_end_matches(';').to_string()
    }
}

fn quote_label(label: &str) -> String {
    let plain = !label.is_empty()
        && label
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    if plain {
        label.to_string()
    } else {
        format!("'{}'", label.replace('\'', "''"))
    }
}

// ============================================================================
// Context Registry
// ============================================================================

/// Contexts indexed by name
#[derive(Debug, Clone, Default)]
pub struct Contexts {
    by_name: HashMap<String, Context>,
}

impl Contexts {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a context, replacing any previous one of the same name
    pub fn add(&mut self, context: Context) {
        self.by_name.insert(context.name.clone(), context);
    }

    /// Find the context responsible for a metric
    pub fn lookup(&self, metric: &Metric) -> Result<&Context> {
        self.by_name.get(&metric.context).ok_or_else(|| {
            Error::Configuration(format!(
                "no context '{}' for metric {}",
                metric.context, metric.name
            ))
        })
    }

    /// Number of registered contexts
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Check if no context is registered
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

//! Check builder and runner

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, error, warn, Dispatch};

use super::traits::{DefaultSummary, Resource, Summary};
use crate::context::{Context, Contexts};
use crate::error::{Error, Result};
use crate::result::{CheckResult, CheckResults};
use crate::types::ServiceState;

// ============================================================================
// Builder
// ============================================================================

/// Builder for assembling a check from its parts
pub struct CheckBuilder {
    resource: Option<Box<dyn Resource>>,
    contexts: Contexts,
    summary: Option<Box<dyn Summary>>,
    dispatch: Option<Dispatch>,
}

impl CheckBuilder {
    /// Create a new check builder
    pub fn new() -> Self {
        Self {
            resource: None,
            contexts: Contexts::new(),
            summary: None,
            dispatch: None,
        }
    }

    /// Set the resource to probe
    pub fn with_resource<R>(mut self, resource: R) -> Self
    where
        R: Resource + 'static,
    {
        self.resource = Some(Box::new(resource));
        self
    }

    /// Register an evaluation context
    pub fn with_context(mut self, context: Context) -> Self {
        self.contexts.add(context);
        self
    }

    /// Set a custom summary; defaults to [`DefaultSummary`]
    pub fn with_summary<S>(mut self, summary: S) -> Self
    where
        S: Summary + 'static,
    {
        self.summary = Some(Box::new(summary));
        self
    }

    /// Route log events of this check to `dispatch`
    ///
    /// Without one, events go nowhere.
    pub fn with_dispatch(mut self, dispatch: Dispatch) -> Self {
        self.dispatch = Some(dispatch);
        self
    }

    /// Build the check
    pub fn build(self) -> Result<Check> {
        let resource = self
            .resource
            .ok_or_else(|| Error::Configuration("No resource configured".to_string()))?;

        Ok(Check {
            resource,
            contexts: self.contexts,
            summary: self.summary.unwrap_or_else(|| Box::new(DefaultSummary)),
            dispatch: self.dispatch.unwrap_or_else(Dispatch::none),
        })
    }
}

impl Default for CheckBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Check
// ============================================================================

/// A single probe / evaluate / report cycle
pub struct Check {
    resource: Box<dyn Resource>,
    contexts: Contexts,
    summary: Box<dyn Summary>,
    dispatch: Dispatch,
}

impl Check {
    /// Start building a check
    pub fn builder() -> CheckBuilder {
        CheckBuilder::new()
    }

    /// Run the check
    ///
    /// Never fails: every error becomes an UNKNOWN outcome carrying the
    /// error text. A panicking resource or summary is reported the same
    /// way with the panic message.
    pub fn run(&self) -> Outcome {
        tracing::dispatcher::with_default(&self.dispatch, || {
            let span = tracing::info_span!("check", resource = self.resource.name());
            let _enter = span.enter();

            let guarded = panic::catch_unwind(AssertUnwindSafe(|| match self.evaluate() {
                Ok(results) => self.report(&results),
                Err(e) => {
                    warn!(error = %e, "Check failed");
                    Outcome::unknown(e.to_string())
                }
            }));

            guarded.unwrap_or_else(|payload| {
                let message = panic_message(payload.as_ref());
                error!(message = %message, "Check panicked");
                Outcome::unknown(format!("check panicked: {message}"))
            })
        })
    }

    /// Probe the resource and evaluate every metric
    ///
    /// A metric without a matching context yields an UNKNOWN result
    /// instead of an error, so the remaining metrics are still reported.
    pub fn evaluate(&self) -> Result<CheckResults> {
        let metrics = self.resource.probe()?;
        debug!(count = metrics.len(), "Probe completed");

        let results = metrics
            .into_iter()
            .map(|metric| match self.contexts.lookup(&metric) {
                Ok(context) => {
                    let result = CheckResult::evaluate(metric, context);
                    debug!(
                        metric = %result.metric.name,
                        value = result.metric.value,
                        state = ?result.state,
                        "Metric evaluated"
                    );
                    result
                }
                Err(e) => {
                    warn!(metric = %metric.name, error = %e, "Metric not evaluated");
                    CheckResult::unknown(metric, e.to_string())
                }
            })
            .collect();

        Ok(results)
    }

    fn report(&self, results: &CheckResults) -> Outcome {
        let state = results.most_significant_state();
        let summary = if results.is_empty() {
            self.summary.empty()
        } else if state.is_ok() {
            self.summary.ok(results)
        } else {
            self.summary.problem(results)
        };

        debug!(state = ?state, results = results.len(), "Check completed");

        Outcome {
            state,
            summary,
            perfdata: results.performance(),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown cause".to_string()
    }
}

// ============================================================================
// Outcome
// ============================================================================

/// Final state and text of a check run
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    /// Aggregate state
    pub state: ServiceState,

    /// Summary text
    pub summary: String,

    /// Performance data items
    pub perfdata: Vec<String>,
}

impl Outcome {
    /// Create an UNKNOWN outcome with the given message
    pub fn unknown(message: impl Into<String>) -> Self {
        Self {
            state: ServiceState::Unknown,
            summary: message.into(),
            perfdata: Vec::new(),
        }
    }

    /// Process exit code
    pub fn exit_code(&self) -> i32 {
        self.state.exit_code()
    }

    /// The single line printed to standard output
    pub fn status_line(&self, with_perfdata: bool) -> String {
        let summary = self.summary.replace(['\r', '\n'], " ");
        if with_perfdata && !self.perfdata.is_empty() {
            format!("{} | {}", summary, self.perfdata.join(" "))
        } else {
            summary
        }
    }
}

//! Evaluated check results

use std::fmt;

use crate::context::Context;
use crate::types::{Metric, ServiceState};

// ============================================================================
// Individual Check Results
// ============================================================================

/// Result of evaluating a single metric
#[derive(Debug, Clone, PartialEq)]
pub struct CheckResult {
    /// The evaluated metric
    pub metric: Metric,

    /// State assigned by the context
    pub state: ServiceState,

    /// Context that produced the state, `None` for synthetic results
    pub context: Option<Context>,

    /// Explanation for results that were not produced by a context
    pub hint: Option<String>,
}

impl CheckResult {
    /// Evaluate a metric against its context
    pub fn evaluate(metric: Metric, context: &Context) -> Self {
        Self {
            state: context.evaluate(&metric),
            metric,
            context: Some(context.clone()),
            hint: None,
        }
    }

    /// Create an UNKNOWN result for a metric that could not be evaluated
    pub fn unknown(metric: Metric, hint: impl Into<String>) -> Self {
        Self {
            metric,
            state: ServiceState::Unknown,
            context: None,
            hint: Some(hint.into()),
        }
    }

    /// Performance data item for this result, if it has a context
    pub fn performance(&self) -> Option<String> {
        self.context.as_ref().map(|c| c.performance(&self.metric))
    }
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.hint {
            Some(hint) => write!(f, "{}: {}", self.metric.name, hint),
            None => write!(f, "{}: {}", self.metric.name, self.metric.value_unit()),
        }
    }
}

// ============================================================================
// Result Collection
// ============================================================================

/// Ordered collection of results from one check run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckResults {
    results: Vec<CheckResult>,
}

impl CheckResults {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a result, keeping emission order
    pub fn add(&mut self, result: CheckResult) {
        self.results.push(result);
    }

    /// Iterate over all results in emission order
    pub fn iter(&self) -> std::slice::Iter<'_, CheckResult> {
        self.results.iter()
    }

    /// Number of results
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Check if no result has been added
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Worst state across all results, UNKNOWN when empty
    pub fn most_significant_state(&self) -> ServiceState {
        self.results
            .iter()
            .map(|r| r.state)
            .max()
            .unwrap_or(ServiceState::Unknown)
    }

    /// Results sharing the worst state, in emission order
    pub fn most_significant(&self) -> Vec<&CheckResult> {
        let worst = self.most_significant_state();
        self.results.iter().filter(|r| r.state == worst).collect()
    }

    /// Performance data items of all results that have a context
    pub fn performance(&self) -> Vec<String> {
        self.results.iter().filter_map(CheckResult::performance).collect()
    }
}

impl<'a> IntoIterator for &'a CheckResults {
    type Item = &'a CheckResult;
    type IntoIter = std::slice::Iter<'a, CheckResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}

impl FromIterator<CheckResult> for CheckResults {
    fn from_iter<I: IntoIterator<Item = CheckResult>>(iter: I) -> Self {
        Self {
            results: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(name: &str, state: ServiceState) -> CheckResult {
        CheckResult {
            metric: Metric::new(name, 1.0, "B"),
            state,
            context: Some(Context::new(name)),
            hint: None,
        }
    }

    fn states(states: &[ServiceState]) -> CheckResults {
        states
            .iter()
            .enumerate()
            .map(|(i, s)| result(&format!("m{i}"), *s))
            .collect()
    }

    #[test]
    fn test_most_significant_state() {
        use ServiceState::*;

        assert_eq!(states(&[Ok, Warning, Ok]).most_significant_state(), Warning);
        assert_eq!(
            states(&[Ok, Critical, Warning]).most_significant_state(),
            Critical
        );
        assert_eq!(states(&[Ok, Ok]).most_significant_state(), Ok);
        assert_eq!(CheckResults::new().most_significant_state(), Unknown);
    }

    #[test]
    fn test_most_significant_keeps_ties_in_order() {
        use ServiceState::*;

        let results = states(&[Warning, Ok, Warning, Ok]);
        let names: Vec<_> = results
            .most_significant()
            .iter()
            .map(|r| r.metric.name.as_str())
            .collect();
        assert_eq!(names, vec!["m0", "m2"]);
    }

    #[test]
    fn test_evaluate_uses_context() {
        let context =
            Context::new("size").with_critical(crate::range::Range::parse("500:").unwrap());
        let result = CheckResult::evaluate(Metric::new("size", 200.0, "B"), &context);
        assert_eq!(result.state, ServiceState::Critical);
        assert_eq!(result.context.as_ref(), Some(&context));
        assert_eq!(result.to_string(), "size: 200B");
    }

    #[test]
    fn test_unknown_result_displays_hint() {
        let result = CheckResult::unknown(Metric::new("size", 1.0, "B"), "no context");
        assert_eq!(result.state, ServiceState::Unknown);
        assert!(result.performance().is_none());
        assert_eq!(result.to_string(), "size: no context");
    }

    #[test]
    fn test_performance_skips_synthetic_results() {
        let mut results = CheckResults::new();
        results.add(result("a", ServiceState::Ok));
        results.add(CheckResult::unknown(Metric::new("b", 1.0, ""), "hint"));
        assert_eq!(results.performance(), vec!["a=1B".to_string()]);
    }
}

//! Extension points of a check

use crate::error::Result;
use crate::result::CheckResults;
use crate::types::Metric;

/// Something that can be measured
///
/// `probe` is called exactly once per [`Check::run`](super::Check::run).
/// A failing probe turns the whole run UNKNOWN.
pub trait Resource {
    /// Short name used in log output
    fn name(&self) -> &str;

    /// Take the measurements
    fn probe(&self) -> Result<Vec<Metric>>;
}

/// Renders the human readable part of the status line
pub trait Summary {
    /// Text for a run whose worst state is OK
    fn ok(&self, results: &CheckResults) -> String;

    /// Text for a run whose worst state is not OK
    ///
    /// Implementations usually restrict themselves to
    /// [`CheckResults::most_significant`].
    fn problem(&self, results: &CheckResults) -> String {
        results
            .most_significant()
            .first()
            .map(|r| r.to_string())
            .unwrap_or_default()
    }

    /// Text for a run that produced no results at all
    fn empty(&self) -> String {
        "no check results".to_string()
    }
}

/// Summary that reports the first result
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultSummary;

impl Summary for DefaultSummary {
    fn ok(&self, results: &CheckResults) -> String {
        results
            .iter()
            .next()
            .map(|r| r.to_string())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Context;
    use crate::result::CheckResult;
    use crate::types::ServiceState;

    fn results() -> CheckResults {
        let ok = Context::new("a");
        let mut results = CheckResults::new();
        results.add(CheckResult::evaluate(Metric::new("a", 1.0, "s"), &ok));
        results.add(CheckResult::unknown(Metric::new("b", 2.0, "s"), "broken"));
        results
    }

    #[test]
    fn test_default_summary_ok_uses_first_result() {
        assert_eq!(DefaultSummary.ok(&results()), "a: 1s");
    }

    #[test]
    fn test_default_problem_uses_most_significant() {
        let results = results();
        assert_eq!(results.most_significant_state(), ServiceState::Unknown);
        assert_eq!(DefaultSummary.problem(&results), "b: broken");
    }

    #[test]
    fn test_default_empty_text() {
        assert_eq!(DefaultSummary.empty(), "no check results");
    }
}

//! Pluggable check architecture: resources produce metrics, contexts
//! evaluate them, summaries render the outcome

pub mod builder;
pub mod traits;

pub use builder::{Check, CheckBuilder, Outcome};
pub use traits::{DefaultSummary, Resource, Summary};

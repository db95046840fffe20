//! Search results engine for model-optimization pipelines
//!
//! A model-optimization search explores a space of transformation passes
//! (quantization, conversion, pruning) and evaluates each candidate
//! configuration against multiple objectives (accuracy, latency, size).
//! This crate is the bookkeeping half of that loop: it records completed
//! trials, deduplicates them by configuration fingerprint, tracks the
//! Pareto-optimal frontier, and serves ranked views back to the search
//! driver.
//!
//! The pass implementations, model handling, and the proposal algorithm
//! that decides which configuration to try next all live in the
//! orchestrator; this crate only answers "what have we seen, and which of
//! it is worth keeping".
//!
//! # Example
//!
//! ```
//! use afinar::search::{Objective, SearchPoint, SearchResults};
//! use std::collections::BTreeMap;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let objectives = vec![
//!     Objective::maximize("accuracy"),
//!     Objective::minimize("latency_ms"),
//! ];
//! let mut results = SearchResults::new(objectives, None)?;
//!
//! let mut point = SearchPoint::new();
//! point.insert(
//!     "quantize".into(),
//!     BTreeMap::from([("bits".into(), serde_json::json!(8))]),
//! );
//! let result = BTreeMap::from([("accuracy".into(), 0.92), ("latency_ms".into(), 41.0)]);
//! results.record(&point, &result, &["0_base".into(), "1_quantized".into()]);
//!
//! let frontier = results.get_pareto_frontier(None, false)?;
//! assert_eq!(frontier, vec!["1"]);
//! # Ok(())
//! # }
//! ```

pub mod search;

pub use search::{
    fingerprint, find_pareto_frontier, Fingerprint, Objective, ResultsTable, SearchError,
    SearchPoint, SearchResults, SearchSnapshot, SortedTrials, TrialRecord, TrialResult,
};

//! Search Results Engine
//!
//! Stores the outcome of every completed optimization trial and answers the
//! queries a search-strategy driver needs: goal feasibility, the Pareto
//! frontier over any subset of objectives, and a deterministic total
//! ordering of trials. Backed by configuration fingerprints so that
//! re-evaluating the same configuration replaces rather than duplicates.
//!
//! # Architecture
//!
//! - [`Objective`]: one optimization target (name, direction, optional goal)
//! - [`fingerprint`]: canonical-JSON SHA-256 identity of a configuration
//! - [`find_pareto_frontier`]: non-dominated filter over numeric vectors
//! - [`SearchResults`]: the ledger itself (record, query, snapshot)
//! - [`ResultsTable`]: flat projection for reporting/export collaborators

pub mod fingerprint;
pub mod objective;
pub mod pareto;
pub mod results;
pub mod table;


pub use fingerprint::{fingerprint, fingerprint_value, Fingerprint};
pub use objective::Objective;
pub use pareto::find_pareto_frontier;
pub use results::{
    SearchPoint, SearchResults, SearchSnapshot, SortedTrials, TrialRecord, TrialResult,
};
pub use table::ResultsTable;

/// Errors from search-result operations
///
/// All of these are local precondition violations (a query naming an
/// objective a stored result never reported, a snapshot that disagrees with
/// itself). They surface immediately to the caller; nothing is retried and
/// no partial results are returned.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("duplicate objective name: {0}")]
    DuplicateObjective(String),

    #[error("unknown objective: {0}")]
    UnknownObjective(String),

    #[error("stored result has no value for objective '{0}'")]
    MissingObjectiveValue(String),

    #[error("trial {0} has no model ids recorded")]
    MissingModelIds(Fingerprint),

    #[error("persisted objective spec does not match the configured objectives")]
    ObjectiveMismatch,

    #[error("corrupt snapshot: {0}")]
    CorruptSnapshot(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for search operations
pub type Result<T> = std::result::Result<T, SearchError>;

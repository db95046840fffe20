//! Search results ledger
//!
//! [`SearchResults`] is the append-only record of every completed trial in
//! an optimization search, keyed by configuration fingerprint. The driver
//! calls [`record`](SearchResults::record) once per finished trial and
//! later asks for the Pareto frontier or a sorted view to decide what to
//! keep or branch from.
//!
//! Single-writer by construction: `record` takes `&mut self`, queries take
//! `&self`. A worker pool feeding one store must serialize through a single
//! owner (a `Mutex<SearchResults>` is enough); each trial's
//! (configuration, result, model ids) triple is stored as one
//! [`TrialRecord`] value, so readers can never observe a mismatched
//! combination.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::fingerprint::{fingerprint, Fingerprint};
use super::objective::Objective;
use super::pareto::find_pareto_frontier;
use super::{Result, SearchError};

/// A trial configuration: pass name to parameter name to value
///
/// Opaque to the ledger except for fingerprinting. `BTreeMap` at both
/// levels keeps serialization key order deterministic.
pub type SearchPoint = BTreeMap<String, BTreeMap<String, Value>>;

/// Metric values reported by one trial, keyed by objective name
///
/// An empty map means the trial failed or was pruned; such entries are
/// kept for provenance but excluded from every ranking and frontier
/// computation.
pub type TrialResult = BTreeMap<String, f64>;

/// Everything recorded for one configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialRecord {
    /// The configuration that was evaluated
    pub search_point: SearchPoint,
    /// Metric values, possibly empty for failed trials
    pub result: TrialResult,
    /// Ids of the artifacts the trial produced, in pass-chain order;
    /// the last one is the trial's canonical model id
    pub model_ids: Vec<String>,
}

impl TrialRecord {
    /// Leading numeric token of the canonical model id
    ///
    /// Model ids are of the form `<number>_<suffix>`; an id without an
    /// underscore is its own token. `None` when no model ids were recorded.
    #[must_use]
    pub fn model_number(&self) -> Option<&str> {
        self.model_ids.last().and_then(|id| id.split('_').next())
    }
}

/// Sorted view over qualifying trials, parallel sequences in rank order
#[derive(Debug, Clone, PartialEq)]
pub struct SortedTrials {
    /// Model id lists, one per trial
    pub model_ids: Vec<Vec<String>>,
    /// Original (un-adjusted) configurations
    pub search_points: Vec<SearchPoint>,
    /// Original (un-adjusted) results
    pub results: Vec<TrialResult>,
}

/// Serializable snapshot of a search run
///
/// The persisted form for resuming interrupted searches. Unknown extra
/// fields in a stored document are ignored on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchSnapshot {
    /// Objective spec, in canonical order
    pub objectives: Vec<Objective>,
    /// Baseline-model provenance, persisted verbatim
    #[serde(default)]
    pub init_model_history: Option<Value>,
    /// Fingerprints in insertion order
    pub order: Vec<Fingerprint>,
    /// Per-fingerprint trial records
    pub records: HashMap<Fingerprint, TrialRecord>,
}

/// Ledger of search results for one optimization run
///
/// Created once per run with the objective spec fixed at construction.
/// Entries enter exclusively through [`record`](Self::record); re-recording
/// a configuration replaces its entry (last write wins) without changing
/// its insertion position.
#[derive(Debug, Clone)]
pub struct SearchResults {
    objectives: Vec<Objective>,
    init_model_history: Option<Value>,
    /// Insertion order of fingerprints; queries iterate in this order
    order: Vec<Fingerprint>,
    records: HashMap<Fingerprint, TrialRecord>,
}

impl SearchResults {
    /// Create an empty ledger for the given objectives
    ///
    /// `init_model_history` is an optional provenance record describing the
    /// search path that produced the baseline model; it is persisted
    /// verbatim and never interpreted.
    pub fn new(objectives: Vec<Objective>, init_model_history: Option<Value>) -> Result<Self> {
        for (i, obj) in objectives.iter().enumerate() {
            if objectives[..i].iter().any(|o| o.name == obj.name) {
                return Err(SearchError::DuplicateObjective(obj.name.clone()));
            }
        }
        Ok(Self {
            objectives,
            init_model_history,
            order: Vec::new(),
            records: HashMap::new(),
        })
    }

    /// The configured objectives, in canonical order
    #[must_use]
    pub fn objectives(&self) -> &[Objective] {
        &self.objectives
    }

    /// Baseline-model provenance, if any
    #[must_use]
    pub fn init_model_history(&self) -> Option<&Value> {
        self.init_model_history.as_ref()
    }

    /// Number of recorded configurations (including failed trials)
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True when nothing has been recorded yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Look up the record for a fingerprint
    #[must_use]
    pub fn get(&self, fp: &Fingerprint) -> Option<&TrialRecord> {
        self.records.get(fp)
    }

    /// Iterate records in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&Fingerprint, &TrialRecord)> {
        self.order.iter().filter_map(|fp| self.records.get(fp).map(|r| (fp, r)))
    }

    /// Record the outcome of one completed trial
    ///
    /// All three arguments are cloned into the ledger; no reference to
    /// caller-owned data survives, so mutating a live trial object cannot
    /// corrupt history. Recording a configuration that was already seen
    /// replaces its entry.
    ///
    /// Result keys are not validated against the objective spec here; a
    /// mismatch surfaces as [`SearchError::MissingObjectiveValue`] when a
    /// query needs the absent key.
    pub fn record(&mut self, point: &SearchPoint, result: &TrialResult, model_ids: &[String]) {
        let fp = fingerprint(point);
        debug!(
            fingerprint = %fp,
            metrics = result.len(),
            artifacts = model_ids.len(),
            "recording trial"
        );

        let record = TrialRecord {
            search_point: point.clone(),
            result: result.clone(),
            model_ids: model_ids.to_vec(),
        };
        if self.records.insert(fp.clone(), record).is_none() {
            self.order.push(fp);
        }
    }

    /// Whether `result` satisfies every configured goal
    ///
    /// Returns `Ok(false)` when no objective carries a goal at all: with
    /// nothing to measure against, a result is conservatively treated as
    /// not feasible rather than vacuously feasible. An objective with a
    /// goal but no value in `result` is an error.
    pub fn check_goals(&self, result: &TrialResult) -> Result<bool> {
        let mut any_goal = false;
        for obj in &self.objectives {
            let Some(goal) = obj.goal else { continue };
            any_goal = true;

            let value = *result
                .get(&obj.name)
                .ok_or_else(|| SearchError::MissingObjectiveValue(obj.name.clone()))?;
            if obj.multiplier() * value < obj.multiplier() * goal {
                return Ok(false);
            }
        }
        Ok(any_goal)
    }

    /// Model numbers of the Pareto-optimal trials
    ///
    /// `objectives` selects a subset (and ordering) of the configured
    /// objectives; `None` means all of them. With `apply_goals`, trials
    /// failing [`check_goals`](Self::check_goals) are excluded before the
    /// frontier is computed. Trials with an empty result never qualify.
    ///
    /// Output order follows insertion order of the qualifying trials.
    pub fn get_pareto_frontier(
        &self,
        objectives: Option<&[&str]>,
        apply_goals: bool,
    ) -> Result<Vec<String>> {
        let selected = self.select_objectives(objectives)?;
        let (trials, adjusted) = self.qualifying_trials(&selected, apply_goals)?;

        // The finder works in lower-is-better space; adjusted values are
        // higher-is-better, so negate.
        let costs: Vec<Vec<f64>> = adjusted
            .iter()
            .map(|v| v.iter().map(|x| -x).collect())
            .collect();
        let frontier = find_pareto_frontier(&costs);
        debug!(
            qualifying = trials.len(),
            frontier = frontier.len(),
            "computed pareto frontier"
        );

        frontier
            .into_iter()
            .map(|i| {
                let (fp, record) = trials[i];
                record
                    .model_number()
                    .map(str::to_string)
                    .ok_or_else(|| SearchError::MissingModelIds(fp.clone()))
            })
            .collect()
    }

    /// All qualifying trials in a deterministic total order
    ///
    /// Ascending lexicographic over direction-adjusted vectors: the first
    /// selected objective is the primary key, the second breaks ties, and
    /// so on. For a higher-is-better objective, ascending-adjusted means
    /// worst first. Returns `None` when no trial qualifies.
    pub fn sort_search_points(
        &self,
        objectives: Option<&[&str]>,
        apply_goals: bool,
    ) -> Result<Option<SortedTrials>> {
        let selected = self.select_objectives(objectives)?;
        let (trials, adjusted) = self.qualifying_trials(&selected, apply_goals)?;
        if trials.is_empty() {
            return Ok(None);
        }

        let mut ranks: Vec<usize> = (0..trials.len()).collect();
        // Stable sort keeps insertion order on full ties
        ranks.sort_by(|&a, &b| lexicographic(&adjusted[a], &adjusted[b]));

        let mut sorted = SortedTrials {
            model_ids: Vec::with_capacity(ranks.len()),
            search_points: Vec::with_capacity(ranks.len()),
            results: Vec::with_capacity(ranks.len()),
        };
        for i in ranks {
            let (_, record) = trials[i];
            sorted.model_ids.push(record.model_ids.clone());
            sorted.search_points.push(record.search_point.clone());
            sorted.results.push(record.result.clone());
        }
        Ok(Some(sorted))
    }

    /// Snapshot the full ledger for persistence
    #[must_use]
    pub fn to_snapshot(&self) -> SearchSnapshot {
        SearchSnapshot {
            objectives: self.objectives.clone(),
            init_model_history: self.init_model_history.clone(),
            order: self.order.clone(),
            records: self.records.clone(),
        }
    }

    /// Restore a ledger from a snapshot
    ///
    /// Validates that the snapshot agrees with itself (no duplicate
    /// objectives, order and record map covering the same fingerprints).
    pub fn from_snapshot(snapshot: SearchSnapshot) -> Result<Self> {
        let SearchSnapshot {
            objectives,
            init_model_history,
            order,
            records,
        } = snapshot;

        if order.len() != records.len() {
            return Err(SearchError::CorruptSnapshot(format!(
                "order lists {} fingerprints but {} records are present",
                order.len(),
                records.len()
            )));
        }
        for fp in &order {
            if !records.contains_key(fp) {
                return Err(SearchError::CorruptSnapshot(format!(
                    "fingerprint {fp} is ordered but has no record"
                )));
            }
        }

        let mut restored = Self::new(objectives, init_model_history)?;
        restored.order = order;
        restored.records = records;
        Ok(restored)
    }

    /// Restore a snapshot, requiring it to match the expected objectives
    ///
    /// Fails fast with [`SearchError::ObjectiveMismatch`] when the
    /// persisted objective spec (names, directions, goals, or order)
    /// differs from what the caller is configured for, instead of silently
    /// producing rankings against the wrong spec.
    pub fn from_snapshot_checked(snapshot: SearchSnapshot, expected: &[Objective]) -> Result<Self> {
        if snapshot.objectives != expected {
            return Err(SearchError::ObjectiveMismatch);
        }
        Self::from_snapshot(snapshot)
    }

    /// Persisted form as a JSON document
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_snapshot())?)
    }

    /// Restore from a JSON document produced by [`to_json_string`](Self::to_json_string)
    pub fn from_json_str(json: &str) -> Result<Self> {
        let snapshot: SearchSnapshot = serde_json::from_str(json)?;
        Self::from_snapshot(snapshot)
    }

    /// Resolve an objective subset, defaulting to all in canonical order
    fn select_objectives(&self, names: Option<&[&str]>) -> Result<Vec<&Objective>> {
        match names {
            None => Ok(self.objectives.iter().collect()),
            Some(names) => names
                .iter()
                .map(|name| {
                    self.objectives
                        .iter()
                        .find(|o| o.name == *name)
                        .ok_or_else(|| SearchError::UnknownObjective((*name).to_string()))
                })
                .collect(),
        }
    }

    /// Qualifying trials and their direction-adjusted vectors
    ///
    /// Insertion order; empty results skipped, goal failures skipped when
    /// `apply_goals`.
    #[allow(clippy::type_complexity)]
    fn qualifying_trials(
        &self,
        selected: &[&Objective],
        apply_goals: bool,
    ) -> Result<(Vec<(&Fingerprint, &TrialRecord)>, Vec<Vec<f64>>)> {
        let mut trials = Vec::new();
        let mut adjusted = Vec::new();

        for (fp, record) in self.iter() {
            if record.result.is_empty() {
                continue;
            }
            if apply_goals && !self.check_goals(&record.result)? {
                continue;
            }

            let mut vector = Vec::with_capacity(selected.len());
            for obj in selected {
                let value = *record
                    .result
                    .get(&obj.name)
                    .ok_or_else(|| SearchError::MissingObjectiveValue(obj.name.clone()))?;
                vector.push(obj.multiplier() * value);
            }
            trials.push((fp, record));
            adjusted.push(vector);
        }

        Ok((trials, adjusted))
    }
}

/// Ascending lexicographic comparison of equal-length vectors
fn lexicographic(a: &[f64], b: &[f64]) -> Ordering {
    for (x, y) in a.iter().zip(b) {
        match x.total_cmp(y) {
            Ordering::Equal => continue,
            unequal => return unequal,
        }
    }
    Ordering::Equal
}

//! Tabular projection of search results
//!
//! Reporting/export collaborators want a flat view: one row per trial,
//! columns for the model number, each objective, a goal-satisfaction flag,
//! and Pareto membership, optionally widened with the flattened
//! configuration parameters. [`ResultsTable`] is that view; it is plain
//! serde data, not a live reference into the ledger.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::results::SearchResults;
use super::{Result, SearchError};

/// Flat, serializable table of trial results
///
/// `rows[i][j]` is the value under `headers[j]` for the i-th trial with a
/// non-empty result, in insertion order. Cells are JSON values so that a
/// missing parameter or metric renders as `null` rather than a filler
/// string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultsTable {
    /// Column names, in render order
    pub headers: Vec<String>,
    /// One row per trial
    pub rows: Vec<Vec<Value>>,
}

impl ResultsTable {
    /// Number of data rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when no trial qualifies for the table
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of a column by header name
    #[must_use]
    pub fn column(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }
}

impl SearchResults {
    /// Project the ledger into a [`ResultsTable`]
    ///
    /// Columns: `model_number`, one per configured objective, `goals_met`,
    /// `is_pareto`. With `show_search_points`, one `pass:param` column per
    /// parameter seen in any recorded configuration (first-seen order); a
    /// trial that never set that parameter gets `null`.
    ///
    /// Failed trials (empty result) are omitted. Pareto membership is
    /// computed over all objectives without goal filtering, so a result
    /// missing any configured objective fails the whole projection, per the
    /// usual query semantics.
    pub fn results_table(&self, show_search_points: bool) -> Result<ResultsTable> {
        let frontier = self.get_pareto_frontier(None, false)?;

        let mut headers: Vec<String> = vec!["model_number".to_string()];
        headers.extend(self.objectives().iter().map(|o| o.name.clone()));
        headers.push("goals_met".to_string());
        headers.push("is_pareto".to_string());

        // Union of pass:param columns across all rows, first-seen order
        let mut param_columns: Vec<(String, String)> = Vec::new();
        if show_search_points {
            for (_, record) in self.iter() {
                if record.result.is_empty() {
                    continue;
                }
                for (pass, params) in &record.search_point {
                    for param in params.keys() {
                        let column = (pass.clone(), param.clone());
                        if !param_columns.contains(&column) {
                            param_columns.push(column);
                        }
                    }
                }
            }
            headers.extend(
                param_columns
                    .iter()
                    .map(|(pass, param)| format!("{pass}:{param}")),
            );
        }

        let mut rows = Vec::new();
        for (fp, record) in self.iter() {
            if record.result.is_empty() {
                continue;
            }

            let model_number = record
                .model_number()
                .ok_or_else(|| SearchError::MissingModelIds(fp.clone()))?;

            let mut row: Vec<Value> = vec![Value::String(model_number.to_string())];
            for obj in self.objectives() {
                row.push(match record.result.get(&obj.name) {
                    Some(value) => serde_json::json!(value),
                    None => Value::Null,
                });
            }
            // The feasibility flag is reporting, not a query: a result that
            // cannot be checked renders as null instead of failing the table
            row.push(match self.check_goals(&record.result) {
                Ok(met) => Value::Bool(met),
                Err(SearchError::MissingObjectiveValue(_)) => Value::Null,
                Err(e) => return Err(e),
            });
            row.push(Value::Bool(
                frontier.iter().any(|number| number.as_str() == model_number),
            ));

            for (pass, param) in &param_columns {
                let value = record
                    .search_point
                    .get(pass)
                    .and_then(|params| params.get(param));
                row.push(value.cloned().unwrap_or(Value::Null));
            }

            rows.push(row);
        }

        Ok(ResultsTable { headers, rows })
    }
}

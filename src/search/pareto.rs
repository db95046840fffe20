//! Pareto frontier finder
//!
//! Non-dominated filtering over numeric vectors, in the lower-is-better
//! convention: callers with mixed directions adjust signs first (see
//! [`SearchResults`](super::SearchResults)).

/// Indices of the non-dominated points in `points`
///
/// All vectors must share the same dimension. Point `j` dominates point `i`
/// when `points[j][d] <= points[i][d]` in every dimension and the
/// inequality is strict in at least one. Ties (identical vectors) dominate
/// nothing, so duplicated optima all stay on the frontier.
///
/// Returned indices are ascending, which keeps the frontier stable with
/// respect to input order. Empty input yields an empty frontier; a single
/// point is always non-dominated.
///
/// O(N²·D) pairwise comparison. Trial counts are bounded by the search
/// budget (hundreds to low thousands), so the quadratic scan is fine.
#[must_use]
pub fn find_pareto_frontier(points: &[Vec<f64>]) -> Vec<usize> {
    let mut frontier = Vec::new();

    for (i, candidate) in points.iter().enumerate() {
        let dominated = points
            .iter()
            .enumerate()
            .any(|(j, other)| j != i && dominates(other, candidate));
        if !dominated {
            frontier.push(i);
        }
    }

    frontier
}

/// True when `a` dominates `b` (lower is better)
fn dominates(a: &[f64], b: &[f64]) -> bool {
    debug_assert_eq!(a.len(), b.len(), "objective vectors must share dimension");

    let mut strictly_better = false;
    for (x, y) in a.iter().zip(b) {
        if x > y {
            return false;
        }
        if x < y {
            strictly_better = true;
        }
    }
    strictly_better
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert!(find_pareto_frontier(&[]).is_empty());
    }

    #[test]
    fn test_single_point() {
        assert_eq!(find_pareto_frontier(&[vec![1.0, 2.0]]), vec![0]);
    }

    #[test]
    fn test_identical_points_all_survive() {
        let points = vec![vec![1.0, 1.0], vec![1.0, 1.0], vec![1.0, 1.0]];
        assert_eq!(find_pareto_frontier(&points), vec![0, 1, 2]);
    }

    #[test]
    fn test_dominated_point_excluded() {
        // index 1 is worse in both dimensions than index 0
        let points = vec![vec![1.0, 1.0], vec![2.0, 2.0]];
        assert_eq!(find_pareto_frontier(&points), vec![0]);
    }

    #[test]
    fn test_tradeoff_points_all_survive() {
        let points = vec![vec![1.0, 3.0], vec![2.0, 2.0], vec![3.0, 1.0]];
        assert_eq!(find_pareto_frontier(&points), vec![0, 1, 2]);
    }

    #[test]
    fn test_tie_in_one_dimension_is_not_dominance_alone() {
        // equal first dimension, strictly better second: still dominance
        let points = vec![vec![1.0, 1.0], vec![1.0, 2.0]];
        assert_eq!(find_pareto_frontier(&points), vec![0]);
    }

    #[test]
    fn test_single_dimension() {
        let points = vec![vec![3.0], vec![1.0], vec![2.0], vec![1.0]];
        // both minima tie, neither dominates the other
        assert_eq!(find_pareto_frontier(&points), vec![1, 3]);
    }
}

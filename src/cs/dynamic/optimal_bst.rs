//! Optimal binary search trees (CLRS 15.5).
//!
//! Given `n` ascending keys, the probability `p[k]` that a search targets
//! key `k` and the probability `q[k]` that it falls into the gap around it,
//! compute the BST with minimal expected number of comparisons.
//!
//! # Indexing
//!
//! All tables use 0-based half-open key ranges: entry `(a, b)` covers
//! `keys[a..b]` together with the gaps `q[a..=b]`. The textbook interval
//! `[i, j]` is entry `(i - 1, j)` and the textbook empty interval `[i, i - 1]`
//! is the diagonal entry `(i - 1, i - 1)`. Root entries are 0-based indices
//! into `keys`.
//!
//! Probabilities keep the textbook layout: `p.len() == q.len() == n + 1`,
//! `p[0]` is an unused zero and `p[k]` belongs to `keys[k - 1]`.
//!
//! # Examples
//!
//! ```
//! use optimal_bst::ObstSolution;
//!
//! let keys = vec![1, 2, 3, 4, 5];
//! let p = [0.00, 0.15, 0.10, 0.05, 0.10, 0.20];
//! let q = [0.05, 0.10, 0.05, 0.05, 0.05, 0.10];
//!
//! let obst = ObstSolution::new(keys, &p, &q).unwrap();
//! assert!((obst.expected_cost() - 2.75).abs() < 1e-9);
//! assert_eq!(obst.tree().root().map(|node| *node.key()), Some(2));
//!
//! let sorted: Vec<i32> = obst.in_order().map(|visit| *visit.key).collect();
//! assert_eq!(sorted, vec![1, 2, 3, 4, 5]);
//! ```

mod generate;
pub mod report;
mod solver;
mod traversal;
mod tree;
mod validate;

use std::time::{Duration, Instant};

use log::debug;
use ndarray::Array2;

use crate::error::Result;

pub use generate::{clrs_instance, random_instance, ObstInstance};
pub use solver::{solve, solve_with, DpTables};
pub use traversal::{InOrder, PreOrder, Traversal, TraversalOrder, Visit};
pub use tree::{build_tree, Node, OptimalTree};

/// Input checks applied before the DP pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstConfig {
    /// Allowed absolute distance of `Σp + Σq` from 1.
    pub tolerance: f64,
    /// Upper bound on the number of keys, if any.
    pub max_keys: Option<usize>,
}

impl Default for ObstConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-6,
            max_keys: None,
        }
    }
}

/// A solved instance: the keys, the three DP tables, the reconstructed tree
/// and the time spent in the DP pass.
#[derive(Debug)]
pub struct ObstSolution<K> {
    keys: Vec<K>,
    tables: DpTables,
    tree: OptimalTree<K>,
    elapsed: Duration,
}

impl<K: Ord + Clone> ObstSolution<K> {
    /// Validates the instance with [`ObstConfig::default`], runs the DP and
    /// builds the tree.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidInput`] when lengths, probabilities or
    /// key order are malformed.
    pub fn new(keys: Vec<K>, p: &[f64], q: &[f64]) -> Result<Self> {
        Self::with_config(&ObstConfig::default(), keys, p, q)
    }

    /// Same as [`ObstSolution::new`] with explicit validation settings.
    pub fn with_config(config: &ObstConfig, keys: Vec<K>, p: &[f64], q: &[f64]) -> Result<Self> {
        validate::check(config, &keys, p, q)?;

        debug!("solving optimal BST over {} keys", keys.len());
        let start = Instant::now();
        let tables = solver::fill_tables(p, q);
        let elapsed = start.elapsed();

        let tree = OptimalTree::from_tables(&keys, &tables);
        debug!(
            "optimal BST over {} keys: cost {:.6}, height {}, dp pass {:?}",
            keys.len(),
            tables.expected_cost(),
            tree.height(),
            elapsed
        );

        Ok(Self {
            keys,
            tables,
            tree,
            elapsed,
        })
    }
}

impl<K> ObstSolution<K> {
    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    pub fn tables(&self) -> &DpTables {
        &self.tables
    }

    pub fn costs(&self) -> &Array2<f64> {
        self.tables.costs()
    }

    pub fn weights(&self) -> &Array2<f64> {
        self.tables.weights()
    }

    pub fn roots(&self) -> &Array2<usize> {
        self.tables.roots()
    }

    /// Expected search cost of the whole tree, `cost(0, n)`.
    pub fn expected_cost(&self) -> f64 {
        self.tables.expected_cost()
    }

    pub fn tree(&self) -> &OptimalTree<K> {
        &self.tree
    }

    pub fn pre_order(&self) -> PreOrder<'_, K> {
        self.tree.pre_order()
    }

    pub fn in_order(&self) -> InOrder<'_, K> {
        self.tree.in_order()
    }

    /// Wall-clock time of the DP pass alone (validation and tree building
    /// are not included).
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, InvalidInput};
    use approx::assert_abs_diff_eq;

    const CLRS_P: [f64; 6] = [0.00, 0.15, 0.10, 0.05, 0.10, 0.20];
    const CLRS_Q: [f64; 6] = [0.05, 0.10, 0.05, 0.05, 0.05, 0.10];

    #[test]
    fn test_clrs_solution() {
        let obst = ObstSolution::new(vec![1, 2, 3, 4, 5], &CLRS_P, &CLRS_Q).unwrap();
        assert_abs_diff_eq!(obst.expected_cost(), 2.75, epsilon = 1e-9);
        assert_eq!(obst.tables().root(0, 5), Some(1));
        assert_eq!(obst.keys(), &[1, 2, 3, 4, 5]);
        assert_eq!(obst.costs().dim(), (6, 6));
        assert_eq!(obst.weights().dim(), (6, 6));
        assert_eq!(obst.roots().dim(), (6, 6));
        assert_abs_diff_eq!(obst.weights()[[0, 5]], 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_clrs_tree_shape() {
        // k2 at the root, k1 left, k5 right, k4 under k5, k3 under k4.
        let obst = ObstSolution::new(vec![1, 2, 3, 4, 5], &CLRS_P, &CLRS_Q).unwrap();
        let pre: Vec<(i32, Option<i32>, Option<i32>)> = obst
            .pre_order()
            .map(|v| (*v.key, v.left.copied(), v.right.copied()))
            .collect();
        assert_eq!(
            pre,
            vec![
                (2, Some(1), Some(5)),
                (1, None, None),
                (5, Some(4), None),
                (4, Some(3), None),
                (3, None, None),
            ]
        );
        assert_eq!(obst.tree().height(), 4);
    }

    #[test]
    fn test_shape_matches_reported_cost() {
        let obst = ObstSolution::new(vec![1, 2, 3, 4, 5], &CLRS_P, &CLRS_Q).unwrap();
        let recomputed = obst.tree().expected_search_cost(&CLRS_P, &CLRS_Q).unwrap();
        assert_abs_diff_eq!(recomputed, obst.expected_cost(), epsilon = 1e-9);
    }

    #[test]
    fn test_empty_instance() {
        let obst = ObstSolution::<i32>::new(Vec::new(), &[0.0], &[1.0]).unwrap();
        assert!(obst.tree().is_empty());
        assert_eq!(obst.pre_order().count(), 0);
        assert_eq!(obst.in_order().count(), 0);
        assert_abs_diff_eq!(obst.expected_cost(), 1.0);
    }

    #[test]
    fn test_rejects_malformed_input() {
        let err = ObstSolution::new(vec![1, 3, 2, 4, 5], &CLRS_P, &CLRS_Q).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidInput(InvalidInput::UnsortedKeys { index: 2 })
        ));

        let err = ObstSolution::new(vec![1, 2, 3, 4], &CLRS_P, &CLRS_Q).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidInput(InvalidInput::LengthMismatch { name: "p", .. })
        ));
    }

    #[test]
    fn test_key_limit_from_config() {
        let config = ObstConfig {
            max_keys: Some(4),
            ..ObstConfig::default()
        };
        let err =
            ObstSolution::with_config(&config, vec![1, 2, 3, 4, 5], &CLRS_P, &CLRS_Q).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidInput(InvalidInput::TooManyKeys { count: 5, limit: 4 })
        ));
    }

    #[test]
    fn test_string_keys() {
        let keys: Vec<String> = ["ant", "bee", "cat"].iter().map(|s| s.to_string()).collect();
        let p = [0.0, 0.1, 0.6, 0.1];
        let q = [0.05, 0.05, 0.05, 0.05];
        let obst = ObstSolution::new(keys, &p, &q).unwrap();
        assert_eq!(obst.tree().root().map(|n| n.key().as_str()), Some("bee"));
    }
}

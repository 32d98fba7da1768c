use log::trace;
use ndarray::Array2;

use super::{validate, ObstConfig};
use crate::error::Result;

/// Cost, weight and root tables of one optimal BST instance.
///
/// Each table is `(n + 1) x (n + 1)` and indexed by half-open key ranges
/// `(a, b)` with `a <= b`. Entries below the diagonal are never written.
#[derive(Debug, Clone, PartialEq)]
pub struct DpTables {
    cost: Array2<f64>,
    weight: Array2<f64>,
    root: Array2<usize>,
}

impl DpTables {
    /// Number of real keys `n`.
    pub fn len(&self) -> usize {
        self.cost.nrows() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Minimum expected search cost of the subtree over `keys[a..b]`.
    ///
    /// # Panics
    ///
    /// Panics if `a` or `b` is greater than `n`.
    pub fn cost(&self, a: usize, b: usize) -> f64 {
        self.cost[[a, b]]
    }

    /// Probability mass of `keys[a..b]` and the gaps `q[a..=b]`.
    ///
    /// # Panics
    ///
    /// Panics if `a` or `b` is greater than `n`.
    pub fn weight(&self, a: usize, b: usize) -> f64 {
        self.weight[[a, b]]
    }

    /// Index into `keys` of the root chosen for `keys[a..b]`, or `None` for
    /// an empty range.
    pub fn root(&self, a: usize, b: usize) -> Option<usize> {
        (a < b).then(|| self.root[[a, b]])
    }

    /// Expected search cost of the whole tree.
    pub fn expected_cost(&self) -> f64 {
        self.cost[[0, self.len()]]
    }

    pub fn costs(&self) -> &Array2<f64> {
        &self.cost
    }

    pub fn weights(&self) -> &Array2<f64> {
        &self.weight
    }

    /// Raw root table; only entries with `a < b` are meaningful.
    pub fn roots(&self) -> &Array2<usize> {
        &self.root
    }
}

/// Validates the instance with [`ObstConfig::default`] and fills the three
/// DP tables.
///
/// `p` and `q` follow the textbook layout: both hold `keys.len() + 1` entries
/// and `p[0]` must be zero.
///
/// # Examples
///
/// ```
/// use optimal_bst::dynamic::solve;
///
/// let tables = solve(&[10, 20], &[0.0, 0.3, 0.4], &[0.1, 0.1, 0.1]).unwrap();
/// assert_eq!(tables.root(0, 2), Some(1));
/// assert!((tables.weight(0, 2) - 1.0).abs() < 1e-12);
/// ```
pub fn solve<K: Ord>(keys: &[K], p: &[f64], q: &[f64]) -> Result<DpTables> {
    solve_with(&ObstConfig::default(), keys, p, q)
}

/// Same as [`solve`] with explicit validation settings.
pub fn solve_with<K: Ord>(
    config: &ObstConfig,
    keys: &[K],
    p: &[f64],
    q: &[f64],
) -> Result<DpTables> {
    validate::check(config, keys, p, q)?;
    Ok(fill_tables(p, q))
}

/// Bottom-up interval DP over validated input.
///
/// Ranges are processed by ascending length so both halves of every split
/// are final before they are read. Among equally cheap roots the leftmost
/// one is kept.
pub(crate) fn fill_tables(p: &[f64], q: &[f64]) -> DpTables {
    let n = q.len() - 1;
    let mut cost = Array2::<f64>::zeros((n + 1, n + 1));
    let mut weight = Array2::<f64>::zeros((n + 1, n + 1));
    let mut root = Array2::<usize>::zeros((n + 1, n + 1));

    for a in 0..=n {
        cost[[a, a]] = q[a];
        weight[[a, a]] = q[a];
    }

    for len in 1..=n {
        for a in 0..=n - len {
            let b = a + len;
            let w = weight[[a, b - 1]] + p[b] + q[b];
            weight[[a, b]] = w;

            let mut best = f64::INFINITY;
            let mut best_root = a;
            for r in a..b {
                let t = cost[[a, r]] + cost[[r + 1, b]] + w;
                if t < best {
                    best = t;
                    best_root = r;
                }
            }
            cost[[a, b]] = best;
            root[[a, b]] = best_root;
        }
        trace!("filled {} ranges of length {}", n - len + 1, len);
    }

    DpTables { cost, weight, root }
}

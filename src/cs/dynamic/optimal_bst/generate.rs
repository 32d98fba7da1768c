use std::collections::BTreeSet;

use rand::Rng;

use super::{ObstConfig, ObstSolution};
use crate::error::Result;

/// Keys and probabilities of one instance, in the textbook layout
/// (`p[0] == 0`, `p.len() == q.len() == keys.len() + 1`).
#[derive(Debug, Clone, PartialEq)]
pub struct ObstInstance {
    pub keys: Vec<i64>,
    pub p: Vec<f64>,
    pub q: Vec<f64>,
}

impl ObstInstance {
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn solve(&self) -> Result<ObstSolution<i64>> {
        self.solve_with(&ObstConfig::default())
    }

    pub fn solve_with(&self, config: &ObstConfig) -> Result<ObstSolution<i64>> {
        ObstSolution::with_config(config, self.keys.clone(), &self.p, &self.q)
    }
}

/// The five-key example of CLRS 15.5, expected cost 2.75.
pub fn clrs_instance() -> ObstInstance {
    ObstInstance {
        keys: vec![1, 2, 3, 4, 5],
        p: vec![0.00, 0.15, 0.10, 0.05, 0.10, 0.20],
        q: vec![0.05, 0.10, 0.05, 0.05, 0.05, 0.10],
    }
}

/// Draws `n` distinct sorted keys and strictly positive weights for every
/// key and gap, then normalizes all weights to sum to one.
///
/// # Examples
///
/// ```
/// use optimal_bst::dynamic::random_instance;
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let mut rng = ChaCha8Rng::seed_from_u64(42);
/// let instance = random_instance(8, &mut rng);
/// assert_eq!(instance.keys.len(), 8);
/// assert_eq!(instance.p[0], 0.0);
/// assert!(instance.solve().is_ok());
/// ```
pub fn random_instance<R: Rng + ?Sized>(n: usize, rng: &mut R) -> ObstInstance {
    let mut keys = BTreeSet::new();
    while keys.len() < n {
        keys.insert(i64::from(rng.gen::<i32>()));
    }

    let mut p = vec![0.0; n + 1];
    let mut q = vec![0.0; n + 1];
    for k in 0..=n {
        if k > 0 {
            p[k] = rng.gen_range(f64::EPSILON..1.0);
        }
        q[k] = rng.gen_range(f64::EPSILON..1.0);
    }

    let total: f64 = p.iter().chain(q.iter()).sum();
    p.iter_mut().chain(q.iter_mut()).for_each(|x| *x /= total);

    ObstInstance {
        keys: keys.into_iter().collect(),
        p,
        q,
    }
}

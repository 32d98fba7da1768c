use approx::abs_diff_eq;
use log::debug;

use super::ObstConfig;
use crate::error::InvalidInput;

/// Rejects instances the DP pass would silently get wrong.
pub(crate) fn check<K: Ord>(
    config: &ObstConfig,
    keys: &[K],
    p: &[f64],
    q: &[f64],
) -> Result<(), InvalidInput> {
    let outcome = check_instance(config, keys, p, q);
    if let Err(reason) = &outcome {
        debug!("rejected instance with {} keys: {}", keys.len(), reason);
    }
    outcome
}

fn check_instance<K: Ord>(
    config: &ObstConfig,
    keys: &[K],
    p: &[f64],
    q: &[f64],
) -> Result<(), InvalidInput> {
    let n = keys.len();
    if let Some(limit) = config.max_keys {
        if n > limit {
            return Err(InvalidInput::TooManyKeys { count: n, limit });
        }
    }

    for (name, values) in [("p", p), ("q", q)] {
        if values.len() != n + 1 {
            return Err(InvalidInput::LengthMismatch {
                name,
                expected: n + 1,
                actual: values.len(),
            });
        }
    }

    for (name, values) in [("p", p), ("q", q)] {
        if let Some((index, &value)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| !(0.0..=1.0).contains(*v))
        {
            return Err(InvalidInput::ProbabilityOutOfRange { name, index, value });
        }
    }

    if p[0] != 0.0 {
        return Err(InvalidInput::NonZeroPlaceholder(p[0]));
    }

    if let Some(index) = keys.windows(2).position(|pair| pair[0] >= pair[1]) {
        return Err(InvalidInput::UnsortedKeys { index: index + 1 });
    }

    let sum: f64 = p.iter().chain(q.iter()).sum();
    if !abs_diff_eq!(sum, 1.0, epsilon = config.tolerance) {
        return Err(InvalidInput::ProbabilitySum {
            sum,
            tolerance: config.tolerance,
        });
    }

    Ok(())
}

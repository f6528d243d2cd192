//! Seeded train/test index splitting.

use crate::error::{AquasolError, Result};

// ---------------------------------------------------------------------------
// PRNG (private per-module; same constants as forest.rs)
// ---------------------------------------------------------------------------

struct LcgRng {
    state: u64,
}

impl LcgRng {
    fn new(seed: u64) -> Self {
        Self {
            state: seed.wrapping_add(1),
        }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.state
    }

    fn next_bounded(&mut self, bound: u64) -> u64 {
        self.next_u64() % bound
    }
}

fn shuffle(rng: &mut LcgRng, data: &mut [usize]) {
    for i in (1..data.len()).rev() {
        let j = rng.next_bounded((i + 1) as u64) as usize;
        data.swap(i, j);
    }
}

/// Partition `0..n_samples` into (train, test) index sets.
///
/// Indices are shuffled with a seeded LCG, so identical inputs and seed give
/// an identical partition across runs. The test set holds
/// `round(n * test_fraction)` samples, at least 1 and at most `n - 1`.
///
/// # Errors
///
/// Returns an error if `n_samples < 2` or the fraction is outside (0, 1).
pub fn train_test_split(
    n_samples: usize,
    test_fraction: f64,
    seed: u64,
) -> Result<(Vec<usize>, Vec<usize>)> {
    if n_samples < 2 {
        return Err(AquasolError::InvalidInput(
            "need at least 2 samples to split".into(),
        ));
    }
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(AquasolError::InvalidInput(format!(
            "test fraction {test_fraction} outside (0, 1)"
        )));
    }

    let mut indices: Vec<usize> = (0..n_samples).collect();
    let mut rng = LcgRng::new(seed);
    shuffle(&mut rng, &mut indices);

    let n_test = ((n_samples as f64 * test_fraction).round() as usize)
        .max(1)
        .min(n_samples - 1);
    let test = indices.split_off(n_samples - n_test);
    Ok((indices, test))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_are_eighty_twenty() {
        let (train, test) = train_test_split(100, 0.2, 42).unwrap();
        assert_eq!(train.len(), 80);
        assert_eq!(test.len(), 20);
    }

    #[test]
    fn partition_is_disjoint_and_complete() {
        let (train, test) = train_test_split(37, 0.2, 7).unwrap();
        let mut all: Vec<usize> = train.iter().chain(test.iter()).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..37).collect::<Vec<_>>());
    }

    #[test]
    fn same_seed_same_partition() {
        let a = train_test_split(50, 0.2, 42).unwrap();
        let b = train_test_split(50, 0.2, 42).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn different_seed_differs() {
        let a = train_test_split(50, 0.2, 1).unwrap();
        let b = train_test_split(50, 0.2, 2).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn tiny_inputs() {
        let (train, test) = train_test_split(2, 0.2, 0).unwrap();
        assert_eq!(train.len(), 1);
        assert_eq!(test.len(), 1);
        assert!(train_test_split(1, 0.2, 0).is_err());
        assert!(train_test_split(10, 0.0, 0).is_err());
        assert!(train_test_split(10, 1.0, 0).is_err());
    }
}

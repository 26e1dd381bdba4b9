//! Weighted and uniform categorical choice helpers.

use rand::seq::SliceRandom;
use rand::Rng;

/// Choose uniformly from a non-empty slice, returning a clone.
pub fn choose<T: Clone, R: Rng>(rng: &mut R, items: &[T]) -> T {
    items
        .choose(rng)
        .expect("choice slices are non-empty")
        .clone()
}

/// Choose from `(value, weight)` pairs with probability proportional to the
/// weights, returning a clone of the value. Weight tables are static and
/// must contain at least one positive weight.
pub fn choose_weighted<T: Clone, R: Rng>(rng: &mut R, items: &[(T, f64)]) -> T {
    items
        .choose_weighted(rng, |item| item.1)
        .expect("weight tables are static and valid")
        .0
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    #[test]
    fn test_choose_uniform() {
        let mut rng = StdRng::seed_from_u64(42);
        let items = ["a", "b", "c"];
        for _ in 0..50 {
            let picked = choose(&mut rng, &items);
            assert!(items.contains(&picked));
        }
    }

    #[test]
    fn test_weighted_convergence() {
        // Weighted draws must converge to the configured weights over many
        // trials (statistical property, not exact).
        let mut rng = StdRng::seed_from_u64(42);
        let weights = [("INFO", 0.7), ("WARN", 0.1), ("ERROR", 0.1), ("DEBUG", 0.1)];
        let trials = 20_000usize;

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for _ in 0..trials {
            *counts.entry(choose_weighted(&mut rng, &weights)).or_default() += 1;
        }

        for (value, weight) in weights {
            let observed = counts[value] as f64 / trials as f64;
            assert!(
                (observed - weight).abs() < 0.02,
                "{value}: observed {observed}, expected {weight}"
            );
        }
    }

    #[test]
    fn test_weighted_zero_weight_never_chosen() {
        let mut rng = StdRng::seed_from_u64(42);
        let weights = [("kept", 1.0), ("dropped", 0.0)];
        for _ in 0..1000 {
            assert_eq!(choose_weighted(&mut rng, &weights), "kept");
        }
    }
}

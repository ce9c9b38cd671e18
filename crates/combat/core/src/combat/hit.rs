//! Hit chance and accuracy calculations.

use rand::Rng;

use crate::config::HitChanceRules;

/// Calculate hit chance based on accuracy vs evasion.
///
/// # Formula
///
/// ```text
/// hit_chance = base + (accuracy - evasion) * per_point
/// clamped to [min, max]
/// ```
///
/// # Returns
///
/// Hit chance as a probability in `[rules.min, rules.max]`.
pub fn hit_chance(accuracy: f64, evasion: f64, rules: &HitChanceRules) -> f64 {
    let chance = rules.base + (accuracy - evasion) * rules.per_point;
    if chance.is_nan() {
        return rules.min;
    }
    chance.clamp(rules.min, rules.max)
}

/// Roll whether an attack connects.
pub fn roll_hit(accuracy: f64, evasion: f64, rng: &mut impl Rng, rules: &HitChanceRules) -> bool {
    chance(rng, hit_chance(accuracy, evasion, rules))
}

/// Bernoulli roll that tolerates out-of-range and NaN probabilities.
pub(crate) fn chance(rng: &mut impl Rng, probability: f64) -> bool {
    if probability >= 1.0 {
        return true;
    }
    probability > 0.0 && rng.r#gen::<f64>() < probability
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn chance_is_clamped() {
        let rules = HitChanceRules::default();
        assert_eq!(hit_chance(10.0, 10.0, &rules), 0.9);
        assert_eq!(hit_chance(100.0, 0.0, &rules), 1.0);
        assert_eq!(hit_chance(0.0, 500.0, &rules), 0.05);
    }

    #[test]
    fn certain_hit_always_connects() {
        let rules = HitChanceRules {
            base: 1.0,
            ..HitChanceRules::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert!((0..100).all(|_| roll_hit(0.0, 0.0, &mut rng, &rules)));
    }

    #[test]
    fn degenerate_probabilities() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        assert!(!chance(&mut rng, 0.0));
        assert!(!chance(&mut rng, f64::NAN));
        assert!(chance(&mut rng, 2.0));
    }
}

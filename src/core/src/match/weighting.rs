use crate::r#match::ScorelineOutcome;
use crate::settings::WeightingSettings;

/// Adjusts the base weight of a scoreline for a given power differential
/// (positive favours the home side).
///
/// Outcomes agreeing with the favourite grow exponentially with the differential,
/// outcomes agreeing with the underdog shrink exponentially and get extra step
/// penalties past each upset threshold, level scorelines decay. Big favourites
/// also see lopsided scorelines boosted.
pub fn adjusted_weight(outcome: &ScorelineOutcome, diff: f64, settings: &WeightingSettings) -> f64 {
    let strength = diff.abs();
    let exponent = strength.min(settings.diff_cap);
    let margin = outcome.margin();

    if margin == 0 {
        return outcome.weight * settings.draw_decay.powf(exponent);
    }

    if strength == 0.0 {
        return outcome.weight;
    }

    let favourite_is_home = diff > 0.0;
    let outcome_is_home = margin > 0;

    if favourite_is_home == outcome_is_home {
        let mut weight = outcome.weight * settings.favoured_base.powf(exponent);

        let goal_margin = margin.unsigned_abs();
        if strength > settings.blowout_threshold && goal_margin >= 3 {
            weight *= 1.0
                + (strength - settings.blowout_threshold)
                    * settings.blowout_boost
                    * f64::from(goal_margin - 2);
        }

        weight
    } else {
        let mut weight = outcome.weight / settings.opposing_base.powf(exponent);

        for step in &settings.upset_steps {
            if strength > step.threshold {
                weight *= step.factor;
            }
        }

        weight
    }
}

/// Adjusted weights of every outcome in `table`, in table order.
pub fn reweight(table: &[ScorelineOutcome], diff: f64, settings: &WeightingSettings) -> Vec<f64> {
    table
        .iter()
        .map(|outcome| adjusted_weight(outcome, diff, settings))
        .collect()
}

/// Cumulative-weight roulette selection. `roll` is a uniform draw in `[0, 1)`.
pub fn roulette_select(weights: &[f64], roll: f64) -> Option<usize> {
    let total: f64 = weights.iter().sum();
    if weights.is_empty() || total <= 0.0 {
        return None;
    }

    let target = roll.clamp(0.0, 1.0) * total;
    let mut cumulative = 0.0;

    for (index, weight) in weights.iter().enumerate() {
        cumulative += weight;
        if target < cumulative {
            return Some(index);
        }
    }

    // floating point leftovers land on the last non-zero entry
    weights.iter().rposition(|weight| *weight > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::r#match::OUTCOME_TABLE;

    fn outcome_probabilities(diff: f64) -> (f64, f64, f64) {
        let settings = WeightingSettings::default();
        let weights = reweight(OUTCOME_TABLE, diff, &settings);
        let total: f64 = weights.iter().sum();

        let mut home = 0.0;
        let mut draw = 0.0;
        let mut away = 0.0;
        for (outcome, weight) in OUTCOME_TABLE.iter().zip(weights) {
            match outcome.margin().signum() {
                1 => home += weight,
                0 => draw += weight,
                _ => away += weight,
            }
        }

        (home / total, draw / total, away / total)
    }

    #[test]
    fn test_zero_differential_keeps_base_weights() {
        let settings = WeightingSettings::default();
        for outcome in OUTCOME_TABLE {
            assert_eq!(adjusted_weight(outcome, 0.0, &settings), outcome.weight);
        }
    }

    #[test]
    fn test_zero_differential_is_balanced() {
        let (home, _, away) = outcome_probabilities(0.0);
        assert!((home - away).abs() < 1e-9);
    }

    #[test]
    fn test_favourite_win_probability_is_monotonic() {
        let mut previous = outcome_probabilities(0.0).0;
        let mut diff = 0.25;
        while diff <= 22.0 {
            let (home, _, _) = outcome_probabilities(diff);
            assert!(home >= previous, "home win probability dropped at diff {}", diff);
            previous = home;
            diff += 0.25;
        }
    }

    #[test]
    fn test_draws_suppressed_as_gap_grows() {
        let (_, close_draw, _) = outcome_probabilities(1.0);
        let (_, wide_draw, _) = outcome_probabilities(12.0);
        assert!(wide_draw < close_draw);
    }

    #[test]
    fn test_upsets_rare_but_possible() {
        let (_, _, away) = outcome_probabilities(18.0);
        assert!(away > 0.0);
        assert!(away < 0.01);
    }

    #[test]
    fn test_negative_differential_mirrors_positive() {
        let (home, draw, away) = outcome_probabilities(6.0);
        let (m_home, m_draw, m_away) = outcome_probabilities(-6.0);
        assert!((home - m_away).abs() < 1e-9);
        assert!((draw - m_draw).abs() < 1e-9);
        assert!((away - m_home).abs() < 1e-9);
    }

    #[test]
    fn test_blowouts_boosted_for_big_favourites() {
        let settings = WeightingSettings::default();
        let blowout = ScorelineOutcome::new(5, 0, 1.0);
        let narrow = ScorelineOutcome::new(1, 0, 1.0);

        let ratio_small = adjusted_weight(&blowout, 4.0, &settings)
            / adjusted_weight(&narrow, 4.0, &settings);
        let ratio_big =
            adjusted_weight(&blowout, 14.0, &settings) / adjusted_weight(&narrow, 14.0, &settings);

        assert_eq!(ratio_small, 1.0);
        assert!(ratio_big > 1.0);
    }

    #[test]
    fn test_roulette_select() {
        let weights = [1.0, 0.0, 3.0];
        assert_eq!(roulette_select(&weights, 0.0), Some(0));
        assert_eq!(roulette_select(&weights, 0.24), Some(0));
        assert_eq!(roulette_select(&weights, 0.26), Some(2));
        assert_eq!(roulette_select(&weights, 0.9999), Some(2));
        assert_eq!(roulette_select(&[], 0.5), None);
        assert_eq!(roulette_select(&[0.0, 0.0], 0.5), None);
    }
}

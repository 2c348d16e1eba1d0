use crate::r#match::{
    adjusted_weight, roulette_select, KnockoutScore, PenaltyShootoutResolver, Score,
    ScorelineOutcome, OUTCOME_TABLE,
};
use crate::settings::SimulationSettings;
use crate::shared::RandomSource;
use crate::team::PowerScale;
use log::debug;

/// Samples scorelines from the ranking-driven outcome model.
#[derive(Debug, Clone)]
pub struct MatchOutcomeSimulator {
    settings: SimulationSettings,
    shootout: PenaltyShootoutResolver,
}

impl MatchOutcomeSimulator {
    pub fn new(settings: &SimulationSettings) -> Self {
        MatchOutcomeSimulator {
            settings: settings.clone(),
            shootout: PenaltyShootoutResolver::new(&settings.shootout),
        }
    }

    pub fn settings(&self) -> &SimulationSettings {
        &self.settings
    }

    pub fn shootout(&self) -> &PenaltyShootoutResolver {
        &self.shootout
    }

    /// Signed power gap from the home side's point of view, home advantage included.
    pub fn power_differential(&self, home_ranking: u16, away_ranking: u16, is_knockout: bool) -> f64 {
        let advantage = if is_knockout && self.settings.neutral_knockout_venue {
            0.0
        } else {
            self.settings.home_advantage
        };

        PowerScale::differential(home_ranking, away_ranking) + advantage
    }

    /// Regulation-time score. Level knockout scores are settled by [`Self::simulate_knockout`].
    pub fn simulate<R: RandomSource>(
        &self,
        home_ranking: u16,
        away_ranking: u16,
        is_knockout: bool,
        random: &mut R,
    ) -> Score {
        let diff = self.power_differential(home_ranking, away_ranking, is_knockout);
        let diff = self.apply_surprise(diff, random);

        self.sample_score(diff, random)
    }

    pub fn simulate_knockout<R: RandomSource>(
        &self,
        home_ranking: u16,
        away_ranking: u16,
        random: &mut R,
    ) -> KnockoutScore {
        let regular = self.simulate(home_ranking, away_ranking, true, random);

        self.shootout.resolve(
            regular,
            PowerScale::power(home_ranking),
            PowerScale::power(away_ranking),
            random,
        )
    }

    /// Occasionally pulls the differential toward the underdog. The pull shrinks
    /// as the gap widens so true mismatches survive.
    pub fn apply_surprise<R: RandomSource>(&self, diff: f64, random: &mut R) -> f64 {
        if !random.chance(self.settings.surprise_probability) {
            return diff;
        }

        let shrink = 1.0 / (1.0 + diff.abs() / 4.0);
        let magnitude = self.settings.surprise_magnitude * shrink * (0.5 + random.next_f64() * 0.5);

        debug!("surprise factor applied: diff {:.2}, swing {:.2}", diff, magnitude);

        if diff > 0.0 {
            diff - magnitude
        } else if diff < 0.0 {
            diff + magnitude
        } else if random.chance(0.5) {
            magnitude
        } else {
            -magnitude
        }
    }

    /// Draws one scoreline for a fixed differential.
    pub fn sample_score<R: RandomSource>(&self, diff: f64, random: &mut R) -> Score {
        let max_goals = self.settings.max_goals;

        let candidates: Vec<&ScorelineOutcome> = OUTCOME_TABLE
            .iter()
            .filter(|outcome| outcome.home <= max_goals && outcome.away <= max_goals)
            .collect();

        let weights: Vec<f64> = candidates
            .iter()
            .map(|outcome| adjusted_weight(outcome, diff, &self.settings.weighting))
            .collect();

        roulette_select(&weights, random.next_f64())
            .map(|index| Score::new(candidates[index].home, candidates[index].away))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::r#match::Side;
    use crate::shared::SeededRandom;

    const SAMPLES: usize = 10_000;

    fn simulator() -> MatchOutcomeSimulator {
        MatchOutcomeSimulator::new(&SimulationSettings::default())
    }

    fn rates(diff: f64, seed: u64) -> (f64, f64, f64) {
        let simulator = simulator();
        let mut random = SeededRandom::new(seed);

        let (mut home, mut draw, mut away) = (0usize, 0usize, 0usize);
        for _ in 0..SAMPLES {
            let diff = simulator.apply_surprise(diff, &mut random);
            match simulator.sample_score(diff, &mut random).winner() {
                Some(Side::Home) => home += 1,
                Some(Side::Away) => away += 1,
                None => draw += 1,
            }
        }

        let total = SAMPLES as f64;
        (home as f64 / total, draw as f64 / total, away as f64 / total)
    }

    #[test]
    fn test_stronger_side_wins_more_often() {
        let (strong_home, _, weak_away) = rates(10.0, 17);
        let (_, _, level_away) = rates(0.0, 18);

        assert!(strong_home > level_away);
        assert!(strong_home > weak_away);
        assert!(strong_home > 0.75);
    }

    #[test]
    fn test_win_rate_grows_with_differential() {
        let (small, _, _) = rates(2.0, 3);
        let (medium, _, _) = rates(8.0, 3);
        let (large, _, _) = rates(16.0, 3);

        assert!(small < medium);
        assert!(medium < large);
    }

    #[test]
    fn test_scores_within_bounds() {
        let simulator = simulator();
        let mut random = SeededRandom::new(5);

        for _ in 0..SAMPLES {
            let score = simulator.simulate(1, 200, false, &mut random);
            assert!(score.home <= 8 && score.away <= 8);
        }
    }

    #[test]
    fn test_goal_cap_respected() {
        let settings = SimulationSettings {
            max_goals: 3,
            ..SimulationSettings::default()
        };
        let simulator = MatchOutcomeSimulator::new(&settings);
        let mut random = SeededRandom::new(8);

        for _ in 0..2_000 {
            let score = simulator.sample_score(18.0, &mut random);
            assert!(score.home <= 3 && score.away <= 3);
        }
    }

    #[test]
    fn test_home_advantage_only_outside_neutral_knockouts() {
        let simulator = simulator();
        assert_eq!(simulator.power_differential(10, 10, false), 1.75);
        assert_eq!(simulator.power_differential(10, 10, true), 0.0);
    }

    #[test]
    fn test_surprise_pulls_toward_underdog() {
        let settings = SimulationSettings {
            surprise_probability: 1.0,
            ..SimulationSettings::default()
        };
        let simulator = MatchOutcomeSimulator::new(&settings);
        let mut random = SeededRandom::new(21);

        for _ in 0..100 {
            let adjusted = simulator.apply_surprise(6.0, &mut random);
            assert!(adjusted < 6.0);

            let adjusted = simulator.apply_surprise(-6.0, &mut random);
            assert!(adjusted > -6.0);
        }

        let near = 6.0 - simulator.apply_surprise(6.0, &mut SeededRandom::new(1));
        let far = 18.0 - simulator.apply_surprise(18.0, &mut SeededRandom::new(1));
        assert!(far < near);
    }

    #[test]
    fn test_knockout_always_has_winner() {
        let simulator = simulator();
        let mut random = SeededRandom::new(13);

        for _ in 0..2_000 {
            let score = simulator.simulate_knockout(20, 22, &mut random);
            assert!(score.winner().is_some());
        }
    }
}

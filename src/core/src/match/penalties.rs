use crate::r#match::{KnockoutScore, Score};
use crate::settings::ShootoutSettings;
use crate::shared::RandomSource;
use crate::team::PowerScale;
use log::{debug, warn};

/// Settles level knockout matches: extra time first, then a penalty shootout.
#[derive(Debug, Clone)]
pub struct PenaltyShootoutResolver {
    settings: ShootoutSettings,
}

impl PenaltyShootoutResolver {
    pub fn new(settings: &ShootoutSettings) -> Self {
        PenaltyShootoutResolver {
            settings: settings.clone(),
        }
    }

    /// Completes a knockout score. Regulation winners are returned untouched.
    pub fn resolve<R: RandomSource>(
        &self,
        regular: Score,
        home_power: u8,
        away_power: u8,
        random: &mut R,
    ) -> KnockoutScore {
        if !regular.is_draw() {
            return KnockoutScore::regular(regular);
        }

        let extra_time = self.extra_time(random);
        if !extra_time.is_draw() {
            debug!("decided in extra time: {}", extra_time);
            return KnockoutScore {
                regular,
                extra_time: Some(extra_time),
                penalties: None,
            };
        }

        let penalties = self.shootout(home_power, away_power, random);
        debug!("decided on penalties: {}", penalties);

        KnockoutScore {
            regular,
            extra_time: Some(extra_time),
            penalties: Some(penalties),
        }
    }

    pub fn extra_time<R: RandomSource>(&self, random: &mut R) -> Score {
        let home = self.extra_time_goals(random);
        let away = self.extra_time_goals(random);
        Score::new(home, away)
    }

    fn extra_time_goals<R: RandomSource>(&self, random: &mut R) -> u8 {
        let roll = random.next_f64();
        if roll < self.settings.extra_time_double_goal {
            2
        } else if roll < self.settings.extra_time_double_goal + self.settings.extra_time_single_goal {
            1
        } else {
            0
        }
    }

    pub fn conversion_probability(&self, power: u8) -> f64 {
        let power = power.clamp(PowerScale::MIN, PowerScale::MAX);
        let progress =
            f64::from(power - PowerScale::MIN) / f64::from(PowerScale::MAX - PowerScale::MIN);

        self.settings.penalty_min_success
            + (self.settings.penalty_max_success - self.settings.penalty_min_success) * progress
    }

    /// Regulation kicks for both sides, then sudden-death pairs until one side
    /// scores and the other misses. Never returns a level score.
    pub fn shootout<R: RandomSource>(&self, home_power: u8, away_power: u8, random: &mut R) -> Score {
        let home_probability = self.conversion_probability(home_power);
        let away_probability = self.conversion_probability(away_power);

        let mut home: u8 = 0;
        let mut away: u8 = 0;

        for _ in 0..self.settings.regulation_kicks {
            if random.chance(home_probability) {
                home = home.saturating_add(1);
            }
            if random.chance(away_probability) {
                away = away.saturating_add(1);
            }
        }

        let mut sudden_death_rounds: u16 = 0;

        while home == away {
            if sudden_death_rounds >= self.settings.max_sudden_death_rounds {
                warn!(
                    "shootout still level after {} sudden-death rounds, awarding to the stronger side",
                    sudden_death_rounds
                );
                let (leader, trailer) = if home_power >= away_power {
                    (&mut home, &mut away)
                } else {
                    (&mut away, &mut home)
                };
                if *leader == u8::MAX {
                    *trailer -= 1;
                } else {
                    *leader += 1;
                }
                break;
            }

            sudden_death_rounds += 1;

            let home_scored = random.chance(home_probability);
            let away_scored = random.chance(away_probability);

            if home_scored {
                home = home.saturating_add(1);
            }
            if away_scored {
                away = away.saturating_add(1);
            }
        }

        Score::new(home, away)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::r#match::Side;
    use crate::shared::SeededRandom;
    use std::collections::VecDeque;

    /// Replays scripted draws, then repeats the fallback value forever.
    struct ScriptedRandom {
        script: VecDeque<f64>,
        fallback: f64,
    }

    impl ScriptedRandom {
        fn new(script: Vec<f64>, fallback: f64) -> Self {
            ScriptedRandom {
                script: script.into(),
                fallback,
            }
        }
    }

    impl RandomSource for ScriptedRandom {
        fn next_f64(&mut self) -> f64 {
            self.script.pop_front().unwrap_or(self.fallback)
        }

        fn next_index(&mut self, _upper: usize) -> usize {
            0
        }
    }

    const SCORE: f64 = 0.0;
    const MISS: f64 = 0.99;

    fn resolver() -> PenaltyShootoutResolver {
        PenaltyShootoutResolver::new(&ShootoutSettings::default())
    }

    #[test]
    fn test_regulation_winner_untouched() {
        let mut random = SeededRandom::new(1);
        let score = resolver().resolve(Score::new(2, 1), 10, 10, &mut random);
        assert_eq!(score, KnockoutScore::regular(Score::new(2, 1)));
    }

    #[test]
    fn test_extra_time_decides() {
        // home scores once in extra time, away blank
        let mut random = ScriptedRandom::new(vec![0.10, MISS], MISS);
        let score = resolver().resolve(Score::new(1, 1), 10, 10, &mut random);

        assert_eq!(score.extra_time, Some(Score::new(1, 0)));
        assert_eq!(score.penalties, None);
        assert_eq!(score.winner(), Some(Side::Home));
    }

    #[test]
    fn test_extra_time_double_goal() {
        let mut random = ScriptedRandom::new(vec![0.01, 0.5], MISS);
        assert_eq!(resolver().extra_time(&mut random), Score::new(2, 0));
    }

    #[test]
    fn test_forced_tie_then_divergence_terminates() {
        // extra time blank, 50 rounds where both convert, then home scores and away misses
        let mut script = vec![MISS, MISS];
        script.extend(std::iter::repeat_n(SCORE, 100));
        script.push(SCORE);
        script.push(MISS);

        let mut random = ScriptedRandom::new(script, MISS);
        let score = resolver().resolve(Score::new(0, 0), 12, 12, &mut random);

        let penalties = score.penalties.expect("shootout played");
        assert_eq!(penalties, Score::new(51, 50));
        assert_eq!(score.winner(), Some(Side::Home));
    }

    #[test]
    fn test_sudden_death_cap_awards_stronger_side() {
        let mut random = ScriptedRandom::new(Vec::new(), SCORE);
        let penalties = resolver().shootout(8, 15, &mut random);

        assert!(!penalties.is_draw());
        assert_eq!(penalties.winner(), Some(Side::Away));
    }

    #[test]
    fn test_sudden_death_cap_beyond_score_range() {
        let settings = ShootoutSettings {
            max_sudden_death_rounds: 1_000,
            ..ShootoutSettings::default()
        };
        let resolver = PenaltyShootoutResolver::new(&settings);

        let mut random = ScriptedRandom::new(Vec::new(), SCORE);
        let penalties = resolver.shootout(12, 12, &mut random);
        assert_eq!(penalties, Score::new(u8::MAX, u8::MAX - 1));
        assert_eq!(penalties.winner(), Some(Side::Home));

        let mut random = ScriptedRandom::new(Vec::new(), SCORE);
        let penalties = resolver.shootout(4, 18, &mut random);
        assert_eq!(penalties.winner(), Some(Side::Away));
    }

    #[test]
    fn test_shootout_never_level() {
        let mut random = SeededRandom::new(99);
        let resolver = resolver();
        for _ in 0..2_000 {
            let penalties = resolver.shootout(10, 10, &mut random);
            assert!(!penalties.is_draw());
        }
    }

    #[test]
    fn test_conversion_probability_band() {
        let resolver = resolver();
        assert!((resolver.conversion_probability(1) - 0.70).abs() < 1e-9);
        assert!((resolver.conversion_probability(20) - 0.90).abs() < 1e-9);
        assert!(resolver.conversion_probability(15) > resolver.conversion_probability(5));
    }
}

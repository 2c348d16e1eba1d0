use crate::r#match::{MatchOutcomeSimulator, Score};
use crate::shared::RandomSource;
use crate::team::{Team, TeamId};
use log::debug;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Two-legged aggregate tie between group winners. The second team hosts the
/// return leg, so extra time and penalties are recorded from its point of view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayoffTie {
    pub first_team_id: TeamId,
    pub second_team_id: TeamId,
    pub first_leg: Score,
    pub second_leg: Score,
    pub extra_time: Option<Score>,
    pub penalties: Option<Score>,
    pub winner_id: TeamId,
}

impl PlayoffTie {
    pub fn play<R: RandomSource>(
        first: &Team,
        second: &Team,
        simulator: &MatchOutcomeSimulator,
        random: &mut R,
    ) -> Self {
        let first_leg = simulator.simulate(first.ranking, second.ranking, false, random);
        let second_leg = simulator.simulate(second.ranking, first.ranking, false, random);

        let mut tie = PlayoffTie {
            first_team_id: first.id,
            second_team_id: second.id,
            first_leg,
            second_leg,
            extra_time: None,
            penalties: None,
            winner_id: first.id,
        };

        if let Some(winner) = tie.regulation_winner() {
            tie.winner_id = winner;
            return tie;
        }

        tie.extra_time = Some(simulator.shootout().extra_time(random));
        if let Some(winner) = tie.aggregate_winner() {
            tie.winner_id = winner;
            return tie;
        }

        let penalties = simulator.shootout().shootout(second.power(), first.power(), random);
        tie.penalties = Some(penalties);
        tie.winner_id = if penalties.home > penalties.away {
            second.id
        } else {
            first.id
        };

        debug!(
            "playoff {} v {} settled on penalties {}",
            first.name, second.name, penalties
        );

        tie
    }

    /// Goals over both legs and extra time as `(first, second)`.
    pub fn aggregate(&self) -> (u16, u16) {
        let extra = self.extra_time.unwrap_or_default();

        let first = u16::from(self.first_leg.home)
            + u16::from(self.second_leg.away)
            + u16::from(extra.away);
        let second = u16::from(self.first_leg.away)
            + u16::from(self.second_leg.home)
            + u16::from(extra.home);

        (first, second)
    }

    /// Regulation away goals as `(first, second)`.
    pub fn away_goals(&self) -> (u8, u8) {
        (self.second_leg.away, self.first_leg.away)
    }

    pub fn loser_id(&self) -> TeamId {
        if self.winner_id == self.first_team_id {
            self.second_team_id
        } else {
            self.first_team_id
        }
    }

    fn aggregate_winner(&self) -> Option<TeamId> {
        let (first, second) = self.aggregate();
        self.pick(first.cmp(&second))
    }

    /// Aggregate over both legs, then away goals.
    pub(crate) fn regulation_winner(&self) -> Option<TeamId> {
        self.aggregate_winner().or_else(|| {
            let (first, second) = self.away_goals();
            self.pick(first.cmp(&second))
        })
    }

    fn pick(&self, ordering: Ordering) -> Option<TeamId> {
        match ordering {
            Ordering::Greater => Some(self.first_team_id),
            Ordering::Less => Some(self.second_team_id),
            Ordering::Equal => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SimulationSettings;
    use crate::shared::SeededRandom;

    fn tie(first_leg: Score, second_leg: Score) -> PlayoffTie {
        PlayoffTie {
            first_team_id: 1,
            second_team_id: 2,
            first_leg,
            second_leg,
            extra_time: None,
            penalties: None,
            winner_id: 0,
        }
    }

    #[test]
    fn test_aggregate_decides() {
        // first wins 2-0 at home, loses 1-2 away: 3-2 on aggregate
        let tie = tie(Score::new(2, 0), Score::new(2, 1));
        assert_eq!(tie.aggregate(), (3, 2));
        assert_eq!(tie.regulation_winner(), Some(1));
    }

    #[test]
    fn test_away_goals_break_level_aggregate() {
        // 1-2 then 0-1: aggregate 2-2, second scored twice away
        let tie = tie(Score::new(1, 2), Score::new(0, 1));
        assert_eq!(tie.aggregate(), (2, 2));
        assert_eq!(tie.away_goals(), (1, 2));
        assert_eq!(tie.regulation_winner(), Some(2));
    }

    #[test]
    fn test_identical_legs_stay_level() {
        let tie = tie(Score::new(1, 1), Score::new(1, 1));
        assert_eq!(tie.regulation_winner(), None);
    }

    #[test]
    fn test_extra_time_counts_toward_aggregate() {
        let mut tie = tie(Score::new(0, 0), Score::new(0, 0));
        tie.extra_time = Some(Score::new(0, 1));
        assert_eq!(tie.aggregate(), (1, 0));
        assert_eq!(tie.aggregate_winner(), Some(1));
    }

    #[test]
    fn test_play_always_produces_winner() {
        let simulator = MatchOutcomeSimulator::new(&SimulationSettings::default());
        let first = Team::new(1, "USA", "United States", "CONCACAF", 19);
        let second = Team::new(2, "MEX", "Mexico", "CONCACAF", 20);
        let mut random = SeededRandom::new(4);

        for _ in 0..500 {
            let tie = PlayoffTie::play(&first, &second, &simulator, &mut random);
            assert!(tie.winner_id == 1 || tie.winner_id == 2);
            assert_ne!(tie.winner_id, tie.loser_id());

            if tie.penalties.is_none() {
                let (a, b) = tie.aggregate();
                let (away_a, away_b) = tie.away_goals();
                assert!(a != b || away_a != away_b || tie.extra_time.is_some());
            }
        }
    }
}

use crate::error::{Result, SimulationError};
use crate::knockout::{
    KNOCKOUT_QUALIFIERS, KnockoutMatch, KnockoutRound, KnockoutRoundType, SeededQualifier,
};
use crate::r#match::{KnockoutScore, Side};
use crate::team::TeamId;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Round of 16 as `(winner's group, runner-up's group)` in match position order.
/// Winners of the same half never meet before the final.
pub const ROUND_OF_16_PAIRINGS: [(char, char); 8] = [
    ('A', 'B'),
    ('C', 'D'),
    ('E', 'F'),
    ('G', 'H'),
    ('B', 'A'),
    ('D', 'C'),
    ('F', 'E'),
    ('H', 'G'),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalResults {
    pub champion_id: TeamId,
    pub runner_up_id: TeamId,
    pub third_id: Option<TeamId>,
    pub fourth_id: Option<TeamId>,
    pub final_score: KnockoutScore,
}

/// Fixed single-elimination topology: ids 1-8 round of 16, 9-12 quarterfinals,
/// 13-14 semifinals, 15 third place, 16 final.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnockoutBracket {
    pub seeds: Vec<SeededQualifier>,
    pub matches: Vec<KnockoutMatch>,
}

impl KnockoutBracket {
    pub fn generate(seeds: Vec<SeededQualifier>) -> Result<Self> {
        if seeds.len() != KNOCKOUT_QUALIFIERS {
            return Err(SimulationError::WrongQualifierCount {
                expected: KNOCKOUT_QUALIFIERS,
                actual: seeds.len(),
            });
        }

        if let Some((group, position)) = seeds
            .iter()
            .map(|seed| (seed.seeding_group, seed.position))
            .duplicates()
            .next()
        {
            return Err(SimulationError::InvalidSeeding(format!(
                "{}{} drawn twice",
                group, position
            )));
        }

        let mut matches = Vec::with_capacity(KNOCKOUT_QUALIFIERS);

        for (index, (winner_group, runner_up_group)) in ROUND_OF_16_PAIRINGS.iter().enumerate() {
            let position = index as u8 + 1;
            let winner = Self::seed(&seeds, *winner_group, 1)?;
            let runner_up = Self::seed(&seeds, *runner_up_group, 2)?;

            let mut knockout_match = KnockoutMatch::new(
                KnockoutRoundType::RoundOf16.first_match_id() + index as u32,
                KnockoutRoundType::RoundOf16,
                position,
                Some(position.div_ceil(2)),
            );
            knockout_match.assign_home(winner.team_id);
            knockout_match.assign_away(runner_up.team_id);

            matches.push(knockout_match);
        }

        for round in &KnockoutRoundType::ALL[1..] {
            for index in 0..round.match_count() {
                let position = index as u8 + 1;
                let next_position = round.next().map(|_| position.div_ceil(2));

                matches.push(KnockoutMatch::new(
                    round.first_match_id() + index as u32,
                    *round,
                    position,
                    next_position,
                ));
            }
        }

        Ok(KnockoutBracket { seeds, matches })
    }

    fn seed(seeds: &[SeededQualifier], group: char, position: u8) -> Result<&SeededQualifier> {
        seeds
            .iter()
            .find(|seed| seed.seeding_group == group && seed.position == position)
            .ok_or_else(|| SimulationError::InvalidSeeding(format!("{}{} missing from draw", group, position)))
    }

    pub fn get(&self, match_id: u32) -> Option<&KnockoutMatch> {
        self.matches.iter().find(|m| m.id == match_id)
    }

    pub fn round_matches(&self, round: KnockoutRoundType) -> impl Iterator<Item = &KnockoutMatch> {
        self.matches.iter().filter(move |m| m.round == round)
    }

    pub fn round(&self, round: KnockoutRoundType) -> KnockoutRound {
        KnockoutRound::aggregate(round, &self.matches)
    }

    pub fn rounds(&self) -> Vec<KnockoutRound> {
        KnockoutRoundType::ALL
            .iter()
            .map(|round| self.round(*round))
            .collect()
    }

    /// Stores a result and moves the participants on. The bracket is left
    /// untouched when any step fails.
    pub fn record_result(&mut self, match_id: u32, score: KnockoutScore) -> Result<KnockoutMatch> {
        let mut bracket = self.clone();

        let completed = {
            let knockout_match = bracket.match_mut(match_id)?;
            knockout_match.complete(score)?;
            knockout_match.clone()
        };

        bracket.advance(&completed)?;
        *self = bracket;

        Ok(completed)
    }

    /// Winner goes to the next round's match at `ceil(position / 2)`, home from an
    /// odd position and away from an even one. Semifinal losers meet for third place.
    pub fn advance(&mut self, completed: &KnockoutMatch) -> Result<()> {
        let (winner, loser) = match (completed.winner_id, completed.loser_id) {
            (Some(winner), Some(loser)) => (winner, loser),
            _ => return Err(SimulationError::MatchNotReady(completed.id)),
        };

        let side = if completed.match_position % 2 == 1 {
            Side::Home
        } else {
            Side::Away
        };

        if let (Some(next_round), Some(next_position)) = (completed.round.next(), completed.next_match_position) {
            self.match_at_mut(next_round, next_position)?.assign(side, winner);
        }

        if completed.round == KnockoutRoundType::SemiFinal {
            self.match_at_mut(KnockoutRoundType::ThirdPlace, 1)?.assign(side, loser);
        }

        Ok(())
    }

    fn match_mut(&mut self, match_id: u32) -> Result<&mut KnockoutMatch> {
        self.matches
            .iter_mut()
            .find(|m| m.id == match_id)
            .ok_or(SimulationError::MatchNotFound(match_id))
    }

    fn match_at_mut(&mut self, round: KnockoutRoundType, position: u8) -> Result<&mut KnockoutMatch> {
        self.matches
            .iter_mut()
            .find(|m| m.round == round && m.match_position == position)
            .ok_or(SimulationError::MatchNotFound(
                round.first_match_id() + u32::from(position.saturating_sub(1)),
            ))
    }

    pub fn is_finished(&self) -> bool {
        self.round(KnockoutRoundType::Final).is_completed()
    }

    pub fn final_results(&self) -> Option<FinalResults> {
        let final_match = self.round_matches(KnockoutRoundType::Final).find(|m| m.is_completed())?;
        let third_place = self
            .round_matches(KnockoutRoundType::ThirdPlace)
            .find(|m| m.is_completed());

        Some(FinalResults {
            champion_id: final_match.winner_id?,
            runner_up_id: final_match.loser_id?,
            third_id: third_place.and_then(|m| m.winner_id),
            fourth_id: third_place.and_then(|m| m.loser_id),
            final_score: final_match.score?,
        })
    }
}

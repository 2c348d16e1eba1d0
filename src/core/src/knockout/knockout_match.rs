use crate::error::{Result, SimulationError};
use crate::knockout::KnockoutRoundType;
use crate::r#match::{KnockoutScore, Side};
use crate::team::TeamId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Pending,
    Ready,
    Completed,
}

/// One slot of the bracket. `pending` until both participants are known,
/// `ready` once they are, `completed` after it has been simulated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnockoutMatch {
    pub id: u32,
    pub round: KnockoutRoundType,
    pub match_position: u8,
    pub home_team_id: Option<TeamId>,
    pub away_team_id: Option<TeamId>,
    pub score: Option<KnockoutScore>,
    pub winner_id: Option<TeamId>,
    pub loser_id: Option<TeamId>,
    pub status: MatchStatus,
    pub next_match_position: Option<u8>,
}

impl KnockoutMatch {
    pub fn new(id: u32, round: KnockoutRoundType, match_position: u8, next_match_position: Option<u8>) -> Self {
        KnockoutMatch {
            id,
            round,
            match_position,
            home_team_id: None,
            away_team_id: None,
            score: None,
            winner_id: None,
            loser_id: None,
            status: MatchStatus::Pending,
            next_match_position,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == MatchStatus::Ready
    }

    pub fn is_completed(&self) -> bool {
        self.status == MatchStatus::Completed
    }

    pub fn participants(&self) -> Option<(TeamId, TeamId)> {
        Some((self.home_team_id?, self.away_team_id?))
    }

    pub fn assign_home(&mut self, team_id: TeamId) {
        self.home_team_id = Some(team_id);
        self.refresh_status();
    }

    pub fn assign_away(&mut self, team_id: TeamId) {
        self.away_team_id = Some(team_id);
        self.refresh_status();
    }

    pub fn assign(&mut self, side: Side, team_id: TeamId) {
        match side {
            Side::Home => self.assign_home(team_id),
            Side::Away => self.assign_away(team_id),
        }
    }

    fn refresh_status(&mut self) {
        if self.status != MatchStatus::Completed && self.participants().is_some() {
            self.status = MatchStatus::Ready;
        }
    }

    /// Checks that the match may be simulated now.
    pub fn ensure_playable(&self) -> Result<()> {
        match self.status {
            MatchStatus::Ready => Ok(()),
            MatchStatus::Completed => Err(SimulationError::MatchAlreadyPlayed(self.id.to_string())),
            MatchStatus::Pending => Err(SimulationError::MatchNotReady(self.id)),
        }
    }

    /// Stores the result and fixes winner and loser.
    pub fn complete(&mut self, score: KnockoutScore) -> Result<()> {
        self.ensure_playable()?;

        let (home, away) = self
            .participants()
            .ok_or(SimulationError::MatchNotReady(self.id))?;
        let side = score
            .winner()
            .ok_or(SimulationError::LevelKnockoutScore(self.id))?;

        let (winner, loser) = match side {
            Side::Home => (home, away),
            Side::Away => (away, home),
        };

        self.score = Some(score);
        self.winner_id = Some(winner);
        self.loser_id = Some(loser);
        self.status = MatchStatus::Completed;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::r#match::Score;

    #[test]
    fn test_status_transitions() {
        let mut knockout_match = KnockoutMatch::new(9, KnockoutRoundType::QuarterFinal, 1, Some(1));
        assert_eq!(knockout_match.status, MatchStatus::Pending);
        assert!(matches!(
            knockout_match.ensure_playable(),
            Err(SimulationError::MatchNotReady(9))
        ));

        knockout_match.assign(Side::Away, 4);
        assert_eq!(knockout_match.status, MatchStatus::Pending);

        knockout_match.assign(Side::Home, 7);
        assert!(knockout_match.is_ready());

        knockout_match
            .complete(KnockoutScore::regular(Score::new(0, 2)))
            .unwrap();

        assert!(knockout_match.is_completed());
        assert_eq!(knockout_match.winner_id, Some(4));
        assert_eq!(knockout_match.loser_id, Some(7));
    }

    #[test]
    fn test_completed_match_rejected() {
        let mut knockout_match = KnockoutMatch::new(1, KnockoutRoundType::RoundOf16, 1, Some(1));
        knockout_match.assign_home(1);
        knockout_match.assign_away(2);
        knockout_match
            .complete(KnockoutScore::regular(Score::new(1, 0)))
            .unwrap();

        let error = knockout_match
            .complete(KnockoutScore::regular(Score::new(0, 1)))
            .unwrap_err();
        assert!(matches!(error, SimulationError::MatchAlreadyPlayed(_)));
        assert_eq!(knockout_match.winner_id, Some(1));
    }

    #[test]
    fn test_level_score_rejected() {
        let mut knockout_match = KnockoutMatch::new(1, KnockoutRoundType::RoundOf16, 1, Some(1));
        knockout_match.assign_home(1);
        knockout_match.assign_away(2);

        let error = knockout_match
            .complete(KnockoutScore::regular(Score::new(1, 1)))
            .unwrap_err();
        assert!(matches!(error, SimulationError::LevelKnockoutScore(1)));
        assert!(knockout_match.is_ready());
    }
}

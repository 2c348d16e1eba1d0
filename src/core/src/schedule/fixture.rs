use crate::error::{Result, SimulationError};
use crate::r#match::Score;
use crate::team::TeamId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Qualification match between two members of the same group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    pub id: String,
    pub group_id: String,
    pub home_team_id: TeamId,
    pub away_team_id: TeamId,
    pub matchday: u16,
    pub date: Option<NaiveDate>,
    pub score: Option<Score>,
}

impl Fixture {
    pub fn new(
        id: String,
        group_id: &str,
        home_team_id: TeamId,
        away_team_id: TeamId,
        matchday: u16,
    ) -> Self {
        Fixture {
            id,
            group_id: group_id.to_string(),
            home_team_id,
            away_team_id,
            matchday,
            date: None,
            score: None,
        }
    }

    pub fn is_played(&self) -> bool {
        self.score.is_some()
    }

    pub fn involves(&self, team_id: TeamId) -> bool {
        self.home_team_id == team_id || self.away_team_id == team_id
    }

    /// Stores the final score. A fixture is played exactly once.
    pub fn record_result(&mut self, score: Score) -> Result<()> {
        if self.is_played() {
            return Err(SimulationError::MatchAlreadyPlayed(self.id.clone()));
        }

        self.score = Some(score);

        Ok(())
    }
}

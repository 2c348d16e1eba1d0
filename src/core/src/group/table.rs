use crate::error::{Result, SimulationError};
use crate::schedule::Fixture;
use crate::team::{Team, TeamId};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

pub const POINTS_FOR_WIN: u16 = 3;
pub const POINTS_FOR_DRAW: u16 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupStanding {
    pub team_id: TeamId,
    pub team_name: String,
    pub played: u16,
    pub won: u16,
    pub drawn: u16,
    pub lost: u16,
    pub goals_for: u16,
    pub goals_against: u16,
    pub goal_difference: i16,
    pub points: u16,
}

impl GroupStanding {
    pub fn new(team_id: TeamId, team_name: &str) -> Self {
        GroupStanding {
            team_id,
            team_name: team_name.to_string(),
            played: 0,
            won: 0,
            drawn: 0,
            lost: 0,
            goals_for: 0,
            goals_against: 0,
            goal_difference: 0,
            points: 0,
        }
    }

    fn record(&mut self, scored: u8, conceded: u8) {
        self.played += 1;
        self.goals_for += u16::from(scored);
        self.goals_against += u16::from(conceded);
        self.goal_difference = self.goals_for as i16 - self.goals_against as i16;

        match scored.cmp(&conceded) {
            Ordering::Greater => {
                self.won += 1;
                self.points += POINTS_FOR_WIN;
            }
            Ordering::Equal => {
                self.drawn += 1;
                self.points += POINTS_FOR_DRAW;
            }
            Ordering::Less => {
                self.lost += 1;
            }
        }
    }

    pub fn points_per_match(&self) -> f64 {
        if self.played == 0 {
            return 0.0;
        }
        f64::from(self.points) / f64::from(self.played)
    }

    /// Table order: points, goal difference, goals scored, then name.
    pub fn table_order(&self, other: &GroupStanding) -> Ordering {
        other
            .points
            .cmp(&self.points)
            .then_with(|| other.goal_difference.cmp(&self.goal_difference))
            .then_with(|| other.goals_for.cmp(&self.goals_for))
            .then_with(|| self.team_name.cmp(&other.team_name))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupTable {
    pub rows: Vec<GroupStanding>,
}

impl GroupTable {
    pub fn new(teams: &[Team]) -> Self {
        let mut table = GroupTable {
            rows: teams
                .iter()
                .map(|team| GroupStanding::new(team.id, &team.name))
                .collect(),
        };
        table.sort();
        table
    }

    pub fn sort(&mut self) {
        self.rows.sort_by(|a, b| a.table_order(b));
    }

    pub fn row(&self, team_id: TeamId) -> Option<&GroupStanding> {
        self.rows.iter().find(|row| row.team_id == team_id)
    }

    pub fn position(&self, team_id: TeamId) -> Option<usize> {
        self.rows.iter().position(|row| row.team_id == team_id).map(|idx| idx + 1)
    }

    pub fn leader(&self) -> Option<&GroupStanding> {
        self.rows.first()
    }

    pub fn runner_up(&self) -> Option<&GroupStanding> {
        self.rows.get(1)
    }

    pub fn total_points(&self) -> u32 {
        self.rows.iter().map(|row| u32::from(row.points)).sum()
    }
}

/// Applies played fixtures to group tables.
pub struct StandingsTracker;

impl StandingsTracker {
    /// Records `fixture` for both sides and re-sorts the table. Callers apply each
    /// fixture exactly once.
    pub fn apply(table: &mut GroupTable, fixture: &Fixture) -> Result<()> {
        let score = fixture
            .score
            .ok_or_else(|| SimulationError::FixtureNotPlayed(fixture.id.clone()))?;

        let home_index = Self::index_of(table, fixture.home_team_id)?;
        let away_index = Self::index_of(table, fixture.away_team_id)?;

        table.rows[home_index].record(score.home, score.away);
        table.rows[away_index].record(score.away, score.home);

        table.sort();

        Ok(())
    }

    fn index_of(table: &GroupTable, team_id: TeamId) -> Result<usize> {
        table
            .rows
            .iter()
            .position(|row| row.team_id == team_id)
            .ok_or(SimulationError::TeamNotFound(team_id))
    }
}

use crate::group::GroupTable;
use crate::team::{Team, TeamId};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub team_ids: Vec<TeamId>,
    pub table: GroupTable,
}

impl Group {
    pub fn new(id: String, name: String, teams: &[Team]) -> Self {
        Group {
            id,
            name,
            team_ids: teams.iter().map(|team| team.id).collect(),
            table: GroupTable::new(teams),
        }
    }

    pub fn size(&self) -> usize {
        self.team_ids.len()
    }

    pub fn contains(&self, team_id: TeamId) -> bool {
        self.team_ids.contains(&team_id)
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({})", self.name, self.id)?;
        writeln!(
            f,
            "{:>3} {:<24} {:>3} {:>3} {:>3} {:>3} {:>4} {:>4} {:>4} {:>4}",
            "#", "Team", "P", "W", "D", "L", "GF", "GA", "GD", "Pts"
        )?;

        for (position, row) in self.table.rows.iter().enumerate() {
            writeln!(
                f,
                "{:>3} {:<24} {:>3} {:>3} {:>3} {:>3} {:>4} {:>4} {:>4} {:>4}",
                position + 1,
                row.team_name,
                row.played,
                row.won,
                row.drawn,
                row.lost,
                row.goals_for,
                row.goals_against,
                row.goal_difference,
                row.points
            )?;
        }

        Ok(())
    }
}

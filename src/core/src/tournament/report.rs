use crate::confederation::Confederation;
use crate::schedule::Fixture;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of one synchronized qualification matchday.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchdayReport {
    pub matchday: u16,
    pub date: Option<NaiveDate>,
    pub fixtures: Vec<Fixture>,
    pub completed_confederations: Vec<String>,
}

impl MatchdayReport {
    pub fn played(&self) -> usize {
        self.fixtures.len()
    }
}

/// Group tables and qualifiers of one confederation, formatted for logs.
pub struct StandingsReport<'a> {
    confederation: &'a Confederation,
}

impl<'a> StandingsReport<'a> {
    pub fn new(confederation: &'a Confederation) -> Self {
        StandingsReport { confederation }
    }
}

impl fmt::Display for StandingsReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let confederation = self.confederation;
        let played = confederation.fixtures.iter().filter(|f| f.is_played()).count();

        writeln!(
            f,
            "{} ({} fixtures, {} played)",
            confederation.name,
            confederation.fixtures.len(),
            played
        )?;

        for group in &confederation.groups {
            writeln!(f)?;
            write!(f, "{}", group)?;
        }

        if let Some(tie) = &confederation.playoff {
            let (first, second) = tie.aggregate();
            writeln!(f)?;
            writeln!(
                f,
                "Playoff: {} - {} on aggregate ({} / {}), winner {}",
                first, second, tie.first_leg, tie.second_leg, tie.winner_id
            )?;
        }

        if !confederation.qualified_teams.is_empty() {
            writeln!(f)?;
            for team in &confederation.qualified_teams {
                writeln!(f, "  qualified: {} ({:?})", team.team_name, team.route)?;
            }
        }

        Ok(())
    }
}

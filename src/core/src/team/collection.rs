use crate::team::{Team, TeamId};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Ranking lookup consumed by the engine.
pub trait TeamLookup {
    fn team(&self, id: TeamId) -> Option<&Team>;

    fn ranking(&self, id: TeamId) -> Option<u16> {
        self.team(id).map(|team| team.ranking)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamCollection {
    pub teams: Vec<Team>,
}

impl TeamCollection {
    pub fn new(teams: Vec<Team>) -> Self {
        TeamCollection { teams }
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    /// Teams of a confederation ordered by ranking.
    pub fn of_confederation(&self, confederation: &str) -> Vec<Team> {
        self.teams
            .iter()
            .filter(|team| team.confederation == confederation)
            .sorted_by_key(|team| (team.ranking, team.id))
            .cloned()
            .collect()
    }

    pub fn name(&self, id: TeamId) -> &str {
        self.team(id).map(|team| team.name.as_str()).unwrap_or("unknown")
    }
}

impl TeamLookup for TeamCollection {
    fn team(&self, id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|team| team.id == id)
    }
}

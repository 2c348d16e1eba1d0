use crate::loaders::{ConfederationEntity, ConfederationLoader, SettingsLoader, TeamEntity, TeamLoader};
use engine::SimulationSettings;

pub struct DatabaseEntity {
    pub teams: Vec<TeamEntity>,
    pub confederations: Vec<ConfederationEntity>,
    pub settings: SimulationSettings,
}

pub struct DatabaseLoader;

impl DatabaseLoader {
    pub fn load() -> Result<DatabaseEntity, serde_json::Error> {
        Ok(DatabaseEntity {
            teams: TeamLoader::load()?,
            confederations: ConfederationLoader::load()?,
            settings: SettingsLoader::load()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_embedded_data_parses() {
        let database = DatabaseLoader::load().unwrap();

        assert_eq!(database.teams.len(), 66);
        assert_eq!(database.confederations.len(), 5);
        assert_eq!(database.settings.max_goals, 8);
        assert_eq!(database.settings.weighting.diff_cap, 15.0);
    }

    #[test]
    fn test_slots_total_sixteen() {
        let database = DatabaseLoader::load().unwrap();
        let slots: usize = database
            .confederations
            .iter()
            .map(|confederation| confederation.qualification_slots)
            .sum();

        assert_eq!(slots, 16);
    }

    #[test]
    fn test_teams_unique_and_assigned() {
        let database = DatabaseLoader::load().unwrap();

        let ids: HashSet<u32> = database.teams.iter().map(|team| team.id).collect();
        assert_eq!(ids.len(), database.teams.len());

        let codes: HashSet<&str> = database.confederations.iter().map(|c| c.code.as_str()).collect();
        assert!(database.teams.iter().all(|team| codes.contains(team.confederation.as_str())));
    }
}

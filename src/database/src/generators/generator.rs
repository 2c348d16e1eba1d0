use crate::loaders::{ConfederationEntity, DatabaseEntity};
use engine::{FormatRules, SimulationSettings, Team, TeamCollection};
use log::debug;

/// Engine-ready reference data: teams, qualification formats and settings.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    pub teams: TeamCollection,
    pub formats: Vec<FormatRules>,
    pub settings: SimulationSettings,
}

pub struct DatabaseGenerator;

impl DatabaseGenerator {
    pub fn generate(data: &DatabaseEntity) -> ReferenceData {
        let teams = data
            .teams
            .iter()
            .map(|team| Team::new(team.id, &team.code, &team.name, &team.confederation, team.ranking))
            .collect();

        let formats: Vec<FormatRules> = data
            .confederations
            .iter()
            .map(DatabaseGenerator::generate_format)
            .collect();

        debug!(
            "reference data: {} teams, {} confederations",
            data.teams.len(),
            formats.len()
        );

        ReferenceData {
            teams: TeamCollection::new(teams),
            formats,
            settings: data.settings.clone(),
        }
    }

    fn generate_format(confederation: &ConfederationEntity) -> FormatRules {
        let mut rules = FormatRules::new(
            &confederation.code,
            confederation.format,
            confederation.qualification_slots,
        )
        .with_double_round_robin(confederation.double_round_robin);

        rules.name = confederation.name.clone();
        rules.preferred_group_sizes = confederation.preferred_group_sizes.clone();
        rules.matchday_offset = confederation.matchday_offset;

        if let Some(min) = confederation.min_group_size {
            rules.min_group_size = min;
        }

        if let Some(max) = confederation.max_group_size {
            rules.max_group_size = max;
        }

        if let Some(count) = confederation.fixed_group_count {
            rules = rules.with_fixed_group_count(count);
        }

        rules
    }
}

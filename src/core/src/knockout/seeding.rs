use crate::confederation::QualifiedTeam;
use crate::error::{Result, SimulationError};
use crate::shared::RandomSource;
use crate::team::TeamId;
use itertools::Itertools;
use log::debug;
use serde::{Deserialize, Serialize};

pub const KNOCKOUT_QUALIFIERS: usize = 16;
pub const SEEDING_GROUPS: [char; 8] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H'];

/// Qualifier placed into a two-team seeding group. Position 1 plays the role of a
/// group winner in the round of 16, position 2 the runner-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeededQualifier {
    pub team_id: TeamId,
    pub team_name: String,
    pub ranking: u16,
    pub seeding_group: char,
    pub position: u8,
}

pub struct SeedingDraw;

impl SeedingDraw {
    /// Splits the qualifiers into two pots by ranking and deals each shuffled pot
    /// across groups A to H.
    pub fn draw<R: RandomSource>(qualified: &[QualifiedTeam], random: &mut R) -> Result<Vec<SeededQualifier>> {
        if qualified.len() != KNOCKOUT_QUALIFIERS {
            return Err(SimulationError::WrongQualifierCount {
                expected: KNOCKOUT_QUALIFIERS,
                actual: qualified.len(),
            });
        }

        if let Some(duplicate) = qualified.iter().map(|team| team.team_id).duplicates().next() {
            return Err(SimulationError::InvalidSeeding(format!(
                "team {} qualified twice",
                duplicate
            )));
        }

        let ranked: Vec<&QualifiedTeam> = qualified
            .iter()
            .sorted_by_key(|team| (team.ranking, team.team_id))
            .collect();

        let (top, bottom) = ranked.split_at(SEEDING_GROUPS.len());

        let mut seeds = Vec::with_capacity(KNOCKOUT_QUALIFIERS);
        for (position, pot) in [(1u8, top), (2u8, bottom)] {
            let mut pot = pot.to_vec();
            random.shuffle(&mut pot);

            for (group, team) in SEEDING_GROUPS.iter().zip(pot) {
                seeds.push(SeededQualifier {
                    team_id: team.team_id,
                    team_name: team.team_name.clone(),
                    ranking: team.ranking,
                    seeding_group: *group,
                    position,
                });
            }
        }

        debug!(
            "seeding draw: {}",
            seeds
                .iter()
                .map(|seed| format!("{}{} {}", seed.seeding_group, seed.position, seed.team_name))
                .join(", ")
        );

        Ok(seeds)
    }
}

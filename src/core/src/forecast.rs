use crate::confederation::FormatRules;
use crate::error::Result;
use crate::knockout::FinalResults;
use crate::r#match::MatchOutcomeSimulator;
use crate::schedule::MatchdayCalendar;
use crate::settings::SimulationSettings;
use crate::shared::SeededRandom;
use crate::team::{TeamCollection, TeamId};
use crate::tournament::Tournament;
use crate::utils::TimeEstimation;
use itertools::Itertools;
use log::info;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastEntry {
    pub team_id: TeamId,
    pub team_name: String,
    pub titles: usize,
    pub finals: usize,
    pub probability: f64,
}

/// Monte-Carlo title odds from many independent tournaments.
#[derive(Debug, Clone)]
pub struct TournamentForecast {
    pub runs: usize,
    champions: HashMap<TeamId, usize>,
    finalists: HashMap<TeamId, usize>,
    names: HashMap<TeamId, String>,
}

impl TournamentForecast {
    /// Run `n` uses seed `base_seed + n`, so a forecast is reproducible whatever
    /// the thread count.
    pub fn run(
        teams: &TeamCollection,
        formats: &[FormatRules],
        settings: &SimulationSettings,
        runs: usize,
        base_seed: u64,
    ) -> Result<Self> {
        let simulator = MatchOutcomeSimulator::new(settings);
        let calendar = MatchdayCalendar::new(&settings.calendar);

        let (results, elapsed) = TimeEstimation::estimate(|| {
            (0..runs)
                .into_par_iter()
                .map(|run| {
                    let mut random = SeededRandom::new(base_seed.wrapping_add(run as u64));
                    let mut tournament =
                        Tournament::new(run as u32 + 1, "Forecast", teams.clone(), formats.to_vec());

                    tournament.play_out(&calendar, &simulator, &mut random)
                })
                .collect::<Result<Vec<FinalResults>>>()
        });

        let results = results?;

        info!("🔮 forecast: {} tournaments simulated in {} ms", results.len(), elapsed);

        let champions = results.iter().map(|result| result.champion_id).counts();
        let finalists = results
            .iter()
            .flat_map(|result| [result.champion_id, result.runner_up_id])
            .counts();

        let names = teams
            .teams
            .iter()
            .map(|team| (team.id, team.name.clone()))
            .collect();

        Ok(TournamentForecast {
            runs: results.len(),
            champions,
            finalists,
            names,
        })
    }

    pub fn titles(&self, team_id: TeamId) -> usize {
        self.champions.get(&team_id).copied().unwrap_or(0)
    }

    pub fn probability(&self, team_id: TeamId) -> f64 {
        if self.runs == 0 {
            return 0.0;
        }

        self.titles(team_id) as f64 / self.runs as f64
    }

    /// Teams with at least one title, most titles first.
    pub fn favourites(&self, count: usize) -> Vec<ForecastEntry> {
        self.champions
            .iter()
            .sorted_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)))
            .take(count)
            .map(|(&team_id, &titles)| ForecastEntry {
                team_id,
                team_name: self.names.get(&team_id).cloned().unwrap_or_default(),
                titles,
                finals: self.finalists.get(&team_id).copied().unwrap_or(0),
                probability: self.probability(team_id),
            })
            .collect()
    }
}

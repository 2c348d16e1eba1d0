use crate::knockout::FinalResults;
use crate::tournament::Tournament;
use log::info;

/// Receives the outcome once a tournament's final has been played.
pub trait ChampionshipListener: Send + Sync {
    fn on_champion(&self, tournament: &Tournament, results: &FinalResults);
}

pub struct LoggingChampionshipListener;

impl ChampionshipListener for LoggingChampionshipListener {
    fn on_champion(&self, tournament: &Tournament, results: &FinalResults) {
        let name = |id| tournament.teams.name(id).to_string();

        info!(
            "🏆 {}: {} beat {} {} in the final",
            tournament.name,
            name(results.champion_id),
            name(results.runner_up_id),
            results.final_score
        );

        if let (Some(third), Some(fourth)) = (results.third_id, results.fourth_id) {
            info!("🥉 {}: {} finished third ahead of {}", tournament.name, name(third), name(fourth));
        }
    }
}

use crate::confederation::{FormatRules, QualifiedTeam};
use crate::error::Result;
use crate::group::Group;
use crate::knockout::{FinalResults, KnockoutBracket, KnockoutMatch, KnockoutRoundType};
use crate::r#match::MatchOutcomeSimulator;
use crate::schedule::{Fixture, MatchdayCalendar};
use crate::settings::SimulationSettings;
use crate::shared::SeededRandom;
use crate::team::TeamCollection;
use crate::tournament::{
    ChampionshipListener, LoggingChampionshipListener, MatchdayReport, Tournament, TournamentRepository,
    TournamentStage, Versioned,
};
use crate::utils::Logging;
use log::debug;

/// Entry point for callers. Every operation loads the tournament, applies one
/// change and saves it back under an optimistic version check, so a failed call
/// leaves the stored document untouched.
pub struct TournamentService<S: TournamentRepository> {
    repository: S,
    simulator: MatchOutcomeSimulator,
    calendar: MatchdayCalendar,
    listener: Box<dyn ChampionshipListener>,
    seed: u64,
}

impl<S: TournamentRepository> TournamentService<S> {
    pub fn new(
        repository: S,
        settings: &SimulationSettings,
        seed: u64,
        listener: Box<dyn ChampionshipListener>,
    ) -> Self {
        TournamentService {
            repository,
            simulator: MatchOutcomeSimulator::new(settings),
            calendar: MatchdayCalendar::new(&settings.calendar),
            listener,
            seed,
        }
    }

    pub fn with_logging(repository: S, settings: &SimulationSettings, seed: u64) -> Self {
        Self::new(repository, settings, seed, Box::new(LoggingChampionshipListener))
    }

    pub fn repository(&self) -> &S {
        &self.repository
    }

    /// Randomness for one call, derived from the base seed, the tournament and its
    /// stored version. Replaying the same calls gives the same tournament.
    fn random_for(&self, tournament_id: u32, version: u64) -> SeededRandom {
        let mixed = self
            .seed
            .wrapping_mul(0x9E37_79B9_7F4A_7C15)
            .wrapping_add(u64::from(tournament_id) << 32)
            ^ version.wrapping_mul(0xBF58_476D_1CE4_E5B9);

        SeededRandom::new(mixed)
    }

    fn mutate<T, F>(&self, tournament_id: u32, action: F) -> Result<T>
    where
        F: FnOnce(&mut Tournament, &mut SeededRandom) -> Result<T>,
    {
        let Versioned {
            version,
            value: mut tournament,
        } = self.repository.load(tournament_id)?;

        let mut random = self.random_for(tournament_id, version);
        let was_finished = tournament.stage == TournamentStage::Finished;

        let output = action(&mut tournament, &mut random)?;
        let saved = self.repository.save(&tournament, version)?;

        debug!("tournament {} saved at version {}", tournament_id, saved);

        if !was_finished {
            if let Some(results) = &tournament.final_results {
                self.listener.on_champion(&tournament, results);
            }
        }

        Ok(output)
    }

    // ========== Qualification ==========

    pub fn create_tournament(&self, name: &str, teams: TeamCollection, formats: Vec<FormatRules>) -> Result<u32> {
        let id = self.repository.next_id();
        let tournament = Tournament::new(id, name, teams, formats);
        self.repository.insert(&tournament)?;

        Ok(id)
    }

    pub fn tournament(&self, tournament_id: u32) -> Result<Tournament> {
        Ok(self.repository.load(tournament_id)?.value)
    }

    pub fn start_qualification(&self, tournament_id: u32) -> Result<()> {
        self.mutate(tournament_id, |tournament, random| {
            tournament.start_qualification(&self.calendar, random)
        })
    }

    pub fn simulate_next_matchday(&self, tournament_id: u32) -> Result<MatchdayReport> {
        self.mutate(tournament_id, |tournament, random| {
            tournament.simulate_next_matchday(&self.calendar, &self.simulator, random)
        })
    }

    pub fn simulate_fixture(&self, tournament_id: u32, confederation_id: &str, fixture_id: &str) -> Result<Fixture> {
        self.mutate(tournament_id, |tournament, random| {
            tournament.simulate_fixture(confederation_id, fixture_id, &self.simulator, random)
        })
    }

    pub fn simulate_qualification(&self, tournament_id: u32) -> Result<Vec<MatchdayReport>> {
        self.mutate(tournament_id, |tournament, random| {
            Logging::estimate_result(
                || tournament.simulate_qualification(&self.calendar, &self.simulator, random),
                "qualification",
            )
        })
    }

    pub fn qualified_teams(&self, tournament_id: u32) -> Result<Vec<QualifiedTeam>> {
        self.tournament(tournament_id)?.qualified_teams()
    }

    pub fn standings(&self, tournament_id: u32, confederation_id: &str) -> Result<Vec<Group>> {
        let tournament = self.tournament(tournament_id)?;
        Ok(tournament.confederation(confederation_id)?.groups.clone())
    }

    // ========== Knockout ==========

    pub fn generate_bracket(&self, tournament_id: u32) -> Result<KnockoutBracket> {
        self.mutate(tournament_id, |tournament, random| {
            tournament.generate_bracket(&self.simulator, random).cloned()
        })
    }

    pub fn simulate_knockout_match(&self, tournament_id: u32, match_id: u32) -> Result<KnockoutMatch> {
        self.mutate(tournament_id, |tournament, random| {
            tournament.simulate_knockout_match(match_id, &self.simulator, random)
        })
    }

    pub fn simulate_knockout_round(&self, tournament_id: u32, round: KnockoutRoundType) -> Result<Vec<KnockoutMatch>> {
        self.mutate(tournament_id, |tournament, random| {
            tournament.simulate_knockout_round(round, &self.simulator, random)
        })
    }

    pub fn simulate_knockout_stage(&self, tournament_id: u32) -> Result<Vec<KnockoutMatch>> {
        self.mutate(tournament_id, |tournament, random| {
            tournament.simulate_knockout_stage(&self.simulator, random)
        })
    }

    pub fn final_results(&self, tournament_id: u32) -> Result<FinalResults> {
        self.tournament(tournament_id)?.results()
    }

    /// Drives a tournament from wherever it stands to the final in one call.
    pub fn run_to_completion(&self, tournament_id: u32) -> Result<FinalResults> {
        self.mutate(tournament_id, |tournament, random| {
            tournament.play_out(&self.calendar, &self.simulator, random)
        })
    }
}

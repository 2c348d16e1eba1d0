use crate::confederation::{Confederation, FormatRules, QualifiedTeam};
use crate::error::{Result, SimulationError};
use crate::knockout::{FinalResults, KnockoutBracket, KnockoutBracketManager, KnockoutMatch, KnockoutRoundType};
use crate::r#match::MatchOutcomeSimulator;
use crate::schedule::{Fixture, MatchdayCalendar};
use crate::shared::RandomSource;
use crate::team::TeamCollection;
use crate::tournament::MatchdayReport;
use log::info;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStage {
    Created,
    Qualification,
    Knockout,
    Finished,
}

/// Whole tournament document: qualification campaigns, the knockout bracket and
/// the final standings once the final is played.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: u32,
    pub name: String,
    pub teams: TeamCollection,
    pub formats: Vec<FormatRules>,
    pub stage: TournamentStage,
    pub confederations: Vec<Confederation>,
    pub current_matchday: u16,
    pub bracket: Option<KnockoutBracket>,
    pub final_results: Option<FinalResults>,
}

impl Tournament {
    pub fn new(id: u32, name: &str, teams: TeamCollection, formats: Vec<FormatRules>) -> Self {
        Tournament {
            id,
            name: name.to_string(),
            teams,
            formats,
            stage: TournamentStage::Created,
            confederations: Vec::new(),
            current_matchday: 0,
            bracket: None,
            final_results: None,
        }
    }

    // ========== Qualification ==========

    pub fn start_qualification<R: RandomSource>(&mut self, calendar: &MatchdayCalendar, random: &mut R) -> Result<()> {
        if self.stage != TournamentStage::Created {
            return Err(SimulationError::QualificationAlreadyStarted);
        }

        let confederations = self
            .formats
            .iter()
            .map(|rules| {
                let teams = self.teams.of_confederation(&rules.confederation);
                Confederation::draw(rules, &teams, calendar, random)
            })
            .collect::<Result<Vec<_>>>()?;

        self.confederations = confederations;
        self.current_matchday = 0;
        self.stage = TournamentStage::Qualification;

        info!(
            "🌍 {}: qualification started across {} confederations, {} matchdays",
            self.name,
            self.confederations.len(),
            self.last_matchday()
        );

        Ok(())
    }

    pub fn last_matchday(&self) -> u16 {
        self.confederations
            .iter()
            .map(Confederation::last_matchday)
            .max()
            .unwrap_or(0)
    }

    pub fn confederation(&self, confederation_id: &str) -> Result<&Confederation> {
        self.confederations
            .iter()
            .find(|confederation| confederation.id == confederation_id)
            .ok_or_else(|| SimulationError::ConfederationNotFound(confederation_id.to_string()))
    }

    pub fn is_qualification_complete(&self) -> bool {
        !self.confederations.is_empty() && self.confederations.iter().all(|c| c.completed)
    }

    fn ensure_qualification_running(&self) -> Result<()> {
        match self.stage {
            TournamentStage::Created => Err(SimulationError::QualificationNotStarted),
            TournamentStage::Qualification if !self.is_qualification_complete() => Ok(()),
            _ => Err(SimulationError::QualificationCompleted),
        }
    }

    /// Plays the next global matchday in every confederation.
    pub fn simulate_next_matchday<R: RandomSource>(
        &mut self,
        calendar: &MatchdayCalendar,
        simulator: &MatchOutcomeSimulator,
        random: &mut R,
    ) -> Result<MatchdayReport> {
        self.ensure_qualification_running()?;

        let matchday = self.current_matchday + 1;
        let mut fixtures = Vec::new();
        let mut completed_confederations = Vec::new();

        for confederation in self.confederations.iter_mut() {
            let played = confederation.simulate_matchday(matchday, &self.teams, simulator, random)?;
            fixtures.extend(
                played
                    .iter()
                    .filter_map(|fixture_id| confederation.fixture(fixture_id))
                    .cloned(),
            );

            if confederation.complete_if_finished(&self.teams, simulator, random)? {
                completed_confederations.push(confederation.id.clone());
            }
        }

        self.current_matchday = matchday;

        info!(
            "📅 {}: matchday {} played, {} fixtures",
            self.name,
            matchday,
            fixtures.len()
        );

        Ok(MatchdayReport {
            matchday,
            date: Some(calendar.date_of(matchday)),
            fixtures,
            completed_confederations,
        })
    }

    /// Plays a single fixture out of matchday order.
    pub fn simulate_fixture<R: RandomSource>(
        &mut self,
        confederation_id: &str,
        fixture_id: &str,
        simulator: &MatchOutcomeSimulator,
        random: &mut R,
    ) -> Result<Fixture> {
        self.ensure_qualification_running()?;

        let confederation = self
            .confederations
            .iter_mut()
            .find(|confederation| confederation.id == confederation_id)
            .ok_or_else(|| SimulationError::ConfederationNotFound(confederation_id.to_string()))?;

        confederation.play_fixture(fixture_id, &self.teams, simulator, random)?;
        confederation.complete_if_finished(&self.teams, simulator, random)?;

        confederation
            .fixture(fixture_id)
            .cloned()
            .ok_or_else(|| SimulationError::FixtureNotFound(fixture_id.to_string()))
    }

    pub fn simulate_qualification<R: RandomSource>(
        &mut self,
        calendar: &MatchdayCalendar,
        simulator: &MatchOutcomeSimulator,
        random: &mut R,
    ) -> Result<Vec<MatchdayReport>> {
        self.ensure_qualification_running()?;

        let mut reports = Vec::new();
        while self.current_matchday < self.last_matchday() && !self.is_qualification_complete() {
            reports.push(self.simulate_next_matchday(calendar, simulator, random)?);
        }

        for confederation in self.confederations.iter_mut() {
            confederation.complete_if_finished(&self.teams, simulator, random)?;
        }

        Ok(reports)
    }

    pub fn qualified_teams(&self) -> Result<Vec<QualifiedTeam>> {
        if self.stage == TournamentStage::Created {
            return Err(SimulationError::QualificationNotStarted);
        }

        if !self.is_qualification_complete() {
            return Err(SimulationError::QualificationIncomplete);
        }

        Ok(self
            .confederations
            .iter()
            .flat_map(|confederation| confederation.qualified_teams.iter().cloned())
            .collect())
    }

    // ========== Knockout ==========

    /// Draws the bracket. A bracket that already exists is returned as is.
    pub fn generate_bracket<R: RandomSource>(
        &mut self,
        simulator: &MatchOutcomeSimulator,
        random: &mut R,
    ) -> Result<&KnockoutBracket> {
        if self.bracket.is_none() {
            let qualified = self.qualified_teams()?;
            let bracket = KnockoutBracketManager::new(simulator).generate_bracket(&qualified, random)?;

            self.bracket = Some(bracket);
            self.stage = TournamentStage::Knockout;
        }

        self.bracket.as_ref().ok_or(SimulationError::BracketNotGenerated)
    }

    fn bracket_mut(&mut self) -> Result<&mut KnockoutBracket> {
        self.bracket.as_mut().ok_or(SimulationError::BracketNotGenerated)
    }

    pub fn simulate_knockout_match<R: RandomSource>(
        &mut self,
        match_id: u32,
        simulator: &MatchOutcomeSimulator,
        random: &mut R,
    ) -> Result<KnockoutMatch> {
        let manager = KnockoutBracketManager::new(simulator);
        let mut bracket = self.bracket_mut()?.clone();

        let played = manager.simulate_match(&mut bracket, match_id, &self.teams, random)?;
        self.finish_knockout_step(bracket);

        Ok(played)
    }

    pub fn simulate_knockout_round<R: RandomSource>(
        &mut self,
        round: KnockoutRoundType,
        simulator: &MatchOutcomeSimulator,
        random: &mut R,
    ) -> Result<Vec<KnockoutMatch>> {
        let manager = KnockoutBracketManager::new(simulator);
        let mut bracket = self.bracket_mut()?.clone();

        let played = manager.simulate_round(&mut bracket, round, &self.teams, random)?;
        self.finish_knockout_step(bracket);

        Ok(played)
    }

    pub fn simulate_knockout_stage<R: RandomSource>(
        &mut self,
        simulator: &MatchOutcomeSimulator,
        random: &mut R,
    ) -> Result<Vec<KnockoutMatch>> {
        let manager = KnockoutBracketManager::new(simulator);
        let mut bracket = self.bracket_mut()?.clone();

        let played = manager.simulate_stage(&mut bracket, &self.teams, random)?;
        self.finish_knockout_step(bracket);

        Ok(played)
    }

    fn finish_knockout_step(&mut self, bracket: KnockoutBracket) {
        if let Some(results) = bracket.final_results() {
            if self.final_results.is_none() {
                info!(
                    "🏆 {}: {} are champions",
                    self.name,
                    self.teams.name(results.champion_id)
                );
            }

            self.final_results = Some(results);
            self.stage = TournamentStage::Finished;
        }

        self.bracket = Some(bracket);
    }

    pub fn results(&self) -> Result<FinalResults> {
        self.final_results
            .ok_or(SimulationError::TournamentNotFinished(self.id))
    }

    /// Runs whatever is left, from the qualification draw to the final.
    pub fn play_out<R: RandomSource>(
        &mut self,
        calendar: &MatchdayCalendar,
        simulator: &MatchOutcomeSimulator,
        random: &mut R,
    ) -> Result<FinalResults> {
        if self.stage == TournamentStage::Created {
            self.start_qualification(calendar, random)?;
        }

        if self.stage == TournamentStage::Qualification && !self.is_qualification_complete() {
            self.simulate_qualification(calendar, simulator, random)?;
        }

        if self.stage == TournamentStage::Qualification {
            self.generate_bracket(simulator, random)?;
        }

        if self.stage == TournamentStage::Knockout {
            self.simulate_knockout_stage(simulator, random)?;
        }

        self.results()
    }
}

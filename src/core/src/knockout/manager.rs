use crate::confederation::QualifiedTeam;
use crate::error::{Result, SimulationError};
use crate::knockout::{KnockoutBracket, KnockoutMatch, KnockoutRoundType, SeedingDraw};
use crate::r#match::MatchOutcomeSimulator;
use crate::shared::RandomSource;
use crate::team::TeamLookup;
use log::{debug, info};

/// Builds the bracket from the qualifiers and plays it through match by match.
pub struct KnockoutBracketManager<'a> {
    simulator: &'a MatchOutcomeSimulator,
}

impl<'a> KnockoutBracketManager<'a> {
    pub fn new(simulator: &'a MatchOutcomeSimulator) -> Self {
        KnockoutBracketManager { simulator }
    }

    pub fn generate_bracket<R: RandomSource>(
        &self,
        qualified: &[QualifiedTeam],
        random: &mut R,
    ) -> Result<KnockoutBracket> {
        let seeds = SeedingDraw::draw(qualified, random)?;
        let bracket = KnockoutBracket::generate(seeds)?;

        info!("🎲 knockout bracket drawn for {} qualifiers", qualified.len());

        Ok(bracket)
    }

    pub fn simulate_match<R: RandomSource, L: TeamLookup>(
        &self,
        bracket: &mut KnockoutBracket,
        match_id: u32,
        teams: &L,
        random: &mut R,
    ) -> Result<KnockoutMatch> {
        let knockout_match = bracket
            .get(match_id)
            .ok_or(SimulationError::MatchNotFound(match_id))?;
        knockout_match.ensure_playable()?;

        let (home, away) = knockout_match
            .participants()
            .ok_or(SimulationError::MatchNotReady(match_id))?;

        let home_team = teams.team(home).ok_or(SimulationError::TeamNotFound(home))?;
        let away_team = teams.team(away).ok_or(SimulationError::TeamNotFound(away))?;

        let score = self
            .simulator
            .simulate_knockout(home_team.ranking, away_team.ranking, random);

        let completed = bracket.record_result(match_id, score)?;

        debug!(
            "{} #{}: {} {} {}",
            completed.round, completed.match_position, home_team.name, score, away_team.name
        );

        Ok(completed)
    }

    /// Plays every match of `round`. The final round also plays an outstanding
    /// third-place match first.
    pub fn simulate_round<R: RandomSource, L: TeamLookup>(
        &self,
        bracket: &mut KnockoutBracket,
        round: KnockoutRoundType,
        teams: &L,
        random: &mut R,
    ) -> Result<Vec<KnockoutMatch>> {
        if bracket.round(round).is_completed() {
            return Err(SimulationError::RoundAlreadyCompleted(round));
        }

        let mut to_play: Vec<u32> = Vec::new();
        if round == KnockoutRoundType::Final {
            to_play.extend(
                bracket
                    .round_matches(KnockoutRoundType::ThirdPlace)
                    .filter(|m| !m.is_completed())
                    .map(|m| m.id),
            );
        }
        to_play.extend(
            bracket
                .round_matches(round)
                .filter(|m| !m.is_completed())
                .map(|m| m.id),
        );

        if let Some(pending) = to_play
            .iter()
            .filter_map(|id| bracket.get(*id))
            .find(|m| !m.is_ready())
        {
            return Err(SimulationError::MatchNotReady(pending.id));
        }

        let mut working = bracket.clone();
        let mut played = Vec::with_capacity(to_play.len());
        for match_id in to_play {
            played.push(self.simulate_match(&mut working, match_id, teams, random)?);
        }
        *bracket = working;

        info!(
            "⚽ {} completed: {}",
            round,
            played
                .iter()
                .filter(|m| m.round == round)
                .filter_map(|m| Some(format!("{} {}", teams.team(m.winner_id?)?.name, m.score?)))
                .collect::<Vec<_>>()
                .join(", ")
        );

        Ok(played)
    }

    /// Plays whatever remains of the bracket, round by round.
    pub fn simulate_stage<R: RandomSource, L: TeamLookup>(
        &self,
        bracket: &mut KnockoutBracket,
        teams: &L,
        random: &mut R,
    ) -> Result<Vec<KnockoutMatch>> {
        let mut working = bracket.clone();
        let mut played = Vec::new();

        for round in KnockoutRoundType::ALL {
            if working.round(round).is_completed() {
                continue;
            }
            played.extend(self.simulate_round(&mut working, round, teams, random)?);
        }

        *bracket = working;

        Ok(played)
    }
}

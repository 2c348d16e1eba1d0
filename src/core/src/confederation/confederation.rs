use crate::confederation::{
    ConfederationFormat, FormatRules, GroupDistributor, PlayoffTie, QualifiedTeam, QualifierSelector,
};
use crate::error::{Result, SimulationError};
use crate::group::{Group, StandingsTracker};
use crate::r#match::{MatchOutcomeSimulator, Score};
use crate::schedule::{Fixture, MatchdayCalendar, RoundRobinScheduler};
use crate::shared::RandomSource;
use crate::team::{Team, TeamLookup};
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Qualification campaign of one confederation: its groups, their fixtures and,
/// once every fixture is played, the teams it sends to the knockout stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Confederation {
    pub id: String,
    pub name: String,
    pub rules: FormatRules,
    pub groups: Vec<Group>,
    pub fixtures: Vec<Fixture>,
    pub qualified_teams: Vec<QualifiedTeam>,
    pub playoff: Option<PlayoffTie>,
    pub completed: bool,
}

impl Confederation {
    /// Draws the groups and lays out every fixture on the shared calendar.
    pub fn draw<R: RandomSource>(
        rules: &FormatRules,
        teams: &[Team],
        calendar: &MatchdayCalendar,
        random: &mut R,
    ) -> Result<Self> {
        let groups = GroupDistributor::distribute(teams, rules, random)?;

        let mut fixtures = Vec::new();
        for group in &groups {
            let mut group_fixtures =
                RoundRobinScheduler::schedule(&group.id, &group.team_ids, rules.double_round_robin);
            calendar.assign(&mut group_fixtures, rules.matchday_offset);
            fixtures.extend(group_fixtures);
        }

        fixtures.sort_by(|a, b| a.matchday.cmp(&b.matchday).then_with(|| a.id.cmp(&b.id)));

        info!(
            "🗂️ {}: {} teams, {} groups, {} fixtures",
            rules.confederation,
            teams.len(),
            groups.len(),
            fixtures.len()
        );

        Ok(Confederation {
            id: rules.confederation.clone(),
            name: rules.name.clone(),
            rules: rules.clone(),
            groups,
            fixtures,
            qualified_teams: Vec::new(),
            playoff: None,
            completed: false,
        })
    }

    pub fn format(&self) -> ConfederationFormat {
        self.rules.format
    }

    pub fn last_matchday(&self) -> u16 {
        self.fixtures.iter().map(|fixture| fixture.matchday).max().unwrap_or(0)
    }

    pub fn is_fixtures_complete(&self) -> bool {
        self.fixtures.iter().all(Fixture::is_played)
    }

    pub fn group(&self, group_id: &str) -> Option<&Group> {
        self.groups.iter().find(|group| group.id == group_id)
    }

    pub fn fixture(&self, fixture_id: &str) -> Option<&Fixture> {
        self.fixtures.iter().find(|fixture| fixture.id == fixture_id)
    }

    pub fn pending_fixtures(&self, matchday: u16) -> impl Iterator<Item = &Fixture> {
        self.fixtures
            .iter()
            .filter(move |fixture| fixture.matchday == matchday && !fixture.is_played())
    }

    /// Simulates one fixture and folds it into its group table. Either both the
    /// fixture and the table change or neither does.
    pub fn play_fixture<R: RandomSource, L: TeamLookup>(
        &mut self,
        fixture_id: &str,
        teams: &L,
        simulator: &MatchOutcomeSimulator,
        random: &mut R,
    ) -> Result<Score> {
        if self.completed {
            return Err(SimulationError::QualificationCompleted);
        }

        let fixture_index = self
            .fixtures
            .iter()
            .position(|fixture| fixture.id == fixture_id)
            .ok_or_else(|| SimulationError::FixtureNotFound(fixture_id.to_string()))?;

        let mut fixture = self.fixtures[fixture_index].clone();
        if fixture.is_played() {
            return Err(SimulationError::MatchAlreadyPlayed(fixture.id));
        }

        let group_index = self
            .groups
            .iter()
            .position(|group| group.id == fixture.group_id)
            .ok_or_else(|| SimulationError::FixtureNotFound(fixture.id.clone()))?;

        let home_ranking = teams
            .ranking(fixture.home_team_id)
            .ok_or(SimulationError::TeamNotFound(fixture.home_team_id))?;
        let away_ranking = teams
            .ranking(fixture.away_team_id)
            .ok_or(SimulationError::TeamNotFound(fixture.away_team_id))?;

        let score = simulator.simulate(home_ranking, away_ranking, false, random);
        fixture.record_result(score)?;

        let mut table = self.groups[group_index].table.clone();
        StandingsTracker::apply(&mut table, &fixture)?;

        debug!("{} finished {}", fixture.id, score);

        self.fixtures[fixture_index] = fixture;
        self.groups[group_index].table = table;

        Ok(score)
    }

    /// Plays every pending fixture scheduled on `matchday`. Returns the ids played.
    pub fn simulate_matchday<R: RandomSource, L: TeamLookup>(
        &mut self,
        matchday: u16,
        teams: &L,
        simulator: &MatchOutcomeSimulator,
        random: &mut R,
    ) -> Result<Vec<String>> {
        if self.completed {
            return Ok(Vec::new());
        }

        let pending: Vec<String> = self
            .pending_fixtures(matchday)
            .map(|fixture| fixture.id.clone())
            .collect();

        for fixture_id in &pending {
            self.play_fixture(fixture_id, teams, simulator, random)?;
        }

        Ok(pending)
    }

    /// Selects the qualifiers once the last fixture is in. Returns `true` only on
    /// the call that completes the confederation.
    pub fn complete_if_finished<R: RandomSource, L: TeamLookup>(
        &mut self,
        teams: &L,
        simulator: &MatchOutcomeSimulator,
        random: &mut R,
    ) -> Result<bool> {
        if self.completed || !self.is_fixtures_complete() {
            return Ok(false);
        }

        let selection = QualifierSelector::new(simulator).select(self, teams, random)?;

        self.qualified_teams = selection.qualified;
        self.playoff = selection.playoff;
        self.completed = true;

        info!(
            "🏁 {} qualification finished: {}",
            self.id,
            self.qualified_teams
                .iter()
                .map(|team| team.team_name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );

        Ok(true)
    }
}

use crate::confederation::{Confederation, ConfederationFormat, PlayoffTie};
use crate::error::{Result, SimulationError};
use crate::group::{Group, GroupStanding};
use crate::r#match::MatchOutcomeSimulator;
use crate::shared::RandomSource;
use crate::team::{TeamId, TeamLookup};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualificationRoute {
    Direct,
    GroupWinner,
    BestRunnerUp,
    PlayoffWinner,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualifiedTeam {
    pub team_id: TeamId,
    pub team_name: String,
    pub confederation: String,
    pub ranking: u16,
    pub route: QualificationRoute,
    pub group_id: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct QualifierSelection {
    pub qualified: Vec<QualifiedTeam>,
    pub playoff: Option<PlayoffTie>,
}

/// Decides who goes through once a confederation has played all its fixtures.
pub struct QualifierSelector<'a> {
    simulator: &'a MatchOutcomeSimulator,
}

impl<'a> QualifierSelector<'a> {
    pub fn new(simulator: &'a MatchOutcomeSimulator) -> Self {
        QualifierSelector { simulator }
    }

    pub fn select<R: RandomSource, L: TeamLookup>(
        &self,
        confederation: &Confederation,
        teams: &L,
        random: &mut R,
    ) -> Result<QualifierSelection> {
        if !confederation.is_fixtures_complete() {
            return Err(SimulationError::QualificationIncomplete);
        }

        match confederation.rules.format {
            ConfederationFormat::SingleLeague => self.single_league(confederation, teams),
            ConfederationFormat::Grouped => self.grouped(confederation, teams),
            ConfederationFormat::GroupedWithPlayoff => self.playoff(confederation, teams, random),
        }
    }

    fn single_league<L: TeamLookup>(
        &self,
        confederation: &Confederation,
        teams: &L,
    ) -> Result<QualifierSelection> {
        let league = confederation
            .groups
            .first()
            .ok_or_else(|| SimulationError::ConfederationNotFound(confederation.id.clone()))?;

        let mut rows: Vec<&GroupStanding> = league.table.rows.iter().collect();
        rows.sort_by(|a, b| a.table_order(b));

        let qualified = rows
            .into_iter()
            .take(confederation.rules.qualification_slots)
            .map(|row| Self::qualified(confederation, row, Some(league), QualificationRoute::Direct, teams))
            .collect::<Result<Vec<_>>>()?;

        Ok(QualifierSelection {
            qualified,
            playoff: None,
        })
    }

    fn grouped<L: TeamLookup>(&self, confederation: &Confederation, teams: &L) -> Result<QualifierSelection> {
        let slots = confederation.rules.qualification_slots;
        let per_match = Self::has_unequal_groups(&confederation.groups);

        let mut winners: Vec<(&Group, &GroupStanding)> = confederation
            .groups
            .iter()
            .filter_map(|group| group.table.leader().map(|row| (group, row)))
            .collect();

        winners.sort_by(|a, b| Self::compare_across_groups(a.1, b.1, per_match));

        let mut qualified = winners
            .iter()
            .take(slots)
            .map(|&(group, row)| {
                Self::qualified(confederation, row, Some(group), QualificationRoute::GroupWinner, teams)
            })
            .collect::<Result<Vec<_>>>()?;

        if qualified.len() < slots {
            let mut runners_up: Vec<(&Group, &GroupStanding)> = confederation
                .groups
                .iter()
                .filter_map(|group| group.table.runner_up().map(|row| (group, row)))
                .collect();

            runners_up.sort_by(|a, b| Self::compare_across_groups(a.1, b.1, per_match));

            let missing = slots - qualified.len();
            for (group, row) in runners_up.into_iter().take(missing) {
                qualified.push(Self::qualified(
                    confederation,
                    row,
                    Some(group),
                    QualificationRoute::BestRunnerUp,
                    teams,
                )?);
            }
        }

        Ok(QualifierSelection {
            qualified,
            playoff: None,
        })
    }

    fn playoff<R: RandomSource, L: TeamLookup>(
        &self,
        confederation: &Confederation,
        teams: &L,
        random: &mut R,
    ) -> Result<QualifierSelection> {
        let per_match = Self::has_unequal_groups(&confederation.groups);

        let mut winners: Vec<&GroupStanding> = confederation
            .groups
            .iter()
            .filter_map(|group| group.table.leader())
            .collect();

        winners.sort_by(|a, b| Self::compare_across_groups(a, b, per_match));

        let (seeded, unseeded) = match winners.as_slice() {
            [seeded, unseeded, ..] => (*seeded, *unseeded),
            _ => {
                return Err(SimulationError::invalid_format(
                    &confederation.id,
                    "playoff needs two group winners",
                ));
            }
        };

        let seeded_team = teams
            .team(seeded.team_id)
            .ok_or(SimulationError::TeamNotFound(seeded.team_id))?;
        let unseeded_team = teams
            .team(unseeded.team_id)
            .ok_or(SimulationError::TeamNotFound(unseeded.team_id))?;

        // better group winner hosts the return leg
        let tie = PlayoffTie::play(unseeded_team, seeded_team, self.simulator, random);

        let winner_row = if tie.winner_id == seeded.team_id { seeded } else { unseeded };
        let winner_group = confederation.groups.iter().find(|group| group.contains(tie.winner_id));

        let qualified = vec![Self::qualified(
            confederation,
            winner_row,
            winner_group,
            QualificationRoute::PlayoffWinner,
            teams,
        )?];

        Ok(QualifierSelection {
            qualified,
            playoff: Some(tie),
        })
    }

    fn has_unequal_groups(groups: &[Group]) -> bool {
        groups
            .windows(2)
            .any(|pair| pair[0].size() != pair[1].size())
    }

    /// Ranks finishers from different groups. Groups of unequal size are compared
    /// per match played.
    pub fn compare_across_groups(a: &GroupStanding, b: &GroupStanding, per_match: bool) -> Ordering {
        let ordering = if per_match {
            let rate = |row: &GroupStanding, value: f64| {
                if row.played == 0 {
                    0.0
                } else {
                    value / f64::from(row.played)
                }
            };

            rate(b, f64::from(b.points))
                .total_cmp(&rate(a, f64::from(a.points)))
                .then_with(|| {
                    rate(b, f64::from(b.goal_difference)).total_cmp(&rate(a, f64::from(a.goal_difference)))
                })
                .then_with(|| rate(b, f64::from(b.goals_for)).total_cmp(&rate(a, f64::from(a.goals_for))))
        } else {
            b.points
                .cmp(&a.points)
                .then_with(|| b.goal_difference.cmp(&a.goal_difference))
                .then_with(|| b.goals_for.cmp(&a.goals_for))
        };

        ordering.then_with(|| a.team_name.cmp(&b.team_name))
    }

    fn qualified<L: TeamLookup>(
        confederation: &Confederation,
        row: &GroupStanding,
        group: Option<&Group>,
        route: QualificationRoute,
        teams: &L,
    ) -> Result<QualifiedTeam> {
        let ranking = teams
            .ranking(row.team_id)
            .ok_or(SimulationError::TeamNotFound(row.team_id))?;

        Ok(QualifiedTeam {
            team_id: row.team_id,
            team_name: row.team_name.clone(),
            confederation: confederation.id.clone(),
            ranking,
            route,
            group_id: group.map(|group| group.id.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confederation::FormatRules;
    use crate::schedule::Fixture;
    use crate::settings::SimulationSettings;
    use crate::shared::SeededRandom;
    use crate::team::{Team, TeamCollection};
    use std::collections::HashSet;

    fn collection(count: u32) -> TeamCollection {
        TeamCollection::new(
            (1..=count)
                .map(|id| Team::new(id, &format!("T{:02}", id), &format!("Team {:02}", id), "TST", id as u16))
                .collect(),
        )
    }

    /// Groups of `size` consecutive team ids, each table filled with descending points.
    fn groups(teams: &TeamCollection, size: usize) -> Vec<Group> {
        teams
            .teams
            .chunks(size)
            .enumerate()
            .map(|(index, members)| {
                let mut group = Group::new(format!("TST-{}", index), format!("Group {}", index), members);
                for row in group.table.rows.iter_mut() {
                    let strength = members.iter().position(|t| t.id == row.team_id).unwrap_or(0) as u16;
                    row.played = (size - 1) as u16;
                    row.points = 9u16.saturating_sub(strength * 3) + index as u16 % 3;
                    row.goals_for = 10 - strength;
                    row.goal_difference = 6 - strength as i16 * 3;
                }
                group.table.sort();
                group
            })
            .collect()
    }

    fn confederation(rules: FormatRules, groups: Vec<Group>) -> Confederation {
        Confederation {
            id: rules.confederation.clone(),
            name: rules.name.clone(),
            rules,
            groups,
            fixtures: Vec::new(),
            qualified_teams: Vec::new(),
            playoff: None,
            completed: false,
        }
    }

    #[test]
    fn test_more_groups_than_slots() {
        let teams = collection(32);
        let simulator = MatchOutcomeSimulator::new(&SimulationSettings::default());
        let selector = QualifierSelector::new(&simulator);
        let mut random = SeededRandom::new(1);

        let rules = FormatRules::new("TST", ConfederationFormat::Grouped, 4);
        let confederation = confederation(rules, groups(&teams, 4));

        let selection = selector.select(&confederation, &teams, &mut random).unwrap();

        assert_eq!(selection.qualified.len(), 4);
        assert!(selection.qualified.iter().all(|q| q.route == QualificationRoute::GroupWinner));

        let distinct: HashSet<_> = selection.qualified.iter().map(|q| q.group_id.clone()).collect();
        assert_eq!(distinct.len(), 4);

        // groups 2 and 5 carry the biggest points bonus
        let ids: HashSet<_> = selection.qualified.iter().map(|q| q.team_id).collect();
        assert!(ids.contains(&9));
        assert!(ids.contains(&21));
    }

    #[test]
    fn test_runners_up_fill_remaining_slots() {
        let teams = collection(12);
        let simulator = MatchOutcomeSimulator::new(&SimulationSettings::default());
        let selector = QualifierSelector::new(&simulator);
        let mut random = SeededRandom::new(1);

        let rules = FormatRules::new("TST", ConfederationFormat::Grouped, 4);
        let confederation = confederation(rules, groups(&teams, 4));

        let selection = selector.select(&confederation, &teams, &mut random).unwrap();

        assert_eq!(selection.qualified.len(), 4);
        let winners = selection
            .qualified
            .iter()
            .filter(|q| q.route == QualificationRoute::GroupWinner)
            .count();
        assert_eq!(winners, 3);

        let runner_up = &selection.qualified[3];
        assert_eq!(runner_up.route, QualificationRoute::BestRunnerUp);
        assert_eq!(runner_up.team_id, 10);
    }

    #[test]
    fn test_single_league_takes_top() {
        let teams = collection(6);
        let simulator = MatchOutcomeSimulator::new(&SimulationSettings::default());
        let selector = QualifierSelector::new(&simulator);
        let mut random = SeededRandom::new(1);

        let rules = FormatRules::new("TST", ConfederationFormat::SingleLeague, 3);
        let confederation = confederation(rules, groups(&teams, 6));

        let selection = selector.select(&confederation, &teams, &mut random).unwrap();
        let ids: Vec<_> = selection.qualified.iter().map(|q| q.team_id).collect();

        assert_eq!(ids, vec![1, 2, 3]);
        assert!(selection.qualified.iter().all(|q| q.route == QualificationRoute::Direct));
    }

    #[test]
    fn test_playoff_between_group_winners() {
        let teams = collection(8);
        let simulator = MatchOutcomeSimulator::new(&SimulationSettings::default());
        let selector = QualifierSelector::new(&simulator);
        let mut random = SeededRandom::new(11);

        let rules = FormatRules::new("TST", ConfederationFormat::GroupedWithPlayoff, 1);
        let confederation = confederation(rules, groups(&teams, 4));

        let selection = selector.select(&confederation, &teams, &mut random).unwrap();
        let tie = selection.playoff.unwrap();

        assert_eq!(selection.qualified.len(), 1);
        assert_eq!(selection.qualified[0].route, QualificationRoute::PlayoffWinner);
        assert_eq!(selection.qualified[0].team_id, tie.winner_id);

        // group 1 leader has the points bonus, so the group 0 leader hosts the first leg
        assert_eq!(tie.first_team_id, 1);
        assert_eq!(tie.second_team_id, 5);
    }

    #[test]
    fn test_pending_fixtures_block_selection() {
        let teams = collection(4);
        let simulator = MatchOutcomeSimulator::new(&SimulationSettings::default());
        let selector = QualifierSelector::new(&simulator);
        let mut random = SeededRandom::new(1);

        let rules = FormatRules::new("TST", ConfederationFormat::SingleLeague, 2);
        let mut confederation = confederation(rules, groups(&teams, 4));
        confederation.fixtures.push(Fixture::new(String::from("TST-0-01-1"), "TST-0", 1, 2, 1));

        let error = selector.select(&confederation, &teams, &mut random).unwrap_err();
        assert!(matches!(error, SimulationError::QualificationIncomplete));
    }

    #[test]
    fn test_unequal_groups_compared_per_match() {
        let mut small = GroupStanding::new(1, "Small");
        small.played = 3;
        small.points = 7;

        let mut large = GroupStanding::new(2, "Large");
        large.played = 5;
        large.points = 10;

        assert_eq!(
            QualifierSelector::compare_across_groups(&small, &large, true),
            Ordering::Less
        );
        assert_eq!(
            QualifierSelector::compare_across_groups(&small, &large, false),
            Ordering::Greater
        );
    }
}

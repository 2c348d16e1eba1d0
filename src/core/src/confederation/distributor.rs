use crate::confederation::{ConfederationFormat, FormatRules};
use crate::error::Result;
use crate::group::Group;
use crate::shared::RandomSource;
use crate::team::Team;
use itertools::Itertools;
use log::debug;

/// Partitions a confederation's teams into balanced groups.
pub struct GroupDistributor;

impl GroupDistributor {
    pub fn group_count(team_count: usize, rules: &FormatRules) -> usize {
        if team_count == 0 {
            return 0;
        }

        match (rules.format, rules.fixed_group_count) {
            (ConfederationFormat::SingleLeague, _) => 1,
            (_, Some(count)) => count.clamp(1, team_count),
            (ConfederationFormat::GroupedWithPlayoff, None) => 2.min(team_count),
            (ConfederationFormat::Grouped, None) => Self::preferred_group_count(team_count, rules),
        }
    }

    fn preferred_group_count(team_count: usize, rules: &FormatRules) -> usize {
        let mut sizes: Vec<usize> = rules
            .preferred_group_sizes
            .iter()
            .copied()
            .filter(|size| *size > 0)
            .collect();

        if sizes.is_empty() {
            sizes.push(rules.max_group_size.max(1));
        }

        sizes.sort_unstable_by(|a, b| b.cmp(a));

        let groups = match sizes.iter().find(|&&size| team_count % size == 0) {
            Some(size) => team_count / size,
            None => {
                // no exact fit: smallest leftover wins, larger size on ties
                let size = sizes
                    .iter()
                    .copied()
                    .min_by_key(|size| team_count % size)
                    .unwrap_or(1);

                let groups = (team_count / size).max(1);
                if team_count.div_ceil(groups) > rules.max_group_size {
                    team_count.div_ceil(size)
                } else {
                    groups
                }
            }
        };

        // the smallest group holds team_count / groups teams
        let most_groups = (team_count / rules.min_group_size.max(1)).max(1);

        groups.clamp(1, most_groups)
    }

    /// Seeded draw: teams are cut into ranking tiers one team per group wide, each
    /// tier is shuffled and dealt across the groups. Early groups absorb the remainder.
    pub fn distribute<R: RandomSource>(
        teams: &[Team],
        rules: &FormatRules,
        random: &mut R,
    ) -> Result<Vec<Group>> {
        rules.validate(teams.len())?;

        let group_count = Self::group_count(teams.len(), rules);

        if rules.format == ConfederationFormat::SingleLeague {
            let ranked: Vec<Team> = teams
                .iter()
                .sorted_by_key(|team| (team.ranking, team.id))
                .cloned()
                .collect();

            return Ok(vec![Group::new(
                format!("{}-L", rules.confederation),
                String::from("League"),
                &ranked,
            )]);
        }

        let ranked: Vec<Team> = teams
            .iter()
            .sorted_by_key(|team| (team.ranking, team.id))
            .cloned()
            .collect();

        let mut buckets: Vec<Vec<Team>> = vec![Vec::new(); group_count];

        for tier in ranked.chunks(group_count) {
            let mut tier = tier.to_vec();
            random.shuffle(&mut tier);

            for (slot, team) in tier.into_iter().enumerate() {
                buckets[slot].push(team);
            }
        }

        let groups: Vec<Group> = buckets
            .into_iter()
            .enumerate()
            .map(|(index, members)| {
                let label = Self::group_label(index);
                Group::new(
                    format!("{}-{}", rules.confederation, label),
                    format!("Group {}", label),
                    &members,
                )
            })
            .collect();

        debug!(
            "{}: {} teams drawn into {} groups ({})",
            rules.confederation,
            teams.len(),
            groups.len(),
            groups.iter().map(|group| group.size()).join("/")
        );

        Ok(groups)
    }

    pub fn group_label(index: usize) -> String {
        if index < 26 {
            char::from(b'A' + index as u8).to_string()
        } else {
            format!("{}", index + 1)
        }
    }
}

use crate::schedule::Fixture;
use crate::team::TeamId;
use log::debug;

/// Circle-method round-robin scheduling.
pub struct RoundRobinScheduler;

impl RoundRobinScheduler {
    /// Single round-robin rounds as `(home, away)` pairs. An odd team count gets a
    /// bye slot, so each team sits out exactly one round.
    pub fn rounds(team_ids: &[TeamId]) -> Vec<Vec<(TeamId, TeamId)>> {
        let mut slots: Vec<Option<TeamId>> = team_ids.iter().copied().map(Some).collect();
        if slots.len() % 2 == 1 {
            slots.push(None);
        }

        let slot_count = slots.len();
        if slot_count < 2 {
            return Vec::new();
        }

        let fixed = slots[0];
        let rotating = &slots[1..];

        (0..slot_count - 1)
            .map(|round| {
                let mut arrangement = Vec::with_capacity(slot_count);
                arrangement.push(fixed);
                arrangement.extend(rotating.iter().cycle().skip(round).take(slot_count - 1));

                (0..slot_count / 2)
                    .filter_map(|i| {
                        let first = arrangement[i]?;
                        let second = arrangement[slot_count - 1 - i]?;

                        // alternate venues so nobody hosts every round
                        if (round + i) % 2 == 0 {
                            Some((first, second))
                        } else {
                            Some((second, first))
                        }
                    })
                    .collect()
            })
            .collect()
    }

    /// Complete fixture list of a group with local matchdays starting at 1. The return
    /// leg of a double round-robin repeats the rotation with venues swapped.
    pub fn schedule(group_id: &str, team_ids: &[TeamId], double_round_robin: bool) -> Vec<Fixture> {
        let rounds = Self::rounds(team_ids);
        let round_count = rounds.len() as u16;

        let mut fixtures = Vec::with_capacity(rounds.iter().map(Vec::len).sum::<usize>() * 2);

        for (index, pairs) in rounds.iter().enumerate() {
            let matchday = index as u16 + 1;
            for (number, &(home, away)) in pairs.iter().enumerate() {
                fixtures.push(Fixture::new(
                    Self::fixture_id(group_id, matchday, number),
                    group_id,
                    home,
                    away,
                    matchday,
                ));
            }
        }

        if double_round_robin {
            for (index, pairs) in rounds.iter().enumerate() {
                let matchday = round_count + index as u16 + 1;
                for (number, &(home, away)) in pairs.iter().enumerate() {
                    fixtures.push(Fixture::new(
                        Self::fixture_id(group_id, matchday, number),
                        group_id,
                        away,
                        home,
                        matchday,
                    ));
                }
            }
        }

        debug!(
            "scheduled {} fixtures over {} matchdays for {}",
            fixtures.len(),
            if double_round_robin { round_count * 2 } else { round_count },
            group_id
        );

        fixtures
    }

    fn fixture_id(group_id: &str, matchday: u16, number: usize) -> String {
        format!("{}-{:02}-{}", group_id, matchday, number + 1)
    }
}

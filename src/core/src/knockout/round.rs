use crate::knockout::{KnockoutMatch, MatchStatus};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum KnockoutRoundType {
    #[serde(rename = "round16")]
    RoundOf16,
    #[serde(rename = "quarterfinal")]
    QuarterFinal,
    #[serde(rename = "semifinal")]
    SemiFinal,
    #[serde(rename = "third_place")]
    ThirdPlace,
    #[serde(rename = "final")]
    Final,
}

impl KnockoutRoundType {
    pub const ALL: [KnockoutRoundType; 5] = [
        KnockoutRoundType::RoundOf16,
        KnockoutRoundType::QuarterFinal,
        KnockoutRoundType::SemiFinal,
        KnockoutRoundType::ThirdPlace,
        KnockoutRoundType::Final,
    ];

    pub fn match_count(&self) -> usize {
        match self {
            KnockoutRoundType::RoundOf16 => 8,
            KnockoutRoundType::QuarterFinal => 4,
            KnockoutRoundType::SemiFinal => 2,
            KnockoutRoundType::ThirdPlace | KnockoutRoundType::Final => 1,
        }
    }

    /// Id of the round's first match. Ids run consecutively through the bracket.
    pub fn first_match_id(&self) -> u32 {
        match self {
            KnockoutRoundType::RoundOf16 => 1,
            KnockoutRoundType::QuarterFinal => 9,
            KnockoutRoundType::SemiFinal => 13,
            KnockoutRoundType::ThirdPlace => 15,
            KnockoutRoundType::Final => 16,
        }
    }

    /// Round the winners move on to.
    pub fn next(&self) -> Option<KnockoutRoundType> {
        match self {
            KnockoutRoundType::RoundOf16 => Some(KnockoutRoundType::QuarterFinal),
            KnockoutRoundType::QuarterFinal => Some(KnockoutRoundType::SemiFinal),
            KnockoutRoundType::SemiFinal => Some(KnockoutRoundType::Final),
            KnockoutRoundType::ThirdPlace | KnockoutRoundType::Final => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            KnockoutRoundType::RoundOf16 => "round16",
            KnockoutRoundType::QuarterFinal => "quarterfinal",
            KnockoutRoundType::SemiFinal => "semifinal",
            KnockoutRoundType::ThirdPlace => "third_place",
            KnockoutRoundType::Final => "final",
        }
    }
}

impl fmt::Display for KnockoutRoundType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundStatus {
    Pending,
    Ready,
    InProgress,
    Completed,
}

/// Progress of one round, derived from its matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnockoutRound {
    pub round: KnockoutRoundType,
    pub match_count: usize,
    pub completed_matches: usize,
    pub status: RoundStatus,
}

impl KnockoutRound {
    pub fn aggregate(round: KnockoutRoundType, matches: &[KnockoutMatch]) -> Self {
        let round_matches: Vec<&KnockoutMatch> = matches.iter().filter(|m| m.round == round).collect();

        let match_count = round_matches.len();
        let completed_matches = round_matches
            .iter()
            .filter(|m| m.status == MatchStatus::Completed)
            .count();
        let ready_matches = round_matches
            .iter()
            .filter(|m| m.status == MatchStatus::Ready)
            .count();

        let status = if match_count > 0 && completed_matches == match_count {
            RoundStatus::Completed
        } else if completed_matches > 0 {
            RoundStatus::InProgress
        } else if match_count > 0 && ready_matches == match_count {
            RoundStatus::Ready
        } else {
            RoundStatus::Pending
        };

        KnockoutRound {
            round,
            match_count,
            completed_matches,
            status,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == RoundStatus::Completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_layout_covers_sixteen_matches() {
        let total: usize = KnockoutRoundType::ALL.iter().map(|r| r.match_count()).sum();
        assert_eq!(total, 16);

        for pair in KnockoutRoundType::ALL.windows(2) {
            assert_eq!(
                pair[0].first_match_id() + pair[0].match_count() as u32,
                pair[1].first_match_id()
            );
        }
    }

    #[test]
    fn test_round_names() {
        assert_eq!(KnockoutRoundType::RoundOf16.to_string(), "round16");
        assert_eq!(KnockoutRoundType::ThirdPlace.to_string(), "third_place");
        assert_eq!(KnockoutRoundType::SemiFinal.next(), Some(KnockoutRoundType::Final));
        assert_eq!(KnockoutRoundType::ThirdPlace.next(), None);
    }

    #[test]
    fn test_round_status_aggregation() {
        let mut matches = vec![
            KnockoutMatch::new(13, KnockoutRoundType::SemiFinal, 1, Some(1)),
            KnockoutMatch::new(14, KnockoutRoundType::SemiFinal, 2, Some(1)),
        ];

        let round = KnockoutRound::aggregate(KnockoutRoundType::SemiFinal, &matches);
        assert_eq!(round.status, RoundStatus::Pending);
        assert_eq!(round.match_count, 2);

        for (index, m) in matches.iter_mut().enumerate() {
            let base = index as u32 * 2;
            m.assign_home(base + 1);
            m.assign_away(base + 2);
        }
        let round = KnockoutRound::aggregate(KnockoutRoundType::SemiFinal, &matches);
        assert_eq!(round.status, RoundStatus::Ready);

        matches[0].status = MatchStatus::Completed;
        let round = KnockoutRound::aggregate(KnockoutRoundType::SemiFinal, &matches);
        assert_eq!(round.status, RoundStatus::InProgress);
        assert_eq!(round.completed_matches, 1);

        matches[1].status = MatchStatus::Completed;
        assert!(KnockoutRound::aggregate(KnockoutRoundType::SemiFinal, &matches).is_completed());
    }
}

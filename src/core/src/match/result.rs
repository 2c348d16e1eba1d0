use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub home: u8,
    pub away: u8,
}

impl Score {
    pub fn new(home: u8, away: u8) -> Self {
        Score { home, away }
    }

    pub fn is_draw(&self) -> bool {
        self.home == self.away
    }

    pub fn goal_difference(&self) -> i16 {
        i16::from(self.home) - i16::from(self.away)
    }

    pub fn winner(&self) -> Option<Side> {
        match self.home.cmp(&self.away) {
            std::cmp::Ordering::Greater => Some(Side::Home),
            std::cmp::Ordering::Less => Some(Side::Away),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn total(&self) -> u16 {
        u16::from(self.home) + u16::from(self.away)
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.home, self.away)
    }
}

/// Full knockout result: regulation, then extra time and penalties when still level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnockoutScore {
    pub regular: Score,
    pub extra_time: Option<Score>,
    pub penalties: Option<Score>,
}

impl KnockoutScore {
    pub fn regular(regular: Score) -> Self {
        KnockoutScore {
            regular,
            extra_time: None,
            penalties: None,
        }
    }

    /// Goals after regulation and extra time.
    pub fn after_extra_time(&self) -> Score {
        match self.extra_time {
            Some(extra) => Score::new(
                self.regular.home.saturating_add(extra.home),
                self.regular.away.saturating_add(extra.away),
            ),
            None => self.regular,
        }
    }

    pub fn winner(&self) -> Option<Side> {
        self.after_extra_time()
            .winner()
            .or_else(|| self.penalties.and_then(|penalties| penalties.winner()))
    }
}

impl std::fmt::Display for KnockoutScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.extra_time, self.penalties) {
            (None, _) => write!(f, "{}", self.regular),
            (Some(_), None) => write!(f, "{} (aet)", self.after_extra_time()),
            (Some(_), Some(penalties)) => {
                write!(f, "{} (aet, {} pens)", self.after_extra_time(), penalties)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_winner() {
        assert_eq!(Score::new(2, 1).winner(), Some(Side::Home));
        assert_eq!(Score::new(0, 3).winner(), Some(Side::Away));
        assert_eq!(Score::new(1, 1).winner(), None);
        assert_eq!(Score::new(0, 3).goal_difference(), -3);
    }

    #[test]
    fn test_knockout_winner_by_extra_time() {
        let score = KnockoutScore {
            regular: Score::new(1, 1),
            extra_time: Some(Score::new(0, 1)),
            penalties: None,
        };
        assert_eq!(score.after_extra_time(), Score::new(1, 2));
        assert_eq!(score.winner(), Some(Side::Away));
        assert_eq!(score.to_string(), "1-2 (aet)");
    }

    #[test]
    fn test_knockout_winner_by_penalties() {
        let score = KnockoutScore {
            regular: Score::new(2, 2),
            extra_time: Some(Score::new(0, 0)),
            penalties: Some(Score::new(5, 4)),
        };
        assert_eq!(score.winner(), Some(Side::Home));
        assert_eq!(score.to_string(), "2-2 (aet, 5-4 pens)");
    }
}

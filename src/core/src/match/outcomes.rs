/// One scoreline with its base likelihood before strength adjustment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScorelineOutcome {
    pub home: u8,
    pub away: u8,
    pub weight: f64,
}

impl ScorelineOutcome {
    pub const fn new(home: u8, away: u8, weight: f64) -> Self {
        ScorelineOutcome { home, away, weight }
    }

    pub fn margin(&self) -> i16 {
        i16::from(self.home) - i16::from(self.away)
    }
}

/// Scorelines the outcome model can produce. Weighted toward low, close results.
pub const OUTCOME_TABLE: &[ScorelineOutcome] = &[
    // draws
    ScorelineOutcome::new(0, 0, 9.0),
    ScorelineOutcome::new(1, 1, 11.5),
    ScorelineOutcome::new(2, 2, 5.0),
    ScorelineOutcome::new(3, 3, 1.2),
    ScorelineOutcome::new(4, 4, 0.2),
    // home wins
    ScorelineOutcome::new(1, 0, 11.0),
    ScorelineOutcome::new(2, 0, 7.5),
    ScorelineOutcome::new(2, 1, 8.5),
    ScorelineOutcome::new(3, 0, 3.8),
    ScorelineOutcome::new(3, 1, 4.2),
    ScorelineOutcome::new(3, 2, 2.0),
    ScorelineOutcome::new(4, 0, 1.6),
    ScorelineOutcome::new(4, 1, 1.5),
    ScorelineOutcome::new(4, 2, 0.8),
    ScorelineOutcome::new(4, 3, 0.3),
    ScorelineOutcome::new(5, 0, 0.7),
    ScorelineOutcome::new(5, 1, 0.5),
    ScorelineOutcome::new(5, 2, 0.25),
    ScorelineOutcome::new(6, 0, 0.3),
    ScorelineOutcome::new(6, 1, 0.15),
    ScorelineOutcome::new(7, 0, 0.12),
    ScorelineOutcome::new(7, 1, 0.05),
    ScorelineOutcome::new(8, 0, 0.05),
    // away wins
    ScorelineOutcome::new(0, 1, 11.0),
    ScorelineOutcome::new(0, 2, 7.5),
    ScorelineOutcome::new(1, 2, 8.5),
    ScorelineOutcome::new(0, 3, 3.8),
    ScorelineOutcome::new(1, 3, 4.2),
    ScorelineOutcome::new(2, 3, 2.0),
    ScorelineOutcome::new(0, 4, 1.6),
    ScorelineOutcome::new(1, 4, 1.5),
    ScorelineOutcome::new(2, 4, 0.8),
    ScorelineOutcome::new(3, 4, 0.3),
    ScorelineOutcome::new(0, 5, 0.7),
    ScorelineOutcome::new(1, 5, 0.5),
    ScorelineOutcome::new(2, 5, 0.25),
    ScorelineOutcome::new(0, 6, 0.3),
    ScorelineOutcome::new(1, 6, 0.15),
    ScorelineOutcome::new(0, 7, 0.12),
    ScorelineOutcome::new(1, 7, 0.05),
    ScorelineOutcome::new(0, 8, 0.05),
];

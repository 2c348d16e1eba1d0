use crate::knockout::KnockoutRoundType;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SimulationError>;

/// Coarse classification used by callers to map engine failures onto responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    State,
    Conflict,
    Storage,
}

#[derive(Debug, Error)]
pub enum SimulationError {
    // Validation
    #[error("knockout stage requires {expected} qualifiers, got {actual}")]
    WrongQualifierCount { expected: usize, actual: usize },

    #[error("invalid seeding: {0}")]
    InvalidSeeding(String),

    #[error("knockout match {0} is not ready to be played")]
    MatchNotReady(u32),

    #[error("match {0} has already been played")]
    MatchAlreadyPlayed(String),

    #[error("fixture {0} has not been played")]
    FixtureNotPlayed(String),

    #[error("knockout match {0} cannot finish level")]
    LevelKnockoutScore(u32),

    #[error("invalid format rules for {confederation}: {reason}")]
    InvalidFormat { confederation: String, reason: String },

    // Not found
    #[error("tournament {0} not found")]
    TournamentNotFound(u32),

    #[error("knockout match {0} not found")]
    MatchNotFound(u32),

    #[error("fixture {0} not found")]
    FixtureNotFound(String),

    #[error("confederation {0} not found")]
    ConfederationNotFound(String),

    #[error("team {0} not found")]
    TeamNotFound(u32),

    // State
    #[error("qualification has not started")]
    QualificationNotStarted,

    #[error("qualification has already started")]
    QualificationAlreadyStarted,

    #[error("qualification is still in progress")]
    QualificationIncomplete,

    #[error("qualification is already completed")]
    QualificationCompleted,

    #[error("{0} round is already completed")]
    RoundAlreadyCompleted(KnockoutRoundType),

    #[error("knockout bracket has not been generated")]
    BracketNotGenerated,

    #[error("tournament {0} is not finished")]
    TournamentNotFinished(u32),

    // Persistence
    #[error(
        "tournament {tournament_id} was modified concurrently (expected version {expected}, found {actual})"
    )]
    VersionConflict {
        tournament_id: u32,
        expected: u64,
        actual: u64,
    },

    #[error("storage failure: {0}")]
    Storage(String),
}

impl SimulationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SimulationError::WrongQualifierCount { .. }
            | SimulationError::InvalidSeeding(_)
            | SimulationError::MatchNotReady(_)
            | SimulationError::MatchAlreadyPlayed(_)
            | SimulationError::FixtureNotPlayed(_)
            | SimulationError::LevelKnockoutScore(_)
            | SimulationError::InvalidFormat { .. } => ErrorKind::Validation,

            SimulationError::TournamentNotFound(_)
            | SimulationError::MatchNotFound(_)
            | SimulationError::FixtureNotFound(_)
            | SimulationError::ConfederationNotFound(_)
            | SimulationError::TeamNotFound(_) => ErrorKind::NotFound,

            SimulationError::QualificationNotStarted
            | SimulationError::QualificationAlreadyStarted
            | SimulationError::QualificationIncomplete
            | SimulationError::QualificationCompleted
            | SimulationError::RoundAlreadyCompleted(_)
            | SimulationError::BracketNotGenerated
            | SimulationError::TournamentNotFinished(_) => ErrorKind::State,

            SimulationError::VersionConflict { .. } => ErrorKind::Conflict,
            SimulationError::Storage(_) => ErrorKind::Storage,
        }
    }

    pub fn invalid_format(confederation: &str, reason: impl Into<String>) -> Self {
        SimulationError::InvalidFormat {
            confederation: confederation.to_string(),
            reason: reason.into(),
        }
    }
}

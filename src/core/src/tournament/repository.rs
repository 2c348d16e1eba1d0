use crate::error::Result;
use crate::tournament::Tournament;

#[derive(Debug, Clone)]
pub struct Versioned<T> {
    pub version: u64,
    pub value: T,
}

/// Document store for tournament aggregates. `save` succeeds only while the
/// stored version still equals `expected_version` and returns the new version.
pub trait TournamentRepository: Send + Sync {
    fn next_id(&self) -> u32;

    fn insert(&self, tournament: &Tournament) -> Result<u64>;

    fn load(&self, id: u32) -> Result<Versioned<Tournament>>;

    fn save(&self, tournament: &Tournament, expected_version: u64) -> Result<u64>;
}

use engine::{Result, SimulationError, Tournament, TournamentRepository, Versioned};
use log::warn;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::RwLock;

struct StoredDocument {
    version: u64,
    body: String,
}

/// Tournament documents kept as JSON in memory, one version counter per document.
#[derive(Default)]
pub struct InMemoryTournamentStore {
    documents: RwLock<HashMap<u32, StoredDocument>>,
    last_id: AtomicU32,
}

impl InMemoryTournamentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.documents.read().map(|documents| documents.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn encode(tournament: &Tournament) -> Result<String> {
        serde_json::to_string(tournament).map_err(|error| SimulationError::Storage(error.to_string()))
    }

    fn poisoned() -> SimulationError {
        SimulationError::Storage(String::from("document lock poisoned"))
    }
}

impl TournamentRepository for InMemoryTournamentStore {
    fn next_id(&self) -> u32 {
        self.last_id.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn insert(&self, tournament: &Tournament) -> Result<u64> {
        let body = Self::encode(tournament)?;
        let mut documents = self.documents.write().map_err(|_| Self::poisoned())?;

        documents.insert(tournament.id, StoredDocument { version: 1, body });

        Ok(1)
    }

    fn load(&self, id: u32) -> Result<Versioned<Tournament>> {
        let documents = self.documents.read().map_err(|_| Self::poisoned())?;
        let document = documents.get(&id).ok_or(SimulationError::TournamentNotFound(id))?;

        let value = serde_json::from_str(&document.body)
            .map_err(|error| SimulationError::Storage(error.to_string()))?;

        Ok(Versioned {
            version: document.version,
            value,
        })
    }

    fn save(&self, tournament: &Tournament, expected_version: u64) -> Result<u64> {
        let body = Self::encode(tournament)?;
        let mut documents = self.documents.write().map_err(|_| Self::poisoned())?;

        let document = documents
            .get_mut(&tournament.id)
            .ok_or(SimulationError::TournamentNotFound(tournament.id))?;

        if document.version != expected_version {
            warn!(
                "tournament {}: stale save at version {}, stored {}",
                tournament.id, expected_version, document.version
            );

            return Err(SimulationError::VersionConflict {
                tournament_id: tournament.id,
                expected: expected_version,
                actual: document.version,
            });
        }

        document.version += 1;
        document.body = body;

        Ok(document.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DatabaseGenerator, DatabaseLoader};
    use engine::{TournamentService, TournamentStage};

    fn tournament(store: &InMemoryTournamentStore) -> Tournament {
        let data = DatabaseGenerator::generate(&DatabaseLoader::load().unwrap());
        Tournament::new(store.next_id(), "World Cup", data.teams, data.formats)
    }

    #[test]
    fn test_roundtrip_and_versions() {
        let store = InMemoryTournamentStore::new();
        let tournament = tournament(&store);
        assert_eq!(tournament.id, 1);

        store.insert(&tournament).unwrap();
        let loaded = store.load(1).unwrap();
        assert_eq!(loaded.version, 1);
        assert_eq!(loaded.value, tournament);

        assert_eq!(store.save(&loaded.value, 1).unwrap(), 2);

        let error = store.save(&loaded.value, 1).unwrap_err();
        assert!(matches!(
            error,
            SimulationError::VersionConflict { expected: 1, actual: 2, .. }
        ));
    }

    #[test]
    fn test_missing_document() {
        let store = InMemoryTournamentStore::new();
        assert!(store.is_empty());
        assert!(matches!(store.load(7), Err(SimulationError::TournamentNotFound(7))));
    }

    #[test]
    fn test_world_cup_through_service() {
        let data = DatabaseGenerator::generate(&DatabaseLoader::load().unwrap());
        let service = TournamentService::with_logging(InMemoryTournamentStore::new(), &data.settings, 2026);

        let id = service
            .create_tournament("World Cup", data.teams.clone(), data.formats.clone())
            .unwrap();
        let results = service.run_to_completion(id).unwrap();

        let tournament = service.tournament(id).unwrap();
        assert_eq!(tournament.stage, TournamentStage::Finished);
        assert_eq!(tournament.qualified_teams().unwrap().len(), 16);
        assert_eq!(tournament.final_results, Some(results));
        assert_eq!(service.repository().len(), 1);
    }
}

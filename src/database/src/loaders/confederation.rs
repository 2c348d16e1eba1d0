use engine::ConfederationFormat;
use serde::Deserialize;

const STATIC_CONFEDERATIONS_JSON: &str = include_str!("../data/confederations.json");

#[derive(Debug, Clone, Deserialize)]
pub struct ConfederationEntity {
    pub code: String,
    pub name: String,
    pub format: ConfederationFormat,
    pub qualification_slots: usize,
    #[serde(default)]
    pub preferred_group_sizes: Vec<usize>,
    pub min_group_size: Option<usize>,
    pub max_group_size: Option<usize>,
    pub fixed_group_count: Option<usize>,
    #[serde(default)]
    pub double_round_robin: bool,
    #[serde(default)]
    pub matchday_offset: u16,
}

pub struct ConfederationLoader;

impl ConfederationLoader {
    pub fn load() -> Result<Vec<ConfederationEntity>, serde_json::Error> {
        serde_json::from_str(STATIC_CONFEDERATIONS_JSON)
    }
}

use engine::SimulationSettings;

const STATIC_SETTINGS_JSON: &str = include_str!("../data/settings.json");

pub struct SettingsLoader;

impl SettingsLoader {
    /// Engine settings. Keys missing from the file keep their defaults.
    pub fn load() -> Result<SimulationSettings, serde_json::Error> {
        serde_json::from_str(STATIC_SETTINGS_JSON)
    }
}

use crate::team::PowerScale;
use serde::{Deserialize, Serialize};

pub type TeamId = u32;

/// National team taking part in the competition. Lower ranking is better.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub code: String,
    pub name: String,
    pub confederation: String,
    pub ranking: u16,
}

impl Team {
    pub fn new(id: TeamId, code: &str, name: &str, confederation: &str, ranking: u16) -> Self {
        Team {
            id,
            code: code.to_string(),
            name: name.to_string(),
            confederation: confederation.to_string(),
            ranking,
        }
    }

    pub fn power(&self) -> u8 {
        PowerScale::power(self.ranking)
    }
}

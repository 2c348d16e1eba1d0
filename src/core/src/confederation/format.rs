use crate::error::{Result, SimulationError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfederationFormat {
    SingleLeague,
    Grouped,
    GroupedWithPlayoff,
}

/// Qualification rules of one confederation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormatRules {
    pub confederation: String,
    pub name: String,
    pub format: ConfederationFormat,
    pub qualification_slots: usize,
    #[serde(default = "default_min_group_size")]
    pub min_group_size: usize,
    #[serde(default)]
    pub preferred_group_sizes: Vec<usize>,
    #[serde(default = "default_max_group_size")]
    pub max_group_size: usize,
    #[serde(default)]
    pub fixed_group_count: Option<usize>,
    #[serde(default)]
    pub double_round_robin: bool,
    /// Global matchday preceding this confederation's first round.
    #[serde(default)]
    pub matchday_offset: u16,
}

fn default_min_group_size() -> usize {
    3
}

fn default_max_group_size() -> usize {
    6
}

impl FormatRules {
    pub fn new(confederation: &str, format: ConfederationFormat, qualification_slots: usize) -> Self {
        FormatRules {
            confederation: confederation.to_string(),
            name: confederation.to_string(),
            format,
            qualification_slots,
            min_group_size: default_min_group_size(),
            preferred_group_sizes: Vec::new(),
            max_group_size: default_max_group_size(),
            fixed_group_count: None,
            double_round_robin: false,
            matchday_offset: 0,
        }
    }

    pub fn with_group_sizes(mut self, preferred: &[usize], min: usize, max: usize) -> Self {
        self.preferred_group_sizes = preferred.to_vec();
        self.min_group_size = min;
        self.max_group_size = max;
        self
    }

    pub fn with_fixed_group_count(mut self, count: usize) -> Self {
        self.fixed_group_count = Some(count);
        self
    }

    pub fn with_double_round_robin(mut self, double_round_robin: bool) -> Self {
        self.double_round_robin = double_round_robin;
        self
    }

    pub fn validate(&self, team_count: usize) -> Result<()> {
        let fail = |reason: String| Err(SimulationError::invalid_format(&self.confederation, reason));

        if team_count == 0 {
            return fail(String::from("no teams"));
        }

        if self.qualification_slots == 0 {
            return fail(String::from("no qualification slots"));
        }

        if self.qualification_slots > team_count {
            return fail(format!(
                "{} slots for {} teams",
                self.qualification_slots, team_count
            ));
        }

        if self.min_group_size > self.max_group_size || self.max_group_size == 0 {
            return fail(format!(
                "group size bounds {}..{} are inconsistent",
                self.min_group_size, self.max_group_size
            ));
        }

        if self.fixed_group_count == Some(0) {
            return fail(String::from("fixed group count of zero"));
        }

        if self.format == ConfederationFormat::GroupedWithPlayoff {
            if self.qualification_slots != 1 {
                return fail(String::from("playoff format awards exactly one slot"));
            }
            if team_count < 2 {
                return fail(String::from("playoff format needs two groups"));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let rules = FormatRules::new("CAF", ConfederationFormat::Grouped, 3);
        assert_eq!(rules.min_group_size, 3);
        assert_eq!(rules.max_group_size, 6);
        assert_eq!(rules.fixed_group_count, None);
        assert!(!rules.double_round_robin);

        let rules = rules.with_group_sizes(&[4], 3, 5).with_double_round_robin(true);
        assert_eq!(rules.preferred_group_sizes, vec![4]);
        assert_eq!(rules.max_group_size, 5);
        assert!(rules.double_round_robin);
    }

    #[test]
    fn test_validate() {
        let rules = FormatRules::new("CAF", ConfederationFormat::Grouped, 3);
        assert!(rules.validate(16).is_ok());
        assert!(rules.validate(0).is_err());
        assert!(rules.validate(2).is_err());

        let playoff = FormatRules::new("CONCACAF", ConfederationFormat::GroupedWithPlayoff, 2);
        assert!(playoff.validate(8).is_err());

        let zero_slots = FormatRules::new("OFC", ConfederationFormat::SingleLeague, 0);
        assert!(zero_slots.validate(6).is_err());
    }
}

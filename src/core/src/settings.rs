use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Tunables of the match and tournament model. Injected read-only into the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    pub home_advantage: f64,
    /// Knockout matches are played at neutral venues (no home advantage).
    pub neutral_knockout_venue: bool,
    pub surprise_probability: f64,
    pub surprise_magnitude: f64,
    pub max_goals: u8,
    pub weighting: WeightingSettings,
    pub shootout: ShootoutSettings,
    pub calendar: CalendarSettings,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        SimulationSettings {
            home_advantage: 1.75,
            neutral_knockout_venue: true,
            surprise_probability: 0.0075,
            surprise_magnitude: 4.0,
            max_goals: 8,
            weighting: WeightingSettings::default(),
            shootout: ShootoutSettings::default(),
            calendar: CalendarSettings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightingSettings {
    /// Exponential boost base for outcomes favouring the stronger side.
    pub favoured_base: f64,
    /// Exponential penalty base for outcomes favouring the weaker side.
    pub opposing_base: f64,
    /// Per power point decay applied to level scorelines.
    pub draw_decay: f64,
    /// Exponents never exceed this differential.
    pub diff_cap: f64,
    pub upset_steps: Vec<UpsetStep>,
    pub blowout_threshold: f64,
    pub blowout_boost: f64,
}

impl Default for WeightingSettings {
    fn default() -> Self {
        WeightingSettings {
            favoured_base: 1.12,
            opposing_base: 1.18,
            draw_decay: 0.93,
            diff_cap: 15.0,
            upset_steps: vec![
                UpsetStep::new(7.0, 0.5),
                UpsetStep::new(12.0, 0.4),
                UpsetStep::new(17.0, 0.3),
            ],
            blowout_threshold: 8.0,
            blowout_boost: 0.08,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UpsetStep {
    pub threshold: f64,
    pub factor: f64,
}

impl UpsetStep {
    pub fn new(threshold: f64, factor: f64) -> Self {
        UpsetStep { threshold, factor }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShootoutSettings {
    pub extra_time_single_goal: f64,
    pub extra_time_double_goal: f64,
    pub penalty_min_success: f64,
    pub penalty_max_success: f64,
    pub regulation_kicks: u8,
    pub max_sudden_death_rounds: u16,
}

impl Default for ShootoutSettings {
    fn default() -> Self {
        ShootoutSettings {
            extra_time_single_goal: 0.17,
            extra_time_double_goal: 0.05,
            penalty_min_success: 0.70,
            penalty_max_success: 0.90,
            regulation_kicks: 5,
            max_sudden_death_rounds: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarSettings {
    pub start_date: NaiveDate,
    pub matchday_interval_days: u16,
}

impl Default for CalendarSettings {
    fn default() -> Self {
        CalendarSettings {
            start_date: NaiveDate::from_ymd_opt(2025, 3, 20).unwrap_or_default(),
            matchday_interval_days: 4,
        }
    }
}

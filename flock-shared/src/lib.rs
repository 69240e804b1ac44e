#![cfg_attr(not(feature = "std"), no_std)]

use serde::{Deserialize, Serialize};

/// Simulation tuning exchanged between a driver and the engine
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FlockSettings {
    pub vision_radius: f64,
    pub max_speed: f64,
    pub max_force: f64,
    pub alignment_weight: f64,
    pub cohesion_weight: f64,
    pub separation_weight: f64,
    pub heading_weight: f64,
    pub heading_force_enabled: bool,
}

impl Default for FlockSettings {
    fn default() -> Self {
        Self {
            vision_radius: 50.0,
            max_speed: 300.0,
            max_force: 20.0,
            alignment_weight: 0.25,
            cohesion_weight: 0.25,
            separation_weight: 0.25,
            heading_weight: 0.05,
            heading_force_enabled: false,
        }
    }
}

/// Settings update message sent from a driver to the engine
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SettingsUpdate {
    pub settings: FlockSettings,
}

/// One reading from the heading-sensor collaborator, in degrees with the
/// compass convention: 0 is north, 90 is east. `None` means no reading is
/// available yet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HeadingUpdate {
    pub degrees: Option<f64>,
}

/// Status snapshot reported back to a driver
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusResponse {
    pub agent_count: usize,
    pub heading_force_active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_sum_below_one() {
        let settings = FlockSettings::default();
        let total = settings.alignment_weight
            + settings.cohesion_weight
            + settings.separation_weight
            + settings.heading_weight;
        assert!(total <= 1.0);
        assert!(settings.heading_weight < settings.alignment_weight);
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_settings_update_round_trips() {
        let update = SettingsUpdate {
            settings: FlockSettings {
                max_speed: 150.0,
                heading_force_enabled: true,
                ..FlockSettings::default()
            },
        };

        let json = serde_json::to_string(&update).unwrap();
        let parsed: SettingsUpdate = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, update);
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_heading_update_represents_absence() {
        let none: HeadingUpdate = serde_json::from_str(r#"{"degrees":null}"#).unwrap();
        assert_eq!(none.degrees, None);

        let some: HeadingUpdate = serde_json::from_str(r#"{"degrees":90.0}"#).unwrap();
        assert_eq!(some.degrees, Some(90.0));
    }
}

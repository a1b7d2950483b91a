/*!
 * Race Configuration
 *
 * Loaded from an optional JSON file named by RELAY_CONFIG, with a
 * RELAY_SEED override; defaults reproduce the classic 4x100 m setup.
 */

use crate::core::errors::ConfigError;
use serde::Deserialize;
use std::ops::Range;
use std::time::Duration;

/// Uniform duration range, in milliseconds on the wire
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct DurationRange {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl DurationRange {
    pub const fn new(min_ms: u64, max_ms: u64) -> Self {
        Self { min_ms, max_ms }
    }

    pub fn as_range(&self) -> Range<Duration> {
        Duration::from_millis(self.min_ms)..Duration::from_millis(self.max_ms)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.min_ms > self.max_ms {
            return Err(ConfigError::InvertedRange {
                min_ms: self.min_ms,
                max_ms: self.max_ms,
            });
        }
        Ok(())
    }
}

/// Full configuration for one race
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RaceConfig {
    /// Number of teams in the race
    pub teams: usize,
    /// Number of athletes in each team
    pub members: usize,
    /// Simulated sprint time per leg
    pub leg_duration: DurationRange,
    /// Pause between "everyone is ready" and the starting signal
    pub starter_delay: DurationRange,
    /// Probability that any given handoff drops the baton
    pub drop_probability: f64,
    /// PRNG seed for reproducible races; entropy-seeded when absent
    pub seed: Option<u64>,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            teams: 4,
            members: 4,
            leg_duration: DurationRange::new(10_000, 12_000),
            starter_delay: DurationRange::new(3_000, 5_000),
            drop_probability: 0.10,
            seed: None,
        }
    }
}

impl RaceConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.teams == 0 {
            return Err(ConfigError::NoTeams);
        }
        if self.members == 0 {
            return Err(ConfigError::NoMembers);
        }
        if !(0.0..=1.0).contains(&self.drop_probability) || !self.drop_probability.is_finite() {
            return Err(ConfigError::InvalidDropProbability(self.drop_probability));
        }
        self.leg_duration.validate()?;
        self.starter_delay.validate()?;
        Ok(())
    }

    /// Load configuration from the environment
    ///
    /// RELAY_CONFIG names a JSON file (defaults apply for absent fields);
    /// RELAY_SEED overrides the seed either way.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = match std::env::var("RELAY_CONFIG") {
            Ok(path) => {
                let raw = std::fs::read_to_string(&path).map_err(|source| {
                    ConfigError::Unreadable {
                        path: path.clone(),
                        source,
                    }
                })?;
                serde_json::from_str(&raw)
                    .map_err(|source| ConfigError::Unparsable { path, source })?
            }
            Err(_) => Self::default(),
        };

        if let Ok(seed) = std::env::var("RELAY_SEED") {
            config.seed = Some(
                seed.parse()
                    .map_err(|_| ConfigError::InvalidSeed(seed))?,
            );
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(RaceConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_teams_rejected() {
        let config = RaceConfig {
            teams: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::NoTeams)));
    }

    #[test]
    fn test_drop_probability_bounds() {
        let mut config = RaceConfig::default();
        config.drop_probability = 1.0;
        assert!(config.validate().is_ok());

        config.drop_probability = 1.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidDropProbability(_))
        ));

        config.drop_probability = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_inverted_range_rejected() {
        let config = RaceConfig {
            leg_duration: DurationRange::new(200, 100),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvertedRange { .. })
        ));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: RaceConfig =
            serde_json::from_str(r#"{"teams": 2, "members": 3, "drop_probability": 0.0}"#).unwrap();
        assert_eq!(config.teams, 2);
        assert_eq!(config.members, 3);
        assert_eq!(config.leg_duration.min_ms, 10_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let parsed: Result<RaceConfig, _> = serde_json::from_str(r#"{"lanes": 8}"#);
        assert!(parsed.is_err());
    }
}

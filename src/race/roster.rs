/*!
 * Roster Data
 * Team names and ordered member names
 */

use crate::core::errors::ConfigError;
use serde::Deserialize;

/// One team's name and its members in running order
#[derive(Debug, Clone, Deserialize)]
pub struct TeamEntry {
    pub name: String,
    pub members: Vec<String>,
}

/// The full field for one race
#[derive(Debug, Clone, Deserialize)]
pub struct Roster {
    pub teams: Vec<TeamEntry>,
}

impl Roster {
    /// The women's 4x100 m relay field from the Tokyo 2020 Olympics
    pub fn tokyo_2020() -> Self {
        let field: [(&str, [&str; 4]); 4] = [
            (
                "Jamaica",
                [
                    "Briana Williams",
                    "Elaine Thompson-Herah",
                    "Shelly-Ann Fraser-Pryce",
                    "Shericka Jackson",
                ],
            ),
            (
                "United States",
                [
                    "Javianne Oliver",
                    "Teahna Daniels",
                    "Jenna Prandini",
                    "Gabrielle Thomas",
                ],
            ),
            (
                "Great Britain",
                [
                    "Asha Philip",
                    "Imani Lansiquot",
                    "Dina Asher-Smith",
                    "Daryll Neita",
                ],
            ),
            (
                "Switzerland",
                [
                    "Ajla Del Ponte",
                    "Mujinga Kambundji",
                    "Salomé Kora",
                    "Riccarda Dietsche",
                ],
            ),
        ];

        Self {
            teams: field
                .into_iter()
                .map(|(name, members)| TeamEntry {
                    name: name.to_string(),
                    members: members.into_iter().map(str::to_string).collect(),
                })
                .collect(),
        }
    }

    /// Synthesized roster for an arbitrary race shape
    pub fn numbered(teams: usize, members: usize) -> Self {
        Self {
            teams: (1..=teams)
                .map(|t| TeamEntry {
                    name: format!("Team {t}"),
                    members: (1..=members).map(|m| format!("Runner {t}.{m}")).collect(),
                })
                .collect(),
        }
    }

    /// Default roster for a race shape: the Tokyo 2020 field when it
    /// fits, a synthesized one otherwise
    pub fn for_shape(teams: usize, members: usize) -> Self {
        if teams == 4 && members == 4 {
            Self::tokyo_2020()
        } else {
            Self::numbered(teams, members)
        }
    }

    /// Check this roster against a configured race shape
    pub fn check_shape(&self, teams: usize, members: usize) -> Result<(), ConfigError> {
        if self.teams.len() != teams {
            return Err(ConfigError::RosterMismatch(format!(
                "expected {teams} teams, roster has {}",
                self.teams.len()
            )));
        }
        for entry in &self.teams {
            if entry.members.len() != members {
                return Err(ConfigError::RosterMismatch(format!(
                    "team '{}' has {} members, expected {members}",
                    entry.name,
                    entry.members.len()
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokyo_field_shape() {
        let roster = Roster::tokyo_2020();
        assert!(roster.check_shape(4, 4).is_ok());
        assert_eq!(roster.teams[0].name, "Jamaica");
    }

    #[test]
    fn test_numbered_roster_shape() {
        let roster = Roster::numbered(3, 5);
        assert!(roster.check_shape(3, 5).is_ok());
        assert_eq!(roster.teams[2].members[4], "Runner 3.5");
    }

    #[test]
    fn test_shape_mismatch_is_rejected() {
        let roster = Roster::numbered(2, 2);
        assert!(roster.check_shape(3, 2).is_err());
        assert!(roster.check_shape(2, 4).is_err());
    }
}

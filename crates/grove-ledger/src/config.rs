use serde::{Deserialize, Serialize};

use grove_types::{Coordinates, TypeError};

use crate::error::LedgerError;

pub const DEFAULT_PROJECT: &str = "Mangrove Restoration Project (Demo)";
pub const DEFAULT_MESSAGE: &str = "Thank you! Your tree planting has been confirmed.";
pub const DEFAULT_BASE_POINT: Coordinates = Coordinates::new(-2.0, 37.0);
pub const DEFAULT_JITTER: f64 = 0.05;

/// Fixed labels and placement parameters for a ledger instance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Project label stamped on every proof.
    pub project: String,
    /// Acknowledgement message stamped on every proof.
    pub message: String,
    /// Per-axis jitter radius in degrees.
    pub jitter: f64,
    /// Center of the planting site.
    pub base_point: Coordinates,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            project: DEFAULT_PROJECT.into(),
            message: DEFAULT_MESSAGE.into(),
            jitter: DEFAULT_JITTER,
            base_point: DEFAULT_BASE_POINT,
        }
    }
}

impl LedgerConfig {
    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.project.trim().is_empty() {
            return Err(LedgerError::InvalidConfig("project label is empty".into()));
        }
        if self.message.trim().is_empty() {
            return Err(LedgerError::InvalidConfig("message is empty".into()));
        }
        if !(self.jitter.is_finite() && self.jitter >= 0.0) {
            return Err(TypeError::InvalidJitter(self.jitter).into());
        }
        self.base_point.validate()?;
        // Jittered points must still be valid coordinates.
        let (lat, lon) = (self.base_point.latitude, self.base_point.longitude);
        Coordinates::new(lat.abs() + self.jitter, lon.abs() + self.jitter).validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let c = LedgerConfig::default();
        assert_eq!(c.project, DEFAULT_PROJECT);
        assert_eq!(c.jitter, 0.05);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn negative_jitter_is_rejected() {
        let c = LedgerConfig {
            jitter: -0.1,
            ..LedgerConfig::default()
        };
        assert!(matches!(c.validate(), Err(LedgerError::InvalidConfig(_))));
    }

    #[test]
    fn jitter_past_the_pole_is_rejected() {
        let c = LedgerConfig {
            base_point: Coordinates::new(89.99, 0.0),
            jitter: 0.05,
            ..LedgerConfig::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn blank_labels_are_rejected() {
        let c = LedgerConfig {
            project: "  ".into(),
            ..LedgerConfig::default()
        };
        assert!(c.validate().is_err());
    }
}

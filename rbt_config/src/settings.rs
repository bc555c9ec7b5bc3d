use crate::error::{ConfigError, ConfigResult};
use serde::Deserialize;

/// Largest batch the random-insert command accepts.
pub const MAX_RANDOM_COUNT: usize = 100_000;

/// Menu loop behaviour
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MenuSettings {
    /// Default number of keys for the random batch command
    pub random_count: usize,
    /// Smallest random key (inclusive)
    pub random_min: i32,
    /// Largest random key (inclusive)
    pub random_max: i32,
    /// Seed for reproducible random batches
    pub seed: Option<u64>,
    /// Clear the terminal before drawing the menu
    pub clear_screen: bool,
    /// Wait for enter after each command
    pub pause: bool,
    /// Show the in-order keys under the menu
    pub show_inorder: bool,
}

impl Default for MenuSettings {
    fn default() -> Self {
        Self {
            random_count: 10,
            random_min: 0,
            random_max: 99,
            seed: None,
            clear_screen: true,
            pause: true,
            show_inorder: true,
        }
    }
}

impl MenuSettings {
    pub fn validate(&self) -> ConfigResult<()> {
        if self.random_min > self.random_max {
            return Err(ConfigError::Validation(format!(
                "menu.random_min ({}) is greater than menu.random_max ({})",
                self.random_min, self.random_max
            )));
        }
        if self.random_count > MAX_RANDOM_COUNT {
            return Err(ConfigError::Validation(format!(
                "menu.random_count must be at most {}",
                MAX_RANDOM_COUNT
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = MenuSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!((settings.random_min, settings.random_max), (0, 99));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let settings = MenuSettings {
            random_min: 10,
            random_max: 1,
            ..MenuSettings::default()
        };
        assert!(matches!(settings.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_oversized_batch_rejected() {
        let settings = MenuSettings {
            random_count: MAX_RANDOM_COUNT + 1,
            ..MenuSettings::default()
        };
        assert!(settings.validate().is_err());
    }
}

use crate::error::ConfigResult;
use crate::settings::MenuSettings;
use crate::ui::UiSettings;
use ::config::{Config as ConfigLib, Environment, File, FileFormat};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable naming an explicit configuration file.
pub const CONFIG_ENV_VAR: &str = "RBT_CONFIG";
/// Prefix for `RBT__SECTION__KEY` overrides.
pub const CONFIG_ENV_PREFIX: &str = "RBT";

/// Main configuration structure for the rbt console
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Menu loop behaviour
    pub menu: MenuSettings,
    /// Tree display settings
    pub ui: UiSettings,
}

impl Config {
    /// Load configuration from a TOML string
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: Config = ConfigLib::builder()
            .add_source(File::from_str(content, FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Get configuration file search paths
    pub fn config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // User-specific config
        if let Some(home) = std::env::var_os("HOME") {
            paths.push(PathBuf::from(&home).join(".rbt").join("config.toml"));
            paths.push(PathBuf::from(&home).join(".config").join("rbt").join("config.toml"));
        }

        // Current directory
        if let Ok(current_dir) = std::env::current_dir() {
            paths.push(current_dir.join(".rbt.toml"));
            paths.push(current_dir.join("rbt.toml"));
        }

        paths
    }

    /// Load configuration with automatic path discovery.
    ///
    /// Sources, later overriding earlier:
    /// 1. built-in defaults
    /// 2. the first existing file of [`Config::config_paths`]
    /// 3. `explicit`, or the file named by `RBT_CONFIG` (must exist)
    /// 4. `RBT__SECTION__KEY` environment variables
    pub fn load(explicit: Option<&Path>) -> ConfigResult<Self> {
        let env_path = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
        let explicit = explicit.map(Path::to_path_buf).or(env_path);
        Self::load_with_paths(&Self::config_paths(), explicit.as_deref())
    }

    /// Load configuration with custom search paths
    pub fn load_with_paths(paths: &[PathBuf], explicit: Option<&Path>) -> ConfigResult<Self> {
        let mut builder = ConfigLib::builder();

        if let Some(path) = paths.iter().find(|path| path.exists()) {
            debug!(path = %path.display(), "using configuration file");
            builder = builder.add_source(File::from(path.as_path()).format(FileFormat::Toml));
        }

        if let Some(path) = explicit {
            debug!(path = %path.display(), "using explicit configuration file");
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        }

        let config: Config = builder
            .add_source(
                Environment::with_prefix(CONFIG_ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> ConfigResult<()> {
        self.menu.validate()?;
        self.ui.validate()
    }
}

/// Configuration builder for creating custom configurations
pub struct ConfigBuilder {
    config: Config,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn menu<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&mut MenuSettings),
    {
        f(&mut self.config.menu);
        self
    }

    pub fn ui<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&mut UiSettings),
    {
        f(&mut self.config.ui);
        self
    }

    pub fn build(self) -> ConfigResult<Config> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::ui::DumpStyle;

    #[test]
    fn test_empty_source_gives_defaults() {
        let config = Config::from_toml_str("").expect("empty config");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let config = Config::from_toml_str(
            r##"
            [menu]
            random_count = 25
            seed = 7
            pause = false

            [ui]
            dump_style = "relations"
            red = "#FF0000"
            "##,
        )
        .expect("valid config");

        assert_eq!(config.menu.random_count, 25);
        assert_eq!(config.menu.seed, Some(7));
        assert!(!config.menu.pause);
        assert!(config.menu.clear_screen);
        assert_eq!(config.ui.dump_style, DumpStyle::Relations);
        assert_eq!(config.ui.indent_width, 4);
        assert_eq!(config.ui.red, "#FF0000");
    }

    #[test]
    fn test_invalid_values_rejected() {
        let result = Config::from_toml_str(
            r#"
            [menu]
            random_min = 50
            random_max = 10
            "#,
        );
        assert!(matches!(result, Err(ConfigError::Validation(_))));

        let result = Config::from_toml_str("[ui]\nblack = \"nope\"\n");
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_wrong_type_is_source_error() {
        let result = Config::from_toml_str("[menu]\nrandom_count = \"many\"\n");
        assert!(matches!(result, Err(ConfigError::Source(_))));
    }

    #[test]
    fn test_missing_search_paths_fall_back_to_defaults() {
        let paths = vec![PathBuf::from("/nonexistent/rbt/config.toml")];
        let config = Config::load_with_paths(&paths, None).expect("defaults");
        assert_eq!(config.ui, UiSettings::default());
    }

    #[test]
    fn test_missing_explicit_path_is_error() {
        let result = Config::load_with_paths(&[], Some(Path::new("/nonexistent/rbt.toml")));
        assert!(matches!(result, Err(ConfigError::Source(_))));
    }

    #[test]
    fn test_builder_validates() {
        let config = ConfigBuilder::new()
            .menu(|menu| menu.random_count = 3)
            .ui(|ui| ui.colored = false)
            .build()
            .expect("valid");
        assert_eq!(config.menu.random_count, 3);
        assert!(!config.ui.colored);

        let result = ConfigBuilder::new().ui(|ui| ui.indent_width = 0).build();
        assert!(result.is_err());
    }
}

use crate::error::{ConfigError, ConfigResult};
use rbt_core::MAX_INDENT_WIDTH;
use serde::Deserialize;

pub use rbt_core::DumpStyle;

/// Color definition (RGB values)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse color from hex string (e.g., "#FF0000" or "FF0000")
    pub fn from_hex(hex: &str) -> ConfigResult<Self> {
        let digits = hex.trim_start_matches('#');
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ConfigError::Validation(format!(
                "color '{}' must be 6 hex digits",
                hex
            )));
        }

        let component = |range: std::ops::Range<usize>, name: &str| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| {
                ConfigError::Validation(format!("invalid {} component in '{}'", name, hex))
            })
        };

        Ok(Self::new(
            component(0..2, "red")?,
            component(2..4, "green")?,
            component(4..6, "blue")?,
        ))
    }

    /// Convert to hex string
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Display settings for tree output
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    pub dump_style: DumpStyle,
    /// Spaces per tree level in the recessed layout
    pub indent_width: usize,
    /// Color node keys by node color
    pub colored: bool,
    /// Hex color for red nodes
    pub red: String,
    /// Hex color for black nodes
    pub black: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            dump_style: DumpStyle::Recessed,
            indent_width: 4,
            colored: true,
            red: "#E06C75".to_string(),
            black: "#ABB2BF".to_string(),
        }
    }
}

impl UiSettings {
    pub fn red_color(&self) -> ConfigResult<Color> {
        Color::from_hex(&self.red)
    }

    pub fn black_color(&self) -> ConfigResult<Color> {
        Color::from_hex(&self.black)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.indent_width == 0 || self.indent_width > MAX_INDENT_WIDTH {
            return Err(ConfigError::Validation(format!(
                "ui.indent_width must be between 1 and {}",
                MAX_INDENT_WIDTH
            )));
        }
        self.red_color()?;
        self.black_color()?;
        Ok(())
    }
}

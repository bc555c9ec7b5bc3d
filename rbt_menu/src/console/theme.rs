use crossterm::style::{Color, Stylize};
use rbt_config::{Color as ConfigColor, ConfigResult, UiSettings};
use rbt_core::Color as NodeColor;

/// Terminal colors for tree output and status messages
#[derive(Debug, Clone)]
pub struct TerminalTheme {
    pub red_node: Color,
    pub black_node: Color,
    /// When false every `paint` call returns the text untouched
    pub colored: bool,
}

impl Default for TerminalTheme {
    fn default() -> Self {
        Self {
            red_node: Color::Red,
            black_node: Color::Grey,
            colored: true,
        }
    }
}

impl TerminalTheme {
    /// Create theme from configuration
    pub fn from_config(ui_settings: &UiSettings) -> ConfigResult<Self> {
        Ok(Self {
            red_node: Self::hex_to_color(ui_settings.red_color()?),
            black_node: Self::hex_to_color(ui_settings.black_color()?),
            colored: ui_settings.colored,
        })
    }

    /// Convert hex color to crossterm Color
    pub fn hex_to_color(hex: ConfigColor) -> Color {
        Color::Rgb {
            r: hex.r,
            g: hex.g,
            b: hex.b,
        }
    }

    pub fn node(&self, color: NodeColor) -> Color {
        match color {
            NodeColor::Red => self.red_node,
            NodeColor::Black => self.black_node,
        }
    }

    pub fn success(&self) -> Color {
        Color::Green
    }

    pub fn warning(&self) -> Color {
        Color::Yellow
    }

    pub fn error(&self) -> Color {
        Color::Red
    }

    pub fn paint(&self, text: String, color: Color) -> String {
        if self.colored {
            text.with(color).to_string()
        } else {
            text
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_from_config() {
        let ui = UiSettings {
            red: "#FF0000".to_string(),
            black: "#101010".to_string(),
            ..UiSettings::default()
        };
        let theme = TerminalTheme::from_config(&ui).expect("valid colors");
        assert_eq!(theme.node(NodeColor::Red), Color::Rgb { r: 255, g: 0, b: 0 });
        assert_eq!(theme.node(NodeColor::Black), Color::Rgb { r: 16, g: 16, b: 16 });
    }

    #[test]
    fn test_uncolored_paint_is_plain() {
        let theme = TerminalTheme {
            colored: false,
            ..TerminalTheme::default()
        };
        assert_eq!(theme.paint("[5(R)]".to_string(), theme.red_node), "[5(R)]");
    }

    #[test]
    fn test_colored_paint_wraps_text() {
        let theme = TerminalTheme::default();
        let painted = theme.paint("[5(R)]".to_string(), theme.red_node);
        assert!(painted.contains("[5(R)]"));
        assert_ne!(painted, "[5(R)]");
    }
}

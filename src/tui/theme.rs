//! Theme support for the TUI.
//!
//! A handful of built-in palettes, selected by name from the config file.

use ratatui::style::Color;

/// A color theme for the TUI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Theme name for display and configuration
    pub name: String,
    /// Primary accent color (headers, focused borders)
    pub primary: Color,
    /// Secondary accent color (checked tasks, progress)
    pub secondary: Color,
    /// Tertiary accent color (recommendations)
    pub accent: Color,
    /// Main text color
    pub text: Color,
    /// Dimmed text color (hints, timestamps)
    pub text_dim: Color,
    /// Selected item background
    pub selected_bg: Color,
    /// Border color
    pub border: Color,
    /// Error color
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_theme()
    }
}

impl Theme {
    /// Default theme - works well on both light and dark terminals.
    pub fn default_theme() -> Self {
        Self {
            name: "default".to_string(),
            primary: Color::Rgb(99, 102, 241),   // Indigo
            secondary: Color::Rgb(16, 185, 129), // Emerald
            accent: Color::Rgb(251, 146, 60),    // Orange
            text: Color::White,
            text_dim: Color::Rgb(156, 163, 175),   // Gray-400
            selected_bg: Color::Rgb(55, 65, 81),   // Gray-700
            border: Color::Rgb(75, 85, 99),        // Gray-600
            error: Color::Rgb(239, 68, 68),        // Red
        }
    }

    /// Dracula theme - dark purple and pink.
    pub fn dracula() -> Self {
        Self {
            name: "dracula".to_string(),
            primary: Color::Rgb(189, 147, 249),  // Purple
            secondary: Color::Rgb(80, 250, 123), // Green
            accent: Color::Rgb(255, 121, 198),   // Pink
            text: Color::Rgb(248, 248, 242),
            text_dim: Color::Rgb(98, 114, 164),
            selected_bg: Color::Rgb(68, 71, 90),
            border: Color::Rgb(68, 71, 90),
            error: Color::Rgb(255, 85, 85),
        }
    }

    /// Nord theme - arctic, bluish colors.
    pub fn nord() -> Self {
        Self {
            name: "nord".to_string(),
            primary: Color::Rgb(136, 192, 208),   // Nord8
            secondary: Color::Rgb(163, 190, 140), // Nord14
            accent: Color::Rgb(208, 135, 112),    // Nord12
            text: Color::Rgb(236, 239, 244),
            text_dim: Color::Rgb(216, 222, 233),
            selected_bg: Color::Rgb(59, 66, 82),
            border: Color::Rgb(67, 76, 94),
            error: Color::Rgb(191, 97, 106),
        }
    }

    /// Look up a built-in theme by name.
    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "default" => Some(Self::default_theme()),
            "dracula" => Some(Self::dracula()),
            "nord" => Some(Self::nord()),
            _ => None,
        }
    }

    /// Names of all built-in themes.
    pub fn available_themes() -> &'static [&'static str] {
        &["default", "dracula", "nord"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_by_name() {
        assert_eq!(Theme::by_name("Dracula").unwrap().name, "dracula");
        assert_eq!(Theme::by_name("nord").unwrap().name, "nord");
        assert!(Theme::by_name("unknown").is_none());
    }

    #[test]
    fn test_all_available_themes_resolve() {
        for name in Theme::available_themes() {
            assert!(Theme::by_name(name).is_some(), "theme {name} missing");
        }
    }
}

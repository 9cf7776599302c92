use ratatui::style::Color;
use std::str::FromStr;

/// Midnight theme colors
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: Color,
    pub surface: Color,
    pub text: Color,
    pub heading: Color,
    pub accent: Color,
    pub dimmed: Color,
    pub highlight_fg: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme::midnight()
    }
}

impl Theme {
    pub fn midnight() -> Self {
        Self {
            background: Color::Rgb(26, 27, 38),    // #1A1B26 Stormy Dark
            surface: Color::Rgb(36, 40, 59),       // #24283B
            text: Color::Rgb(169, 177, 214),       // #A9B1D6 Light Blue
            heading: Color::Rgb(192, 202, 245),    // #C0CAF5
            accent: Color::Rgb(247, 118, 142),     // #F7768E Coral Red
            dimmed: Color::Rgb(100, 110, 150),     // #646E96 Dimmed Blue
            highlight_fg: Color::Rgb(26, 27, 38),  // dark text on the highlight
            error: Color::Rgb(255, 158, 100),      // #FF9E64
        }
    }

    pub fn current() -> Self {
        Self::midnight()
    }
}

/// Parses a configured highlight color (`yellow`, `#ffd700`, `214`).
pub fn parse_color(value: &str) -> Option<Color> {
    Color::from_str(value.trim()).ok()
}

/// Highlight background for `value`, falling back to the accent color.
pub fn highlight_color(value: &str) -> Color {
    parse_color(value).unwrap_or_else(|| Theme::current().accent)
}

/// Convenience access to current theme colors
pub mod colors {
    use super::Theme;
    use ratatui::style::Color;

    pub fn background() -> Color {
        Theme::current().background
    }
    pub fn surface() -> Color {
        Theme::current().surface
    }
    pub fn text() -> Color {
        Theme::current().text
    }
    pub fn heading() -> Color {
        Theme::current().heading
    }
    pub fn accent() -> Color {
        Theme::current().accent
    }
    pub fn dimmed() -> Color {
        Theme::current().dimmed
    }
    pub fn highlight_fg() -> Color {
        Theme::current().highlight_fg
    }
    pub fn error() -> Color {
        Theme::current().error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_named_and_hex() {
        assert_eq!(parse_color("yellow"), Some(Color::Yellow));
        assert_eq!(parse_color("#ff0000"), Some(Color::Rgb(255, 0, 0)));
        assert_eq!(parse_color("not-a-color"), None);
    }

    #[test]
    fn test_highlight_color_fallback() {
        assert_eq!(highlight_color("???"), Theme::current().accent);
        assert_eq!(highlight_color(" red "), Color::Red);
    }
}

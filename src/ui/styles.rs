//! Color palette and shared styles.

use ratatui::style::{Color, Modifier, Style};

pub const PRIMARY: Color = Color::Rgb(0x7D, 0x56, 0xF4);
pub const SECONDARY: Color = Color::Rgb(0xFC, 0x8E, 0xAC);
pub const TEXT: Color = Color::Rgb(0xFF, 0xFF, 0xFF);
pub const SUBTLE: Color = Color::Rgb(0x88, 0x88, 0x88);
pub const SUCCESS: Color = Color::Rgb(0x73, 0xF5, 0x9F);
pub const WARNING: Color = Color::Rgb(0xF5, 0xA6, 0x23);
pub const ERROR: Color = Color::Rgb(0xF5, 0x42, 0x6C);
pub const HIGHLIGHT: Color = Color::Rgb(0x00, 0xB7, 0xC3);

/// Section header
pub fn title() -> Style {
    Style::new()
        .fg(TEXT)
        .bg(PRIMARY)
        .add_modifier(Modifier::BOLD)
}

/// Selected list row
pub fn selected() -> Style {
    Style::new()
        .fg(TEXT)
        .bg(PRIMARY)
        .add_modifier(Modifier::BOLD)
}

pub fn subtle() -> Style {
    Style::new().fg(SUBTLE)
}

pub fn label() -> Style {
    Style::new().fg(SECONDARY).add_modifier(Modifier::BOLD)
}

pub fn error() -> Style {
    Style::new().fg(ERROR).add_modifier(Modifier::BOLD)
}

pub fn success() -> Style {
    Style::new().fg(SUCCESS).add_modifier(Modifier::BOLD)
}

pub fn warning() -> Style {
    Style::new().fg(WARNING).add_modifier(Modifier::BOLD)
}

pub fn border() -> Style {
    Style::new().fg(PRIMARY)
}

pub fn focused_border() -> Style {
    Style::new().fg(HIGHLIGHT)
}

/// Color for a container state as reported by the engine
pub fn state_color(state: &str) -> Color {
    match state {
        "running" => SUCCESS,
        "created" | "restarting" | "paused" => WARNING,
        "exited" | "dead" => SUBTLE,
        "removing" => ERROR,
        _ => TEXT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_colors() {
        assert_eq!(state_color("running"), SUCCESS);
        assert_eq!(state_color("exited"), SUBTLE);
        assert_eq!(state_color("created"), WARNING);
        assert_eq!(state_color("something-new"), TEXT);
    }
}

/// Named display styles shared by every screen

use ratatui::style::{Color, Modifier, Style};

/// Fixed style set, built once at startup and shared read-only.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub normal: Style,
    pub bold: Style,
    pub error: Style,
    pub label_header: Style,
    pub highlight: Style,
    pub grid_header: Style,
    pub grid_selected: Style,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            normal: Style::default().fg(Color::White).bg(Color::Black),
            bold: Style::default().add_modifier(Modifier::BOLD),
            error: Style::default()
                .fg(Color::Indexed(196))
                .add_modifier(Modifier::BOLD),
            label_header: Style::default().fg(Color::White).bg(Color::Black),
            highlight: Style::default().fg(Color::Indexed(75)),
            grid_header: Style::default().fg(Color::White).bg(Color::Indexed(89)),
            grid_selected: Style::default().fg(Color::White).bg(Color::Indexed(33)),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

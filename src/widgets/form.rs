/// Modal form overlay: a field-based editor drawn on top of the active view

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::theme::Theme;

/// Declarative description of one form field.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub display: &'static str,
    pub max_len: usize,
    pub read_only: bool,
}

/// Completion result handed to the owning view. Side-effecting work (like
/// issuing a daemon request) happens only in the handler that receives this.
#[derive(Debug, Clone)]
pub struct FormOutcome {
    pub accepted: bool,
    pub values: Vec<(String, String)>,
}

/// Modal editor bound to an ordered field list. Read-only fields render as
/// display-only and are skipped by focus cycling.
#[derive(Debug)]
pub struct FormState {
    title: String,
    fields: Vec<FieldSpec>,
    values: Vec<String>,
    active: usize,
    error: Option<String>,
    closed: bool,
}

impl FormState {
    pub fn new(title: impl Into<String>, fields: &[FieldSpec], initial: &[&str]) -> Self {
        let values = fields
            .iter()
            .enumerate()
            .map(|(i, _)| initial.get(i).map(|s| s.to_string()).unwrap_or_default())
            .collect();
        let mut form = Self {
            title: title.into(),
            fields: fields.to_vec(),
            values,
            active: 0,
            error: None,
            closed: false,
        };
        form.switch_active(-1);
        form
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn active_field(&self) -> usize {
        self.active
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .position(|f| f.name == name)
            .map(|i| self.values[i].as_str())
    }

    /// Focus a field by index; -1 focuses the first editable field. A form
    /// with no editable field keeps focus on index 0 (display-only mode).
    pub fn switch_active(&mut self, index: isize) {
        if index < 0 {
            self.active = self
                .fields
                .iter()
                .position(|f| !f.read_only)
                .unwrap_or(0);
        } else {
            self.active = (index as usize).min(self.fields.len().saturating_sub(1));
        }
    }

    fn cycle_focus(&mut self, forward: bool) {
        let editable: Vec<usize> = self
            .fields
            .iter()
            .enumerate()
            .filter(|(_, f)| !f.read_only)
            .map(|(i, _)| i)
            .collect();
        if editable.is_empty() {
            return;
        }
        let pos = editable.iter().position(|&i| i == self.active).unwrap_or(0);
        let next = if forward {
            (pos + 1) % editable.len()
        } else {
            (pos + editable.len() - 1) % editable.len()
        };
        self.active = editable[next];
    }

    fn validate(&self) -> Result<(), String> {
        for (field, value) in self.fields.iter().zip(&self.values) {
            if !field.read_only && value.chars().count() > field.max_len {
                return Err(format!(
                    "{} exceeds {} characters",
                    field.display, field.max_len
                ));
            }
        }
        Ok(())
    }

    fn outcome(&self, accepted: bool) -> FormOutcome {
        FormOutcome {
            accepted,
            values: self
                .fields
                .iter()
                .zip(&self.values)
                .map(|(f, v)| (f.name.to_string(), v.clone()))
                .collect(),
        }
    }

    /// Feed a key event into the form. Returns a completion outcome on
    /// confirm or cancel; an invalid confirm reports `accepted = false` and
    /// keeps the overlay open for correction.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<FormOutcome> {
        match key.code {
            KeyCode::Esc => {
                self.closed = true;
                Some(self.outcome(false))
            }
            KeyCode::Enter => match self.validate() {
                Ok(()) => {
                    self.closed = true;
                    Some(self.outcome(true))
                }
                Err(msg) => {
                    self.error = Some(msg);
                    Some(self.outcome(false))
                }
            },
            KeyCode::Tab | KeyCode::Down => {
                self.cycle_focus(true);
                None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.cycle_focus(false);
                None
            }
            KeyCode::Backspace => {
                if !self.fields[self.active].read_only {
                    self.values[self.active].pop();
                    self.error = None;
                }
                None
            }
            KeyCode::Char(c) => {
                if !self.fields[self.active].read_only {
                    self.values[self.active].push(c);
                    self.error = None;
                }
                None
            }
            _ => None,
        }
    }

    /// Draw the overlay centered in `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let width = 60.min(area.width.saturating_sub(4));
        let height = (self.fields.len() as u16 + 4).min(area.height.saturating_sub(2));
        let modal = Rect {
            x: area.x + (area.width.saturating_sub(width)) / 2,
            y: area.y + (area.height.saturating_sub(height)) / 2,
            width,
            height,
        };

        frame.render_widget(Clear, modal);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.highlight)
            .title(format!(" {} ", self.title))
            .title_alignment(Alignment::Center)
            .style(theme.normal);
        let inner = block.inner(modal);
        frame.render_widget(block, modal);

        let mut lines = Vec::with_capacity(self.fields.len() + 2);
        for (i, (field, value)) in self.fields.iter().zip(&self.values).enumerate() {
            let label = format!("{}: ", field.display);
            let value_style = if i == self.active && !field.read_only {
                theme.grid_selected
            } else {
                theme.normal
            };
            lines.push(Line::from(vec![
                Span::styled(label, theme.bold),
                Span::styled(value.clone(), value_style),
            ]));
        }
        lines.push(Line::from(""));
        if let Some(ref msg) = self.error {
            lines.push(Line::from(Span::styled(msg.clone(), theme.error)));
        } else {
            lines.push(Line::from(Span::styled(
                "Enter confirm  Esc cancel  Tab next field",
                theme.highlight,
            )));
        }

        frame.render_widget(Paragraph::new(lines), inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    const REQUEST: &[FieldSpec] = &[FieldSpec {
        name: "address_type",
        display: "Address type",
        max_len: 6,
        read_only: false,
    }];

    const RESPONSE: &[FieldSpec] = &[
        FieldSpec {
            name: "address_type",
            display: "Address type",
            max_len: 6,
            read_only: true,
        },
        FieldSpec {
            name: "address",
            display: "Address",
            max_len: 50,
            read_only: true,
        },
    ];

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn valid_confirm_carries_entered_values() {
        let mut form = FormState::new("New address", REQUEST, &["np2wkh"]);
        let outcome = form.handle_key(key(KeyCode::Enter)).unwrap();
        assert!(outcome.accepted);
        assert_eq!(
            outcome.values,
            vec![("address_type".to_string(), "np2wkh".to_string())]
        );
        assert!(form.is_closed());
    }

    #[test]
    fn invalid_confirm_keeps_overlay_open() {
        let mut form = FormState::new("New address", REQUEST, &["np2wkh"]);
        for c in "extra".chars() {
            form.handle_key(key(KeyCode::Char(c)));
        }
        let outcome = form.handle_key(key(KeyCode::Enter)).unwrap();
        assert!(!outcome.accepted);
        assert!(!form.is_closed());
        assert!(form.error.is_some());

        // Correct the field and confirm again.
        for _ in 0..5 {
            form.handle_key(key(KeyCode::Backspace));
        }
        let outcome = form.handle_key(key(KeyCode::Enter)).unwrap();
        assert!(outcome.accepted);
        assert!(form.is_closed());
    }

    #[test]
    fn cancel_reports_unaccepted_and_closes() {
        let mut form = FormState::new("New address", REQUEST, &["np2wkh"]);
        form.handle_key(key(KeyCode::Char('x')));
        let outcome = form.handle_key(key(KeyCode::Esc)).unwrap();
        assert!(!outcome.accepted);
        assert!(form.is_closed());
    }

    #[test]
    fn read_only_fields_reject_edits() {
        let mut form = FormState::new("New address", RESPONSE, &["np2wkh", "bc1qxyz"]);
        form.handle_key(key(KeyCode::Char('z')));
        form.handle_key(key(KeyCode::Backspace));
        assert_eq!(form.value("address_type"), Some("np2wkh"));
        assert_eq!(form.value("address"), Some("bc1qxyz"));
    }

    #[test]
    fn focus_starts_on_first_editable_field() {
        let mixed = [
            FieldSpec {
                name: "a",
                display: "A",
                max_len: 4,
                read_only: true,
            },
            FieldSpec {
                name: "b",
                display: "B",
                max_len: 4,
                read_only: false,
            },
        ];
        let form = FormState::new("Mixed", &mixed, &["x", "y"]);
        assert_eq!(form.active_field(), 1);
    }

    #[test]
    fn focus_cycles_over_editable_fields_only() {
        let mixed = [
            FieldSpec {
                name: "a",
                display: "A",
                max_len: 4,
                read_only: false,
            },
            FieldSpec {
                name: "b",
                display: "B",
                max_len: 4,
                read_only: true,
            },
            FieldSpec {
                name: "c",
                display: "C",
                max_len: 4,
                read_only: false,
            },
        ];
        let mut form = FormState::new("Mixed", &mixed, &[]);
        assert_eq!(form.active_field(), 0);
        form.handle_key(key(KeyCode::Tab));
        assert_eq!(form.active_field(), 2);
        form.handle_key(key(KeyCode::Tab));
        assert_eq!(form.active_field(), 0);
    }
}

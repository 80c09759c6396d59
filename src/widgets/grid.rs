/// Tabular grid: column definitions, row data, selection cursor and
/// on-demand line rendering

use ratatui::text::{Line, Span};

use crate::theme::Theme;
use crate::utils::{fit, format_timestamp, group_thousands};

/// How a cell value is formatted into its column slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    /// Thousands-grouped integer
    Int,
    /// Fixed-width local timestamp
    Date,
    /// Truncated or left-justified string
    Text,
    /// Comma-joined list of strings, same width rule as Text
    List,
}

/// Column definition. A width of 0 means "flex": the column shares the
/// viewport width left over after fixed columns and spacing.
#[derive(Debug, Clone)]
pub struct Column {
    pub label: String,
    pub width: u16,
    pub kind: CellKind,
}

/// One cell of row data, matched positionally to the column list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Int(i64),
    Date(i64),
    Text(String),
    List(Vec<String>),
}

impl Cell {
    fn format(&self, width: usize) -> String {
        match self {
            Cell::Int(n) => fit(&group_thousands(*n), width),
            Cell::Date(secs) => fit(&format_timestamp(*secs), width),
            Cell::Text(s) => fit(s, width),
            Cell::List(items) => fit(&items.join(","), width),
        }
    }
}

/// Scrollable data grid. Rows are replaced wholesale on refresh; the
/// selection cursor is positional and survives replacement untouched.
/// Moves clamp the cursor into range, and an out-of-range cursor simply
/// highlights nothing until the next move.
#[derive(Debug, Default)]
pub struct DataGrid {
    pub header: String,
    columns: Vec<Column>,
    rows: Vec<Vec<Cell>>,
    selected: Option<usize>,
    width: u16,
    height: u16,
    rendered: bool,
}

impl DataGrid {
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            ..Default::default()
        }
    }

    /// Append a column definition. Columns are fixed at view construction;
    /// adding one after rendering has started is a programmer error.
    pub fn add_column(&mut self, label: &str, width: u16, kind: CellKind) {
        assert!(
            !self.rendered,
            "add_column called after rendering started ({})",
            label
        );
        self.columns.push(Column {
            label: label.to_string(),
            width,
            kind,
        });
    }

    /// Replace row data wholesale. Deliberately leaves the selection
    /// cursor alone; callers wanting a reset do so explicitly.
    pub fn set_rows(&mut self, rows: Vec<Vec<Cell>>) {
        self.rows = rows;
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn selected(&self) -> Option<usize> {
        if self.rows.is_empty() {
            None
        } else {
            self.selected
        }
    }

    /// Current cursor clamped into range, or None on an empty grid.
    fn clamped(&self) -> Option<usize> {
        if self.rows.is_empty() {
            None
        } else {
            Some(self.selected.unwrap_or(0).min(self.rows.len() - 1))
        }
    }

    pub fn move_selection_up(&mut self) {
        self.selected = self.clamped().map(|cur| cur.saturating_sub(1));
    }

    pub fn move_selection_down(&mut self) {
        self.selected = self
            .clamped()
            .map(|cur| (cur + 1).min(self.rows.len() - 1));
    }

    /// Record the viewport dimensions; must precede grid_rows.
    pub fn set_render_size(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    /// Effective character width of every column for the current viewport.
    /// Flex columns split the remainder after fixed widths and one space of
    /// inter-column spacing; a negative remainder collapses them to zero.
    fn effective_widths(&self) -> Vec<usize> {
        let spacing = self.columns.len().saturating_sub(1);
        let fixed: usize = self.columns.iter().map(|c| c.width as usize).sum();
        let flex_count = self.columns.iter().filter(|c| c.width == 0).count();
        let remaining = (self.width as isize) - (fixed as isize) - (spacing as isize);
        let flex_share = if flex_count > 0 && remaining > 0 {
            remaining as usize / flex_count
        } else {
            0
        };
        self.columns
            .iter()
            .map(|c| {
                if c.width == 0 {
                    flex_share
                } else {
                    c.width as usize
                }
            })
            .collect()
    }

    /// Produce the header line plus one line per visible data row, styled
    /// per the theme. Restartable: each call renders from current state.
    pub fn grid_rows(&mut self, theme: &Theme) -> Vec<Line<'static>> {
        self.rendered = true;
        let widths = self.effective_widths();

        let mut lines = Vec::with_capacity(self.height as usize + 1);
        let header_text = self
            .columns
            .iter()
            .zip(&widths)
            .map(|(c, w)| fit(&c.label, *w))
            .collect::<Vec<_>>()
            .join(" ");
        lines.push(Line::from(Span::styled(header_text, theme.grid_header)));

        let visible = (self.height as usize).saturating_sub(1).max(1);
        let selected = self.selected();
        // Keep the cursor inside the window when it scrolls past the bottom.
        let start = match selected {
            Some(sel) if sel < self.rows.len() && sel >= visible => sel + 1 - visible,
            _ => 0,
        };

        for (idx, row) in self.rows.iter().enumerate().skip(start).take(visible) {
            let text = row
                .iter()
                .zip(&widths)
                .map(|(cell, w)| cell.format(*w))
                .collect::<Vec<_>>()
                .join(" ");
            let style = if selected == Some(idx) && idx < self.rows.len() {
                theme.grid_selected
            } else {
                theme.normal
            };
            lines.push(Line::from(Span::styled(text, style)));
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_grid() -> DataGrid {
        let mut g = DataGrid::new("[Test]");
        g.add_column("Amount", 12, CellKind::Int);
        g.add_column("TxHash", 0, CellKind::Text);
        g
    }

    fn rows(n: usize) -> Vec<Vec<Cell>> {
        (0..n)
            .map(|i| vec![Cell::Int(i as i64), Cell::Text(format!("tx{}", i))])
            .collect()
    }

    #[test]
    fn selection_stays_in_bounds() {
        let mut g = sample_grid();
        g.set_rows(rows(3));
        for _ in 0..10 {
            g.move_selection_down();
        }
        assert_eq!(g.selected(), Some(2));
        for _ in 0..10 {
            g.move_selection_up();
        }
        assert_eq!(g.selected(), Some(0));
    }

    #[test]
    fn moves_on_empty_grid_are_noops() {
        let mut g = sample_grid();
        g.move_selection_down();
        g.move_selection_up();
        assert_eq!(g.selected(), None);
        assert_eq!(g.row_count(), 0);
    }

    #[test]
    fn set_rows_does_not_auto_clamp() {
        let mut g = sample_grid();
        g.set_rows(rows(5));
        for _ in 0..4 {
            g.move_selection_down();
        }
        assert_eq!(g.selected(), Some(4));

        // Shrink to 3 rows: the raw cursor is untouched until the next move.
        g.set_rows(rows(3));
        assert_eq!(g.selected, Some(4));

        // Clamp-on-read: rendering highlights nothing while out of range.
        let theme = Theme::dark();
        g.set_render_size(40, 10);
        let lines = g.grid_rows(&theme);
        assert_eq!(lines.len(), 4);
        for line in &lines[1..] {
            assert_ne!(line.spans[0].style, theme.grid_selected);
        }

        // Clamp-on-write: the next move lands on the new last row.
        g.move_selection_down();
        assert_eq!(g.selected(), Some(2));
    }

    #[test]
    fn selection_resumes_after_refill() {
        let mut g = sample_grid();
        g.set_rows(rows(2));
        g.move_selection_down();
        g.set_rows(Vec::new());
        assert_eq!(g.selected(), None);
        g.set_rows(rows(2));
        assert_eq!(g.selected(), Some(1));
    }

    #[test]
    fn fixed_and_flex_widths() {
        let mut g = sample_grid();
        g.set_rows(vec![vec![
            Cell::Int(150000),
            Cell::Text("abc123def456".repeat(4)),
        ]]);
        g.set_render_size(40, 10);
        let theme = Theme::dark();
        let lines = g.grid_rows(&theme);
        assert_eq!(lines.len(), 2);

        let data = lines[1].spans[0].content.to_string();
        // 12-char fixed slot, one space, then the flex remainder (27 chars).
        assert_eq!(&data[..12], "150,000     ");
        assert_eq!(data.len(), 40);
        assert!(data[13..].starts_with("abc123def456"));
    }

    #[test]
    fn negative_remainder_renders_flex_empty() {
        let mut g = sample_grid();
        g.set_rows(vec![vec![Cell::Int(1), Cell::Text("hash".into())]]);
        g.set_render_size(8, 10); // 12 fixed + spacing > 8
        let theme = Theme::dark();
        let lines = g.grid_rows(&theme);
        let data = lines[1].spans[0].content.to_string();
        assert!(!data.contains("hash"));
    }

    #[test]
    fn list_cells_join_with_commas() {
        let c = Cell::List(vec!["a".into(), "b".into(), "c".into()]);
        assert_eq!(c.format(5), "a,b,c");
        assert_eq!(c.format(3), "a,b");
    }

    #[test]
    #[should_panic(expected = "add_column")]
    fn add_column_after_render_panics() {
        let mut g = sample_grid();
        g.set_render_size(40, 10);
        let theme = Theme::dark();
        let _ = g.grid_rows(&theme);
        g.add_column("Late", 4, CellKind::Text);
    }

    #[test]
    fn viewport_scrolls_to_keep_cursor_visible() {
        let mut g = sample_grid();
        g.set_rows(rows(20));
        g.set_render_size(40, 5); // header + 4 data rows
        for _ in 0..9 {
            g.move_selection_down();
        }
        let theme = Theme::dark();
        let lines = g.grid_rows(&theme);
        assert_eq!(lines.len(), 5);
        // Last visible line is the selected row 9.
        assert_eq!(lines[4].spans[0].style, theme.grid_selected);
        assert!(lines[4].spans[0].content.contains("tx9"));
    }
}

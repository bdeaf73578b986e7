//! Area multi-select shown beside the contracts dashboard.

use std::collections::HashSet;

use ratatui::text::{Line, Span};

use crate::components::bars::fit_label;
use crate::themes::Theme;

/// Options, checked set and cursor of the area multi-select.
#[derive(Debug, Clone, Default)]
pub struct AreaPicker {
    options: Vec<String>,
    selected: HashSet<String>,
    cursor: usize,
}

impl AreaPicker {
    /// A picker over `options` with every option checked.
    pub fn new(options: Vec<String>) -> Self {
        let selected = options.iter().cloned().collect();
        Self {
            options,
            selected,
            cursor: 0,
        }
    }

    /// Replace the options after a reload. Checked options that still exist
    /// stay checked and new options start checked.
    pub fn set_options(&mut self, options: Vec<String>) {
        let previous: HashSet<String> = self.options.iter().cloned().collect();
        self.selected = options
            .iter()
            .filter(|o| self.selected.contains(*o) || !previous.contains(*o))
            .cloned()
            .collect();
        self.options = options;
        self.cursor = self.cursor.min(self.options.len().saturating_sub(1));
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn selected(&self) -> &HashSet<String> {
        &self.selected
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.cursor + 1 < self.options.len() {
            self.cursor += 1;
        }
    }

    /// Check or uncheck the option under the cursor.
    pub fn toggle(&mut self) {
        let Some(option) = self.options.get(self.cursor) else {
            return;
        };
        if !self.selected.remove(option) {
            self.selected.insert(option.clone());
        }
    }

    pub fn select_all(&mut self) {
        self.selected = self.options.iter().cloned().collect();
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// One line per option: `> [x] Logistica`.
    pub fn to_lines<'a>(&self, theme: &'a Theme, width: usize) -> Vec<Line<'a>> {
        let mut lines = vec![
            Line::from(Span::styled("Áreas", theme.bold)),
            Line::from(Span::styled(
                format!("{}/{} selecionadas", self.selected.len(), self.options.len()),
                theme.dim,
            )),
            Line::from(""),
        ];

        for (i, option) in self.options.iter().enumerate() {
            let checked = self.selected.contains(option);
            let mark = if checked { "[x] " } else { "[ ] " };
            let mark_style = if checked {
                theme.picker_checked
            } else {
                theme.picker_unchecked
            };
            let pointer = if i == self.cursor { "> " } else { "  " };
            let label = fit_label(option, width.saturating_sub(6));
            let label_style = if i == self.cursor {
                theme.picker_cursor
            } else {
                theme.text
            };
            lines.push(Line::from(vec![
                Span::styled(pointer, theme.info),
                Span::styled(mark, mark_style),
                Span::styled(label, label_style),
            ]));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "↑/↓ mover · espaço marcar",
            theme.dim,
        )));
        lines.push(Line::from(Span::styled("a todas · n nenhuma", theme.dim)));
        lines
    }
}

use contacta_core::formatting::{format_count, format_percent, percentage};
use contacta_core::models::ShiftCount;
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

use crate::themes::Theme;

/// Configuration controlling visual appearance of the horizontal bars.
pub struct BarConfig {
    /// Width in terminal columns of the longest bar.
    pub width: u16,
    /// Width the category label is padded to.
    pub label_width: usize,
    /// Character used for the filled portion of a bar.
    pub filled_char: char,
    /// Character used for the empty remainder of a bar.
    pub empty_char: char,
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            width: 40,
            label_width: 24,
            filled_char: '\u{2588}', // █  FULL BLOCK
            empty_char: '\u{2591}',  // ░  LIGHT SHADE
        }
    }
}

/// Pad or truncate `label` to exactly `width` display columns.
///
/// Accented Portuguese labels (`Manhã`, `seleção`) are measured by display
/// width, not bytes.
pub fn fit_label(label: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for ch in label.chars() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}

/// Columns of a bar for `value` scaled against `max`. Any non-zero value
/// gets at least one column.
fn scaled(value: u64, max: u64, width: u16) -> usize {
    if max == 0 || value == 0 {
        return 0;
    }
    let cols = ((value as f64 / max as f64) * width as f64).round() as usize;
    cols.max(1)
}

// ── CountBars ────────────────────────────────────────────────────────────────

/// One labelled horizontal bar per category, scaled to the largest value.
pub struct CountBars<'a> {
    /// `(label, value)` pairs in display order.
    pub rows: Vec<(String, u64)>,
    pub theme: &'a Theme,
    pub config: BarConfig,
}

impl<'a> CountBars<'a> {
    pub fn new(rows: Vec<(String, u64)>, theme: &'a Theme) -> Self {
        let label_width = rows
            .iter()
            .map(|(l, _)| UnicodeWidthStr::width(l.as_str()))
            .max()
            .unwrap_or(0)
            .min(BarConfig::default().label_width);
        Self {
            rows,
            theme,
            config: BarConfig {
                label_width,
                ..BarConfig::default()
            },
        }
    }

    /// Render one [`Line`] per row: padded label, bar, formatted count.
    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let max = self.rows.iter().map(|(_, v)| *v).max().unwrap_or(0);

        self.rows
            .iter()
            .map(|(label, value)| {
                let filled = scaled(*value, max, self.config.width);
                let bar: String = std::iter::repeat_n(self.config.filled_char, filled).collect();
                Line::from(vec![
                    Span::styled(
                        format!("{} ", fit_label(label, self.config.label_width)),
                        self.theme.label,
                    ),
                    Span::styled(bar, self.theme.bar),
                    Span::styled(format!(" {}", format_count(*value)), self.theme.value),
                ])
            })
            .collect()
    }
}

// ── ShiftBars ────────────────────────────────────────────────────────────────

/// Per-area bar split into shift-coloured segments, followed by a legend.
pub struct ShiftBars<'a> {
    pub rows: &'a [ShiftCount],
    pub theme: &'a Theme,
    pub config: BarConfig,
}

impl<'a> ShiftBars<'a> {
    pub fn new(rows: &'a [ShiftCount], theme: &'a Theme) -> Self {
        Self {
            rows,
            theme,
            config: BarConfig::default(),
        }
    }

    /// Render one stacked bar per area (areas in the input order) plus a
    /// trailing legend line listing each shift once.
    pub fn to_lines(&self) -> Vec<Line<'a>> {
        // Rows arrive sorted by (area, shift); collapse consecutive areas.
        let mut areas: Vec<(&str, Vec<&ShiftCount>)> = Vec::new();
        for row in self.rows {
            match areas.last_mut() {
                Some((area, segs)) if *area == row.area => segs.push(row),
                _ => areas.push((row.area.as_str(), vec![row])),
            }
        }

        let max = areas
            .iter()
            .map(|(_, segs)| segs.iter().map(|s| s.count as u64).sum::<u64>())
            .max()
            .unwrap_or(0);
        let label_width = areas
            .iter()
            .map(|(a, _)| UnicodeWidthStr::width(*a))
            .max()
            .unwrap_or(0)
            .min(self.config.label_width);

        let mut lines: Vec<Line<'a>> = Vec::with_capacity(areas.len() + 1);
        for (area, segs) in &areas {
            let total: u64 = segs.iter().map(|s| s.count as u64).sum();
            let mut spans = vec![Span::styled(
                format!("{} ", fit_label(area, label_width)),
                self.theme.label,
            )];
            for seg in segs {
                let cols = scaled(seg.count as u64, max, self.config.width);
                if cols > 0 {
                    spans.push(Span::styled(
                        std::iter::repeat_n(self.config.filled_char, cols).collect::<String>(),
                        self.theme.shift_style(&seg.shift),
                    ));
                }
            }
            spans.push(Span::styled(format!(" {}", format_count(total)), self.theme.value));
            lines.push(Line::from(spans));
        }

        let mut shifts: Vec<&str> = self.rows.iter().map(|r| r.shift.as_str()).collect();
        shifts.sort_unstable();
        shifts.dedup();
        if !shifts.is_empty() {
            let mut legend = vec![Span::styled("Turno: ", self.theme.dim)];
            for shift in shifts {
                legend.push(Span::styled("■ ", self.theme.shift_style(shift)));
                let name = if shift.is_empty() { "(vazio)" } else { shift };
                legend.push(Span::styled(format!("{name}  "), self.theme.label));
            }
            lines.push(Line::from(legend));
        }
        lines
    }
}

// ── ShareBars ────────────────────────────────────────────────────────────────

/// Each category's share of the total, as a percentage list with a small
/// proportional bar.
pub struct ShareBars<'a> {
    pub rows: Vec<(String, u64)>,
    pub theme: &'a Theme,
    pub config: BarConfig,
}

impl<'a> ShareBars<'a> {
    pub fn new(rows: Vec<(String, u64)>, theme: &'a Theme) -> Self {
        Self {
            rows,
            theme,
            config: BarConfig {
                width: 20,
                ..BarConfig::default()
            },
        }
    }

    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let total: u64 = self.rows.iter().map(|(_, v)| *v).sum();
        let label_width = self
            .rows
            .iter()
            .map(|(l, _)| UnicodeWidthStr::width(l.as_str()))
            .max()
            .unwrap_or(0)
            .min(self.config.label_width);

        self.rows
            .iter()
            .map(|(label, value)| {
                let pct = percentage(*value as f64, total as f64, 1);
                let filled = scaled(*value, total, self.config.width);
                let empty = (self.config.width as usize).saturating_sub(filled);
                Line::from(vec![
                    Span::styled(format!("{} ", fit_label(label, label_width)), self.theme.label),
                    Span::styled(
                        std::iter::repeat_n(self.config.filled_char, filled).collect::<String>(),
                        self.theme.warning,
                    ),
                    Span::styled(
                        std::iter::repeat_n(self.config.empty_char, empty).collect::<String>(),
                        self.theme.dim,
                    ),
                    Span::styled(
                        format!(" {:>6} ({})", format_percent(pct, 1), format_count(*value)),
                        self.theme.value,
                    ),
                ])
            })
            .collect()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

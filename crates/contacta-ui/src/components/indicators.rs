use contacta_core::error::LoadWarning;
use ratatui::text::{Line, Span};

use crate::themes::Theme;

// ── SectionTitle ─────────────────────────────────────────────────────────────

/// Bold chart title followed by a thin underline.
pub struct SectionTitle<'a> {
    pub title: String,
    pub theme: &'a Theme,
}

impl<'a> SectionTitle<'a> {
    pub fn new(title: impl Into<String>, theme: &'a Theme) -> Self {
        Self {
            title: title.into(),
            theme,
        }
    }

    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let underline = "─".repeat(self.title.chars().count());
        vec![
            Line::from(Span::styled(self.title.clone(), self.theme.bold)),
            Line::from(Span::styled(underline, self.theme.separator)),
        ]
    }
}

/// Dimmed line used in place of a chart that has nothing to draw.
pub fn empty_notice<'a>(message: &str, theme: &'a Theme) -> Line<'a> {
    Line::from(Span::styled(message.to_string(), theme.dim))
}

// ── WarningsNote ─────────────────────────────────────────────────────────────

/// Footer listing the non-fatal problems found while loading.
///
/// At most `limit` warnings are listed; the rest are summarised in a final
/// `+N avisos` line.
pub struct WarningsNote<'a> {
    pub warnings: &'a [LoadWarning],
    pub limit: usize,
    pub theme: &'a Theme,
}

impl<'a> WarningsNote<'a> {
    pub fn new(warnings: &'a [LoadWarning], theme: &'a Theme) -> Self {
        Self {
            warnings,
            limit: 3,
            theme,
        }
    }

    /// Empty when there is nothing to report.
    pub fn to_lines(&self) -> Vec<Line<'a>> {
        if self.warnings.is_empty() {
            return Vec::new();
        }

        let mut lines = vec![Line::from(Span::styled(
            format!("⚠ {} aviso(s) ao carregar os dados", self.warnings.len()),
            self.theme.warning,
        ))];
        for warning in self.warnings.iter().take(self.limit) {
            lines.push(Line::from(vec![
                Span::styled("  • ", self.theme.warning),
                Span::styled(warning.to_string(), self.theme.dim),
            ]));
        }
        let hidden = self.warnings.len().saturating_sub(self.limit);
        if hidden > 0 {
            lines.push(Line::from(Span::styled(
                format!("  +{hidden} avisos"),
                self.theme.dim,
            )));
        }
        lines
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn date_warning(line: u64) -> LoadWarning {
        LoadWarning::UnparseableDate {
            line,
            value: "31-02-2025".to_string(),
        }
    }

    #[test]
    fn test_section_title_underline_matches_length() {
        let theme = Theme::dark();
        let lines = SectionTitle::new("Assinaturas Pendentes por Área", &theme).to_lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(text(&lines[1]).chars().count(), 30);
    }

    #[test]
    fn test_warnings_note_empty() {
        let theme = Theme::dark();
        assert!(WarningsNote::new(&[], &theme).to_lines().is_empty());
    }

    #[test]
    fn test_warnings_note_lists_warnings() {
        let theme = Theme::dark();
        let warnings = vec![
            date_warning(4),
            LoadWarning::MissingColumn {
                column: "Turno".to_string(),
            },
        ];
        let lines = WarningsNote::new(&warnings, &theme).to_lines();

        assert_eq!(lines.len(), 3);
        assert!(text(&lines[0]).contains("2 aviso(s)"));
        assert!(text(&lines[1]).contains("line 4"));
        assert!(text(&lines[2]).contains("Turno"));
    }

    #[test]
    fn test_warnings_note_truncates() {
        let theme = Theme::dark();
        let warnings: Vec<LoadWarning> = (2..9).map(date_warning).collect();
        let lines = WarningsNote::new(&warnings, &theme).to_lines();

        assert_eq!(lines.len(), 5);
        assert_eq!(text(&lines[4]), "  +4 avisos");
    }

    #[test]
    fn test_empty_notice_is_dim() {
        let theme = Theme::dark();
        let line = empty_notice("Nenhuma assinatura pendente nas áreas selecionadas.", &theme);
        assert_eq!(line.spans[0].style, theme.dim);
    }
}

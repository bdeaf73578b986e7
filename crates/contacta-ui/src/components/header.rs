use crate::themes::Theme;
use ratatui::text::{Line, Span};

/// Decorative mark placed either side of the application title.
pub const ACCENT: &str = "✦ ✧";

/// Dashboard header rendering four lines:
///
/// 1. Application title (ALL CAPS).
/// 2. A 60-column `=` separator.
/// 3. Page tabs in `[ Dashboard Geral | Entrevistas ]` format, the active
///    page highlighted.
/// 4. An empty line.
pub struct Header<'a> {
    /// Page titles in tab order.
    pub pages: &'a [&'a str],
    /// Index of the active page.
    pub active: usize,
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(pages: &'a [&'a str], active: usize, theme: &'a Theme) -> Self {
        Self {
            pages,
            active,
            theme,
        }
    }

    /// Render the header as exactly four lines.
    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let separator = "=".repeat(60);

        let mut tabs = vec![Span::styled("[ ", self.theme.label)];
        for (i, page) in self.pages.iter().enumerate() {
            if i > 0 {
                tabs.push(Span::styled(" | ", self.theme.label));
            }
            let style = if i == self.active {
                self.theme.value
            } else {
                self.theme.dim
            };
            tabs.push(Span::styled(*page, style));
        }
        tabs.push(Span::styled(" ]", self.theme.label));
        tabs.push(Span::styled("  Tab: trocar página", self.theme.dim));

        vec![
            Line::from(vec![
                Span::styled(ACCENT, self.theme.header_accent),
                Span::styled(" DASHBOARDS CONTACTA ", self.theme.header),
                Span::styled(ACCENT, self.theme.header_accent),
            ]),
            Line::from(Span::styled(separator, self.theme.separator)),
            Line::from(tabs),
            Line::from(""),
        ]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

//! "Entrevistas" page: interviews per month, per week and the raw rows.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span, Text},
    widgets::Paragraph,
    Frame,
};

use contacta_runtime::dashboard::InterviewsSnapshot;

use crate::components::bars::CountBars;
use crate::components::indicators::{empty_notice, SectionTitle, WarningsNote};
use crate::table_view;
use crate::themes::Theme;

pub const NO_MONTH_COLUMN_MESSAGE: &str =
    "A planilha não tem a coluna 'Mês'. Gráfico por mês não será exibido.";
pub const NO_INTERVIEWS_MESSAGE: &str = "Nenhuma entrevista registrada.";

/// Month and week charts as text lines.
pub fn chart_lines<'a>(snapshot: &'a InterviewsSnapshot, theme: &'a Theme) -> Vec<Line<'a>> {
    let mut lines = Vec::new();

    lines.extend(SectionTitle::new("Entrevistas por Mês", theme).to_lines());
    match &snapshot.by_month {
        None => lines.push(Line::from(Span::styled(
            NO_MONTH_COLUMN_MESSAGE,
            theme.warning,
        ))),
        Some(months) if months.is_empty() => {
            lines.push(empty_notice(NO_INTERVIEWS_MESSAGE, theme));
        }
        Some(months) => {
            let rows = months.iter().map(|(m, n)| (m.clone(), *n)).collect();
            lines.extend(CountBars::new(rows, theme).to_lines());
        }
    }
    lines.push(Line::from(""));

    lines.extend(SectionTitle::new("Entrevistas por Semana", theme).to_lines());
    if snapshot.by_week.is_empty() {
        lines.push(empty_notice(NO_INTERVIEWS_MESSAGE, theme));
    } else {
        lines.extend(CountBars::new(snapshot.by_week.clone(), theme).to_lines());
    }

    lines
}

/// Render the whole page into `area`.
pub fn render_interviews_view(
    frame: &mut Frame,
    area: Rect,
    snapshot: &InterviewsSnapshot,
    theme: &Theme,
) {
    let charts = chart_lines(snapshot, theme);
    let footer = WarningsNote::new(&snapshot.warnings, theme).to_lines();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(charts.len() as u16),
            Constraint::Min(4),
            Constraint::Length(footer.len() as u16),
        ])
        .split(area);

    frame.render_widget(Paragraph::new(Text::from(charts)), rows[0]);

    let table = &snapshot.table;
    if table.is_empty() {
        table_view::render_no_rows(frame, rows[1], "Dados Detalhados", theme);
    } else {
        let cells: Vec<Vec<String>> = table.records.iter().map(|r| r.fields.clone()).collect();
        table_view::render_detail_table(
            frame,
            rows[1],
            "Dados Detalhados",
            &table.headers,
            &cells,
            theme,
        );
    }

    frame.render_widget(Paragraph::new(Text::from(footer)), rows[2]);
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use contacta_core::error::LoadWarning;
    use contacta_core::models::{InterviewRecord, InterviewTable, WEEK_LABELS};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn snapshot() -> InterviewsSnapshot {
        let weeks = [5, 3, 0, 2, 1];
        InterviewsSnapshot {
            table: InterviewTable {
                headers: vec!["Mês".into(), "Total".into()],
                records: vec![InterviewRecord {
                    month: Some("Janeiro".into()),
                    total: 11,
                    weeks,
                    line: 2,
                    fields: vec!["Janeiro".into(), "11".into()],
                }],
                has_month_column: true,
            },
            by_month: Some(BTreeMap::from([("Janeiro".to_string(), 11)])),
            by_week: WEEK_LABELS
                .iter()
                .zip(weeks)
                .map(|(l, n)| (l.to_string(), n))
                .collect(),
            warnings: Vec::new(),
        }
    }

    fn all_text(lines: &[Line]) -> String {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_chart_lines_month_and_week() {
        let theme = Theme::dark();
        let snap = snapshot();
        let lines = chart_lines(&snap, &theme);
        let text = all_text(&lines);

        assert!(text.contains("Janeiro"));
        assert!(text.contains("1° Semana"));
        assert!(text.contains("5° Semana"));
        // Title, underline, one month, blank, title, underline, five weeks.
        assert_eq!(lines.len(), 11);
    }

    #[test]
    fn test_chart_lines_without_month_column() {
        let theme = Theme::dark();
        let snap = InterviewsSnapshot {
            by_month: None,
            warnings: vec![LoadWarning::MissingColumn {
                column: "Mês".into(),
            }],
            ..snapshot()
        };
        let lines = chart_lines(&snap, &theme);
        let text = all_text(&lines);

        assert!(text.contains(NO_MONTH_COLUMN_MESSAGE));
        assert!(text.contains("3° Semana"));
        assert_eq!(lines[2].spans[0].style, theme.warning);
    }

    #[test]
    fn test_chart_lines_empty_table() {
        let theme = Theme::dark();
        let snap = InterviewsSnapshot {
            table: InterviewTable::default(),
            by_month: Some(BTreeMap::new()),
            by_week: Vec::new(),
            warnings: Vec::new(),
        };
        let text = all_text(&chart_lines(&snap, &theme));
        assert_eq!(text.matches(NO_INTERVIEWS_MESSAGE).count(), 2);
    }

    #[test]
    fn test_render_interviews_view() {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        let snap = snapshot();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_interviews_view(frame, area, &snap, &theme);
            })
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Entrevistas por Semana"));
        assert!(text.contains("TOTAL"));
    }
}

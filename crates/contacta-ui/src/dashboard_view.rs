//! "Dashboard Geral" page: area picker, contract charts and detail table.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Text},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use contacta_core::models::month_name;
use contacta_runtime::dashboard::ContractsSnapshot;
use contacta_runtime::data::aggregator::ranked;

use crate::components::area_picker::AreaPicker;
use crate::components::bars::{CountBars, ShareBars, ShiftBars};
use crate::components::indicators::{empty_notice, SectionTitle, WarningsNote};
use crate::table_view;
use crate::themes::Theme;

/// Width of the area picker column.
const PICKER_WIDTH: u16 = 34;

/// Title of the closing-contracts chart, e.g. `Contratos encerrando em Dez/2025 por Área`.
pub fn closing_title(month: u32, year: i32) -> String {
    let abbr: String = month_name(month)
        .map(|n| n.chars().take(3).collect())
        .unwrap_or_else(|| month.to_string());
    format!("Contratos encerrando em {abbr}/{year} por Área")
}

/// Message shown instead of the closing-contracts chart.
pub fn no_closing_message(month: u32, year: i32) -> String {
    let name = month_name(month)
        .map(str::to_string)
        .unwrap_or_else(|| month.to_string());
    format!("Nenhum contrato encerrando em {name} de {year} nas áreas selecionadas.")
}

pub const NO_PENDING_MESSAGE: &str = "Nenhuma assinatura pendente nas áreas selecionadas.";
pub const NO_CONTRACTS_MESSAGE: &str =
    "Não há dados sobre estagiários ou contratos nas áreas selecionadas.";

/// The three chart sections as text lines.
pub fn chart_lines<'a>(snapshot: &'a ContractsSnapshot, theme: &'a Theme) -> Vec<Line<'a>> {
    let mut lines = Vec::new();

    lines.extend(SectionTitle::new(closing_title(snapshot.month, snapshot.year), theme).to_lines());
    // The year chart only makes sense when something closes in the month.
    if snapshot.closing_in_month.is_empty() {
        lines.push(empty_notice(
            &no_closing_message(snapshot.month, snapshot.year),
            theme,
        ));
    } else {
        lines.extend(ShiftBars::new(&snapshot.by_shift, theme).to_lines());
    }
    lines.push(Line::from(""));

    lines.extend(SectionTitle::new("Assinaturas Pendentes por Área", theme).to_lines());
    if snapshot.pending.is_empty() {
        lines.push(empty_notice(NO_PENDING_MESSAGE, theme));
    } else {
        let rows = snapshot
            .pending
            .iter()
            .map(|(area, n)| (area.clone(), *n as u64))
            .collect();
        lines.extend(ShareBars::new(rows, theme).to_lines());
    }
    lines.push(Line::from(""));

    lines.extend(SectionTitle::new("Setores com Mais Contratos Ativos", theme).to_lines());
    if snapshot.per_area.is_empty() {
        lines.push(empty_notice(NO_CONTRACTS_MESSAGE, theme));
    } else {
        let rows = ranked(&snapshot.per_area)
            .into_iter()
            .map(|(area, n)| (area, n as u64))
            .collect();
        lines.extend(CountBars::new(rows, theme).to_lines());
    }

    lines
}

/// Render the whole page into `area`.
pub fn render_dashboard_view(
    frame: &mut Frame,
    area: Rect,
    snapshot: &ContractsSnapshot,
    picker: &AreaPicker,
    theme: &Theme,
) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(PICKER_WIDTH), Constraint::Min(0)])
        .split(area);

    let picker_lines = picker.to_lines(theme, PICKER_WIDTH.saturating_sub(2) as usize);
    frame.render_widget(
        Paragraph::new(Text::from(picker_lines))
            .block(Block::default().borders(Borders::ALL).border_style(theme.table_border)),
        columns[0],
    );

    let charts = chart_lines(snapshot, theme);
    let footer = WarningsNote::new(&snapshot.warnings, theme).to_lines();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(charts.len() as u16),
            Constraint::Min(4),
            Constraint::Length(footer.len() as u16),
        ])
        .split(columns[1]);

    frame.render_widget(Paragraph::new(Text::from(charts)), rows[0]);

    let table = &snapshot.filtered;
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
    use contacta_core::models::{ContractRecord, ContractTable, Regularized, ShiftCount};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn snapshot() -> ContractsSnapshot {
        let record = ContractRecord {
            area: "Assistente Comercial".to_string(),
            end_date: chrono::NaiveDate::from_ymd_opt(2025, 12, 5),
            shift: "Manhã".to_string(),
            regularized: Regularized::No,
            line: 2,
            fields: vec!["Ana".into(), "Assistente Comercial".into(), "05/12/2025".into()],
        };
        ContractsSnapshot {
            areas: vec!["Assistente Comercial".to_string(), "Logistica".to_string()],
            filtered: ContractTable {
                headers: vec!["Nome".into(), "Area".into(), "Data_Fim".into()],
                records: vec![record],
            },
            closing_in_month: BTreeMap::from([("Assistente Comercial".to_string(), 1)]),
            by_shift: vec![ShiftCount {
                area: "Assistente Comercial".to_string(),
                shift: "Manhã".to_string(),
                count: 1,
            }],
            pending: BTreeMap::from([("Assistente Comercial".to_string(), 1)]),
            per_area: BTreeMap::from([("Assistente Comercial".to_string(), 1)]),
            year: 2025,
            month: 12,
            warnings: vec![LoadWarning::UnparseableDate {
                line: 4,
                value: "31-02-2025".to_string(),
            }],
        }
    }

    fn empty_snapshot() -> ContractsSnapshot {
        ContractsSnapshot {
            filtered: ContractTable::default(),
            closing_in_month: BTreeMap::new(),
            by_shift: Vec::new(),
            pending: BTreeMap::new(),
            per_area: BTreeMap::new(),
            warnings: Vec::new(),
            ..snapshot()
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
    fn test_closing_title_and_message() {
        assert_eq!(closing_title(12, 2025), "Contratos encerrando em Dez/2025 por Área");
        assert_eq!(
            no_closing_message(12, 2025),
            "Nenhum contrato encerrando em Dezembro de 2025 nas áreas selecionadas."
        );
        assert_eq!(closing_title(3, 2026), "Contratos encerrando em Mar/2026 por Área");
    }

    #[test]
    fn test_chart_lines_with_data() {
        let theme = Theme::dark();
        let snap = snapshot();
        let text = all_text(&chart_lines(&snap, &theme));

        assert!(text.contains("Dez/2025"));
        assert!(text.contains("Turno: "));
        assert!(text.contains("100,0%"));
        assert!(text.contains("Setores com Mais Contratos Ativos"));
        assert!(!text.contains("Nenhum"));
    }

    #[test]
    fn test_chart_lines_empty_selection_shows_messages() {
        let theme = Theme::dark();
        let snap = empty_snapshot();
        let text = all_text(&chart_lines(&snap, &theme));

        assert!(text.contains("Nenhum contrato encerrando em Dezembro de 2025"));
        assert!(text.contains(NO_PENDING_MESSAGE));
        assert!(text.contains(NO_CONTRACTS_MESSAGE));
    }

    #[test]
    fn test_year_chart_hidden_without_closing_contracts() {
        let theme = Theme::dark();
        let snap = ContractsSnapshot {
            closing_in_month: BTreeMap::new(),
            ..snapshot()
        };
        let text = all_text(&chart_lines(&snap, &theme));
        assert!(!text.contains("Turno: "));
        assert!(text.contains("Nenhum contrato encerrando"));
    }

    #[test]
    fn test_render_dashboard_view() {
        let backend = TestBackend::new(140, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        let snap = snapshot();
        let picker = AreaPicker::new(snap.areas.clone());

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_dashboard_view(frame, area, &snap, &picker, &theme);
            })
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("[x] Logistica"));
        assert!(text.contains("Dados Detalhados"));
        assert!(text.contains("aviso(s)"));
    }

    #[test]
    fn test_render_dashboard_view_small_terminal_does_not_panic() {
        let backend = TestBackend::new(40, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::classic();
        let snap = empty_snapshot();
        let picker = AreaPicker::new(Vec::new());

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_dashboard_view(frame, area, &snap, &picker, &theme);
            })
            .unwrap();
    }
}

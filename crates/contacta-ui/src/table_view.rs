//! Detail table ("Dados Detalhados") for both dashboard pages.
//!
//! Renders a bordered [`ratatui::widgets::Table`] with the file's own columns
//! plus a highlighted totals row at the bottom.

use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use contacta_core::formatting::format_count;

use crate::themes::Theme;

/// Widest a detail column may grow, in terminal columns.
const MAX_COLUMN_WIDTH: usize = 28;

/// Display width of each column: the widest of header and cells, capped.
pub fn column_widths(headers: &[String], rows: &[Vec<String>]) -> Vec<u16> {
    headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let widest_cell = rows
                .iter()
                .filter_map(|r| r.get(i))
                .map(|c| UnicodeWidthStr::width(c.as_str()))
                .max()
                .unwrap_or(0);
            UnicodeWidthStr::width(h.as_str())
                .max(widest_cell)
                .clamp(1, MAX_COLUMN_WIDTH) as u16
        })
        .collect()
}

/// Render `rows` under `headers` into `area`, with a `TOTAL` row counting them.
pub fn render_detail_table(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    headers: &[String],
    rows: &[Vec<String>],
    theme: &Theme,
) {
    let header = Row::new(
        headers
            .iter()
            .map(|h| Cell::from(h.clone()).style(theme.table_header)),
    )
    .height(1);

    let mut all_rows: Vec<Row> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            Row::new(row.iter().map(|c| Cell::from(c.clone()))).style(theme.row_style(i))
        })
        .collect();

    let mut total_cells = vec![Cell::from("TOTAL").style(theme.table_total)];
    if headers.len() > 1 {
        total_cells.push(Cell::from(format!("{} linhas", format_count(rows.len() as u64))));
    }
    all_rows.push(Row::new(total_cells).style(theme.table_total));

    let widths: Vec<Constraint> = column_widths(headers, rows)
        .into_iter()
        .map(Constraint::Length)
        .collect();

    let table = Table::new(all_rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(format!(" {} ", title)),
        )
        .style(theme.text);

    frame.render_widget(table, area);
}

/// Render a "no data" placeholder when the selection leaves no rows.
pub fn render_no_rows(frame: &mut Frame, area: Rect, title: &str, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Nenhuma linha para as áreas selecionadas.",
            theme.warning,
        )),
        Line::from(Span::styled("Use 'a' para selecionar todas as áreas.", theme.dim)),
    ];
    frame.render_widget(
        Paragraph::new(ratatui::text::Text::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", title)),
        ),
        area,
    );
}

// ── Tests ──────────────────────────────────────────────────────────────────────

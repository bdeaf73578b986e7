//! Plain-text report (`--view report`).
//!
//! Prints the same aggregates as the TUI pages for every area, so the
//! dashboard can be used from scripts and cron jobs.

use std::collections::HashSet;

use chrono::NaiveDate;
use unicode_width::UnicodeWidthStr;

use contacta_core::error::Result;
use contacta_core::formatting::{format_count, format_percent, percentage};
use contacta_runtime::dashboard::{ContractsSnapshot, DashboardSession, InterviewsSnapshot};
use contacta_runtime::data::aggregator::ranked;
use contacta_ui::components::bars::fit_label;
use contacta_ui::dashboard_view::{
    closing_title, no_closing_message, NO_CONTRACTS_MESSAGE, NO_PENDING_MESSAGE,
};
use contacta_ui::interviews_view::{NO_INTERVIEWS_MESSAGE, NO_MONTH_COLUMN_MESSAGE};

/// Load both datasets through `session` and format the report.
pub fn build_report(session: &mut DashboardSession, generated: NaiveDate) -> Result<String> {
    let all: HashSet<String> = session.available_areas()?.into_iter().collect();
    let contracts = session.contracts_snapshot(&all)?;
    let interviews = session.interviews_snapshot()?;
    Ok(format_report(&contracts, &interviews, generated))
}

/// Format already-built snapshots.
pub fn format_report(
    contracts: &ContractsSnapshot,
    interviews: &InterviewsSnapshot,
    generated: NaiveDate,
) -> String {
    let mut out: Vec<String> = vec![
        "DASHBOARDS CONTACTA".to_string(),
        "=".repeat(60),
        format!(
            "Gerado em {} · {} contrato(s) · {} área(s)",
            generated.format("%d/%m/%Y"),
            format_count(contracts.filtered.len() as u64),
            contracts.areas.len()
        ),
        String::new(),
    ];

    section(&mut out, &closing_title(contracts.month, contracts.year));
    if contracts.closing_in_month.is_empty() {
        out.push(no_closing_message(contracts.month, contracts.year));
    } else {
        let rows: Vec<(String, String)> = contracts
            .closing_in_month
            .iter()
            .map(|(area, n)| (area.clone(), format_count(*n as u64)))
            .collect();
        push_rows(&mut out, &rows);

        out.push(String::new());
        out.push(format!("Por turno ({}):", contracts.year));
        let rows: Vec<(String, String)> = contracts
            .by_shift
            .iter()
            .map(|r| {
                (
                    format!("{} / {}", r.area, r.shift),
                    format_count(r.count as u64),
                )
            })
            .collect();
        push_rows(&mut out, &rows);
    }

    section(&mut out, "Assinaturas Pendentes por Área");
    if contracts.pending.is_empty() {
        out.push(NO_PENDING_MESSAGE.to_string());
    } else {
        let total: usize = contracts.pending.values().sum();
        let rows: Vec<(String, String)> = contracts
            .pending
            .iter()
            .map(|(area, n)| {
                let pct = percentage(*n as f64, total as f64, 1);
                (
                    area.clone(),
                    format!("{} ({})", format_count(*n as u64), format_percent(pct, 1)),
                )
            })
            .collect();
        push_rows(&mut out, &rows);
    }

    section(&mut out, "Setores com Mais Contratos Ativos");
    if contracts.per_area.is_empty() {
        out.push(NO_CONTRACTS_MESSAGE.to_string());
    } else {
        let rows: Vec<(String, String)> = ranked(&contracts.per_area)
            .into_iter()
            .map(|(area, n)| (area, format_count(n as u64)))
            .collect();
        push_rows(&mut out, &rows);
    }

    section(&mut out, "Entrevistas por Mês");
    match &interviews.by_month {
        None => out.push(NO_MONTH_COLUMN_MESSAGE.to_string()),
        Some(months) if months.is_empty() => out.push(NO_INTERVIEWS_MESSAGE.to_string()),
        Some(months) => {
            let rows: Vec<(String, String)> = months
                .iter()
                .map(|(m, n)| (m.clone(), format_count(*n)))
                .collect();
            push_rows(&mut out, &rows);
        }
    }

    section(&mut out, "Entrevistas por Semana");
    if interviews.by_week.is_empty() {
        out.push(NO_INTERVIEWS_MESSAGE.to_string());
    } else {
        let rows: Vec<(String, String)> = interviews
            .by_week
            .iter()
            .map(|(w, n)| (w.clone(), format_count(*n)))
            .collect();
        push_rows(&mut out, &rows);
    }

    let warnings: Vec<String> = contracts
        .warnings
        .iter()
        .map(|w| format!("contratos: {w}"))
        .chain(interviews.warnings.iter().map(|w| format!("entrevistas: {w}")))
        .collect();
    if !warnings.is_empty() {
        section(&mut out, "Avisos");
        out.extend(warnings.into_iter().map(|w| format!("- {w}")));
    }

    out.push(String::new());
    out.join("\n")
}

fn section(out: &mut Vec<String>, title: &str) {
    if out.last().is_some_and(|l| !l.is_empty()) {
        out.push(String::new());
    }
    out.push(title.to_string());
    out.push("-".repeat(UnicodeWidthStr::width(title)));
}

/// Two aligned columns: labels padded to the widest label, values right-aligned.
fn push_rows(out: &mut Vec<String>, rows: &[(String, String)]) {
    let label_width = rows
        .iter()
        .map(|(l, _)| UnicodeWidthStr::width(l.as_str()))
        .max()
        .unwrap_or(0);
    let value_width = rows
        .iter()
        .map(|(_, v)| UnicodeWidthStr::width(v.as_str()))
        .max()
        .unwrap_or(0);

    for (label, value) in rows {
        out.push(format!(
            "  {}  {:>value_width$}",
            fit_label(label, label_width),
            value
        ));
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    use contacta_core::area_labels::AreaLabels;
    use contacta_runtime::dashboard::SessionConfig;
    use tempfile::TempDir;

    const CONTRACTS: &str = "Nome;Area;Data_Fim;Turno;Regularizado\n\
                             Ana;AC;05/12/2025;Manhã;NÃO\n\
                             Bruno;LG;01/11/2025;Tarde;SIM\n\
                             Carla;LG;31-02-2025;Integral;SIM\n";

    const INTERVIEWS: &str = "Mês;Total;1° Semana;2° Semana;3° Semana;4° Semana;5° Semana\n\
                              Janeiro;11;5;3;0;2;1\n";

    fn session(dir: &Path, interviews: &str) -> DashboardSession {
        let contracts_path = dir.join("dadoslimpos.csv");
        let interviews_path = dir.join("entrevistas_total.csv");
        std::fs::write(&contracts_path, CONTRACTS).unwrap();
        std::fs::write(&interviews_path, interviews).unwrap();
        DashboardSession::new(SessionConfig {
            contracts_path,
            interviews_path,
            delimiter: b';',
            labels: AreaLabels::default(),
            year: 2025,
            month: 12,
        })
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, 1).unwrap()
    }

    #[test]
    fn test_report_sections() {
        let dir = TempDir::new().unwrap();
        let report = build_report(&mut session(dir.path(), INTERVIEWS), today()).unwrap();

        assert!(report.starts_with("DASHBOARDS CONTACTA\n"));
        assert!(report.contains("Gerado em 01/12/2025 · 3 contrato(s) · 2 área(s)"));
        assert!(report.contains("Contratos encerrando em Dez/2025 por Área"));
        assert!(report.contains("Assistente Comercial / Manhã"));
        assert!(report.contains("1 (100,0%)"));
        assert!(report.contains("1° Semana"));
        assert!(report.contains("contratos: line 4: unparseable date \"31-02-2025\""));
    }

    #[test]
    fn test_report_ranks_areas() {
        let dir = TempDir::new().unwrap();
        let report = build_report(&mut session(dir.path(), INTERVIEWS), today()).unwrap();

        let section = report
            .split("Setores com Mais Contratos Ativos")
            .nth(1)
            .unwrap();
        let logistica = section.find("Logistica").unwrap();
        let comercial = section.find("Assistente Comercial").unwrap();
        assert!(logistica < comercial);
    }

    #[test]
    fn test_report_without_month_column() {
        let dir = TempDir::new().unwrap();
        let interviews = "Total;1° Semana;2° Semana;3° Semana;4° Semana;5° Semana\n4;1;1;1;1;0\n";
        let report = build_report(&mut session(dir.path(), interviews), today()).unwrap();

        assert!(report.contains(NO_MONTH_COLUMN_MESSAGE));
        assert!(report.contains("entrevistas: column 'Mês' not found"));
    }

    #[test]
    fn test_report_missing_file_is_error() {
        let dir = TempDir::new().unwrap();
        let mut s = session(dir.path(), INTERVIEWS);
        std::fs::remove_file(dir.path().join("entrevistas_total.csv")).unwrap();
        assert!(build_report(&mut s, today()).is_err());
    }

    #[test]
    fn test_push_rows_aligns_accented_labels() {
        let mut out = Vec::new();
        push_rows(
            &mut out,
            &[
                ("Recrutamento e seleção".to_string(), "1".to_string()),
                ("Logistica".to_string(), "12".to_string()),
            ],
        );
        assert_eq!(out[0], "  Recrutamento e seleção   1");
        assert_eq!(out[1], "  Logistica               12");
    }
}

//! Delimited-file reading and contracts loading.
//!
//! [`read_delimited`] is the single place that touches the disk; both dataset
//! loaders build their typed tables from the [`RawTable`] it returns.

use std::path::Path;

use contacta_core::area_labels::AreaLabels;
use contacta_core::dates::parse_day_first;
use contacta_core::error::{DashboardError, LoadWarning, Result};
use contacta_core::models::{
    ContractRecord, ContractTable, Loaded, Regularized, AREA_COLUMN, END_DATE_COLUMN,
    REGULARIZED_COLUMN, SHIFT_COLUMN,
};
use tracing::{debug, warn};

// ── RawTable ──────────────────────────────────────────────────────────────────

/// One data row as read from disk, cells trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// 1-based line number of the row.
    pub line: u64,
    pub cells: Vec<String>,
}

/// Header plus data rows of a delimited file, before any typing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl RawTable {
    /// Position of the column named `name`, if present.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Read the whole file at `path` and split it on `delimiter`.
///
/// Fails with [`DashboardError::FileRead`] when the file cannot be read and
/// with [`DashboardError::Parse`] when rows disagree on their field count or
/// the bytes are not UTF-8. Rows whose cells are all blank are dropped.
pub fn read_delimited(path: &Path, delimiter: u8) -> Result<RawTable> {
    let bytes = std::fs::read(path).map_err(|source| DashboardError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(false)
        .trim(csv::Trim::All)
        .from_reader(bytes.as_slice());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| parse_error(path, &e))?
        .iter()
        .map(clean_header)
        .collect();

    let mut rows = Vec::new();
    let mut blank_rows = 0usize;
    for result in reader.records() {
        let record = result.map_err(|e| parse_error(path, &e))?;
        if record.iter().all(str::is_empty) {
            blank_rows += 1;
            continue;
        }
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        rows.push(RawRow {
            line,
            cells: record.iter().map(str::to_string).collect(),
        });
    }

    debug!(
        "Read {} rows ({} blank skipped, {} columns) from {}",
        rows.len(),
        blank_rows,
        headers.len(),
        path.display()
    );

    Ok(RawTable { headers, rows })
}

/// Load the contracts dataset.
///
/// The `Area` column is required. `Data_Fim`, `Turno` and `Regularizado`
/// are optional: when absent a [`LoadWarning::MissingColumn`] is recorded and
/// the field takes its empty value. Area codes are replaced through `labels`.
pub fn load_contracts(
    path: &Path,
    delimiter: u8,
    labels: &AreaLabels,
) -> Result<Loaded<ContractTable>> {
    let raw = read_delimited(path, delimiter)?;
    let loaded = contracts_from_raw(raw, labels).map_err(|column| {
        DashboardError::MissingColumn {
            path: path.to_path_buf(),
            column,
        }
    })?;

    if !loaded.warnings.is_empty() {
        warn!(
            "{} warning(s) while loading {}",
            loaded.warnings.len(),
            path.display()
        );
    }
    Ok(loaded)
}

/// Build a [`ContractTable`] from an already-read file.
///
/// Returns the name of the missing required column on failure.
pub fn contracts_from_raw(
    raw: RawTable,
    labels: &AreaLabels,
) -> std::result::Result<Loaded<ContractTable>, String> {
    let area_idx = raw
        .column(AREA_COLUMN)
        .ok_or_else(|| AREA_COLUMN.to_string())?;

    let mut warnings = Vec::new();
    let mut optional = |name: &str| {
        let idx = raw.column(name);
        if idx.is_none() {
            warnings.push(LoadWarning::MissingColumn {
                column: name.to_string(),
            });
        }
        idx
    };
    let date_idx = optional(END_DATE_COLUMN);
    let shift_idx = optional(SHIFT_COLUMN);
    let regularized_idx = optional(REGULARIZED_COLUMN);

    let mut records = Vec::with_capacity(raw.rows.len());
    for RawRow { line, mut cells } in raw.rows {
        let cell = |idx: Option<usize>| idx.map(|i| cells[i].clone()).unwrap_or_default();

        let area = labels.normalize(&cells[area_idx]);

        let date_cell = cell(date_idx);
        let end_date = parse_day_first(&date_cell);
        if end_date.is_none() && !date_cell.is_empty() {
            debug!(line, value = %date_cell, "unparseable end date");
            warnings.push(LoadWarning::UnparseableDate {
                line,
                value: date_cell,
            });
        }

        let shift = cell(shift_idx);
        let regularized = Regularized::parse(&cell(regularized_idx));

        cells[area_idx] = area.clone();
        records.push(ContractRecord {
            area,
            end_date,
            shift,
            regularized,
            line,
            fields: cells,
        });
    }

    Ok(Loaded::new(
        ContractTable {
            headers: raw.headers,
            records,
        },
        warnings,
    ))
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Trim a header cell, dropping a UTF-8 byte-order mark left by spreadsheet
/// exports.
fn clean_header(h: &str) -> String {
    h.trim_start_matches('\u{feff}').trim().to_string()
}

fn parse_error(path: &Path, err: &csv::Error) -> DashboardError {
    let line = err.position().map(|p| p.line());
    let message = match err.kind() {
        csv::ErrorKind::UnequalLengths {
            expected_len, len, ..
        } => format!("expected {expected_len} fields, found {len}"),
        csv::ErrorKind::Utf8 { .. } => "file is not valid UTF-8".to_string(),
        _ => err.to_string(),
    };
    DashboardError::Parse {
        path: path.to_path_buf(),
        line,
        message,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::path::PathBuf;
    use tempfile::TempDir;

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    const CONTRACTS: &str = "\
Nome;Area;Data_Fim;Turno;Regularizado
Ana;AC;05/12/2025;Manhã;NÃO
Bruno;LG;01/11/2025;Tarde;SIM
Carla;XX;31-02-2025;Integral;SIM
Davi;RS;;Manhã;NÃO
";

    fn load(content: &str) -> Result<Loaded<ContractTable>> {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), "contratos.csv", content);
        load_contracts(&path, b';', &AreaLabels::default())
    }

    // ── read_delimited ────────────────────────────────────────────────────────

    #[test]
    fn test_read_delimited_headers_and_rows() {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), "a.csv", "A;B\n1;2\n3;4\n");

        let raw = read_delimited(&path, b';').unwrap();
        assert_eq!(raw.headers, vec!["A", "B"]);
        assert_eq!(raw.rows.len(), 2);
        assert_eq!(raw.rows[0].cells, vec!["1", "2"]);
        assert_eq!(raw.rows[0].line, 2);
        assert_eq!(raw.rows[1].line, 3);
    }

    #[test]
    fn test_read_delimited_trims_cells_and_bom() {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), "a.csv", "\u{feff}Area ; Turno\n AC ; Tarde \n");

        let raw = read_delimited(&path, b';').unwrap();
        assert_eq!(raw.headers, vec!["Area", "Turno"]);
        assert_eq!(raw.rows[0].cells, vec!["AC", "Tarde"]);
        assert_eq!(raw.column("Turno"), Some(1));
    }

    #[test]
    fn test_read_delimited_skips_blank_rows() {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), "a.csv", "A;B\n1;2\n;\n3;4\n");

        let raw = read_delimited(&path, b';').unwrap();
        assert_eq!(raw.rows.len(), 2);
    }

    #[test]
    fn test_read_delimited_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = read_delimited(&dir.path().join("nope.csv"), b';').unwrap_err();
        assert!(matches!(err, DashboardError::FileRead { .. }));
    }

    #[test]
    fn test_read_delimited_unequal_lengths_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), "a.csv", "A;B\n1;2\n3;4;5\n");

        let err = read_delimited(&path, b';').unwrap_err();
        match err {
            DashboardError::Parse { line, message, .. } => {
                assert_eq!(line, Some(3));
                assert!(message.contains("expected 2 fields"), "{message}");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_read_delimited_wrong_delimiter_sees_single_column() {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), "a.csv", "A;B\n1;2\n");

        let raw = read_delimited(&path, b',').unwrap();
        assert_eq!(raw.headers, vec!["A;B"]);
    }

    // ── load_contracts ────────────────────────────────────────────────────────

    #[test]
    fn test_load_contracts_basic() {
        let loaded = load(CONTRACTS).unwrap();
        let table = &loaded.table;

        assert_eq!(table.len(), 4);
        assert_eq!(table.headers[1], "Area");
        assert_eq!(table.records[0].area, "Assistente Comercial");
        assert_eq!(
            table.records[0].end_date,
            NaiveDate::from_ymd_opt(2025, 12, 5)
        );
        assert_eq!(table.records[0].shift, "Manhã");
        assert_eq!(table.records[0].regularized, Regularized::No);
        assert_eq!(table.records[1].area, "Logistica");
        assert_eq!(table.records[1].regularized, Regularized::Yes);
    }

    #[test]
    fn test_load_contracts_area_cell_replaced_in_fields() {
        let loaded = load(CONTRACTS).unwrap();
        let first = &loaded.table.records[0];
        assert_eq!(first.fields[1], "Assistente Comercial");
        assert_eq!(first.fields[0], "Ana");
    }

    #[test]
    fn test_load_contracts_unmapped_code_passes_through() {
        let loaded = load(CONTRACTS).unwrap();
        assert_eq!(loaded.table.records[2].area, "XX");
    }

    #[test]
    fn test_load_contracts_bad_date_is_missing_with_warning() {
        let loaded = load(CONTRACTS).unwrap();
        assert_eq!(loaded.table.records[2].end_date, None);
        assert_eq!(
            loaded.warnings,
            vec![LoadWarning::UnparseableDate {
                line: 4,
                value: "31-02-2025".to_string()
            }]
        );
    }

    #[test]
    fn test_load_contracts_empty_date_is_missing_without_warning() {
        let loaded = load(CONTRACTS).unwrap();
        let davi = &loaded.table.records[3];
        assert_eq!(davi.end_date, None);
        assert!(!loaded
            .warnings
            .iter()
            .any(|w| matches!(w, LoadWarning::UnparseableDate { line: 5, .. })));
    }

    #[test]
    fn test_load_contracts_preserves_row_order() {
        let loaded = load(CONTRACTS).unwrap();
        let lines: Vec<u64> = loaded.table.records.iter().map(|r| r.line).collect();
        assert_eq!(lines, vec![2, 3, 4, 5]);
    }

    #[test]
    fn test_load_contracts_missing_area_is_fatal() {
        let err = load("Nome;Turno\nAna;Manhã\n").unwrap_err();
        match err {
            DashboardError::MissingColumn { column, .. } => assert_eq!(column, "Area"),
            other => panic!("expected missing column, got {other:?}"),
        }
    }

    #[test]
    fn test_load_contracts_missing_optional_columns_warn() {
        let loaded = load("Area\nAC\nLG\n").unwrap();
        assert_eq!(loaded.table.len(), 2);
        assert!(loaded.table.records[0].end_date.is_none());
        assert_eq!(loaded.table.records[0].shift, "");
        assert_eq!(
            loaded.table.records[0].regularized,
            Regularized::Unknown(String::new())
        );
        assert!(loaded.warnings.iter().any(|w| w.is_missing_column("Data_Fim")));
        assert!(loaded.warnings.iter().any(|w| w.is_missing_column("Turno")));
        assert!(loaded
            .warnings
            .iter()
            .any(|w| w.is_missing_column("Regularizado")));
    }

    #[test]
    fn test_load_contracts_header_only() {
        let loaded = load("Area;Data_Fim;Turno;Regularizado\n").unwrap();
        assert!(loaded.table.is_empty());
        assert!(loaded.warnings.is_empty());
    }

    #[test]
    fn test_load_contracts_ragged_rows_abort() {
        let err = load("Area;Turno\nAC;Manhã\nLG\n").unwrap_err();
        assert!(matches!(err, DashboardError::Parse { .. }));
    }

    #[test]
    fn test_load_contracts_custom_labels() {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), "c.csv", "Area\nTI\nAC\n");
        let labels = AreaLabels::from_pairs([("TI", "Tecnologia")]);

        let loaded = load_contracts(&path, b';', &labels).unwrap();
        let areas: Vec<&str> = loaded.table.records.iter().map(|r| r.area.as_str()).collect();
        assert_eq!(areas, vec!["Tecnologia", "AC"]);
    }
}

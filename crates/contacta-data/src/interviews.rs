//! Interviews dataset loading.

use std::path::Path;

use contacta_core::error::{LoadWarning, Result};
use contacta_core::models::{
    InterviewRecord, InterviewTable, Loaded, MONTH_COLUMN, TOTAL_COLUMN, WEEK_LABELS,
};
use tracing::{debug, warn};

use crate::loader::{read_delimited, RawRow, RawTable};

/// Load the interviews dataset.
///
/// Every column is optional. A missing `Mês` column is reported as a
/// [`LoadWarning::MissingColumn`] and leaves `has_month_column` unset so the
/// caller can skip the per-month chart. Missing `Total` or week columns
/// contribute zero.
pub fn load_interviews(path: &Path, delimiter: u8) -> Result<Loaded<InterviewTable>> {
    let raw = read_delimited(path, delimiter)?;
    let loaded = interviews_from_raw(raw);

    for warning in &loaded.warnings {
        match warning {
            LoadWarning::MissingColumn { column } => {
                warn!("{}: column '{}' not found", path.display(), column);
            }
            other => debug!("{}: {}", path.display(), other),
        }
    }
    if !loaded.warnings.is_empty() {
        warn!(
            "{} warning(s) while loading {}",
            loaded.warnings.len(),
            path.display()
        );
    }
    Ok(loaded)
}

/// Build an [`InterviewTable`] from an already-read file.
pub fn interviews_from_raw(raw: RawTable) -> Loaded<InterviewTable> {
    let mut warnings = Vec::new();
    let mut column = |name: &str| {
        let idx = raw.column(name);
        if idx.is_none() {
            warnings.push(LoadWarning::MissingColumn {
                column: name.to_string(),
            });
        }
        idx
    };

    let month_idx = column(MONTH_COLUMN);
    let total_idx = column(TOTAL_COLUMN);
    let week_idx: Vec<Option<usize>> = WEEK_LABELS.iter().map(|w| column(*w)).collect();

    let mut records = Vec::with_capacity(raw.rows.len());
    for RawRow { line, cells } in raw.rows {
        let mut count = |idx: Option<usize>, name: &str| -> u64 {
            let Some(i) = idx else { return 0 };
            match parse_count(&cells[i]) {
                Some(n) => n,
                None => {
                    warnings.push(LoadWarning::UnparseableCount {
                        line,
                        column: name.to_string(),
                        value: cells[i].clone(),
                    });
                    0
                }
            }
        };

        let total = count(total_idx, TOTAL_COLUMN);
        let mut weeks = [0u64; 5];
        for (slot, (idx, name)) in weeks.iter_mut().zip(week_idx.iter().zip(WEEK_LABELS)) {
            *slot = count(*idx, name);
        }

        let month = month_idx
            .map(|i| cells[i].clone())
            .filter(|m| !m.is_empty());

        records.push(InterviewRecord {
            month,
            total,
            weeks,
            line,
            fields: cells,
        });
    }

    Loaded::new(
        InterviewTable {
            headers: raw.headers,
            records,
            has_month_column: month_idx.is_some(),
        },
        warnings,
    )
}

/// Parse a count cell. Empty cells count as zero; integral floats such as
/// `3.0` (spreadsheet exports) are accepted.
pub fn parse_count(cell: &str) -> Option<u64> {
    let cell = cell.trim();
    if cell.is_empty() {
        return Some(0);
    }
    if let Ok(n) = cell.parse::<u64>() {
        return Some(n);
    }
    let f: f64 = cell.parse().ok()?;
    if f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64 {
        Some(f as u64)
    } else {
        None
    }
}

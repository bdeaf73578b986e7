use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::LoadWarning;

// ── Column names ──────────────────────────────────────────────────────────────

/// Column holding the area code or label in the contracts dataset.
pub const AREA_COLUMN: &str = "Area";
/// Column holding the day-first contract end date.
pub const END_DATE_COLUMN: &str = "Data_Fim";
/// Column holding the shift label.
pub const SHIFT_COLUMN: &str = "Turno";
/// Column holding the `SIM` / `NÃO` regularization flag.
pub const REGULARIZED_COLUMN: &str = "Regularizado";

/// Column holding the month label in the interviews dataset.
pub const MONTH_COLUMN: &str = "Mês";
/// Column holding the monthly interview total.
pub const TOTAL_COLUMN: &str = "Total";
/// The five ordinal week columns, in display order.
pub const WEEK_LABELS: [&str; 5] = [
    "1° Semana",
    "2° Semana",
    "3° Semana",
    "4° Semana",
    "5° Semana",
];

// ── Regularized ───────────────────────────────────────────────────────────────

/// Whether a contract's paperwork is finalized.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Regularized {
    /// `SIM`
    Yes,
    /// `NÃO`: the signature is still pending.
    No,
    /// Anything else, kept verbatim (including the empty string).
    Unknown(String),
}

impl Regularized {
    /// Parse the yes/no flag. Matching ignores case and surrounding blanks,
    /// and accepts `NAO` for spreadsheets that lost the tilde.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.to_uppercase().as_str() {
            "SIM" => Regularized::Yes,
            "NÃO" | "NAO" => Regularized::No,
            _ => Regularized::Unknown(trimmed.to_string()),
        }
    }

    /// `true` when the signature is still pending.
    pub fn is_pending(&self) -> bool {
        matches!(self, Regularized::No)
    }
}

// ── Contracts ─────────────────────────────────────────────────────────────────

/// One row of the contracts dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractRecord {
    /// Area label after code normalization.
    pub area: String,
    /// Contract end date; `None` when the cell was empty or unparseable.
    pub end_date: Option<NaiveDate>,
    /// Shift label (`Manhã`, `Tarde`, `Integral`, ...).
    pub shift: String,
    /// Paperwork status.
    pub regularized: Regularized,
    /// 1-based line number in the source file.
    pub line: u64,
    /// Every cell of the row, area cell replaced by its label.
    pub fields: Vec<String>,
}

/// The in-memory contracts dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractTable {
    /// Column names in file order.
    pub headers: Vec<String>,
    /// Rows in file order.
    pub records: Vec<ContractRecord>,
}

impl ContractTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ── Interviews ────────────────────────────────────────────────────────────────

/// One row of the interviews dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewRecord {
    /// Month label; `None` when the column is absent or the cell is empty.
    pub month: Option<String>,
    /// Interviews in the month.
    pub total: u64,
    /// Interviews per ordinal week, aligned with [`WEEK_LABELS`].
    pub weeks: [u64; 5],
    /// 1-based line number in the source file.
    pub line: u64,
    /// Every cell of the row.
    pub fields: Vec<String>,
}

/// The in-memory interviews dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewTable {
    pub headers: Vec<String>,
    pub records: Vec<InterviewRecord>,
    /// Whether the month column was present in the file.
    pub has_month_column: bool,
}

impl InterviewTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ── Loaded ────────────────────────────────────────────────────────────────────

/// A successfully loaded table plus the non-fatal warnings found on the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loaded<T> {
    pub table: T,
    pub warnings: Vec<LoadWarning>,
}

impl<T> Loaded<T> {
    pub fn new(table: T, warnings: Vec<LoadWarning>) -> Self {
        Self { table, warnings }
    }
}

// ── Aggregates ────────────────────────────────────────────────────────────────

/// Contracts grouped by `(area, shift)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftCount {
    pub area: String,
    pub shift: String,
    pub count: usize,
}

/// Portuguese month name for `month` (1-12); `None` outside that range.
pub fn month_name(month: u32) -> Option<&'static str> {
    const NAMES: [&str; 12] = [
        "Janeiro",
        "Fevereiro",
        "Março",
        "Abril",
        "Maio",
        "Junho",
        "Julho",
        "Agosto",
        "Setembro",
        "Outubro",
        "Novembro",
        "Dezembro",
    ];
    month
        .checked_sub(1)
        .and_then(|idx| NAMES.get(idx as usize))
        .copied()
}

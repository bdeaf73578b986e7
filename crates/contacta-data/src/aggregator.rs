//! Dashboard aggregations over contracts and interviews.
//!
//! Everything here is pure: inputs are borrowed tables, outputs are fresh
//! sorted maps. Empty input always yields an empty result.

use std::collections::BTreeMap;

use contacta_core::dates::{in_month, in_year};
use contacta_core::models::{ContractTable, InterviewTable, ShiftCount, WEEK_LABELS};

// ── ContractAggregator ────────────────────────────────────────────────────────

/// Stateless helper that groups contract rows by area.
pub struct ContractAggregator;

impl ContractAggregator {
    /// Rows per area. Areas with no rows are absent, not zero.
    pub fn count_by_category(table: &ContractTable) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for record in &table.records {
            *counts.entry(record.area.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// Rows per area whose end date falls in `year`/`month`.
    ///
    /// Rows without a parsed end date are excluded.
    pub fn count_ending_in_month(
        table: &ContractTable,
        year: i32,
        month: u32,
    ) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for record in &table.records {
            if record.end_date.is_some_and(|d| in_month(d, year, month)) {
                *counts.entry(record.area.clone()).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Rows whose end date falls in `year`, grouped by `(area, shift)` and
    /// sorted by that pair.
    pub fn count_by_category_and_shift(table: &ContractTable, year: i32) -> Vec<ShiftCount> {
        let mut groups: BTreeMap<(&str, &str), usize> = BTreeMap::new();
        for record in &table.records {
            if record.end_date.is_some_and(|d| in_year(d, year)) {
                *groups
                    .entry((record.area.as_str(), record.shift.as_str()))
                    .or_insert(0) += 1;
            }
        }

        groups
            .into_iter()
            .map(|((area, shift), count)| ShiftCount {
                area: area.to_string(),
                shift: shift.to_string(),
                count,
            })
            .collect()
    }

    /// Rows per area whose signature is still pending (`NÃO`).
    pub fn count_pending(table: &ContractTable) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for record in table.records.iter().filter(|r| r.regularized.is_pending()) {
            *counts.entry(record.area.clone()).or_insert(0) += 1;
        }
        counts
    }
}

// ── InterviewAggregator ───────────────────────────────────────────────────────

/// Stateless helper that totals interview counts.
pub struct InterviewAggregator;

impl InterviewAggregator {
    /// `Total` summed per month label.
    ///
    /// `None` when the file had no month column; rows with an empty month
    /// cell are skipped. Sums saturate at `u64::MAX`.
    pub fn sum_by_month(table: &InterviewTable) -> Option<BTreeMap<String, u64>> {
        if !table.has_month_column {
            return None;
        }

        let mut sums = BTreeMap::new();
        for record in &table.records {
            if let Some(month) = &record.month {
                let sum = sums.entry(month.clone()).or_insert(0u64);
                *sum = sum.saturating_add(record.total);
            }
        }
        Some(sums)
    }

    /// Each week column summed over all rows, in week order. Sums saturate
    /// at `u64::MAX`.
    pub fn sum_by_week(table: &InterviewTable) -> Vec<(String, u64)> {
        if table.is_empty() {
            return Vec::new();
        }

        let mut sums = [0u64; 5];
        for record in &table.records {
            for (sum, n) in sums.iter_mut().zip(record.weeks) {
                *sum = sum.saturating_add(n);
            }
        }

        WEEK_LABELS
            .iter()
            .zip(sums)
            .map(|(label, sum)| (label.to_string(), sum))
            .collect()
    }
}

// ── Ranking ───────────────────────────────────────────────────────────────────

/// Order a count mapping for a bar chart: highest count first, ties by label.
pub fn ranked(counts: &BTreeMap<String, usize>) -> Vec<(String, usize)> {
    let mut rows: Vec<(String, usize)> = counts.iter().map(|(k, v)| (k.clone(), *v)).collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    rows
}

// ── Tests ─────────────────────────────────────────────────────────────────────

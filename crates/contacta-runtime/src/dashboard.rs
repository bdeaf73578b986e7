//! Dashboard session: cache lookup → filter → aggregations.
//!
//! The presentation layer asks a [`DashboardSession`] for a snapshot every
//! time the area selection changes; the session reloads a dataset only when
//! its file changed on disk.

use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;
use std::sync::Arc;

use contacta_core::area_labels::AreaLabels;
use contacta_core::error::{LoadWarning, Result};
use contacta_core::models::{ContractTable, InterviewTable, Loaded, ShiftCount};
use contacta_data::aggregator::{ContractAggregator, InterviewAggregator};
use contacta_data::filter::{available_areas, filter_by_area};
use contacta_data::interviews::load_interviews;
use contacta_data::loader::load_contracts;

use crate::data_manager::TableCache;

// ── Configuration ─────────────────────────────────────────────────────────────

/// Inputs of a dashboard session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub contracts_path: PathBuf,
    pub interviews_path: PathBuf,
    pub delimiter: u8,
    pub labels: AreaLabels,
    /// Year of the closing-contracts charts.
    pub year: i32,
    /// Month (1-12) of the closing-in-month chart.
    pub month: u32,
}

// ── Snapshots ─────────────────────────────────────────────────────────────────

/// Everything the "Dashboard Geral" page draws for one area selection.
#[derive(Debug, Clone)]
pub struct ContractsSnapshot {
    /// All areas in the file, sorted; the picker's options.
    pub areas: Vec<String>,
    /// Rows of the selected areas.
    pub filtered: ContractTable,
    pub closing_in_month: BTreeMap<String, usize>,
    pub by_shift: Vec<ShiftCount>,
    pub pending: BTreeMap<String, usize>,
    pub per_area: BTreeMap<String, usize>,
    pub year: i32,
    pub month: u32,
    pub warnings: Vec<LoadWarning>,
}

/// Everything the "Entrevistas" page draws.
#[derive(Debug, Clone)]
pub struct InterviewsSnapshot {
    pub table: InterviewTable,
    /// `None` when the file has no month column.
    pub by_month: Option<BTreeMap<String, u64>>,
    pub by_week: Vec<(String, u64)>,
    pub warnings: Vec<LoadWarning>,
}

// ── DashboardSession ──────────────────────────────────────────────────────────

/// Owns the configuration and the two table caches.
pub struct DashboardSession {
    config: SessionConfig,
    contracts: TableCache<ContractTable>,
    interviews: TableCache<InterviewTable>,
}

impl DashboardSession {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            contracts: TableCache::new(),
            interviews: TableCache::new(),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The contracts table as currently on disk.
    pub fn contracts(&mut self) -> Result<Arc<Loaded<ContractTable>>> {
        let labels = &self.config.labels;
        self.contracts.get_or_load(
            &self.config.contracts_path,
            self.config.delimiter,
            |path, delimiter| load_contracts(path, delimiter, labels),
        )
    }

    /// The interviews table as currently on disk.
    pub fn interviews(&mut self) -> Result<Arc<Loaded<InterviewTable>>> {
        self.interviews.get_or_load(
            &self.config.interviews_path,
            self.config.delimiter,
            load_interviews,
        )
    }

    /// Sorted area labels present in the contracts file.
    pub fn available_areas(&mut self) -> Result<Vec<String>> {
        Ok(available_areas(&self.contracts()?.table))
    }

    /// Aggregates for the contract rows whose area is in `selected`.
    pub fn contracts_snapshot(&mut self, selected: &HashSet<String>) -> Result<ContractsSnapshot> {
        let loaded = self.contracts()?;
        let (year, month) = (self.config.year, self.config.month);
        let filtered = filter_by_area(&loaded.table, selected);

        tracing::debug!(
            selected = selected.len(),
            rows = filtered.len(),
            "building contracts snapshot"
        );

        Ok(ContractsSnapshot {
            areas: available_areas(&loaded.table),
            closing_in_month: ContractAggregator::count_ending_in_month(&filtered, year, month),
            by_shift: ContractAggregator::count_by_category_and_shift(&filtered, year),
            pending: ContractAggregator::count_pending(&filtered),
            per_area: ContractAggregator::count_by_category(&filtered),
            filtered,
            year,
            month,
            warnings: loaded.warnings.clone(),
        })
    }

    /// Interview totals per month and per week.
    pub fn interviews_snapshot(&mut self) -> Result<InterviewsSnapshot> {
        let loaded = self.interviews()?;
        Ok(InterviewsSnapshot {
            by_month: InterviewAggregator::sum_by_month(&loaded.table),
            by_week: InterviewAggregator::sum_by_week(&loaded.table),
            table: loaded.table.clone(),
            warnings: loaded.warnings.clone(),
        })
    }

    /// Forget both cached tables so the next request reads the files again.
    pub fn invalidate(&mut self) {
        self.contracts.invalidate();
        self.interviews.invalidate();
    }

    /// Loader runs so far, contracts and interviews combined.
    pub fn disk_reads(&self) -> usize {
        self.contracts.disk_reads() + self.interviews.disk_reads()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

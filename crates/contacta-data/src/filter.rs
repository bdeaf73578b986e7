//! Area selection over the contracts table.

use std::collections::{BTreeSet, HashSet};

use contacta_core::models::ContractTable;

/// Rows whose area is in `selected`, in their original order.
///
/// An empty selection yields an empty table (headers kept), never "all rows".
pub fn filter_by_area(table: &ContractTable, selected: &HashSet<String>) -> ContractTable {
    ContractTable {
        headers: table.headers.clone(),
        records: table
            .records
            .iter()
            .filter(|r| selected.contains(&r.area))
            .cloned()
            .collect(),
    }
}

/// Sorted distinct non-empty area labels, the options of the area picker.
pub fn available_areas(table: &ContractTable) -> Vec<String> {
    table
        .records
        .iter()
        .filter(|r| !r.area.is_empty())
        .map(|r| r.area.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

//! Area code → display label mapping.
//!
//! The contracts spreadsheet mixes short area codes (`AC`, `LG`, ...) with
//! full labels. [`AreaLabels::normalize`] substitutes the label for a known
//! code and leaves every other value untouched.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};

/// Codes shipped with the dashboard.
const DEFAULT_LABELS: [(&str, &str); 5] = [
    ("AC", "Assistente Comercial"),
    ("LG", "Logistica"),
    ("RS", "Recrutamento e seleção"),
    ("DP", "Departamento pessoal"),
    ("AD", "Analista de Dados"),
];

/// Read-only code → label table consumed by the contracts loader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AreaLabels {
    labels: BTreeMap<String, String>,
}

impl Default for AreaLabels {
    fn default() -> Self {
        Self::from_pairs(DEFAULT_LABELS)
    }
}

impl AreaLabels {
    /// Build a mapping from explicit `(code, label)` pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            labels: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Load a JSON object of `"CODE": "Label"` pairs, replacing the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| DashboardError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let labels: Self = serde_json::from_str(&content)?;
        if labels.labels.keys().any(|code| code.trim().is_empty()) {
            return Err(DashboardError::Config(format!(
                "{}: area codes must not be blank",
                path.display()
            )));
        }
        tracing::debug!(codes = labels.len(), "loaded area labels from {}", path.display());
        Ok(labels)
    }

    /// Label for `raw` when it is a known code, otherwise `raw` unchanged.
    ///
    /// Unknown codes pass through so that cells already holding a label (or
    /// any value outside the table) survive the substitution.
    pub fn normalize(&self, raw: &str) -> String {
        self.labels
            .get(raw)
            .cloned()
            .unwrap_or_else(|| raw.to_string())
    }

    /// Label registered for `code`, if any.
    pub fn label_for(&self, code: &str) -> Option<&str> {
        self.labels.get(code).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

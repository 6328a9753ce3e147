use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::types::MergedCell;

/// Structure counts per category name.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CategorySummary {
    pub area: Option<i64>,
    pub counts: BTreeMap<String, usize>,
}

impl CategorySummary {
    /// Count only cells that carry a structure record.
    pub fn from_cells<'a>(cells: impl IntoIterator<Item = &'a MergedCell>, area: Option<i64>) -> Self {
        let mut counts = BTreeMap::new();
        for cell in cells.into_iter().filter(|c| c.has_structure()) {
            *counts.entry(cell.category_name.clone()).or_insert(0) += 1;
        }
        Self { area, counts }
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

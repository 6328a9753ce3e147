use std::collections::BTreeMap;

use crate::common::{DomainError, DomainResult};

use super::types::{CategoryEntry, TableRole};

/// Name every unknown, null or reserved category id resolves to.
pub const SENTINEL_CATEGORY_NAME: &str = "etc";

/// Category id that always resolves to the sentinel, whatever the source table says.
pub const RESERVED_CATEGORY_ID: i64 = 0;

/// Immutable id -> name lookup. The loaded entries are kept as read; the
/// reserved-id override only lives in [`CategoryCatalog::resolve`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CategoryCatalog {
    entries: BTreeMap<i64, String>,
}

impl CategoryCatalog {
    pub fn new(entries: impl IntoIterator<Item = CategoryEntry>) -> DomainResult<Self> {
        let mut map = BTreeMap::new();
        for entry in entries {
            let name = entry.name.trim().to_string();
            if map.insert(entry.id, name).is_some() {
                return Err(DomainError::schema(
                    TableRole::Category,
                    format!("duplicate category id {}", entry.id),
                ));
            }
        }
        Ok(Self { entries: map })
    }

    /// Total lookup: never fails, never returns an empty answer.
    pub fn resolve(&self, category_id: Option<i64>) -> &str {
        match category_id {
            Some(RESERVED_CATEGORY_ID) | None => SENTINEL_CATEGORY_NAME,
            Some(id) => self
                .entries
                .get(&id)
                .map(String::as_str)
                .unwrap_or(SENTINEL_CATEGORY_NAME),
        }
    }

    /// Whether a structure record may reference `category_id`.
    pub fn accepts(&self, category_id: i64) -> bool {
        category_id == RESERVED_CATEGORY_ID || self.entries.contains_key(&category_id)
    }

    /// The entries exactly as loaded, without the reserved-id override.
    pub fn entries(&self) -> &BTreeMap<i64, String> {
        &self.entries
    }

    pub fn max_id(&self) -> Option<i64> {
        self.entries.keys().next_back().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

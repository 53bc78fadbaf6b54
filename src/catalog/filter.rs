//! Catalog filtering (the UI filter panel's contract).

use super::record::{PaperKind, PaperRecord};

/// Conjunctive record filter; `None` fields match everything.
#[derive(Debug, Clone, Default)]
pub struct CatalogFilter {
    pub year: Option<i32>,
    pub subject_code: Option<String>,
    pub region: Option<String>,
    pub kind: Option<PaperKind>,
    /// Case-insensitive substring match over subject name, region, and the
    /// year's decimal form.
    pub search: Option<String>,
}

impl CatalogFilter {
    pub fn matches(&self, record: &PaperRecord) -> bool {
        if self.year.is_some_and(|y| y != record.year) {
            return false;
        }
        if self
            .subject_code
            .as_deref()
            .is_some_and(|s| s != record.subject_code)
        {
            return false;
        }
        if self.region.as_deref().is_some_and(|r| r != record.region) {
            return false;
        }
        if self.kind.is_some_and(|k| k != record.kind) {
            return false;
        }
        if let Some(query) = self.search.as_deref() {
            let query = query.to_lowercase();
            return record.subject_name.to_lowercase().contains(&query)
                || record.region.to_lowercase().contains(&query)
                || record.year.to_string().contains(&query);
        }
        true
    }
}

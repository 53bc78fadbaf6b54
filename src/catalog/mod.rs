//! Immutable paper catalog with pure query helpers.
//!
//! The catalog is supplied in full at process start by an external
//! provisioning collaborator and never re-fetched or mutated. Everything
//! here is pure data and pure queries; no I/O.

mod filter;
mod record;

pub use filter::CatalogFilter;
pub use record::{PaperKind, PaperRecord};

use std::collections::{HashMap, HashSet};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// Two records share an id; ids must be unique across the catalog.
    #[error("duplicate record id: {0}")]
    DuplicateId(String),
    /// The catalog JSON could not be parsed.
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Read-only record store, built once at load time.
#[derive(Debug)]
pub struct Catalog {
    records: Vec<PaperRecord>,
    by_id: HashMap<String, usize>,
}

impl Catalog {
    /// Builds a catalog from an ordered record list, rejecting duplicate
    /// ids before anything else can observe the store.
    pub fn new(records: Vec<PaperRecord>) -> Result<Self, CatalogError> {
        let mut by_id = HashMap::with_capacity(records.len());
        for (idx, record) in records.iter().enumerate() {
            if by_id.insert(record.id.clone(), idx).is_some() {
                return Err(CatalogError::DuplicateId(record.id.clone()));
            }
        }
        Ok(Self { records, by_id })
    }

    /// Parses a JSON array of records, the provisioning collaborator's
    /// usual exchange format.
    pub fn from_json_slice(data: &[u8]) -> Result<Self, CatalogError> {
        Self::new(serde_json::from_slice(data)?)
    }

    pub fn get(&self, id: &str) -> Option<&PaperRecord> {
        self.by_id.get(id).map(|&idx| &self.records[idx])
    }

    pub fn records(&self) -> &[PaperRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct years, newest first.
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.records.iter().map(|r| r.year).collect();
        years.sort_unstable_by(|a, b| b.cmp(a));
        years.dedup();
        years
    }

    /// Distinct (code, name) subject pairs, sorted by display name.
    pub fn subjects(&self) -> Vec<(String, String)> {
        let mut seen = HashSet::new();
        let mut subjects: Vec<(String, String)> = self
            .records
            .iter()
            .filter(|r| seen.insert(r.subject_code.clone()))
            .map(|r| (r.subject_code.clone(), r.subject_name.clone()))
            .collect();
        subjects.sort_by(|a, b| a.1.cmp(&b.1));
        subjects
    }

    /// Distinct region labels, ascending.
    pub fn regions(&self) -> Vec<String> {
        let mut regions: Vec<String> = self.records.iter().map(|r| r.region.clone()).collect();
        regions.sort();
        regions.dedup();
        regions
    }

    /// Records matching `filter`, in catalog order.
    pub fn filter(&self, filter: &CatalogFilter) -> Vec<&PaperRecord> {
        self.records.iter().filter(|r| filter.matches(r)).collect()
    }

    /// Records whose id is in `ids`, in catalog order (selection order is
    /// irrelevant to batch processing; catalog order is what the pipeline
    /// sees).
    pub fn select(&self, ids: &HashSet<String>) -> Vec<&PaperRecord> {
        self.records.iter().filter(|r| ids.contains(&r.id)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, year: i32, code: &str, name: &str, region: &str) -> PaperRecord {
        PaperRecord {
            id: id.to_string(),
            year,
            subject_code: code.to_string(),
            subject_name: name.to_string(),
            kind: PaperKind::QuestionPaper,
            region: region.to_string(),
            set_label: String::new(),
            source_url: format!("https://example.com/{}.pdf", id),
            file_name: format!("{}.pdf", id),
            source_label: String::new(),
            verified: false,
        }
    }

    fn catalog() -> Catalog {
        Catalog::new(vec![
            record("p1", 2025, "mathematics", "Mathematics", "All Sets"),
            record("p2", 2015, "economics", "Economics", "Delhi"),
            record("p3", 2020, "economics", "Economics", "Foreign"),
            record("p4", 2015, "accountancy", "Accountancy", "Delhi"),
        ])
        .unwrap()
    }

    #[test]
    fn duplicate_id_rejected() {
        let err = Catalog::new(vec![
            record("p1", 2024, "mathematics", "Mathematics", "Delhi"),
            record("p1", 2023, "economics", "Economics", "Delhi"),
        ])
        .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(id) if id == "p1"));
    }

    #[test]
    fn years_descending_deduplicated() {
        assert_eq!(catalog().years(), vec![2025, 2020, 2015]);
    }

    #[test]
    fn subjects_sorted_by_name_deduplicated() {
        let subjects = catalog().subjects();
        assert_eq!(
            subjects,
            vec![
                ("accountancy".to_string(), "Accountancy".to_string()),
                ("economics".to_string(), "Economics".to_string()),
                ("mathematics".to_string(), "Mathematics".to_string()),
            ]
        );
    }

    #[test]
    fn regions_sorted_deduplicated() {
        assert_eq!(catalog().regions(), vec!["All Sets", "Delhi", "Foreign"]);
    }

    #[test]
    fn get_by_id() {
        let catalog = catalog();
        assert_eq!(catalog.get("p3").unwrap().year, 2020);
        assert!(catalog.get("nope").is_none());
    }

    #[test]
    fn filter_preserves_catalog_order() {
        let catalog = catalog();
        let filter = CatalogFilter {
            region: Some("Delhi".to_string()),
            ..Default::default()
        };
        let hits: Vec<&str> = catalog.filter(&filter).iter().map(|r| r.id.as_str()).collect();
        assert_eq!(hits, vec!["p2", "p4"]);
    }

    #[test]
    fn select_in_catalog_order() {
        let catalog = catalog();
        let ids: HashSet<String> = ["p4", "p1"].iter().map(|s| s.to_string()).collect();
        let selected: Vec<&str> = catalog.select(&ids).iter().map(|r| r.id.as_str()).collect();
        assert_eq!(selected, vec!["p1", "p4"]);
    }

    #[test]
    fn from_json_slice_parses_records() {
        let json = r#"[{
            "id": "paper-1",
            "year": 2024,
            "subject_code": "mathematics",
            "subject_name": "Mathematics",
            "kind": "marking_scheme",
            "region": "All Sets",
            "source_url": "https://example.com/m.zip",
            "file_name": "Mathematics_2024_MS.zip"
        }]"#;
        let catalog = Catalog::from_json_slice(json.as_bytes()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("paper-1").unwrap().kind, PaperKind::MarkingScheme);
    }
}

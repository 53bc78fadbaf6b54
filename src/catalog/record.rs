//! Paper record model.

use serde::{Deserialize, Serialize};

/// Kind of document a record points at. Closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaperKind {
    QuestionPaper,
    MarkingScheme,
    SamplePaper,
    SampleMarkingScheme,
}

impl PaperKind {
    /// Human-readable name for display.
    pub fn label(&self) -> &'static str {
        match self {
            PaperKind::QuestionPaper => "Question Paper",
            PaperKind::MarkingScheme => "Marking Scheme",
            PaperKind::SamplePaper => "Sample Paper",
            PaperKind::SampleMarkingScheme => "Sample Marking Scheme",
        }
    }
}

/// One downloadable paper and its retrieval metadata.
///
/// Records are created once at catalog load and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaperRecord {
    /// Opaque identifier, unique across the catalog, stable for the
    /// process lifetime.
    pub id: String,
    /// Exam year.
    pub year: i32,
    /// Category key (e.g. "business_studies"); also feeds mirror URL
    /// derivation.
    pub subject_code: String,
    /// Display label (e.g. "Business Studies"); also names the archive
    /// folder, with spaces replaced by underscores.
    pub subject_name: String,
    /// Document kind.
    pub kind: PaperKind,
    /// Region label; filtering/display only.
    pub region: String,
    /// Set label; filtering/display only.
    #[serde(default)]
    pub set_label: String,
    /// Primary retrieval location.
    pub source_url: String,
    /// Name to persist the bytes under locally.
    pub file_name: String,
    /// Provenance tag (authoritative source vs best-effort mirror).
    /// Display only, never control flow.
    #[serde(default)]
    pub source_label: String,
    /// Display hint; not load-bearing for retrieval.
    #[serde(default)]
    pub verified: bool,
}

//! Deterministic mirror-list derivation. No network involved.

use crate::catalog::PaperRecord;

/// Expands the configured mirror templates for one record, in template
/// order (first listed is tried first).
///
/// `{subject}` is the subject code with underscores replaced by hyphens,
/// `{year}` the exam year in decimal.
pub fn mirror_urls(templates: &[String], record: &PaperRecord) -> Vec<String> {
    let subject = record.subject_code.replace('_', "-");
    let year = record.year.to_string();
    templates
        .iter()
        .map(|t| t.replace("{subject}", &subject).replace("{year}", &year))
        .collect()
}

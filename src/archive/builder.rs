//! In-memory folder/file tree and zip serialization.

use std::collections::BTreeMap;
use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Deflate level for every entry (moderate compression).
const DEFLATE_LEVEL: i64 = 6;

/// Archive folder name for a record: subject name with spaces replaced by
/// underscores.
pub(crate) fn folder_name(subject_name: &str) -> String {
    subject_name.replace(' ', "_")
}

/// Accumulates fetched payloads grouped by folder until serialization.
///
/// Folders are created lazily on first use; insertion order within a
/// folder is kept, folder iteration order is not part of the output
/// contract.
#[derive(Debug, Default)]
pub(crate) struct ArchiveTree {
    folders: BTreeMap<String, Vec<(String, Vec<u8>)>>,
    entries: usize,
}

impl ArchiveTree {
    pub fn insert(&mut self, folder: &str, file_name: &str, bytes: Vec<u8>) {
        self.folders
            .entry(folder.to_string())
            .or_default()
            .push((file_name.to_string(), bytes));
        self.entries += 1;
    }

    pub fn entry_count(&self) -> usize {
        self.entries
    }

    /// Serializes the tree into one deflate-compressed zip in memory.
    /// `on_entry` is called after each written entry with
    /// `(written, total)` for progress reporting. An empty tree yields a
    /// valid empty archive.
    pub fn into_zip(
        self,
        mut on_entry: impl FnMut(usize, usize),
    ) -> zip::result::ZipResult<Vec<u8>> {
        let total = self.entries;
        let mut written = 0usize;
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(Some(DEFLATE_LEVEL));

        for (folder, files) in self.folders {
            for (file_name, bytes) in files {
                zip.start_file(format!("{}/{}", folder, file_name), options)?;
                zip.write_all(&bytes)?;
                written += 1;
                on_entry(written, total);
            }
        }

        Ok(zip.finish()?.into_inner())
    }
}

//! Persistence and manual-recovery boundaries.
//!
//! The core hands finished payloads to a `SaveSink` together with a file
//! name; where files land is the embedder's concern. When automatic
//! download fails entirely, the `FallbackViewer` is asked to open the
//! primary URL directly so the user can save it by hand.

use std::fs;
use std::io;
use std::path::PathBuf;

/// Local persistence collaborator.
pub trait SaveSink: Send + Sync {
    fn save(&self, file_name: &str, bytes: &[u8]) -> io::Result<()>;
}

/// Manual-recovery collaborator (open a source URL in a viewing context).
pub trait FallbackViewer: Send + Sync {
    fn open(&self, url: &str);
}

/// `SaveSink` writing into a fixed directory, created on first save.
#[derive(Debug, Clone)]
pub struct DirSink {
    dir: PathBuf,
}

impl DirSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl SaveSink for DirSink {
    fn save(&self, file_name: &str, bytes: &[u8]) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.dir.join(file_name), bytes)
    }
}

//! File-backed collaborators
//!
//! Documents live in one directory as `<title>.wiki`; values come from a JSON
//! array of entity records.

use anyhow::Context;
use infobox_core::{DocumentStore, EntityRecord, SessionError, SessionResult, ValueSource};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Extension of document files
pub const DOCUMENT_EXTENSION: &str = "wiki";

/// Directory of `<title>.wiki` files
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
    written: Vec<String>,
}

impl DirectoryStore {
    /// Open store rooted at `root`
    ///
    /// # Errors
    /// Fails if `root` is not a directory.
    pub fn open(root: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let root = root.into();
        anyhow::ensure!(root.is_dir(), "not a directory: {}", root.display());
        Ok(Self {
            root,
            written: Vec::new(),
        })
    }

    /// File path for `title`; `/` in titles becomes `_`
    #[must_use]
    pub fn path_for(&self, title: &str) -> PathBuf {
        let file = title.replace('/', "_");
        self.root.join(format!("{file}.{DOCUMENT_EXTENSION}"))
    }

    /// Titles written so far, in order
    #[must_use]
    pub fn written(&self) -> &[String] {
        &self.written
    }
}

impl DocumentStore for DirectoryStore {
    fn fetch(&self, title: &str) -> SessionResult<Option<String>> {
        match fs::read_to_string(self.path_for(title)) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SessionError::fetch(title, e)),
        }
    }

    fn persist(&mut self, title: &str, text: &str, summary: &str) -> SessionResult<()> {
        let path = self.path_for(title);
        fs::write(&path, text).map_err(|e| SessionError::persist(title, e))?;
        tracing::debug!(title, path = %path.display(), summary, "document written");
        self.written.push(title.to_string());
        Ok(())
    }
}

/// Entity records loaded from a JSON array
#[derive(Debug, Clone, Default)]
pub struct JsonRecords {
    records: Vec<EntityRecord>,
}

impl JsonRecords {
    /// Parse records from JSON text
    ///
    /// # Errors
    /// Fails on malformed JSON or records without a name.
    pub fn parse(json: &str) -> anyhow::Result<Self> {
        let records: Vec<EntityRecord> =
            serde_json::from_str(json).context("invalid entity records")?;
        if let Some(index) = records.iter().position(|r| r.name.trim().is_empty()) {
            anyhow::bail!("entity record #{index} has no name");
        }
        Ok(Self { records })
    }

    /// Load records from a JSON file
    ///
    /// # Errors
    /// Fails if the file cannot be read or parsed.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("reading records from {}", path.display()))?;
        Self::parse(&json)
    }

    /// Number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether there are no records
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl ValueSource for JsonRecords {
    fn entities(&self) -> Vec<String> {
        self.records.iter().map(|r| r.name.clone()).collect()
    }

    fn record(&self, entity: &str) -> SessionResult<EntityRecord> {
        self.records
            .iter()
            .find(|r| r.name == entity)
            .cloned()
            .ok_or_else(|| SessionError::source(entity, "no record"))
    }
}

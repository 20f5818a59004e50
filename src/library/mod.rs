//! In-memory media library.
//!
//! The library maps each base name to the video and poster found for it. It is
//! filled once by the [`Scanner`](crate::scanner::Scanner) and then shared
//! read-only with the HTTP layer behind an `Arc`.

mod summary;

pub use summary::{OverwriteCounts, ScanSummary};

use reelshelf_common::{Error, MediaKind, Result};
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// A base name together with whatever files were found for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaEntry {
    pub base_name: String,
    pub video_path: Option<PathBuf>,
    pub poster_path: Option<PathBuf>,
}

impl MediaEntry {
    fn new(base_name: String) -> Self {
        Self {
            base_name,
            video_path: None,
            poster_path: None,
        }
    }

    /// Both a video and a poster are known.
    pub fn is_complete(&self) -> bool {
        self.video_path.is_some() && self.poster_path.is_some()
    }

    /// Path of the given resource kind, if one was found.
    pub fn path(&self, kind: MediaKind) -> Option<&Path> {
        match kind {
            MediaKind::Video => self.video_path.as_deref(),
            MediaKind::Poster => self.poster_path.as_deref(),
        }
    }

    fn slot_mut(&mut self, kind: MediaKind) -> &mut Option<PathBuf> {
        match kind {
            MediaKind::Video => &mut self.video_path,
            MediaKind::Poster => &mut self.poster_path,
        }
    }
}

/// Base name → files index, iterated in first-insertion order.
#[derive(Debug, Clone, Default)]
pub struct Library {
    entries: Vec<MediaEntry>,
    by_name: HashMap<String, usize>,
    unmatched: Vec<PathBuf>,
    overwritten: OverwriteCounts,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a file for a base name.
    ///
    /// A later file of the same kind replaces the earlier one; the replaced
    /// path is returned and counted in the summary.
    pub fn insert(&mut self, kind: MediaKind, base_name: String, path: PathBuf) -> Option<PathBuf> {
        let index = match self.by_name.get(&base_name) {
            Some(&index) => index,
            None => {
                let index = self.entries.len();
                self.by_name.insert(base_name.clone(), index);
                self.entries.push(MediaEntry::new(base_name));
                index
            }
        };

        let previous = self.entries[index].slot_mut(kind).replace(path);
        if previous.is_some() {
            match kind {
                MediaKind::Video => self.overwritten.videos += 1,
                MediaKind::Poster => self.overwritten.posters += 1,
            }
        }
        previous
    }

    /// Record a recognized media file whose name normalized to nothing.
    pub fn record_unmatched(&mut self, path: PathBuf) {
        self.unmatched.push(path);
    }

    pub fn get(&self, base_name: &str) -> Option<&MediaEntry> {
        self.by_name.get(base_name).map(|&index| &self.entries[index])
    }

    /// All entries, partial ones included.
    pub fn entries(&self) -> impl Iterator<Item = &MediaEntry> {
        self.entries.iter()
    }

    /// Entries that have both a video and a poster.
    pub fn complete_entries(&self) -> impl Iterator<Item = &MediaEntry> {
        self.entries.iter().filter(|entry| entry.is_complete())
    }

    pub fn complete_count(&self) -> usize {
        self.complete_entries().count()
    }

    pub fn unmatched(&self) -> &[PathBuf] {
        &self.unmatched
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Complete entries whose base name contains `query`, ignoring case.
    ///
    /// An empty query matches every complete entry.
    pub fn search(&self, query: &str) -> Vec<&MediaEntry> {
        let query = query.to_lowercase();
        self.complete_entries()
            .filter(|entry| entry.base_name.to_lowercase().contains(&query))
            .collect()
    }

    /// Path of the file serving `kind` for `base_name`.
    ///
    /// Partial entries resolve too; only the requested kind has to exist.
    pub fn resolve(&self, base_name: &str, kind: MediaKind) -> Result<&Path> {
        let entry = self
            .get(base_name)
            .ok_or_else(|| Error::not_found(base_name))?;
        entry
            .path(kind)
            .ok_or_else(|| Error::not_found(format!("{} for {}", kind, base_name)))
    }

    pub fn summary(&self) -> ScanSummary {
        ScanSummary::from_library(self)
    }

    pub(crate) fn overwritten(&self) -> OverwriteCounts {
        self.overwritten
    }
}

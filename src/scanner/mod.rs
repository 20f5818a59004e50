//! Media directory scanner.
//!
//! Walks the configured roots, classifies every file by extension, and builds
//! the [`Library`] the server answers from. Roots are walked in parallel; their
//! results are committed in configured order so the outcome does not depend on
//! thread timing.

use rayon::prelude::*;
use reelshelf_common::{
    paths::{base_name, ExtensionSet},
    Error, MediaKind, Result,
};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::LibraryConfig;
use crate::library::Library;

/// A recognized media file found under a root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    pub kind: MediaKind,
    /// `None` when the file name normalizes to nothing or is not UTF-8.
    pub base_name: Option<String>,
    pub path: PathBuf,
}

/// Scanner for discovering videos and posters.
#[derive(Debug, Clone)]
pub struct Scanner {
    extensions: ExtensionSet,
    follow_links: bool,
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new(ExtensionSet::default())
    }
}

impl Scanner {
    pub fn new(extensions: ExtensionSet) -> Self {
        Self {
            extensions,
            follow_links: true,
        }
    }

    pub fn from_config(config: &LibraryConfig) -> Self {
        Self::new(config.extension_set()).follow_links(config.follow_links)
    }

    pub fn follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// Scan every root and build the library.
    ///
    /// Roots that do not exist are logged and skipped.
    pub fn scan(&self, roots: &[PathBuf]) -> Library {
        info!("Scanning {} library directories", roots.len());

        let per_root: Vec<Vec<DiscoveredFile>> = roots
            .par_iter()
            .map(|root| match self.scan_directory(root) {
                Ok(files) => files,
                Err(e) if e.is_not_found() => {
                    warn!("Directory not found: {:?}", root);
                    Vec::new()
                }
                Err(e) => {
                    warn!("Skipping directory {:?}: {}", root, e);
                    Vec::new()
                }
            })
            .collect();

        let mut library = Library::new();
        for file in per_root.into_iter().flatten() {
            commit(&mut library, file);
        }

        info!(
            "Scan complete: {} base names, {} complete pairs",
            library.len(),
            library.complete_count()
        );
        library
    }

    /// Walk a single root and return its recognized files in name order.
    pub fn scan_directory(&self, root: &Path) -> Result<Vec<DiscoveredFile>> {
        let root = root.canonicalize()?;
        if !root.is_dir() {
            return Err(Error::invalid_input(format!(
                "not a directory: {}",
                root.display()
            )));
        }

        info!("Scanning directory: {:?}", root);
        let mut files = Vec::new();
        let (mut videos, mut posters) = (0usize, 0usize);

        let walker = WalkDir::new(&root)
            .follow_links(self.follow_links)
            .sort_by_file_name();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Error accessing path under {:?}: {}", root, e);
                    continue;
                }
            };

            // A link to a regular file counts even when links are not followed
            let is_file = entry.file_type().is_file()
                || (entry.path_is_symlink() && entry.path().is_file());
            if !is_file {
                continue;
            }

            let Some(kind) = self.extensions.classify(entry.path()) else {
                continue;
            };

            let base_name = base_name(entry.path());
            match kind {
                MediaKind::Video => videos += 1,
                MediaKind::Poster => posters += 1,
            }
            debug!(
                "Found {}: {:?} (base: {})",
                kind,
                entry.file_name(),
                base_name.as_deref().unwrap_or("<none>")
            );

            files.push(DiscoveredFile {
                kind,
                base_name,
                path: entry.into_path(),
            });
        }

        info!(
            "Directory scan completed: {:?} (videos: {}, posters: {})",
            root, videos, posters
        );
        Ok(files)
    }
}

fn commit(library: &mut Library, file: DiscoveredFile) {
    match file.base_name {
        Some(name) => {
            if let Some(previous) = library.insert(file.kind, name, file.path) {
                debug!("Replaced earlier {}: {:?}", file.kind, previous);
            }
        }
        None => library.record_unmatched(file.path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"x").unwrap();
    }

    #[test]
    fn test_scan_pairs_video_and_poster() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("movie.FHD.mp4"));
        touch(&dir.path().join("movie.jpg"));

        let library = Scanner::default().scan(&[dir.path().to_path_buf()]);

        assert_eq!(library.len(), 1);
        let entry = library.get("movie").unwrap();
        assert!(entry.is_complete());
        assert!(entry.video_path.as_ref().unwrap().is_absolute());
        assert!(entry
            .video_path
            .as_ref()
            .unwrap()
            .ends_with("movie.FHD.mp4"));
        assert!(entry.poster_path.as_ref().unwrap().ends_with("movie.jpg"));
    }

    #[test]
    fn test_scan_recurses_and_ignores_other_files() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("a/b/deep.HD.MKV"));
        touch(&dir.path().join("posters/deep.PNG"));
        touch(&dir.path().join("notes.txt"));
        touch(&dir.path().join("deep.srt"));

        let library = Scanner::default().scan(&[dir.path().to_path_buf()]);

        assert_eq!(library.len(), 1);
        assert!(library.get("deep").unwrap().is_complete());
    }

    #[test]
    fn test_scan_video_only_is_partial() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("movie.mp4"));

        let library = Scanner::default().scan(&[dir.path().to_path_buf()]);
        let summary = library.summary();

        assert_eq!(summary.videos_without_posters, vec!["movie"]);
        assert!(library.search("").is_empty());
    }

    #[test]
    fn test_missing_root_is_skipped() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("movie.mp4"));
        touch(&dir.path().join("movie.jpg"));

        let roots = vec![
            dir.path().join("does-not-exist"),
            dir.path().to_path_buf(),
        ];
        let library = Scanner::default().scan(&roots);

        assert_eq!(library.complete_count(), 1);
    }

    #[test]
    fn test_scan_directory_missing_root_is_not_found() {
        let dir = tempdir().unwrap();
        let err = Scanner::default()
            .scan_directory(&dir.path().join("nope"))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_scan_directory_rejects_file_root() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("movie.mp4");
        touch(&file);

        let err = Scanner::default().scan_directory(&file).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_later_root_wins_for_same_kind() {
        let first = tempdir().unwrap();
        let second = tempdir().unwrap();
        touch(&first.path().join("movie.mp4"));
        touch(&second.path().join("movie.HD.mkv"));
        touch(&first.path().join("movie.jpg"));

        let library = Scanner::default().scan(&[
            first.path().to_path_buf(),
            second.path().to_path_buf(),
        ]);

        let entry = library.get("movie").unwrap();
        assert!(entry.video_path.as_ref().unwrap().ends_with("movie.HD.mkv"));
        assert_eq!(library.summary().overwritten.videos, 1);
    }

    #[test]
    fn test_unmatched_names_are_reported() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join(".FHD.mp4"));

        let library = Scanner::default().scan(&[dir.path().to_path_buf()]);

        assert!(library.is_empty());
        assert_eq!(library.unmatched().len(), 1);
        assert!(library.unmatched()[0].ends_with(".FHD.mp4"));
    }

    #[test]
    fn test_custom_extensions() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("clip.ts"));
        touch(&dir.path().join("clip.bmp"));
        touch(&dir.path().join("other.mp4"));

        let scanner = Scanner::new(ExtensionSet::new(["ts"], ["bmp"]));
        let library = scanner.scan(&[dir.path().to_path_buf()]);

        assert_eq!(library.len(), 1);
        assert!(library.get("clip").unwrap().is_complete());
    }

    #[test]
    fn test_scan_directory_sorted_by_name() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("b.mp4"));
        touch(&dir.path().join("a.mp4"));
        touch(&dir.path().join("c.jpg"));

        let files = Scanner::default().scan_directory(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|f| f.base_name.clone().unwrap())
            .collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(files[2].kind, MediaKind::Poster);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_file_is_indexed() {
        use std::os::unix::fs::symlink;

        let library_dir = tempdir().unwrap();
        let elsewhere = tempdir().unwrap();
        touch(&elsewhere.path().join("movie.mp4"));
        touch(&library_dir.path().join("movie.jpg"));
        symlink(
            elsewhere.path().join("movie.mp4"),
            library_dir.path().join("movie.mp4"),
        )
        .unwrap();

        let config = crate::config::LibraryConfig::default();
        let library = Scanner::from_config(&config).scan(&[library_dir.path().to_path_buf()]);
        assert_eq!(library.complete_count(), 1);

        let library = Scanner::default()
            .follow_links(false)
            .scan(&[library_dir.path().to_path_buf()]);
        assert_eq!(library.complete_count(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_directory_follows_setting() {
        use std::os::unix::fs::symlink;

        let library_dir = tempdir().unwrap();
        let posters = tempdir().unwrap();
        touch(&library_dir.path().join("movie.mp4"));
        touch(&posters.path().join("movie.png"));
        symlink(posters.path(), library_dir.path().join("posters")).unwrap();

        let roots = [library_dir.path().to_path_buf()];

        let library = Scanner::default().scan(&roots);
        assert!(library.get("movie").unwrap().is_complete());

        let library = Scanner::default().follow_links(false).scan(&roots);
        assert!(!library.get("movie").unwrap().is_complete());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_non_utf8_names_are_unmatched() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempdir().unwrap();
        fs::write(dir.path().join(OsStr::from_bytes(b"a\xff.mp4")), b"v").unwrap();
        fs::write(dir.path().join(OsStr::from_bytes(b"a\xfe.jpg")), b"p").unwrap();

        let library = Scanner::default().scan(&[dir.path().to_path_buf()]);

        assert!(library.is_empty());
        assert_eq!(library.complete_count(), 0);
        assert_eq!(library.unmatched().len(), 2);
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_subdirectory_is_skipped() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        touch(&dir.path().join("movie.mp4"));
        touch(&dir.path().join("movie.jpg"));
        let locked = dir.path().join("locked");
        touch(&locked.join("hidden.mp4"));
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Permission bits do not bind a privileged user
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let library = Scanner::default().scan(&[dir.path().to_path_buf()]);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert_eq!(library.len(), 1);
        assert!(library.get("movie").unwrap().is_complete());
        assert!(library.get("hidden").is_none());
    }
}

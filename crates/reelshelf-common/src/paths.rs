//! Path utilities for classifying files and deriving base names.
//!
//! A video and its poster are joined on their *base name*: the file stem with
//! any trailing resolution marker (`.FHD`, `.HD`) removed, so that
//! `movie.FHD.mp4` and `movie.jpg` both map to `movie`.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::types::MediaKind;

/// Video file extensions recognized when none are configured.
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mkv", "avi", "mov", "wmv", "flv", "webm"];

/// Image file extensions recognized when none are configured.
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// Resolution markers stripped from the end of a stem, tried in this order.
const RESOLUTION_SUFFIXES: &[&str] = &[r"\.FHD$", r"\.HD$", r"\.FHD\.$", r"\.HD\.$"];

static SUFFIX_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    RESOLUTION_SUFFIXES
        .iter()
        .map(|pattern| Regex::new(pattern).expect("resolution suffix pattern is valid"))
        .collect()
});

/// Get the default list of video file extensions.
///
/// # Examples
///
/// ```
/// use reelshelf_common::paths::video_extensions;
///
/// assert!(video_extensions().contains(&"mkv"));
/// ```
#[must_use]
pub fn video_extensions() -> &'static [&'static str] {
    VIDEO_EXTENSIONS
}

/// Get the default list of image file extensions.
#[must_use]
pub fn image_extensions() -> &'static [&'static str] {
    IMAGE_EXTENSIONS
}

/// Strip resolution markers from the end of a stem.
///
/// Every pattern is tried in order and the pass repeats until nothing more
/// matches, so the result is a fixed point: normalizing it again is a no-op.
/// Matching is case-sensitive.
///
/// # Examples
///
/// ```
/// use reelshelf_common::paths::normalize_stem;
///
/// assert_eq!(normalize_stem("movie.FHD"), "movie");
/// assert_eq!(normalize_stem("movie.HD."), "movie");
/// assert_eq!(normalize_stem("movie.fhd"), "movie.fhd");
/// ```
pub fn normalize_stem(stem: &str) -> String {
    let mut name = stem.to_string();
    loop {
        let before = name.len();
        for pattern in SUFFIX_PATTERNS.iter() {
            if pattern.is_match(&name) {
                name = pattern.replace(&name, "").into_owned();
            }
        }
        if name.len() == before {
            return name;
        }
    }
}

/// Derive the base name of a file.
///
/// Returns `None` when the name normalizes to nothing (e.g. `.FHD.mp4`) or is
/// not valid UTF-8.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use reelshelf_common::paths::base_name;
///
/// assert_eq!(base_name(Path::new("/v/movie.FHD.mp4")).as_deref(), Some("movie"));
/// assert_eq!(base_name(Path::new("movie.jpg")).as_deref(), Some("movie"));
/// assert_eq!(base_name(Path::new(".FHD.mp4")), None);
/// ```
pub fn base_name(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    let name = normalize_stem(stem);
    (!name.is_empty()).then_some(name)
}

/// Lowercase an extension and drop a leading dot, so `.MP4` and `mp4` agree.
fn normalize_extension(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_lowercase()
}

/// The two sets of extensions the scanner recognizes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionSet {
    video: BTreeSet<String>,
    image: BTreeSet<String>,
}

impl Default for ExtensionSet {
    fn default() -> Self {
        Self::new(VIDEO_EXTENSIONS, IMAGE_EXTENSIONS)
    }
}

impl ExtensionSet {
    /// Build a set from raw extensions (case and leading dots are ignored).
    pub fn new<V, I>(video: V, image: I) -> Self
    where
        V: IntoIterator,
        V::Item: AsRef<str>,
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let collect = |exts: Vec<String>| {
            exts.into_iter()
                .filter(|ext| !ext.is_empty())
                .collect::<BTreeSet<_>>()
        };
        Self {
            video: collect(
                video
                    .into_iter()
                    .map(|e| normalize_extension(e.as_ref()))
                    .collect(),
            ),
            image: collect(
                image
                    .into_iter()
                    .map(|e| normalize_extension(e.as_ref()))
                    .collect(),
            ),
        }
    }

    /// Classify a path by its extension. Video wins if an extension is in both.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::Path;
    /// use reelshelf_common::paths::ExtensionSet;
    /// use reelshelf_common::MediaKind;
    ///
    /// let set = ExtensionSet::default();
    /// assert_eq!(set.classify(Path::new("a.MKV")), Some(MediaKind::Video));
    /// assert_eq!(set.classify(Path::new("a.webp")), Some(MediaKind::Poster));
    /// assert_eq!(set.classify(Path::new("a.srt")), None);
    /// ```
    pub fn classify(&self, path: &Path) -> Option<MediaKind> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        if self.video.contains(&ext) {
            Some(MediaKind::Video)
        } else if self.image.contains(&ext) {
            Some(MediaKind::Poster)
        } else {
            None
        }
    }

    pub fn video(&self) -> impl Iterator<Item = &str> {
        self.video.iter().map(String::as_str)
    }

    pub fn image(&self) -> impl Iterator<Item = &str> {
        self.image.iter().map(String::as_str)
    }

    /// Extensions listed as both video and image.
    pub fn overlap(&self) -> Vec<&str> {
        self.video
            .intersection(&self.image)
            .map(String::as_str)
            .collect()
    }
}

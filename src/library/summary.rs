//! Scan report over a populated library.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

use super::Library;

/// How many paths were replaced by a later file with the same base name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OverwriteCounts {
    pub videos: usize,
    pub posters: usize,
}

/// Counts and mismatches found by a scan. Purely informational.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    pub total_videos: usize,
    pub total_posters: usize,
    pub complete_pairs: usize,
    pub videos_without_posters: Vec<String>,
    pub posters_without_videos: Vec<String>,
    pub unmatched_files: Vec<PathBuf>,
    pub overwritten: OverwriteCounts,
}

impl ScanSummary {
    pub fn from_library(library: &Library) -> Self {
        let mut summary = Self {
            total_videos: 0,
            total_posters: 0,
            complete_pairs: 0,
            videos_without_posters: Vec::new(),
            posters_without_videos: Vec::new(),
            unmatched_files: library.unmatched().to_vec(),
            overwritten: library.overwritten(),
        };

        for entry in library.entries() {
            let has_video = entry.video_path.is_some();
            let has_poster = entry.poster_path.is_some();

            summary.total_videos += usize::from(has_video);
            summary.total_posters += usize::from(has_poster);

            match (has_video, has_poster) {
                (true, true) => summary.complete_pairs += 1,
                (true, false) => summary
                    .videos_without_posters
                    .push(entry.base_name.clone()),
                (false, true) => summary
                    .posters_without_videos
                    .push(entry.base_name.clone()),
                (false, false) => {}
            }
        }

        summary
    }

    /// Emit the report through `tracing`.
    pub fn log(&self) {
        tracing::info!(
            total_videos = self.total_videos,
            total_posters = self.total_posters,
            complete_pairs = self.complete_pairs,
            "Scan summary"
        );

        for name in &self.videos_without_posters {
            tracing::warn!("Video without poster: {}", name);
        }
        for name in &self.posters_without_videos {
            tracing::warn!("Poster without video: {}", name);
        }
        for path in &self.unmatched_files {
            tracing::warn!("Unmatched file: {:?}", path);
        }
        if self.overwritten.videos > 0 || self.overwritten.posters > 0 {
            tracing::warn!(
                videos = self.overwritten.videos,
                posters = self.overwritten.posters,
                "Duplicate base names replaced earlier files"
            );
        }
    }
}

impl fmt::Display for ScanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(50);

        writeln!(f, "Scan Summary:")?;
        writeln!(f, "{}", rule)?;
        writeln!(f, "Total videos found: {}", self.total_videos)?;
        writeln!(f, "Total posters found: {}", self.total_posters)?;
        writeln!(f, "Complete pairs (video + poster): {}", self.complete_pairs)?;

        if !self.videos_without_posters.is_empty() {
            writeln!(f, "\nVideos without posters:")?;
            for name in &self.videos_without_posters {
                writeln!(f, "- {}", name)?;
            }
        }

        if !self.posters_without_videos.is_empty() {
            writeln!(f, "\nPosters without videos:")?;
            for name in &self.posters_without_videos {
                writeln!(f, "- {}", name)?;
            }
        }

        if !self.unmatched_files.is_empty() {
            writeln!(f, "\nUnmatched files ({}):", self.unmatched_files.len())?;
            for path in &self.unmatched_files {
                writeln!(f, "- {}", path.display())?;
            }
        }

        if self.overwritten.videos > 0 || self.overwritten.posters > 0 {
            writeln!(
                f,
                "\nReplaced by duplicate base names: {} videos, {} posters",
                self.overwritten.videos, self.overwritten.posters
            )?;
        }

        write!(f, "{}", rule)
    }
}

use reelshelf_common::paths::{self, ExtensionSet};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub library: LibraryConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LibraryConfig {
    /// Root directories scanned recursively at startup, in order
    #[serde(default)]
    pub directories: Vec<PathBuf>,

    /// Extensions treated as videos (case-insensitive, leading dot optional)
    #[serde(default = "default_video_extensions")]
    pub video_extensions: Vec<String>,

    /// Extensions treated as posters
    #[serde(default = "default_image_extensions")]
    pub image_extensions: Vec<String>,

    /// Descend into symlinked directories while walking
    #[serde(default = "default_follow_links")]
    pub follow_links: bool,
}

fn default_follow_links() -> bool {
    true
}

fn default_video_extensions() -> Vec<String> {
    paths::video_extensions()
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_image_extensions() -> Vec<String> {
    paths::image_extensions()
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            directories: Vec::new(),
            video_extensions: default_video_extensions(),
            image_extensions: default_image_extensions(),
            follow_links: default_follow_links(),
        }
    }
}

impl LibraryConfig {
    pub fn extension_set(&self) -> ExtensionSet {
        ExtensionSet::new(&self.video_extensions, &self.image_extensions)
    }
}

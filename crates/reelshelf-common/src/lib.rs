//! Reelshelf-Common: Shared types, constants, and utilities.
//!
//! This crate provides the pieces of reelshelf that do not depend on the
//! HTTP layer:
//!
//! - **Core Types**: [`MediaKind`], the two resource kinds a base name can own
//! - **Path Utilities**: extension classification and base-name normalization
//! - **Error Handling**: Common error types and result aliases
//!
//! # Examples
//!
//! ```
//! use reelshelf_common::paths::{base_name, ExtensionSet};
//! use reelshelf_common::{Error, MediaKind, Result};
//! use std::path::Path;
//!
//! let extensions = ExtensionSet::default();
//! assert_eq!(
//!     extensions.classify(Path::new("movie.FHD.mp4")),
//!     Some(MediaKind::Video)
//! );
//! assert_eq!(base_name(Path::new("movie.FHD.mp4")).as_deref(), Some("movie"));
//!
//! fn example() -> Result<()> {
//!     Err(Error::not_found("movie"))
//! }
//! ```

pub mod error;
pub mod paths;
pub mod types;

pub use error::{Error, Result};
pub use types::*;

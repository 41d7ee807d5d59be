//! Format-level knowledge for the ISF preview harness.
//!
//! This crate knows where an ISF fragment shader body comes from (a local
//! file or a plain HTTP fetch) and what the `/*{ ... }*/` metadata block at
//! the top of the file declares. It has no GPU dependency; the renderer
//! consumes the source text produced here.

mod manifest;
mod source;

pub use manifest::{parse_manifest, IsfInput, IsfManifest};
pub use source::{load_source, SourceError};

use std::fmt;
use std::path::{Path, PathBuf};

/// Identifies where a shader body should be loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceHandle {
    Remote(String),
    LocalFile(PathBuf),
}

impl SourceHandle {
    pub fn from_input(input: &str) -> Self {
        if input.starts_with("http://") || input.starts_with("https://") {
            Self::Remote(input.to_string())
        } else {
            Self::LocalFile(PathBuf::from(input))
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self, Self::LocalFile(_))
    }

    pub fn local_path(&self) -> Option<&Path> {
        match self {
            Self::LocalFile(path) => Some(path.as_path()),
            _ => None,
        }
    }
}

impl fmt::Display for SourceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote(url) => f.write_str(url),
            Self::LocalFile(path) => write!(f, "{}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_http_url() {
        assert_eq!(
            SourceHandle::from_input("https://example.com/shader.fs"),
            SourceHandle::Remote("https://example.com/shader.fs".into())
        );
        assert!(!SourceHandle::from_input("http://host/x.fs").is_local());
    }

    #[test]
    fn parses_local_path() {
        assert!(matches!(
            SourceHandle::from_input("shaders/demo.fs"),
            SourceHandle::LocalFile(path) if path == PathBuf::from("shaders/demo.fs")
        ));
    }

    #[test]
    fn displays_the_underlying_location() {
        assert_eq!(
            SourceHandle::from_input("shaders/demo.fs").to_string(),
            "shaders/demo.fs"
        );
    }
}

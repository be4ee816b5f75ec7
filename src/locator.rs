use log::warn;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::LocatorError;

/// Lazily walks a directory tree and yields the absolute paths of regular
/// files whose extension is in the allow-list.
pub struct MediaLocator {
    walker: walkdir::IntoIter,
    extensions: Vec<String>,
}

impl MediaLocator {
    /// `extensions` must already be lowercase without the leading dot.
    /// Matching is case-insensitive. Symlinks are only followed when
    /// `follow_links` is set.
    pub fn new(root: &Path, extensions: &[String], follow_links: bool) -> Result<Self, LocatorError> {
        if !root.exists() {
            return Err(LocatorError::NotFound(root.to_path_buf()));
        }
        if !root.is_dir() {
            return Err(LocatorError::NotADirectory(root.to_path_buf()));
        }

        let root = root.canonicalize().map_err(|source| LocatorError::Resolve {
            path: root.to_path_buf(),
            source,
        })?;

        let walker = WalkDir::new(root)
            .follow_links(follow_links)
            .sort_by_file_name()
            .into_iter();

        Ok(MediaLocator {
            walker,
            extensions: extensions.to_vec(),
        })
    }

    fn matches(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| self.extensions.iter().any(|allowed| ext.eq_ignore_ascii_case(allowed)))
            .unwrap_or(false)
    }
}

impl Iterator for MediaLocator {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        loop {
            let entry = match self.walker.next()? {
                Ok(e) => e,
                Err(err) => {
                    if let Some(path) = err.path() {
                        warn!("Failed to access {}: {}", path.display(), err);
                    } else {
                        warn!("Directory walk error: {}", err);
                    }
                    continue;
                }
            };

            // With follow_links the entry type is already the target's type.
            if !entry.file_type().is_file() {
                continue;
            }

            if self.matches(entry.path()) {
                return Some(entry.into_path());
            }
        }
    }
}

//! Directory ancestry walking
//!
//! Override-file discovery needs to visit a directory and then each of its
//! parents up to the filesystem root. [`Ancestors`] is a finite, cloneable
//! iterator over those directories; cloning it (or calling [`ancestors`]
//! again) restarts the walk from the beginning.

use std::path::{Path, PathBuf};

/// Lazy walk from a starting directory up to the filesystem root.
///
/// The first item is the starting directory itself. Iteration ends once a
/// directory has no parent, or its parent is the directory itself.
#[derive(Debug, Clone)]
pub struct Ancestors {
    next: Option<PathBuf>,
}

/// Starts a walk at `start`.
pub fn ancestors(start: impl Into<PathBuf>) -> Ancestors {
    Ancestors {
        next: Some(start.into()),
    }
}

impl Iterator for Ancestors {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        let current = self.next.take()?;
        self.next = match current.parent() {
            Some(parent) if !parent.as_os_str().is_empty() && parent != current => {
                Some(parent.to_path_buf())
            }
            _ => None,
        };
        Some(current)
    }
}

impl std::iter::FusedIterator for Ancestors {}

/// Finds the nearest directory (starting at `start`) for which `accept`
/// returns `Some`, and returns that value.
pub fn find_upwards<T>(start: &Path, mut accept: impl FnMut(&Path) -> Option<T>) -> Option<T> {
    ancestors(start).find_map(|dir| accept(&dir))
}

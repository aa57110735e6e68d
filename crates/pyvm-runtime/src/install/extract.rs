//! Source archive extraction into a scratch tree
//!
//! `Python-<version>.tgz` unpacks to `<cache>/Python-<version>/`. The
//! scratch tree is owned by a [`ScratchDir`] guard that deletes it on drop,
//! so it is cleaned up whether the pipeline finishes or aborts.

use flate2::read::GzDecoder;
use pyvm_core::{PyvmError, Result};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Scratch extraction directory, removed when dropped
#[derive(Debug)]
pub struct ScratchDir {
    path: PathBuf,
    removed: bool,
}

impl ScratchDir {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Removes the tree now, reporting failure instead of logging it
    pub fn remove(mut self) -> Result<()> {
        self.removed = true;
        remove_tree(&self.path)
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        if self.removed {
            return;
        }
        match remove_tree(&self.path) {
            Ok(()) => tracing::debug!("removed scratch tree {}", self.path.display()),
            Err(e) => tracing::warn!("could not remove scratch tree: {}", e),
        }
    }
}

fn remove_tree(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(PyvmError::io("remove directory", path, e)),
    }
}

/// Scratch root name: the archive file name without its extension
pub fn scratch_root_name(archive_name: &str) -> &str {
    archive_name.strip_suffix(".tgz").unwrap_or(archive_name)
}

/// Unpacks `archive` into `dest_dir`; every entry must lie under `root_name/`
///
/// A stale tree from an earlier interrupted run is removed first.
pub fn extract_source(archive: &Path, dest_dir: &Path, root_name: &str) -> Result<ScratchDir> {
    let scratch = ScratchDir {
        path: dest_dir.join(root_name),
        removed: false,
    };
    remove_tree(scratch.path())?;

    let extraction_error = |reason: String| PyvmError::ExtractionFailed {
        archive: archive.to_path_buf(),
        reason,
    };

    let file = fs::File::open(archive).map_err(|e| PyvmError::io("open archive", archive, e))?;
    let mut tar = tar::Archive::new(GzDecoder::new(file));

    // Safe extraction: iterate entries and use unpack_in() for validation
    for entry in tar.entries().map_err(|e| extraction_error(e.to_string()))? {
        let mut entry = entry.map_err(|e| extraction_error(e.to_string()))?;

        let entry_path = entry
            .path()
            .map_err(|e| extraction_error(e.to_string()))?
            .into_owned();
        if !is_under_root(&entry_path, root_name) {
            return Err(extraction_error(format!(
                "unexpected entry {} outside {}/",
                entry_path.display(),
                root_name
            )));
        }

        entry
            .unpack_in(dest_dir)
            .map_err(|e| extraction_error(e.to_string()))?;
    }

    if !scratch.path().is_dir() {
        return Err(extraction_error(format!("archive has no {}/ directory", root_name)));
    }

    Ok(scratch)
}

fn is_under_root(entry: &Path, root_name: &str) -> bool {
    let mut components = entry
        .components()
        .filter(|c| !matches!(c, Component::CurDir));
    matches!(components.next(), Some(Component::Normal(first)) if first == root_name)
}

//! Shim scripts in `<root>/shims`
//!
//! Each shim asks `pyvm which --raw` for the interpreter the resolver picks
//! right now and execs it, so one static PATH entry follows every `pyvm use`
//! and `.python-version` change without touching PATH again.

use pyvm_core::config::consts;
use pyvm_core::{Config, PyvmError, Result};
use std::io::Read;
use std::path::{Path, PathBuf};

/// How a shim passes its arguments on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Forward {
    /// `<python> "$@"`
    Interpreter,
    /// `<python> -m <module> "$@"`
    Module(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shim {
    pub name: &'static str,
    pub forward: Forward,
}

/// Every alias a shim is generated for
pub const SHIMS: [Shim; 4] = [
    Shim {
        name: "python",
        forward: Forward::Interpreter,
    },
    Shim {
        name: "python3",
        forward: Forward::Interpreter,
    },
    Shim {
        name: "pip",
        forward: Forward::Module("pip"),
    },
    Shim {
        name: "pip3",
        forward: Forward::Module("pip"),
    },
];

/// Header line written into every shim, used to recognise them on PATH
const SHIM_MARKER: &str = "shim generated by";

/// The resolve-and-exec prefix every shim shares
pub fn resolve_invocation() -> String {
    format!("exec \"$({} which --raw)\"", consts::TOOL_NAME)
}

/// Shim script content
pub fn shim_script(shim: &Shim) -> String {
    let forwarded = match shim.forward {
        Forward::Interpreter => "\"$@\"".to_string(),
        Forward::Module(module) => format!("-m {} \"$@\"", module),
    };
    format!(
        "#!/bin/sh\n# {} {} {}\n{} {}\n",
        shim.name,
        SHIM_MARKER,
        consts::TOOL_NAME,
        resolve_invocation(),
        forwarded
    )
}

/// Whether `path` is a script written by [`ShimGenerator`]
///
/// Only the first bytes are read; interpreters are large binaries.
pub fn is_shim(path: &Path) -> bool {
    let Ok(file) = std::fs::File::open(path) else {
        return false;
    };
    let mut head = Vec::with_capacity(128);
    if file.take(128).read_to_end(&mut head).is_err() {
        return false;
    }
    let marker = format!("{} {}", SHIM_MARKER, consts::TOOL_NAME);
    head.starts_with(b"#!") && String::from_utf8_lossy(&head).contains(&marker)
}

pub struct ShimGenerator {
    shims_dir: PathBuf,
}

impl ShimGenerator {
    pub fn new(config: &Config) -> Self {
        Self {
            shims_dir: config.shims_dir(),
        }
    }

    /// Writes (or rewrites) every shim; returns their paths
    ///
    /// The shim directory must exist.
    pub fn write_all(&self) -> Result<Vec<PathBuf>> {
        SHIMS.iter().map(|shim| self.write(shim)).collect()
    }

    fn write(&self, shim: &Shim) -> Result<PathBuf> {
        let path = self.shims_dir.join(shim.name);
        std::fs::write(&path, shim_script(shim))
            .map_err(|e| PyvmError::io("write shim", &path, e))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
                .map_err(|e| PyvmError::io("set permissions on", &path, e))?;
        }

        tracing::debug!("wrote shim {}", path.display());
        Ok(path)
    }
}

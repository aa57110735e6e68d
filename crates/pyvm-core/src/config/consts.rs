//! Fixed names and defaults used across pyvm

/// Name of the binary the shims call back into
pub const TOOL_NAME: &str = "pyvm";

/// Environment variable overriding the root directory
pub const ROOT_ENV_VAR: &str = "PYVM_ROOT";

/// Environment variable overriding the upstream source URL
pub const SOURCE_URL_ENV_VAR: &str = "PYVM_SOURCE_URL";

/// Root directory name under the user's home when no override is set
pub const DEFAULT_ROOT_DIR_NAME: &str = ".pyvm";

/// Directory layout under the root
pub mod layout {
    pub const STATE_FILE: &str = "state.json";
    pub const STATE_LOCK_FILE: &str = "state.lock";
    pub const SETTINGS_FILE: &str = "config.toml";
    pub const CACHE_DIR: &str = "cache";
    pub const RUNTIMES_DIR: &str = "runtimes";
    pub const SHIMS_DIR: &str = "shims";

    /// Every directory created by `pyvm init`
    pub const DIRECTORIES: [&str; 3] = [CACHE_DIR, RUNTIMES_DIR, SHIMS_DIR];
}

/// Per-directory marker pinning a version for a project tree
pub const OVERRIDE_FILE_NAME: &str = ".python-version";

/// Installed runtime directories are named `<prefix><version>`
pub const RUNTIME_DIR_PREFIX: &str = "py-";

/// Upstream source distribution settings
pub mod upstream {
    pub const DEFAULT_SOURCE_URL: &str = "https://www.python.org/ftp/python";
    pub const ARCHIVE_PREFIX: &str = "Python-";
    pub const ARCHIVE_EXTENSION: &str = ".tgz";
}

/// Build defaults
pub mod build {
    pub const DEFAULT_JOBS: u32 = 4;
    pub const DEFAULT_CONFIGURE_OPTIONS: [&str; 1] = ["--enable-optimizations"];
}

/// Network defaults
pub mod network {
    /// Source tarballs are tens of megabytes
    pub const DEFAULT_TIMEOUT_SECS: u64 = 300;
}

/// System interpreter probe
pub mod probe {
    /// Looked up on PATH in this order
    pub const CANDIDATES: [&str; 2] = ["python3", "python"];
    pub const VERSION_FLAG: &str = "--version";
    /// `python --version` prints `Python 3.12.1`
    pub const PRODUCT_PREFIX: &str = "Python";
}

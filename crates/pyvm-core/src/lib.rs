// Core modules
pub mod config;
pub mod error;
pub mod lock;
pub mod path;
pub mod registry;
pub mod state;
pub mod version;

// Re-export commonly used types
pub use config::{Config, Settings};
pub use error::{PyvmError, Result};
pub use registry::RuntimeRegistry;
pub use state::{PersistedState, StateStore};
pub use version::RuntimeVersion;

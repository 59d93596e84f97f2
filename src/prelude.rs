//! Convenient imports for envsettings.
//!
//! ```ignore
//! use envsettings::prelude::*;
//!
//! let settings = Settings::open("deploy")?;
//! let owner = settings.must_get_address("owner")?;
//! ```

// Main entry point
pub use crate::settings::{Settings, SettingsBuilder, SettingsOptions};

// Error handling
pub use crate::error::{Error, Result};

// Components
pub use crate::reader::Reader;
pub use crate::store::Store;

// Collaborators
pub use crate::address::AddressValidator;
pub use crate::environment::EnvironmentProvider;
pub use crate::fs::{FileSystem, MemoryFileSystem};

// Re-export serde_json for convenience
pub use serde_json::{json, Value};

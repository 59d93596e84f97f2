//! # envsettings
//!
//! Namespaced, per-environment JSON settings stored on disk.
//!
//! Every document lives at
//!
//! ```text
//! <base>/<environment>/<file>.json
//! <base>/<environment>/<tag>/<file>.json
//! ```
//!
//! and is accessed through three layers:
//!
//! - [`Store`] - resolves the namespace to a path, loads the document lazily
//!   (once) and persists every write immediately
//! - [`Reader`] - immutable snapshot with `get`/`must_get` lookups, nested
//!   readers, dotted paths, typed and address lookups
//! - [`Settings`] - the facade: reads through the current reader, writes
//!   through the store, and swaps in a fresh reader after each write
//!
//! ## Quick Start
//!
//! ```ignore
//! use envsettings::prelude::*;
//!
//! let mut settings = Settings::builder()
//!     .environment("local")
//!     .file("deploy")
//!     .open()?;
//!
//! settings.set("owner", "0x52908400098527886E0F7030069857D2E4169EE7")?;
//! let owner = settings.must_get_address("owner")?;
//! let retries = settings.get_or("retries", 3);
//!
//! for tag in settings.list_tags()? {
//!     let tagged = settings.with_tag(&tag)?;
//!     println!("{}: {:?}", tag, tagged.get("owner"));
//! }
//! ```
//!
//! ## Missing values
//!
//! Lookups treat `null`, `false`, `""` and `0` exactly like an absent key
//! (see [`is_missing`]). Use `get_or` for optional settings and the
//! `must_*` family for required ones.
//!
//! ## Limitations
//!
//! Writes are not atomic and writers sharing a file are not coordinated:
//! the last write wins.

#![warn(missing_docs)]

pub mod address;
pub mod environment;
mod error;
pub mod fs;
mod reader;
mod settings;
mod store;
mod types;
mod value;

pub mod prelude;

// Re-export main entry points
pub use settings::{Settings, SettingsBuilder, SettingsOptions};
pub use error::{Error, Result};

// Re-export components
pub use reader::Reader;
pub use store::Store;

// Re-export types
pub use address::{is_evm_address, AddressValidator};
pub use environment::{EnvVarEnvironment, EnvironmentProvider, FixedEnvironment};
pub use fs::{FileSystem, MemoryFileSystem, OsFileSystem};
pub use types::{NamespaceKey, DEFAULT_BASE_PATH, DEFAULT_FILE_NAME, FILE_EXTENSION};
pub use value::is_missing;

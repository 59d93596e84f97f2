//! Main entry point for envsettings.
//!
//! [`Settings`] binds a [`Store`] and a [`Reader`] to one namespace. Reads go
//! to the reader, writes go to the store and then replace the reader with a
//! fresh snapshot of the updated document.

use crate::address::AddressValidator;
use crate::environment::{EnvVarEnvironment, EnvironmentProvider};
use crate::error::{Error, Result};
use crate::fs::{FileSystem, MemoryFileSystem, OsFileSystem};
use crate::reader::Reader;
use crate::store::Store;
use crate::types::{NamespaceKey, DEFAULT_BASE_PATH, DEFAULT_FILE_NAME};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Settings for one (environment, tag, file name) namespace.
///
/// Construction reads the document right away. Namespace transitions
/// ([`Settings::with_tag`], [`Settings::with_file`]) return a new instance
/// and leave the original untouched.
///
/// # Example
///
/// ```ignore
/// use envsettings::prelude::*;
///
/// let mut settings = Settings::builder()
///     .environment("local")
///     .file("deploy")
///     .open()?;
///
/// settings.set("owner", "0x52908400098527886E0F7030069857D2E4169EE7")?;
/// let owner = settings.must_get_address("owner")?;
///
/// let staging = settings.with_tag("staging")?;
/// let retries = staging.get_or("retries", 3);
/// ```
pub struct Settings {
    file_name: String,
    tag: Option<String>,
    options: SettingsOptions,
    store: Store,
    reader: Reader,
}

impl Settings {
    /// Open `file_name` (optionally under `tag`) with the given options.
    ///
    /// Fails with [`Error::Config`] if `file_name` is empty or no
    /// environment can be resolved, and with [`Error::Parse`] if the
    /// existing document is not a JSON object.
    pub fn new(file_name: &str, tag: Option<&str>, options: SettingsOptions) -> Result<Self> {
        if file_name.is_empty() {
            return Err(Error::config("file name is required"));
        }
        let environment = options.resolve_environment()?;
        let key = NamespaceKey::new(environment, tag.map(String::from), file_name)?;

        let mut store = Store::new(
            key,
            options.base_path.clone(),
            Arc::clone(&options.file_system),
        );
        let reader = Reader::from_parts(store.document()?, options.address_validator.clone());

        Ok(Self {
            file_name: file_name.to_string(),
            tag: tag.map(String::from),
            options,
            store,
            reader,
        })
    }

    /// Open `file_name` with default options.
    pub fn open(file_name: &str) -> Result<Self> {
        Self::for_file(file_name)
    }

    /// Create a builder.
    pub fn builder() -> SettingsBuilder {
        SettingsBuilder::new()
    }

    /// The default `settings` file under `tag`, with default options.
    pub fn for_tag(tag: &str) -> Result<Self> {
        Self::for_tag_with(tag, SettingsOptions::default())
    }

    /// `file_name` without a tag, with default options.
    pub fn for_file(file_name: &str) -> Result<Self> {
        Self::for_file_with(file_name, SettingsOptions::default())
    }

    /// Tags available for the default namespace, with default options.
    pub fn default_tags() -> Result<Vec<String>> {
        Self::default_tags_with(SettingsOptions::default())
    }

    pub(crate) fn for_tag_with(tag: &str, options: SettingsOptions) -> Result<Self> {
        Self::new(DEFAULT_FILE_NAME, Some(tag), options)
    }

    pub(crate) fn for_file_with(file_name: &str, options: SettingsOptions) -> Result<Self> {
        Self::new(file_name, None, options)
    }

    pub(crate) fn default_tags_with(options: SettingsOptions) -> Result<Vec<String>> {
        Self::new(DEFAULT_FILE_NAME, None, options)?.list_tags()
    }

    /// Same file and options, different tag.
    pub fn with_tag(&self, tag: &str) -> Result<Self> {
        Self::new(&self.file_name, Some(tag), self.options.clone())
    }

    /// Same file and options, no tag.
    pub fn without_tag(&self) -> Result<Self> {
        Self::new(&self.file_name, None, self.options.clone())
    }

    /// Same tag and options, different file.
    pub fn with_file(&self, file_name: &str) -> Result<Self> {
        Self::new(file_name, self.tag.as_deref(), self.options.clone())
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Assign `value` to the top-level `key` and persist it.
    ///
    /// Readers obtained before the call keep seeing the old document.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> Result<()> {
        self.store.set(key, value.into())?;
        self.rebuild_reader()
    }

    /// Re-read the document from disk.
    pub fn refresh(&mut self) -> Result<()> {
        self.store.refresh()?;
        self.rebuild_reader()
    }

    fn rebuild_reader(&mut self) -> Result<()> {
        self.reader = Reader::from_parts(
            self.store.document()?,
            self.options.address_validator.clone(),
        );
        Ok(())
    }

    /// Tag directories under this namespace's environment.
    pub fn list_tags(&self) -> Result<Vec<String>> {
        self.store.list_tags()
    }

    // =========================================================================
    // Namespace info
    // =========================================================================

    /// Logical document name.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Tag, if any.
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Resolved environment name.
    pub fn environment(&self) -> &str {
        self.store.key().environment()
    }

    /// Full path of the backing document.
    pub fn path(&self) -> PathBuf {
        self.store.path()
    }

    /// Options this instance was opened with.
    pub fn options(&self) -> &SettingsOptions {
        &self.options
    }

    /// Current snapshot reader. Clone it to keep a view that outlives
    /// later writes.
    pub fn reader(&self) -> &Reader {
        &self.reader
    }

    // =========================================================================
    // Reads (delegated to the current reader)
    // =========================================================================

    /// See [`Reader::get`].
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.reader.get(key)
    }

    /// See [`Reader::get_or`].
    pub fn get_or(&self, key: &str, default: impl Into<Value>) -> Value {
        self.reader.get_or(key, default)
    }

    /// See [`Reader::must_get`].
    pub fn must_get(&self, key: &str) -> Result<&Value> {
        self.reader.must_get(key)
    }

    /// See [`Reader::get_reader`].
    pub fn get_reader(&self, key: &str) -> Reader {
        self.reader.get_reader(key)
    }

    /// See [`Reader::get_reader_or`].
    pub fn get_reader_or(&self, key: &str, default: impl Into<Value>) -> Reader {
        self.reader.get_reader_or(key, default)
    }

    /// See [`Reader::must_get_reader`].
    pub fn must_get_reader(&self, key: &str) -> Result<Reader> {
        self.reader.must_get_reader(key)
    }

    /// See [`Reader::must_get_address`].
    pub fn must_get_address(&self, key: &str) -> Result<&str> {
        self.reader.must_get_address(key)
    }

    /// See [`Reader::get_path`].
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        self.reader.get_path(path)
    }

    /// See [`Reader::must_get_path`].
    pub fn must_get_path(&self, path: &str) -> Result<&Value> {
        self.reader.must_get_path(path)
    }

    /// See [`Reader::get_as`].
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        self.reader.get_as(key)
    }

    /// See [`Reader::must_get_as`].
    pub fn must_get_as<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        self.reader.must_get_as(key)
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("store", &self.store)
            .field("options", &self.options)
            .finish()
    }
}

/// Options shared by every namespace opened from the same root.
#[derive(Clone)]
pub struct SettingsOptions {
    /// Root directory of all namespaces.
    pub base_path: PathBuf,
    /// Explicit environment name. Takes precedence over the provider.
    pub environment: Option<String>,
    /// Consulted when `environment` is `None`.
    pub environment_provider: Arc<dyn EnvironmentProvider>,
    /// Predicate for `must_get_address`. `None` makes it fail.
    pub address_validator: Option<AddressValidator>,
    /// Where documents are read from and written to.
    pub file_system: Arc<dyn FileSystem>,
}

impl SettingsOptions {
    /// Explicit environment if set, otherwise the provider's answer.
    pub fn resolve_environment(&self) -> Result<String> {
        let name = match &self.environment {
            Some(name) => name.clone(),
            None => self.environment_provider.environment_name(),
        };
        if name.is_empty() {
            return Err(Error::config(
                "environment name could not be resolved; set it explicitly or via the provider",
            ));
        }
        Ok(name)
    }
}

impl Default for SettingsOptions {
    fn default() -> Self {
        Self {
            base_path: PathBuf::from(DEFAULT_BASE_PATH),
            environment: None,
            environment_provider: Arc::new(EnvVarEnvironment::default()),
            address_validator: Some(AddressValidator::evm()),
            file_system: Arc::new(OsFileSystem),
        }
    }
}

impl fmt::Debug for SettingsOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettingsOptions")
            .field("base_path", &self.base_path)
            .field("environment", &self.environment)
            .field("address_validator", &self.address_validator.is_some())
            .finish()
    }
}

/// Builder for [`Settings`].
///
/// ```ignore
/// // On disk, explicit environment
/// let settings = Settings::builder()
///     .base_path("./config")
///     .environment("mainnet")
///     .file("deploy")
///     .tag("v2")
///     .open()?;
///
/// // Unit testing: nothing touches the disk
/// let settings = Settings::builder()
///     .environment("local")
///     .in_memory()
///     .open()?;
/// ```
#[derive(Debug, Clone)]
pub struct SettingsBuilder {
    file_name: String,
    tag: Option<String>,
    options: SettingsOptions,
}

impl SettingsBuilder {
    /// Default file name, no tag, default options.
    pub fn new() -> Self {
        Self {
            file_name: DEFAULT_FILE_NAME.to_string(),
            tag: None,
            options: SettingsOptions::default(),
        }
    }

    /// Document name (without `.json`).
    pub fn file(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    /// Tag directory.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Root directory of all namespaces.
    pub fn base_path(mut self, path: impl AsRef<Path>) -> Self {
        self.options.base_path = path.as_ref().to_path_buf();
        self
    }

    /// Explicit environment name.
    pub fn environment(mut self, name: impl Into<String>) -> Self {
        self.options.environment = Some(name.into());
        self
    }

    /// Source of the environment name when none is set explicitly.
    pub fn environment_provider(mut self, provider: impl EnvironmentProvider + 'static) -> Self {
        self.options.environment_provider = Arc::new(provider);
        self
    }

    /// Predicate for `must_get_address`.
    pub fn address_validator<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.options.address_validator = Some(AddressValidator::new(predicate));
        self
    }

    /// Disable address validation; `must_get_address` then fails.
    pub fn no_address_validator(mut self) -> Self {
        self.options.address_validator = None;
        self
    }

    /// File-system handle.
    pub fn file_system(mut self, fs: Arc<dyn FileSystem>) -> Self {
        self.options.file_system = fs;
        self
    }

    /// Keep documents in a fresh [`MemoryFileSystem`].
    pub fn in_memory(self) -> Self {
        self.file_system(Arc::new(MemoryFileSystem::new()))
    }

    /// The options assembled so far.
    pub fn options(&self) -> &SettingsOptions {
        &self.options
    }

    /// Open the settings.
    pub fn open(self) -> Result<Settings> {
        Settings::new(&self.file_name, self.tag.as_deref(), self.options)
    }
}

impl Default for SettingsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

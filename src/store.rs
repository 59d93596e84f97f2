//! JSON document store for one namespace.
//!
//! A [`Store`] maps a [`NamespaceKey`] to a single file:
//!
//! ```text
//! <base>/<environment>/<file_name>.json          (no tag)
//! <base>/<environment>/<tag>/<file_name>.json    (tagged)
//! ```
//!
//! The document is loaded lazily on first access and at most once until
//! [`Store::refresh`] is called. Every [`Store::set`] rewrites the whole
//! file immediately.
//!
//! ## Limitations
//!
//! - Writes are not atomic. A crash in the middle of a write can leave a
//!   truncated document behind.
//! - Stores pointing at the same file are not coordinated. Concurrent
//!   writers (in-process or across processes) lose updates: the last write
//!   wins.

use crate::error::{Error, Result};
use crate::fs::FileSystem;
use crate::types::NamespaceKey;
use crate::value::type_name;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Indentation used when persisting documents.
const INDENT: &[u8] = b"    ";

/// Lazily loaded, eagerly persisted settings document.
pub struct Store {
    key: NamespaceKey,
    base_path: PathBuf,
    fs: Arc<dyn FileSystem>,
    /// `None` until the first load.
    document: Option<Arc<Value>>,
}

impl Store {
    /// Create a store. No I/O happens until the document is first needed.
    pub fn new(key: NamespaceKey, base_path: impl Into<PathBuf>, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            key,
            base_path: base_path.into(),
            fs,
            document: None,
        }
    }

    /// Namespace this store serves.
    pub fn key(&self) -> &NamespaceKey {
        &self.key
    }

    /// Root directory of all namespaces.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Directory holding the document.
    pub fn directory(&self) -> PathBuf {
        self.key.directory(&self.base_path)
    }

    /// Full path of the document file.
    pub fn path(&self) -> PathBuf {
        self.key.document_path(&self.base_path)
    }

    /// Whether the document has been read since construction.
    pub fn is_loaded(&self) -> bool {
        self.document.is_some()
    }

    /// Current document, loading it first if needed.
    ///
    /// The returned value is always a JSON object. It is a snapshot: later
    /// calls to [`Store::set`] do not change it.
    pub fn document(&mut self) -> Result<Arc<Value>> {
        if let Some(doc) = &self.document {
            return Ok(Arc::clone(doc));
        }
        self.load()
    }

    /// Re-read the document from disk, discarding the in-memory copy.
    pub fn refresh(&mut self) -> Result<()> {
        debug!(namespace = %self.key, "Refreshing settings document");
        self.load()?;
        Ok(())
    }

    /// Assign `value` to the top-level `key` and persist the document.
    pub fn set(&mut self, key: &str, value: Value) -> Result<()> {
        let current = self.document()?;

        // Snapshots handed out earlier keep their content; the in-memory
        // document only changes once the write has succeeded.
        let mut doc = Value::clone(&current);
        match &mut doc {
            Value::Object(map) => {
                map.insert(key.to_string(), value);
            }
            other => {
                return Err(Error::Parse {
                    path: self.path(),
                    message: format!("document root is {}, expected object", type_name(other)),
                })
            }
        }

        self.write(&doc)?;
        self.document = Some(Arc::new(doc));
        debug!(namespace = %self.key, key, "Persisted settings value");
        Ok(())
    }

    /// Names of the tag directories beneath the environment root.
    ///
    /// Fails with the underlying `NotFound` error when the environment
    /// directory itself does not exist.
    pub fn list_tags(&self) -> Result<Vec<String>> {
        let root = self.key.environment_dir(&self.base_path);
        Ok(self.fs.list_dirs(&root)?)
    }

    fn load(&mut self) -> Result<Arc<Value>> {
        let doc = Arc::new(self.read_document()?);
        self.document = Some(Arc::clone(&doc));
        Ok(doc)
    }

    fn read_document(&self) -> Result<Value> {
        let path = self.path();
        match self.fs.read_to_string(&path) {
            Ok(text) => {
                debug!(path = %path.display(), "Loaded settings document");
                parse_document(&path, &text)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No settings document, starting empty");
                Ok(Value::Object(Map::new()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, doc: &Value) -> Result<()> {
        self.ensure_directory()?;

        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(INDENT);
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        doc.serialize(&mut ser)?;
        let text = String::from_utf8(buf).map_err(|e| Error::Serialization(e.to_string()))?;

        self.fs.write(&self.path(), &text)?;
        Ok(())
    }

    fn ensure_directory(&self) -> Result<()> {
        let dir = self.directory();
        if self.fs.exists(&dir) {
            return Ok(());
        }
        match self.fs.create_dir_all(&dir) {
            Ok(()) => {
                info!(path = %dir.display(), "Created settings directory");
                Ok(())
            }
            // Another writer created it between the check and the call.
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists && self.fs.exists(&dir) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("key", &self.key)
            .field("base_path", &self.base_path)
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

fn parse_document(path: &Path, text: &str) -> Result<Value> {
    let value: Value = serde_json::from_str(text).map_err(|e| Error::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    if !value.is_object() {
        return Err(Error::Parse {
            path: path.to_path_buf(),
            message: format!("document root is {}, expected object", type_name(&value)),
        });
    }
    Ok(value)
}

//! Namespace identity and path resolution.

use crate::error::{Error, Result};
use std::fmt;
use std::path::{Path, PathBuf};

/// Default root directory for all namespaces.
pub const DEFAULT_BASE_PATH: &str = "./settings";

/// File name used by the static constructors.
pub const DEFAULT_FILE_NAME: &str = "settings";

/// Extension of every settings document.
pub const FILE_EXTENSION: &str = "json";

/// The (environment, tag, file name) triple identifying one document.
///
/// Components are validated on construction so that distinct triples always
/// resolve to distinct paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamespaceKey {
    environment: String,
    tag: Option<String>,
    file_name: String,
}

impl NamespaceKey {
    /// Build a key, rejecting empty or path-like components.
    pub fn new(
        environment: impl Into<String>,
        tag: Option<String>,
        file_name: impl Into<String>,
    ) -> Result<Self> {
        let environment = environment.into();
        let file_name = file_name.into();

        if file_name.is_empty() {
            return Err(Error::config("file name is required"));
        }
        validate_component("file name", &file_name)?;
        if environment.is_empty() {
            return Err(Error::config("environment name is required"));
        }
        validate_component("environment", &environment)?;
        if let Some(tag) = &tag {
            validate_component("tag", tag)?;
        }

        Ok(Self {
            environment,
            tag,
            file_name,
        })
    }

    /// Environment name.
    pub fn environment(&self) -> &str {
        &self.environment
    }

    /// Tag, if any.
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Logical document name, without extension.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// `<base>/<environment>`
    pub fn environment_dir(&self, base: &Path) -> PathBuf {
        base.join(&self.environment)
    }

    /// `<base>/<environment>` or `<base>/<environment>/<tag>`
    pub fn directory(&self, base: &Path) -> PathBuf {
        let dir = self.environment_dir(base);
        match &self.tag {
            Some(tag) => dir.join(tag),
            None => dir,
        }
    }

    /// `<directory>/<file_name>.json`
    pub fn document_path(&self, base: &Path) -> PathBuf {
        self.directory(base)
            .join(format!("{}.{}", self.file_name, FILE_EXTENSION))
    }
}

impl fmt::Display for NamespaceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.tag {
            Some(tag) => write!(f, "{}/{}/{}", self.environment, tag, self.file_name),
            None => write!(f, "{}/{}", self.environment, self.file_name),
        }
    }
}

fn validate_component(what: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::config(format!("{} must not be empty", what)));
    }
    if value == "." || value == ".." {
        return Err(Error::config(format!("{} must not be '{}'", what, value)));
    }
    if value.contains('/') || value.contains('\\') || value.contains('\0') {
        return Err(Error::config(format!(
            "{} must not contain a path separator: {:?}",
            what, value
        )));
    }
    Ok(())
}

//! Read-only view over a settings snapshot.
//!
//! A [`Reader`] wraps an immutable JSON value. Lookups never touch the disk
//! and there is no way to write through a reader: mutation lives on
//! [`Settings`](crate::Settings), which always goes through the store.
//!
//! # Missing values
//!
//! Every lookup applies [`is_missing`]: absent keys, `null`, `false`, `""`
//! and zero all count as "not configured". `get` returns `None` for them,
//! `must_get` fails with [`Error::MissingKey`].
//!
//! # Example
//!
//! ```
//! use envsettings::Reader;
//! use serde_json::json;
//!
//! let reader = Reader::new(json!({"db": {"host": "localhost", "port": 0}}));
//! let db = reader.must_get_reader("db").unwrap();
//! assert_eq!(db.must_get("host").unwrap(), "localhost");
//! assert_eq!(db.get_or("port", 5432), json!(5432));
//! ```

use crate::address::AddressValidator;
use crate::error::{Error, Result};
use crate::value::{is_missing, type_name};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

/// Immutable, cheaply clonable settings view.
#[derive(Debug, Clone)]
pub struct Reader {
    data: Arc<Value>,
    validator: Option<AddressValidator>,
}

impl Reader {
    /// Wrap a value. The reader has no address validator.
    pub fn new(data: impl Into<Arc<Value>>) -> Self {
        Self {
            data: data.into(),
            validator: None,
        }
    }

    /// Install the predicate used by [`Reader::must_get_address`].
    pub fn with_validator(mut self, validator: AddressValidator) -> Self {
        self.validator = Some(validator);
        self
    }

    pub(crate) fn from_parts(data: Arc<Value>, validator: Option<AddressValidator>) -> Self {
        Self { data, validator }
    }

    /// Nested readers inherit the validator.
    fn child(&self, data: Value) -> Self {
        Self {
            data: Arc::new(data),
            validator: self.validator.clone(),
        }
    }

    /// The whole snapshot.
    pub fn value(&self) -> &Value {
        &self.data
    }

    /// Top-level keys. Empty when the snapshot is not an object.
    pub fn keys(&self) -> Vec<&str> {
        match self.data.as_ref() {
            Value::Object(map) => map.keys().map(String::as_str).collect(),
            _ => Vec::new(),
        }
    }

    /// Value at `key`, or `None` if it is missing.
    pub fn get(&self, key: &str) -> Option<&Value> {
        let value = self.data.get(key);
        if is_missing(value) {
            None
        } else {
            value
        }
    }

    /// Value at `key`, or `default` if it is missing.
    pub fn get_or(&self, key: &str, default: impl Into<Value>) -> Value {
        match self.get(key) {
            Some(value) => value.clone(),
            None => default.into(),
        }
    }

    /// Value at `key`, failing with [`Error::MissingKey`] if it is missing.
    pub fn must_get(&self, key: &str) -> Result<&Value> {
        self.get(key).ok_or_else(|| Error::MissingKey(key.to_string()))
    }

    /// Reader scoped to the value at `key`.
    ///
    /// A missing key yields a reader over `null`, on which every lookup is
    /// missing as well.
    pub fn get_reader(&self, key: &str) -> Reader {
        self.child(self.get(key).cloned().unwrap_or(Value::Null))
    }

    /// Reader scoped to the value at `key`, or to `default` if it is missing.
    pub fn get_reader_or(&self, key: &str, default: impl Into<Value>) -> Reader {
        self.child(self.get_or(key, default))
    }

    /// Reader scoped to the value at `key`, failing if it is missing.
    pub fn must_get_reader(&self, key: &str) -> Result<Reader> {
        let value = self.must_get(key)?.clone();
        Ok(self.child(value))
    }

    /// String at `key` that passes the address validator.
    pub fn must_get_address(&self, key: &str) -> Result<&str> {
        let value = self.must_get(key)?;
        let address = value.as_str().ok_or_else(|| {
            Error::invalid_format(key, format!("expected string, got {}", type_name(value)))
        })?;
        let validator = self
            .validator
            .as_ref()
            .ok_or_else(|| Error::config("no address validator configured"))?;
        if !validator.is_valid(address) {
            return Err(Error::invalid_format(
                key,
                format!("{:?} is not a valid address", address),
            ));
        }
        Ok(address)
    }

    /// Value at a dotted path such as `"db.replicas.0.host"`.
    ///
    /// Object segments are keys, array segments are indices. Only the final
    /// value is checked with [`is_missing`].
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        let mut current = self.data.as_ref();
        for segment in path.split('.') {
            current = match current {
                Value::Object(map) => map.get(segment)?,
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        if is_missing(Some(current)) {
            None
        } else {
            Some(current)
        }
    }

    /// Value at a dotted path, failing with [`Error::MissingKey`] if it is missing.
    pub fn must_get_path(&self, path: &str) -> Result<&Value> {
        self.get_path(path)
            .ok_or_else(|| Error::MissingKey(path.to_string()))
    }

    /// Deserialize the value at `key`. `Ok(None)` if it is missing.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get(key) {
            Some(value) => deserialize(key, value).map(Some),
            None => Ok(None),
        }
    }

    /// Deserialize the value at `key`, failing if it is missing.
    pub fn must_get_as<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        deserialize(key, self.must_get(key)?)
    }
}

fn deserialize<T: DeserializeOwned>(key: &str, value: &Value) -> Result<T> {
    T::deserialize(value).map_err(|e| Error::invalid_format(key, e.to_string()))
}

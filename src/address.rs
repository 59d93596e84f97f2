//! Address-format validation for [`Reader::must_get_address`](crate::Reader::must_get_address).

use std::fmt;
use std::sync::Arc;

/// Shared predicate deciding whether a string is a well-formed address.
#[derive(Clone)]
pub struct AddressValidator(Arc<dyn Fn(&str) -> bool + Send + Sync>);

impl AddressValidator {
    /// Wrap a predicate.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self(Arc::new(predicate))
    }

    /// Validator using [`is_evm_address`].
    pub fn evm() -> Self {
        Self::new(is_evm_address)
    }

    /// Run the predicate.
    pub fn is_valid(&self, value: &str) -> bool {
        (self.0)(value)
    }
}

impl fmt::Debug for AddressValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AddressValidator(..)")
    }
}

/// `0x` followed by exactly 40 hexadecimal digits (either case).
///
/// Checksum casing is not verified.
pub fn is_evm_address(value: &str) -> bool {
    let hex = match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => hex,
        None => return false,
    };
    hex.len() == 40 && hex.bytes().all(|b| b.is_ascii_hexdigit())
}

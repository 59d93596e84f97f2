//! Environment name resolution.
//!
//! When no environment is given explicitly, the settings facade asks an
//! [`EnvironmentProvider`] for the name of the environment the host is
//! running against.

use std::env;

/// Environment variable read by [`EnvVarEnvironment::default`].
pub const ENVIRONMENT_VAR: &str = "ENVSETTINGS_ENV";

/// Source of the current environment name.
pub trait EnvironmentProvider: Send + Sync {
    /// Current environment name. An empty string means "unknown".
    fn environment_name(&self) -> String;
}

impl<F> EnvironmentProvider for F
where
    F: Fn() -> String + Send + Sync,
{
    fn environment_name(&self) -> String {
        self()
    }
}

/// Reads the environment name from a process environment variable.
#[derive(Debug, Clone)]
pub struct EnvVarEnvironment {
    var: String,
}

impl EnvVarEnvironment {
    /// Read from the given variable.
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }

    /// Name of the variable consulted.
    pub fn var(&self) -> &str {
        &self.var
    }
}

impl Default for EnvVarEnvironment {
    fn default() -> Self {
        Self::new(ENVIRONMENT_VAR)
    }
}

impl EnvironmentProvider for EnvVarEnvironment {
    fn environment_name(&self) -> String {
        env::var(&self.var).unwrap_or_default()
    }
}

/// Always reports the same environment.
#[derive(Debug, Clone)]
pub struct FixedEnvironment(
    /// Environment name.
    pub String,
);

impl EnvironmentProvider for FixedEnvironment {
    fn environment_name(&self) -> String {
        self.0.clone()
    }
}

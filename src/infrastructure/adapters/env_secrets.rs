//! Environment variable secret source
//!
//! Local mode: every secret is the environment variable of the same name.
//! There is no fallback and no default value.

use crate::{domain::secrets::SecretSource, shared::error::ConfigurationError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::ffi::OsString;

type Lookup = dyn Fn(&str) -> Option<OsString> + Send + Sync;

/// Secret source backed by environment variables
pub struct EnvSecretSource {
    lookup: Box<Lookup>,
}

impl EnvSecretSource {
    /// Read from the live process environment
    pub fn from_process() -> Self {
        Self {
            lookup: Box::new(|key| std::env::var_os(key)),
        }
    }

    /// Read from a fixed set of variables instead of the process environment
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars: HashMap<String, OsString> = pairs
            .into_iter()
            .map(|(key, value)| (key.into(), OsString::from(value.into())))
            .collect();
        Self {
            lookup: Box::new(move |key| vars.get(key).cloned()),
        }
    }
}

#[async_trait]
impl SecretSource for EnvSecretSource {
    async fn resolve(&self, secret_id: &str) -> Result<String, ConfigurationError> {
        let value = (self.lookup)(secret_id).ok_or_else(|| ConfigurationError::MissingVariable {
            secret_id: secret_id.to_string(),
        })?;

        value
            .into_string()
            .map_err(|_| ConfigurationError::invalid(secret_id, "value is not valid unicode"))
    }

    fn name(&self) -> &'static str {
        "environment"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_resolves_set_variable() {
        let source = EnvSecretSource::from_pairs([("PORTFOLIO_SECRET_KEY", "s3cr3t")]);
        assert_eq!(source.resolve("PORTFOLIO_SECRET_KEY").await.unwrap(), "s3cr3t");
    }

    #[tokio::test]
    async fn test_empty_value_is_present() {
        let source = EnvSecretSource::from_pairs([("PORTFOLIO_EMAIL_HOST_PASSWORD", "")]);
        assert_eq!(source.resolve("PORTFOLIO_EMAIL_HOST_PASSWORD").await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_missing_variable_is_an_error() {
        let source = EnvSecretSource::from_pairs(Vec::<(String, String)>::new());
        let err = source.resolve("PORTFOLIO_DEBUG").await.unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::MissingVariable {
                secret_id: "PORTFOLIO_DEBUG".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_process_environment_lookup() {
        // PATH is set in any test environment
        let source = EnvSecretSource::from_process();
        assert!(source.resolve("PATH").await.is_ok());
        assert!(source
            .resolve("PORTFOLIO_TEST_VARIABLE_THAT_IS_NEVER_SET")
            .await
            .is_err());
    }
}

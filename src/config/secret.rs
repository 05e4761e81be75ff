//! Secret values held in configuration and credentials
//!
//! Client secrets and connection strings are wrapped in `secrecy::Secret`,
//! which zeroes memory on drop and redacts `Debug` output. The value is
//! only reachable through `expose_secret()`.
//!
//! ```rust
//! use alvys_etl::config::secret_string;
//! use secrecy::ExposeSecret;
//!
//! let secret = secret_string("client-secret".to_string());
//! assert_eq!(secret.expose_secret().as_ref(), "client-secret");
//! assert!(!format!("{secret:?}").contains("client-secret"));
//! ```

use secrecy::{CloneableSecret, DebugSecret, Secret, SerializableSecret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroize;

/// String newtype that satisfies the `secrecy` marker traits
#[derive(Clone, Debug, Zeroize)]
#[zeroize(drop)]
pub struct SecretValue(String);

impl CloneableSecret for SecretValue {}
impl DebugSecret for SecretValue {}
impl SerializableSecret for SecretValue {}

impl From<String> for SecretValue {
    fn from(s: String) -> Self {
        SecretValue(s)
    }
}

impl PartialEq<str> for SecretValue {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl AsRef<str> for SecretValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl SecretValue {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check if the secret value starts with a prefix
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.0.starts_with(prefix)
    }

    /// Parse the secret value into another type
    pub fn parse<F: std::str::FromStr>(&self) -> Result<F, F::Err> {
        self.0.parse()
    }
}

impl Serialize for SecretValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SecretValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(SecretValue)
    }
}

/// A zeroizing, redacted string
pub type SecretString = Secret<SecretValue>;

/// Wraps a plain string
#[inline]
pub fn secret_string(value: String) -> SecretString {
    Secret::new(SecretValue::from(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_secret_string_creation() {
        let secret = secret_string("client-secret".to_string());
        assert_eq!(secret.expose_secret(), "client-secret");
    }

    #[test]
    fn test_secret_debug_redacted() {
        let secret = secret_string("postgres://etl:hunter2@db/wh".to_string());
        let debug_output = format!("{secret:?}");

        assert!(!debug_output.contains("hunter2"));
        assert!(debug_output.contains("REDACTED") || debug_output.contains("Secret"));
    }

    #[test]
    fn test_secret_prefix_check() {
        let secret = secret_string("postgresql://etl@db/wh".to_string());
        assert!(secret.expose_secret().starts_with("postgresql://"));
        assert!(!secret.expose_secret().starts_with("mysql://"));
    }

    #[test]
    fn test_secret_deserializes_from_toml() {
        #[derive(Deserialize)]
        struct Tenant {
            client_secret: SecretString,
        }

        let tenant: Tenant = toml::from_str("client_secret = \"abc123\"").unwrap();
        assert_eq!(tenant.client_secret.expose_secret(), "abc123");
        assert!(!tenant.client_secret.expose_secret().is_empty());
    }

    #[test]
    fn test_secret_parses_connection_config() {
        let secret = secret_string("host=localhost user=etl".to_string());
        let parsed: tokio_postgres::Config = secret.expose_secret().parse().unwrap();
        assert_eq!(parsed.get_user(), Some("etl"));
    }
}

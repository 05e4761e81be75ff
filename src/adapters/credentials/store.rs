//! Credential store trait and the config/env implementations

use crate::config::schema::default_grant_type;
use crate::config::{secret_string, SecretString, TenantConfig};
use crate::domain::{AlvysError, Result};
use async_trait::async_trait;

/// OAuth client credentials for one tenant
#[derive(Debug, Clone)]
pub struct TenantCredentials {
    pub tenant_id: String,
    pub client_id: String,
    pub client_secret: SecretString,
    pub grant_type: String,
}

/// Upper-cased, trimmed SCAC used as the lookup key
pub fn normalize_scac(scac: &str) -> String {
    scac.trim().to_uppercase()
}

/// Source of tenant credentials
///
/// Implementations receive an already normalized SCAC and return
/// [`AlvysError::CredentialNotFound`] when the tenant is unknown.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn lookup(&self, scac: &str) -> Result<TenantCredentials>;

    /// Short name used in logs
    fn name(&self) -> &'static str;
}

/// Tenants listed under `[[credentials.tenants]]`
pub struct ConfigCredentialStore {
    tenants: Vec<TenantConfig>,
}

impl ConfigCredentialStore {
    pub fn new(tenants: Vec<TenantConfig>) -> Self {
        Self { tenants }
    }
}

#[async_trait]
impl CredentialStore for ConfigCredentialStore {
    async fn lookup(&self, scac: &str) -> Result<TenantCredentials> {
        self.tenants
            .iter()
            .find(|t| normalize_scac(&t.scac) == scac)
            .map(|t| TenantCredentials {
                tenant_id: t.tenant_id.clone(),
                client_id: t.client_id.clone(),
                client_secret: t.client_secret.clone(),
                grant_type: t.grant_type.clone(),
            })
            .ok_or_else(|| AlvysError::CredentialNotFound(scac.to_string()))
    }

    fn name(&self) -> &'static str {
        "config"
    }
}

/// Single tenant taken from `ALVYS_TENANT_ID`, `ALVYS_CLIENT_ID`,
/// `ALVYS_CLIENT_SECRET` and `ALVYS_GRANT_TYPE`
///
/// The SCAC only names the tenant; any SCAC resolves to the same
/// credentials.
#[derive(Debug, Default)]
pub struct EnvCredentialStore;

impl EnvCredentialStore {
    fn var(name: &str) -> Option<String> {
        std::env::var(name).ok().filter(|v| !v.trim().is_empty())
    }
}

#[async_trait]
impl CredentialStore for EnvCredentialStore {
    async fn lookup(&self, scac: &str) -> Result<TenantCredentials> {
        let (Some(tenant_id), Some(client_id), Some(client_secret)) = (
            Self::var("ALVYS_TENANT_ID"),
            Self::var("ALVYS_CLIENT_ID"),
            Self::var("ALVYS_CLIENT_SECRET"),
        ) else {
            return Err(AlvysError::CredentialNotFound(scac.to_string()));
        };

        Ok(TenantCredentials {
            tenant_id,
            client_id,
            client_secret: secret_string(client_secret),
            grant_type: Self::var("ALVYS_GRANT_TYPE").unwrap_or_else(default_grant_type),
        })
    }

    fn name(&self) -> &'static str {
        "env"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    fn tenant(scac: &str, tenant_id: &str) -> TenantConfig {
        TenantConfig {
            scac: scac.to_string(),
            tenant_id: tenant_id.to_string(),
            client_id: "client".to_string(),
            client_secret: secret_string("s3cret".to_string()),
            grant_type: "client_credentials".to_string(),
        }
    }

    #[test]
    fn test_normalize_scac() {
        assert_eq!(normalize_scac("  qwik "), "QWIK");
    }

    #[tokio::test]
    async fn test_config_store_lookup() {
        let store = ConfigCredentialStore::new(vec![tenant("qwik", "T1"), tenant("ABCD", "T2")]);

        let creds = store.lookup("QWIK").await.unwrap();
        assert_eq!(creds.tenant_id, "T1");
        assert_eq!(creds.client_secret.expose_secret(), "s3cret");

        let err = store.lookup("ZZZZ").await.unwrap_err();
        assert!(matches!(err, AlvysError::CredentialNotFound(ref s) if s == "ZZZZ"));
    }
}

//! Caller-owned credential cache

use super::store::{normalize_scac, CredentialStore, TenantCredentials};
use crate::domain::Result;
use std::collections::HashMap;

/// Memoizes credential lookups keyed by normalized SCAC
///
/// The cache lives as long as its owner; a CLI run creates one and keeps it
/// for the whole process. Failed lookups are not cached.
#[derive(Debug, Default)]
pub struct CredentialCache {
    entries: HashMap<String, TenantCredentials>,
}

impl CredentialCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns cached credentials or asks `store`
    pub async fn resolve(
        &mut self,
        store: &dyn CredentialStore,
        scac: &str,
    ) -> Result<TenantCredentials> {
        let key = normalize_scac(scac);

        if let Some(creds) = self.entries.get(&key) {
            tracing::debug!(scac = %key, "Credentials served from cache");
            return Ok(creds.clone());
        }

        let creds = store.lookup(&key).await?;
        tracing::info!(scac = %key, source = store.name(), "Credentials resolved");
        self.entries.insert(key, creds.clone());
        Ok(creds)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

//! Credential lookup against the warehouse clients table

use super::store::{CredentialStore, TenantCredentials};
use crate::adapters::postgresql::{ConnectOptions, PostgreSQLClient};
use crate::config::schema::default_grant_type;
use crate::config::secret_string;
use crate::domain::{AlvysError, Result, WarehouseError};
use async_trait::async_trait;
use regex::Regex;

const TABLE_NAME_PATTERN: &str = r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)?$";

/// Reads tenant credentials from a `(scac, tenant_id, client_id,
/// client_secret, grant_type)` table
///
/// A connection is opened for each lookup; the caller's
/// [`CredentialCache`](super::CredentialCache) keeps that to once per
/// tenant per run.
pub struct WarehouseCredentialStore {
    options: ConnectOptions,
    query: String,
}

impl WarehouseCredentialStore {
    /// # Errors
    ///
    /// Fails when `table` is not a plain or schema-qualified identifier.
    pub fn new(options: ConnectOptions, table: &str) -> Result<Self> {
        Ok(Self {
            options,
            query: lookup_query(table)?,
        })
    }
}

/// Builds the lookup statement for `table`
pub fn lookup_query(table: &str) -> Result<String> {
    let pattern = Regex::new(TABLE_NAME_PATTERN)
        .map_err(|e| AlvysError::Configuration(format!("Invalid table name pattern: {e}")))?;

    if !pattern.is_match(table) {
        return Err(AlvysError::Configuration(format!(
            "credentials.table '{table}' is not a valid table name"
        )));
    }

    Ok(format!(
        "SELECT tenant_id, client_id, client_secret, grant_type FROM {table} WHERE scac = $1"
    ))
}

#[async_trait]
impl CredentialStore for WarehouseCredentialStore {
    async fn lookup(&self, scac: &str) -> Result<TenantCredentials> {
        let client = PostgreSQLClient::connect(&self.options).await?;

        let row = client
            .query_opt(&self.query, &[&scac])
            .await?
            .ok_or_else(|| AlvysError::CredentialNotFound(scac.to_string()))?;

        let column = |idx: usize, name: &str| -> Result<Option<String>> {
            row.try_get::<_, Option<String>>(idx).map_err(|e| {
                WarehouseError::QueryFailed(format!("Unreadable credential column {name}: {e}"))
                    .into()
            })
        };

        let (Some(tenant_id), Some(client_id), Some(client_secret)) = (
            column(0, "tenant_id")?,
            column(1, "client_id")?,
            column(2, "client_secret")?,
        ) else {
            return Err(AlvysError::CredentialNotFound(scac.to_string()));
        };

        Ok(TenantCredentials {
            tenant_id,
            client_id,
            client_secret: secret_string(client_secret),
            grant_type: column(3, "grant_type")?.unwrap_or_else(default_grant_type),
        })
    }

    fn name(&self) -> &'static str {
        "warehouse"
    }
}

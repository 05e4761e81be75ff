//! Credential store selection

use super::store::{ConfigCredentialStore, CredentialStore, EnvCredentialStore};
use super::warehouse::WarehouseCredentialStore;
use crate::adapters::postgresql::ConnectOptions;
use crate::config::{AlvysConfig, CredentialSource};
use crate::domain::{AlvysError, Result};
use std::time::Duration;

/// Creates the credential store named by `credentials.source`
///
/// The warehouse source uses `credentials.connection_string` when set and
/// otherwise the `[warehouse]` connection.
///
/// # Errors
///
/// Fails when the warehouse source has no connection to use or the table
/// name is invalid.
pub fn create_credential_store(config: &AlvysConfig) -> Result<Box<dyn CredentialStore>> {
    match config.credentials.source {
        CredentialSource::Config => {
            tracing::debug!(
                tenants = config.credentials.tenants.len(),
                "Using configured tenant credentials"
            );
            Ok(Box::new(ConfigCredentialStore::new(
                config.credentials.tenants.clone(),
            )))
        }
        CredentialSource::Env => Ok(Box::new(EnvCredentialStore)),
        CredentialSource::Warehouse => {
            let options = match (&config.credentials.connection_string, &config.warehouse) {
                (Some(conn), warehouse) => ConnectOptions {
                    connection_string: conn.clone(),
                    connect_timeout: Duration::from_secs(
                        warehouse.as_ref().map_or(30, |w| w.connect_timeout_seconds),
                    ),
                    ssl_mode: warehouse
                        .as_ref()
                        .map_or_else(|| "prefer".to_string(), |w| w.ssl_mode.clone()),
                },
                (None, Some(warehouse)) => ConnectOptions::from_config(warehouse),
                (None, None) => {
                    return Err(AlvysError::Configuration(
                        "credentials.source = 'warehouse' requires [warehouse] or credentials.connection_string"
                            .to_string(),
                    ))
                }
            };

            Ok(Box::new(WarehouseCredentialStore::new(
                options,
                &config.credentials.table,
            )?))
        }
    }
}

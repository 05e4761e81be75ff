//! External system integrations
//!
//! - [`alvys`] - Alvys public API: token exchange, search endpoints, pagination
//! - [`credentials`] - Tenant credential stores and the per-run cache
//! - [`postgresql`] - Warehouse connection implementing
//!   [`WarehouseSession`](crate::core::load::WarehouseSession)
//!
//! # Example
//!
//! ```rust,no_run
//! use alvys_etl::adapters::alvys::{AlvysApi, AlvysClient, EndpointSpec, Paginator};
//! use alvys_etl::adapters::credentials::{create_credential_store, CredentialCache};
//! use alvys_etl::config::{load_config, FilterVariant};
//! use alvys_etl::domain::EntityKind;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("alvys.toml")?;
//! let store = create_credential_store(&config)?;
//! let mut cache = CredentialCache::new();
//! let creds = cache.resolve(store.as_ref(), "QWIK").await?;
//!
//! let client = AlvysClient::new(&config.api)?;
//! let token = client.acquire_token(&creds).await?;
//!
//! let endpoint = EndpointSpec::for_entity(EntityKind::Drivers, FilterVariant::AllStatuses);
//! let drivers = Paginator::new(&client, config.api.page_size)
//!     .fetch_all(EntityKind::Drivers, &token, &endpoint.base_payload(None), &mut |_| {})
//!     .await?;
//! println!("{} drivers", drivers.len());
//! # Ok(())
//! # }
//! ```

pub mod alvys;
pub mod credentials;
pub mod postgresql;

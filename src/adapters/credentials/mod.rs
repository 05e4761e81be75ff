//! Tenant credential resolution
//!
//! A tenant is identified by its SCAC. Credentials come from a
//! [`CredentialStore`] and are memoized by a caller-owned
//! [`CredentialCache`].

pub mod cache;
pub mod factory;
pub mod store;
pub mod warehouse;

pub use cache::CredentialCache;
pub use factory::create_credential_store;
pub use store::{
    normalize_scac, ConfigCredentialStore, CredentialStore, EnvCredentialStore, TenantCredentials,
};
pub use warehouse::WarehouseCredentialStore;

//! Configuration management.
//!
//! TOML configuration with:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `ALVYS_<SECTION>_<KEY>` environment overrides
//! - Default values for optional settings
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use alvys_etl::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("alvys.toml")?;
//!
//! println!("API: {}", config.api.versioned_base_url());
//! if let Some(warehouse) = &config.warehouse {
//!     println!("Layout: {}", warehouse.schema_layout);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - log level and snapshot directory
//! - [`ApiConfig`] - Alvys endpoints, page size, item cap
//! - [`ExportConfig`] - filter variant
//! - [`WarehouseConfig`] - PostgreSQL connection, chunk size, table naming
//! - [`CredentialsConfig`] - where tenant credentials come from
//! - [`LoggingConfig`] - optional JSON log files
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//! data_dir = "alvys_weekly_data"
//!
//! [warehouse]
//! connection_string = "${ALVYS_WAREHOUSE_URL}"
//! schema_layout = "extended"
//!
//! [credentials]
//! source = "warehouse"
//! table = "alvys_clients"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, parse_config};
pub use schema::{
    AlvysConfig, ApiConfig, ApplicationConfig, CredentialSource, CredentialsConfig, ExportConfig,
    FilterVariant, LoggingConfig, SchemaLayout, TenantConfig, WarehouseConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};

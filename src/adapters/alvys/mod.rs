//! Alvys public API integration
//!
//! - [`AlvysClient`] speaks HTTP to the token and search endpoints
//! - [`Paginator`] walks search pages until the result set is exhausted
//! - [`EndpointSpec`] holds the per-entity filters and date-range field

pub mod client;
pub mod endpoints;
pub mod paginator;
pub mod traits;

pub use client::AlvysClient;
pub use endpoints::EndpointSpec;
pub use paginator::Paginator;
pub use traits::{AccessToken, AlvysApi, SearchPage};

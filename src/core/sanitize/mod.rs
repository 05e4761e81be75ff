//! Record sanitizers
//!
//! Each sanitizer maps one raw API record onto the fixed column set of its
//! warehouse table. Sanitizers are total: missing or malformed fields become
//! nulls and never fail the record.
//!
//! ```
//! use alvys_etl::core::sanitize::flatten_trip;
//! use alvys_etl::domain::SqlValue;
//! use serde_json::json;
//!
//! let trip = json!({"Id": "T1", "Stops": [{"Id": "S1"}, {}]});
//! let rows = flatten_trip(trip.as_object().unwrap());
//!
//! assert_eq!(rows.stops.len(), 2);
//! assert_eq!(rows.stops[1].get("ID"), Some(&SqlValue::Text("T1_2".into())));
//! ```

pub mod commerce;
pub mod fields;
pub mod fleet;
pub mod parties;
pub mod tables;
pub mod trips;

pub use commerce::{sanitize_invoice, sanitize_load};
pub use fleet::{sanitize_driver, sanitize_trailer, sanitize_truck};
pub use parties::{sanitize_carrier, sanitize_customer};
pub use trips::{flatten_stops, flatten_trip, sanitize_trip, TripRows};

//! Entity kinds exposed by the Alvys search API

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One kind of record the pipeline knows how to fetch and load
///
/// Declaration order is the canonical processing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Loads,
    Trips,
    Invoices,
    Drivers,
    Trucks,
    Trailers,
    Customers,
    Carriers,
}

impl EntityKind {
    /// All entities in canonical order
    pub const ALL: [EntityKind; 8] = [
        EntityKind::Loads,
        EntityKind::Trips,
        EntityKind::Invoices,
        EntityKind::Drivers,
        EntityKind::Trucks,
        EntityKind::Trailers,
        EntityKind::Customers,
        EntityKind::Carriers,
    ];

    /// Lowercase name, as used in API paths and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Loads => "loads",
            EntityKind::Trips => "trips",
            EntityKind::Invoices => "invoices",
            EntityKind::Drivers => "drivers",
            EntityKind::Trucks => "trucks",
            EntityKind::Trailers => "trailers",
            EntityKind::Customers => "customers",
            EntityKind::Carriers => "carriers",
        }
    }

    /// Uppercase name, as used in snapshot file names
    pub fn file_stem(&self) -> String {
        self.as_str().to_uppercase()
    }

    /// Whether API queries for this entity are split into date windows
    pub fn is_partitioned(&self) -> bool {
        matches!(
            self,
            EntityKind::Trips | EntityKind::Loads | EntityKind::Invoices
        )
    }

    /// Expand a user selection into canonical order
    ///
    /// An empty selection or one made only of `all` yields every entity.
    /// Otherwise `all` is ignored and the named entities are returned
    /// once each, in canonical order.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first unknown entity.
    pub fn resolve_selection<S: AsRef<str>>(names: &[S]) -> Result<Vec<EntityKind>, String> {
        let mut selected = Vec::new();
        let mut saw_named = false;

        for name in names {
            let name = name.as_ref().trim().to_lowercase();
            if name == "all" {
                continue;
            }
            saw_named = true;
            selected.push(EntityKind::from_str(&name)?);
        }

        if !saw_named {
            return Ok(EntityKind::ALL.to_vec());
        }

        Ok(EntityKind::ALL
            .into_iter()
            .filter(|kind| selected.contains(kind))
            .collect())
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "Unknown entity '{s}'. Must be one of: all, {}",
                    EntityKind::ALL.map(|k| k.as_str()).join(", ")
                )
            })
    }
}

//! Search endpoint filter table

use crate::config::FilterVariant;
use crate::domain::{DateWindow, EntityKind};
use serde_json::{json, Map, Value};

/// How one entity is searched
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointSpec {
    pub entity: EntityKind,
    /// Name of the date-range object for partitioned entities
    pub range_field: Option<&'static str>,
    /// Filters merged into every request
    pub filters: Map<String, Value>,
}

impl EndpointSpec {
    /// Looks up the filters for `entity` under `variant`
    pub fn for_entity(entity: EntityKind, variant: FilterVariant) -> Self {
        let active = variant == FilterVariant::ActiveOnly;
        let status = if active { json!(["Active"]) } else { json!([]) };

        let (range_field, filters) = match entity {
            EntityKind::Trips => (Some("updatedAtRange"), json!({"status": ["Completed"]})),
            EntityKind::Loads => (Some("updatedAtRange"), json!({"status": ["Open"]})),
            EntityKind::Invoices => (Some("invoicedDateRange"), json!({"status": ["Paid"]})),
            EntityKind::Drivers => (
                None,
                json!({
                    "name": "",
                    "employeeId": "",
                    "fleetName": "",
                    "status": status,
                }),
            ),
            EntityKind::Trucks => (
                None,
                json!({
                    "truckNumber": "",
                    "fleetName": "",
                    "vinNumber": "",
                    "registeredName": "",
                    "status": status,
                }),
            ),
            EntityKind::Trailers => (
                None,
                json!({
                    "status": status,
                    "trailerNumber": "",
                    "fleetName": "",
                    "vinNumber": "",
                }),
            ),
            EntityKind::Customers => (
                None,
                if active {
                    json!({"statuses": ["Active"]})
                } else {
                    json!({"statuses": ["Active", "Inactive", "Disabled"]})
                },
            ),
            EntityKind::Carriers => (
                None,
                if active {
                    json!({"status": ["Active"]})
                } else {
                    json!({"status": [
                        "Pending",
                        "Active",
                        "Expired Insurance",
                        "Interested",
                        "Invited",
                        "Packet Sent",
                        "Packet Completed",
                    ]})
                },
            ),
        };

        let filters = match filters {
            Value::Object(map) => map,
            _ => Map::new(),
        };

        Self {
            entity,
            range_field,
            filters,
        }
    }

    pub fn is_partitioned(&self) -> bool {
        self.range_field.is_some()
    }

    /// Request body without paging fields
    ///
    /// For partitioned entities the window becomes
    /// `{"<range_field>": {"start": ..., "end": ...}}`.
    pub fn base_payload(&self, window: Option<&DateWindow>) -> Map<String, Value> {
        let mut payload = Map::new();

        if let (Some(field), Some(window)) = (self.range_field, window) {
            payload.insert(
                field.to_string(),
                json!({"start": window.start_iso(), "end": window.end_iso()}),
            );
        }

        for (key, value) in &self.filters {
            payload.insert(key.clone(), value.clone());
        }

        payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_partitioning_matches_entity_kind() {
        for entity in EntityKind::ALL {
            let spec = EndpointSpec::for_entity(entity, FilterVariant::AllStatuses);
            assert_eq!(spec.is_partitioned(), entity.is_partitioned(), "{entity}");
        }
    }

    #[test]
    fn test_invoice_payload_uses_invoiced_range() {
        let monday = Utc.with_ymd_and_hms(2025, 6, 9, 14, 5, 0).unwrap();
        let window = DateWindow::last_week(monday).unwrap();
        let spec = EndpointSpec::for_entity(EntityKind::Invoices, FilterVariant::AllStatuses);
        let payload = spec.base_payload(Some(&window));

        assert_eq!(
            Value::Object(payload),
            json!({
                "invoicedDateRange": {
                    "start": "2025-06-01T00:00:00.000Z",
                    "end": "2025-06-07T23:59:59.999Z"
                },
                "status": ["Paid"]
            })
        );
    }

    #[test]
    fn test_non_partitioned_ignores_window() {
        let window = DateWindow::last_week(Utc::now()).unwrap();
        let spec = EndpointSpec::for_entity(EntityKind::Customers, FilterVariant::AllStatuses);
        let payload = spec.base_payload(Some(&window));

        assert_eq!(
            Value::Object(payload),
            json!({"statuses": ["Active", "Inactive", "Disabled"]})
        );
    }

    #[test]
    fn test_active_only_variant() {
        let drivers = EndpointSpec::for_entity(EntityKind::Drivers, FilterVariant::ActiveOnly);
        assert_eq!(drivers.filters["status"], json!(["Active"]));
        assert_eq!(drivers.filters["employeeId"], json!(""));

        let carriers = EndpointSpec::for_entity(EntityKind::Carriers, FilterVariant::ActiveOnly);
        assert_eq!(carriers.filters["status"], json!(["Active"]));

        let all = EndpointSpec::for_entity(EntityKind::Carriers, FilterVariant::AllStatuses);
        assert_eq!(all.filters["status"].as_array().unwrap().len(), 7);

        // Date-partitioned entities have a single filter set
        assert_eq!(
            EndpointSpec::for_entity(EntityKind::Trips, FilterVariant::ActiveOnly),
            EndpointSpec::for_entity(EntityKind::Trips, FilterVariant::AllStatuses)
        );
    }
}

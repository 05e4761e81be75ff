//! Trip and stop flattening
//!
//! One trip record yields one `TRIPS_RAW` row and one `TRIP_STOPS_RAW` row
//! per entry of its `Stops` array. Text columns are trimmed; blank text is
//! null.

use super::fields::{clean_text, decimal, first_timestamp, flag, timestamp, RowBuilder};
use super::tables::{TRIPS, TRIP_STOPS};
use crate::domain::{RawRecord, SanitizedRow, SqlValue, FILE_ID_KEY};
use serde_json::Value;

/// Rows produced from one trip
#[derive(Debug, Clone, PartialEq)]
pub struct TripRows {
    pub trip: SanitizedRow,
    pub stops: Vec<SanitizedRow>,
}

/// Flattens a trip and its stops in one pass
pub fn flatten_trip(record: &RawRecord) -> TripRows {
    let trip = sanitize_trip(record);
    let stops = flatten_stops(record);
    TripRows { trip, stops }
}

pub fn sanitize_trip(t: &RawRecord) -> SanitizedRow {
    RowBuilder::new(&TRIPS)
        .set("ID", clean_text(t, "Id"))
        .set("TRIP_NUMBER", clean_text(t, "TripNumber"))
        .set("TRIP_STATUS", clean_text(t, "Status"))
        .set("LOAD_NUMBER", clean_text(t, "LoadNumber"))
        .set("TENDER_AS", clean_text(t, "TenderAs"))
        .set("TOTAL_MILEAGE", decimal(t, "TotalMileage.Distance.Value"))
        .set("MILEAGE_SOURCE", clean_text(t, "TotalMileage.Source"))
        .set("MILEAGE_PROFILE_NAME", clean_text(t, "TotalMileage.ProfileName"))
        .set("EMPTY_MILEAGE", decimal(t, "EmptyMileage.Distance.Value"))
        .set("LOADED_MILEAGE", decimal(t, "LoadedMileage.Distance.Value"))
        .set("PICKUP_DTTM", timestamp(t, "PickupDate"))
        .set("DELIVERY_DTTM", timestamp(t, "DeliveryDate"))
        .set("PICKED_UP_DTTM", timestamp(t, "PickedUpAt"))
        .set("DELIVERED_DTTM", timestamp(t, "DeliveredAt"))
        .set("CARRIER_ASSIGNED_DTTM", timestamp(t, "CarrierAssignedAt"))
        .set("RELEASED_DTTM", timestamp(t, "ReleasedAt"))
        .set("TRIP_VALUE", decimal(t, "TripValue.Amount"))
        .set("TRUCK_ID", clean_text(t, "Truck.Id"))
        .set("TRUCK_FLEET_ID", clean_text(t, "Truck.Fleet.Id"))
        .set("TRUCK_FLEET_NAME", clean_text(t, "Truck.Fleet.Name"))
        .set("TRAILER_ID", clean_text(t, "Trailer.Id"))
        .set("TRAILER_TYPE", clean_text(t, "Trailer.EquipmentType"))
        .set("DRIVER1_ID", clean_text(t, "Driver1.Id"))
        .set("DRIVER1_TYPE", clean_text(t, "Driver1.ContractorType"))
        .set("DRIVER1_FLEET_ID", clean_text(t, "Driver1.Fleet.Id"))
        .set("DRIVER2_ID", clean_text(t, "Driver2.Id"))
        .set("DRIVER2_TYPE", clean_text(t, "Driver2.ContractorType"))
        .set("DRIVER2_FLEET_ID", clean_text(t, "Driver2.Fleet.Id"))
        .set("OWNER_OPERATOR_ID", clean_text(t, "OwnerOperator.Id"))
        .set("RELEASED_BY", clean_text(t, "ReleasedBy"))
        .set("DISPATCHED_BY", clean_text(t, "DispatchedBy"))
        .set("DISPATCHER_ID", clean_text(t, "DispatcherId"))
        .set("IS_CARRIER_PAY_ON_HOLD", flag(t, "CarrierPayOnHold"))
        .set("CARRIER_ID", clean_text(t, "Carrier.Id"))
        .set("CARRIER_INVOICE", clean_text(t, "Carrier.CarrierInvoiceNumber"))
        .set("CARRIER_RATE", decimal(t, "Carrier.Rate.Amount"))
        .set("CARRIER_LINEHAUL", decimal(t, "Carrier.Linehaul.Amount"))
        .set("CARRIER_FUEL", decimal(t, "Carrier.Fuel.Amount"))
        .set("CARRIER_ACCESSORIALS", decimal(t, "Carrier.Accessorials.Amount"))
        .set("CARRIER_TOTAL_PAYABLE", decimal(t, "Carrier.TotalPayable.Amount"))
        .set("UPDATED_DTTM", timestamp(t, "UpdatedAt"))
        .set("FILE_ID", clean_text(t, FILE_ID_KEY))
        .build()
}

/// Flattens the `Stops` array of a trip
///
/// Sequences are 1-based in source order. A stop without an `Id` gets
/// `<trip id>_<sequence>`. Non-object entries keep their sequence slot and
/// produce a row carrying only the trip keys.
pub fn flatten_stops(trip: &RawRecord) -> Vec<SanitizedRow> {
    let trip_id = clean_text(trip, "Id");
    let trip_number = clean_text(trip, "TripNumber");
    let file_id = clean_text(trip, FILE_ID_KEY);

    let Some(Value::Array(stops)) = trip.get("Stops") else {
        return Vec::new();
    };

    let empty = RawRecord::new();
    stops
        .iter()
        .enumerate()
        .map(|(idx, stop)| {
            let seq = idx as i64 + 1;
            let s = stop.as_object().unwrap_or(&empty);

            let id = match clean_text(s, "Id") {
                SqlValue::Null => SqlValue::Text(format!(
                    "{}_{seq}",
                    trip_id.as_text().unwrap_or_default()
                )),
                id => id,
            };

            RowBuilder::new(&TRIP_STOPS)
                .set("ID", id)
                .set("TRIP_ID", trip_id.clone())
                .set("TRIP_NUMBER", trip_number.clone())
                .set("STOP_SEQUENCE", seq)
                .set("IS_APPOINTMENT_REQUESTED", flag(s, "AppointmentRequested"))
                .set("IS_APPOINTMENT_CONFIRMED", flag(s, "AppointmentConfirmed"))
                .set(
                    "EARLIEST_APPOINTMENT_DTTM",
                    first_timestamp(s, &["AppointmentDate", "StopWindow.Begin"]),
                )
                .set("LATEST_APPOINTMENT_DTTM", timestamp(s, "StopWindow.End"))
                .set("STREET_ADDRESS", clean_text(s, "Address.Street"))
                .set("CITY", clean_text(s, "Address.City"))
                .set("STATE_PROVINCE", clean_text(s, "Address.State"))
                .set("POSTAL_CD", clean_text(s, "Address.ZipCode"))
                .set("LATITUDE", decimal(s, "Coordinates.Latitude"))
                .set("LONGITUDE", decimal(s, "Coordinates.Longitude"))
                .set("STOP_STATUS", clean_text(s, "Status"))
                .set("STOP_TYPE", clean_text(s, "StopType"))
                .set("STOP_SCHEDULE_TYPE", clean_text(s, "ScheduleType"))
                .set("LOADING_TYPE", clean_text(s, "LoadingType"))
                .set("ARRIVED_DTTM", timestamp(s, "ArrivedAt"))
                .set("DEPARTED_DTTM", timestamp(s, "DepartedAt"))
                .set("FILE_ID", file_id.clone())
                .build()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rec(value: Value) -> RawRecord {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_trip_with_two_stops() {
        let trip = rec(json!({
            "Id": "T-100",
            "TripNumber": "100",
            "Status": "Completed",
            "TotalMileage": {"Distance": {"Value": 512.4}, "Source": "PC*Miler"},
            "Carrier": {"Id": "C9", "Rate": {"Amount": "1500.00"}},
            "CarrierPayOnHold": true,
            "UpdatedAt": "2025-06-03T16:20:00.000Z",
            "FILE_ID": "20250609140507123",
            "Stops": [
                {"Id": "S-1", "Address": {"City": "Dallas", "ZipCode": "75201"}},
                {"StopWindow": {"Begin": "2025-06-02T08:00:00Z", "End": "2025-06-02T10:00:00Z"}}
            ]
        }));

        let rows = flatten_trip(&trip);

        assert_eq!(rows.trip.get("ID"), Some(&SqlValue::Text("T-100".into())));
        assert_eq!(rows.trip.get("TOTAL_MILEAGE"), Some(&SqlValue::Decimal(512.4)));
        assert_eq!(rows.trip.get("CARRIER_RATE"), Some(&SqlValue::Decimal(1500.0)));
        assert_eq!(rows.trip.get("IS_CARRIER_PAY_ON_HOLD"), Some(&SqlValue::Integer(1)));
        assert!(matches!(rows.trip.get("UPDATED_DTTM"), Some(SqlValue::Timestamp(_))));
        assert_eq!(
            rows.trip.get("FILE_ID"),
            Some(&SqlValue::Text("20250609140507123".into()))
        );

        assert_eq!(rows.stops.len(), 2);
        assert_eq!(rows.stops[0].get("ID"), Some(&SqlValue::Text("S-1".into())));
        assert_eq!(rows.stops[1].get("ID"), Some(&SqlValue::Text("T-100_2".into())));
        assert_eq!(rows.stops[0].get("STOP_SEQUENCE"), Some(&SqlValue::Integer(1)));
        assert_eq!(rows.stops[1].get("STOP_SEQUENCE"), Some(&SqlValue::Integer(2)));
        assert_eq!(rows.stops[0].get("CITY"), Some(&SqlValue::Text("Dallas".into())));
        assert!(matches!(
            rows.stops[1].get("EARLIEST_APPOINTMENT_DTTM"),
            Some(SqlValue::Timestamp(_))
        ));
        for stop in &rows.stops {
            assert_eq!(stop.get("TRIP_ID"), Some(&SqlValue::Text("T-100".into())));
        }
    }

    #[test]
    fn test_empty_trip_is_all_null() {
        let rows = flatten_trip(&RawRecord::new());

        assert!(rows.stops.is_empty());
        for (column, value) in TRIPS.columns.iter().zip(rows.trip.values()) {
            if column.name == "IS_CARRIER_PAY_ON_HOLD" {
                assert_eq!(value, &SqlValue::Integer(0));
            } else {
                assert!(value.is_null(), "{} should be null", column.name);
            }
        }
    }

    #[test]
    fn test_text_is_trimmed_and_truncated() {
        let long_status = "X".repeat(80);
        let trip = rec(json!({"Id": "  T1  ", "Status": long_status, "TenderAs": "   "}));
        let row = sanitize_trip(&trip);

        assert_eq!(row.get("ID"), Some(&SqlValue::Text("T1".into())));
        assert_eq!(row.get("TRIP_STATUS").and_then(|v| v.as_text()).map(str::len), Some(50));
        assert_eq!(row.get("TENDER_AS"), Some(&SqlValue::Null));
    }

    #[test]
    fn test_stop_without_trip_id_keeps_sequence_suffix() {
        let trip = rec(json!({"Stops": [{}, "garbage", {"Id": " "}]}));
        let stops = flatten_stops(&trip);

        let ids: Vec<_> = stops
            .iter()
            .map(|s| s.get("ID").and_then(|v| v.as_text()).unwrap().to_string())
            .collect();
        assert_eq!(ids, vec!["_1", "_2", "_3"]);
    }

    #[test]
    fn test_non_array_stops_yield_nothing() {
        let trip = rec(json!({"Id": "T1", "Stops": {"Id": "S"}}));
        assert!(flatten_stops(&trip).is_empty());
    }
}

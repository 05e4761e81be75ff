//! Customer and carrier rows
//!
//! Customers carry their billing address either as one display string
//! (standard layout) or as discrete columns (extended layout). Carrier
//! addresses are always discrete.

use super::fields::{text, timestamp, RowBuilder};
use super::tables::{self, CARRIERS};
use crate::config::SchemaLayout;
use crate::domain::{lookup, RawRecord, SanitizedRow, SqlValue, FILE_ID_KEY};
use serde_json::Value;

const BILLING_PARTS: [&str; 4] = ["Street", "City", "State", "ZipCode"];

/// `"Street, City, State, ZipCode"` with missing parts left empty
///
/// Null when the customer has no billing address part at all.
fn billing_display(c: &RawRecord) -> SqlValue {
    let parts: Vec<String> = BILLING_PARTS
        .iter()
        .map(|part| {
            lookup(c, &format!("BillingAddress.{part}"))
                .map(|v| match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .unwrap_or_default()
        })
        .collect();

    if parts.iter().all(String::is_empty) {
        SqlValue::Null
    } else {
        SqlValue::Text(parts.join(", "))
    }
}

pub fn sanitize_customer(c: &RawRecord, layout: SchemaLayout) -> SanitizedRow {
    let row = RowBuilder::new(tables::customers(layout))
        .set("ID", text(c, "Id"))
        .set("CUSTOMER_NAME", text(c, "Name"))
        .set("COMPANY_NUMBER", text(c, "CompanyNumber"))
        .set("CUSTOMER_TYPE", text(c, "Type"))
        .set("CUSTOMER_STATUS", text(c, "Status"))
        .set("CREATED_DTTM", timestamp(c, "DateCreated"))
        .set("INVOICING_NAME", text(c, "InvoicingInformation.InvoicingName"))
        .set(
            "INVOICING_ALIAS",
            text(c, "InvoicingInformation.InvoicingNameAlias"),
        )
        .set("FILE_ID", text(c, FILE_ID_KEY));

    match layout {
        SchemaLayout::Standard => row.set("BILLING_ADDRESS", billing_display(c)),
        SchemaLayout::Extended => row
            .set("BILLING_ADDRESS", text(c, "BillingAddress.Street"))
            .set("CITY", text(c, "BillingAddress.City"))
            .set("STATE_PROVINCE", text(c, "BillingAddress.State"))
            .set("POSTAL_CD", text(c, "BillingAddress.ZipCode")),
    }
    .build()
}

pub fn sanitize_carrier(c: &RawRecord) -> SanitizedRow {
    RowBuilder::new(&CARRIERS)
        .set("ID", text(c, "Id"))
        .set("CARRIER_NAME", text(c, "Name"))
        .set("EXTERNAL_NAME", text(c, "ExternalName"))
        .set("CITY", text(c, "Address.City"))
        .set("STATE", text(c, "Address.State"))
        .set("ZIP", text(c, "Address.ZipCode"))
        .set("MC_NUM", text(c, "McNum"))
        .set("US_DOT_NUM", text(c, "UsDotNum"))
        .set("CARRIER_TYPE", text(c, "Type"))
        .set("CARRIER_STATUS", text(c, "Status"))
        .set("CARRIER_SOURCE", text(c, "Source"))
        .set("UPDATED_DTTM", timestamp(c, "UpdatedAt"))
        .set("CREATED_DTTM", timestamp(c, "CreatedAt"))
        .set("FILE_ID", text(c, FILE_ID_KEY))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rec(value: Value) -> RawRecord {
        value.as_object().cloned().unwrap()
    }

    fn customer() -> RawRecord {
        rec(json!({
            "Id": "CU1",
            "Name": "Acme Freight",
            "BillingAddress": {"Street": "1 Main St", "City": "Austin", "ZipCode": "73301"},
            "InvoicingInformation": {"InvoicingName": "Acme AP"},
            "DateCreated": "2024-01-05T09:00:00Z"
        }))
    }

    #[test]
    fn test_standard_customer_concatenates_address() {
        let row = sanitize_customer(&customer(), SchemaLayout::Standard);

        assert_eq!(
            row.get("BILLING_ADDRESS"),
            Some(&SqlValue::Text("1 Main St, Austin, , 73301".into()))
        );
        assert_eq!(row.get("CITY"), None);
        assert_eq!(row.get("INVOICING_NAME"), Some(&SqlValue::Text("Acme AP".into())));
        assert!(matches!(row.get("CREATED_DTTM"), Some(SqlValue::Timestamp(_))));
    }

    #[test]
    fn test_extended_customer_splits_address() {
        let row = sanitize_customer(&customer(), SchemaLayout::Extended);

        assert_eq!(row.get("BILLING_ADDRESS"), Some(&SqlValue::Text("1 Main St".into())));
        assert_eq!(row.get("CITY"), Some(&SqlValue::Text("Austin".into())));
        assert_eq!(row.get("STATE_PROVINCE"), Some(&SqlValue::Null));
        assert_eq!(row.get("POSTAL_CD"), Some(&SqlValue::Text("73301".into())));
    }

    #[test]
    fn test_customer_without_address() {
        let row = sanitize_customer(&rec(json!({"Id": "CU2"})), SchemaLayout::Standard);
        assert_eq!(row.get("BILLING_ADDRESS"), Some(&SqlValue::Null));
    }

    #[test]
    fn test_carrier_row() {
        let row = sanitize_carrier(&rec(json!({
            "Id": "CA1",
            "Name": "Road Runner LLC",
            "Address": {"City": "Tulsa", "State": "OK", "ZipCode": "74103"},
            "McNum": "MC123",
            "UsDotNum": 987654,
            "UpdatedAt": "2025-05-30T12:00:00.000Z"
        })));

        assert_eq!(row.get("STATE"), Some(&SqlValue::Text("OK".into())));
        assert_eq!(row.get("US_DOT_NUM"), Some(&SqlValue::Text("987654".into())));
        assert!(matches!(row.get("UPDATED_DTTM"), Some(SqlValue::Timestamp(_))));
        assert_eq!(row.get("CREATED_DTTM"), Some(&SqlValue::Null));
    }
}

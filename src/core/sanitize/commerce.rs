//! Load and invoice rows

use super::fields::{amount, decimal, text, timestamp, RowBuilder};
use super::tables::{INVOICES, LOADS};
use crate::domain::{RawRecord, SanitizedRow, FILE_ID_KEY};

pub fn sanitize_load(l: &RawRecord) -> SanitizedRow {
    RowBuilder::new(&LOADS)
        .set("ID", text(l, "Id"))
        .set("LOAD_NUMBER", text(l, "LoadNumber"))
        .set("LOAD_STATUS", text(l, "Status"))
        .set("CUSTOMER_ID", text(l, "Customer.Id"))
        .set("CUSTOMER_NAME", text(l, "Customer.Name"))
        .set("PO_NUMBER", text(l, "PoNumber"))
        .set("EQUIPMENT_TYPE", text(l, "EquipmentType"))
        .set("WEIGHT", amount(l, "Weight"))
        .set("TOTAL_MILEAGE", decimal(l, "TotalMileage.Distance.Value"))
        .set("CUSTOMER_RATE", amount(l, "CustomerRate"))
        .set("PICKUP_DTTM", timestamp(l, "PickupDate"))
        .set("DELIVERY_DTTM", timestamp(l, "DeliveryDate"))
        .set("CREATED_DTTM", timestamp(l, "CreatedAt"))
        .set("UPDATED_DTTM", timestamp(l, "UpdatedAt"))
        .set("FILE_ID", text(l, FILE_ID_KEY))
        .build()
}

pub fn sanitize_invoice(i: &RawRecord) -> SanitizedRow {
    RowBuilder::new(&INVOICES)
        .set("ID", text(i, "Id"))
        .set("INVOICE_NUMBER", text(i, "InvoiceNumber"))
        .set("INVOICE_STATUS", text(i, "Status"))
        .set("LOAD_NUMBER", text(i, "LoadNumber"))
        .set("CUSTOMER_ID", text(i, "Customer.Id"))
        .set("CUSTOMER_NAME", text(i, "Customer.Name"))
        .set("INVOICE_AMOUNT", amount(i, "InvoiceAmount"))
        .set("PAID_AMOUNT", amount(i, "PaidAmount"))
        .set("BALANCE_DUE", amount(i, "BalanceDue"))
        .set("INVOICED_DTTM", timestamp(i, "InvoicedDate"))
        .set("DUE_DTTM", timestamp(i, "DueDate"))
        .set("PAID_DTTM", timestamp(i, "PaidDate"))
        .set("UPDATED_DTTM", timestamp(i, "UpdatedAt"))
        .set("FILE_ID", text(i, FILE_ID_KEY))
        .build()
}

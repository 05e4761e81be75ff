//! Warehouse table layouts

use crate::config::SchemaLayout;
use crate::domain::{Column, TableSpec};

/// Width of text columns without a tighter limit
pub const TEXT: usize = 255;
const FILE_ID: Column = Column::text("FILE_ID", 50);

pub static TRIPS: TableSpec = TableSpec {
    name: "TRIPS_RAW",
    columns: &[
        Column::text("ID", 100),
        Column::text("TRIP_NUMBER", 100),
        Column::text("TRIP_STATUS", 50),
        Column::text("LOAD_NUMBER", 100),
        Column::text("TENDER_AS", 50),
        Column::decimal("TOTAL_MILEAGE"),
        Column::text("MILEAGE_SOURCE", 50),
        Column::text("MILEAGE_PROFILE_NAME", 100),
        Column::decimal("EMPTY_MILEAGE"),
        Column::decimal("LOADED_MILEAGE"),
        Column::timestamp("PICKUP_DTTM"),
        Column::timestamp("DELIVERY_DTTM"),
        Column::timestamp("PICKED_UP_DTTM"),
        Column::timestamp("DELIVERED_DTTM"),
        Column::timestamp("CARRIER_ASSIGNED_DTTM"),
        Column::timestamp("RELEASED_DTTM"),
        Column::decimal("TRIP_VALUE"),
        Column::text("TRUCK_ID", 100),
        Column::text("TRUCK_FLEET_ID", 100),
        Column::text("TRUCK_FLEET_NAME", 100),
        Column::text("TRAILER_ID", 100),
        Column::text("TRAILER_TYPE", 50),
        Column::text("DRIVER1_ID", 100),
        Column::text("DRIVER1_TYPE", 50),
        Column::text("DRIVER1_FLEET_ID", 100),
        Column::text("DRIVER2_ID", 100),
        Column::text("DRIVER2_TYPE", 50),
        Column::text("DRIVER2_FLEET_ID", 100),
        Column::text("OWNER_OPERATOR_ID", 100),
        Column::text("RELEASED_BY", 100),
        Column::text("DISPATCHED_BY", 100),
        Column::text("DISPATCHER_ID", 100),
        Column::integer("IS_CARRIER_PAY_ON_HOLD"),
        Column::text("CARRIER_ID", 100),
        Column::text("CARRIER_INVOICE", 100),
        Column::decimal("CARRIER_RATE"),
        Column::decimal("CARRIER_LINEHAUL"),
        Column::decimal("CARRIER_FUEL"),
        Column::decimal("CARRIER_ACCESSORIALS"),
        Column::decimal("CARRIER_TOTAL_PAYABLE"),
        Column::timestamp("UPDATED_DTTM"),
        FILE_ID,
    ],
};

pub static TRIP_STOPS: TableSpec = TableSpec {
    name: "TRIP_STOPS_RAW",
    columns: &[
        Column::text("ID", 100),
        Column::text("TRIP_ID", 100),
        Column::text("TRIP_NUMBER", 100),
        Column::integer("STOP_SEQUENCE"),
        Column::integer("IS_APPOINTMENT_REQUESTED"),
        Column::integer("IS_APPOINTMENT_CONFIRMED"),
        Column::timestamp("EARLIEST_APPOINTMENT_DTTM"),
        Column::timestamp("LATEST_APPOINTMENT_DTTM"),
        Column::text("STREET_ADDRESS", 200),
        Column::text("CITY", 100),
        Column::text("STATE_PROVINCE", 50),
        Column::text("POSTAL_CD", 20),
        Column::decimal("LATITUDE"),
        Column::decimal("LONGITUDE"),
        Column::text("STOP_STATUS", 50),
        Column::text("STOP_TYPE", 50),
        Column::text("STOP_SCHEDULE_TYPE", 50),
        Column::text("LOADING_TYPE", 50),
        Column::timestamp("ARRIVED_DTTM"),
        Column::timestamp("DEPARTED_DTTM"),
        FILE_ID,
    ],
};

pub static LOADS: TableSpec = TableSpec {
    name: "LOADS_RAW",
    columns: &[
        Column::text("ID", TEXT),
        Column::text("LOAD_NUMBER", TEXT),
        Column::text("LOAD_STATUS", TEXT),
        Column::text("CUSTOMER_ID", TEXT),
        Column::text("CUSTOMER_NAME", TEXT),
        Column::text("PO_NUMBER", TEXT),
        Column::text("EQUIPMENT_TYPE", TEXT),
        Column::decimal("WEIGHT"),
        Column::decimal("TOTAL_MILEAGE"),
        Column::decimal("CUSTOMER_RATE"),
        Column::timestamp("PICKUP_DTTM"),
        Column::timestamp("DELIVERY_DTTM"),
        Column::timestamp("CREATED_DTTM"),
        Column::timestamp("UPDATED_DTTM"),
        FILE_ID,
    ],
};

pub static INVOICES: TableSpec = TableSpec {
    name: "INVOICES_RAW",
    columns: &[
        Column::text("ID", TEXT),
        Column::text("INVOICE_NUMBER", TEXT),
        Column::text("INVOICE_STATUS", TEXT),
        Column::text("LOAD_NUMBER", TEXT),
        Column::text("CUSTOMER_ID", TEXT),
        Column::text("CUSTOMER_NAME", TEXT),
        Column::decimal("INVOICE_AMOUNT"),
        Column::decimal("PAID_AMOUNT"),
        Column::decimal("BALANCE_DUE"),
        Column::timestamp("INVOICED_DTTM"),
        Column::timestamp("DUE_DTTM"),
        Column::timestamp("PAID_DTTM"),
        Column::timestamp("UPDATED_DTTM"),
        FILE_ID,
    ],
};

pub static DRIVERS: TableSpec = TableSpec {
    name: "DRIVERS_RAW",
    columns: &[
        Column::text("ID", TEXT),
        Column::text("EMPLOYEE_ID", TEXT),
        Column::text("DRIVER_TYPE", TEXT),
        Column::text("SUBSIDIARY_ID", TEXT),
        Column::text("ZIP_CODE", TEXT),
        Column::text("FLEET_ID", TEXT),
        Column::text("FLEET_NAME", TEXT),
        Column::timestamp("CREATED_DTTM"),
        Column::integer("IS_ACTIVE"),
        Column::timestamp("HIRED_DTTM"),
        FILE_ID,
    ],
};

pub static TRUCKS: TableSpec = TableSpec {
    name: "TRUCKS_RAW",
    columns: &[
        Column::text("ID", TEXT),
        Column::text("TRUCK_NUM", TEXT),
        Column::text("VIN_NUMBER", TEXT),
        Column::text("YEAR", TEXT),
        Column::text("MAKE", TEXT),
        Column::text("MODEL", TEXT),
        Column::text("LICENSE_STATE", TEXT),
        Column::text("TRUCK_TYPE", TEXT),
        Column::text("SUBSIDIARY_ID", TEXT),
        Column::text("FLEET_ID", TEXT),
        Column::text("FLEET_NAME", TEXT),
        Column::timestamp("CREATED_DTTM"),
        FILE_ID,
    ],
};

pub static TRUCKS_EXTENDED: TableSpec = TableSpec {
    name: "TRUCKS_RAW",
    columns: &[
        Column::text("ID", TEXT),
        Column::text("TRUCK_NUM", TEXT),
        Column::text("TRUCK_STATUS", TEXT),
        Column::text("VIN_NUMBER", TEXT),
        Column::text("YEAR", TEXT),
        Column::text("MAKE", TEXT),
        Column::text("MODEL", TEXT),
        Column::text("LICENSE_STATE", TEXT),
        Column::text("TRUCK_TYPE", TEXT),
        Column::text("SUBSIDIARY_ID", TEXT),
        Column::text("FLEET_ID", TEXT),
        Column::text("FLEET_NAME", TEXT),
        Column::timestamp("CREATED_DTTM"),
        FILE_ID,
    ],
};

pub static TRAILERS: TableSpec = TableSpec {
    name: "TRAILERS_RAW",
    columns: &[
        Column::text("ID", TEXT),
        Column::text("TRAILER_NUM", TEXT),
        Column::text("TRAILER_TYPE", TEXT),
        Column::text("TRAILER_STATUS", TEXT),
        Column::timestamp("CREATED_DTTM"),
        FILE_ID,
    ],
};

pub static CUSTOMERS: TableSpec = TableSpec {
    name: "CUSTOMERS_RAW",
    columns: &[
        Column::text("ID", TEXT),
        Column::text("CUSTOMER_NAME", TEXT),
        Column::text("COMPANY_NUMBER", TEXT),
        Column::text("CUSTOMER_TYPE", TEXT),
        Column::text("CUSTOMER_STATUS", TEXT),
        Column::text("BILLING_ADDRESS", TEXT),
        Column::timestamp("CREATED_DTTM"),
        Column::text("INVOICING_NAME", TEXT),
        Column::text("INVOICING_ALIAS", TEXT),
        FILE_ID,
    ],
};

pub static CUSTOMERS_EXTENDED: TableSpec = TableSpec {
    name: "CUSTOMERS_RAW",
    columns: &[
        Column::text("ID", TEXT),
        Column::text("CUSTOMER_NAME", TEXT),
        Column::text("COMPANY_NUMBER", TEXT),
        Column::text("CUSTOMER_TYPE", TEXT),
        Column::text("CUSTOMER_STATUS", TEXT),
        Column::text("BILLING_ADDRESS", TEXT),
        Column::text("CITY", TEXT),
        Column::text("STATE_PROVINCE", TEXT),
        Column::text("POSTAL_CD", TEXT),
        Column::text("INVOICING_NAME", TEXT),
        Column::text("INVOICING_ALIAS", TEXT),
        Column::timestamp("CREATED_DTTM"),
        FILE_ID,
    ],
};

pub static CARRIERS: TableSpec = TableSpec {
    name: "CARRIERS_RAW",
    columns: &[
        Column::text("ID", TEXT),
        Column::text("CARRIER_NAME", TEXT),
        Column::text("EXTERNAL_NAME", TEXT),
        Column::text("CITY", TEXT),
        Column::text("STATE", TEXT),
        Column::text("ZIP", TEXT),
        Column::text("MC_NUM", TEXT),
        Column::text("US_DOT_NUM", TEXT),
        Column::text("CARRIER_TYPE", TEXT),
        Column::text("CARRIER_STATUS", TEXT),
        Column::text("CARRIER_SOURCE", TEXT),
        Column::timestamp("UPDATED_DTTM"),
        Column::timestamp("CREATED_DTTM"),
        FILE_ID,
    ],
};

/// Truck table for `layout`
pub fn trucks(layout: SchemaLayout) -> &'static TableSpec {
    match layout {
        SchemaLayout::Standard => &TRUCKS,
        SchemaLayout::Extended => &TRUCKS_EXTENDED,
    }
}

/// Customer table for `layout`
pub fn customers(layout: SchemaLayout) -> &'static TableSpec {
    match layout {
        SchemaLayout::Standard => &CUSTOMERS,
        SchemaLayout::Extended => &CUSTOMERS_EXTENDED,
    }
}

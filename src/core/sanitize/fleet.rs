//! Driver, truck and trailer rows

use super::fields::{flag, text, timestamp, RowBuilder};
use super::tables::{self, DRIVERS, TRAILERS};
use crate::config::SchemaLayout;
use crate::domain::{RawRecord, SanitizedRow, FILE_ID_KEY};

pub fn sanitize_driver(d: &RawRecord) -> SanitizedRow {
    RowBuilder::new(&DRIVERS)
        .set("ID", text(d, "Id"))
        .set("EMPLOYEE_ID", text(d, "EmployeeId"))
        .set("DRIVER_TYPE", text(d, "Type"))
        .set("SUBSIDIARY_ID", text(d, "SubsidiaryId"))
        .set("ZIP_CODE", text(d, "Address.ZipCode"))
        .set("FLEET_ID", text(d, "Fleet.Id"))
        .set("FLEET_NAME", text(d, "Fleet.Name"))
        .set("CREATED_DTTM", timestamp(d, "CreatedAt"))
        .set("IS_ACTIVE", flag(d, "IsActive"))
        .set("HIRED_DTTM", timestamp(d, "HiredAt"))
        .set("FILE_ID", text(d, FILE_ID_KEY))
        .build()
}

/// Truck row; `TRUCK_STATUS` is only carried by the extended layout
pub fn sanitize_truck(t: &RawRecord, layout: SchemaLayout) -> SanitizedRow {
    RowBuilder::new(tables::trucks(layout))
        .set("ID", text(t, "Id"))
        .set("TRUCK_NUM", text(t, "TruckNum"))
        .set("TRUCK_STATUS", text(t, "Status"))
        .set("VIN_NUMBER", text(t, "VinNumber"))
        .set("YEAR", text(t, "Year"))
        .set("MAKE", text(t, "Make"))
        .set("MODEL", text(t, "Model"))
        .set("LICENSE_STATE", text(t, "LicenseState"))
        .set("TRUCK_TYPE", text(t, "TruckType"))
        .set("SUBSIDIARY_ID", text(t, "SubsidiaryId"))
        .set("FLEET_ID", text(t, "Fleet.Id"))
        .set("FLEET_NAME", text(t, "Fleet.Name"))
        .set("CREATED_DTTM", timestamp(t, "CreatedAt"))
        .set("FILE_ID", text(t, FILE_ID_KEY))
        .build()
}

pub fn sanitize_trailer(t: &RawRecord) -> SanitizedRow {
    RowBuilder::new(&TRAILERS)
        .set("ID", text(t, "Id"))
        .set("TRAILER_NUM", text(t, "TrailerNum"))
        .set("TRAILER_TYPE", text(t, "TrailerType"))
        .set("TRAILER_STATUS", text(t, "Status"))
        .set("CREATED_DTTM", timestamp(t, "CreatedAt"))
        .set("FILE_ID", text(t, FILE_ID_KEY))
        .build()
}

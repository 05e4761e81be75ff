//! Per-entity ingest handlers
//!
//! Every entity has one handler turning its raw records into table batches.
//! Trips produce two batches (trips and stops); the others produce one.

use crate::config::SchemaLayout;
use crate::core::sanitize::{
    self, flatten_trip,
    tables::{self, CARRIERS, DRIVERS, INVOICES, LOADS, TRAILERS, TRIPS, TRIP_STOPS},
};
use crate::domain::{EntityKind, RawRecord, SanitizedRow, TableSpec};
use std::collections::BTreeMap;

/// Sanitized rows bound for one table
#[derive(Debug, Clone, PartialEq)]
pub struct TableBatch {
    pub table: &'static TableSpec,
    pub rows: Vec<SanitizedRow>,
}

impl TableBatch {
    pub fn new(table: &'static TableSpec) -> Self {
        Self {
            table,
            rows: Vec::new(),
        }
    }
}

/// Common ingest interface
pub trait IngestHandler: Send + Sync {
    fn entity(&self) -> EntityKind;

    /// Target tables, in write order
    fn tables(&self) -> Vec<&'static TableSpec>;

    /// Sanitizes `records` into one batch per table in [`Self::tables`] order
    fn sanitize(&self, records: &[RawRecord]) -> Vec<TableBatch>;
}

/// Trips fan out into a trip row plus one row per stop
pub struct TripHandler;

impl IngestHandler for TripHandler {
    fn entity(&self) -> EntityKind {
        EntityKind::Trips
    }

    fn tables(&self) -> Vec<&'static TableSpec> {
        vec![&TRIPS, &TRIP_STOPS]
    }

    fn sanitize(&self, records: &[RawRecord]) -> Vec<TableBatch> {
        let mut trips = TableBatch::new(&TRIPS);
        let mut stops = TableBatch::new(&TRIP_STOPS);

        for record in records {
            let rows = flatten_trip(record);
            trips.rows.push(rows.trip);
            stops.rows.extend(rows.stops);
        }

        vec![trips, stops]
    }
}

type RowFn = Box<dyn Fn(&RawRecord) -> SanitizedRow + Send + Sync>;

/// One record, one row
pub struct SingleTableHandler {
    entity: EntityKind,
    table: &'static TableSpec,
    sanitize: RowFn,
}

impl SingleTableHandler {
    pub fn new(
        entity: EntityKind,
        table: &'static TableSpec,
        sanitize: impl Fn(&RawRecord) -> SanitizedRow + Send + Sync + 'static,
    ) -> Self {
        Self {
            entity,
            table,
            sanitize: Box::new(sanitize),
        }
    }
}

impl IngestHandler for SingleTableHandler {
    fn entity(&self) -> EntityKind {
        self.entity
    }

    fn tables(&self) -> Vec<&'static TableSpec> {
        vec![self.table]
    }

    fn sanitize(&self, records: &[RawRecord]) -> Vec<TableBatch> {
        vec![TableBatch {
            table: self.table,
            rows: records.iter().map(|r| (self.sanitize)(r)).collect(),
        }]
    }
}

/// Handlers keyed by entity
pub struct HandlerRegistry {
    handlers: BTreeMap<EntityKind, Box<dyn IngestHandler>>,
}

impl HandlerRegistry {
    pub fn empty() -> Self {
        Self {
            handlers: BTreeMap::new(),
        }
    }

    /// Handlers for all eight entities using `layout` for trucks and
    /// customers
    pub fn standard(layout: SchemaLayout) -> Self {
        let mut registry = Self::empty();
        registry.register(TripHandler);
        registry.register(SingleTableHandler::new(
            EntityKind::Loads,
            &LOADS,
            sanitize::sanitize_load,
        ));
        registry.register(SingleTableHandler::new(
            EntityKind::Invoices,
            &INVOICES,
            sanitize::sanitize_invoice,
        ));
        registry.register(SingleTableHandler::new(
            EntityKind::Drivers,
            &DRIVERS,
            sanitize::sanitize_driver,
        ));
        registry.register(SingleTableHandler::new(
            EntityKind::Trucks,
            tables::trucks(layout),
            move |r| sanitize::sanitize_truck(r, layout),
        ));
        registry.register(SingleTableHandler::new(
            EntityKind::Trailers,
            &TRAILERS,
            sanitize::sanitize_trailer,
        ));
        registry.register(SingleTableHandler::new(
            EntityKind::Customers,
            tables::customers(layout),
            move |r| sanitize::sanitize_customer(r, layout),
        ));
        registry.register(SingleTableHandler::new(
            EntityKind::Carriers,
            &CARRIERS,
            sanitize::sanitize_carrier,
        ));
        registry
    }

    /// Adds `handler`, replacing any handler for the same entity
    pub fn register(&mut self, handler: impl IngestHandler + 'static) {
        self.handlers.insert(handler.entity(), Box::new(handler));
    }

    pub fn get(&self, entity: EntityKind) -> Option<&dyn IngestHandler> {
        self.handlers.get(&entity).map(|h| h.as_ref())
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

//! epifund-data — Dataset Loader.
//!
//! Reads the five tabular source files (xlsx/csv) into immutable in-memory
//! Datasets:
//!   1. Explicit schema per source, checked against the header row
//!   2. Typed cell parsing (years, money, dates), empty cells become null
//!   3. Baseline row filters (e.g. the NIH export's `Fiscal Year == 0` rows)
//!   4. Process-wide read-only `DataStore` populated once at startup

pub mod loader;
pub mod model;
pub mod readers;
pub mod schema;
pub mod sources;
pub mod store;

pub use loader::load_dataset;
pub use model::{Dataset, GroupKey, GroupValue, Record};
pub use schema::{ColumnSpec, ColumnType, SchemaDescriptor, Value};
pub use sources::{spec_for, SourceSpec};
pub use store::{DataStore, DatasetSlot};

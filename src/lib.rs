//! Normalization, filtering and aggregation engine for care-visit exports.

pub mod aggregate;
pub mod caregivers;
pub mod columns;
pub mod dates;
pub mod error;
pub mod filter;
pub mod ingest;
pub mod models;
pub mod names;
pub mod operational;
pub mod quality;
pub mod report;
pub mod residents;
pub mod session;
pub mod status;

pub use aggregate::{CaregiverMode, Tab};
pub use error::IngestError;
pub use filter::{Dimension, Filter};
pub use models::{
    Aggregation, CareRecord, CellValue, DashboardView, Field, RawRow, UNSPECIFIED,
};
pub use session::Session;

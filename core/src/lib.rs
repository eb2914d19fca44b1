//! manzi-core — synthetic data backbone for the Manzi Water executive
//! dashboard.
//!
//! Two generators build the in-memory tables the dashboard renders from:
//! a daily KPI series (reservoir levels, leakage, pump uptime, ...) and a
//! set of geo-located field incidents around fixed anchor cities. A
//! stateless filter stage derives read-only views from either table.
//!
//! RULES:
//!   - All randomness flows through seeded streams from the RngBank.
//!     Nothing here may call a platform RNG or read the wall clock.
//!   - Generated tables are immutable. Filters and views always return
//!     fresh data, never mutate a source table.
//!   - Precondition violations (bad date range, malformed anchors, weights
//!     that don't sum to 1) fail at construction, never silently correct.

pub mod cache;
pub mod config;
pub mod error;
pub mod filter;
pub mod geo;
pub mod kpi;
pub mod rng;
pub mod types;
pub mod view;

pub use config::DashboardConfig;
pub use error::{DataError, DataResult};
pub use filter::{DateRange, IncidentFilter};
pub use geo::{GeoIncident, IncidentType, Severity};
pub use kpi::KpiRecord;
pub use view::DashboardSnapshot;

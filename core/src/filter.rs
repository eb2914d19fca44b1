//! Filter/query stage — stateless transforms over the generated tables.
//!
//! RULES:
//!   - Active predicates AND-compose and commute; applying them in any
//!     order yields the same result set.
//!   - Source ordering is preserved.
//!   - An empty or out-of-bounds request yields an empty view, never an
//!     error. The source table is never mutated.

use crate::{
    geo::{GeoIncident, IncidentType, Severity},
    kpi::KpiRecord,
    types::Days,
};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Inclusive date bounds for KPI queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Narrow a KPI table to the records inside `range`, preserving order.
pub fn filter_kpis(records: &[KpiRecord], range: DateRange) -> Vec<KpiRecord> {
    records
        .iter()
        .copied()
        .filter(|r| range.contains(r.date))
        .collect()
}

/// AND-composed incident predicates. `None` means pass-through.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct IncidentFilter {
    pub incident_type: Option<IncidentType>,
    pub severity: Option<Severity>,
    /// Keep incidents with `timestamp >= now - max_age_days`.
    /// A negative age puts the cutoff in the future and matches nothing.
    pub max_age_days: Option<Days>,
}

impl IncidentFilter {
    fn matches(&self, incident: &GeoIncident, now: DateTime<Utc>) -> bool {
        if let Some(t) = self.incident_type {
            if incident.incident_type != t {
                return false;
            }
        }
        if let Some(s) = self.severity {
            if incident.severity != s {
                return false;
            }
        }
        if let Some(days) = self.max_age_days {
            if incident.timestamp < now - Duration::days(days) {
                return false;
            }
        }
        true
    }

    /// Derive a filtered view. The source slice stays untouched.
    pub fn apply(&self, incidents: &[GeoIncident], now: DateTime<Utc>) -> Vec<GeoIncident> {
        incidents
            .iter()
            .filter(|i| self.matches(i, now))
            .cloned()
            .collect()
    }
}

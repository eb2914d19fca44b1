//! Presentation-boundary views.
//!
//! Everything the dashboard renders from is derived here: the most
//! recent KPI row for the card strip, incident counts for the summary
//! panels, and the critical-alert list. Views are plain data — the
//! rendering layer consumes them as JSON.

use crate::{
    geo::{GeoIncident, IncidentType, Severity},
    kpi::KpiRecord,
};
use serde::{Deserialize, Serialize};

const INCIDENT_TYPES: [IncidentType; 3] = [
    IncidentType::PipeBurst,
    IncidentType::PumpOutage,
    IncidentType::RefillStation,
];

const SEVERITIES: [Severity; 3] = [Severity::High, Severity::Medium, Severity::Low];

/// The most recent KPI row of an (ascending) view, for the KPI cards.
pub fn latest_kpi(records: &[KpiRecord]) -> Option<&KpiRecord> {
    records.last()
}

/// Incident counts per type, fixed set order, zeros included.
pub fn counts_by_type(incidents: &[GeoIncident]) -> Vec<(IncidentType, usize)> {
    INCIDENT_TYPES
        .iter()
        .map(|t| (*t, incidents.iter().filter(|i| i.incident_type == *t).count()))
        .collect()
}

/// Incident counts per severity, highest grade first, zeros included.
pub fn counts_by_severity(incidents: &[GeoIncident]) -> Vec<(Severity, usize)> {
    SEVERITIES
        .iter()
        .map(|s| (*s, incidents.iter().filter(|i| i.severity == *s).count()))
        .collect()
}

/// The first `limit` High-severity incidents of a view, source order.
pub fn critical_alerts(incidents: &[GeoIncident], limit: usize) -> Vec<&GeoIncident> {
    incidents
        .iter()
        .filter(|i| i.severity == Severity::High)
        .take(limit)
        .collect()
}

/// One serializable bundle of everything the dashboard shell needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub latest: Option<KpiRecord>,
    pub kpi_rows: usize,
    pub incident_total: usize,
    pub incidents_by_type: Vec<(IncidentType, usize)>,
    pub incidents_by_severity: Vec<(Severity, usize)>,
    pub critical_alerts: Vec<GeoIncident>,
}

/// How many critical alerts the snapshot carries.
pub const CRITICAL_ALERT_LIMIT: usize = 5;

impl DashboardSnapshot {
    /// Build from already-filtered views of both tables.
    pub fn build(kpis: &[KpiRecord], incidents: &[GeoIncident]) -> Self {
        Self {
            latest: latest_kpi(kpis).copied(),
            kpi_rows: kpis.len(),
            incident_total: incidents.len(),
            incidents_by_type: counts_by_type(incidents),
            incidents_by_severity: counts_by_severity(incidents),
            critical_alerts: critical_alerts(incidents, CRITICAL_ALERT_LIMIT)
                .into_iter()
                .cloned()
                .collect(),
        }
    }
}

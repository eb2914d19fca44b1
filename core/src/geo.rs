//! Geo-incident generation — the map layer's data source.
//!
//! Each anchor city gets an independently drawn number of incidents.
//! Every incident is placed at the anchor coordinates plus a bounded
//! uniform jitter, typed and graded from weighted category sets, and
//! stamped with a timestamp inside the recency window.
//!
//! Invariants:
//!   - Every incident belongs to exactly one anchor city.
//!   - Jitter never exceeds the configured bound on either axis.
//!   - Type and severity are always members of their fixed sets.

use crate::{
    config::GeoConfig,
    error::DataResult,
    rng::StreamRng,
};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A fixed named point around which incident coordinates are jittered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub city: String,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncidentType {
    PipeBurst,
    PumpOutage,
    RefillStation,
}

impl IncidentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PipeBurst => "pipe_burst",
            Self::PumpOutage => "pump_outage",
            Self::RefillStation => "refill_station",
        }
    }
}

/// Ordinal severity grades, highest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

/// One field incident on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoIncident {
    pub city: String,
    pub lat: f64,
    pub lon: f64,
    pub incident_type: IncidentType,
    pub severity: Severity,
    pub timestamp: DateTime<Utc>,
}

/// Pick from an ordered weighted distribution.
/// Same cumulative-weight walk for types and severities; the weights are
/// validated to sum to 1.0 before generation starts.
fn pick_weighted<T: Copy>(rng: &mut StreamRng, weights: &[(T, f64)]) -> T {
    let roll = rng.next_f64();
    let mut cumulative = 0.0;
    for (value, weight) in weights {
        cumulative += weight;
        if roll < cumulative {
            return *value;
        }
    }
    // roll landed in the float-rounding tail; last entry wins
    weights[weights.len() - 1].0
}

/// Generate the full incident table: one pass per anchor, count drawn
/// from the configured inclusive range.
///
/// `now` is injected by the caller so generation is a pure function of
/// (config, now, RNG stream) and safe to memoize.
pub fn generate_incidents(
    config: &GeoConfig,
    now: DateTime<Utc>,
    rng: &mut StreamRng,
) -> DataResult<Vec<GeoIncident>> {
    config.validate()?;

    let (lo, hi) = config.incidents_per_anchor;
    let mut incidents = Vec::new();

    for anchor in &config.anchors {
        let count = rng.next_u64_in(lo as u64, hi as u64);

        for _ in 0..count {
            let incident_type = pick_weighted(rng, &config.type_weights);
            let lat_offset = rng.uniform(-config.jitter_degrees, config.jitter_degrees);
            let lon_offset = rng.uniform(-config.jitter_degrees, config.jitter_degrees);
            let severity = pick_weighted(rng, &config.severity_weights);
            let age_days = rng.next_u64_below(config.recency_days as u64) as i64;

            incidents.push(GeoIncident {
                city: anchor.city.clone(),
                lat: anchor.lat + lat_offset,
                lon: anchor.lon + lon_offset,
                incident_type,
                severity,
                timestamp: now - Duration::days(age_days),
            });
        }
    }

    log::debug!(
        "geo: generated {} incidents across {} anchors",
        incidents.len(),
        config.anchors.len()
    );

    Ok(incidents)
}

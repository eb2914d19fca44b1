//! Generation config — metric profiles, anchor list, category weights.
//!
//! Two ways to build a config: `DashboardConfig::load` reads the JSON
//! files under data/, `DashboardConfig::builtin` carries the same values
//! hardcoded. Tests use `builtin()`.
//!
//! All precondition checks live in the validate() methods here. The
//! generators call them before drawing anything, so a malformed config
//! is rejected up front instead of producing a skewed table.

use crate::{
    error::{DataError, DataResult},
    geo::{Anchor, IncidentType, Severity},
};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Tolerance for "weights sum to 1.0" checks.
const WEIGHT_TOLERANCE: f64 = 1e-9;

/// Adjustment applied to a metric's pre-noise value inside the shock window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShockEffect {
    None,
    Add(f64),
    Scale(f64),
}

impl ShockEffect {
    pub fn apply(&self, value: f64) -> f64 {
        match self {
            Self::None => value,
            Self::Add(delta) => value + delta,
            Self::Scale(factor) => value * factor,
        }
    }
}

/// Shape of one KPI metric: deterministic base plus noise, then clamp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricProfile {
    pub base_mean: f64,
    /// Sinusoid amplitude over day-of-year; 0.0 = no seasonality.
    pub seasonal_amplitude: f64,
    /// Linear drift per year of offset from the range start.
    pub trend_per_year: f64,
    pub shock: ShockEffect,
    pub noise_std: f64,
    /// Inclusive clamp bounds. Every generated value lands in [min, max].
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiConfig {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub reservoir_level: MetricProfile,
    pub leakage_rate: MetricProfile,
    pub pump_uptime: MetricProfile,
    pub billing_efficiency: MetricProfile,
    pub energy_cost: MetricProfile,
    pub compliance: MetricProfile,
    pub csat: MetricProfile,
}

impl KpiConfig {
    pub fn validate(&self) -> DataResult<()> {
        if self.end < self.start {
            return Err(DataError::InvalidDateRange {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }

    /// The shock window: Q2 (April–June) of the final year in range,
    /// modeling the load-shedding disruption. One predicate shared by
    /// every affected metric.
    pub fn shock_window_contains(&self, date: NaiveDate) -> bool {
        date.year() == self.end.year() && (4..=6).contains(&date.month())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoConfig {
    pub anchors: Vec<Anchor>,
    /// Inclusive range of incident counts drawn per anchor.
    pub incidents_per_anchor: (u32, u32),
    pub type_weights: Vec<(IncidentType, f64)>, // ordered, not HashMap
    pub severity_weights: Vec<(Severity, f64)>, // ordered, not HashMap
    /// Symmetric uniform jitter bound, degrees, applied per axis.
    pub jitter_degrees: f64,
    /// Incident timestamps fall within [now - recency_days, now].
    pub recency_days: u32,
}

impl GeoConfig {
    pub fn validate(&self) -> DataResult<()> {
        let mut seen = HashSet::new();
        for anchor in &self.anchors {
            if !seen.insert(anchor.city.as_str()) {
                return Err(DataError::DuplicateAnchor {
                    city: anchor.city.clone(),
                });
            }
            if !(-90.0..=90.0).contains(&anchor.lat) || !(-180.0..=180.0).contains(&anchor.lon) {
                return Err(DataError::CoordinateOutOfRange {
                    city: anchor.city.clone(),
                    lat: anchor.lat,
                    lon: anchor.lon,
                });
            }
        }

        if self.jitter_degrees < 0.0 {
            return Err(DataError::NegativeJitter {
                bound: self.jitter_degrees,
            });
        }

        let (lo, hi) = self.incidents_per_anchor;
        if hi < lo {
            return Err(DataError::EmptyCountRange { lo, hi });
        }

        if self.recency_days == 0 {
            return Err(DataError::EmptyRecencyWindow {
                days: self.recency_days,
            });
        }

        check_weights("incident type", self.type_weights.iter().map(|(_, w)| *w))?;
        check_weights("severity", self.severity_weights.iter().map(|(_, w)| *w))?;

        Ok(())
    }
}

fn check_weights(context: &'static str, weights: impl Iterator<Item = f64>) -> DataResult<()> {
    let sum: f64 = weights.sum();
    if (sum - 1.0).abs() > WEIGHT_TOLERANCE {
        return Err(DataError::BadWeights { context, sum });
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub kpi: KpiConfig,
    pub geo: GeoConfig,
}

impl DashboardConfig {
    /// Load from the data/ directory and validate.
    pub fn load(data_dir: &str) -> DataResult<Self> {
        let kpi_path = format!("{data_dir}/kpi_metrics.json");
        let kpi_content = std::fs::read_to_string(&kpi_path)
            .map_err(|e| anyhow::anyhow!("Cannot read {kpi_path}: {e}"))?;
        let kpi: KpiConfig = serde_json::from_str(&kpi_content)?;

        let geo_path = format!("{data_dir}/geo_incidents.json");
        let geo_content = std::fs::read_to_string(&geo_path)
            .map_err(|e| anyhow::anyhow!("Cannot read {geo_path}: {e}"))?;
        let geo: GeoConfig = serde_json::from_str(&geo_content)?;

        kpi.validate()?;
        geo.validate()?;

        Ok(Self { kpi, geo })
    }

    /// Hardcoded config matching the production dashboard.
    /// Also the config used throughout the test suites.
    pub fn builtin() -> Self {
        let kpi = KpiConfig {
            start: NaiveDate::from_ymd_opt(2022, 1, 1).expect("valid calendar date"),
            end: NaiveDate::from_ymd_opt(2024, 12, 31).expect("valid calendar date"),
            reservoir_level: MetricProfile {
                base_mean: 75.0,
                seasonal_amplitude: 20.0,
                trend_per_year: 0.0,
                shock: ShockEffect::Add(-15.0),
                noise_std: 5.0,
                min: 20.0,
                max: 100.0,
            },
            leakage_rate: MetricProfile {
                base_mean: 25.0,
                seasonal_amplitude: 0.0,
                trend_per_year: -2.0,
                shock: ShockEffect::None,
                noise_std: 2.0,
                min: 10.0,
                max: 40.0,
            },
            pump_uptime: MetricProfile {
                base_mean: 95.0,
                seasonal_amplitude: 0.0,
                trend_per_year: 0.0,
                shock: ShockEffect::Add(-5.0),
                noise_std: 3.0,
                min: 80.0,
                max: 100.0,
            },
            billing_efficiency: MetricProfile {
                base_mean: 85.0,
                seasonal_amplitude: 0.0,
                trend_per_year: 0.0,
                shock: ShockEffect::None,
                noise_std: 5.0,
                min: 70.0,
                max: 100.0,
            },
            energy_cost: MetricProfile {
                base_mean: 2.5,
                seasonal_amplitude: 0.0,
                trend_per_year: 0.3,
                shock: ShockEffect::Scale(1.4),
                noise_std: 0.2,
                min: 1.0,
                max: 10.0,
            },
            compliance: MetricProfile {
                base_mean: 96.0,
                seasonal_amplitude: 0.0,
                trend_per_year: 0.0,
                shock: ShockEffect::None,
                noise_std: 2.0,
                min: 85.0,
                max: 100.0,
            },
            csat: MetricProfile {
                base_mean: 78.0,
                seasonal_amplitude: 0.0,
                trend_per_year: 0.0,
                shock: ShockEffect::Add(-3.0),
                noise_std: 4.0,
                min: 60.0,
                max: 100.0,
            },
        };

        let geo = GeoConfig {
            anchors: vec![
                anchor("Johannesburg", -26.2041, 28.0473),
                anchor("Cape Town", -33.9249, 18.4241),
                anchor("Durban", -29.8587, 31.0218),
                anchor("Pretoria", -25.7479, 28.2293),
                anchor("Port Elizabeth", -33.9608, 25.6022),
                anchor("Bloemfontein", -29.0852, 26.1596),
                anchor("East London", -33.0153, 27.9116),
                anchor("Polokwane", -23.9045, 29.4689),
                anchor("Nelspruit", -25.4653, 30.9700),
                anchor("Kimberley", -28.7282, 24.7499),
            ],
            incidents_per_anchor: (5, 14),
            type_weights: vec![
                (IncidentType::PipeBurst, 0.4),
                (IncidentType::PumpOutage, 0.3),
                (IncidentType::RefillStation, 0.3),
            ],
            severity_weights: vec![
                (Severity::High, 0.2),
                (Severity::Medium, 0.5),
                (Severity::Low, 0.3),
            ],
            jitter_degrees: 0.1,
            recency_days: 30,
        };

        Self { kpi, geo }
    }
}

fn anchor(city: &str, lat: f64, lon: f64) -> Anchor {
    Anchor {
        city: city.to_string(),
        lat,
        lon,
    }
}

//! Time-series KPI generation — one record per calendar day.
//!
//! Each metric value is built the same way, in a fixed order:
//!   1. seasonal base     — sinusoid on day-of-year
//!   2. trend adjustment  — linear in year-offset from the range start
//!   3. shock adjustment  — only inside the shock window (Q2 of the
//!                          final year in range), one shared predicate
//!   4. Gaussian noise    — metric-specific standard deviation
//!   5. clamp             — inclusive [min, max] bounds per metric
//!
//! The metric evaluation order is fixed and documented on KpiRecord.
//! Reordering changes which noise draw each metric consumes and breaks
//! replay compatibility.

use crate::{
    config::{KpiConfig, MetricProfile},
    error::DataResult,
    rng::StreamRng,
};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// One day of dashboard KPIs.
///
/// Field order is the metric evaluation order — append-only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KpiRecord {
    pub date: NaiveDate,
    pub reservoir_level: f64,
    pub leakage_rate: f64,
    pub pump_uptime: f64,
    pub billing_efficiency: f64,
    pub energy_cost: f64,
    pub compliance: f64,
    pub csat: f64,
}

/// Evaluate a single metric for a single day.
fn metric_value(
    profile: &MetricProfile,
    day_of_year: u32,
    year_offset: i32,
    in_shock: bool,
    rng: &mut StreamRng,
) -> f64 {
    let seasonal = profile.seasonal_amplitude
        * (std::f64::consts::TAU * day_of_year as f64 / 365.0).sin();
    let mut value = profile.base_mean + seasonal + profile.trend_per_year * year_offset as f64;
    if in_shock {
        value = profile.shock.apply(value);
    }
    value += rng.gaussian(0.0, profile.noise_std);
    value.clamp(profile.min, profile.max)
}

/// Generate the daily KPI table for the configured date range.
///
/// Produces exactly `(end - start).num_days() + 1` records with strictly
/// ascending, gapless dates. An end date before the start date is a
/// precondition violation and fails fast.
pub fn generate_kpi_series(config: &KpiConfig, rng: &mut StreamRng) -> DataResult<Vec<KpiRecord>> {
    config.validate()?;

    let days = (config.end - config.start).num_days() + 1;
    let mut records = Vec::with_capacity(days as usize);

    for date in config.start.iter_days().take(days as usize) {
        let day_of_year = date.ordinal();
        let year_offset = date.year() - config.start.year();
        let in_shock = config.shock_window_contains(date);

        records.push(KpiRecord {
            date,
            reservoir_level: metric_value(
                &config.reservoir_level, day_of_year, year_offset, in_shock, rng,
            ),
            leakage_rate: metric_value(
                &config.leakage_rate, day_of_year, year_offset, in_shock, rng,
            ),
            pump_uptime: metric_value(
                &config.pump_uptime, day_of_year, year_offset, in_shock, rng,
            ),
            billing_efficiency: metric_value(
                &config.billing_efficiency, day_of_year, year_offset, in_shock, rng,
            ),
            energy_cost: metric_value(
                &config.energy_cost, day_of_year, year_offset, in_shock, rng,
            ),
            compliance: metric_value(
                &config.compliance, day_of_year, year_offset, in_shock, rng,
            ),
            csat: metric_value(
                &config.csat, day_of_year, year_offset, in_shock, rng,
            ),
        });
    }

    log::debug!(
        "kpi: generated {} records for {}..{}",
        records.len(),
        config.start,
        config.end
    );

    Ok(records)
}

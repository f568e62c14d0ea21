use serde::{Deserialize, Serialize};

use crate::models::{FootData, FootZone, RiskLevel, Thresholds};

/// Weight of each of the two measurements in a zone's contribution.
const MEASUREMENT_WEIGHT: f64 = 50.0;
/// Four zones, each worth at most two weighted measurements.
const NORMALIZER: f64 = 8.0;

/// Composite 0–100 risk from the hottest/most loaded foot in every zone.
pub fn score(data: &FootData, thresholds: &Thresholds) -> f64 {
    let total: f64 = FootZone::ALL
        .into_iter()
        .map(|zone| {
            let left = data.left.get(zone);
            let right = data.right.get(zone);
            let pressure =
                left.pressure.max(right.pressure) / thresholds.pressure * MEASUREMENT_WEIGHT;
            let temperature = left.temperature.max(right.temperature) / thresholds.temperature
                * MEASUREMENT_WEIGHT;
            (pressure + temperature) / NORMALIZER
        })
        .sum();

    total.clamp(0.0, 100.0)
}

/// Gauge band shown next to a risk score.
pub fn risk_band(score: f64) -> RiskLevel {
    if score >= 70.0 {
        RiskLevel::High
    } else if score >= 40.0 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ZoneStatus {
    Normal,
    Elevated,
    Critical,
}

/// Heat-map status of one reading relative to its threshold.
pub fn zone_status(value: f64, threshold: f64) -> ZoneStatus {
    let ratio = value / threshold;
    if ratio < 0.7 {
        ZoneStatus::Normal
    } else if ratio < 0.9 {
        ZoneStatus::Elevated
    } else {
        ZoneStatus::Critical
    }
}

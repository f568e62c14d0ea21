use crate::models::{FootData, HealthFactors, HealthIndex, HealthLevel, NeuropathyStatus};

/// Evaluated top-down; statuses not listed score zero.
const NEUROPATHY_TABLE: &[(NeuropathyStatus, f64)] = &[
    (NeuropathyStatus::Severe, 25.0),
    (NeuropathyStatus::Moderate, 15.0),
    (NeuropathyStatus::Mild, 8.0),
];

/// `(exclusive lower bound on HbA1c, score)`, evaluated top-down; the first
/// bound exceeded wins.
const GLYCEMIC_TABLE: &[(f64, f64)] = &[(8.0, 20.0), (7.0, 12.0), (6.5, 6.0)];

/// `(exclusive upper bound on the raw total, level)`; anything above the
/// last bound is red.
const LEVEL_TABLE: &[(f64, HealthLevel)] = &[(45.0, HealthLevel::Green), (75.0, HealthLevel::Amber)];

const FOOT_PRESSURE_SCALE: f64 = 100.0;
const FOOT_SUBSCORE_WEIGHT: f64 = 25.0;
const FEVER_LINE: f64 = 36.0;
const FEVER_SPAN: f64 = 2.0;

pub fn neuropathy_score(status: NeuropathyStatus) -> f64 {
    NEUROPATHY_TABLE
        .iter()
        .find(|(candidate, _)| *candidate == status)
        .map_or(0.0, |(_, score)| *score)
}

pub fn glycemic_score(hba1c: f64) -> f64 {
    GLYCEMIC_TABLE
        .iter()
        .find(|(bound, _)| hba1c > *bound)
        .map_or(0.0, |(_, score)| *score)
}

/// Level of a raw (unclamped) total.
pub fn level_for(total: f64) -> HealthLevel {
    LEVEL_TABLE
        .iter()
        .find(|(bound, _)| total < *bound)
        .map_or(HealthLevel::Red, |(_, level)| *level)
}

/// Combines the sub-scores into a health index.
///
/// The level is taken from the raw total before the stored score is clamped
/// to `[0, 100]`.
pub fn compute(
    pressure_subscore: f64,
    temperature_subscore: f64,
    compliance_rate: f64,
    neuropathy: NeuropathyStatus,
    hba1c: f64,
) -> HealthIndex {
    let neuropathy = neuropathy_score(neuropathy);
    let glycemic = glycemic_score(hba1c);
    let total = pressure_subscore
        + temperature_subscore
        + neuropathy
        + glycemic
        + (100.0 - compliance_rate);

    let level = level_for(total);

    HealthIndex {
        score: total.clamp(0.0, 100.0),
        level,
        factors: HealthFactors {
            foot_pressure: pressure_subscore,
            temperature: temperature_subscore,
            neuropathy,
            glycemic_control: glycemic,
            compliance: compliance_rate,
        },
    }
}

/// Pressure and temperature sub-scores derived from the live frame.
pub fn foot_subscores(data: &FootData) -> (f64, f64) {
    let pressure = data.max_pressure() / FOOT_PRESSURE_SCALE * FOOT_SUBSCORE_WEIGHT;
    let max_temperature = data.max_temperature();
    let temperature = if max_temperature > FEVER_LINE {
        (max_temperature - FEVER_LINE) / FEVER_SPAN * FOOT_SUBSCORE_WEIGHT
    } else {
        0.0
    };
    (pressure, temperature)
}

use rand::Rng;

use crate::models::{FootData, FootZone, SensorReading, ZoneReadings};

pub const PRESSURE_VARIATION: f64 = 15.0;
pub const TEMPERATURE_VARIATION: f64 = 1.5;
const BATTERY_FLOOR: f64 = 85.0;
const BATTERY_SPREAD: f64 = 10.0;

/// Resting baseline the simulated insole jitters around.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Baseline {
    pub pressure: f64,
    pub temperature: f64,
}

impl Default for Baseline {
    fn default() -> Self {
        Self {
            pressure: 45.0,
            temperature: 34.0,
        }
    }
}

/// `baseline` plus uniform noise in `[-variation/2, variation/2)`, floored at zero.
pub fn jitter<R: Rng + ?Sized>(baseline: f64, variation: f64, rng: &mut R) -> f64 {
    let noise = (rng.gen::<f64>() - 0.5) * variation;
    (baseline + noise).max(0.0)
}

/// Samples a full frame for both feet. Every reading shares `timestamp`.
pub fn generate_at<R: Rng + ?Sized>(baseline: Baseline, timestamp: i64, rng: &mut R) -> FootData {
    let left = sample_foot(baseline, timestamp, rng);
    let right = sample_foot(baseline, timestamp, rng);

    FootData {
        left,
        right,
        battery: BATTERY_FLOOR + rng.gen::<f64>() * BATTERY_SPREAD,
        last_update: timestamp,
    }
}

fn sample_foot<R: Rng + ?Sized>(baseline: Baseline, timestamp: i64, rng: &mut R) -> ZoneReadings {
    let mut readings = ZoneReadings::uniform(SensorReading {
        pressure: 0.0,
        temperature: 0.0,
        timestamp,
    });
    for zone in FootZone::ALL {
        *readings.get_mut(zone) = SensorReading {
            pressure: jitter(baseline.pressure, PRESSURE_VARIATION, rng),
            temperature: jitter(baseline.temperature, TEMPERATURE_VARIATION, rng),
            timestamp,
        };
    }
    readings
}

pub fn generate<R: Rng + ?Sized>(baseline: Baseline, rng: &mut R) -> FootData {
    generate_at(baseline, crate::utils::now_ms(), rng)
}

use std::time::Duration;

use serde::{Deserialize, Serialize};

const KPA_PER_PSI: f64 = 6.894_757;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LoginMethod {
    Email,
    Google,
    Apple,
    Guest,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub login_method: LoginMethod,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum MeasurementUnit {
    #[serde(rename = "kPa")]
    Kpa,
    #[serde(rename = "PSI")]
    Psi,
}

impl MeasurementUnit {
    /// Converts a kPa value into this unit for display.
    pub fn from_kpa(&self, kpa: f64) -> f64 {
        match self {
            MeasurementUnit::Kpa => kpa,
            MeasurementUnit::Psi => kpa / KPA_PER_PSI,
        }
    }

    pub fn to_kpa(&self, value: f64) -> f64 {
        match self {
            MeasurementUnit::Kpa => value,
            MeasurementUnit::Psi => value * KPA_PER_PSI,
        }
    }
}

/// Cadence of the simulated sensor feed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DataFrequency {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl DataFrequency {
    pub fn interval(&self) -> Duration {
        match self {
            DataFrequency::Slow => Duration::from_millis(5000),
            DataFrequency::Normal => Duration::from_millis(3000),
            DataFrequency::Fast => Duration::from_millis(1000),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingData {
    pub measurement_unit: MeasurementUnit,
    pub notification_threshold: f64,
    pub mock_data_frequency: DataFrequency,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frequency_maps_to_interval() {
        assert_eq!(DataFrequency::Fast.interval(), Duration::from_secs(1));
        assert_eq!(DataFrequency::Normal.interval(), Duration::from_secs(3));
        assert_eq!(DataFrequency::Slow.interval(), Duration::from_secs(5));
        assert_eq!(DataFrequency::default(), DataFrequency::Normal);
    }

    #[test]
    fn psi_conversion_round_trips() {
        let psi = MeasurementUnit::Psi.from_kpa(75.0);
        assert!((psi - 10.877).abs() < 0.01);
        assert!((MeasurementUnit::Psi.to_kpa(psi) - 75.0).abs() < 1e-9);
        assert_eq!(MeasurementUnit::Kpa.from_kpa(75.0), 75.0);
    }

    #[test]
    fn onboarding_uses_client_tags() {
        let data: OnboardingData = serde_json::from_str(
            r#"{"measurementUnit":"PSI","notificationThreshold":85,"mockDataFrequency":"fast"}"#,
        )
        .unwrap();
        assert_eq!(data.measurement_unit, MeasurementUnit::Psi);
        assert_eq!(data.notification_threshold, 85.0);
        assert_eq!(data.mock_data_frequency, DataFrequency::Fast);
    }
}

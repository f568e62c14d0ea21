//! Insole sensor data models.
//!
//! Field names serialize in camelCase and enum tags in lowercase so stored
//! blobs stay interchangeable with the mobile client.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum FootZone {
    Heel,
    Arch,
    Ball,
    Toes,
}

impl FootZone {
    pub const ALL: [FootZone; 4] = [FootZone::Heel, FootZone::Arch, FootZone::Ball, FootZone::Toes];

    pub fn as_str(&self) -> &'static str {
        match self {
            FootZone::Heel => "heel",
            FootZone::Arch => "arch",
            FootZone::Ball => "ball",
            FootZone::Toes => "toes",
        }
    }
}

impl fmt::Display for FootZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Foot {
    Left,
    Right,
}

impl Foot {
    pub const BOTH: [Foot; 2] = [Foot::Left, Foot::Right];

    pub fn as_str(&self) -> &'static str {
        match self {
            Foot::Left => "left",
            Foot::Right => "right",
        }
    }
}

impl fmt::Display for Foot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SensorReading {
    /// kPa
    pub pressure: f64,
    /// °C
    pub temperature: f64,
    /// Epoch milliseconds.
    pub timestamp: i64,
}

/// One reading per zone of a single foot.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ZoneReadings {
    pub heel: SensorReading,
    pub arch: SensorReading,
    pub ball: SensorReading,
    pub toes: SensorReading,
}

impl ZoneReadings {
    pub fn uniform(reading: SensorReading) -> Self {
        Self {
            heel: reading,
            arch: reading,
            ball: reading,
            toes: reading,
        }
    }

    pub fn get(&self, zone: FootZone) -> &SensorReading {
        match zone {
            FootZone::Heel => &self.heel,
            FootZone::Arch => &self.arch,
            FootZone::Ball => &self.ball,
            FootZone::Toes => &self.toes,
        }
    }

    pub fn get_mut(&mut self, zone: FootZone) -> &mut SensorReading {
        match zone {
            FootZone::Heel => &mut self.heel,
            FootZone::Arch => &mut self.arch,
            FootZone::Ball => &mut self.ball,
            FootZone::Toes => &mut self.toes,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (FootZone, &SensorReading)> + '_ {
        FootZone::ALL.into_iter().map(move |zone| (zone, self.get(zone)))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FootData {
    pub left: ZoneReadings,
    pub right: ZoneReadings,
    pub battery: f64,
    pub last_update: i64,
}

impl FootData {
    pub fn foot(&self, foot: Foot) -> &ZoneReadings {
        match foot {
            Foot::Left => &self.left,
            Foot::Right => &self.right,
        }
    }

    pub fn reading(&self, foot: Foot, zone: FootZone) -> &SensorReading {
        self.foot(foot).get(zone)
    }

    /// Every reading of both feet, left foot first.
    pub fn readings(&self) -> impl Iterator<Item = &SensorReading> + '_ {
        self.left
            .iter()
            .chain(self.right.iter())
            .map(|(_, reading)| reading)
    }

    pub fn max_pressure(&self) -> f64 {
        self.readings()
            .map(|r| r.pressure)
            .fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn max_temperature(&self) -> f64 {
        self.readings()
            .map(|r| r.temperature)
            .fold(f64::NEG_INFINITY, f64::max)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Thresholds {
    pub pressure: f64,
    pub temperature: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            pressure: 75.0,
            temperature: 36.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Pressure,
    Temperature,
}

impl AlertKind {
    /// Suffix used when building alert ids.
    pub fn id_suffix(&self) -> &'static str {
        match self {
            AlertKind::Pressure => "pressure",
            AlertKind::Temperature => "temp",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub foot: Foot,
    pub zone: FootZone,
    pub value: f64,
    pub threshold: f64,
    pub message: String,
    pub timestamp: i64,
    pub dismissed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyScore {
    /// `YYYY-MM-DD`, unique per history.
    pub date: String,
    pub score: f64,
    pub max_pressure: f64,
    pub max_temperature: f64,
    pub alert_count: usize,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub age: u32,
    pub weight: f64,
    pub height: f64,
    pub diabetes_duration: u32,
    pub hba1c: f64,
    pub risk_level: RiskLevel,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: "John Doe".into(),
            age: 58,
            weight: 82.0,
            height: 175.0,
            diabetes_duration: 8,
            hba1c: 7.2,
            risk_level: RiskLevel::Medium,
        }
    }
}

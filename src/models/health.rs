use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DiabetesType {
    #[serde(rename = "Type 1")]
    Type1,
    #[serde(rename = "Type 2")]
    Type2,
    Gestational,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum NeuropathyStatus {
    None,
    Mild,
    Moderate,
    Severe,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SmokingStatus {
    Never,
    Former,
    Current,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AlcoholUse {
    None,
    Occasional,
    Regular,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ExerciseLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum WorkType {
    Sedentary,
    Standing,
    Walking,
    #[serde(rename = "Physical Labor")]
    PhysicalLabor,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MedicalRecord {
    pub diabetes_type: DiabetesType,
    pub diabetes_duration: u32,
    pub hba1c: f64,
    pub last_hba1c_date: String,
    pub medications: Vec<String>,
    pub neuropathy_status: NeuropathyStatus,
    pub has_foot_ulcers: bool,
    pub ulcer_history: Vec<String>,
    pub amputation_history: bool,
    pub vascular_complications: Vec<String>,
    pub cholesterol: f64,
    pub blood_pressure: String,
    pub smoking_status: SmokingStatus,
    pub alcohol_use: AlcoholUse,
    pub exercise_level: ExerciseLevel,
    pub work_type: WorkType,
    pub footwear_habits: Vec<String>,
}

impl Default for MedicalRecord {
    fn default() -> Self {
        Self {
            diabetes_type: DiabetesType::Type2,
            diabetes_duration: 8,
            hba1c: 7.2,
            last_hba1c_date: "2025-09-15".into(),
            medications: vec![
                "Metformin 1000mg".into(),
                "Insulin Glargine 20 units".into(),
                "Gabapentin 300mg".into(),
            ],
            neuropathy_status: NeuropathyStatus::Moderate,
            has_foot_ulcers: false,
            ulcer_history: vec![
                "Right heel ulcer (2023, healed)".into(),
                "Left toe blister (2024, healed)".into(),
            ],
            amputation_history: false,
            vascular_complications: vec!["Peripheral arterial disease (mild)".into()],
            cholesterol: 195.0,
            blood_pressure: "138/85".into(),
            smoking_status: SmokingStatus::Former,
            alcohol_use: AlcoholUse::Occasional,
            exercise_level: ExerciseLevel::Light,
            work_type: WorkType::Standing,
            footwear_habits: vec![
                "Steel-toe work boots 8hrs/day".into(),
                "Diabetic insoles".into(),
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum HealthLevel {
    #[default]
    Green,
    Amber,
    Red,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct HealthFactors {
    pub foot_pressure: f64,
    pub temperature: f64,
    pub neuropathy: f64,
    pub glycemic_control: f64,
    pub compliance: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct HealthIndex {
    pub score: f64,
    pub level: HealthLevel,
    pub factors: HealthFactors,
}

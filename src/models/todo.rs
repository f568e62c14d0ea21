use std::str::FromStr;

use anyhow::{anyhow, Error};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    FootCare,
    Nutrition,
    Activity,
    HealthTracking,
    Medication,
    Education,
}

impl TaskType {
    pub const ALL: [TaskType; 6] = [
        TaskType::FootCare,
        TaskType::Nutrition,
        TaskType::Activity,
        TaskType::HealthTracking,
        TaskType::Medication,
        TaskType::Education,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskType::FootCare => "foot_care",
            TaskType::Nutrition => "nutrition",
            TaskType::Activity => "activity",
            TaskType::HealthTracking => "health_tracking",
            TaskType::Medication => "medication",
            TaskType::Education => "education",
        }
    }
}

impl FromStr for TaskType {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        TaskType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value)
            .ok_or_else(|| anyhow!("unknown task category '{value}'"))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TaskUrgency {
    Low,
    Medium,
    High,
}

impl TaskUrgency {
    pub const ALL: [TaskUrgency; 3] = [TaskUrgency::Low, TaskUrgency::Medium, TaskUrgency::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskUrgency::Low => "low",
            TaskUrgency::Medium => "medium",
            TaskUrgency::High => "high",
        }
    }
}

impl FromStr for TaskUrgency {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        TaskUrgency::ALL
            .into_iter()
            .find(|urgency| urgency.as_str() == value)
            .ok_or_else(|| anyhow!("unknown task priority '{value}'"))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GeneratedBy {
    System,
    Stepmate,
    User,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TodoTask {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: TaskType,
    pub urgency: TaskUrgency,
    pub completed: bool,
    pub created_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_time: Option<String>,
    pub generated_by: GeneratedBy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_alert: Option<String>,
}

/// Everything a caller supplies when adding a task; id and creation time are
/// assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub kind: TaskType,
    pub urgency: TaskUrgency,
    pub due_time: Option<String>,
    pub generated_by: GeneratedBy,
    pub related_alert: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyObjective {
    pub id: String,
    pub title: String,
    pub description: String,
    pub target_days: u32,
    pub completed_days: u32,
    pub metric: String,
    pub current_value: f64,
    pub target_value: f64,
    pub start_date: String,
    pub end_date: String,
}

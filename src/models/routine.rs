use serde::{Deserialize, Serialize};

use super::todo::{TaskType, TaskUrgency};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationCategory {
    Footwear,
    Rest,
    Hydration,
    Nutrition,
    Activity,
    WoundCare,
}

impl RecommendationCategory {
    /// Task category a recommendation becomes when turned into a to-do.
    pub fn task_type(&self) -> TaskType {
        match self {
            RecommendationCategory::Footwear => TaskType::FootCare,
            RecommendationCategory::Rest => TaskType::Activity,
            _ => TaskType::HealthTracking,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LifestyleRecommendation {
    pub id: String,
    pub category: RecommendationCategory,
    pub title: String,
    pub description: String,
    pub priority: TaskUrgency,
    pub trigger_condition: String,
    pub can_convert_to_todo: bool,
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewRecommendation {
    pub category: RecommendationCategory,
    pub title: String,
    pub description: String,
    pub priority: TaskUrgency,
    pub trigger_condition: String,
    pub can_convert_to_todo: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RoutineStep {
    pub id: String,
    pub time: String,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub icon: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyRoutine {
    pub morning: Vec<RoutineStep>,
    pub midday: Vec<RoutineStep>,
    pub evening: Vec<RoutineStep>,
}

impl DailyRoutine {
    pub fn steps(&self) -> impl Iterator<Item = &RoutineStep> + '_ {
        self.morning
            .iter()
            .chain(self.midday.iter())
            .chain(self.evening.iter())
    }

    pub fn steps_mut(&mut self) -> impl Iterator<Item = &mut RoutineStep> + '_ {
        self.morning
            .iter_mut()
            .chain(self.midday.iter_mut())
            .chain(self.evening.iter_mut())
    }
}

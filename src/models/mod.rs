pub mod auth;
pub mod health;
pub mod routine;
pub mod sensor;
pub mod todo;

pub use auth::{DataFrequency, LoginMethod, MeasurementUnit, OnboardingData, User};
pub use health::{HealthFactors, HealthIndex, HealthLevel, MedicalRecord, NeuropathyStatus};
pub use routine::{
    DailyRoutine, LifestyleRecommendation, NewRecommendation, RecommendationCategory, RoutineStep,
};
pub use sensor::{
    Alert, AlertKind, DailyScore, Foot, FootData, FootZone, RiskLevel, SensorReading, Thresholds,
    UserProfile, ZoneReadings,
};
pub use todo::{GeneratedBy, NewTask, TaskType, TaskUrgency, TodoTask, WeeklyObjective};

use chrono::{DateTime, Duration, Utc};

use crate::{
    models::{GeneratedBy, TaskType, TaskUrgency, TodoTask, WeeklyObjective},
    utils::iso_day,
};

struct SeedTask {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    kind: TaskType,
    urgency: TaskUrgency,
    due_time: &'static str,
    generated_by: GeneratedBy,
}

const SEED_TASKS: &[SeedTask] = &[
    SeedTask {
        id: "1",
        title: "Morning Foot Inspection",
        description: "Check both feet for redness, blisters, cuts, or swelling",
        kind: TaskType::FootCare,
        urgency: TaskUrgency::High,
        due_time: "08:00",
        generated_by: GeneratedBy::System,
    },
    SeedTask {
        id: "2",
        title: "Check Blood Glucose",
        description: "Fasting blood glucose before breakfast",
        kind: TaskType::HealthTracking,
        urgency: TaskUrgency::High,
        due_time: "07:30",
        generated_by: GeneratedBy::System,
    },
    SeedTask {
        id: "3",
        title: "Balanced Breakfast",
        description: "Include protein, whole grains, and vegetables. Limit refined carbs.",
        kind: TaskType::Nutrition,
        urgency: TaskUrgency::Medium,
        due_time: "08:00",
        generated_by: GeneratedBy::Stepmate,
    },
    SeedTask {
        id: "4",
        title: "Moisturize Feet",
        description: "Apply diabetic foot cream, avoid between toes",
        kind: TaskType::FootCare,
        urgency: TaskUrgency::Medium,
        due_time: "09:00",
        generated_by: GeneratedBy::System,
    },
    SeedTask {
        id: "5",
        title: "Gentle Walk",
        description: "15-minute light walk with proper footwear",
        kind: TaskType::Activity,
        urgency: TaskUrgency::Medium,
        due_time: "10:00",
        generated_by: GeneratedBy::Stepmate,
    },
    SeedTask {
        id: "6",
        title: "Inspect Footwear",
        description: "Check shoes for foreign objects, worn insoles, or rough seams",
        kind: TaskType::FootCare,
        urgency: TaskUrgency::Medium,
        due_time: "12:00",
        generated_by: GeneratedBy::System,
    },
];

/// The starter checklist, stamped as created at `now`.
pub fn initial_tasks(now: DateTime<Utc>) -> Vec<TodoTask> {
    let created_at = now.timestamp_millis();
    SEED_TASKS
        .iter()
        .map(|seed| TodoTask {
            id: seed.id.to_string(),
            title: seed.title.to_string(),
            description: seed.description.to_string(),
            kind: seed.kind,
            urgency: seed.urgency,
            completed: false,
            created_at,
            completed_at: None,
            due_time: Some(seed.due_time.to_string()),
            generated_by: seed.generated_by,
            related_alert: None,
        })
        .collect()
}

struct SeedObjective {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    target_days: u32,
    completed_days: u32,
    metric: &'static str,
    current_value: f64,
    target_value: f64,
    started_days_ago: i64,
    ends_in_days: i64,
}

const SEED_OBJECTIVES: &[SeedObjective] = &[
    SeedObjective {
        id: "obj1",
        title: "Maintain Safe Heel Pressure",
        description: "Keep heel pressure below 75 kPa for 5 days",
        target_days: 5,
        completed_days: 2,
        metric: "Heel Pressure",
        current_value: 68.0,
        target_value: 75.0,
        started_days_ago: 2,
        ends_in_days: 5,
    },
    SeedObjective {
        id: "obj2",
        title: "Daily Foot Inspection Streak",
        description: "Complete foot inspection 7 days straight",
        target_days: 7,
        completed_days: 4,
        metric: "Inspections",
        current_value: 4.0,
        target_value: 7.0,
        started_days_ago: 4,
        ends_in_days: 3,
    },
    SeedObjective {
        id: "obj3",
        title: "Hydration Goal",
        description: "Drink 8 glasses of water daily for 5 days",
        target_days: 5,
        completed_days: 1,
        metric: "Water Intake",
        current_value: 6.0,
        target_value: 8.0,
        started_days_ago: 1,
        ends_in_days: 4,
    },
];

/// Weekly objectives whose windows are placed around `now`.
pub fn initial_objectives(now: DateTime<Utc>) -> Vec<WeeklyObjective> {
    SEED_OBJECTIVES
        .iter()
        .map(|seed| WeeklyObjective {
            id: seed.id.to_string(),
            title: seed.title.to_string(),
            description: seed.description.to_string(),
            target_days: seed.target_days,
            completed_days: seed.completed_days,
            metric: seed.metric.to_string(),
            current_value: seed.current_value,
            target_value: seed.target_value,
            start_date: iso_day(now - Duration::days(seed.started_days_ago)),
            end_date: iso_day(now + Duration::days(seed.ends_in_days)),
        })
        .collect()
}

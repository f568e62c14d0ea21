use crate::models::{
    DailyRoutine, LifestyleRecommendation, RecommendationCategory, RoutineStep, TaskUrgency,
};

/// `(id, time, title, description, icon)`
type StepRow = (&'static str, &'static str, &'static str, &'static str, &'static str);

const MORNING: &[StepRow] = &[
    ("morning1", "07:00", "Wake Up & Blood Glucose", "Check fasting blood glucose before any food or drink", "droplet"),
    ("morning2", "07:30", "Foot Inspection", "Check both feet for any changes, redness, or injuries", "search"),
    ("morning3", "08:00", "Healthy Breakfast", "Balanced meal with protein, whole grains, and vegetables", "utensils"),
    ("morning4", "08:30", "Morning Medication", "Take prescribed medications with food", "pill"),
];

const MIDDAY: &[StepRow] = &[
    ("midday1", "12:00", "Check Footwear", "Inspect shoes for debris or wear before going out", "scan"),
    ("midday2", "13:00", "Light Activity", "15-minute gentle walk with proper footwear", "walk"),
    ("midday3", "14:00", "Hydration Check", "Ensure adequate water intake throughout the day", "glass-water"),
];

const EVENING: &[StepRow] = &[
    ("evening1", "18:00", "Evening Foot Care", "Wash and moisturize feet (avoid between toes)", "heart-pulse"),
    ("evening2", "19:00", "Review Pressure Data", "Check daily foot pressure trends in the app", "chart-line"),
    ("evening3", "20:00", "Reflect & Plan", "Review completed tasks and prepare for tomorrow", "clipboard-check"),
];

fn steps(rows: &[StepRow]) -> Vec<RoutineStep> {
    rows.iter()
        .map(|&(id, time, title, description, icon)| RoutineStep {
            id: id.to_string(),
            time: time.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            completed: false,
            icon: icon.to_string(),
        })
        .collect()
}

pub fn initial_routine() -> DailyRoutine {
    DailyRoutine {
        morning: steps(MORNING),
        midday: steps(MIDDAY),
        evening: steps(EVENING),
    }
}

pub fn initial_recommendations(timestamp: i64) -> Vec<LifestyleRecommendation> {
    let rows = [
        (
            "rec1",
            RecommendationCategory::Footwear,
            "Rotate Your Shoes",
            "Wearing the same shoes daily increases pressure on specific foot areas. Alternate between 2-3 pairs of well-fitted diabetic shoes.",
            TaskUrgency::Medium,
            "High pressure detected for 2+ consecutive days",
        ),
        (
            "rec2",
            RecommendationCategory::Rest,
            "Elevate Your Feet",
            "When sitting, elevate feet to reduce swelling and improve circulation. Do this 2-3 times daily for 15 minutes.",
            TaskUrgency::High,
            "Temperature spike detected",
        ),
        (
            "rec3",
            RecommendationCategory::Hydration,
            "Increase Water Intake",
            "Aim for 8 glasses of water daily to maintain skin elasticity and support circulation.",
            TaskUrgency::Medium,
            "General wellness",
        ),
    ];

    rows.into_iter()
        .map(
            |(id, category, title, description, priority, trigger)| LifestyleRecommendation {
                id: id.to_string(),
                category,
                title: title.to_string(),
                description: description.to_string(),
                priority,
                trigger_condition: trigger.to_string(),
                can_convert_to_todo: true,
                timestamp,
            },
        )
        .collect()
}

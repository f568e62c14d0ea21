use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    db::{keys, Database},
    models::{
        DailyRoutine, GeneratedBy, LifestyleRecommendation, NewRecommendation, NewTask, TodoTask,
    },
    todo::TodoStore,
    utils::now_ms,
};

use super::seed;

#[derive(Debug, Default, Deserialize)]
struct StoredRoutine {
    #[serde(default)]
    routine: Option<DailyRoutine>,
    #[serde(default)]
    recommendations: Option<Vec<LifestyleRecommendation>>,
}

#[derive(Debug, Serialize)]
struct RoutineSnapshot<'a> {
    routine: &'a DailyRoutine,
    recommendations: &'a [LifestyleRecommendation],
}

#[derive(Debug, Clone)]
struct RoutineState {
    routine: DailyRoutine,
    recommendations: Vec<LifestyleRecommendation>,
}

/// Task a recommendation turns into, or `None` when it is not convertible.
pub fn recommendation_task(recommendation: &LifestyleRecommendation) -> Option<NewTask> {
    recommendation.can_convert_to_todo.then(|| NewTask {
        title: recommendation.title.clone(),
        description: recommendation.description.clone(),
        kind: recommendation.category.task_type(),
        urgency: recommendation.priority,
        due_time: None,
        generated_by: GeneratedBy::Stepmate,
        related_alert: None,
    })
}

#[derive(Clone)]
pub struct RoutineStore {
    db: Database,
    state: Arc<RwLock<RoutineState>>,
}

impl RoutineStore {
    pub async fn load(db: Database) -> Self {
        let stored = db
            .load_json::<StoredRoutine>(keys::ROUTINE)
            .await
            .unwrap_or_default();

        let state = RoutineState {
            routine: stored.routine.unwrap_or_else(seed::initial_routine),
            recommendations: stored
                .recommendations
                .unwrap_or_else(|| seed::initial_recommendations(now_ms())),
        };

        Self {
            db,
            state: Arc::new(RwLock::new(state)),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, RoutineState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, RoutineState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn routine(&self) -> DailyRoutine {
        self.read().routine.clone()
    }

    pub fn recommendations(&self) -> Vec<LifestyleRecommendation> {
        self.read().recommendations.clone()
    }

    /// Flips a step in any period. Nothing is written for an unknown id.
    pub fn toggle_step(&self, step_id: &str) -> Option<bool> {
        let mut state = self.write();
        let step = state.routine.steps_mut().find(|step| step.id == step_id)?;
        step.completed = !step.completed;
        let completed = step.completed;
        self.persist(&state);
        Some(completed)
    }

    pub fn add_recommendation(&self, recommendation: NewRecommendation) -> LifestyleRecommendation {
        let created = LifestyleRecommendation {
            id: format!("rec-{}", Uuid::new_v4()),
            category: recommendation.category,
            title: recommendation.title,
            description: recommendation.description,
            priority: recommendation.priority,
            trigger_condition: recommendation.trigger_condition,
            can_convert_to_todo: recommendation.can_convert_to_todo,
            timestamp: now_ms(),
        };

        let mut state = self.write();
        state.recommendations.insert(0, created.clone());
        self.persist(&state);
        created
    }

    pub fn remove_recommendation(&self, recommendation_id: &str) -> bool {
        let mut state = self.write();
        let before = state.recommendations.len();
        state
            .recommendations
            .retain(|recommendation| recommendation.id != recommendation_id);
        let removed = state.recommendations.len() != before;
        if removed {
            self.persist(&state);
        }
        removed
    }

    /// Rounded percentage of completed steps across all periods.
    pub fn completion_progress(&self) -> f64 {
        let state = self.read();
        let (completed, total) = state
            .routine
            .steps()
            .fold((0usize, 0usize), |(done, total), step| {
                (done + usize::from(step.completed), total + 1)
            });
        if total == 0 {
            return 0.0;
        }
        (completed as f64 / total as f64 * 100.0).round()
    }

    /// Adds the recommendation to the to-do list. The recommendation itself is
    /// kept.
    pub fn convert_to_task(&self, recommendation_id: &str, todos: &TodoStore) -> Option<TodoTask> {
        let task = {
            let state = self.read();
            let recommendation = state
                .recommendations
                .iter()
                .find(|recommendation| recommendation.id == recommendation_id)?;
            recommendation_task(recommendation)?
        };
        Some(todos.add_task(task))
    }

    fn persist(&self, state: &RoutineState) {
        let snapshot = RoutineSnapshot {
            routine: &state.routine,
            recommendations: &state.recommendations,
        };
        self.db.save_json_detached(keys::ROUTINE, &snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RecommendationCategory, TaskType, TaskUrgency};

    #[tokio::test]
    async fn toggling_unknown_step_writes_nothing() {
        let db = Database::open_in_memory().unwrap();
        let store = RoutineStore::load(db.clone()).await;

        assert_eq!(store.toggle_step("night1"), None);
        assert_eq!(db.get_value(keys::ROUTINE).await.unwrap(), None);

        assert_eq!(store.toggle_step("midday2"), Some(true));
        assert!(db.get_value(keys::ROUTINE).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn progress_covers_every_period() {
        let store = RoutineStore::load(Database::open_in_memory().unwrap()).await;
        assert_eq!(store.completion_progress(), 0.0);

        store.toggle_step("morning1");
        store.toggle_step("evening3");
        // 2 of 10
        assert_eq!(store.completion_progress(), 20.0);
    }

    #[tokio::test]
    async fn recommendations_add_and_remove() {
        let db = Database::open_in_memory().unwrap();
        let store = RoutineStore::load(db.clone()).await;

        let added = store.add_recommendation(NewRecommendation {
            category: RecommendationCategory::WoundCare,
            title: "Cover the blister".into(),
            description: "Use a sterile dressing".into(),
            priority: TaskUrgency::High,
            trigger_condition: "Blister reported".into(),
            can_convert_to_todo: false,
        });
        assert_eq!(store.recommendations()[0].id, added.id);
        assert!(store.remove_recommendation("rec3"));
        assert!(!store.remove_recommendation("rec3"));

        let reloaded = RoutineStore::load(db).await;
        let ids: Vec<_> = reloaded.recommendations().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![added.id, "rec1".to_string(), "rec2".to_string()]);
    }

    #[tokio::test]
    async fn conversion_maps_categories() {
        let db = Database::open_in_memory().unwrap();
        let store = RoutineStore::load(db.clone()).await;
        let todos = TodoStore::load(db).await;

        let footwear = store.convert_to_task("rec1", &todos).unwrap();
        assert_eq!(footwear.kind, TaskType::FootCare);
        assert_eq!(footwear.generated_by, GeneratedBy::Stepmate);

        let rest = store.convert_to_task("rec2", &todos).unwrap();
        assert_eq!(rest.kind, TaskType::Activity);
        assert_eq!(rest.urgency, TaskUrgency::High);

        let hydration = store.convert_to_task("rec3", &todos).unwrap();
        assert_eq!(hydration.kind, TaskType::HealthTracking);

        assert!(store.convert_to_task("missing", &todos).is_none());
        assert_eq!(todos.tasks().len(), 9);
    }
}

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    db::{keys, Database},
    models::{NewTask, TodoTask, WeeklyObjective},
    utils::{iso_day, iso_day_of_ms, now_ms},
};

use super::seed;

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredTodos {
    #[serde(default)]
    tasks: Option<Vec<TodoTask>>,
    #[serde(default)]
    objectives: Option<Vec<WeeklyObjective>>,
}

#[derive(Debug, Serialize)]
struct TodoSnapshot<'a> {
    tasks: &'a [TodoTask],
    objectives: &'a [WeeklyObjective],
}

#[derive(Debug, Clone)]
struct TodoState {
    tasks: Vec<TodoTask>,
    objectives: Vec<WeeklyObjective>,
}

/// Daily tasks (newest first) and weekly objectives.
#[derive(Clone)]
pub struct TodoStore {
    db: Database,
    state: Arc<RwLock<TodoState>>,
}

impl TodoStore {
    pub async fn load(db: Database) -> Self {
        let now = Utc::now();
        let stored = db
            .load_json::<StoredTodos>(keys::TODOS)
            .await
            .unwrap_or_default();

        let state = TodoState {
            tasks: stored.tasks.unwrap_or_else(|| seed::initial_tasks(now)),
            objectives: stored
                .objectives
                .unwrap_or_else(|| seed::initial_objectives(now)),
        };

        Self {
            db,
            state: Arc::new(RwLock::new(state)),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, TodoState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, TodoState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn tasks(&self) -> Vec<TodoTask> {
        self.read().tasks.clone()
    }

    pub fn objectives(&self) -> Vec<WeeklyObjective> {
        self.read().objectives.clone()
    }

    pub fn add_task(&self, task: NewTask) -> TodoTask {
        let created = TodoTask {
            id: format!("task-{}", Uuid::new_v4()),
            title: task.title,
            description: task.description,
            kind: task.kind,
            urgency: task.urgency,
            completed: false,
            created_at: now_ms(),
            completed_at: None,
            due_time: task.due_time,
            generated_by: task.generated_by,
            related_alert: task.related_alert,
        };

        let mut state = self.write();
        state.tasks.insert(0, created.clone());
        self.persist(&state);
        created
    }

    /// Flips completion, stamping or clearing `completed_at`. Returns the new
    /// state, or `None` for an unknown id.
    pub fn toggle_task(&self, task_id: &str) -> Option<bool> {
        let mut state = self.write();
        let task = state.tasks.iter_mut().find(|task| task.id == task_id)?;
        task.completed = !task.completed;
        task.completed_at = task.completed.then(now_ms);
        let completed = task.completed;
        self.persist(&state);
        Some(completed)
    }

    pub fn delete_task(&self, task_id: &str) -> bool {
        let mut state = self.write();
        let before = state.tasks.len();
        state.tasks.retain(|task| task.id != task_id);
        let removed = state.tasks.len() != before;
        if removed {
            self.persist(&state);
        }
        removed
    }

    pub fn update_objective<F>(&self, objective_id: &str, update: F) -> Option<WeeklyObjective>
    where
        F: FnOnce(&mut WeeklyObjective),
    {
        let mut state = self.write();
        let objective = state
            .objectives
            .iter_mut()
            .find(|objective| objective.id == objective_id)?;
        update(objective);
        let updated = objective.clone();
        self.persist(&state);
        Some(updated)
    }

    /// Percentage of completed tasks, rounded; zero with no tasks.
    pub fn completion_rate(&self) -> f64 {
        let state = self.read();
        if state.tasks.is_empty() {
            return 0.0;
        }
        let completed = state.tasks.iter().filter(|task| task.completed).count();
        (completed as f64 / state.tasks.len() as f64 * 100.0).round()
    }

    /// Tasks created on the current UTC day.
    pub fn today_tasks(&self) -> Vec<TodoTask> {
        let today = iso_day(Utc::now());
        self.read()
            .tasks
            .iter()
            .filter(|task| iso_day_of_ms(task.created_at).as_deref() == Some(today.as_str()))
            .cloned()
            .collect()
    }

    fn persist(&self, state: &TodoState) {
        let snapshot = TodoSnapshot {
            tasks: &state.tasks,
            objectives: &state.objectives,
        };
        self.db.save_json_detached(keys::TODOS, &snapshot);
    }
}

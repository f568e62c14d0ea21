use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};

use crate::{
    db::{keys, Database},
    models::{HealthIndex, MedicalRecord},
};

use super::index;

/// Stored as one blob so the record and the index derived from it never
/// drift apart on disk.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HealthSnapshot {
    #[serde(default)]
    medical_record: Option<MedicalRecord>,
    #[serde(default)]
    health_index: Option<HealthIndex>,
}

#[derive(Debug, Clone, Default)]
struct HealthState {
    medical_record: MedicalRecord,
    health_index: HealthIndex,
}

#[derive(Clone)]
pub struct HealthStore {
    db: Database,
    state: Arc<RwLock<HealthState>>,
}

impl HealthStore {
    pub async fn load(db: Database) -> Self {
        let stored = db
            .load_json::<HealthSnapshot>(keys::HEALTH)
            .await
            .unwrap_or_default();

        let state = HealthState {
            medical_record: stored.medical_record.unwrap_or_default(),
            health_index: stored.health_index.unwrap_or_default(),
        };

        Self {
            db,
            state: Arc::new(RwLock::new(state)),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, HealthState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HealthState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn medical_record(&self) -> MedicalRecord {
        self.read().medical_record.clone()
    }

    pub fn health_index(&self) -> HealthIndex {
        self.read().health_index
    }

    /// Recomputes the index from the foot sub-scores, the task compliance
    /// rate and the stored medical record, then persists both together.
    pub fn update_health_index(
        &self,
        pressure_subscore: f64,
        temperature_subscore: f64,
        compliance_rate: f64,
    ) -> HealthIndex {
        let mut state = self.write();
        let updated = index::compute(
            pressure_subscore,
            temperature_subscore,
            compliance_rate,
            state.medical_record.neuropathy_status,
            state.medical_record.hba1c,
        );
        state.health_index = updated;
        self.persist(&state);
        updated
    }

    pub fn update_medical_record<F>(&self, update: F) -> MedicalRecord
    where
        F: FnOnce(&mut MedicalRecord),
    {
        let mut state = self.write();
        update(&mut state.medical_record);
        self.persist(&state);
        state.medical_record.clone()
    }

    fn persist(&self, state: &HealthState) {
        let snapshot = HealthSnapshot {
            medical_record: Some(state.medical_record.clone()),
            health_index: Some(state.health_index),
        };
        self.db.save_json_detached(keys::HEALTH, &snapshot);
    }
}

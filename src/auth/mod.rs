use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};

use crate::{
    db::{keys, Database},
    models::{DataFrequency, MeasurementUnit, OnboardingData, User},
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub onboarding_data: Option<OnboardingData>,
    #[serde(default)]
    pub has_completed_onboarding: bool,
}

impl AuthSession {
    /// Frequency chosen during onboarding, or the default before that.
    pub fn frequency(&self) -> DataFrequency {
        self.onboarding_data
            .map(|data| data.mock_data_frequency)
            .unwrap_or_default()
    }

    pub fn measurement_unit(&self) -> MeasurementUnit {
        self.onboarding_data
            .map_or(MeasurementUnit::Kpa, |data| data.measurement_unit)
    }
}

/// Signed-in user and onboarding choices.
#[derive(Clone)]
pub struct AuthStore {
    db: Database,
    session: Arc<RwLock<AuthSession>>,
}

impl AuthStore {
    pub async fn load(db: Database) -> Self {
        let session = db
            .load_json::<AuthSession>(keys::AUTH)
            .await
            .unwrap_or_default();

        Self {
            db,
            session: Arc::new(RwLock::new(session)),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, AuthSession> {
        self.session.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, AuthSession> {
        self.session.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn session(&self) -> AuthSession {
        self.read().clone()
    }

    pub fn user(&self) -> Option<User> {
        self.read().user.clone()
    }

    pub fn onboarding_data(&self) -> Option<OnboardingData> {
        self.read().onboarding_data
    }

    pub fn has_completed_onboarding(&self) -> bool {
        self.read().has_completed_onboarding
    }

    pub async fn login(&self, user: User) -> Result<()> {
        info!("User {} signed in via {:?}", user.id, user.login_method);
        let snapshot = {
            let mut session = self.write();
            session.user = Some(user);
            session.clone()
        };
        self.persist(&snapshot).await
    }

    pub async fn complete_onboarding(&self, data: OnboardingData) -> Result<()> {
        let snapshot = {
            let mut session = self.write();
            session.onboarding_data = Some(data);
            session.has_completed_onboarding = true;
            session.clone()
        };
        self.persist(&snapshot).await
    }

    /// Clears the session and removes the stored record.
    pub async fn logout(&self) -> Result<()> {
        *self.write() = AuthSession::default();
        self.db.delete_value(keys::AUTH).await
    }

    async fn persist(&self, session: &AuthSession) -> Result<()> {
        let payload = serde_json::to_string(session).context("failed to serialize auth session")?;
        self.db.put_value(keys::AUTH, payload).await
    }
}

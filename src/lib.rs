pub mod assistant;
pub mod auth;
pub mod db;
pub mod health;
pub mod models;
pub mod monitor;
pub mod routine;
pub mod sensing;
pub mod settings;
pub mod todo;
pub mod utils;

use anyhow::{Context, Result};
use log::{error, info};
use serde_json::Value;

use assistant::PatientContext;
use auth::AuthStore;
use db::Database;
use health::HealthStore;
use models::{OnboardingData, User};
use monitor::MonitorController;
use routine::RoutineStore;
use sensing::SensorStore;
use settings::{RuntimeOptions, SettingsStore};
use todo::TodoStore;

/// Every store plus the scheduler, wired to one database.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub auth: AuthStore,
    pub sensors: SensorStore,
    pub health: HealthStore,
    pub todos: TodoStore,
    pub routine: RoutineStore,
    pub monitor: MonitorController,
}

impl AppState {
    /// Opens storage under the configured data directory and loads every store.
    pub async fn open(options: &RuntimeOptions, settings: &SettingsStore) -> Result<Self> {
        std::fs::create_dir_all(&options.data_dir).with_context(|| {
            format!(
                "Failed to create data directory {}",
                options.data_dir.display()
            )
        })?;
        let database = Database::open(options.database_path())?;
        Ok(Self::load(database, settings).await)
    }

    pub async fn load(db: Database, settings: &SettingsStore) -> Self {
        let settings = settings.get();

        let (auth, health, todos, routine) = tokio::join!(
            AuthStore::load(db.clone()),
            HealthStore::load(db.clone()),
            TodoStore::load(db.clone()),
            RoutineStore::load(db.clone()),
        );
        let sensors = SensorStore::load(db.clone(), settings.baseline()).await;

        if let Some(onboarding) = auth.onboarding_data() {
            if onboarding.notification_threshold > 0.0 {
                sensors.apply_notification_threshold(onboarding.notification_threshold);
            }
        }

        let monitor = MonitorController::new(
            sensors.clone(),
            health.clone(),
            todos.clone(),
            settings.baseline(),
            settings.history_interval(),
        );

        Self {
            db,
            auth,
            sensors,
            health,
            todos,
            routine,
            monitor,
        }
    }

    /// Starts monitoring at the frequency chosen during onboarding.
    pub async fn start_monitoring(&self) -> bool {
        self.monitor.start(self.auth.session().frequency()).await
    }

    pub async fn login(&self, user: User) -> Result<()> {
        self.auth.login(user).await
    }

    /// Stores the onboarding choices, applies the notification threshold and
    /// restarts sensing only if the frequency changed.
    pub async fn complete_onboarding(&self, data: OnboardingData) -> Result<()> {
        self.auth.complete_onboarding(data).await?;
        if data.notification_threshold > 0.0 {
            self.sensors
                .apply_notification_threshold(data.notification_threshold);
        }
        if self.monitor.is_running().await {
            self.monitor.set_frequency(data.mock_data_frequency).await?;
        }
        Ok(())
    }

    pub async fn logout(&self) -> Result<()> {
        self.auth.logout().await
    }

    pub fn patient_context(&self) -> PatientContext {
        PatientContext::new(
            self.health.medical_record(),
            self.health.health_index().score,
            self.sensors.risk_score(),
            self.sensors.foot_data().max_pressure(),
            &self.todos.today_tasks(),
        )
    }

    pub fn assistant_prompt(&self) -> String {
        assistant::system_prompt(&self.patient_context())
    }

    pub fn run_assistant_tool(&self, name: &str, args: &Value) -> Result<String> {
        assistant::execute_tool(&self.todos, name, args)
    }

    pub async fn shutdown(&self) -> Result<()> {
        self.monitor.shutdown().await
    }
}

async fn serve(options: RuntimeOptions) -> Result<()> {
    let settings = SettingsStore::new(options.settings_path())?;
    let state = AppState::open(&options, &settings).await?;

    let session = state.auth.session();
    info!(
        "Monitoring {} at {:?} frequency",
        session
            .user
            .as_ref()
            .map_or("guest session", |user| user.name.as_str()),
        session.frequency()
    );
    state.start_monitoring().await;

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for Ctrl-C")?;
    info!("Shutdown requested");

    state.shutdown().await
}

pub fn run() {
    let options = RuntimeOptions::from_env();
    let level = if options.debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    info!("XStep starting up...");

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            error!("Failed to build runtime: {err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = runtime.block_on(serve(options)) {
        error!("XStep exited with error: {err:#}");
        std::process::exit(1);
    }
}

use std::time::Duration;

use serde_json::json;
use tokio::{
    sync::broadcast,
    time::{timeout, Instant},
};
use tokio_util::sync::CancellationToken;

use xstep_lib::{
    db::{keys, Database},
    models::{
        DataFrequency, FootData, FootZone, GeneratedBy, HealthLevel, MeasurementUnit,
        OnboardingData, SensorReading, Thresholds, ZoneReadings,
    },
    monitor::{MonitorController, MonitorEvent},
    sensing::{loop_worker::sensing_loop, Baseline, SensorStore},
    settings::SettingsStore,
    AppState,
};

const WAIT: Duration = Duration::from_secs(5);

fn calm_frame(last_update: i64) -> FootData {
    let reading = SensorReading {
        pressure: 45.0,
        temperature: 34.0,
        timestamp: last_update,
    };
    FootData {
        left: ZoneReadings::uniform(reading),
        right: ZoneReadings::uniform(reading),
        battery: 90.0,
        last_update,
    }
}

fn scratch_settings() -> SettingsStore {
    let dir = std::env::temp_dir().join(format!("xstep-flow-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    SettingsStore::new(dir.join("settings.json")).unwrap()
}

async fn next_matching<F>(rx: &mut broadcast::Receiver<MonitorEvent>, mut wanted: F) -> MonitorEvent
where
    F: FnMut(&MonitorEvent) -> bool,
{
    let deadline = Instant::now() + WAIT;
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        match timeout(remaining, rx.recv()).await {
            Ok(Ok(event)) if wanted(&event) => return event,
            Ok(Ok(_)) | Ok(Err(broadcast::error::RecvError::Lagged(_))) => continue,
            Ok(Err(err)) => panic!("event channel failed: {err}"),
            Err(_) => panic!("timed out waiting for monitor event"),
        }
    }
}

#[tokio::test]
async fn left_heel_pressure_raises_single_alert() {
    let db = Database::open_in_memory().unwrap();
    let sensors = SensorStore::load(db, Baseline::default()).await;

    let mut frame = calm_frame(1_700_000_000_000);
    frame.left.get_mut(FootZone::Heel).pressure = 80.0;

    let raised = sensors.ingest(frame, &Thresholds::default());
    assert_eq!(raised.len(), 1);
    assert_eq!(raised[0].message, "High pressure detected on left heel: 80.0 kPa");
    assert_eq!(sensors.alerts().len(), 1);
}

#[tokio::test]
async fn alert_log_keeps_newest_fifty() {
    let db = Database::open_in_memory().unwrap();
    let sensors = SensorStore::load(db.clone(), Baseline::default()).await;

    for tick in 1..=51 {
        let mut frame = calm_frame(tick);
        frame.right.get_mut(FootZone::Toes).pressure = 90.0;
        sensors.ingest(frame, &Thresholds::default());
    }

    let alerts = sensors.alerts();
    assert_eq!(alerts.len(), 50);
    assert_eq!(alerts[0].timestamp, 51);
    assert_eq!(alerts[49].timestamp, 2);

    let reloaded = SensorStore::load(db, Baseline::default()).await;
    assert_eq!(reloaded.alerts(), alerts);
}

#[tokio::test]
async fn quiet_ticks_do_not_touch_storage() {
    let db = Database::open_in_memory().unwrap();
    let sensors = SensorStore::load(db.clone(), Baseline::default()).await;

    assert!(sensors.ingest(calm_frame(1), &Thresholds::default()).is_empty());
    assert_eq!(db.get_value(keys::ALERTS).await.unwrap(), None);
}

#[tokio::test]
async fn saved_thresholds_apply_on_next_tick() {
    let db = Database::open_in_memory().unwrap();
    let sensors = SensorStore::load(db, Baseline::default()).await;
    let (events, mut rx) = broadcast::channel(64);
    let cancel = CancellationToken::new();

    let handle = tokio::spawn(sensing_loop(
        sensors.clone(),
        sensors.subscribe_thresholds(),
        Baseline::default(),
        Duration::from_millis(20),
        events,
        cancel.clone(),
    ));

    next_matching(&mut rx, |event| matches!(event, MonitorEvent::FootDataUpdated { .. })).await;

    // Baseline readings never reach 75 kPa, but always exceed zero.
    sensors.save_thresholds(Thresholds {
        pressure: 0.0,
        temperature: 1000.0,
    });

    let event =
        next_matching(&mut rx, |event| matches!(event, MonitorEvent::AlertsRaised { .. })).await;
    match event {
        MonitorEvent::AlertsRaised { alerts } => {
            assert_eq!(alerts.len(), 8);
            assert!(alerts.iter().all(|alert| alert.threshold == 0.0));
        }
        other => panic!("unexpected event {other:?}"),
    }

    cancel.cancel();
    handle.await.unwrap();
}

#[tokio::test]
async fn scheduler_start_and_stop_are_idempotent() {
    let db = Database::open_in_memory().unwrap();
    let state = AppState::load(db, &scratch_settings()).await;
    let monitor: &MonitorController = &state.monitor;
    let mut rx = monitor.subscribe();

    assert!(monitor.start(DataFrequency::Fast).await);
    assert!(!monitor.start(DataFrequency::Fast).await);
    assert_eq!(monitor.frequency().await, Some(DataFrequency::Fast));

    next_matching(&mut rx, |event| matches!(event, MonitorEvent::HistoryRecorded { .. })).await;
    next_matching(&mut rx, |event| {
        matches!(event, MonitorEvent::HealthIndexUpdated { .. })
    })
    .await;

    assert!(!monitor.set_frequency(DataFrequency::Fast).await.unwrap());
    assert!(monitor.set_frequency(DataFrequency::Slow).await.unwrap());
    assert_eq!(monitor.frequency().await, Some(DataFrequency::Slow));

    monitor.stop().await.unwrap();
    monitor.stop().await.unwrap();
    assert!(!monitor.is_running().await);

    monitor.shutdown().await.unwrap();
    assert!(!monitor.start(DataFrequency::Normal).await);
}

#[tokio::test]
async fn onboarding_overrides_pressure_threshold_and_frequency() {
    let db = Database::open_in_memory().unwrap();
    let state = AppState::load(db.clone(), &scratch_settings()).await;
    assert!(state.start_monitoring().await);
    assert_eq!(state.monitor.frequency().await, Some(DataFrequency::Normal));

    state
        .complete_onboarding(OnboardingData {
            measurement_unit: MeasurementUnit::Kpa,
            notification_threshold: 85.0,
            mock_data_frequency: DataFrequency::Fast,
        })
        .await
        .unwrap();

    assert_eq!(state.sensors.thresholds().pressure, 85.0);
    assert_eq!(state.sensors.thresholds().temperature, 36.0);
    assert_eq!(state.monitor.frequency().await, Some(DataFrequency::Fast));
    state.shutdown().await.unwrap();

    let reloaded = AppState::load(db, &scratch_settings()).await;
    assert_eq!(reloaded.sensors.thresholds().pressure, 85.0);
    assert_eq!(reloaded.auth.session().frequency(), DataFrequency::Fast);
}

#[tokio::test]
async fn assistant_tool_adds_validated_task() {
    let db = Database::open_in_memory().unwrap();
    let state = AppState::load(db, &scratch_settings()).await;

    let reply = state
        .run_assistant_tool(
            "addTodoTask",
            &json!({
                "title": "Soak feet",
                "description": "Lukewarm water, 10 minutes",
                "category": "foot_care",
                "priority": "low"
            }),
        )
        .unwrap();
    assert_eq!(reply, "Task \"Soak feet\" added to your to-do list!");

    let newest = &state.todos.tasks()[0];
    assert_eq!(newest.title, "Soak feet");
    assert_eq!(newest.generated_by, GeneratedBy::Stepmate);

    let rejected = state.run_assistant_tool(
        "addTodoTask",
        &json!({ "title": "Soak feet", "category": "spa", "priority": "low" }),
    );
    assert!(rejected.is_err());
    assert_eq!(state.todos.tasks().len(), 7);

    assert!(state.run_assistant_tool("deleteEverything", &json!({})).is_err());
}

#[tokio::test]
async fn health_index_tracks_compliance() {
    let db = Database::open_in_memory().unwrap();
    let state = AppState::load(db, &scratch_settings()).await;

    let before = xstep_lib::health::refresh_health(&state.sensors, &state.health, &state.todos);
    assert_eq!(before.factors.compliance, 0.0);

    for task in state.todos.tasks() {
        state.todos.toggle_task(&task.id);
    }
    let after = xstep_lib::health::refresh_health(&state.sensors, &state.health, &state.todos);
    assert_eq!(after.factors.compliance, 100.0);
    assert!(after.score <= before.score);
    assert_ne!(after.level, HealthLevel::Red);

    assert!(state.assistant_prompt().contains("- Completed: 6/6"));
}

//! Property tests for the monitoring pipeline: generation, evaluation,
//! scoring and the bounded logs.

use std::collections::HashSet;

use proptest::prelude::*;
use rand::{rngs::StdRng, SeedableRng};

use xstep_lib::{
    health::index,
    models::{
        DailyScore, FootData, FootZone, HealthLevel, NeuropathyStatus, SensorReading, Thresholds,
        ZoneReadings,
    },
    sensing::{
        alerts::{self, MAX_ALERTS},
        generator::{self, Baseline, PRESSURE_VARIATION, TEMPERATURE_VARIATION},
        history::{self, MAX_HISTORY_DAYS},
        risk,
    },
};

fn arb_reading() -> impl Strategy<Value = SensorReading> {
    (0.0f64..150.0, 25.0f64..42.0).prop_map(|(pressure, temperature)| SensorReading {
        pressure,
        temperature,
        timestamp: 0,
    })
}

fn arb_zones() -> impl Strategy<Value = ZoneReadings> {
    (arb_reading(), arb_reading(), arb_reading(), arb_reading()).prop_map(
        |(heel, arch, ball, toes)| ZoneReadings {
            heel,
            arch,
            ball,
            toes,
        },
    )
}

fn arb_frame() -> impl Strategy<Value = FootData> {
    (arb_zones(), arb_zones(), 0i64..1_000_000).prop_map(|(left, right, last_update)| FootData {
        left,
        right,
        battery: 90.0,
        last_update,
    })
}

fn arb_thresholds() -> impl Strategy<Value = Thresholds> {
    (10.0f64..120.0, 30.0f64..40.0).prop_map(|(pressure, temperature)| Thresholds {
        pressure,
        temperature,
    })
}

fn arb_neuropathy() -> impl Strategy<Value = NeuropathyStatus> {
    prop_oneof![
        Just(NeuropathyStatus::None),
        Just(NeuropathyStatus::Mild),
        Just(NeuropathyStatus::Moderate),
        Just(NeuropathyStatus::Severe),
    ]
}

// ── generator ────────────────────────────────────────────────

proptest! {
    #[test]
    fn generated_readings_stay_near_baseline(
        seed in any::<u64>(),
        pressure in 0.0f64..100.0,
        temperature in 20.0f64..40.0,
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let baseline = Baseline { pressure, temperature };
        let frame = generator::generate_at(baseline, 42, &mut rng);

        let half_p = PRESSURE_VARIATION / 2.0;
        let half_t = TEMPERATURE_VARIATION / 2.0;
        for reading in frame.readings() {
            prop_assert!(reading.pressure >= 0.0);
            prop_assert!(reading.pressure >= (pressure - half_p).max(0.0) - 1e-9);
            prop_assert!(reading.pressure <= pressure + half_p + 1e-9);
            prop_assert!(reading.temperature >= (temperature - half_t).max(0.0) - 1e-9);
            prop_assert!(reading.temperature <= temperature + half_t + 1e-9);
            prop_assert_eq!(reading.timestamp, 42);
        }
        prop_assert!(frame.battery >= 85.0 && frame.battery <= 95.0);
        prop_assert_eq!(frame.last_update, 42);
    }
}

// ── evaluator ────────────────────────────────────────────────

proptest! {
    #[test]
    fn alert_raised_iff_reading_exceeds_threshold(
        frame in arb_frame(),
        thresholds in arb_thresholds(),
    ) {
        let raised = alerts::evaluate(&frame, &thresholds);

        let expected = frame
            .readings()
            .map(|r| {
                usize::from(r.pressure > thresholds.pressure)
                    + usize::from(r.temperature > thresholds.temperature)
            })
            .sum::<usize>();
        prop_assert_eq!(raised.len(), expected);

        let ids: HashSet<_> = raised.iter().map(|alert| alert.id.as_str()).collect();
        prop_assert_eq!(ids.len(), raised.len());
        for alert in &raised {
            prop_assert!(alert.value > alert.threshold);
            prop_assert_eq!(alert.timestamp, frame.last_update);
            prop_assert!(!alert.dismissed);
        }
    }
}

// ── risk score ───────────────────────────────────────────────

proptest! {
    #[test]
    fn score_is_bounded_and_monotone(
        frame in arb_frame(),
        thresholds in arb_thresholds(),
        bump in 0.0f64..50.0,
        zone in 0usize..4,
    ) {
        let base = risk::score(&frame, &thresholds);
        prop_assert!((0.0..=100.0).contains(&base));

        let mut hotter = frame.clone();
        let zone = FootZone::ALL[zone];
        hotter.left.get_mut(zone).pressure += bump;
        hotter.right.get_mut(zone).temperature += bump / 10.0;

        prop_assert!(risk::score(&hotter, &thresholds) >= base);
    }
}

// ── bounded logs ─────────────────────────────────────────────

proptest! {
    #[test]
    fn alert_log_never_exceeds_cap(frames in proptest::collection::vec(0usize..=8, 0..40)) {
        let mut log = alerts::new_alert_log();

        for (tick, hot_readings) in frames.into_iter().enumerate() {
            let timestamp = tick as i64;
            let calm = SensorReading { pressure: 0.0, temperature: 0.0, timestamp };
            let mut frame = FootData {
                left: ZoneReadings::uniform(calm),
                right: ZoneReadings::uniform(calm),
                battery: 90.0,
                last_update: timestamp,
            };
            for slot in 0..hot_readings {
                let zone = FootZone::ALL[slot / 2];
                let foot = if slot % 2 == 0 { &mut frame.left } else { &mut frame.right };
                foot.get_mut(zone).pressure = 100.0;
            }

            let raised = alerts::evaluate(&frame, &Thresholds::default());
            prop_assert_eq!(raised.len(), hot_readings);
            log.prepend(raised);
            prop_assert!(log.len() <= MAX_ALERTS);
        }

        let timestamps: Vec<i64> = log.iter().map(|alert| alert.timestamp).collect();
        prop_assert!(timestamps.windows(2).all(|pair| pair[0] >= pair[1]));
    }

    #[test]
    fn history_dates_stay_unique_and_capped(days in proptest::collection::vec(0u32..60, 0..120)) {
        let mut log = history::new_history();

        for day in days {
            history::upsert(&mut log, DailyScore {
                date: format!("2025-{:02}-{:02}", day / 28 + 1, day % 28 + 1),
                score: f64::from(day),
                max_pressure: 50.0,
                max_temperature: 34.0,
                alert_count: 0,
            });
            prop_assert!(log.len() <= MAX_HISTORY_DAYS);
        }

        let dates: HashSet<_> = log.iter().map(|entry| entry.date.clone()).collect();
        prop_assert_eq!(dates.len(), log.len());
    }
}

// ── health index ─────────────────────────────────────────────

proptest! {
    #[test]
    fn level_follows_raw_total(
        pressure in 0.0f64..40.0,
        temperature in 0.0f64..40.0,
        compliance in 0.0f64..=100.0,
        neuropathy in arb_neuropathy(),
        hba1c in 4.0f64..12.0,
    ) {
        let result = index::compute(pressure, temperature, compliance, neuropathy, hba1c);
        let total = pressure
            + temperature
            + index::neuropathy_score(neuropathy)
            + index::glycemic_score(hba1c)
            + (100.0 - compliance);

        let expected = if total < 45.0 {
            HealthLevel::Green
        } else if total < 75.0 {
            HealthLevel::Amber
        } else {
            HealthLevel::Red
        };
        prop_assert_eq!(result.level, expected);
        prop_assert!((0.0..=100.0).contains(&result.score));
        prop_assert_eq!(result.factors.compliance, compliance);
    }
}

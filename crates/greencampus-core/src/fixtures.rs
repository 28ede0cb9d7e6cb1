//! Sample campus data.
//!
//! Injected at the boundary through the gateway's fixture source and used by
//! tests; projection code never reads it directly.

use crate::model::{
    Alert, AlertLevel, AssetCounts, DrainageCounts, EventKind, EventRecord, EventStatus,
    RiskScore, Snapshot, TrendPoint, UtilityReadings,
};

pub fn sample_events() -> Vec<EventRecord> {
    vec![
        EventRecord::new("12-06-2024", EventKind::Tree, "Neem-22", EventStatus::Healthy),
        EventRecord::new("11-06-2024", EventKind::Drain, "D-07", EventStatus::Uncleaned),
        EventRecord::new("09-06-2024", EventKind::Tree, "Pipal-12", EventStatus::Unhealthy),
        EventRecord::new("07-06-2024", EventKind::Drain, "D-01", EventStatus::Cleaned),
    ]
}

pub fn sample_alerts() -> Vec<Alert> {
    [
        (1, AlertLevel::Danger, "Drone entered restricted geofence near Block C."),
        (2, AlertLevel::Warning, "5 trees show low NDVI in Zone-2."),
        (3, AlertLevel::Info, "Drainage D-07 scheduled for cleaning today."),
    ]
    .into_iter()
    .map(|(id, level, message)| Alert {
        id,
        level,
        message: message.to_string(),
    })
    .collect()
}

/// Monthly campus issue counts.
pub fn sample_trend() -> Vec<TrendPoint> {
    const MONTHS: [(&str, u64); 12] = [
        ("Jan", 110),
        ("Feb", 140),
        ("Mar", 160),
        ("Apr", 180),
        ("May", 230),
        ("Jun", 290),
        ("Jul", 260),
        ("Aug", 240),
        ("Sep", 210),
        ("Oct", 200),
        ("Nov", 170),
        ("Dec", 160),
    ];
    MONTHS
        .iter()
        .map(|(label, value)| TrendPoint {
            label: label.to_string(),
            value: *value,
        })
        .collect()
}

pub fn sample_snapshot() -> Snapshot {
    Snapshot {
        trees: AssetCounts {
            total: 150,
            healthy: 120,
            unhealthy: 30,
        },
        drainages: DrainageCounts {
            total: 20,
            cleaned: 13,
            uncleared: 7,
        },
        risk: RiskScore {
            raw: 741,
            min: 0,
            max: 1000,
        },
        events: sample_events(),
        alerts: sample_alerts(),
        trend: sample_trend(),
        utilities: Some(UtilityReadings {
            energy_kwh: 128.4,
            water_kl: 32.1,
            footfall: 2341,
            co2_saved: 418,
        }),
    }
}

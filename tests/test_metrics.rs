use chrono::Utc;
use float_cmp::approx_eq;

use fleet_console::console::model::exposure::{ExposureEnvelope, PositionItem};
use fleet_console::console::model::infra::InfraData;
use fleet_console::console::model::strategy::{StrategyStatus, StrategySummary};
use fleet_console::console::model::telemetry::{BreakerState, CircuitBreakerInfo, TelemetryData};
use fleet_console::console::services::metrics_service::{
    build_view, estimate_risk, RiskLevel,
};
use fleet_console::console::snapshot::Snapshot;

fn snapshot_with(telemetry: TelemetryData, strategies: Vec<StrategySummary>) -> Snapshot {
    Snapshot {
        fetched_at: Utc::now(),
        telemetry,
        strategies,
        exposure: ExposureEnvelope::default(),
        infra: InfraData::default(),
        orders: Vec::new(),
        logs: Vec::new(),
    }
}

#[test]
fn test_estimate_risk_from_positions() {
    let positions = vec![
        PositionItem {
            symbol: "NIFTY24DEC24000CE".to_string(),
            qty: 150.0,
            ltp: Some(120.0),
            ..Default::default()
        },
        PositionItem {
            symbol: "NIFTY24DEC23800PE".to_string(),
            qty: -50.0,
            ltp: Some(80.0),
            ..Default::default()
        },
    ];

    let estimated = estimate_risk(&positions);
    // 3 + 1 手
    assert!(approx_eq!(f64, estimated.open_lots, 4.0));
    assert!(approx_eq!(f64, estimated.margin_at_risk, 100_000.0));
    // 150*120*0.1 + 50*80*0.1
    assert!(approx_eq!(f64, estimated.max_theo_loss, 2200.0, epsilon = 1e-6));
    assert!(estimated.estimated);
}

#[test]
fn test_estimate_uses_stop_distance_when_present() {
    let positions = vec![PositionItem {
        symbol: "NIFTY24DEC24000CE".to_string(),
        qty: 100.0,
        ltp: Some(120.0),
        stop: Some(95.0),
        ..Default::default()
    }];

    let estimated = estimate_risk(&positions);
    // 止损距离 25 点 × 100
    assert!(approx_eq!(f64, estimated.max_theo_loss, 2500.0, epsilon = 1e-6));
}

#[test]
fn test_estimate_skips_positions_without_ltp() {
    let positions = vec![PositionItem {
        symbol: "BANKNIFTY".to_string(),
        qty: 30.0,
        ltp: None,
        ..Default::default()
    }];
    let estimated = estimate_risk(&positions);
    assert!(approx_eq!(f64, estimated.max_theo_loss, 0.0));
    // 手数仍按数量折算
    assert!(estimated.open_lots > 0.0);
}

#[tokio::test]
async fn test_view_meters_clamp_to_full_bar() {
    let mut telemetry = TelemetryData::default();
    telemetry.margin.pct = 140.0;
    telemetry.session.loss_pct = -5.0;

    let view = build_view(&snapshot_with(telemetry, Vec::new()));
    assert_eq!(view.margin_meter_pct, 100.0);
    assert_eq!(view.loss_meter_pct, 0.0);
    // 140% 的保证金占用无条件 danger
    assert_eq!(view.risk, RiskLevel::Danger);
}

#[tokio::test]
async fn test_error_fields_present_iff_error_status() {
    let mut errored = StrategySummary {
        name: "gamma".to_string(),
        status: StrategyStatus::Error,
        restart_count: 2,
        ..Default::default()
    };
    errored.error_msg = Some("order rejected".to_string());
    errored.error_trace = Some("Traceback: ...".to_string());
    errored.last_good_trade = Some("14:02:11".to_string());

    let running = StrategySummary {
        name: "alpha".to_string(),
        status: StrategyStatus::Running,
        // 后端残留的错误字段不会泄漏到非错误态的视图
        error_msg: Some("stale".to_string()),
        ..Default::default()
    };

    let view = build_view(&snapshot_with(TelemetryData::default(), vec![errored, running]));

    let gamma = &view.strategies[0];
    let detail = gamma.error.as_ref().expect("error detail for error status");
    assert_eq!(detail.msg, "order rejected");
    assert_eq!(detail.trace, "Traceback: ...");
    assert_eq!(detail.restart_count, 2);
    assert!(gamma.auto_restart_available);

    let alpha = &view.strategies[1];
    assert!(alpha.error.is_none());
}

#[tokio::test]
async fn test_error_detail_defaults_when_backend_omits_fields() {
    let errored = StrategySummary {
        name: "gamma".to_string(),
        status: StrategyStatus::Error,
        restart_count: 5,
        ..Default::default()
    };

    let view = build_view(&snapshot_with(TelemetryData::default(), vec![errored]));
    let card = &view.strategies[0];
    // 错误态下详情字段必须存在，即使后端漏发也以空串兜底
    let detail = card.error.as_ref().unwrap();
    assert_eq!(detail.msg, "");
    assert_eq!(detail.restart_count, 5);
    // 自动重启配额已耗尽
    assert!(!card.auto_restart_available);
}

#[tokio::test]
async fn test_tripped_breaker_count() {
    let mut telemetry = TelemetryData::default();
    telemetry.circuit_breakers = vec![
        CircuitBreakerInfo {
            service: "broker".to_string(),
            state: BreakerState::Closed,
        },
        CircuitBreakerInfo {
            service: "feed".to_string(),
            state: BreakerState::HalfOpen,
        },
        CircuitBreakerInfo {
            service: "db".to_string(),
            state: BreakerState::Open,
        },
    ];

    let view = build_view(&snapshot_with(telemetry, Vec::new()));
    assert_eq!(view.tripped_breakers, 2);
}

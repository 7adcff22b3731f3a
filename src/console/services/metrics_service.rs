//! 快照到视图模型的纯函数派生
//!
//! 本模块不持有状态，所有输出都由当前快照决定。
//! 其中 margin_at_risk / max_theo_loss 属于客户端估算值，
//! 展示时必须与后端权威数字区分标注。

use serde::Serialize;

use crate::console::model::exposure::PositionItem;
use crate::console::model::strategy::{StrategySummary, StrategyStatus};
use crate::console::model::telemetry::{BreakerState, FeedStatus};
use crate::console::snapshot::Snapshot;
use crate::time_util;

/// 自动重启次数上限，达到后执行器不再自动拉起（手动 resume 不受限）
pub const MAX_AUTO_RESTARTS: i64 = 5;
/// 每手近似 SPAN 保证金
pub const MARGIN_PER_LOT: f64 = 25_000.0;
/// 最坏情形假设：每个持仓承受 10% 不利变动且止损未触发
pub const ADVERSE_MOVE_PCT: f64 = 0.10;

/// 整体风险档位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Ok,
    Warn,
    Danger,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Ok => "ok",
            RiskLevel::Warn => "warn",
            RiskLevel::Danger => "danger",
        }
    }
}

/// 风险档位判定
///
/// danger: margin≥85 或 loss≥80；warn: margin≥70 或 loss≥55；否则 ok。
pub fn risk_level(margin_pct: f64, daily_loss_pct: f64) -> RiskLevel {
    if margin_pct >= 85.0 || daily_loss_pct >= 80.0 {
        RiskLevel::Danger
    } else if margin_pct >= 70.0 || daily_loss_pct >= 55.0 {
        RiskLevel::Warn
    } else {
        RiskLevel::Ok
    }
}

/// 行情源年龄的着色档位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedTone {
    Live,
    Stale,
    Dead,
}

/// 按 tick 年龄着色：>2s 按 dead 处理，>0.8s 按 stale 处理
///
/// 年龄未知时按 dead 着色，宁可多报警也不给假绿灯。
pub fn feed_age_tone(age_seconds: Option<f64>) -> FeedTone {
    match age_seconds {
        Some(age) if age <= 0.8 => FeedTone::Live,
        Some(age) if age <= 2.0 => FeedTone::Stale,
        _ => FeedTone::Dead,
    }
}

/// 净 delta 的方向信号
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NetDirection {
    Bull,
    Bear,
    Neutral,
}

impl NetDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            NetDirection::Bull => "BULL",
            NetDirection::Bear => "BEAR",
            NetDirection::Neutral => "NEUTRAL",
        }
    }
}

pub fn net_direction(net_delta: f64) -> NetDirection {
    if net_delta > 0.0 {
        NetDirection::Bull
    } else if net_delta < 0.0 {
        NetDirection::Bear
    } else {
        NetDirection::Neutral
    }
}

/// 百分比进度条一律压到 [0, 100]，超过 100% 渲染为满格
pub fn clamp_pct(pct: f64) -> f64 {
    pct.clamp(0.0, 100.0)
}

/// used/total 折算成进度条百分比，total 非正时为 0
pub fn meter_pct(used: f64, total: f64) -> f64 {
    if total <= 0.0 {
        0.0
    } else {
        clamp_pct(used / total * 100.0)
    }
}

/// 客户端估算的风险数字
///
/// estimated 恒为 true，渲染层据此加"估算"标注。
#[derive(Debug, Clone, Serialize)]
pub struct EstimatedRisk {
    pub open_lots: f64,
    pub margin_at_risk: f64,
    pub max_theo_loss: f64,
    pub estimated: bool,
}

/// 由持仓止损距离与固定每手保证金常量估算风险敞口
///
/// 有止损的持仓按现价到止损的距离计损，没有止损的持仓按
/// ADVERSE_MOVE_PCT 的不利变动计损。
pub fn estimate_risk(positions: &[PositionItem]) -> EstimatedRisk {
    let open_lots: f64 = positions.iter().map(|p| p.lots()).sum();
    let max_theo_loss: f64 = positions
        .iter()
        .filter_map(|p| {
            let reference = p.ltp.or(p.entry)?;
            let per_unit = match p.stop {
                Some(stop) => (reference - stop).abs(),
                None => reference * ADVERSE_MOVE_PCT,
            };
            Some(p.qty.abs() * per_unit)
        })
        .sum();
    EstimatedRisk {
        open_lots,
        margin_at_risk: open_lots * MARGIN_PER_LOT,
        max_theo_loss,
        estimated: true,
    }
}

/// 自动重启是否仍然可用
pub fn auto_restart_available(restart_count: i64) -> bool {
    restart_count < MAX_AUTO_RESTARTS
}

/// 错误态策略的详情
#[derive(Debug, Clone, Serialize)]
pub struct ErrorDetail {
    pub msg: String,
    pub trace: String,
    pub restart_count: i64,
    pub last_good_trade: Option<String>,
}

/// status=error 时返回 Some，其余状态一律 None
///
/// 保证视图模型中错误字段与状态互相一致，即使后端字段缺失。
pub fn error_detail(summary: &StrategySummary) -> Option<ErrorDetail> {
    if summary.status != StrategyStatus::Error {
        return None;
    }
    Some(ErrorDetail {
        msg: summary.error_msg.clone().unwrap_or_default(),
        trace: summary.error_trace.clone().unwrap_or_default(),
        restart_count: summary.restart_count,
        last_good_trade: summary.last_good_trade.clone(),
    })
}

/// 渲染就绪的策略卡片
#[derive(Debug, Clone)]
pub struct StrategyCard {
    pub summary: StrategySummary,
    pub error: Option<ErrorDetail>,
    pub auto_restart_available: bool,
    /// 后端尚未确认的控制意图
    pub pending_intent: Option<String>,
}

pub fn strategy_card(summary: &StrategySummary) -> StrategyCard {
    StrategyCard {
        error: error_detail(summary),
        auto_restart_available: auto_restart_available(summary.restart_count),
        pending_intent: summary.control_intent.clone(),
        summary: summary.clone(),
    }
}

/// 渲染就绪的整体视图模型
#[derive(Debug, Clone)]
pub struct DeckView {
    /// 快照时间 HH:MM:SS
    pub as_of: String,
    pub risk: RiskLevel,
    pub feed_status: FeedStatus,
    pub feed_tone: FeedTone,
    pub direction: NetDirection,
    pub day_pnl: f64,
    pub is_killed: bool,
    pub margin_meter_pct: f64,
    pub loss_meter_pct: f64,
    pub strategies: Vec<StrategyCard>,
    /// 非 CLOSED 状态的熔断器数量
    pub tripped_breakers: usize,
    pub estimated: EstimatedRisk,
}

/// 快照 → 视图模型
pub fn build_view(snapshot: &Snapshot) -> DeckView {
    let telemetry = &snapshot.telemetry;
    DeckView {
        as_of: time_util::hhmmss(snapshot.fetched_at),
        risk: risk_level(telemetry.margin.pct, telemetry.session.loss_pct),
        feed_status: telemetry.feed.status,
        feed_tone: feed_age_tone(telemetry.feed.age_seconds),
        direction: net_direction(telemetry.delta),
        day_pnl: telemetry.session.day_pnl,
        is_killed: telemetry.session.is_killed,
        margin_meter_pct: clamp_pct(telemetry.margin.pct),
        loss_meter_pct: clamp_pct(telemetry.session.loss_pct),
        strategies: snapshot.strategies.iter().map(strategy_card).collect(),
        tripped_breakers: telemetry
            .circuit_breakers
            .iter()
            .filter(|cb| cb.state != BreakerState::Closed)
            .count(),
        estimated: estimate_risk(&snapshot.exposure.positions),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_level_thresholds() {
        // margin 82 / loss 60：都未到 danger 档，margin≥70 触发 warn
        assert_eq!(risk_level(82.0, 60.0), RiskLevel::Warn);
        // margin 90 无条件 danger
        assert_eq!(risk_level(90.0, 0.0), RiskLevel::Danger);
        assert_eq!(risk_level(0.0, 80.0), RiskLevel::Danger);
        assert_eq!(risk_level(69.9, 54.9), RiskLevel::Ok);
        assert_eq!(risk_level(70.0, 0.0), RiskLevel::Warn);
        assert_eq!(risk_level(0.0, 55.0), RiskLevel::Warn);
        assert_eq!(risk_level(85.0, 0.0), RiskLevel::Danger);
    }

    #[test]
    fn test_feed_age_tone() {
        assert_eq!(feed_age_tone(Some(0.2)), FeedTone::Live);
        assert_eq!(feed_age_tone(Some(0.8)), FeedTone::Live);
        assert_eq!(feed_age_tone(Some(1.5)), FeedTone::Stale);
        assert_eq!(feed_age_tone(Some(2.1)), FeedTone::Dead);
        assert_eq!(feed_age_tone(None), FeedTone::Dead);
    }

    #[test]
    fn test_net_direction() {
        assert_eq!(net_direction(0.5), NetDirection::Bull);
        assert_eq!(net_direction(-0.01), NetDirection::Bear);
        assert_eq!(net_direction(0.0), NetDirection::Neutral);
    }

    #[test]
    fn test_meter_clamps_to_full() {
        // 140/100 渲染为满格而不是溢出
        assert_eq!(meter_pct(140.0, 100.0), 100.0);
        assert_eq!(meter_pct(50.0, 100.0), 50.0);
        assert_eq!(meter_pct(10.0, 0.0), 0.0);
        assert_eq!(clamp_pct(-3.0), 0.0);
    }

    #[test]
    fn test_auto_restart_cap() {
        assert!(auto_restart_available(0));
        assert!(auto_restart_available(4));
        assert!(!auto_restart_available(5));
        assert!(!auto_restart_available(9));
    }
}

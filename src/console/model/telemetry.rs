use serde::{Deserialize, Serialize};

/// 顶栏、风险条与敞口面板所需的全部遥测数据
///
/// 各个子字段相互独立，后端缺省时以默认值填充，不影响整体反序列化。
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct TelemetryData {
    /// 服务端生成时间（ISO 8601）
    #[serde(default)]
    pub ts: String,
    /// 当日会话汇总
    #[serde(default)]
    pub session: SessionTotals,
    /// 订单时延统计
    #[serde(default)]
    pub latency: LatencyStats,
    /// 行情源健康状态
    #[serde(default)]
    pub feed: FeedInfo,
    /// 运行中策略的净期权 delta 合计
    #[serde(default)]
    pub delta: f64,
    /// 保证金占用
    #[serde(default)]
    pub margin: MarginInfo,
    /// 敞口汇总（与 /exposure 的明细对应）
    #[serde(default)]
    pub exposure: ExposureTotals,
    /// 对账滞后
    #[serde(default)]
    pub reconciliation: ReconciliationLag,
    /// 依赖服务熔断器状态，后端按固定顺序返回
    #[serde(default)]
    pub circuit_breakers: Vec<CircuitBreakerInfo>,
}

/// 当日会话汇总
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct SessionTotals {
    /// 当日盈亏（已实现 + 未实现）
    #[serde(default)]
    pub day_pnl: f64,
    /// 当日亏损占最大允许亏损的百分比
    #[serde(default)]
    pub loss_pct: f64,
    /// 全局 kill switch 是否生效
    #[serde(default)]
    pub is_killed: bool,
    /// 触发 kill switch 的原因
    #[serde(default)]
    pub kill_reason: Option<String>,
    /// 各状态的策略数量，如 {"running": 3, "paused": 1}
    #[serde(default)]
    pub counts: std::collections::HashMap<String, i64>,
}

/// 订单时延统计（毫秒）
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct LatencyStats {
    #[serde(default)]
    pub avg_ms: f64,
    #[serde(default)]
    pub p50_ms: f64,
    #[serde(default)]
    pub p95_ms: f64,
    #[serde(default)]
    pub p99_ms: f64,
    /// 最近一笔成交的时延
    #[serde(default)]
    pub last_ms: f64,
    /// 样本数量
    #[serde(default)]
    pub sample_n: usize,
    /// 最近样本序列，新值在前
    #[serde(default)]
    pub history: Vec<f64>,
    /// 超过 200ms 的样本数
    #[serde(default)]
    pub spike_count: i64,
}

/// 行情源状态
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct FeedInfo {
    /// 距最近一个 tick 的秒数，两个来源都不可用时为 None
    #[serde(default)]
    pub age_seconds: Option<f64>,
    #[serde(default)]
    pub ws_connected: bool,
    #[serde(default)]
    pub status: FeedStatus,
    /// 最近一个 tick 的 UTC 时间
    #[serde(default)]
    pub last_tick_utc: Option<String>,
}

/// 行情源健康三态，外加两个来源都失效时的 unknown
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FeedStatus {
    Live,
    Stale,
    Dead,
    #[default]
    Unknown,
}

impl FeedStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedStatus::Live => "live",
            FeedStatus::Stale => "stale",
            FeedStatus::Dead => "dead",
            FeedStatus::Unknown => "unknown",
        }
    }
}

/// 保证金占用
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct MarginInfo {
    #[serde(default)]
    pub used: f64,
    #[serde(default)]
    pub total: f64,
    /// 占用百分比，后端计算
    #[serde(default)]
    pub pct: f64,
}

/// 敞口汇总
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ExposureTotals {
    #[serde(default)]
    pub open_positions: i64,
    #[serde(default)]
    pub open_lots: i64,
    #[serde(default)]
    pub margin_at_risk: f64,
    #[serde(default)]
    pub unrealized_pnl: f64,
}

/// 对账滞后
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ReconciliationLag {
    /// 距上次成功对账的秒数
    #[serde(default)]
    pub lag_seconds: Option<i64>,
}

/// 单个依赖服务的熔断器状态
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CircuitBreakerInfo {
    pub service: String,
    pub state: BreakerState,
}

/// 熔断器状态
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BreakerState {
    Closed,
    HalfOpen,
    Open,
}

impl BreakerState {
    pub fn as_str(&self) -> &'static str {
        match self {
            BreakerState::Closed => "CLOSED",
            BreakerState::HalfOpen => "HALF_OPEN",
            BreakerState::Open => "OPEN",
        }
    }
}

use serde::{Deserialize, Serialize};

/// GET /strategies 响应
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct StrategiesEnvelope {
    #[serde(default)]
    pub ts: String,
    #[serde(default)]
    pub strategies: Vec<StrategySummary>,
}

/// 单个策略的只读投影，由执行器每个 tick 写入、轮询读出
///
/// 错误相关字段仅在 status=error 时有值，视图层通过
/// `metrics_service::error_detail` 做一致性收敛。
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct StrategySummary {
    pub name: String,
    #[serde(default)]
    pub status: StrategyStatus,
    /// 后端尚未确认的控制意图，如 "pause"；用于渲染 pending 标记
    #[serde(default)]
    pub control_intent: Option<String>,
    #[serde(default)]
    pub pnl: f64,
    /// 分配资金
    #[serde(default)]
    pub alloc: Option<f64>,
    #[serde(default)]
    pub open_qty: f64,
    #[serde(default)]
    pub avg_entry: Option<f64>,
    #[serde(default)]
    pub ltp: Option<f64>,
    #[serde(default)]
    pub win_rate: f64,
    #[serde(default)]
    pub trades: i64,
    #[serde(default)]
    pub delta: f64,
    #[serde(default)]
    pub drawdown: Option<f64>,
    #[serde(default)]
    pub max_dd: Option<f64>,
    #[serde(default)]
    pub risk_pct: f64,
    /// 方向偏好 BULL/BEAR/NEUTRAL
    #[serde(default)]
    pub direction: Option<String>,
    #[serde(default)]
    pub signal: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(rename = "type", default)]
    pub strategy_type: Option<String>,
    #[serde(default)]
    pub last_trade: Option<String>,
    /// 权益曲线，时间升序
    #[serde(default)]
    pub equity: Vec<f64>,
    // 错误字段，仅 status=error 时由后端填充
    #[serde(default)]
    pub error_msg: Option<String>,
    #[serde(default)]
    pub error_trace: Option<String>,
    #[serde(default)]
    pub error_count: Option<i64>,
    #[serde(default)]
    pub last_good_trade: Option<String>,
    #[serde(default)]
    pub restart_count: i64,
    #[serde(default)]
    pub auto_restart: Option<bool>,
}

/// 策略状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StrategyStatus {
    /// 运行中
    #[default]
    Running,
    /// 暂停
    Paused,
    /// 错误（仅由后端进入/退出，客户端不会主动置为 error）
    Error,
    /// 已停止
    Stopped,
}

impl StrategyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyStatus::Running => "running",
            StrategyStatus::Paused => "paused",
            StrategyStatus::Error => "error",
            StrategyStatus::Stopped => "stopped",
        }
    }

    /// 操作员允许发起的状态转换表
    ///
    /// running→paused, running→stopped, paused→running, paused→stopped,
    /// error→running（resume 隐含重启）, stopped→running（start）。
    /// 其余组合一律在派发边界拒绝。
    pub fn allows(&self, action: StrategyAction) -> bool {
        matches!(
            (self, action),
            (StrategyStatus::Running, StrategyAction::Pause)
                | (StrategyStatus::Running, StrategyAction::Stop)
                | (StrategyStatus::Paused, StrategyAction::Resume)
                | (StrategyStatus::Paused, StrategyAction::Stop)
                | (StrategyStatus::Error, StrategyAction::Resume)
                | (StrategyStatus::Stopped, StrategyAction::Start)
        )
    }
}

impl std::str::FromStr for StrategyStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "running" => Ok(StrategyStatus::Running),
            "paused" => Ok(StrategyStatus::Paused),
            "error" => Ok(StrategyStatus::Error),
            "stopped" => Ok(StrategyStatus::Stopped),
            _ => Err(format!("Unknown strategy status: {}", s)),
        }
    }
}

/// 针对单个策略的控制动作，对应 POST /strategies/{name}/{action}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyAction {
    Pause,
    Resume,
    Stop,
    Start,
}

impl StrategyAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyAction::Pause => "pause",
            StrategyAction::Resume => "resume",
            StrategyAction::Stop => "stop",
            StrategyAction::Start => "start",
        }
    }

    /// pause/stop 会影响持仓处理，必须经操作员确认后才触达传输层
    pub fn requires_confirmation(&self) -> bool {
        matches!(self, StrategyAction::Pause | StrategyAction::Stop)
    }
}

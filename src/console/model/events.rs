use serde::{Deserialize, Serialize};

/// GET /orders 响应
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct OrdersEnvelope {
    #[serde(default)]
    pub ts: String,
    #[serde(default)]
    pub orders: Vec<OrderEvent>,
}

/// 订单流中的一条事件
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct OrderEvent {
    #[serde(default)]
    pub id: i64,
    /// HH:MM:SS
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub event: String,
    #[serde(default)]
    pub sym: String,
    #[serde(default)]
    pub strat: String,
    #[serde(default)]
    pub side: String,
    #[serde(default)]
    pub qty: f64,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub status: String,
    /// 拒单原因
    #[serde(default)]
    pub reason: Option<String>,
}

/// GET /logs 响应
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct LogsEnvelope {
    #[serde(default)]
    pub ts: String,
    #[serde(default)]
    pub logs: Vec<LogLine>,
}

/// 一条系统日志
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct LogLine {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub msg: String,
    #[serde(default)]
    pub module: String,
}

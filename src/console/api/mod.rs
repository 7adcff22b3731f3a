use serde::{Deserialize, Serialize};

pub mod client;
pub mod control;
pub mod observe;

pub use client::ConsoleClient;
pub use control::ControlApi;
pub use observe::TelemetrySource;

/// 控制命令的后端应答
///
/// 后端采用 intent/ack 模式：success=false 且 status="pending" 表示意图已
/// 入队但执行器尚未确认，调用方按"已受理未确认"处理，不得当作成功。
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct CommandAck {
    #[serde(default)]
    pub success: bool,
    /// "confirmed" | "pending" | "error"
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: String,
    /// 批量操作受影响的数量
    #[serde(default)]
    pub affected: Option<i64>,
    /// 批量操作失败的数量
    #[serde(default)]
    pub failed: Option<i64>,
    /// 执行器确认耗时
    #[serde(default)]
    pub ack_latency_ms: Option<i64>,
}

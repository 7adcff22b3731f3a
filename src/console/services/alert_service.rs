//! 告警生命周期管理
//!
//! 与轮询节奏完全独立的瞬时通知队列：新告警插到队头，
//! 超出容量的旧告警静默淘汰，每条告警到期自动消失。

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::Mutex;

/// 队列容量，超出后淘汰最旧的告警
pub const MAX_ALERTS: usize = 6;
/// 告警自动消失的延迟（秒）
pub const ALERT_TTL_SECS: u64 = 9;

/// 告警级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
    Info,
    Success,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Warning => "warning",
            Severity::Info => "info",
            Severity::Success => "success",
        }
    }
}

/// 一条告警
#[derive(Debug, Clone, Serialize)]
pub struct Alert {
    /// 创建时间毫秒数；同一毫秒内的冲突以单调递增消解，保证全局唯一
    pub id: i64,
    pub severity: Severity,
    pub title: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

struct AlertQueue {
    alerts: Vec<Alert>,
    last_id: i64,
}

/// 告警中心
///
/// 队列只被本组件修改；到期任务与手动关闭都按 id 做幂等删除，
/// 二者竞争的最终状态一致（告警消失），不会误删后续告警。
#[derive(Clone)]
pub struct AlertCenter {
    inner: Arc<Mutex<AlertQueue>>,
}

impl Default for AlertCenter {
    fn default() -> Self {
        Self::new()
    }
}

impl AlertCenter {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(AlertQueue {
                alerts: Vec::new(),
                last_id: 0,
            })),
        }
    }

    /// 追加一条告警，返回其 id
    ///
    /// 新告警始终位于队头；队列截断到容量上限（淘汰是预期行为，
    /// 不是错误）；同时为该 id 调度一次 9 秒后的自动删除。
    pub async fn push(&self, severity: Severity, title: &str, message: &str) -> i64 {
        let id = {
            let mut queue = self.inner.lock().await;
            let now_ms = Utc::now().timestamp_millis();
            let id = if now_ms <= queue.last_id {
                queue.last_id + 1
            } else {
                now_ms
            };
            queue.last_id = id;
            queue.alerts.insert(
                0,
                Alert {
                    id,
                    severity,
                    title: title.to_string(),
                    message: message.to_string(),
                    created_at: Utc::now(),
                },
            );
            queue.alerts.truncate(MAX_ALERTS);
            id
        };

        // id 永不复用，到期删除即使晚于手动关闭也只会是无操作
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(ALERT_TTL_SECS)).await;
            let mut queue = inner.lock().await;
            queue.alerts.retain(|a| a.id != id);
        });

        id
    }

    /// 立即删除指定告警；该 id 不存在时为无操作
    pub async fn dismiss(&self, id: i64) {
        let mut queue = self.inner.lock().await;
        queue.alerts.retain(|a| a.id != id);
    }

    /// 当前队列的克隆，队头最新
    pub async fn current(&self) -> Vec<Alert> {
        self.inner.lock().await.alerts.clone()
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.alerts.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.lock().await.alerts.is_empty()
    }
}

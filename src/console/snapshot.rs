use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::console::model::events::{LogLine, OrderEvent};
use crate::console::model::exposure::ExposureEnvelope;
use crate::console::model::infra::InfraData;
use crate::console::model::strategy::StrategySummary;
use crate::console::model::telemetry::TelemetryData;

/// 一次成功轮询合并出的一致视图
///
/// 快照只能整体替换，任何一路查询失败都不会产生部分更新，
/// 因此读到的各个字段一定来自同一轮。
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// 本轮完成时间
    pub fetched_at: DateTime<Utc>,
    pub telemetry: TelemetryData,
    pub strategies: Vec<StrategySummary>,
    pub exposure: ExposureEnvelope,
    pub infra: InfraData,
    pub orders: Vec<OrderEvent>,
    pub logs: Vec<LogLine>,
}

/// 快照的唯一持有者
///
/// 写入方只有轮询任务；其他组件读取克隆，互不加锁竞争。
#[derive(Default)]
pub struct SnapshotStore {
    inner: RwLock<Option<Snapshot>>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(None),
        }
    }

    /// 整体替换为新一轮快照
    pub async fn replace(&self, snapshot: Snapshot) {
        let mut guard = self.inner.write().await;
        *guard = Some(snapshot);
    }

    /// 当前快照的克隆，尚无成功轮询时为 None
    pub async fn current(&self) -> Option<Snapshot> {
        self.inner.read().await.clone()
    }

    /// 全局 kill switch 是否生效；无快照时按未生效处理
    pub async fn is_killed(&self) -> bool {
        self.inner
            .read()
            .await
            .as_ref()
            .map(|s| s.telemetry.session.is_killed)
            .unwrap_or(false)
    }

    /// 按名称查找策略投影
    pub async fn strategy(&self, name: &str) -> Option<StrategySummary> {
        self.inner
            .read()
            .await
            .as_ref()
            .and_then(|s| s.strategies.iter().find(|x| x.name == name).cloned())
    }
}

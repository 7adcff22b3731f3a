use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{info, warn};

use crate::console::api::TelemetrySource;
use crate::console::snapshot::{Snapshot, SnapshotStore};
use crate::error::AppResult;

/// 轮询周期
pub const POLL_INTERVAL_MS: u64 = 2000;

/// 遥测轮询任务
///
/// 每个 tick 并发发起全部查询，全部成功才整体替换快照；
/// 任何一路失败则保留上一份快照，只记日志不打扰操作员。
pub struct PollJob {
    source: Arc<dyn TelemetrySource>,
    store: Arc<SnapshotStore>,
    shutdown_sender: broadcast::Sender<()>,
}

impl PollJob {
    pub fn new(source: Arc<dyn TelemetrySource>, store: Arc<SnapshotStore>) -> Self {
        let (shutdown_sender, _) = broadcast::channel(16);
        Self {
            source,
            store,
            shutdown_sender,
        }
    }

    /// 停机句柄，send(()) 后轮询循环退出
    pub fn shutdown_handle(&self) -> broadcast::Sender<()> {
        self.shutdown_sender.clone()
    }

    /// 启动轮询循环
    ///
    /// interval 采用 Skip 策略：某一轮超出周期时跳过错过的 tick，
    /// 而不是排队补发，保证任何时刻至多一轮在途。
    pub fn spawn(self) -> JoinHandle<()> {
        let mut interval_timer = interval(Duration::from_millis(POLL_INTERVAL_MS));
        interval_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut shutdown_receiver = self.shutdown_sender.subscribe();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = interval_timer.tick() => {
                        poll_once(&self.source, &self.store).await;
                    }
                    _ = shutdown_receiver.recv() => {
                        info!("poll job is shutting down");
                        break;
                    }
                }
            }
        })
    }
}

/// 执行一轮轮询并在成功时替换快照
///
/// 失败属于轮询节奏下的常态，降级为 warn 日志，不产生任何告警。
pub async fn poll_once(source: &Arc<dyn TelemetrySource>, store: &Arc<SnapshotStore>) {
    match fetch_round(source).await {
        Ok(snapshot) => {
            store.replace(snapshot).await;
        }
        Err(e) => {
            warn!("轮询失败，保留上一份快照: {}", e);
        }
    }
}

/// 并发抓取六路遥测，合并为一份快照
///
/// try_join! 保证全有或全无：任何一路失败立即返回错误，不产生部分结果。
pub async fn fetch_round(source: &Arc<dyn TelemetrySource>) -> AppResult<Snapshot> {
    let (telemetry, strategies, exposure, infra, orders, logs) = tokio::try_join!(
        source.telemetry(),
        source.strategies(),
        source.exposure(),
        source.infra(),
        source.orders(),
        source.logs(),
    )?;

    Ok(Snapshot {
        fetched_at: Utc::now(),
        telemetry,
        strategies: strategies.strategies,
        exposure,
        infra,
        orders: orders.orders,
        logs: logs.logs,
    })
}

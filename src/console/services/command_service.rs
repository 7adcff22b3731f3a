//! 命令派发
//!
//! 操作员意图触达后端的唯一路径。破坏性意图先生成确认请求，
//! 确认落地后才调用传输层；派发从不就地修改本地策略状态，
//! 下一轮轮询是结果状态的唯一事实来源。

use std::sync::Arc;

use tracing::{info, warn};

use crate::console::api::{CommandAck, ControlApi};
use crate::console::model::strategy::StrategyAction;
use crate::console::services::alert_service::{AlertCenter, Severity};
use crate::console::services::metrics_service::{estimate_risk, EstimatedRisk};
use crate::console::snapshot::SnapshotStore;
use crate::error::{AppError, AppResult};

/// kill 确认弹窗中必须呈现的警告文案
pub const KILL_WARNING: &str = "Open positions will NOT be squared off automatically. \
The halted state persists across restarts until explicitly lifted.";

/// 确认请求携带的目标策略审阅快照
#[derive(Debug, Clone)]
pub struct StrategyReview {
    pub pnl: f64,
    pub open_qty: f64,
    pub win_rate: f64,
}

/// kill 确认携带的全局汇总
#[derive(Debug, Clone)]
pub struct KillReview {
    /// 运行中策略数量
    pub running: usize,
    pub open_positions: usize,
    pub day_pnl: f64,
    /// 客户端估算的保证金敞口
    pub estimated: EstimatedRisk,
    pub warning: &'static str,
}

/// 待操作员确认的动作，存在于点击与派发结果之间
#[derive(Debug, Clone)]
pub enum ConfirmationRequest {
    Strategy {
        name: String,
        action: StrategyAction,
        review: StrategyReview,
    },
    Kill {
        review: KillReview,
    },
}

/// 一次意图请求的去向
#[derive(Debug)]
pub enum CommandOutcome {
    /// 已直接派发
    Dispatched,
    /// 需要操作员确认，确认前不触达传输层
    NeedsConfirmation(ConfirmationRequest),
    /// 客户端侧拒绝，已推送说明告警
    Refused,
}

/// 命令派发器
pub struct CommandService {
    api: Arc<dyn ControlApi>,
    store: Arc<SnapshotStore>,
    alerts: AlertCenter,
}

impl CommandService {
    pub fn new(api: Arc<dyn ControlApi>, store: Arc<SnapshotStore>, alerts: AlertCenter) -> Self {
        Self { api, store, alerts }
    }

    /// 针对单个策略发起意图
    ///
    /// 先按状态转换表做客户端预检；pause/stop 返回确认请求，
    /// resume/start 立即派发一次传输调用。
    pub async fn request_action(&self, name: &str, action: StrategyAction) -> CommandOutcome {
        let Some(strategy) = self.store.strategy(name).await else {
            self.alerts
                .push(
                    Severity::Warning,
                    "Unknown strategy",
                    &format!("No strategy named '{}' in the current snapshot.", name),
                )
                .await;
            return CommandOutcome::Refused;
        };

        if !strategy.status.allows(action) {
            self.alerts
                .push(
                    Severity::Warning,
                    "Invalid action",
                    &format!(
                        "Cannot {} '{}' while it is {}.",
                        action.as_str(),
                        name,
                        strategy.status.as_str()
                    ),
                )
                .await;
            return CommandOutcome::Refused;
        }

        if action.requires_confirmation() {
            return CommandOutcome::NeedsConfirmation(ConfirmationRequest::Strategy {
                name: name.to_string(),
                action,
                review: StrategyReview {
                    pnl: strategy.pnl,
                    open_qty: strategy.open_qty,
                    win_rate: strategy.win_rate,
                },
            });
        }

        self.dispatch_strategy(name, action).await;
        CommandOutcome::Dispatched
    }

    /// 发起全局 kill，总是需要确认
    pub async fn request_kill(&self) -> ConfirmationRequest {
        let snapshot = self.store.current().await;
        let review = match snapshot {
            Some(s) => KillReview {
                running: s
                    .strategies
                    .iter()
                    .filter(|x| x.status == crate::console::model::strategy::StrategyStatus::Running)
                    .count(),
                open_positions: s.exposure.positions.len(),
                day_pnl: s.telemetry.session.day_pnl,
                estimated: estimate_risk(&s.exposure.positions),
                warning: KILL_WARNING,
            },
            None => KillReview {
                running: 0,
                open_positions: 0,
                day_pnl: 0.0,
                estimated: estimate_risk(&[]),
                warning: KILL_WARNING,
            },
        };
        ConfirmationRequest::Kill { review }
    }

    /// 操作员确认后执行，确认是破坏性动作触达传输层的唯一入口
    pub async fn confirm(&self, request: ConfirmationRequest) {
        match request {
            ConfirmationRequest::Strategy { name, action, .. } => {
                self.dispatch_strategy(&name, action).await;
            }
            ConfirmationRequest::Kill { .. } => {
                let result = self.api.kill().await;
                self.route_outcome("kill switch", result).await;
            }
        }
    }

    /// 放弃确认请求，无任何副作用
    pub fn cancel(&self, request: ConfirmationRequest) {
        info!("confirmation cancelled: {:?}", request);
    }

    /// 解除全局 kill，立即派发
    pub async fn unkill(&self) {
        let result = self.api.unkill().await;
        self.route_outcome("unkill", result).await;
    }

    /// 批量暂停，立即派发，结果以告警形式回报
    pub async fn pause_all(&self) {
        let result = self.api.pause_all().await;
        match result {
            Ok(ack) => {
                let affected = ack.affected.unwrap_or(0);
                let failed = ack.failed.unwrap_or(0);
                let severity = if ack.success {
                    Severity::Success
                } else {
                    Severity::Warning
                };
                self.alerts
                    .push(
                        severity,
                        "Pause all",
                        &format!("{} paused, {} failed. {}", affected, failed, ack.message),
                    )
                    .await;
            }
            Err(e) => {
                warn!("pause-all failed: {}", e);
                self.alerts
                    .push(Severity::Critical, "Pause all failed", &e.to_string())
                    .await;
            }
        }
    }

    /// 批量恢复的保护性拒绝
    ///
    /// kill switch 生效时以 critical 告警拒绝；其余情况提示逐个恢复。
    /// 两种分支都不会发出任何传输调用。
    pub async fn resume_all(&self) -> AppResult<()> {
        if self.store.is_killed().await {
            let guard = "Kill switch is active. Resume-all is blocked; lift the kill switch first.";
            self.alerts
                .push(Severity::Critical, "Resume all blocked", guard)
                .await;
            return Err(AppError::ValidationGuard(guard.to_string()));
        }
        self.alerts
            .push(
                Severity::Info,
                "Resume all",
                "Bulk resume is not an atomic primitive. Resume strategies individually after review.",
            )
            .await;
        Ok(())
    }

    async fn dispatch_strategy(&self, name: &str, action: StrategyAction) {
        let result = self.api.strategy_action(name, action).await;
        self.route_outcome(&format!("{} '{}'", action.as_str(), name), result)
            .await;
    }

    /// 应答到告警的统一映射
    ///
    /// success=false 表示已受理未确认，归为 warning 而非成功；
    /// 传输失败带归一化消息归为 critical。
    async fn route_outcome(&self, what: &str, result: AppResult<CommandAck>) {
        match result {
            Ok(ack) if ack.success => {
                info!("command confirmed: {}", what);
                let message = if ack.message.is_empty() {
                    format!("{} confirmed by executor.", what)
                } else {
                    ack.message
                };
                self.alerts
                    .push(Severity::Success, "Command confirmed", &message)
                    .await;
            }
            Ok(ack) => {
                warn!("command pending: {} ({:?})", what, ack.status);
                let message = if ack.message.is_empty() {
                    format!("{} accepted but not yet confirmed by the executor.", what)
                } else {
                    ack.message
                };
                self.alerts
                    .push(Severity::Warning, "Command pending", &message)
                    .await;
            }
            Err(e) => {
                warn!("command failed: {}: {}", what, e);
                self.alerts
                    .push(Severity::Critical, "Command failed", &e.to_string())
                    .await;
            }
        }
    }
}

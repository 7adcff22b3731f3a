//! 纯 UI 状态：选中项、激活面板、打开的确认弹窗
//!
//! 这里不承载业务不变量，与轮询任务持有的快照数据严格分离。

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::console::services::command_service::ConfirmationRequest;

/// 激活的面板
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Panel {
    #[default]
    Overview,
    Strategies,
    Exposure,
    Infra,
    Logs,
}

impl Panel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Panel::Overview => "overview",
            Panel::Strategies => "strategies",
            Panel::Exposure => "exposure",
            Panel::Infra => "infra",
            Panel::Logs => "logs",
        }
    }
}

#[derive(Debug, Default)]
struct ViewState {
    selected_strategy: Option<String>,
    active_panel: Panel,
    confirmation: Option<ConfirmationRequest>,
}

/// 视图状态容器，以句柄形式显式传给各个子视图
#[derive(Clone, Default)]
pub struct ViewStateHandle {
    inner: Arc<RwLock<ViewState>>,
}

impl ViewStateHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn select_strategy(&self, name: Option<String>) {
        self.inner.write().await.selected_strategy = name;
    }

    pub async fn selected_strategy(&self) -> Option<String> {
        self.inner.read().await.selected_strategy.clone()
    }

    pub async fn set_panel(&self, panel: Panel) {
        self.inner.write().await.active_panel = panel;
    }

    pub async fn active_panel(&self) -> Panel {
        self.inner.read().await.active_panel
    }

    /// 打开确认弹窗，覆盖之前未处理的请求
    pub async fn open_confirmation(&self, request: ConfirmationRequest) {
        self.inner.write().await.confirmation = Some(request);
    }

    /// 取走待确认请求（操作员点了确认）
    pub async fn take_confirmation(&self) -> Option<ConfirmationRequest> {
        self.inner.write().await.confirmation.take()
    }

    /// 关闭弹窗并丢弃请求（操作员点了取消），无其他副作用
    pub async fn cancel_confirmation(&self) {
        self.inner.write().await.confirmation = None;
    }

    pub async fn has_open_confirmation(&self) -> bool {
        self.inner.read().await.confirmation.is_some()
    }
}

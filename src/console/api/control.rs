use async_trait::async_trait;
use reqwest::Method;
use serde_json::json;

use crate::console::api::{CommandAck, ConsoleClient};
use crate::console::model::strategy::StrategyAction;
use crate::error::AppResult;

/// 控制命令面，派发器是它唯一的调用方
#[async_trait]
pub trait ControlApi: Send + Sync {
    /// POST /strategies/{name}/{pause|resume|stop|start}
    async fn strategy_action(&self, name: &str, action: StrategyAction) -> AppResult<CommandAck>;

    /// POST /strategies/pause-all
    async fn pause_all(&self) -> AppResult<CommandAck>;

    /// POST /strategies/kill
    async fn kill(&self) -> AppResult<CommandAck>;

    /// POST /strategies/unkill
    async fn unkill(&self) -> AppResult<CommandAck>;
}

#[async_trait]
impl ControlApi for ConsoleClient {
    async fn strategy_action(&self, name: &str, action: StrategyAction) -> AppResult<CommandAck> {
        let path = format!("/strategies/{}/{}", name, action.as_str());
        // stop 的请求体必须携带 confirm 标记，否则后端直接 400
        let body = match action {
            StrategyAction::Stop => Some(json!({ "strategy_name": name, "confirm": true })),
            _ => None,
        };
        self.send_request(Method::POST, &path, body).await
    }

    async fn pause_all(&self) -> AppResult<CommandAck> {
        self.send_request(Method::POST, "/strategies/pause-all", None)
            .await
    }

    async fn kill(&self) -> AppResult<CommandAck> {
        self.send_request(Method::POST, "/strategies/kill", None)
            .await
    }

    async fn unkill(&self) -> AppResult<CommandAck> {
        self.send_request(Method::POST, "/strategies/unkill", None)
            .await
    }
}

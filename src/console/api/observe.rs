use async_trait::async_trait;
use reqwest::Method;

use crate::console::api::ConsoleClient;
use crate::console::model::events::{LogsEnvelope, OrdersEnvelope};
use crate::console::model::exposure::ExposureEnvelope;
use crate::console::model::infra::InfraData;
use crate::console::model::strategy::StrategiesEnvelope;
use crate::console::model::telemetry::TelemetryData;
use crate::error::AppResult;

/// 遥测查询面，轮询器通过该 trait 取数
///
/// 测试中以内存假实现替代真实后端。
#[async_trait]
pub trait TelemetrySource: Send + Sync {
    async fn telemetry(&self) -> AppResult<TelemetryData>;
    async fn strategies(&self) -> AppResult<StrategiesEnvelope>;
    async fn exposure(&self) -> AppResult<ExposureEnvelope>;
    async fn infra(&self) -> AppResult<InfraData>;
    async fn orders(&self) -> AppResult<OrdersEnvelope>;
    async fn logs(&self) -> AppResult<LogsEnvelope>;
}

#[async_trait]
impl TelemetrySource for ConsoleClient {
    async fn telemetry(&self) -> AppResult<TelemetryData> {
        self.send_request(Method::GET, "/telemetry", None).await
    }

    async fn strategies(&self) -> AppResult<StrategiesEnvelope> {
        self.send_request(Method::GET, "/strategies", None).await
    }

    async fn exposure(&self) -> AppResult<ExposureEnvelope> {
        self.send_request(Method::GET, "/exposure", None).await
    }

    async fn infra(&self) -> AppResult<InfraData> {
        self.send_request(Method::GET, "/infra", None).await
    }

    async fn orders(&self) -> AppResult<OrdersEnvelope> {
        self.send_request(Method::GET, "/orders", None).await
    }

    async fn logs(&self) -> AppResult<LogsEnvelope> {
        self.send_request(Method::GET, "/logs", None).await
    }
}

pub use anyhow::{anyhow, Error as AnyhowError, Result};
use thiserror::Error;

/// 应用错误
#[derive(Error, Debug)]
pub enum AppError {
    /// 传输层不可达（DNS、连接、超时等）
    #[error("Network error: {0}")]
    Network(String),

    /// 后端拒绝或处理失败，携带归一化后的错误消息
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// 客户端侧拒绝，未到达传输层
    #[error("Validation guard: {0}")]
    ValidationGuard(String),

    /// 配置错误
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Network(err.to_string())
    }
}

impl AppError {
    /// 是否为后端返回的错误（区别于传输层失败）
    pub fn is_server_error(&self) -> bool {
        matches!(self, AppError::Server { .. })
    }
}

use serde::{Deserialize, Serialize};

/// GET /infra 响应：进程、主机与存储层指标
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct InfraData {
    #[serde(default)]
    pub ts: String,
    #[serde(default)]
    pub process: ProcessInfo,
    #[serde(default)]
    pub cpu: CpuInfo,
    #[serde(default)]
    pub memory: MemoryInfo,
    #[serde(default)]
    pub disk: DiskInfo,
    #[serde(default)]
    pub database: DatabaseInfo,
    #[serde(default)]
    pub redis: CacheInfo,
    /// 上次对账距今，形如 "42s ago"
    #[serde(default)]
    pub recon_last: String,
    #[serde(default)]
    pub recon_status: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ProcessInfo {
    #[serde(default)]
    pub uptime_seconds: i64,
    #[serde(default)]
    pub uptime_human: String,
    #[serde(default)]
    pub pid: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct CpuInfo {
    #[serde(default)]
    pub usage_pct: f64,
    #[serde(default)]
    pub core_count: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct MemoryInfo {
    #[serde(default)]
    pub total_mb: f64,
    #[serde(default)]
    pub used_mb: f64,
    #[serde(default)]
    pub available_mb: f64,
    #[serde(default)]
    pub usage_pct: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct DiskInfo {
    #[serde(default)]
    pub total_gb: f64,
    #[serde(default)]
    pub used_gb: f64,
    #[serde(default)]
    pub usage_pct: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct DatabaseInfo {
    #[serde(default)]
    pub pool: PoolInfo,
    #[serde(default)]
    pub active_queries: Option<i64>,
    /// 连接池耗尽标记，触发基础设施面板的醒目告警
    #[serde(default)]
    pub exhausted: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct PoolInfo {
    #[serde(default)]
    pub size: i64,
    #[serde(default)]
    pub checked_out: i64,
    #[serde(default)]
    pub overflow: i64,
    #[serde(default)]
    pub usage_pct: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct CacheInfo {
    #[serde(default)]
    pub available: bool,
    #[serde(default)]
    pub memory_mb: Option<f64>,
    #[serde(default)]
    pub max_memory_mb: Option<f64>,
    #[serde(default)]
    pub usage_pct: Option<f64>,
}

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use dotenv::dotenv;
use tokio::time::interval;
use tracing::{error, info};

use fleet_console::app_config::log::setup_logging;
use fleet_console::console::api::{ConsoleClient, TelemetrySource};
use fleet_console::console::services::alert_service::AlertCenter;
use fleet_console::console::services::command_service::CommandService;
use fleet_console::console::services::metrics_service::build_view;
use fleet_console::console::snapshot::SnapshotStore;
use fleet_console::console::task::poll_job::{poll_once, PollJob};
use fleet_console::console::view_state::ViewStateHandle;

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "fleet-console", about = "Operator console engine for a live trading-bot fleet")]
struct Args {
    /// 覆盖 CONSOLE_BASE_URL
    #[arg(long)]
    base_url: Option<String>,

    /// 只执行一轮轮询，输出风险摘要后退出
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // 设置日志
    setup_logging().await?;

    let args = Args::parse();
    if let Some(base_url) = &args.base_url {
        std::env::set_var("CONSOLE_BASE_URL", base_url);
    }

    let client = Arc::new(ConsoleClient::from_env()?);
    let source: Arc<dyn TelemetrySource> = client.clone();
    let store = Arc::new(SnapshotStore::new());
    let alerts = AlertCenter::new();
    // 派发器与视图状态由上层界面驱动，这里只负责组装
    let _commands = CommandService::new(client.clone(), store.clone(), alerts.clone());
    let _view_state = ViewStateHandle::new();

    if args.once {
        poll_once(&source, &store).await;
        match store.current().await {
            Some(snapshot) => {
                let view = build_view(&snapshot);
                info!(
                    "as_of={} risk={} feed={} direction={} day_pnl={:.2} strategies={} killed={}",
                    view.as_of,
                    view.risk.as_str(),
                    view.feed_status.as_str(),
                    view.direction.as_str(),
                    view.day_pnl,
                    view.strategies.len(),
                    view.is_killed,
                );
            }
            None => {
                error!("轮询失败，无可用快照");
            }
        }
        return Ok(());
    }

    // 启动轮询任务
    let poll_job = PollJob::new(source, store.clone());
    let shutdown = poll_job.shutdown_handle();
    let poll_handle = poll_job.spawn();

    // 周期性输出一行风险摘要，便于无界面环境下观察
    let summary_store = store.clone();
    let summary_handle = tokio::spawn(async move {
        let mut timer = interval(Duration::from_secs(10));
        loop {
            timer.tick().await;
            if let Some(snapshot) = summary_store.current().await {
                let view = build_view(&snapshot);
                info!(
                    "risk={} feed={} day_pnl={:.2} margin={:.0}% strategies={} breakers_tripped={}",
                    view.risk.as_str(),
                    view.feed_status.as_str(),
                    view.day_pnl,
                    view.margin_meter_pct,
                    view.strategies.len(),
                    view.tripped_breakers,
                );
            }
        }
    });

    // 捕捉Ctrl+C信号以平滑关闭
    tokio::signal::ctrl_c().await?;
    let _ = shutdown.send(());
    summary_handle.abort();
    let _ = poll_handle.await;

    Ok(())
}

use fleet_console::console::model::strategy::StrategyAction;
use fleet_console::console::services::command_service::{ConfirmationRequest, StrategyReview};
use fleet_console::console::view_state::{Panel, ViewStateHandle};

fn sample_request() -> ConfirmationRequest {
    ConfirmationRequest::Strategy {
        name: "alpha".to_string(),
        action: StrategyAction::Stop,
        review: StrategyReview {
            pnl: 10.0,
            open_qty: 0.0,
            win_rate: 50.0,
        },
    }
}

#[tokio::test]
async fn test_confirmation_modal_lifecycle() {
    let view_state = ViewStateHandle::new();
    assert!(!view_state.has_open_confirmation().await);

    view_state.open_confirmation(sample_request()).await;
    assert!(view_state.has_open_confirmation().await);

    // 确认：取走请求，弹窗随之关闭
    let taken = view_state.take_confirmation().await;
    assert!(taken.is_some());
    assert!(!view_state.has_open_confirmation().await);

    // 取消：丢弃请求，无残留
    view_state.open_confirmation(sample_request()).await;
    view_state.cancel_confirmation().await;
    assert!(!view_state.has_open_confirmation().await);
    assert!(view_state.take_confirmation().await.is_none());
}

#[tokio::test]
async fn test_selection_and_panel() {
    let view_state = ViewStateHandle::new();
    assert_eq!(view_state.active_panel().await, Panel::Overview);

    view_state.set_panel(Panel::Strategies).await;
    view_state.select_strategy(Some("alpha".to_string())).await;

    assert_eq!(view_state.active_panel().await, Panel::Strategies);
    assert_eq!(view_state.selected_strategy().await.as_deref(), Some("alpha"));

    view_state.select_strategy(None).await;
    assert!(view_state.selected_strategy().await.is_none());
}

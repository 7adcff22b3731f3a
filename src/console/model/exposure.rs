use serde::{Deserialize, Serialize};

/// 每手数量，指数期权固定 50
pub const LOT_SIZE: f64 = 50.0;

/// GET /exposure 响应
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ExposureEnvelope {
    #[serde(default)]
    pub ts: String,
    #[serde(default)]
    pub summary: ExposureSummary,
    #[serde(default)]
    pub delta: DeltaBreakdown,
    #[serde(default)]
    pub positions: Vec<PositionItem>,
}

/// 跨策略敞口汇总
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ExposureSummary {
    #[serde(default)]
    pub open_positions: i64,
    #[serde(default)]
    pub open_lots: i64,
    #[serde(default)]
    pub margin_at_risk: f64,
    #[serde(default)]
    pub max_theo_loss: f64,
    #[serde(default)]
    pub net_unrealized: f64,
}

/// 净 delta 及方向分布
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct DeltaBreakdown {
    #[serde(default)]
    pub total: f64,
    #[serde(default)]
    pub bull: i64,
    #[serde(default)]
    pub bear: i64,
    #[serde(default)]
    pub neutral: i64,
    #[serde(default)]
    pub direction: String,
}

/// 单个持仓
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct PositionItem {
    pub symbol: String,
    #[serde(default)]
    pub side: PositionSide,
    /// 净数量，符号与方向一致
    #[serde(default, alias = "net_qty")]
    pub qty: f64,
    /// 开仓均价
    #[serde(default, alias = "avg_price")]
    pub entry: Option<f64>,
    #[serde(default)]
    pub ltp: Option<f64>,
    #[serde(default)]
    pub stop: Option<f64>,
    #[serde(default)]
    pub target: Option<f64>,
    #[serde(default, alias = "strat")]
    pub strategy_ref: Option<String>,
    /// 手数，缺省时由 qty 推导
    #[serde(default)]
    pub lots: Option<f64>,
    #[serde(default, alias = "unrealized")]
    pub unrealized_pnl: f64,
}

impl PositionItem {
    /// 手数，始终非负；后端未提供时按 |qty| / LOT_SIZE 推导
    pub fn lots(&self) -> f64 {
        match self.lots {
            Some(l) => l.abs(),
            None => self.qty.abs() / LOT_SIZE,
        }
    }
}

/// 持仓方向
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum PositionSide {
    #[default]
    #[serde(alias = "LONG")]
    Buy,
    #[serde(alias = "SHORT")]
    Sell,
}

impl PositionSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            PositionSide::Buy => "BUY",
            PositionSide::Sell => "SELL",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lots_derived_from_qty() {
        let pos = PositionItem {
            symbol: "NIFTY24DECFUT".to_string(),
            qty: -150.0,
            ..Default::default()
        };
        // 负数量也折算为非负手数
        assert_eq!(pos.lots(), 3.0);
    }

    #[test]
    fn test_lots_prefers_supplied_value() {
        let pos = PositionItem {
            symbol: "BANKNIFTY".to_string(),
            qty: 100.0,
            lots: Some(4.0),
            ..Default::default()
        };
        assert_eq!(pos.lots(), 4.0);
    }

    #[test]
    fn test_side_accepts_long_short_alias() {
        let pos: PositionItem =
            serde_json::from_str(r#"{"symbol":"NIFTY","side":"SHORT","net_qty":-50}"#).unwrap();
        assert_eq!(pos.side, PositionSide::Sell);
        assert_eq!(pos.qty, -50.0);
    }
}

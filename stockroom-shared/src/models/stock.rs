use serde::Deserialize;
use utoipa::ToSchema;

use super::transaction::StockTransaction;

/// Body of both stock-in and stock-out calls
#[derive(Debug, Clone, PartialEq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockAdjustmentRequest {
    #[schema(example = 5)]
    pub quantity: i32,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StockInReceipt {
    pub new_quantity: i32,
    pub is_low_stock: bool,
    pub transaction: StockTransaction,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StockOutReceipt {
    pub new_quantity: i32,
    /// Evaluated against the quantity after the removal.
    pub low_stock: bool,
    pub transaction: StockTransaction,
}

impl StockOutReceipt {
    pub fn alert_text(&self) -> &'static str {
        if self.low_stock {
            "⚠️ Low stock alert!"
        } else {
            "Stock OK"
        }
    }
}

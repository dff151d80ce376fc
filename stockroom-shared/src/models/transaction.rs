use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

/// Direction of a stock movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum TransactionType {
    In,
    Out,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::In => "In",
            TransactionType::Out => "Out",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "In" => Ok(TransactionType::In),
            "Out" => Ok(TransactionType::Out),
            other => Err(format!("unknown transaction type: {}", other)),
        }
    }
}

/// One immutable ledger entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockTransaction {
    pub id: Uuid,
    pub inventory_item_id: Uuid,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub quantity: i32,
    pub transaction_date: DateTime<Utc>,
    pub notes: Option<String>,
}

/// Ledger entry to append; the store assigns `id` and `transaction_date`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewStockTransaction {
    pub inventory_item_id: Uuid,
    pub transaction_type: TransactionType,
    pub quantity: i32,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_type_wire_names() {
        let txn = StockTransaction {
            id: Uuid::new_v4(),
            inventory_item_id: Uuid::new_v4(),
            transaction_type: TransactionType::Out,
            quantity: 4,
            transaction_date: Utc::now(),
            notes: None,
        };

        let value = serde_json::to_value(&txn).unwrap();
        assert_eq!(value["type"], "Out");
        assert_eq!(value["inventoryItemId"], txn.inventory_item_id.to_string());
    }

    #[test]
    fn test_transaction_type_parse() {
        assert_eq!("In".parse::<TransactionType>().unwrap(), TransactionType::In);
        assert!("in".parse::<TransactionType>().is_err());
    }
}

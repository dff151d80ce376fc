use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A stocked item as persisted by the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: Uuid,
    #[schema(example = "Cordless Drill")]
    pub name: String,
    pub description: Option<String>,
    pub quantity: i32,
    pub min_stock_threshold: i32,
    #[schema(example = "89.99")]
    pub price: Decimal,
    pub created_date: DateTime<Utc>,
}

impl InventoryItem {
    /// Low stock means strictly below the threshold.
    pub fn is_low_stock(&self) -> bool {
        self.quantity < self.min_stock_threshold
    }
}

/// Item body as received from a client.
///
/// Every field is optional so that validation can report all missing fields
/// at once, and so that updates can leave absent fields untouched.
/// `description` distinguishes "absent" (`None`) from an explicit `null`
/// (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemDraft {
    #[schema(example = "Cordless Drill", max_length = 100)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "present_or_null")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    pub quantity: Option<i32>,
    pub min_stock_threshold: Option<i32>,
    pub price: Option<Decimal>,
}

fn present_or_null<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// A validated item ready to be inserted. The store assigns `id` and `created_date`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewInventoryItem {
    pub name: String,
    pub description: Option<String>,
    pub quantity: i32,
    pub min_stock_threshold: i32,
    pub price: Decimal,
}

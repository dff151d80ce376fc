use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use stockroom_shared::{InventoryItem, ItemDraft, NewInventoryItem};

pub const NAME_MAX_CHARS: usize = 100;
pub const PRICE_SCALE: u32 = 2;
/// Integer digits available to a `NUMERIC(18, 2)` column
pub const PRICE_INTEGER_DIGITS: u32 = 16;

/// Field-level violations keyed by wire field name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.fields
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    fn into_result<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .fields
            .iter()
            .flat_map(|(field, messages)| messages.iter().map(move |m| format!("{}: {}", field, m)))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

fn check_name(name: &str, errors: &mut ValidationErrors) {
    if name.trim().is_empty() {
        errors.add("name", "must not be empty");
    } else if name.chars().count() > NAME_MAX_CHARS {
        errors.add("name", format!("must be at most {} characters", NAME_MAX_CHARS));
    }
}

/// Normalize a price and check it fits the stored precision.
fn check_price(price: Decimal, errors: &mut ValidationErrors) -> Decimal {
    let normalized = normalize_price(price);
    if normalized.abs() >= Decimal::from(10_i64.pow(PRICE_INTEGER_DIGITS)) {
        errors.add(
            "price",
            format!("must be less than 10^{} in magnitude", PRICE_INTEGER_DIGITS),
        );
    }
    normalized
}

/// Round to cents and pin the scale so `5` and `5.00` persist identically.
pub fn normalize_price(price: Decimal) -> Decimal {
    let mut rounded = price.round_dp(PRICE_SCALE);
    rounded.rescale(PRICE_SCALE);
    rounded
}

/// Validate a create body. Every violated field is reported, not just the first.
pub fn validate_new_item(draft: ItemDraft) -> Result<NewInventoryItem, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    match &draft.name {
        Some(name) => check_name(name, &mut errors),
        None => errors.add("name", "is required"),
    }
    if draft.quantity.is_none() {
        errors.add("quantity", "is required");
    }
    if draft.min_stock_threshold.is_none() {
        errors.add("minStockThreshold", "is required");
    }
    let price = match draft.price {
        Some(price) => Some(check_price(price, &mut errors)),
        None => {
            errors.add("price", "is required");
            None
        }
    };

    match (draft.name, draft.quantity, draft.min_stock_threshold, price) {
        (Some(name), Some(quantity), Some(min_stock_threshold), Some(price)) if errors.is_empty() => {
            Ok(NewInventoryItem {
                name,
                description: draft.description.flatten(),
                quantity,
                min_stock_threshold,
                price,
            })
        }
        _ => Err(errors),
    }
}

/// Apply an update body onto an existing item.
///
/// Only name, description, quantity, threshold and price are touched; fields
/// absent from the draft keep their value. `id` and `created_date` never change.
pub fn apply_update(item: &mut InventoryItem, draft: ItemDraft) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    if let Some(name) = &draft.name {
        check_name(name, &mut errors);
    }
    let price = draft.price.map(|price| check_price(price, &mut errors));
    errors.into_result(())?;

    if let Some(name) = draft.name {
        item.name = name;
    }
    if let Some(description) = draft.description {
        item.description = description;
    }
    if let Some(quantity) = draft.quantity {
        item.quantity = quantity;
    }
    if let Some(threshold) = draft.min_stock_threshold {
        item.min_stock_threshold = threshold;
    }
    if let Some(price) = price {
        item.price = price;
    }
    Ok(())
}

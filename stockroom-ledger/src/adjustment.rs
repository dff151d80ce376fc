use stockroom_core::{CoreError, CoreResult, ValidationErrors};
use stockroom_shared::TransactionType;

/// Quantity an item ends up with after applying `delta` in the given direction.
///
/// Stock-out refuses to go past the current quantity. The sign of `delta` is
/// not checked; callers log non-positive deltas.
pub fn plan_quantity(current: i32, direction: TransactionType, delta: i32) -> CoreResult<i32> {
    let planned = match direction {
        TransactionType::In => current.checked_add(delta),
        TransactionType::Out => {
            if delta > current {
                return Err(CoreError::InsufficientStock {
                    requested: delta,
                    available: current,
                });
            }
            current.checked_sub(delta)
        }
    };

    planned.ok_or_else(|| {
        let mut errors = ValidationErrors::new();
        errors.add("quantity", "adjustment overflows the stored quantity");
        CoreError::ValidationError(errors)
    })
}

use std::sync::Arc;
use stockroom_core::repository::{StockLedgerRepository, StockUnitOfWork};
use stockroom_core::{CoreError, CoreResult};
use stockroom_shared::{
    InventoryItem, NewStockTransaction, StockAdjustmentRequest, StockInReceipt, StockOutReceipt,
    StockTransaction, TransactionType,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::adjustment::plan_quantity;

/// Applies stock movements and keeps the per-item ledger
pub struct StockLedger {
    repo: Arc<dyn StockLedgerRepository>,
}

/// Result of one committed adjustment
struct Applied {
    item: InventoryItem,
    new_quantity: i32,
    transaction: StockTransaction,
}

impl StockLedger {
    pub fn new(repo: Arc<dyn StockLedgerRepository>) -> Self {
        Self { repo }
    }

    pub async fn stock_in(
        &self,
        item_id: Uuid,
        request: StockAdjustmentRequest,
    ) -> CoreResult<StockInReceipt> {
        let applied = self.apply(item_id, TransactionType::In, request).await?;

        Ok(StockInReceipt {
            new_quantity: applied.new_quantity,
            is_low_stock: applied.new_quantity < applied.item.min_stock_threshold,
            transaction: applied.transaction,
        })
    }

    pub async fn stock_out(
        &self,
        item_id: Uuid,
        request: StockAdjustmentRequest,
    ) -> CoreResult<StockOutReceipt> {
        let applied = self.apply(item_id, TransactionType::Out, request).await?;

        Ok(StockOutReceipt {
            new_quantity: applied.new_quantity,
            low_stock: applied.new_quantity < applied.item.min_stock_threshold,
            transaction: applied.transaction,
        })
    }

    /// Ledger of one item, newest first. Unknown items yield an empty list.
    pub async fn list_transactions(&self, item_id: Uuid) -> CoreResult<Vec<StockTransaction>> {
        self.repo
            .list_transactions(item_id)
            .await
            .map_err(CoreError::persistence)
    }

    async fn apply(
        &self,
        item_id: Uuid,
        direction: TransactionType,
        request: StockAdjustmentRequest,
    ) -> CoreResult<Applied> {
        if request.quantity <= 0 {
            warn!(
                "Non-positive stock {} quantity {} for item {}",
                direction, request.quantity, item_id
            );
        }

        let mut uow = self.repo.begin().await.map_err(CoreError::persistence)?;

        match Self::stage(uow.as_mut(), item_id, direction, request).await {
            Ok(applied) => {
                uow.commit().await.map_err(CoreError::persistence)?;
                info!(
                    "Stock {} of {} for item {}: quantity now {}",
                    direction, applied.transaction.quantity, item_id, applied.new_quantity
                );
                Ok(applied)
            }
            Err(err) => {
                if let Err(rollback_err) = uow.rollback().await {
                    warn!("Rollback failed for item {}: {}", item_id, rollback_err);
                }
                if let CoreError::InsufficientStock { requested, available } = &err {
                    warn!(
                        "Refused stock out of {} for item {}: only {} available",
                        requested, item_id, available
                    );
                }
                Err(err)
            }
        }
    }

    async fn stage(
        uow: &mut dyn StockUnitOfWork,
        item_id: Uuid,
        direction: TransactionType,
        request: StockAdjustmentRequest,
    ) -> CoreResult<Applied> {
        let item = uow
            .lock_item(item_id)
            .await
            .map_err(CoreError::persistence)?
            .ok_or_else(|| CoreError::item_not_found(item_id))?;

        let new_quantity = plan_quantity(item.quantity, direction, request.quantity)?;

        uow.set_quantity(item_id, new_quantity)
            .await
            .map_err(CoreError::persistence)?;

        let transaction = uow
            .append_transaction(&NewStockTransaction {
                inventory_item_id: item_id,
                transaction_type: direction,
                quantity: request.quantity,
                notes: request.notes,
            })
            .await
            .map_err(CoreError::persistence)?;

        Ok(Applied {
            item,
            new_quantity,
            transaction,
        })
    }
}

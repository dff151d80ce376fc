use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use stockroom_core::repository::{
    InventoryItemRepository, RepoResult, StockLedgerRepository, StockUnitOfWork,
};
use stockroom_shared::{InventoryItem, NewInventoryItem, NewStockTransaction, StockTransaction};
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use crate::error::StoreError;

#[derive(Default)]
struct MemoryState {
    items: HashMap<Uuid, InventoryItem>,
    transactions: Vec<StockTransaction>,
}

/// Process-local store implementing both repository traits.
///
/// A unit of work holds the state lock until it commits or is dropped, so
/// adjustments are serialized across all items.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
    fail_next_commit: Arc<AtomicBool>,
    interleave: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next unit-of-work commit fail and discard its writes.
    pub fn fail_next_commit(&self) {
        self.fail_next_commit.store(true, Ordering::SeqCst);
    }

    /// Yield to the scheduler before each unit of work takes the state lock,
    /// so concurrent adjustments get scheduled in between one another.
    pub fn interleave_units_of_work(&self) {
        self.interleave.store(true, Ordering::SeqCst);
    }

    /// Insert a ledger entry directly, bypassing the unit of work. Test seeding only.
    pub async fn insert_transaction(&self, transaction: StockTransaction) {
        self.state.lock().await.transactions.push(transaction);
    }
}

fn sorted_by<F>(mut items: Vec<InventoryItem>, key: F) -> Vec<InventoryItem>
where
    F: Fn(&InventoryItem, &InventoryItem) -> std::cmp::Ordering,
{
    items.sort_by(key);
    items
}

#[async_trait]
impl InventoryItemRepository for MemoryStore {
    async fn list_items(&self) -> RepoResult<Vec<InventoryItem>> {
        let state = self.state.lock().await;
        let items = state.items.values().cloned().collect();
        Ok(sorted_by(items, |a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id))))
    }

    async fn get_item(&self, id: Uuid) -> RepoResult<Option<InventoryItem>> {
        Ok(self.state.lock().await.items.get(&id).cloned())
    }

    async fn create_item(&self, item: &NewInventoryItem) -> RepoResult<InventoryItem> {
        let stored = InventoryItem {
            id: Uuid::new_v4(),
            name: item.name.clone(),
            description: item.description.clone(),
            quantity: item.quantity,
            min_stock_threshold: item.min_stock_threshold,
            price: item.price,
            created_date: Utc::now(),
        };
        self.state
            .lock()
            .await
            .items
            .insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn update_item(&self, item: &InventoryItem) -> RepoResult<bool> {
        let mut state = self.state.lock().await;
        match state.items.get_mut(&item.id) {
            Some(existing) => {
                existing.name = item.name.clone();
                existing.description = item.description.clone();
                existing.quantity = item.quantity;
                existing.min_stock_threshold = item.min_stock_threshold;
                existing.price = item.price;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_item(&self, id: Uuid) -> RepoResult<bool> {
        let mut state = self.state.lock().await;
        if state.items.remove(&id).is_none() {
            return Ok(false);
        }
        state.transactions.retain(|t| t.inventory_item_id != id);
        Ok(true)
    }

    async fn list_low_stock(&self) -> RepoResult<Vec<InventoryItem>> {
        let state = self.state.lock().await;
        let items = state
            .items
            .values()
            .filter(|item| item.is_low_stock())
            .cloned()
            .collect();
        Ok(sorted_by(items, |a, b| {
            a.quantity.cmp(&b.quantity).then_with(|| a.name.cmp(&b.name))
        }))
    }
}

#[async_trait]
impl StockLedgerRepository for MemoryStore {
    async fn begin(&self) -> RepoResult<Box<dyn StockUnitOfWork>> {
        if self.interleave.load(Ordering::SeqCst) {
            tokio::task::yield_now().await;
        }
        let guard = self.state.clone().lock_owned().await;
        Ok(Box::new(MemoryUnitOfWork {
            guard,
            staged_quantities: HashMap::new(),
            staged_transactions: Vec::new(),
            fail_next_commit: self.fail_next_commit.clone(),
        }))
    }

    async fn list_transactions(&self, item_id: Uuid) -> RepoResult<Vec<StockTransaction>> {
        let state = self.state.lock().await;
        let mut transactions: Vec<StockTransaction> = state
            .transactions
            .iter()
            .filter(|t| t.inventory_item_id == item_id)
            .cloned()
            .collect();
        transactions.sort_by(|a, b| {
            b.transaction_date
                .cmp(&a.transaction_date)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(transactions)
    }
}

pub struct MemoryUnitOfWork {
    guard: OwnedMutexGuard<MemoryState>,
    staged_quantities: HashMap<Uuid, i32>,
    staged_transactions: Vec<StockTransaction>,
    fail_next_commit: Arc<AtomicBool>,
}

#[async_trait]
impl StockUnitOfWork for MemoryUnitOfWork {
    async fn lock_item(&mut self, id: Uuid) -> RepoResult<Option<InventoryItem>> {
        Ok(self.guard.items.get(&id).cloned().map(|mut item| {
            if let Some(quantity) = self.staged_quantities.get(&id) {
                item.quantity = *quantity;
            }
            item
        }))
    }

    async fn set_quantity(&mut self, id: Uuid, quantity: i32) -> RepoResult<()> {
        if !self.guard.items.contains_key(&id) {
            return Err(StoreError::MissingItem(id).into());
        }
        self.staged_quantities.insert(id, quantity);
        Ok(())
    }

    async fn append_transaction(
        &mut self,
        transaction: &NewStockTransaction,
    ) -> RepoResult<StockTransaction> {
        if !self.guard.items.contains_key(&transaction.inventory_item_id) {
            return Err(StoreError::MissingItem(transaction.inventory_item_id).into());
        }
        let stored = StockTransaction {
            id: Uuid::new_v4(),
            inventory_item_id: transaction.inventory_item_id,
            transaction_type: transaction.transaction_type,
            quantity: transaction.quantity,
            transaction_date: Utc::now(),
            notes: transaction.notes.clone(),
        };
        self.staged_transactions.push(stored.clone());
        Ok(stored)
    }

    async fn commit(self: Box<Self>) -> RepoResult<()> {
        let MemoryUnitOfWork {
            mut guard,
            staged_quantities,
            staged_transactions,
            fail_next_commit,
        } = *self;

        if fail_next_commit.swap(false, Ordering::SeqCst) {
            return Err(StoreError::CommitFailed("injected failure".to_string()).into());
        }

        for (id, quantity) in staged_quantities {
            if let Some(item) = guard.items.get_mut(&id) {
                item.quantity = quantity;
            }
        }
        guard.transactions.extend(staged_transactions);
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> RepoResult<()> {
        Ok(())
    }
}

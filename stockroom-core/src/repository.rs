use async_trait::async_trait;
use stockroom_shared::{InventoryItem, NewInventoryItem, NewStockTransaction, StockTransaction};
use uuid::Uuid;

pub type RepoError = Box<dyn std::error::Error + Send + Sync>;
pub type RepoResult<T> = Result<T, RepoError>;

/// Repository trait for inventory item data access
#[async_trait]
pub trait InventoryItemRepository: Send + Sync {
    /// All items ordered by name ascending
    async fn list_items(&self) -> RepoResult<Vec<InventoryItem>>;

    async fn get_item(&self, id: Uuid) -> RepoResult<Option<InventoryItem>>;

    /// Insert and return the stored row with its assigned id and creation date
    async fn create_item(&self, item: &NewInventoryItem) -> RepoResult<InventoryItem>;

    /// Overwrite the mutable columns of an existing item. Returns false if the row is gone.
    async fn update_item(&self, item: &InventoryItem) -> RepoResult<bool>;

    /// Remove the item together with its ledger. Returns false if the row did not exist.
    async fn delete_item(&self, id: Uuid) -> RepoResult<bool>;

    /// Items with quantity below threshold, lowest quantity first
    async fn list_low_stock(&self) -> RepoResult<Vec<InventoryItem>>;
}

/// A single atomic stock adjustment.
///
/// Writes become visible only on `commit`. Dropping the unit of work or
/// calling `rollback` discards them. While open, the locked item cannot be
/// adjusted by another unit of work.
#[async_trait]
pub trait StockUnitOfWork: Send {
    /// Load the item and hold it against concurrent adjustments
    async fn lock_item(&mut self, id: Uuid) -> RepoResult<Option<InventoryItem>>;

    async fn set_quantity(&mut self, id: Uuid, quantity: i32) -> RepoResult<()>;

    async fn append_transaction(
        &mut self,
        transaction: &NewStockTransaction,
    ) -> RepoResult<StockTransaction>;

    async fn commit(self: Box<Self>) -> RepoResult<()>;

    async fn rollback(self: Box<Self>) -> RepoResult<()>;
}

/// Repository trait for the stock ledger
#[async_trait]
pub trait StockLedgerRepository: Send + Sync {
    async fn begin(&self) -> RepoResult<Box<dyn StockUnitOfWork>>;

    /// Ledger of one item, newest first
    async fn list_transactions(&self, item_id: Uuid) -> RepoResult<Vec<StockTransaction>>;
}

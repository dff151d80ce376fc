use std::sync::Arc;
use stockroom_catalog::InventoryCatalog;
use stockroom_core::repository::{InventoryItemRepository, StockLedgerRepository};
use stockroom_ledger::StockLedger;
use stockroom_store::MemoryStore;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<InventoryCatalog>,
    pub ledger: Arc<StockLedger>,
    pub allowed_origins: Arc<Vec<String>>,
}

impl AppState {
    pub fn new(
        items: Arc<dyn InventoryItemRepository>,
        ledger: Arc<dyn StockLedgerRepository>,
        allowed_origins: Vec<String>,
    ) -> Self {
        Self {
            catalog: Arc::new(InventoryCatalog::new(items)),
            ledger: Arc::new(StockLedger::new(ledger)),
            allowed_origins: Arc::new(allowed_origins),
        }
    }

    /// Both services backed by one shared in-memory store
    pub fn in_memory(store: MemoryStore, allowed_origins: Vec<String>) -> Self {
        Self::new(Arc::new(store.clone()), Arc::new(store), allowed_origins)
    }
}

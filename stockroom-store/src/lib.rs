pub mod app_config;
pub mod database;
pub mod error;
pub mod item_repo;
pub mod ledger_repo;
pub mod memory;

pub use database::DbClient;
pub use error::StoreError;
pub use item_repo::StoreItemRepository;
pub use ledger_repo::StoreLedgerRepository;
pub use memory::MemoryStore;

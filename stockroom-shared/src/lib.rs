pub mod models;

pub use models::item::{InventoryItem, ItemDraft, NewInventoryItem};
pub use models::stock::{StockAdjustmentRequest, StockInReceipt, StockOutReceipt};
pub use models::transaction::{NewStockTransaction, StockTransaction, TransactionType};

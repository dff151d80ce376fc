pub mod adjustment;
pub mod ledger;

pub use adjustment::plan_quantity;
pub use ledger::StockLedger;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use stockroom_core::repository::{RepoResult, StockLedgerRepository, StockUnitOfWork};
use stockroom_shared::{InventoryItem, NewStockTransaction, StockTransaction, TransactionType};
use uuid::Uuid;

use crate::error::StoreError;
use crate::item_repo::ItemRow;

pub struct StoreLedgerRepository {
    pool: PgPool,
}

impl StoreLedgerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct TransactionRow {
    id: Uuid,
    inventory_item_id: Uuid,
    transaction_type: String,
    quantity: i32,
    transaction_date: DateTime<Utc>,
    notes: Option<String>,
}

impl TryFrom<TransactionRow> for StockTransaction {
    type Error = StoreError;

    fn try_from(row: TransactionRow) -> Result<Self, Self::Error> {
        let transaction_type = row
            .transaction_type
            .parse::<TransactionType>()
            .map_err(StoreError::CorruptRow)?;

        Ok(StockTransaction {
            id: row.id,
            inventory_item_id: row.inventory_item_id,
            transaction_type,
            quantity: row.quantity,
            transaction_date: row.transaction_date,
            notes: row.notes,
        })
    }
}

#[async_trait]
impl StockLedgerRepository for StoreLedgerRepository {
    async fn begin(&self) -> RepoResult<Box<dyn StockUnitOfWork>> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgStockUnitOfWork { tx }))
    }

    async fn list_transactions(&self, item_id: Uuid) -> RepoResult<Vec<StockTransaction>> {
        let rows = sqlx::query_as::<_, TransactionRow>(
            r#"
            SELECT id, inventory_item_id, transaction_type, quantity, transaction_date, notes
            FROM stock_transactions
            WHERE inventory_item_id = $1
            ORDER BY transaction_date DESC, id DESC
            "#,
        )
        .bind(item_id)
        .fetch_all(&self.pool)
        .await?;

        let transactions = rows
            .into_iter()
            .map(StockTransaction::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(transactions)
    }
}

/// Unit of work over one PostgreSQL transaction.
///
/// `lock_item` takes a row lock (`FOR UPDATE`) so concurrent adjustments of the
/// same item queue behind each other until commit or rollback.
pub struct PgStockUnitOfWork {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl StockUnitOfWork for PgStockUnitOfWork {
    async fn lock_item(&mut self, id: Uuid) -> RepoResult<Option<InventoryItem>> {
        let row = sqlx::query_as::<_, ItemRow>(
            r#"
            SELECT id, name, description, quantity, min_stock_threshold, price, created_date
            FROM inventory_items
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await?;

        Ok(row.map(InventoryItem::from))
    }

    async fn set_quantity(&mut self, id: Uuid, quantity: i32) -> RepoResult<()> {
        let result = sqlx::query("UPDATE inventory_items SET quantity = $1 WHERE id = $2")
            .bind(quantity)
            .bind(id)
            .execute(&mut *self.tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::MissingItem(id).into());
        }
        Ok(())
    }

    async fn append_transaction(
        &mut self,
        transaction: &NewStockTransaction,
    ) -> RepoResult<StockTransaction> {
        let row = sqlx::query_as::<_, TransactionRow>(
            r#"
            INSERT INTO stock_transactions (id, inventory_item_id, transaction_type, quantity, transaction_date, notes)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, inventory_item_id, transaction_type, quantity, transaction_date, notes
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(transaction.inventory_item_id)
        .bind(transaction.transaction_type.as_str())
        .bind(transaction.quantity)
        .bind(Utc::now())
        .bind(&transaction.notes)
        .fetch_one(&mut *self.tx)
        .await?;

        Ok(StockTransaction::try_from(row)?)
    }

    async fn commit(self: Box<Self>) -> RepoResult<()> {
        let Self { tx } = *self;
        tx.commit().await?;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> RepoResult<()> {
        let Self { tx } = *self;
        tx.rollback().await?;
        Ok(())
    }
}

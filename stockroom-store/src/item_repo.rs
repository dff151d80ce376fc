use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use stockroom_core::repository::{InventoryItemRepository, RepoResult};
use stockroom_shared::{InventoryItem, NewInventoryItem};
use uuid::Uuid;

pub struct StoreItemRepository {
    pool: PgPool,
}

impl StoreItemRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal struct for type-safe querying
#[derive(sqlx::FromRow)]
pub(crate) struct ItemRow {
    id: Uuid,
    name: String,
    description: Option<String>,
    quantity: i32,
    min_stock_threshold: i32,
    price: Decimal,
    created_date: DateTime<Utc>,
}

impl From<ItemRow> for InventoryItem {
    fn from(row: ItemRow) -> Self {
        InventoryItem {
            id: row.id,
            name: row.name,
            description: row.description,
            quantity: row.quantity,
            min_stock_threshold: row.min_stock_threshold,
            price: row.price,
            created_date: row.created_date,
        }
    }
}

#[async_trait]
impl InventoryItemRepository for StoreItemRepository {
    async fn list_items(&self) -> RepoResult<Vec<InventoryItem>> {
        let rows = sqlx::query_as::<_, ItemRow>(
            "SELECT id, name, description, quantity, min_stock_threshold, price, created_date FROM inventory_items ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(InventoryItem::from).collect())
    }

    async fn get_item(&self, id: Uuid) -> RepoResult<Option<InventoryItem>> {
        let row = sqlx::query_as::<_, ItemRow>(
            "SELECT id, name, description, quantity, min_stock_threshold, price, created_date FROM inventory_items WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(InventoryItem::from))
    }

    async fn create_item(&self, item: &NewInventoryItem) -> RepoResult<InventoryItem> {
        let row = sqlx::query_as::<_, ItemRow>(
            r#"
            INSERT INTO inventory_items (id, name, description, quantity, min_stock_threshold, price, created_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, name, description, quantity, min_stock_threshold, price, created_date
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.quantity)
        .bind(item.min_stock_threshold)
        .bind(item.price)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn update_item(&self, item: &InventoryItem) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE inventory_items
            SET name = $1, description = $2, quantity = $3, min_stock_threshold = $4, price = $5
            WHERE id = $6
            "#,
        )
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.quantity)
        .bind(item.min_stock_threshold)
        .bind(item.price)
        .bind(item.id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_item(&self, id: Uuid) -> RepoResult<bool> {
        // stock_transactions rows go with it via ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM inventory_items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_low_stock(&self) -> RepoResult<Vec<InventoryItem>> {
        let rows = sqlx::query_as::<_, ItemRow>(
            r#"
            SELECT id, name, description, quantity, min_stock_threshold, price, created_date
            FROM inventory_items
            WHERE quantity < min_stock_threshold
            ORDER BY quantity, name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(InventoryItem::from).collect())
    }
}

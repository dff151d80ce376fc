use std::sync::Arc;
use stockroom_core::repository::InventoryItemRepository;
use stockroom_core::validation::{apply_update, validate_new_item};
use stockroom_core::{CoreError, CoreResult};
use stockroom_shared::{InventoryItem, ItemDraft};
use tracing::info;
use uuid::Uuid;

/// CRUD over inventory items plus the low-stock query
pub struct InventoryCatalog {
    repo: Arc<dyn InventoryItemRepository>,
}

impl InventoryCatalog {
    pub fn new(repo: Arc<dyn InventoryItemRepository>) -> Self {
        Self { repo }
    }

    /// All items, ordered by name
    pub async fn list(&self) -> CoreResult<Vec<InventoryItem>> {
        self.repo.list_items().await.map_err(CoreError::persistence)
    }

    pub async fn get(&self, id: Uuid) -> CoreResult<InventoryItem> {
        self.repo
            .get_item(id)
            .await
            .map_err(CoreError::persistence)?
            .ok_or_else(|| CoreError::item_not_found(id))
    }

    /// Validate and persist a new item. Nothing is written when validation fails.
    pub async fn create(&self, draft: ItemDraft) -> CoreResult<InventoryItem> {
        let new_item = validate_new_item(draft)?;
        let item = self
            .repo
            .create_item(&new_item)
            .await
            .map_err(CoreError::persistence)?;

        info!("Created inventory item {} ({})", item.id, item.name);
        Ok(item)
    }

    /// Partial update of name, description, quantity, threshold and price
    pub async fn update(&self, id: Uuid, draft: ItemDraft) -> CoreResult<()> {
        let mut item = self.get(id).await?;
        apply_update(&mut item, draft)?;

        let updated = self
            .repo
            .update_item(&item)
            .await
            .map_err(CoreError::persistence)?;
        if !updated {
            return Err(CoreError::item_not_found(id));
        }
        Ok(())
    }

    /// Remove an item; its transactions are removed with it.
    pub async fn delete(&self, id: Uuid) -> CoreResult<()> {
        let deleted = self
            .repo
            .delete_item(id)
            .await
            .map_err(CoreError::persistence)?;
        if !deleted {
            return Err(CoreError::item_not_found(id));
        }

        info!("Deleted inventory item {}", id);
        Ok(())
    }

    /// Items below their threshold, lowest quantity first
    pub async fn list_low_stock(&self) -> CoreResult<Vec<InventoryItem>> {
        self.repo.list_low_stock().await.map_err(CoreError::persistence)
    }
}

// ============================================================================
// Menu Core - Menu Item Service
// File: crates/menu-core/src/services/menu_item_service.rs
// ============================================================================
//! Menu item CRUD rules: existence checks, in-use guard, zero-row failures

use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::{MenuItem, MenuItemDraft, MenuItemId};
use crate::error::DomainError;
use crate::repositories::MenuItemRepository;

/// Menu item service over any repository implementation
pub struct MenuItemService<R: MenuItemRepository + ?Sized> {
    menu_repo: Arc<R>,
}

impl<R: MenuItemRepository + ?Sized> MenuItemService<R> {
    pub fn new(menu_repo: Arc<R>) -> Self {
        Self { menu_repo }
    }

    /// All menu items, ordered by name
    pub async fn list(&self) -> Result<Vec<MenuItem>, DomainError> {
        let items = self.menu_repo.find_all().await?;
        info!("Retrieved {} menu items", items.len());
        Ok(items)
    }

    pub async fn get(&self, id: MenuItemId) -> Result<MenuItem, DomainError> {
        self.menu_repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::MenuItemNotFound)
    }

    pub async fn create(&self, draft: MenuItemDraft) -> Result<MenuItem, DomainError> {
        info!("Creating menu item: {}", draft.name);

        let created = self.menu_repo.create(&draft).await?.ok_or_else(|| {
            warn!("Create reported no generated id for: {}", draft.name);
            DomainError::CreateFailed
        })?;

        info!("Menu item created: {}", created.id);
        Ok(created)
    }

    /// Full replace of the writable fields.
    ///
    /// The existence check and the update are separate statements; a
    /// concurrent delete in between surfaces as `UpdateFailed`.
    pub async fn update(&self, id: MenuItemId, draft: MenuItemDraft) -> Result<MenuItem, DomainError> {
        // 1. Existence check
        if !self.menu_repo.exists(id).await? {
            warn!("Update failed: menu item not found: {}", id);
            return Err(DomainError::MenuItemNotFound);
        }

        // 2. Replace and re-read
        let updated = self.menu_repo.update(id, &draft).await?.ok_or_else(|| {
            warn!("Update affected no rows for menu item: {}", id);
            DomainError::UpdateFailed
        })?;

        info!("Menu item updated: {}", id);
        Ok(updated)
    }

    pub async fn delete(&self, id: MenuItemId) -> Result<(), DomainError> {
        // 1. Existence check
        if !self.menu_repo.exists(id).await? {
            warn!("Delete failed: menu item not found: {}", id);
            return Err(DomainError::MenuItemNotFound);
        }

        // 2. Referential guard
        if self.menu_repo.is_in_use(id).await? {
            warn!("Delete refused: menu item {} is referenced in orders", id);
            return Err(DomainError::MenuItemInUse);
        }

        // 3. Physical delete
        if !self.menu_repo.delete(id).await? {
            warn!("Delete affected no rows for menu item: {}", id);
            return Err(DomainError::DeleteFailed);
        }

        info!("Menu item deleted: {}", id);
        Ok(())
    }
}

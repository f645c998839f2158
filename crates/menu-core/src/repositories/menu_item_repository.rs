//! Menu item repository trait (port)

use async_trait::async_trait;
use crate::domain::{MenuItem, MenuItemDraft, MenuItemId};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MenuItemRepository: Send + Sync {
    /// All menu items ordered by name ascending
    async fn find_all(&self) -> Result<Vec<MenuItem>, DomainError>;
    async fn find_by_id(&self, id: MenuItemId) -> Result<Option<MenuItem>, DomainError>;
    async fn exists(&self, id: MenuItemId) -> Result<bool, DomainError>;
    /// True when at least one order item references the menu item
    async fn is_in_use(&self, id: MenuItemId) -> Result<bool, DomainError>;
    /// Inserts and re-reads the row. `None` when storage generated no id.
    async fn create(&self, draft: &MenuItemDraft) -> Result<Option<MenuItem>, DomainError>;
    /// Replaces the writable fields and re-reads the row. `None` when no row was affected.
    async fn update(&self, id: MenuItemId, draft: &MenuItemDraft) -> Result<Option<MenuItem>, DomainError>;
    /// Physical delete. `false` when no row was affected.
    async fn delete(&self, id: MenuItemId) -> Result<bool, DomainError>;
}

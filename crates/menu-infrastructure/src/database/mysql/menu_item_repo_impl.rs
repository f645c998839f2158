// ============================================================================
// Menu Infrastructure - MySQL Menu Item Repository
// File: crates/menu-infrastructure/src/database/mysql/menu_item_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use sqlx::{FromRow, MySqlPool};
use tracing::{debug, error, info};

use menu_core::domain::{MenuItem, MenuItemDraft, MenuItemId, MenuStatus};
use menu_core::error::{DomainError, StorageFault};
use menu_core::repositories::MenuItemRepository;

use crate::database::diagnostics::storage_fault;

pub struct MySqlMenuItemRepository {
    pool: MySqlPool,
}

impl MySqlMenuItemRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct MenuItemRow {
    pub menu_item_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub status: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl TryFrom<MenuItemRow> for MenuItem {
    type Error = DomainError;

    fn try_from(row: MenuItemRow) -> Result<Self, Self::Error> {
        let price = row.price.to_f64().ok_or_else(|| {
            DomainError::DatabaseError(StorageFault::new(format!(
                "Price {} of menu item {} is not representable as a number",
                row.price, row.menu_item_id
            )))
        })?;

        Ok(MenuItem {
            id: row.menu_item_id,
            name: row.name,
            description: row.description,
            price,
            status: MenuStatus::from_str(&row.status).unwrap_or_default(),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    let fault = storage_fault(&e);
    error!(
        code = ?fault.code,
        errno = ?fault.errno,
        sql_state = ?fault.sql_state,
        sql_message = ?fault.sql_message,
        "Database error {}: {}",
        context,
        e
    );
    DomainError::DatabaseError(fault)
}

#[async_trait]
impl MenuItemRepository for MySqlMenuItemRepository {
    async fn find_all(&self) -> Result<Vec<MenuItem>, DomainError> {
        debug!("Executing query for all menu items");

        let rows: Vec<MenuItemRow> = sqlx::query_as(
            r#"
            SELECT
                menu_item_id, name, description, price,
                status, created_at, updated_at
            FROM menu_item
            ORDER BY name ASC
            "#
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("listing menu items", e))?;

        rows.into_iter().map(MenuItem::try_from).collect()
    }

    async fn find_by_id(&self, id: MenuItemId) -> Result<Option<MenuItem>, DomainError> {
        let row: Option<MenuItemRow> = sqlx::query_as(
            r#"
            SELECT
                menu_item_id, name, description, price,
                status, created_at, updated_at
            FROM menu_item
            WHERE menu_item_id = ?
            "#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("finding menu item by id", e))?;

        row.map(MenuItem::try_from).transpose()
    }

    async fn exists(&self, id: MenuItemId) -> Result<bool, DomainError> {
        let found: Option<i64> = sqlx::query_scalar(
            "SELECT menu_item_id FROM menu_item WHERE menu_item_id = ?"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("checking menu item existence", e))?;

        Ok(found.is_some())
    }

    async fn is_in_use(&self, id: MenuItemId) -> Result<bool, DomainError> {
        let reference = sqlx::query("SELECT 1 FROM order_item WHERE menu_item_id = ? LIMIT 1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("checking order references", e))?;

        Ok(reference.is_some())
    }

    async fn create(&self, draft: &MenuItemDraft) -> Result<Option<MenuItem>, DomainError> {
        info!("Inserting menu item: {}", draft.name);

        let result = sqlx::query(
            r#"
            INSERT INTO menu_item (name, description, price, status)
            VALUES (?, ?, ?, ?)
            "#
        )
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(draft.price)
        .bind(draft.status.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("creating menu item", e))?;

        let id = result.last_insert_id();
        if id == 0 {
            return Ok(None);
        }

        let id = MenuItemId::try_from(id).map_err(|_| {
            DomainError::DatabaseError(StorageFault::new(format!(
                "Generated menu item id {} out of range",
                id
            )))
        })?;

        self.find_by_id(id).await
    }

    async fn update(&self, id: MenuItemId, draft: &MenuItemDraft) -> Result<Option<MenuItem>, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE menu_item
            SET
                name = ?,
                description = ?,
                price = ?,
                status = ?
            WHERE menu_item_id = ?
            "#
        )
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(draft.price)
        .bind(draft.status.as_str())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("updating menu item", e))?;

        if result.rows_affected() == 0 {
            debug!("Update matched no rows for menu item {}", id);
            return Ok(None);
        }

        self.find_by_id(id).await
    }

    async fn delete(&self, id: MenuItemId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM menu_item WHERE menu_item_id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("deleting menu item", e))?;

        Ok(result.rows_affected() > 0)
    }
}

// ============================================================================
// Menu Core - Menu Item Entity
// File: crates/menu-core/src/domain/menu_item.rs
// Description: Sellable menu item and its validated write shape
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use menu_shared::constants::{MSG_INVALID_PRICE, MSG_INVALID_STATUS, MSG_NAME_PRICE_REQUIRED};

use crate::error::DomainError;

/// Storage-generated identifier of a menu item
pub type MenuItemId = i64;

/// Menu item status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuStatus {
    Active,
    Inactive,
}

impl MenuStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MenuStatus::Active => "active",
            MenuStatus::Inactive => "inactive",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "active" => Some(MenuStatus::Active),
            "inactive" => Some(MenuStatus::Inactive),
            _ => None,
        }
    }
}

impl Default for MenuStatus {
    fn default() -> Self {
        MenuStatus::Active
    }
}

/// Menu Item entity, as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub status: MenuStatus,

    // Maintained by storage
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Client-writable fields of a menu item, validated for create and update.
///
/// Create and update share this shape: update is a full replace of
/// name, description, price and status.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct MenuItemDraft {
    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    pub name: String,

    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,

    pub price: f64,
    pub status: MenuStatus,
}

impl MenuItemDraft {
    /// Applies the write rules in order: name present, price present,
    /// price a finite non-negative number, status known (absent or empty
    /// means active), then field lengths.
    ///
    /// A price that arrived as something other than a number should be
    /// passed as `Some(f64::NAN)`.
    pub fn new(
        name: Option<String>,
        description: Option<String>,
        price: Option<f64>,
        status: Option<&str>,
    ) -> Result<Self, DomainError> {
        let name = match name {
            Some(name) if !name.is_empty() => name,
            _ => return Err(DomainError::ValidationError(MSG_NAME_PRICE_REQUIRED.to_string())),
        };

        let price = price
            .ok_or_else(|| DomainError::ValidationError(MSG_NAME_PRICE_REQUIRED.to_string()))?;

        if !price.is_finite() || price < 0.0 {
            return Err(DomainError::ValidationError(MSG_INVALID_PRICE.to_string()));
        }

        let status = match status {
            None | Some("") => MenuStatus::default(),
            Some(s) => MenuStatus::from_str(s)
                .ok_or_else(|| DomainError::ValidationError(MSG_INVALID_STATUS.to_string()))?,
        };

        let draft = Self {
            name,
            description,
            price,
            status,
        };

        draft
            .validate()
            .map_err(|e| DomainError::ValidationError(first_message(&e)))?;
        Ok(draft)
    }
}

fn first_message(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| errors.to_string())
}

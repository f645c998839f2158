//! Request and item DTOs

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use menu_core::domain::{MenuItem, MenuItemDraft, MenuItemId};
use menu_core::error::DomainError;
use menu_shared::constants::MSG_INVALID_NAME;

/// Create/update body. Every field is optional so that missing fields
/// surface as validation errors instead of extractor rejections; unknown
/// fields (id, timestamps) are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct MenuItemPayload {
    /// Kept untyped: `null`, `false`, `0` and `""` count as a missing name,
    /// other scalars are taken as their text.
    #[serde(default)]
    pub name: Option<Value>,

    #[serde(default)]
    pub description: Option<String>,

    /// `None` only when the field is absent; an explicit `null` is kept
    /// as `Value::Null` and rejected as an invalid price.
    #[serde(default, deserialize_with = "present")]
    pub price: Option<Value>,

    #[serde(default)]
    pub status: Option<String>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl MenuItemPayload {
    pub fn into_draft(self) -> Result<MenuItemDraft, DomainError> {
        let name = self.name.map(name_text).transpose()?.flatten();
        let price = self.price.map(|v| v.as_f64().unwrap_or(f64::NAN));
        MenuItemDraft::new(name, self.description, price, self.status.as_deref())
    }
}

fn name_text(value: Value) -> Result<Option<String>, DomainError> {
    match value {
        Value::Null | Value::Bool(false) => Ok(None),
        Value::Number(n) if n.as_f64() == Some(0.0) => Ok(None),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(true) => Ok(Some("true".to_string())),
        Value::String(s) => Ok(Some(s)),
        Value::Array(_) | Value::Object(_) => {
            Err(DomainError::ValidationError(MSG_INVALID_NAME.to_string()))
        }
    }
}

/// Menu item as returned to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItemDto {
    pub menu_item_id: MenuItemId,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl From<MenuItem> for MenuItemDto {
    fn from(item: MenuItem) -> Self {
        Self {
            menu_item_id: item.id,
            name: item.name,
            description: item.description,
            price: item.price,
            status: item.status.as_str().to_string(),
            created_at: item.created_at.map(|t| t.to_rfc3339()),
            updated_at: item.updated_at.map(|t| t.to_rfc3339()),
        }
    }
}

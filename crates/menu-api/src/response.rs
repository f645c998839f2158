//! Success response bodies

use serde::{Deserialize, Serialize};

use crate::dto::MenuItemDto;

#[derive(Debug, Serialize, Deserialize)]
pub struct MenuItemsResponse {
    pub items: Vec<MenuItemDto>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
}

impl DeleteResponse {
    pub fn deleted(message: &str) -> Self {
        Self {
            success: true,
            message: message.to_string(),
        }
    }
}

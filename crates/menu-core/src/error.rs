//! Domain errors

use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Menu item not found")]
    MenuItemNotFound,

    #[error("Menu item is referenced in orders")]
    MenuItemInUse,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Insert reported no generated id")]
    CreateFailed,

    #[error("Update affected no rows")]
    UpdateFailed,

    #[error("Delete affected no rows")]
    DeleteFailed,

    #[error("Database error: {0}")]
    DatabaseError(StorageFault),
}

/// Storage fault with the driver's diagnostic fields, when it reported any.
#[derive(Error, Debug, Clone, Default, PartialEq, Serialize)]
#[error("{message}")]
pub struct StorageFault {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errno: Option<u16>,
    #[serde(rename = "sqlState", skip_serializing_if = "Option::is_none")]
    pub sql_state: Option<String>,
    #[serde(rename = "sqlMessage", skip_serializing_if = "Option::is_none")]
    pub sql_message: Option<String>,
}

impl StorageFault {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }
}

impl From<StorageFault> for DomainError {
    fn from(fault: StorageFault) -> Self {
        DomainError::DatabaseError(fault)
    }
}

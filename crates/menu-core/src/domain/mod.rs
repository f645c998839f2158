//! # Menu Core - Domain Module
//! 
//! Domain entities for the menu item service.

pub mod menu_item;

pub use menu_item::{MenuItem, MenuItemDraft, MenuItemId, MenuStatus};

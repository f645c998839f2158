//! HTTP handlers

pub mod db_debug;
pub mod health;
pub mod menu_items;

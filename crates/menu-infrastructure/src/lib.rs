//! # Menu Infrastructure
//! 
//! MySQL implementations (adapters) of the menu core ports.

pub mod database;

pub use database::{create_pool, run_migrations, MySqlMenuItemRepository};

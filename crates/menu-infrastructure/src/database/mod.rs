//! Database module (MySQL adapters)

pub mod connection;
pub mod diagnostics;
pub mod mysql;

pub use connection::{create_pool, run_migrations};
pub use mysql::MySqlMenuItemRepository;

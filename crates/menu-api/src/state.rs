use std::sync::Arc;

use menu_core::repositories::MenuItemRepository;
use menu_core::services::MenuItemService;
use menu_shared::config::DatabaseSettings;

#[derive(Clone)]
pub struct AppState {
    pub menu_items: Arc<MenuItemService<dyn MenuItemRepository>>,
    pub database: DatabaseSettings,
    pub service_name: String,
}

impl AppState {
    pub fn new(
        menu_repo: Arc<dyn MenuItemRepository>,
        database: DatabaseSettings,
        service_name: String,
    ) -> Self {
        Self {
            menu_items: Arc::new(MenuItemService::new(menu_repo)),
            database,
            service_name,
        }
    }
}

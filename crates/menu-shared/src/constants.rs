//! Application-wide constants

pub const DEBUG_CONNECT_TIMEOUT_SECS: u64 = 10;

// Client-facing messages
pub const MSG_NAME_PRICE_REQUIRED: &str = "Name and price are required fields";
pub const MSG_INVALID_NAME: &str = "Name must be a string";
pub const MSG_INVALID_PRICE: &str = "Price must be a valid non-negative number";
pub const MSG_INVALID_STATUS: &str = "Status must be either 'active' or 'inactive'";
pub const MSG_INVALID_ID: &str = "Invalid menu item ID";
pub const MSG_INVALID_BODY: &str = "Invalid request body";
pub const MSG_NOT_FOUND: &str = "Menu item not found";
pub const MSG_IN_USE: &str = "Cannot delete menu item because it is referenced in orders";
pub const MSG_IN_USE_SUGGESTION: &str = "Consider updating the item instead of deleting it";
pub const MSG_DELETED: &str = "Menu item deleted successfully";

pub const MSG_LIST_FAILED: &str = "Failed to retrieve menu items";
pub const MSG_GET_FAILED: &str = "Failed to retrieve menu item";
pub const MSG_CREATE_FAILED: &str = "Failed to create menu item";
pub const MSG_UPDATE_FAILED: &str = "Failed to update menu item";
pub const MSG_DELETE_FAILED: &str = "Failed to delete menu item";

// ============================================================================
// Menu API - Menu Item Handlers
// File: crates/menu-api/src/handlers/menu_items.rs
// ============================================================================
//! Collection (`/menu-items`) and item (`/menu-items/{id}`) handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use menu_core::domain::MenuItemId;
use menu_shared::constants::{
    MSG_CREATE_FAILED, MSG_DELETED, MSG_DELETE_FAILED, MSG_GET_FAILED, MSG_LIST_FAILED,
    MSG_UPDATE_FAILED,
};

use crate::dto::{MenuItemDto, MenuItemPayload};
use crate::error::ApiError;
use crate::response::{DeleteResponse, MenuItemsResponse};
use crate::state::AppState;

/// Parses the leading base-10 integer of the `{id}` path segment.
///
/// Trailing text is ignored (`"12abc"` is 12, `"1.5"` is 1); a segment with
/// no leading digits is rejected.
pub fn parse_menu_item_id(raw: &str) -> Result<MenuItemId, ApiError> {
    let raw = raw.trim_start();
    let sign_len = usize::from(raw.starts_with(['+', '-']));
    let digits_len = raw[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();

    if digits_len == 0 {
        return Err(ApiError::invalid_id());
    }

    raw[..sign_len + digits_len]
        .parse::<MenuItemId>()
        .map_err(|_| ApiError::invalid_id())
}

/// List handler - GET /menu-items
pub async fn list_menu_items(
    State(state): State<AppState>,
) -> Result<Json<MenuItemsResponse>, ApiError> {
    info!("GET /menu-items");

    let items = state
        .menu_items
        .list()
        .await
        .map_err(|e| ApiError::from_domain(e, MSG_LIST_FAILED))?;

    Ok(Json(MenuItemsResponse {
        items: items.into_iter().map(MenuItemDto::from).collect(),
    }))
}

/// Create handler - POST /menu-items
pub async fn create_menu_item(
    State(state): State<AppState>,
    payload: Result<Json<MenuItemPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<MenuItemDto>), ApiError> {
    let Json(payload) = payload?;
    let draft = payload
        .into_draft()
        .map_err(|e| ApiError::from_domain(e, MSG_CREATE_FAILED))?;

    let created = state
        .menu_items
        .create(draft)
        .await
        .map_err(|e| ApiError::from_domain(e, MSG_CREATE_FAILED))?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Get handler - GET /menu-items/{id}
pub async fn get_menu_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MenuItemDto>, ApiError> {
    let id = parse_menu_item_id(&id)?;

    let item = state
        .menu_items
        .get(id)
        .await
        .map_err(|e| ApiError::from_domain(e, MSG_GET_FAILED))?;

    Ok(Json(item.into()))
}

/// Update handler - PUT /menu-items/{id}
pub async fn update_menu_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<MenuItemPayload>, JsonRejection>,
) -> Result<Json<MenuItemDto>, ApiError> {
    let id = parse_menu_item_id(&id)?;
    let Json(payload) = payload?;
    let draft = payload
        .into_draft()
        .map_err(|e| ApiError::from_domain(e, MSG_UPDATE_FAILED))?;

    let updated = state
        .menu_items
        .update(id, draft)
        .await
        .map_err(|e| ApiError::from_domain(e, MSG_UPDATE_FAILED))?;

    Ok(Json(updated.into()))
}

/// Delete handler - DELETE /menu-items/{id}
pub async fn delete_menu_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let id = parse_menu_item_id(&id)?;

    state
        .menu_items
        .delete(id)
        .await
        .map_err(|e| ApiError::from_domain(e, MSG_DELETE_FAILED))?;

    Ok(Json(DeleteResponse::deleted(MSG_DELETED)))
}

use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use menu_api::{build_router, AppState};
use menu_core::domain::{MenuItem, MenuItemDraft, MenuItemId};
use menu_core::error::{DomainError, StorageFault};
use menu_core::repositories::MenuItemRepository;
use menu_shared::config::DatabaseSettings;

#[derive(Default)]
struct InMemoryStore {
    next_id: MenuItemId,
    items: BTreeMap<MenuItemId, MenuItem>,
    referenced: HashSet<MenuItemId>,
    failing: bool,
}

#[derive(Default)]
struct InMemoryMenuItemRepository {
    store: Mutex<InMemoryStore>,
}

impl InMemoryMenuItemRepository {
    fn reference_in_order(&self, id: MenuItemId) {
        self.store.lock().unwrap().referenced.insert(id);
    }

    fn fail_all(&self) {
        self.store.lock().unwrap().failing = true;
    }

    fn check(store: &InMemoryStore) -> Result<(), DomainError> {
        if store.failing {
            return Err(DomainError::DatabaseError(StorageFault {
                message: "connect ECONNREFUSED 127.0.0.1:3306".to_string(),
                code: Some("ECONNREFUSED".to_string()),
                ..Default::default()
            }));
        }
        Ok(())
    }
}

#[async_trait]
impl MenuItemRepository for InMemoryMenuItemRepository {
    async fn find_all(&self) -> Result<Vec<MenuItem>, DomainError> {
        let store = self.store.lock().unwrap();
        Self::check(&store)?;
        let mut items: Vec<MenuItem> = store.items.values().cloned().collect();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(items)
    }

    async fn find_by_id(&self, id: MenuItemId) -> Result<Option<MenuItem>, DomainError> {
        let store = self.store.lock().unwrap();
        Self::check(&store)?;
        Ok(store.items.get(&id).cloned())
    }

    async fn exists(&self, id: MenuItemId) -> Result<bool, DomainError> {
        let store = self.store.lock().unwrap();
        Self::check(&store)?;
        Ok(store.items.contains_key(&id))
    }

    async fn is_in_use(&self, id: MenuItemId) -> Result<bool, DomainError> {
        let store = self.store.lock().unwrap();
        Self::check(&store)?;
        Ok(store.referenced.contains(&id))
    }

    async fn create(&self, draft: &MenuItemDraft) -> Result<Option<MenuItem>, DomainError> {
        let mut store = self.store.lock().unwrap();
        Self::check(&store)?;
        store.next_id += 1;
        let item = MenuItem {
            id: store.next_id,
            name: draft.name.clone(),
            description: draft.description.clone(),
            price: draft.price,
            status: draft.status,
            created_at: Some(chrono::Utc::now()),
            updated_at: Some(chrono::Utc::now()),
        };
        store.items.insert(item.id, item.clone());
        Ok(Some(item))
    }

    async fn update(&self, id: MenuItemId, draft: &MenuItemDraft) -> Result<Option<MenuItem>, DomainError> {
        let mut store = self.store.lock().unwrap();
        Self::check(&store)?;
        Ok(store.items.get_mut(&id).map(|item| {
            item.name = draft.name.clone();
            item.description = draft.description.clone();
            item.price = draft.price;
            item.status = draft.status;
            item.updated_at = Some(chrono::Utc::now());
            item.clone()
        }))
    }

    async fn delete(&self, id: MenuItemId) -> Result<bool, DomainError> {
        let mut store = self.store.lock().unwrap();
        Self::check(&store)?;
        Ok(store.items.remove(&id).is_some())
    }
}

fn database_settings() -> DatabaseSettings {
    DatabaseSettings {
        host: "localhost".to_string(),
        port: 3306,
        user: "root".to_string(),
        password: String::new(),
        name: "menu".to_string(),
        max_connections: 1,
        min_connections: 0,
        connect_timeout_secs: 1,
        run_migrations: false,
    }
}

fn app() -> (Router, Arc<InMemoryMenuItemRepository>) {
    let repo = Arc::new(InMemoryMenuItemRepository::default());
    let state = AppState::new(repo.clone(), database_settings(), "menu-service".to_string());
    (build_router(state), repo)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn create(app: &Router, body: Value) -> Value {
    let (status, json) = send(app, Method::POST, "/menu-items", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {}", json);
    json
}

#[tokio::test]
async fn create_returns_item_with_defaults() {
    let (app, _) = app();

    let created = create(&app, json!({"name": "Chili Bowl", "price": 12.5})).await;

    assert!(created["menu_item_id"].as_i64().unwrap() > 0);
    assert_eq!(created["name"], "Chili Bowl");
    assert_eq!(created["price"], 12.5);
    assert_eq!(created["status"], "active");
    assert_eq!(created["description"], Value::Null);
}

#[tokio::test]
async fn create_keeps_given_status() {
    let (app, _) = app();

    let created = create(&app, json!({"name": "Tea", "price": 2, "status": "inactive"})).await;
    assert_eq!(created["status"], "inactive");
    assert_eq!(created["price"], 2.0);
}

#[tokio::test]
async fn create_requires_name_and_price() {
    let (app, _) = app();

    for body in [
        json!({"name": "", "price": 3}),
        json!({"price": 3, "description": "no name"}),
        json!({"name": "Tea"}),
        json!({"name": "", "price": -5, "status": "active"}),
    ] {
        let (status, json) = send(&app, Method::POST, "/menu-items", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "Name and price are required fields");
    }
}

#[tokio::test]
async fn create_treats_falsy_name_as_missing() {
    let (app, _) = app();

    for body in [json!({"name": false, "price": 1}), json!({"name": 0})] {
        let (status, json) = send(&app, Method::POST, "/menu-items", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "Name and price are required fields");
    }

    let created = create(&app, json!({"name": 5, "price": 1})).await;
    assert_eq!(created["name"], "5");

    let (status, json) = send(
        &app,
        Method::POST,
        "/menu-items",
        Some(json!({"name": ["Tea"], "price": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Name must be a string");
}

#[tokio::test]
async fn create_rejects_negative_price_and_accepts_zero() {
    let (app, _) = app();

    let (status, json) =
        send(&app, Method::POST, "/menu-items", Some(json!({"name": "Tea", "price": -1}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Price must be a valid non-negative number");

    let (status, json) =
        send(&app, Method::POST, "/menu-items", Some(json!({"name": "Tea", "price": "1"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Price must be a valid non-negative number");

    let created = create(&app, json!({"name": "Water", "price": 0})).await;
    assert_eq!(created["price"], 0.0);
}

#[tokio::test]
async fn create_rejects_malformed_body() {
    let (app, _) = app();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/menu-items")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_then_get_round_trips() {
    let (app, _) = app();

    let created = create(
        &app,
        json!({"name": "Nachos", "description": "With cheese", "price": 7.25, "status": "active"}),
    )
    .await;
    let id = created["menu_item_id"].as_i64().unwrap();

    let (status, fetched) = send(&app, Method::GET, &format!("/menu-items/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    for field in ["menu_item_id", "name", "description", "price", "status"] {
        assert_eq!(fetched[field], created[field], "field {} differs", field);
    }
}

#[tokio::test]
async fn list_orders_by_name() {
    let (app, _) = app();

    create(&app, json!({"name": "B", "price": 1})).await;
    create(&app, json!({"name": "A", "price": 1})).await;

    let (status, json) = send(&app, Method::GET, "/menu-items", None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = json["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["A", "B"]);
}

#[tokio::test]
async fn list_storage_fault_is_500_with_diagnostics() {
    let (app, repo) = app();
    repo.fail_all();

    let (status, json) = send(&app, Method::GET, "/menu-items", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["message"], "Failed to retrieve menu items");
    assert_eq!(json["error"], "connect ECONNREFUSED 127.0.0.1:3306");
    assert_eq!(json["details"]["code"], "ECONNREFUSED");
}

#[tokio::test]
async fn non_numeric_id_is_400() {
    let (app, _) = app();

    let (status, json) = send(&app, Method::GET, "/menu-items/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Invalid menu item ID");

    let (status, _) = send(
        &app,
        Method::PUT,
        "/menu-items/abc",
        Some(json!({"name": "Tea", "price": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::DELETE, "/menu-items/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn id_with_trailing_text_uses_leading_digits() {
    let (app, _) = app();

    let created = create(&app, json!({"name": "Flan", "price": 4})).await;
    let id = created["menu_item_id"].as_i64().unwrap();

    let (status, fetched) = send(&app, Method::GET, &format!("/menu-items/{}abc", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["name"], "Flan");

    let (status, _) = send(&app, Method::GET, &format!("/menu-items/{}.5", id), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn unknown_id_is_404() {
    let (app, _) = app();

    let (status, json) = send(&app, Method::GET, "/menu-items/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["message"], "Menu item not found");

    let (status, _) = send(
        &app,
        Method::PUT,
        "/menu-items/999",
        Some(json!({"name": "Tea", "price": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, "/menu-items/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_validates_before_existence() {
    let (app, _) = app();

    let (status, json) =
        send(&app, Method::PUT, "/menu-items/999", Some(json!({"price": 1}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Name and price are required fields");
}

#[tokio::test]
async fn update_replaces_fields_and_defaults_status() {
    let (app, _) = app();

    let created = create(
        &app,
        json!({"name": "Soup", "description": "Hot", "price": 5, "status": "inactive"}),
    )
    .await;
    let id = created["menu_item_id"].as_i64().unwrap();

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/menu-items/{}", id),
        Some(json!({"name": "Cold Soup", "price": 6.5})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["menu_item_id"], created["menu_item_id"]);
    assert_eq!(updated["name"], "Cold Soup");
    assert_eq!(updated["description"], Value::Null);
    assert_eq!(updated["price"], 6.5);
    assert_eq!(updated["status"], "active");
}

#[tokio::test]
async fn delete_referenced_item_is_refused() {
    let (app, repo) = app();

    let created = create(&app, json!({"name": "Burrito", "price": 9})).await;
    let id = created["menu_item_id"].as_i64().unwrap();
    repo.reference_in_order(id);

    let (status, json) = send(&app, Method::DELETE, &format!("/menu-items/{}", id), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json["message"],
        "Cannot delete menu item because it is referenced in orders"
    );
    assert_eq!(
        json["suggestion"],
        "Consider updating the item instead of deleting it"
    );

    let (status, _) = send(&app, Method::GET, &format!("/menu-items/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn delete_unreferenced_item_then_get_is_404() {
    let (app, _) = app();

    let created = create(&app, json!({"name": "Taco", "price": 3.5})).await;
    let id = created["menu_item_id"].as_i64().unwrap();

    let (status, json) = send(&app, Method::DELETE, &format!("/menu-items/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"success": true, "message": "Menu item deleted successfully"}));

    let (status, _) = send(&app, Method::GET, &format!("/menu-items/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_reports_healthy() {
    let (app, _) = app();

    let (status, json) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["service"], "menu-service");
    assert!(json["version"].is_string());
}

//! Database connectivity probe for operators

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use tracing::info;

use menu_infrastructure::database::diagnostics::{probe_connection, ProbeFailure, ProbeSuccess};

use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum DbDebugResponse {
    Success {
        status: &'static str,
        message: &'static str,
        details: DbDebugDetails,
    },
    Failure {
        status: &'static str,
        message: String,
        #[serde(rename = "errorCode")]
        error_code: String,
        config: DbDebugConfig,
    },
}

#[derive(Debug, Serialize)]
pub struct DbDebugDetails {
    pub database: String,
    pub tables: Vec<String>,
    pub menu_item_columns: Vec<String>,
}

/// Connection parameters echoed back on failure. Never includes the password.
#[derive(Debug, Serialize)]
pub struct DbDebugConfig {
    pub host: String,
    pub user: String,
    pub database: String,
    pub port: u16,
}

impl From<ProbeSuccess> for DbDebugResponse {
    fn from(probe: ProbeSuccess) -> Self {
        DbDebugResponse::Success {
            status: "success",
            message: "Database connection and queries successful",
            details: DbDebugDetails {
                database: probe.database,
                tables: probe.tables,
                menu_item_columns: probe.menu_item_columns,
            },
        }
    }
}

impl From<ProbeFailure> for DbDebugResponse {
    fn from(probe: ProbeFailure) -> Self {
        DbDebugResponse::Failure {
            status: "error",
            message: probe.message,
            error_code: probe.error_code,
            config: DbDebugConfig {
                host: probe.host,
                user: probe.user,
                database: probe.database,
                port: probe.port,
            },
        }
    }
}

/// Debug handler - GET /db-debug
pub async fn db_debug(State(state): State<AppState>) -> (StatusCode, Json<DbDebugResponse>) {
    info!("GET /db-debug");

    match probe_connection(&state.database).await {
        Ok(probe) => (StatusCode::OK, Json(probe.into())),
        Err(probe) => (StatusCode::INTERNAL_SERVER_ERROR, Json(probe.into())),
    }
}

//! Storage fault diagnostics and the direct connection probe

use std::io::ErrorKind;
use std::time::Duration;

use sqlx::mysql::{MySqlConnection, MySqlDatabaseError, MySqlRow};
use sqlx::{Connection, Row};
use tracing::{error, info};

use menu_core::error::StorageFault;
use menu_shared::config::DatabaseSettings;
use menu_shared::constants::DEBUG_CONNECT_TIMEOUT_SECS;

use crate::database::connection::connect_options;

const ER_ACCESS_DENIED_ERROR: u16 = 1045;
const ER_BAD_DB_ERROR: u16 = 1049;
const ER_NO_SUCH_TABLE: u16 = 1146;
const ER_ROW_IS_REFERENCED_2: u16 = 1451;

/// Extracts the driver's diagnostic fields from a sqlx error
pub fn storage_fault(e: &sqlx::Error) -> StorageFault {
    let mut fault = StorageFault::new(e.to_string());

    match e {
        sqlx::Error::Database(db_err) => {
            fault.sql_message = Some(db_err.message().to_string());
            fault.sql_state = db_err.code().map(|c| c.into_owned());
            if let Some(mysql_err) = db_err.try_downcast_ref::<MySqlDatabaseError>() {
                let errno = mysql_err.number();
                fault.errno = Some(errno);
                fault.code = error_name(errno).map(str::to_string);
            }
        }
        sqlx::Error::Io(io_err) => {
            fault.code = match io_err.kind() {
                ErrorKind::ConnectionRefused => Some("ECONNREFUSED".to_string()),
                ErrorKind::TimedOut => Some("ETIMEDOUT".to_string()),
                ErrorKind::ConnectionReset => Some("ECONNRESET".to_string()),
                _ => None,
            };
        }
        sqlx::Error::PoolTimedOut => fault.code = Some("POOL_TIMED_OUT".to_string()),
        sqlx::Error::PoolClosed => fault.code = Some("POOL_CLOSED".to_string()),
        _ => {}
    }

    fault
}

fn error_name(errno: u16) -> Option<&'static str> {
    match errno {
        ER_ACCESS_DENIED_ERROR => Some("ER_ACCESS_DENIED_ERROR"),
        ER_BAD_DB_ERROR => Some("ER_BAD_DB_ERROR"),
        ER_NO_SUCH_TABLE => Some("ER_NO_SUCH_TABLE"),
        ER_ROW_IS_REFERENCED_2 => Some("ER_ROW_IS_REFERENCED_2"),
        _ => None,
    }
}

#[derive(Debug, Clone)]
pub struct ProbeSuccess {
    pub database: String,
    pub tables: Vec<String>,
    pub menu_item_columns: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ProbeFailure {
    pub message: String,
    pub error_code: String,
    pub host: String,
    pub user: String,
    pub database: String,
    pub port: u16,
}

/// Opens a direct connection (outside the pool) and inspects the schema.
/// The password never leaves this function.
pub async fn probe_connection(settings: &DatabaseSettings) -> Result<ProbeSuccess, ProbeFailure> {
    info!(
        host = %settings.host,
        port = settings.port,
        user = %settings.user,
        database = %settings.name,
        "Starting database connection probe"
    );

    let timeout = Duration::from_secs(DEBUG_CONNECT_TIMEOUT_SECS);
    let result = match tokio::time::timeout(timeout, run_probe(settings)).await {
        Ok(result) => result.map_err(|e| storage_fault(&e)),
        Err(_) => Err(StorageFault {
            message: format!("Connection timed out after {}s", DEBUG_CONNECT_TIMEOUT_SECS),
            code: Some("ETIMEDOUT".to_string()),
            ..Default::default()
        }),
    };

    result.map_err(|fault| {
        error!("Database connection probe failed: {}", fault);
        ProbeFailure {
            message: classify(&fault, settings),
            error_code: fault.code.clone().unwrap_or_else(|| "UNKNOWN".to_string()),
            host: settings.host.clone(),
            user: settings.user.clone(),
            database: settings.name.clone(),
            port: settings.port,
        }
    })
}

async fn run_probe(settings: &DatabaseSettings) -> Result<ProbeSuccess, sqlx::Error> {
    let mut conn = MySqlConnection::connect_with(&connect_options(settings)).await?;
    info!("Direct connection successful");

    sqlx::query("SELECT 1 AS test").execute(&mut conn).await?;

    let tables = sqlx::query("SHOW TABLES")
        .fetch_all(&mut conn)
        .await?
        .iter()
        .map(|row| text_column(row, 0))
        .collect::<Result<Vec<_>, _>>()?;
    info!("Tables: {:?}", tables);

    let menu_item_columns = sqlx::query("DESCRIBE menu_item")
        .fetch_all(&mut conn)
        .await?
        .iter()
        .map(|row| text_column(row, 0))
        .collect::<Result<Vec<_>, _>>()?;
    info!("menu_item columns: {:?}", menu_item_columns);

    conn.close().await?;
    info!("Probe connection closed");

    Ok(ProbeSuccess {
        database: settings.name.clone(),
        tables,
        menu_item_columns,
    })
}

// SHOW/DESCRIBE columns come back as VARCHAR or VARBINARY depending on the server version.
fn text_column(row: &MySqlRow, index: usize) -> Result<String, sqlx::Error> {
    row.try_get::<String, _>(index).or_else(|_| {
        row.try_get::<Vec<u8>, _>(index)
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
    })
}

/// Operator-facing message for a failed probe
pub fn classify(fault: &StorageFault, settings: &DatabaseSettings) -> String {
    match (fault.code.as_deref(), fault.errno) {
        (Some("ECONNREFUSED"), _) => format!(
            "Connection refused. Make sure MySQL is running on {}:{}",
            settings.host, settings.port
        ),
        (_, Some(ER_ACCESS_DENIED_ERROR)) => {
            "Access denied. Check your username and password".to_string()
        }
        (_, Some(ER_BAD_DB_ERROR)) => format!("Database '{}' does not exist", settings.name),
        _ => fault.message.clone(),
    }
}

pub mod db;
mod errors;

pub mod addresses;
pub mod cart;
pub mod orders;
pub mod products;
pub mod users;

use std::{env, future::Future, str::FromStr, time::Duration};

pub use errors::SqliteDatabaseError;
use log::info;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};

const SQLITE_DB_URL: &str = "sqlite://data/shop.db";

pub fn db_url() -> String {
    let result = env::var("SHOP_DATABASE_URL").unwrap_or_else(|_| {
        info!("SHOP_DATABASE_URL is not set. Using the default.");
        SQLITE_DB_URL.to_string()
    });
    info!("Using database URL: {result}");
    result
}

/// Creates a new connection pool. The database file is created if it does not exist yet.
pub async fn new_pool(url: &str, max_connections: u32) -> Result<SqlitePool, SqliteDatabaseError> {
    let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true).foreign_keys(true);
    let pool = SqlitePoolOptions::new().max_connections(max_connections).connect_with(options).await?;
    Ok(pool)
}

/// Runs `fut` to completion, or fails with [`SqliteDatabaseError::Timeout`] once `deadline` has passed. Dropping an
/// uncommitted transaction rolls it back, so a timed-out unit of work leaves no partial writes.
pub(crate) async fn with_deadline<T, F>(deadline: Duration, fut: F) -> Result<T, SqliteDatabaseError>
where F: Future<Output = Result<T, SqliteDatabaseError>> {
    tokio::time::timeout(deadline, fut).await.map_err(|_| SqliteDatabaseError::Timeout(deadline))?
}

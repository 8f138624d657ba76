use std::time::Duration;

use log::*;
use thiserror::Error;

use crate::shop_api::errors::{
    AddressError,
    CartError,
    CatalogError,
    CheckoutError,
    StoreError,
    UserAccountError,
};

#[derive(Debug, Error)]
pub enum SqliteDatabaseError {
    #[error("Database connection error: {0}")]
    DriverError(#[from] sqlx::Error),
    #[error("Database migration error: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),
    #[error("Database query error: {0}")]
    QueryError(String),
    #[error("Database call did not complete within {0:?}")]
    Timeout(Duration),
    #[error("Database task failed: {0}")]
    TaskFailed(String),
    #[error("Product not found: {0}")]
    ProductNotFound(String),
    #[error("Cart line not found for product {0}")]
    LineNotFound(String),
    #[error("Cart is empty for user {0}")]
    EmptyCart(String),
    #[error("Total price overflow: {0}")]
    AmountOverflow(String),
    #[error("Address {0} not found")]
    AddressNotFound(String),
    #[error("A user with this email or phone already exists")]
    DuplicateUser,
    #[error("User not found: {0}")]
    UserNotFound(String),
}

// SQLITE_BUSY, SQLITE_LOCKED and their extended codes
const BUSY_CODES: [&str; 5] = ["5", "6", "261", "262", "517"];

impl SqliteDatabaseError {
    fn is_transient(&self) -> bool {
        match self {
            Self::Timeout(_) => true,
            Self::DriverError(sqlx::Error::PoolTimedOut) |
            Self::DriverError(sqlx::Error::PoolClosed) |
            Self::DriverError(sqlx::Error::WorkerCrashed) |
            Self::DriverError(sqlx::Error::Io(_)) => true,
            Self::DriverError(sqlx::Error::Database(e)) => {
                e.code().map(|c| BUSY_CODES.contains(&c.as_ref())).unwrap_or(false)
            },
            _ => false,
        }
    }

    pub(crate) fn is_unique_violation(&self) -> bool {
        matches!(self, Self::DriverError(sqlx::Error::Database(e)) if e.is_unique_violation())
    }
}

impl From<SqliteDatabaseError> for StoreError {
    fn from(e: SqliteDatabaseError) -> Self {
        debug!("🗃️ Classifying database error: {e}");
        match e {
            SqliteDatabaseError::Timeout(d) => StoreError::Timeout(d),
            e if e.is_transient() => StoreError::Unavailable(e.to_string()),
            e => StoreError::Query(e.to_string()),
        }
    }
}

impl From<SqliteDatabaseError> for CatalogError {
    fn from(e: SqliteDatabaseError) -> Self {
        match e {
            SqliteDatabaseError::ProductNotFound(_) => CatalogError::ProductNotFound,
            e => CatalogError::Store(e.into()),
        }
    }
}

impl From<SqliteDatabaseError> for CartError {
    fn from(e: SqliteDatabaseError) -> Self {
        match e {
            SqliteDatabaseError::ProductNotFound(_) => CartError::ProductNotFound,
            SqliteDatabaseError::LineNotFound(_) => CartError::LineNotFound,
            SqliteDatabaseError::AmountOverflow(_) => CartError::AmountOverflow,
            e => CartError::Store(e.into()),
        }
    }
}

impl From<SqliteDatabaseError> for CheckoutError {
    fn from(e: SqliteDatabaseError) -> Self {
        match e {
            SqliteDatabaseError::EmptyCart(_) => CheckoutError::EmptyCart,
            SqliteDatabaseError::ProductNotFound(_) => CheckoutError::ProductNotFound,
            SqliteDatabaseError::AmountOverflow(_) => CheckoutError::AmountOverflow,
            e => CheckoutError::Store(e.into()),
        }
    }
}

impl From<SqliteDatabaseError> for AddressError {
    fn from(e: SqliteDatabaseError) -> Self {
        match e {
            SqliteDatabaseError::AddressNotFound(_) => AddressError::AddressNotFound,
            e => AddressError::Store(e.into()),
        }
    }
}

impl From<SqliteDatabaseError> for UserAccountError {
    fn from(e: SqliteDatabaseError) -> Self {
        match e {
            SqliteDatabaseError::DuplicateUser => UserAccountError::UserAlreadyExists,
            e if e.is_unique_violation() => UserAccountError::UserAlreadyExists,
            SqliteDatabaseError::UserNotFound(_) => UserAccountError::UserNotFound,
            e => UserAccountError::Store(e.into()),
        }
    }
}

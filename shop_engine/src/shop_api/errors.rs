use std::time::Duration;

use thiserror::Error;

/// Failures of the storage backend itself, as opposed to domain outcomes such as "not found".
///
/// The variants carry enough detail for logging. They must not be passed on verbatim to API callers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("The store did not respond within {0:?}")]
    Timeout(Duration),
    #[error("The store is unavailable: {0}")]
    Unavailable(String),
    #[error("Store query failed: {0}")]
    Query(String),
}

impl StoreError {
    /// Transient failures may succeed if the caller simply retries the request.
    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::Timeout(_) | StoreError::Unavailable(_))
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("Invalid product: {0}")]
    InvalidProduct(String),
    #[error("Product not found")]
    ProductNotFound,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CartError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("Product not found")]
    ProductNotFound,
    #[error("Item is not in the cart")]
    LineNotFound,
    #[error("The cart total cannot be represented")]
    AmountOverflow,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CheckoutError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("The cart is empty")]
    EmptyCart,
    #[error("Product not found")]
    ProductNotFound,
    #[error("The order total cannot be represented")]
    AmountOverflow,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AddressError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("Address not found")]
    AddressNotFound,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserAccountError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("{0}")]
    Validation(String),
    #[error("User with this email or phone already exists")]
    UserAlreadyExists,
    #[error("User not found")]
    UserNotFound,
    #[error("Login or password incorrect")]
    InvalidCredentials,
    #[error("Could not process the password. {0}")]
    PasswordHashError(String),
}

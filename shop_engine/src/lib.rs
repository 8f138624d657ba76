//! Shop Engine
//!
//! The shop engine holds the storage and business logic of the shop: the product catalog, per-user carts, the address
//! book, user accounts and, at its core, the checkout that turns a cart into an immutable order.
//!
//! The library is divided into two main sections:
//! 1. Storage management (`db`). SQLite is the supported backend. You should never need to access the database
//!    directly; use the public API instead. The exception is the data types stored in the database, which are
//!    defined in the public [`db_types`] module.
//! 2. The public API (`shop_api`). Each API object wraps a backend that implements the traits it needs, e.g.
//!    [`CheckoutApi`] requires [`CheckoutManagement`].
//!
//! Money is always handled as [`shop_common::Price`], an unsigned amount in the smallest currency unit with checked
//! arithmetic. Order totals never wrap; a total that cannot be represented is reported as an error.
mod db;

pub mod db_types;
pub mod helpers;
mod shop_api;

#[cfg(feature = "sqlite")]
pub use db::sqlite::{db::SqliteDatabase, SqliteDatabaseError};
pub use db::traits::{
    AddressManagement,
    CartManagement,
    CatalogManagement,
    CheckoutManagement,
    CheckoutResult,
    OrderManagement,
    UserManagement,
};
pub use shop_api::{
    address_api::AddressBookApi,
    cart_api::CartApi,
    catalog_api::CatalogApi,
    checkout_api::CheckoutApi,
    errors,
    errors::{AddressError, CartError, CatalogError, CheckoutError, StoreError, UserAccountError},
    order_objects,
    user_api::UserAccountApi,
};

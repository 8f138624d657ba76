//! # Shop engine public API
//!
//! The `shop_api` module exposes the programmatic API of the shop engine. Each API object wraps a storage backend
//! that implements the backend traits it needs, so callers can pick the functionality they want.
//!
//! * [`catalog_api`] lists, searches and creates products.
//! * [`cart_api`] adds and removes cart lines and summarises a user's cart.
//! * [`checkout_api`] converts a cart, or a single product, into a pending order.
//! * [`address_api`] manages a user's address book.
//! * [`user_api`] handles signup, login and token bookkeeping.
//!
//! # API usage
//!
//! ```rust,ignore
//! use shop_engine::{CheckoutApi, SqliteDatabase};
//! let db = SqliteDatabase::new_with_url(...).await?;
//! // SqliteDatabase implements CheckoutManagement
//! let api = CheckoutApi::new(db);
//! let receipt = api.checkout_cart(&user_id).await?;
//! ```

pub mod address_api;
pub mod cart_api;
pub mod catalog_api;
pub mod checkout_api;
pub mod errors;
pub mod order_objects;
pub mod user_api;

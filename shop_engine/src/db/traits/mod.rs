//! #  Storage backend contracts.
//!
//! This module defines the behaviour that a storage backend must expose in order to serve the shop. The public API
//! objects in `shop_api` are generic over these traits, so the HTTP layer never talks to a database directly.
//!
//! * [`CatalogManagement`] inserts and queries products.
//! * [`CartManagement`] maintains the per-user cart lines.
//! * [`CheckoutManagement`] converts a cart, or a single product, into an order. It is the only writer of orders and
//!   the only component that deletes cart lines in bulk.
//! * [`OrderManagement`] provides read access to placed orders.
//! * [`AddressManagement`] maintains the address book. Every mutation is scoped by the owning user.
//! * [`UserManagement`] stores user accounts and their session tokens.
mod address_management;
mod cart_management;
mod catalog_management;
mod checkout_management;
mod order_management;
mod user_management;

pub use address_management::AddressManagement;
pub use cart_management::CartManagement;
pub use catalog_management::CatalogManagement;
pub use checkout_management::{CheckoutManagement, CheckoutResult};
pub use order_management::OrderManagement;
pub use user_management::UserManagement;

//! # Shop server
//! This module hosts the HTTP server for the shop. It is responsible for:
//! Registering and logging in users, and issuing their session tokens.
//! Serving the product catalogue.
//! Managing each user's address book and shopping cart.
//! Turning a cart, or a single product, into an order.
//!
//! The business rules live in `shop_engine`. The handlers here only extract the caller's identity and the request
//! parameters, call into the engine, and map the engine's errors onto HTTP responses.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! The server exposes the following routes:
//! * `/health`: A health check route that returns a 200 OK response.
//! * `POST /users/signup`, `POST /users/login`: account creation and login.
//! * `POST /admin/addproduct`, `GET /users/productview`, `GET /users/search?name=`: the catalogue.
//! * `POST|PUT|DELETE /address`, `PUT /address/home`, `PUT /address/work`: the address book.
//! * `GET /addtocart?id=`, `GET /removeitem?id=`, `GET /listcart`: the cart.
//! * `GET /cartcheckout`, `GET /instantbuy?id=`: checkout.
//!
//! All routes apart from signup, login and the catalogue require an access token in the `Authorization` header.

pub mod auth;
pub mod cli;
pub mod config;
pub mod data_objects;
pub mod errors;

pub mod helpers;
pub mod routes;
pub mod server;

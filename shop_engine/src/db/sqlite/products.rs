use log::trace;
use shop_common::Price;
use sqlx::SqliteConnection;

use crate::{
    db::sqlite::SqliteDatabaseError,
    db_types::{NewProduct, Product, ProductId},
};

pub async fn insert_product(product: NewProduct, conn: &mut SqliteConnection) -> Result<ProductId, SqliteDatabaseError> {
    let id = ProductId::random();
    let price = product.price.to_db().map_err(|e| SqliteDatabaseError::QueryError(e.to_string()))?;
    sqlx::query("INSERT INTO products (id, name, price, rating, image) VALUES ($1, $2, $3, $4, $5)")
        .bind(&id)
        .bind(product.name)
        .bind(price)
        .bind(product.rating)
        .bind(product.image)
        .execute(conn)
        .await?;
    trace!("🗃️ Product {id} inserted");
    Ok(id)
}

pub async fn fetch_products(conn: &mut SqliteConnection) -> Result<Vec<Product>, SqliteDatabaseError> {
    let products = sqlx::query_as("SELECT id, name, price, rating, image FROM products ORDER BY name, id")
        .fetch_all(conn)
        .await?;
    Ok(products)
}

/// Case-insensitive substring search on the product name. `%` and `_` in `name` are matched literally.
pub async fn search_products(name: &str, conn: &mut SqliteConnection) -> Result<Vec<Product>, SqliteDatabaseError> {
    let pattern = escape_like(name);
    let products = sqlx::query_as(
        r#"
            SELECT id, name, price, rating, image FROM products
            WHERE name LIKE '%' || $1 || '%' ESCAPE '\'
            ORDER BY name, id
        "#,
    )
    .bind(pattern)
    .fetch_all(conn)
    .await?;
    Ok(products)
}

pub async fn fetch_product(
    product_id: &ProductId,
    conn: &mut SqliteConnection,
) -> Result<Option<Product>, SqliteDatabaseError> {
    let product = sqlx::query_as("SELECT id, name, price, rating, image FROM products WHERE id = $1")
        .bind(product_id)
        .fetch_optional(conn)
        .await?;
    Ok(product)
}

/// Fetches the current unit price of the product, or [`SqliteDatabaseError::ProductNotFound`] if it does not exist.
pub async fn product_price(product_id: &ProductId, conn: &mut SqliteConnection) -> Result<Price, SqliteDatabaseError> {
    let price: Option<i64> = sqlx::query_scalar("SELECT price FROM products WHERE id = $1")
        .bind(product_id)
        .fetch_optional(conn)
        .await?;
    let price = price.ok_or_else(|| SqliteDatabaseError::ProductNotFound(product_id.to_string()))?;
    Price::try_from(price).map_err(|e| SqliteDatabaseError::QueryError(e.to_string()))
}

fn escape_like(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '%' | '_' | '\\') {
            result.push('\\');
        }
        result.push(c);
    }
    result
}

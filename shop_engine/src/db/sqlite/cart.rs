use log::trace;
use sqlx::SqliteConnection;

use crate::{
    db::sqlite::SqliteDatabaseError,
    db_types::{CartItem, ProductId, UserId},
};

/// Inserts a line with quantity 1, or increments the quantity of the existing line, in a single statement.
///
/// The `SELECT ... FROM products` guard means nothing is written when the product does not exist, in which case no
/// row is returned and [`SqliteDatabaseError::ProductNotFound`] is raised.
///
/// Use `fetch_all`: a `RETURNING` statement that is not stepped to completion stays uncommitted on the connection.
pub async fn add_or_increment(
    user_id: &UserId,
    product_id: &ProductId,
    conn: &mut SqliteConnection,
) -> Result<u32, SqliteDatabaseError> {
    let quantities: Vec<u32> = sqlx::query_scalar(
        r#"
            INSERT INTO cart_items (user_id, product_id, quantity)
            SELECT $1, id, 1 FROM products WHERE id = $2
            ON CONFLICT (user_id, product_id)
            DO UPDATE SET quantity = quantity + 1, updated_at = CURRENT_TIMESTAMP
            RETURNING quantity
        "#,
    )
    .bind(user_id)
    .bind(product_id)
    .fetch_all(conn)
    .await?;
    let quantity = quantities
        .into_iter()
        .next()
        .ok_or_else(|| SqliteDatabaseError::ProductNotFound(product_id.to_string()))?;
    trace!("🗃️ Cart line ({user_id}, {product_id}) now has quantity {quantity}");
    Ok(quantity)
}

pub async fn remove_line(
    user_id: &UserId,
    product_id: &ProductId,
    conn: &mut SqliteConnection,
) -> Result<(), SqliteDatabaseError> {
    let result = sqlx::query("DELETE FROM cart_items WHERE user_id = $1 AND product_id = $2")
        .bind(user_id)
        .bind(product_id)
        .execute(conn)
        .await?;
    if result.rows_affected() == 0 {
        return Err(SqliteDatabaseError::LineNotFound(product_id.to_string()));
    }
    trace!("🗃️ Cart line ({user_id}, {product_id}) removed");
    Ok(())
}

pub async fn fetch_cart(user_id: &UserId, conn: &mut SqliteConnection) -> Result<Vec<CartItem>, SqliteDatabaseError> {
    let items = sqlx::query_as(
        r#"
            SELECT
                cart_items.product_id as product_id,
                products.name as product_name,
                products.price as price,
                products.rating as rating,
                products.image as image,
                cart_items.quantity as quantity,
                cart_items.created_at as created_at,
                cart_items.updated_at as updated_at
            FROM cart_items JOIN products ON cart_items.product_id = products.id
            WHERE cart_items.user_id = $1
            ORDER BY cart_items.created_at, products.name
        "#,
    )
    .bind(user_id)
    .fetch_all(conn)
    .await?;
    Ok(items)
}

/// Deletes every cart line for the user and returns the deleted `(product, quantity)` pairs.
///
/// Because this is a write, it acquires the database write lock for the enclosing transaction. Run it as the first
/// statement of a checkout transaction: a concurrent checkout for the same user then blocks until the first one has
/// committed or rolled back, and afterwards sees the cart as it was left.
pub async fn take_cart_lines(
    user_id: &UserId,
    conn: &mut SqliteConnection,
) -> Result<Vec<(ProductId, u32)>, SqliteDatabaseError> {
    let lines = sqlx::query_as("DELETE FROM cart_items WHERE user_id = $1 RETURNING product_id, quantity")
        .bind(user_id)
        .fetch_all(conn)
        .await?;
    Ok(lines)
}

use log::{debug, trace};
use shop_common::Price;
use sqlx::SqliteConnection;

use crate::{
    db::{
        sqlite::{cart, products, SqliteDatabaseError},
        traits::CheckoutResult,
    },
    db_types::{Order, OrderId, OrderItem, ProductId, UserId},
    helpers::pricing::order_total,
};

/// Converts the user's cart into a pending order. This is not atomic on its own; run it inside a transaction and
/// pass `&mut *tx` as the connection.
///
/// The cart lines are claimed (deleted) before anything else is read, which takes the write lock for the transaction.
/// If a later step fails, the enclosing transaction must be rolled back, restoring the cart.
pub async fn checkout_cart(user_id: &UserId, conn: &mut SqliteConnection) -> Result<CheckoutResult, SqliteDatabaseError> {
    let lines = cart::take_cart_lines(user_id, conn).await?;
    if lines.is_empty() {
        return Err(SqliteDatabaseError::EmptyCart(user_id.to_string()));
    }
    let mut priced = Vec::with_capacity(lines.len());
    for (product_id, quantity) in lines {
        let price = products::product_price(&product_id, conn).await?;
        priced.push((product_id, quantity, price));
    }
    let total = order_total(priced.iter().map(|(_, quantity, price)| (*price, *quantity)))
        .ok_or_else(|| SqliteDatabaseError::AmountOverflow(format!("cart of user {user_id}")))?;
    let order_id = insert_order(user_id, total, conn).await?;
    for (product_id, quantity, price) in &priced {
        insert_order_item(&order_id, product_id, *quantity, *price, conn).await?;
    }
    debug!("🗃️ Cart of user {user_id} converted to order {order_id} with {} items. Total: {total}", priced.len());
    Ok(CheckoutResult { order_id, total_price: total })
}

/// Creates a pending order for one unit of the product at its current price. The cart is not touched.
pub async fn instant_buy(
    user_id: &UserId,
    product_id: &ProductId,
    conn: &mut SqliteConnection,
) -> Result<CheckoutResult, SqliteDatabaseError> {
    let price = products::product_price(product_id, conn).await?;
    let order_id = insert_order(user_id, price, conn).await?;
    insert_order_item(&order_id, product_id, 1, price, conn).await?;
    debug!("🗃️ Instant order {order_id} created for user {user_id}. Total: {price}");
    Ok(CheckoutResult { order_id, total_price: price })
}

async fn insert_order(user_id: &UserId, total: Price, conn: &mut SqliteConnection) -> Result<OrderId, SqliteDatabaseError> {
    let order_id = OrderId::random();
    let total = total.to_db().map_err(|e| SqliteDatabaseError::AmountOverflow(e.to_string()))?;
    sqlx::query("INSERT INTO orders (id, user_id, total_price, status) VALUES ($1, $2, $3, 'pending')")
        .bind(&order_id)
        .bind(user_id)
        .bind(total)
        .execute(conn)
        .await?;
    trace!("🗃️ Order {order_id} inserted");
    Ok(order_id)
}

async fn insert_order_item(
    order_id: &OrderId,
    product_id: &ProductId,
    quantity: u32,
    unit_price: Price,
    conn: &mut SqliteConnection,
) -> Result<(), SqliteDatabaseError> {
    let unit_price = unit_price.to_db().map_err(|e| SqliteDatabaseError::AmountOverflow(e.to_string()))?;
    sqlx::query("INSERT INTO order_items (order_id, product_id, quantity, unit_price) VALUES ($1, $2, $3, $4)")
        .bind(order_id)
        .bind(product_id)
        .bind(quantity)
        .bind(unit_price)
        .execute(conn)
        .await?;
    Ok(())
}

pub async fn fetch_order(order_id: &OrderId, conn: &mut SqliteConnection) -> Result<Option<Order>, SqliteDatabaseError> {
    let order = sqlx::query_as("SELECT id, user_id, total_price, status, created_at FROM orders WHERE id = $1")
        .bind(order_id)
        .fetch_optional(conn)
        .await?;
    Ok(order)
}

pub async fn fetch_order_items(
    order_id: &OrderId,
    conn: &mut SqliteConnection,
) -> Result<Vec<OrderItem>, SqliteDatabaseError> {
    let items = sqlx::query_as(
        "SELECT order_id, product_id, quantity, unit_price FROM order_items WHERE order_id = $1 ORDER BY product_id",
    )
    .bind(order_id)
    .fetch_all(conn)
    .await?;
    Ok(items)
}

pub async fn fetch_orders_for_user(
    user_id: &UserId,
    conn: &mut SqliteConnection,
) -> Result<Vec<Order>, SqliteDatabaseError> {
    let orders = sqlx::query_as(
        "SELECT id, user_id, total_price, status, created_at FROM orders WHERE user_id = $1 ORDER BY created_at DESC, id",
    )
    .bind(user_id)
    .fetch_all(conn)
    .await?;
    Ok(orders)
}

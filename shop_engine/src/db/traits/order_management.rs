use crate::{
    db_types::{Order, OrderId, OrderItem, UserId},
    shop_api::errors::StoreError,
};

/// The `OrderManagement` trait defines the behaviour for querying information about placed orders.
#[allow(async_fn_in_trait)]
pub trait OrderManagement {
    async fn order_by_id(&self, order_id: &OrderId) -> Result<Option<Order>, StoreError>;

    async fn order_items(&self, order_id: &OrderId) -> Result<Vec<OrderItem>, StoreError>;

    /// Returns the user's orders, most recent first.
    async fn orders_for_user(&self, user_id: &UserId) -> Result<Vec<Order>, StoreError>;
}

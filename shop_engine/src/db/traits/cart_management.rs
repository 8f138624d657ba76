use crate::{
    db_types::{CartItem, ProductId, UserId},
    shop_api::errors::CartError,
};

#[allow(async_fn_in_trait)]
pub trait CartManagement {
    /// Adds one unit of the product to the user's cart. A new line is created with a quantity of one, or the
    /// existing line's quantity is incremented. The upsert is a single statement, so concurrent calls for the same
    /// user and product never produce a second line.
    ///
    /// Returns the new quantity of the line, or [`CartError::ProductNotFound`] if the product does not exist.
    async fn add_or_increment(&self, user_id: &UserId, product_id: &ProductId) -> Result<u32, CartError>;

    /// Removes the line for the product from the user's cart, whatever its quantity.
    /// Returns [`CartError::LineNotFound`] if there was no such line.
    async fn remove_line(&self, user_id: &UserId, product_id: &ProductId) -> Result<(), CartError>;

    /// Fetches the user's cart lines, joined with the current product details.
    async fn fetch_cart(&self, user_id: &UserId) -> Result<Vec<CartItem>, CartError>;
}

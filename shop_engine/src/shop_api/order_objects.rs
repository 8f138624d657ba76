use serde::{Deserialize, Serialize};
use shop_common::Price;

use crate::db_types::CartItem;

/// The contents of a user's cart, priced at current catalog prices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSummary {
    pub items: Vec<CartItem>,
    pub total_price: Price,
}

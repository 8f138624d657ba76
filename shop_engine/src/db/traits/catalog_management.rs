use crate::{
    db_types::{NewProduct, Product, ProductId},
    shop_api::errors::CatalogError,
};

/// Read and insert access to the product catalog. Products are never updated once created.
#[allow(async_fn_in_trait)]
pub trait CatalogManagement {
    async fn insert_product(&self, product: NewProduct) -> Result<ProductId, CatalogError>;

    /// Returns every product, ordered by name.
    async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError>;

    /// Returns the products whose name contains `name`, ignoring case, ordered by name.
    async fn search_products(&self, name: &str) -> Result<Vec<Product>, CatalogError>;

    async fn fetch_product(&self, product_id: &ProductId) -> Result<Option<Product>, CatalogError>;
}

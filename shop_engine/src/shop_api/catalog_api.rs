use std::fmt::Debug;

use log::*;

use crate::{
    db::traits::CatalogManagement,
    db_types::{NewProduct, Product, ProductId},
    helpers::validate_new_product,
    shop_api::errors::CatalogError,
};

pub struct CatalogApi<B> {
    db: B,
}

impl<B: Debug> Debug for CatalogApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CatalogApi ({:?})", self.db)
    }
}

impl<B> CatalogApi<B>
where B: CatalogManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    pub async fn add_product(&self, product: NewProduct) -> Result<ProductId, CatalogError> {
        validate_new_product(&product).map_err(CatalogError::InvalidProduct)?;
        let name = product.name.clone();
        let id = self.db.insert_product(product).await?;
        info!("🛒️ New product '{name}' added to the catalog with id {id}");
        Ok(id)
    }

    pub async fn products(&self) -> Result<Vec<Product>, CatalogError> {
        self.db.fetch_products().await
    }

    pub async fn search(&self, name: &str) -> Result<Vec<Product>, CatalogError> {
        let products = self.db.search_products(name.trim()).await?;
        trace!("🛒️ Search for '{name}' matched {} products", products.len());
        Ok(products)
    }

    pub async fn product(&self, product_id: &ProductId) -> Result<Product, CatalogError> {
        self.db.fetch_product(product_id).await?.ok_or(CatalogError::ProductNotFound)
    }
}

use std::collections::HashMap;

use cucumber::World;
use log::*;
use shop_engine::{
    db_types::{ProductId, UserId},
    CheckoutResult,
    SqliteDatabase,
};

use crate::support::prepare_env::prepare_test_env;

#[derive(Default, Debug, World)]
pub struct ShopWorld {
    pub system: Option<ShopSystem>,
}

#[derive(Debug)]
pub struct ShopSystem {
    pub db: SqliteDatabase,
    pub users: HashMap<String, UserId>,
    pub products: HashMap<String, ProductId>,
    pub last_result: Option<Result<CheckoutResult, shop_engine::CheckoutError>>,
}

impl ShopWorld {
    pub fn system(&mut self) -> &mut ShopSystem {
        self.system.as_mut().expect("Shop system not initialised")
    }

    pub fn db(&self) -> &SqliteDatabase {
        &self.system.as_ref().expect("Shop system not initialised").db
    }
}

impl ShopSystem {
    pub async fn new() -> Self {
        let db = prepare_test_env().await;
        debug!("Created database: {}", db.url());
        Self { db, users: HashMap::new(), products: HashMap::new(), last_result: None }
    }

    pub fn user(&self, name: &str) -> UserId {
        self.users.get(name).cloned().unwrap_or_else(|| panic!("Unknown user {name}"))
    }

    pub fn product(&self, name: &str) -> ProductId {
        self.products.get(name).cloned().unwrap_or_else(|| panic!("Unknown product {name}"))
    }
}

use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shop_common::Price;
use sqlx::{FromRow, Type};
use thiserror::Error;
use uuid::Uuid;

//--------------------------------------     Identifiers     ---------------------------------------------------------
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Invalid identifier: {0}")]
pub struct IdParseError(String);

/// Declares a newtype around a UUID string. Ids are generated by the engine and stored as TEXT.
macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Type, Serialize, Deserialize)]
        #[sqlx(transparent)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn random() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl FromStr for $name {
            type Err = IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s.trim())
                    .map(|id| Self(id.to_string()))
                    .map_err(|e| IdParseError(format!("'{s}' is not a valid {}. {e}", stringify!($name))))
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

uuid_id!(UserId);
uuid_id!(ProductId);
uuid_id!(AddressId);
uuid_id!(
    /// The public identifier of an order. Orders are never renumbered or reused.
    OrderId
);

//--------------------------------------       Product       ---------------------------------------------------------
/// A catalog entry. Products are immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "product_id")]
    pub id: ProductId,
    #[serde(rename = "product_name")]
    pub name: String,
    #[sqlx(try_from = "i64")]
    pub price: Price,
    pub rating: Option<u8>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    #[serde(rename = "product_name")]
    pub name: String,
    pub price: Price,
    #[serde(default)]
    pub rating: Option<u8>,
    #[serde(default)]
    pub image: Option<String>,
}

impl NewProduct {
    pub fn new<S: Into<String>>(name: S, price: Price) -> Self {
        Self { name: name.into(), price, rating: None, image: None }
    }

    pub fn with_rating(mut self, rating: u8) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn with_image<S: Into<String>>(mut self, image: S) -> Self {
        self.image = Some(image.into());
        self
    }
}

//--------------------------------------      CartItem       ---------------------------------------------------------
/// A cart line joined with the product it refers to, priced at the current catalog price.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: ProductId,
    pub product_name: String,
    #[sqlx(try_from = "i64")]
    pub price: Price,
    pub rating: Option<u8>,
    pub image: Option<String>,
    pub quantity: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

//--------------------------------------   OrderStatusType   ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatusType {
    /// The order has been recorded. No settlement has taken place.
    Pending,
}

impl Display for OrderStatusType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatusType::Pending => write!(f, "pending"),
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("Invalid order status: {0}")]
pub struct OrderStatusConversionError(String);

impl FromStr for OrderStatusType {
    type Err = OrderStatusConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            s => Err(OrderStatusConversionError(s.to_string())),
        }
    }
}

impl TryFrom<String> for OrderStatusType {
    type Error = OrderStatusConversionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

//--------------------------------------        Order        ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    #[sqlx(try_from = "i64")]
    pub total_price: Price,
    #[sqlx(try_from = "String")]
    pub status: OrderStatusType,
    pub created_at: DateTime<Utc>,
}

/// A single line of an order. The unit price is a copy of the catalog price at the moment of purchase.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct OrderItem {
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub quantity: u32,
    #[sqlx(try_from = "i64")]
    pub unit_price: Price,
}

//--------------------------------------       Address       ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Address {
    #[serde(rename = "address_id")]
    pub id: AddressId,
    pub user_id: UserId,
    #[serde(rename = "house_name")]
    pub house: String,
    #[serde(rename = "street_name")]
    pub street: String,
    #[serde(rename = "city_name")]
    pub city: String,
    #[serde(rename = "pincode_name")]
    pub pincode: String,
    #[serde(rename = "state_name")]
    pub state: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The postal fields of an address, as supplied by the owner on create and update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressFields {
    #[serde(rename = "house_name", default)]
    pub house: String,
    #[serde(rename = "street_name", default)]
    pub street: String,
    #[serde(rename = "city_name", default)]
    pub city: String,
    #[serde(rename = "pincode_name", default)]
    pub pincode: String,
    #[serde(rename = "state_name", default)]
    pub state: Option<String>,
}

//--------------------------------------        User         ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "user_id")]
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub token: Option<String>,
    pub refresh_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Signup details as submitted by a prospective user. The password is in plain text and is hashed before it is stored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewUser {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub password: String,
}

/// A freshly issued pair of session credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserTokens {
    pub token: String,
    pub refresh_token: String,
}

/// The row that is written to the users table on signup.
#[derive(Debug, Clone)]
pub struct NewUserRecord {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub password_hash: String,
    pub tokens: UserTokens,
}

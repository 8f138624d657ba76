pub mod password;
pub mod pricing;
mod validation;

pub use validation::{validate_new_product, validate_new_user};

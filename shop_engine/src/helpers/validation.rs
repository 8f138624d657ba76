use crate::db_types::{NewProduct, NewUser};

const MIN_NAME_LENGTH: usize = 2;
const MAX_NAME_LENGTH: usize = 30;
const MIN_PASSWORD_LENGTH: usize = 6;

/// Checks signup details. The error message names the first offending field.
pub fn validate_new_user(user: &NewUser) -> Result<(), String> {
    check_name("first_name", &user.first_name)?;
    check_name("last_name", &user.last_name)?;
    if user.password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(format!("password must be at least {MIN_PASSWORD_LENGTH} characters"));
    }
    if !is_valid_email(&user.email) {
        return Err("email is not a valid email address".to_string());
    }
    if user.phone.trim().is_empty() {
        return Err("phone is required".to_string());
    }
    Ok(())
}

pub fn validate_new_product(product: &NewProduct) -> Result<(), String> {
    if product.name.trim().is_empty() {
        return Err("product_name is required".to_string());
    }
    if product.price.to_db().is_err() {
        return Err(format!("price must not exceed {}", i64::MAX));
    }
    Ok(())
}

fn check_name(field: &str, value: &str) -> Result<(), String> {
    let len = value.trim().chars().count();
    if !(MIN_NAME_LENGTH..=MAX_NAME_LENGTH).contains(&len) {
        return Err(format!("{field} must be between {MIN_NAME_LENGTH} and {MAX_NAME_LENGTH} characters"));
    }
    Ok(())
}

fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty() &&
        !domain.contains('@') &&
        domain.split('.').count() >= 2 &&
        domain.split('.').all(|label| !label.is_empty())
}

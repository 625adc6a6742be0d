//! Text input as a user would type it, coerced into request drafts.
//!
//! Only numeric parsing happens here. Required fields, price sign and
//! references are the server's business.

use std::str::FromStr;

use thiserror::Error;

use crate::domain::{NewOrder, NewProduct, NewUser};

#[derive(Debug, Error, PartialEq)]
pub enum FormError {
    #[error("{field} must be a number, got '{value}'")]
    InvalidNumber { field: &'static str, value: String },
}

fn parse_number<T: FromStr>(field: &'static str, value: &str) -> Result<T, FormError> {
    value.trim().parse().map_err(|_| FormError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

/// Prices must be finite: `inf` and `NaN` parse as `f64` but have no JSON
/// number form.
fn parse_price(value: &str) -> Result<f64, FormError> {
    let price: f64 = parse_number("price", value)?;
    if price.is_finite() {
        Ok(price)
    } else {
        Err(FormError::InvalidNumber {
            field: "price",
            value: value.to_string(),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct UserForm {
    pub name: String,
    pub email: String,
}

impl From<&UserForm> for NewUser {
    fn from(form: &UserForm) -> Self {
        NewUser {
            name: form.name.clone(),
            email: form.email.clone(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProductForm {
    pub name: String,
    pub price: String,
    pub description: String,
}

impl TryFrom<&ProductForm> for NewProduct {
    type Error = FormError;

    fn try_from(form: &ProductForm) -> Result<Self, Self::Error> {
        Ok(NewProduct {
            name: form.name.clone(),
            price: parse_price(&form.price)?,
            description: Some(form.description.clone()),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct OrderForm {
    pub user_id: String,
    pub product_id: String,
    pub quantity: String,
}

impl TryFrom<&OrderForm> for NewOrder {
    type Error = FormError;

    fn try_from(form: &OrderForm) -> Result<Self, Self::Error> {
        Ok(NewOrder {
            user_id: parse_number("user_id", &form.user_id)?,
            product_id: parse_number("product_id", &form.product_id)?,
            quantity: parse_number("quantity", &form.quantity)?,
        })
    }
}

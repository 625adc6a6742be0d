use chrono::Utc;

use crate::domain::errors::DomainError;
use crate::domain::ports::{OrderRepository, ProductRepository, UserRepository};
use crate::domain::{NewOrder, NewProduct, NewUser, Order, Product, User};

/// Server-side rules of the contract: required fields, non-negative prices,
/// positive quantities, existing references and the derived order total.
pub struct CatalogService<R> {
    repo: R,
}

impl<R> CatalogService<R>
where
    R: UserRepository + ProductRepository + OrderRepository,
{
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    // ── Users ────────────────────────────────────────────────────────────────

    pub fn create_user(&self, user: NewUser) -> Result<User, DomainError> {
        if user.name.trim().is_empty() || user.email.trim().is_empty() {
            return Err(DomainError::InvalidInput(
                "Name and email are required".to_string(),
            ));
        }
        self.repo.insert_user(user)
    }

    pub fn get_user(&self, id: i64) -> Result<User, DomainError> {
        self.repo.find_user(id)?.ok_or(DomainError::NotFound("User"))
    }

    pub fn list_users(&self) -> Result<Vec<User>, DomainError> {
        self.repo.list_users()
    }

    pub fn delete_user(&self, id: i64) -> Result<(), DomainError> {
        if self.repo.delete_user(id)? {
            Ok(())
        } else {
            Err(DomainError::NotFound("User"))
        }
    }

    // ── Products ─────────────────────────────────────────────────────────────

    pub fn create_product(&self, product: NewProduct) -> Result<Product, DomainError> {
        if product.name.trim().is_empty() {
            return Err(DomainError::InvalidInput(
                "Name and price are required".to_string(),
            ));
        }
        if !product.price.is_finite() || product.price < 0.0 {
            return Err(DomainError::InvalidInput(
                "Price must be non-negative".to_string(),
            ));
        }
        self.repo.insert_product(product)
    }

    pub fn get_product(&self, id: i64) -> Result<Product, DomainError> {
        self.repo
            .find_product(id)?
            .ok_or(DomainError::NotFound("Product"))
    }

    pub fn list_products(&self) -> Result<Vec<Product>, DomainError> {
        self.repo.list_products()
    }

    pub fn delete_product(&self, id: i64) -> Result<(), DomainError> {
        if self.repo.delete_product(id)? {
            Ok(())
        } else {
            Err(DomainError::NotFound("Product"))
        }
    }

    // ── Orders ───────────────────────────────────────────────────────────────

    pub fn place_order(&self, order: NewOrder) -> Result<Order, DomainError> {
        if order.quantity <= 0 {
            return Err(DomainError::InvalidInput(
                "Quantity must be positive".to_string(),
            ));
        }

        // Both references are checked before anything is written.
        self.get_user(order.user_id)?;
        let product = self.get_product(order.product_id)?;

        let total_price = product.price * f64::from(order.quantity);
        self.repo.insert_order(order, total_price, Utc::now())
    }

    pub fn get_order(&self, id: i64) -> Result<Order, DomainError> {
        self.repo.find_order(id)?.ok_or(DomainError::NotFound("Order"))
    }

    pub fn list_orders(&self) -> Result<Vec<Order>, DomainError> {
        self.repo.list_orders()
    }
}

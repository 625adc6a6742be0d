use chrono::{DateTime, Utc};

use super::errors::DomainError;
use super::order::{NewOrder, Order};
use super::product::{NewProduct, Product};
use super::user::{NewUser, User};

pub trait UserRepository: Send + Sync + 'static {
    /// Fails with `Conflict` when the email is already registered.
    fn insert_user(&self, user: NewUser) -> Result<User, DomainError>;
    fn find_user(&self, id: i64) -> Result<Option<User>, DomainError>;
    fn list_users(&self) -> Result<Vec<User>, DomainError>;
    /// Returns `false` when no user had that id.
    fn delete_user(&self, id: i64) -> Result<bool, DomainError>;
}

pub trait ProductRepository: Send + Sync + 'static {
    fn insert_product(&self, product: NewProduct) -> Result<Product, DomainError>;
    fn find_product(&self, id: i64) -> Result<Option<Product>, DomainError>;
    fn list_products(&self) -> Result<Vec<Product>, DomainError>;
    fn delete_product(&self, id: i64) -> Result<bool, DomainError>;
}

pub trait OrderRepository: Send + Sync + 'static {
    fn insert_order(
        &self,
        order: NewOrder,
        total_price: f64,
        created_at: DateTime<Utc>,
    ) -> Result<Order, DomainError>;
    fn find_order(&self, id: i64) -> Result<Option<Order>, DomainError>;
    fn list_orders(&self) -> Result<Vec<Order>, DomainError>;
}

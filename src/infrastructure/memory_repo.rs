use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};

use crate::domain::errors::DomainError;
use crate::domain::ports::{OrderRepository, ProductRepository, UserRepository};
use crate::domain::{NewOrder, NewProduct, NewUser, Order, Product, User};

// ── Storage ───────────────────────────────────────────────────────────────────

/// Rows keyed by id; `BTreeMap` keeps listings in id order.
#[derive(Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    products: BTreeMap<i64, Product>,
    orders: BTreeMap<i64, Order>,
    last_user_id: i64,
    last_product_id: i64,
    last_order_id: i64,
}

fn next_id(last: &mut i64) -> i64 {
    *last += 1;
    *last
}

// ── Repository ────────────────────────────────────────────────────────────────

/// Process-local store backing the reference server. Ids start at 1 and are
/// never reused after a delete.
#[derive(Default)]
pub struct InMemoryRepository {
    tables: Mutex<Tables>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, DomainError> {
        self.tables
            .lock()
            .map_err(|e| DomainError::Internal(format!("store lock poisoned: {}", e)))
    }
}

impl UserRepository for InMemoryRepository {
    fn insert_user(&self, user: NewUser) -> Result<User, DomainError> {
        let mut tables = self.lock()?;

        if tables.users.values().any(|u| u.email == user.email) {
            return Err(DomainError::Conflict("Email already exists".to_string()));
        }

        let id = next_id(&mut tables.last_user_id);
        let row = User {
            id,
            name: user.name,
            email: user.email,
        };
        tables.users.insert(id, row.clone());
        Ok(row)
    }

    fn find_user(&self, id: i64) -> Result<Option<User>, DomainError> {
        Ok(self.lock()?.users.get(&id).cloned())
    }

    fn list_users(&self) -> Result<Vec<User>, DomainError> {
        Ok(self.lock()?.users.values().cloned().collect())
    }

    fn delete_user(&self, id: i64) -> Result<bool, DomainError> {
        Ok(self.lock()?.users.remove(&id).is_some())
    }
}

impl ProductRepository for InMemoryRepository {
    fn insert_product(&self, product: NewProduct) -> Result<Product, DomainError> {
        let mut tables = self.lock()?;
        let id = next_id(&mut tables.last_product_id);
        let row = Product {
            id,
            name: product.name,
            price: product.price,
            description: product.description,
        };
        tables.products.insert(id, row.clone());
        Ok(row)
    }

    fn find_product(&self, id: i64) -> Result<Option<Product>, DomainError> {
        Ok(self.lock()?.products.get(&id).cloned())
    }

    fn list_products(&self) -> Result<Vec<Product>, DomainError> {
        Ok(self.lock()?.products.values().cloned().collect())
    }

    fn delete_product(&self, id: i64) -> Result<bool, DomainError> {
        Ok(self.lock()?.products.remove(&id).is_some())
    }
}

impl OrderRepository for InMemoryRepository {
    fn insert_order(
        &self,
        order: NewOrder,
        total_price: f64,
        created_at: DateTime<Utc>,
    ) -> Result<Order, DomainError> {
        let mut tables = self.lock()?;
        let id = next_id(&mut tables.last_order_id);
        let row = Order {
            id,
            user_id: order.user_id,
            product_id: order.product_id,
            quantity: order.quantity,
            total_price,
            created_at,
        };
        tables.orders.insert(id, row.clone());
        Ok(row)
    }

    fn find_order(&self, id: i64) -> Result<Option<Order>, DomainError> {
        Ok(self.lock()?.orders.get(&id).cloned())
    }

    fn list_orders(&self) -> Result<Vec<Order>, DomainError> {
        Ok(self.lock()?.orders.values().cloned().collect())
    }
}

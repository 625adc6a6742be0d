use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::request::Transport;
use super::ClientError;
use crate::domain::{NewOrder, NewProduct, NewUser, Order, Product, User};

/// A collection exposed at `{base_url}/{PATH}`.
pub trait Resource {
    /// What the server returns when listing.
    type Record: DeserializeOwned;
    /// What the caller sends when creating: user-supplied fields only.
    type Draft: Serialize;

    const PATH: &'static str;
    const SINGULAR: &'static str;
    const PLURAL: &'static str;
}

/// `GET {PATH}` is part of the contract.
pub trait Listable: Resource {}

/// `POST {PATH}` is part of the contract.
pub trait Creatable: Resource {}

/// `DELETE {PATH}/{id}` is part of the contract.
pub trait Deletable: Resource {}

pub struct Users;

impl Resource for Users {
    type Record = User;
    type Draft = NewUser;
    const PATH: &'static str = "users";
    const SINGULAR: &'static str = "user";
    const PLURAL: &'static str = "users";
}

impl Listable for Users {}
impl Creatable for Users {}
impl Deletable for Users {}

pub struct Products;

impl Resource for Products {
    type Record = Product;
    type Draft = NewProduct;
    const PATH: &'static str = "products";
    const SINGULAR: &'static str = "product";
    const PLURAL: &'static str = "products";
}

impl Listable for Products {}
impl Creatable for Products {}
impl Deletable for Products {}

/// Orders cannot be deleted.
pub struct Orders;

impl Resource for Orders {
    type Record = Order;
    type Draft = NewOrder;
    const PATH: &'static str = "orders";
    const SINGULAR: &'static str = "order";
    const PLURAL: &'static str = "orders";
}

impl Listable for Orders {}
impl Creatable for Orders {}

// ── Facade ───────────────────────────────────────────────────────────────────

/// Operations for one resource. Which methods exist depends on the
/// capability traits `R` implements.
pub struct Facade<'a, R> {
    transport: &'a Transport,
    resource: PhantomData<fn() -> R>,
}

impl<'a, R: Resource> Facade<'a, R> {
    pub(crate) fn new(transport: &'a Transport) -> Self {
        Self {
            transport,
            resource: PhantomData,
        }
    }
}

impl<R: Listable> Facade<'_, R> {
    /// Every record, in the order the server returned them.
    pub async fn list(&self) -> Result<Vec<R::Record>, ClientError> {
        let fallback = format!("Failed to fetch {}", R::PLURAL);
        let url = self.transport.url(R::PATH);
        let response = self
            .transport
            .execute(self.transport.http().get(&url), &fallback)
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| {
            log::warn!("GET {} returned an unreadable {} list: {}", url, R::SINGULAR, e);
            ClientError::Api {
                status: status.as_u16(),
                message: fallback,
            }
        })
    }
}

impl<R: Creatable> Facade<'_, R> {
    /// Create a record. The response body is not read; list again to see
    /// the server-assigned fields.
    pub async fn create(&self, draft: &R::Draft) -> Result<(), ClientError> {
        let fallback = format!("Failed to create {}", R::SINGULAR);
        let request = self
            .transport
            .http()
            .post(self.transport.url(R::PATH))
            .json(draft);
        self.transport.execute(request, &fallback).await?;
        Ok(())
    }
}

impl<R: Deletable> Facade<'_, R> {
    pub async fn delete(&self, id: i64) -> Result<(), ClientError> {
        let fallback = format!("Failed to delete {}", R::SINGULAR);
        let url = self.transport.url(&format!("{}/{}", R::PATH, id));
        self.transport
            .execute(self.transport.http().delete(url), &fallback)
            .await?;
        Ok(())
    }
}

//! Caller-side coordination around the client: one busy flag, one timed
//! notice, and the cached lists that get refetched after every mutation.

use std::time::{Duration, Instant};

use thiserror::Error;

use crate::client::{ApiClient, ClientError, Listable, Orders, Products, Users};
use crate::domain::{NewOrder, NewProduct, NewUser, Order, Product, User};
use crate::forms::{FormError, OrderForm, ProductForm, UserForm};

/// How long a notice stays visible.
pub const NOTICE_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
    pub expires_at: Instant,
}

// ── State ────────────────────────────────────────────────────────────────────

/// At most one operation in flight and at most one notice at a time.
#[derive(Debug, Default)]
pub struct ConsoleState {
    busy: bool,
    notice: Option<Notice>,
}

impl ConsoleState {
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Mark an operation as started. Returns `false` if one already is.
    pub fn try_begin(&mut self) -> bool {
        if self.busy {
            return false;
        }
        self.busy = true;
        true
    }

    pub fn finish(&mut self) {
        self.busy = false;
    }

    /// Replace whatever notice is showing.
    pub fn post(&mut self, kind: NoticeKind, text: impl Into<String>, now: Instant) {
        self.notice = Some(Notice {
            kind,
            text: text.into(),
            expires_at: now + NOTICE_TTL,
        });
    }

    /// The current notice, unless it has expired by `now`.
    pub fn notice(&self, now: Instant) -> Option<&Notice> {
        self.notice.as_ref().filter(|n| now < n.expires_at)
    }

    /// Drop the notice once it has expired.
    pub fn expire(&mut self, now: Instant) {
        if self.notice(now).is_none() {
            self.notice = None;
        }
    }
}

// ── Controller ───────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
enum Failure {
    #[error(transparent)]
    Form(#[from] FormError),
    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Drives the three facades the way an interactive front end does:
/// mutate, announce the outcome, refetch.
pub struct Console {
    client: ApiClient,
    state: ConsoleState,
    users: Vec<User>,
    products: Vec<Product>,
    orders: Vec<Order>,
}

impl Console {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            state: ConsoleState::default(),
            users: Vec::new(),
            products: Vec::new(),
            orders: Vec::new(),
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn state(&self) -> &ConsoleState {
        &self.state
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.state.notice(Instant::now())
    }

    /// Fetch all three collections, one after the other.
    pub async fn load(&mut self) {
        self.refresh_users().await;
        self.refresh_products().await;
        self.refresh_orders().await;
    }

    pub async fn refresh_users(&mut self) {
        if let Some(users) = self.fetch::<Users>().await {
            self.users = users;
        }
    }

    pub async fn refresh_products(&mut self) {
        if let Some(products) = self.fetch::<Products>().await {
            self.products = products;
        }
    }

    pub async fn refresh_orders(&mut self) {
        if let Some(orders) = self.fetch::<Orders>().await {
            self.orders = orders;
        }
    }

    /// Returns whether the user was created.
    pub async fn submit_user(&mut self, form: &UserForm) -> bool {
        if !self.state.try_begin() {
            return false;
        }
        let draft = NewUser::from(form);
        let outcome = self.client.users().create(&draft).await;
        let created = self.conclude(outcome.map_err(Failure::from), "User created successfully");
        if created {
            self.refresh_users().await;
        }
        self.state.finish();
        created
    }

    pub async fn submit_product(&mut self, form: &ProductForm) -> bool {
        if !self.state.try_begin() {
            return false;
        }
        let outcome = match NewProduct::try_from(form) {
            Ok(draft) => self.client.products().create(&draft).await.map_err(Failure::from),
            Err(e) => Err(e.into()),
        };
        let created = self.conclude(outcome, "Product created successfully");
        if created {
            self.refresh_products().await;
        }
        self.state.finish();
        created
    }

    pub async fn submit_order(&mut self, form: &OrderForm) -> bool {
        if !self.state.try_begin() {
            return false;
        }
        let outcome = match NewOrder::try_from(form) {
            Ok(draft) => self.client.orders().create(&draft).await.map_err(Failure::from),
            Err(e) => Err(e.into()),
        };
        let created = self.conclude(outcome, "Order created successfully");
        if created {
            self.refresh_orders().await;
        }
        self.state.finish();
        created
    }

    /// Delete without asking; confirming first is up to the caller.
    pub async fn remove_user(&mut self, id: i64) -> bool {
        if !self.state.try_begin() {
            return false;
        }
        let outcome = self.client.users().delete(id).await;
        let removed = self.conclude(outcome.map_err(Failure::from), "User deleted successfully");
        if removed {
            self.refresh_users().await;
        }
        self.state.finish();
        removed
    }

    pub async fn remove_product(&mut self, id: i64) -> bool {
        if !self.state.try_begin() {
            return false;
        }
        let outcome = self.client.products().delete(id).await;
        let removed = self.conclude(outcome.map_err(Failure::from), "Product deleted successfully");
        if removed {
            self.refresh_products().await;
        }
        self.state.finish();
        removed
    }

    async fn fetch<R: Listable>(&mut self) -> Option<Vec<R::Record>> {
        match self.client.resource::<R>().list().await {
            Ok(records) => Some(records),
            Err(e) => {
                self.state.post(NoticeKind::Error, e.to_string(), Instant::now());
                None
            }
        }
    }

    fn conclude(&mut self, outcome: Result<(), Failure>, success: &str) -> bool {
        let now = Instant::now();
        match outcome {
            Ok(()) => {
                self.state.post(NoticeKind::Success, success, now);
                true
            }
            Err(failure) => {
                self.state.post(NoticeKind::Error, failure.to_string(), now);
                false
            }
        }
    }
}

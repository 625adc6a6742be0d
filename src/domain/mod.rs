pub mod errors;
pub mod order;
pub mod ports;
pub mod product;
pub mod user;

pub use order::{NewOrder, Order};
pub use product::{NewProduct, Product};
pub use user::{NewUser, User};

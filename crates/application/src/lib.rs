//! Application services and persistence ports.

#![forbid(unsafe_code)]

mod ports;
mod product_service;
mod user_service;

pub use ports::{ChangeLogRepository, ProductRepository, StatusLogRepository, UserRepository};
pub use product_service::ProductService;
pub use user_service::UserService;

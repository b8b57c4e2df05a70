//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod in_memory_change_log_repository;
mod in_memory_product_repository;
mod in_memory_status_log_repository;
mod in_memory_user_repository;
mod postgres_change_log_repository;
mod postgres_product_repository;
mod postgres_status_log_repository;
mod postgres_user_repository;

pub use in_memory_change_log_repository::InMemoryChangeLogRepository;
pub use in_memory_product_repository::InMemoryProductRepository;
pub use in_memory_status_log_repository::InMemoryStatusLogRepository;
pub use in_memory_user_repository::InMemoryUserRepository;
pub use postgres_change_log_repository::PostgresChangeLogRepository;
pub use postgres_product_repository::PostgresProductRepository;
pub use postgres_status_log_repository::PostgresStatusLogRepository;
pub use postgres_user_repository::PostgresUserRepository;

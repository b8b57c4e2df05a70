use std::collections::HashMap;

use async_trait::async_trait;
use flexup_application::ProductRepository;
use flexup_core::{AccountId, AppError, AppResult, RecordId};
use flexup_domain::{Product, Status, Visibility};
use tokio::sync::RwLock;

#[cfg(test)]
mod tests;

/// In-memory product repository implementation.
#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    products: RwLock<HashMap<RecordId, Product>>,
}

impl InMemoryProductRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            products: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn insert(&self, product: Product) -> AppResult<()> {
        let mut products = self.products.write().await;

        if products.contains_key(&product.id()) {
            return Err(AppError::Conflict(format!(
                "product '{}' already exists",
                product.id()
            )));
        }

        products.insert(product.id(), product);
        Ok(())
    }

    async fn update(&self, product: Product) -> AppResult<()> {
        let mut products = self.products.write().await;

        if !products.contains_key(&product.id()) {
            return Err(AppError::NotFound(format!(
                "no product with id '{}'",
                product.id()
            )));
        }

        products.insert(product.id(), product);
        Ok(())
    }

    async fn find(&self, id: RecordId) -> AppResult<Option<Product>> {
        Ok(self.products.read().await.get(&id).cloned())
    }

    async fn list_for_account(&self, account_id: AccountId) -> AppResult<Vec<Product>> {
        let products = self.products.read().await;

        let mut values: Vec<Product> = products
            .values()
            .filter(|product| product.account_id() == account_id)
            .cloned()
            .collect();
        values.sort_by(|left, right| left.name().cmp(right.name()));

        Ok(values)
    }

    async fn list_public_active(&self) -> AppResult<Vec<Product>> {
        let products = self.products.read().await;

        let mut values: Vec<Product> = products
            .values()
            .filter(|product| {
                product.status() == Status::Active && product.visibility() == Visibility::Public
            })
            .cloned()
            .collect();
        values.sort_by(|left, right| left.name().cmp(right.name()));

        Ok(values)
    }
}

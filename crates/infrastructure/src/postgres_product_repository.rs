//! PostgreSQL-backed product repository.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use flexup_application::ProductRepository;
use flexup_core::{AccountId, AppError, AppResult, RecordId};
use flexup_domain::{
    Currency, Focus, Product, ProductInput, Status, SystemUnit, Visibility, codec,
};

#[cfg(test)]
mod tests;

/// PostgreSQL implementation of the product repository port.
#[derive(Clone)]
pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ProductRow {
    id: uuid::Uuid,
    account_id: uuid::Uuid,
    name: String,
    currency: Option<String>,
    price_excluding_tax: Option<f64>,
    tax_rate: Option<f64>,
    description: Option<String>,
    system_unit: Option<String>,
    custom_unit: Option<String>,
    status: String,
    visibility: String,
    focus: String,
}

impl TryFrom<ProductRow> for Product {
    type Error = AppError;

    fn try_from(row: ProductRow) -> AppResult<Self> {
        let input = ProductInput {
            name: row.name,
            currency: codec::decode_optional::<Currency>(row.currency.as_deref())?,
            price_excluding_tax: row.price_excluding_tax,
            tax_rate: row.tax_rate,
            description: row.description,
            system_unit: codec::decode_optional::<SystemUnit>(row.system_unit.as_deref())?,
            custom_unit: row.custom_unit,
            status: codec::decode::<Status>(&row.status)?,
            visibility: codec::decode::<Visibility>(&row.visibility)?,
            focus: codec::decode::<Focus>(&row.focus)?,
        };

        Product::new(
            RecordId::from_uuid(row.id),
            AccountId::from_uuid(row.account_id),
            input,
        )
    }
}

const SELECT_COLUMNS: &str = r"
    id,
    account_id,
    name,
    currency,
    price_excluding_tax,
    tax_rate,
    description,
    system_unit,
    custom_unit,
    status,
    visibility,
    focus
";

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn insert(&self, product: Product) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO products (
                id, account_id, name, currency, price_excluding_tax, tax_rate,
                description, system_unit, custom_unit, status, visibility, focus
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ",
        )
        .bind(product.id().as_uuid())
        .bind(product.account_id().as_uuid())
        .bind(product.name())
        .bind(codec::encode_optional(product.currency()))
        .bind(product.price_excluding_tax())
        .bind(product.tax_rate())
        .bind(product.description())
        .bind(codec::encode_optional(product.system_unit()))
        .bind(product.custom_unit())
        .bind(codec::encode(product.status()))
        .bind(codec::encode(product.visibility()))
        .bind(codec::encode(product.focus()))
        .execute(&self.pool)
        .await
        .map_err(id_conflict_or_internal)?;

        Ok(())
    }

    async fn update(&self, product: Product) -> AppResult<()> {
        let result = sqlx::query(
            r"
            UPDATE products
            SET
                name = $2,
                currency = $3,
                price_excluding_tax = $4,
                tax_rate = $5,
                description = $6,
                system_unit = $7,
                custom_unit = $8,
                status = $9,
                visibility = $10,
                focus = $11
            WHERE id = $1
            ",
        )
        .bind(product.id().as_uuid())
        .bind(product.name())
        .bind(codec::encode_optional(product.currency()))
        .bind(product.price_excluding_tax())
        .bind(product.tax_rate())
        .bind(product.description())
        .bind(codec::encode_optional(product.system_unit()))
        .bind(product.custom_unit())
        .bind(codec::encode(product.status()))
        .bind(codec::encode(product.visibility()))
        .bind(codec::encode(product.focus()))
        .execute(&self.pool)
        .await
        .map_err(|error| query_failed(error, "update product"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "no product with id '{}'",
                product.id()
            )));
        }

        Ok(())
    }

    async fn find(&self, id: RecordId) -> AppResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| query_failed(error, "find product"))?;

        row.map(Product::try_from).transpose()
    }

    async fn list_for_account(&self, account_id: AccountId) -> AppResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM products WHERE account_id = $1 ORDER BY name"
        ))
        .bind(account_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| query_failed(error, "list products for account"))?;

        rows.into_iter().map(Product::try_from).collect()
    }

    async fn list_public_active(&self) -> AppResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM products WHERE status = $1 AND visibility = $2 ORDER BY name"
        ))
        .bind(codec::encode(Status::Active))
        .bind(codec::encode(Visibility::Public))
        .fetch_all(&self.pool)
        .await
        .map_err(|error| query_failed(error, "list public products"))?;

        rows.into_iter().map(Product::try_from).collect()
    }
}

fn id_conflict_or_internal(error: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(ref database_error) = error
        && database_error.code().as_deref() == Some("23505")
    {
        return AppError::Conflict("a product with this id already exists".to_owned());
    }

    query_failed(error, "insert product")
}

fn query_failed(error: sqlx::Error, operation: &str) -> AppError {
    tracing::error!(%error, operation, "product repository query failed");
    AppError::Internal(format!("failed to {operation}: {error}"))
}

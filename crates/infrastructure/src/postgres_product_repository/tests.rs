use flexup_application::ProductRepository;
use flexup_core::{AccountId, RecordId};
use flexup_domain::{Currency, Product, ProductInput, Status, SystemUnit, Visibility};
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;

use super::PostgresProductRepository;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

async fn test_pool() -> Option<PgPool> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        return None;
    };

    let pool = match PgPoolOptions::new()
        .max_connections(2)
        .connect(database_url.as_str())
        .await
    {
        Ok(pool) => pool,
        Err(error) => panic!("failed to connect to DATABASE_URL in test: {error}"),
    };

    if let Err(error) = MIGRATOR.run(&pool).await {
        panic!("failed to run migrations for postgres product tests: {error}");
    }

    Some(pool)
}

fn priced_product(account_id: AccountId, name: &str) -> Product {
    let input = ProductInput {
        name: name.to_owned(),
        currency: Some(Currency::Eur),
        price_excluding_tax: Some(100.0),
        tax_rate: Some(20.0),
        description: Some("A test offering".to_owned()),
        system_unit: Some(SystemUnit::Kilogram),
        ..ProductInput::default()
    };
    match Product::new(RecordId::new(), account_id, input) {
        Ok(product) => product,
        Err(_) => unreachable!(),
    }
}

#[tokio::test]
async fn insert_and_find_round_trip() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresProductRepository::new(pool);
    let stored = priced_product(AccountId::new(), "Postgres widget");

    let insert = repository.insert(stored.clone()).await;
    assert!(insert.is_ok());

    let found = repository.find(stored.id()).await;
    assert_eq!(found.unwrap_or_default(), Some(stored));
}

#[tokio::test]
async fn update_rewrites_fields_and_unknown_ids_are_not_found() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresProductRepository::new(pool);
    let account_id = AccountId::new();
    let mut stored = priced_product(account_id, "Before rename");

    let insert = repository.insert(stored.clone()).await;
    assert!(insert.is_ok());

    let apply = stored.apply(ProductInput {
        name: "After rename".to_owned(),
        currency: Some(Currency::Usd),
        price_excluding_tax: Some(120.0),
        status: Status::Active,
        visibility: Visibility::Public,
        ..ProductInput::default()
    });
    assert!(apply.is_ok());
    let update = repository.update(stored.clone()).await;
    assert!(update.is_ok());

    let found = repository.find(stored.id()).await.unwrap_or_default();
    assert!(found.is_some_and(|product| product.name() == "After rename"));

    let missing = priced_product(account_id, "Never stored");
    assert!(repository.update(missing).await.is_err());
}

#[tokio::test]
async fn public_listing_excludes_private_and_inactive_products() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresProductRepository::new(pool);
    let account_id = AccountId::new();

    let mut listed = priced_product(account_id, "Listed offer");
    let activate = listed.apply(ProductInput {
        name: "Listed offer".to_owned(),
        currency: Some(Currency::Eur),
        price_excluding_tax: Some(100.0),
        status: Status::Active,
        visibility: Visibility::Public,
        ..ProductInput::default()
    });
    assert!(activate.is_ok());
    let hidden = priced_product(account_id, "Hidden draft");

    let insert_listed = repository.insert(listed.clone()).await;
    assert!(insert_listed.is_ok());
    let insert_hidden = repository.insert(hidden.clone()).await;
    assert!(insert_hidden.is_ok());

    let public = repository.list_public_active().await.unwrap_or_default();
    let ids: Vec<RecordId> = public.iter().map(Product::id).collect();
    assert!(ids.contains(&listed.id()));
    assert!(!ids.contains(&hidden.id()));

    let own = repository.list_for_account(account_id).await.unwrap_or_default();
    assert_eq!(own.len(), 2);
}

use flexup_application::ProductRepository;
use flexup_core::{AccountId, AppError, RecordId};
use flexup_domain::{Currency, Product, ProductInput, Status, Visibility};

use super::InMemoryProductRepository;

fn product(account_id: AccountId, name: &str, status: Status, visibility: Visibility) -> Product {
    let input = ProductInput {
        name: name.to_owned(),
        currency: Some(Currency::Eur),
        price_excluding_tax: Some(10.0),
        status,
        visibility,
        ..ProductInput::default()
    };
    match Product::new(RecordId::new(), account_id, input) {
        Ok(product) => product,
        Err(_) => unreachable!(),
    }
}

#[tokio::test]
async fn insert_and_find_round_trip() {
    let repository = InMemoryProductRepository::new();
    let account_id = AccountId::new();
    let stored = product(account_id, "Widget", Status::Draft, Visibility::Private);

    assert!(repository.insert(stored.clone()).await.is_ok());

    let found = repository.find(stored.id()).await;
    assert_eq!(found.unwrap_or_default(), Some(stored));
}

#[tokio::test]
async fn inserting_the_same_id_twice_is_a_conflict() {
    let repository = InMemoryProductRepository::new();
    let stored = product(
        AccountId::new(),
        "Widget",
        Status::Draft,
        Visibility::Private,
    );

    assert!(repository.insert(stored.clone()).await.is_ok());
    let second = repository.insert(stored).await;
    assert!(matches!(second, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn updating_an_unknown_product_is_not_found() {
    let repository = InMemoryProductRepository::new();
    let stored = product(
        AccountId::new(),
        "Widget",
        Status::Draft,
        Visibility::Private,
    );

    let result = repository.update(stored).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn list_for_account_does_not_leak_other_accounts() {
    let repository = InMemoryProductRepository::new();
    let left_account = AccountId::new();
    let right_account = AccountId::new();

    let insert_left = repository
        .insert(product(
            left_account,
            "Left",
            Status::Draft,
            Visibility::Private,
        ))
        .await;
    assert!(insert_left.is_ok());
    let insert_right = repository
        .insert(product(
            right_account,
            "Right",
            Status::Draft,
            Visibility::Private,
        ))
        .await;
    assert!(insert_right.is_ok());

    let listed = repository.list_for_account(left_account).await;
    let names: Vec<String> = listed
        .unwrap_or_default()
        .iter()
        .map(|product| product.name().to_owned())
        .collect();
    assert_eq!(names, vec!["Left".to_owned()]);
}

#[tokio::test]
async fn list_public_active_filters_on_status_and_visibility() {
    let repository = InMemoryProductRepository::new();
    let account_id = AccountId::new();

    for (name, status, visibility) in [
        ("Listed", Status::Active, Visibility::Public),
        ("Hidden draft", Status::Draft, Visibility::Public),
        ("Private offer", Status::Active, Visibility::Private),
    ] {
        let insert = repository
            .insert(product(account_id, name, status, visibility))
            .await;
        assert!(insert.is_ok());
    }

    let listed = repository.list_public_active().await;
    let names: Vec<String> = listed
        .unwrap_or_default()
        .iter()
        .map(|product| product.name().to_owned())
        .collect();
    assert_eq!(names, vec!["Listed".to_owned()]);
}

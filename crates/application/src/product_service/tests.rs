use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use flexup_core::{AccountId, AppError, AppResult, RecordId};
use flexup_domain::{
    BusinessDomain, ChangeEntry, Currency, MemberContext, MemberRole, Product, ProductInput,
    Status, StatusAction, StatusLogEntry, Visibility,
};
use tokio::sync::Mutex;

use crate::ports::{ChangeLogRepository, ProductRepository, StatusLogRepository};

use super::ProductService;

#[derive(Default)]
struct FakeProductRepository {
    products: Mutex<HashMap<RecordId, Product>>,
}

#[async_trait]
impl ProductRepository for FakeProductRepository {
    async fn insert(&self, product: Product) -> AppResult<()> {
        let mut products = self.products.lock().await;
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
        let mut products = self.products.lock().await;
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
        Ok(self.products.lock().await.get(&id).cloned())
    }

    async fn list_for_account(&self, account_id: AccountId) -> AppResult<Vec<Product>> {
        Ok(self
            .products
            .lock()
            .await
            .values()
            .filter(|product| product.account_id() == account_id)
            .cloned()
            .collect())
    }

    async fn list_public_active(&self) -> AppResult<Vec<Product>> {
        Ok(self
            .products
            .lock()
            .await
            .values()
            .filter(|product| {
                product.status() == Status::Active && product.visibility() == Visibility::Public
            })
            .cloned()
            .collect())
    }
}

#[derive(Default)]
struct FakeStatusLogRepository {
    entries: Mutex<Vec<StatusLogEntry>>,
}

#[async_trait]
impl StatusLogRepository for FakeStatusLogRepository {
    async fn append(&self, entry: StatusLogEntry) -> AppResult<()> {
        self.entries.lock().await.push(entry);
        Ok(())
    }

    async fn list_for_record(
        &self,
        domain: BusinessDomain,
        record_id: RecordId,
    ) -> AppResult<Vec<StatusLogEntry>> {
        let mut entries: Vec<StatusLogEntry> = self
            .entries
            .lock()
            .await
            .iter()
            .filter(|entry| entry.domain() == domain && entry.record_id() == record_id)
            .cloned()
            .collect();
        entries.reverse();
        Ok(entries)
    }
}

#[derive(Default)]
struct FakeChangeLogRepository {
    entries: Mutex<Vec<ChangeEntry>>,
}

#[async_trait]
impl ChangeLogRepository for FakeChangeLogRepository {
    async fn append(&self, entry: ChangeEntry) -> AppResult<()> {
        self.entries.lock().await.push(entry);
        Ok(())
    }

    async fn list_for_record(
        &self,
        domain: BusinessDomain,
        record_id: RecordId,
    ) -> AppResult<Vec<ChangeEntry>> {
        let mut entries: Vec<ChangeEntry> = self
            .entries
            .lock()
            .await
            .iter()
            .filter(|entry| entry.domain() == domain && entry.record_id() == record_id)
            .cloned()
            .collect();
        entries.reverse();
        Ok(entries)
    }
}

fn service() -> ProductService {
    ProductService::new(
        Arc::new(FakeProductRepository::default()),
        Arc::new(FakeStatusLogRepository::default()),
        Arc::new(FakeChangeLogRepository::default()),
    )
}

fn editor(account_id: AccountId) -> MemberContext {
    MemberContext::new(account_id, MemberRole::Editor, Status::Active)
}

fn priced_input(name: &str) -> ProductInput {
    ProductInput {
        name: name.to_owned(),
        currency: Some(Currency::Eur),
        price_excluding_tax: Some(50.0),
        tax_rate: Some(20.0),
        ..ProductInput::default()
    }
}

#[tokio::test]
async fn create_records_the_initial_status() {
    let service = service();
    let account_id = AccountId::new();
    let context = editor(account_id);

    let product = service
        .create_product(Some(&context), account_id, priced_input("Widget"))
        .await
        .unwrap_or_else(|_| unreachable!());

    let history = service
        .status_history(product.id())
        .await
        .unwrap_or_default();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].initial_status(), None);
    assert_eq!(history[0].new_status(), Some(Status::Draft));
    assert_eq!(history[0].recorded_by(), Some(account_id));
    assert!(!history[0].by_system());
}

#[tokio::test]
async fn viewer_role_cannot_create_products() {
    let service = service();
    let account_id = AccountId::new();
    let context = MemberContext::new(account_id, MemberRole::Viewer, Status::Active);

    let result = service
        .create_product(Some(&context), account_id, priced_input("Widget"))
        .await;
    assert!(matches!(result, Err(AppError::Forbidden(_))));
}

#[tokio::test]
async fn creating_for_another_account_is_forbidden() {
    let service = service();
    let context = editor(AccountId::new());

    let result = service
        .create_product(Some(&context), AccountId::new(), priced_input("Widget"))
        .await;
    assert!(matches!(result, Err(AppError::Forbidden(_))));
}

#[tokio::test]
async fn system_actions_bypass_membership_checks() {
    let service = service();

    let result = service
        .create_product(None, AccountId::new(), priced_input("Widget"))
        .await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn update_appends_field_changes() {
    let service = service();
    let account_id = AccountId::new();
    let context = editor(account_id);

    let product = service
        .create_product(Some(&context), account_id, priced_input("Widget"))
        .await
        .unwrap_or_else(|_| unreachable!());

    let updated = service
        .update_product(
            Some(&context),
            product.id(),
            ProductInput {
                price_excluding_tax: Some(60.0),
                ..priced_input("Widget")
            },
        )
        .await;
    assert!(updated.is_ok());

    let changes = service
        .change_history(product.id())
        .await
        .unwrap_or_default();
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].changes().len(), 1);
    assert_eq!(changes[0].changes()[0].field_name(), "price_excluding_tax");
}

#[tokio::test]
async fn update_without_differences_logs_nothing() {
    let service = service();
    let account_id = AccountId::new();
    let context = editor(account_id);

    let product = service
        .create_product(Some(&context), account_id, priced_input("Widget"))
        .await
        .unwrap_or_else(|_| unreachable!());

    let result = service
        .update_product(Some(&context), product.id(), priced_input("Widget"))
        .await;
    assert!(result.is_ok());

    let changes = service
        .change_history(product.id())
        .await
        .unwrap_or_default();
    assert!(changes.is_empty());
}

#[tokio::test]
async fn change_status_appends_to_the_status_log() {
    let service = service();
    let account_id = AccountId::new();
    let context = editor(account_id);

    let product = service
        .create_product(Some(&context), account_id, priced_input("Widget"))
        .await
        .unwrap_or_else(|_| unreachable!());

    let activated = service
        .change_status(
            Some(&context),
            product.id(),
            StatusAction::Confirm,
            Status::Active,
        )
        .await;
    assert!(activated.is_ok());

    let history = service
        .status_history(product.id())
        .await
        .unwrap_or_default();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].action(), Some(StatusAction::Confirm));
    assert_eq!(history[0].initial_status(), Some(Status::Draft));
    assert_eq!(history[0].new_status(), Some(Status::Active));
}

#[tokio::test]
async fn change_status_rejects_statuses_outside_the_short_list() {
    let service = service();
    let account_id = AccountId::new();
    let context = editor(account_id);

    let product = service
        .create_product(Some(&context), account_id, priced_input("Widget"))
        .await
        .unwrap_or_else(|_| unreachable!());

    let result = service
        .change_status(
            Some(&context),
            product.id(),
            StatusAction::Confirm,
            Status::Confirmed,
        )
        .await;
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn duplicate_creates_a_pending_copy() {
    let service = service();
    let account_id = AccountId::new();
    let context = editor(account_id);

    let product = service
        .create_product(Some(&context), account_id, priced_input("Widget"))
        .await
        .unwrap_or_else(|_| unreachable!());

    let copy = service
        .duplicate_product(Some(&context), product.id())
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(copy.name(), "Widget (copy)");
    assert_eq!(copy.status(), Status::Pending);
    assert_ne!(copy.id(), product.id());
}

#[tokio::test]
async fn hidden_products_report_as_not_found_to_strangers() {
    let service = service();
    let account_id = AccountId::new();
    let context = editor(account_id);

    let product = service
        .create_product(Some(&context), account_id, priced_input("Widget"))
        .await
        .unwrap_or_else(|_| unreachable!());

    // The owner sees the draft, a stranger does not.
    assert!(service.get_product(Some(&context), product.id()).await.is_ok());
    let stranger = editor(AccountId::new());
    let result = service.get_product(Some(&stranger), product.id()).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[test]
fn form_choices_cover_the_product_short_lists() {
    let statuses = ProductService::status_choices();
    assert!(statuses.iter().any(|choice| choice.code == "PE"));
    assert!(statuses.iter().all(|choice| choice.code != "CF"));

    let visibilities = ProductService::visibility_choices();
    assert_eq!(visibilities.len(), 2);

    let currencies = ProductService::currency_choices();
    assert!(currencies.iter().any(|choice| choice.code == "EUR"));
}

#[tokio::test]
async fn catalogue_merges_own_and_public_products() {
    let service = service();
    let account_id = AccountId::new();
    let context = editor(account_id);
    let other_account = AccountId::new();
    let other_context = editor(other_account);

    let own = service
        .create_product(Some(&context), account_id, priced_input("Own draft"))
        .await
        .unwrap_or_else(|_| unreachable!());

    let public = service
        .create_product(
            Some(&other_context),
            other_account,
            ProductInput {
                status: Status::Active,
                visibility: Visibility::Public,
                ..priced_input("Public offer")
            },
        )
        .await
        .unwrap_or_else(|_| unreachable!());

    let hidden = service
        .create_product(Some(&other_context), other_account, priced_input("Hidden"))
        .await
        .unwrap_or_else(|_| unreachable!());

    let catalogue = service
        .list_catalogue(Some(&context))
        .await
        .unwrap_or_default();
    let ids: Vec<_> = catalogue.iter().map(Product::id).collect();
    assert!(ids.contains(&own.id()));
    assert!(ids.contains(&public.id()));
    assert!(!ids.contains(&hidden.id()));

    let anonymous = service.list_catalogue(None).await.unwrap_or_default();
    let ids: Vec<_> = anonymous.iter().map(Product::id).collect();
    assert_eq!(ids, vec![public.id()]);
}

use std::sync::Arc;

use chrono::Utc;
use flexup_core::{AccountId, AppError, AppResult, RecordId};
use flexup_domain::{
    BusinessDomain, ChangeEntry, Choice, Currency, MemberContext, Product, ProductInput, Status,
    StatusAction, StatusLogEntry, Visibility, authorize_mutation, lookup, product_statuses,
    product_visibilities,
};

use crate::ports::{ChangeLogRepository, ProductRepository, StatusLogRepository};

#[cfg(test)]
mod tests;

/// Application service for the product catalogue.
///
/// Every mutation authorizes the acting member against the product domain,
/// appends the status log on lifecycle changes and the change log on field
/// edits.
#[derive(Clone)]
pub struct ProductService {
    products: Arc<dyn ProductRepository>,
    status_log: Arc<dyn StatusLogRepository>,
    change_log: Arc<dyn ChangeLogRepository>,
}

impl ProductService {
    /// Creates a new product service from repository implementations.
    #[must_use]
    pub fn new(
        products: Arc<dyn ProductRepository>,
        status_log: Arc<dyn StatusLogRepository>,
        change_log: Arc<dyn ChangeLogRepository>,
    ) -> Self {
        Self {
            products,
            status_log,
            change_log,
        }
    }

    /// Creates a product owned by the account.
    pub async fn create_product(
        &self,
        context: Option<&MemberContext>,
        account_id: AccountId,
        input: ProductInput,
    ) -> AppResult<Product> {
        authorize_mutation(context, BusinessDomain::Product, Some(account_id))?;

        let product = Product::new(RecordId::new(), account_id, input)?;
        self.products.insert(product.clone()).await?;

        self.append_status_entry(context, &product, None, None, Some(product.status()))
            .await?;

        Ok(product)
    }

    /// Updates a product's fields from a full input.
    pub async fn update_product(
        &self,
        context: Option<&MemberContext>,
        id: RecordId,
        input: ProductInput,
    ) -> AppResult<Product> {
        let mut product = self.require_product(id).await?;
        authorize_mutation(context, BusinessDomain::Product, Some(product.account_id()))?;

        let previous_status = product.status();
        let old_snapshot = product.field_values();
        product.apply(input)?;
        self.products.update(product.clone()).await?;

        let entry = ChangeEntry::from_snapshots(
            RecordId::new(),
            BusinessDomain::Product,
            product.id(),
            context.map(MemberContext::account_id),
            Utc::now(),
            &old_snapshot,
            &product.field_values(),
        );
        if !entry.is_empty() {
            self.change_log.append(entry).await?;
        }

        if product.status() != previous_status {
            self.append_status_entry(
                context,
                &product,
                Some(StatusAction::Modify),
                Some(previous_status),
                Some(product.status()),
            )
            .await?;
        }

        Ok(product)
    }

    /// Applies a lifecycle action moving the product to a new status.
    pub async fn change_status(
        &self,
        context: Option<&MemberContext>,
        id: RecordId,
        action: StatusAction,
        new_status: Status,
    ) -> AppResult<Product> {
        let mut product = self.require_product(id).await?;
        authorize_mutation(context, BusinessDomain::Product, Some(product.account_id()))?;

        let previous_status = product.status();
        product.set_status(new_status)?;
        self.products.update(product.clone()).await?;

        self.append_status_entry(
            context,
            &product,
            Some(action),
            Some(previous_status),
            Some(new_status),
        )
        .await?;

        Ok(product)
    }

    /// Duplicates a product into a new pending copy.
    pub async fn duplicate_product(
        &self,
        context: Option<&MemberContext>,
        id: RecordId,
    ) -> AppResult<Product> {
        let product = self.require_product(id).await?;
        authorize_mutation(context, BusinessDomain::Product, Some(product.account_id()))?;

        let copy = product.duplicate(RecordId::new());
        self.products.insert(copy.clone()).await?;

        self.append_status_entry(context, &copy, None, None, Some(copy.status()))
            .await?;

        Ok(copy)
    }

    /// Returns a product the viewer is allowed to see.
    ///
    /// Owners see their own products; everyone else only sees active, public
    /// ones. Hidden products report as not found.
    pub async fn get_product(
        &self,
        viewer: Option<&MemberContext>,
        id: RecordId,
    ) -> AppResult<Product> {
        let product = self.require_product(id).await?;
        if Self::visible_to(viewer, &product) {
            Ok(product)
        } else {
            Err(AppError::NotFound(format!("no product with id '{id}'")))
        }
    }

    /// Lists the products the viewer may see: their own account's products
    /// plus the active, public products of other accounts.
    pub async fn list_catalogue(
        &self,
        viewer: Option<&MemberContext>,
    ) -> AppResult<Vec<Product>> {
        let mut catalogue = match viewer {
            Some(context) => self.products.list_for_account(context.account_id()).await?,
            None => Vec::new(),
        };

        for product in self.products.list_public_active().await? {
            if !catalogue.iter().any(|known| known.id() == product.id()) {
                catalogue.push(product);
            }
        }

        Ok(catalogue)
    }

    /// Returns the status choices offered on product forms.
    #[must_use]
    pub fn status_choices() -> Vec<Choice> {
        product_statuses().choices()
    }

    /// Returns the visibility choices offered on product forms.
    #[must_use]
    pub fn visibility_choices() -> Vec<Choice> {
        product_visibilities().choices()
    }

    /// Returns the currency choices offered on product forms.
    #[must_use]
    pub fn currency_choices() -> Vec<Choice> {
        lookup::choices::<Currency>()
    }

    /// Returns the status history of a product, newest first.
    pub async fn status_history(&self, id: RecordId) -> AppResult<Vec<StatusLogEntry>> {
        self.status_log
            .list_for_record(BusinessDomain::Product, id)
            .await
    }

    /// Returns the field change history of a product, newest first.
    pub async fn change_history(&self, id: RecordId) -> AppResult<Vec<ChangeEntry>> {
        self.change_log
            .list_for_record(BusinessDomain::Product, id)
            .await
    }

    async fn require_product(&self, id: RecordId) -> AppResult<Product> {
        self.products
            .find(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("no product with id '{id}'")))
    }

    async fn append_status_entry(
        &self,
        context: Option<&MemberContext>,
        product: &Product,
        action: Option<StatusAction>,
        initial_status: Option<Status>,
        new_status: Option<Status>,
    ) -> AppResult<()> {
        let entry = StatusLogEntry::new(
            RecordId::new(),
            BusinessDomain::Product,
            product.id(),
            action,
            initial_status,
            new_status,
            context.map(MemberContext::account_id),
            context.is_none(),
            Utc::now(),
        )?;

        self.status_log.append(entry).await
    }

    fn visible_to(viewer: Option<&MemberContext>, product: &Product) -> bool {
        if let Some(context) = viewer
            && context.account_id() == product.account_id()
        {
            return true;
        }

        product.status() == Status::Active && product.visibility() == Visibility::Public
    }
}

use async_trait::async_trait;
use flexup_core::{AccountId, AppResult, RecordId, UserId};
use flexup_domain::{BusinessDomain, ChangeEntry, EmailAddress, Product, StatusLogEntry, UserAccount};

/// Repository port for product persistence.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Inserts a new product.
    ///
    /// Fails with a conflict when the identifier is already taken.
    async fn insert(&self, product: Product) -> AppResult<()>;

    /// Replaces an existing product.
    async fn update(&self, product: Product) -> AppResult<()>;

    /// Looks up a product by identifier.
    async fn find(&self, id: RecordId) -> AppResult<Option<Product>>;

    /// Lists the products owned by an account.
    async fn list_for_account(&self, account_id: AccountId) -> AppResult<Vec<Product>>;

    /// Lists the active, publicly visible products of every account.
    async fn list_public_active(&self) -> AppResult<Vec<Product>>;
}

/// Repository port for user persistence.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a new user.
    ///
    /// Fails with a conflict when the email address is already registered.
    async fn insert(&self, user: UserAccount) -> AppResult<()>;

    /// Replaces an existing user.
    async fn update(&self, user: UserAccount) -> AppResult<()>;

    /// Looks up a user by identifier.
    async fn find(&self, id: UserId) -> AppResult<Option<UserAccount>>;

    /// Looks up a user by email address.
    async fn find_by_email(&self, email: &EmailAddress) -> AppResult<Option<UserAccount>>;
}

/// Repository port for the append-only status log.
#[async_trait]
pub trait StatusLogRepository: Send + Sync {
    /// Appends a status log entry.
    async fn append(&self, entry: StatusLogEntry) -> AppResult<()>;

    /// Lists the entries of one record, newest first.
    async fn list_for_record(
        &self,
        domain: BusinessDomain,
        record_id: RecordId,
    ) -> AppResult<Vec<StatusLogEntry>>;
}

/// Repository port for the field change log.
#[async_trait]
pub trait ChangeLogRepository: Send + Sync {
    /// Appends a change entry.
    async fn append(&self, entry: ChangeEntry) -> AppResult<()>;

    /// Lists the entries of one record, newest first.
    async fn list_for_record(
        &self,
        domain: BusinessDomain,
        record_id: RecordId,
    ) -> AppResult<Vec<ChangeEntry>>;
}

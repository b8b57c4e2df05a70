//! Account membership roles and mutation permission checks.

use flexup_core::{AccountId, AppError, AppResult};
use serde::{Deserialize, Serialize};

use crate::business_domain::BusinessDomain;
use crate::registry::{FlexEnum, PropertyValue, members_of_table, undeclared_property};
use crate::status::Status;

/// Role a user holds inside an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberRole {
    /// Full control over the account and its records.
    Admin,
    /// May create and update transactional records.
    Editor,
    /// Read-only access.
    Viewer,
}

struct MemberRoleRow {
    member: MemberRole,
    code: &'static str,
    label: &'static str,
}

#[rustfmt::skip]
const MEMBER_ROLE_TABLE: &[MemberRoleRow] = &[
    MemberRoleRow { member: MemberRole::Admin,  code: "A", label: "Admin" },
    MemberRoleRow { member: MemberRole::Editor, code: "E", label: "Editor" },
    MemberRoleRow { member: MemberRole::Viewer, code: "V", label: "Viewer" },
];

members_of_table!(
    MEMBER_ROLE_MEMBERS,
    MemberRole,
    MEMBER_ROLE_TABLE,
    MemberRole::Admin
);

impl MemberRole {
    fn row(self) -> &'static MemberRoleRow {
        &MEMBER_ROLE_TABLE[self as usize]
    }
}

impl FlexEnum for MemberRole {
    fn members() -> &'static [Self] {
        &MEMBER_ROLE_MEMBERS
    }

    fn code(self) -> &'static str {
        self.row().code
    }

    fn label(self) -> &'static str {
        self.row().label
    }

    fn property_names() -> &'static [&'static str] {
        &["label"]
    }

    fn property(self, name: &str) -> AppResult<Option<PropertyValue>> {
        match name {
            "label" => Ok(Some(PropertyValue::text(self.row().label))),
            _ => Err(undeclared_property::<Self>(name)),
        }
    }
}

/// The acting member on whose behalf a mutation runs.
///
/// Services receive this explicitly with each call. A call without a context
/// is a system action and bypasses membership checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberContext {
    account_id: AccountId,
    role: MemberRole,
    status: Status,
}

impl MemberContext {
    /// Creates a member context.
    #[must_use]
    pub fn new(account_id: AccountId, role: MemberRole, status: Status) -> Self {
        Self {
            account_id,
            role,
            status,
        }
    }

    /// Returns the account the member belongs to.
    #[must_use]
    pub fn account_id(&self) -> AccountId {
        self.account_id
    }

    /// Returns the member's role.
    #[must_use]
    pub fn role(&self) -> MemberRole {
        self.role
    }

    /// Returns the member's own status.
    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }
}

/// Checks that the acting member may create or update a record of the given
/// domain, owned by `owner` when the record belongs to an account.
///
/// # Errors
///
/// Returns [`AppError::Forbidden`] when the member acts on another account's
/// record, is not active, or holds a role outside the domain's rights.
pub fn authorize_mutation(
    context: Option<&MemberContext>,
    domain: BusinessDomain,
    owner: Option<AccountId>,
) -> AppResult<()> {
    let Some(context) = context else {
        // System action.
        return Ok(());
    };

    if let Some(owner) = owner
        && context.account_id() != owner
    {
        return Err(AppError::Forbidden(
            "records of another account cannot be created or updated".to_owned(),
        ));
    }

    if context.status() != Status::Active {
        return Err(AppError::Forbidden(format!(
            "member is currently {}; only an active member can create or update records",
            context.status().label()
        )));
    }

    if !domain.rights().contains(&context.role()) {
        return Err(AppError::Forbidden(format!(
            "role '{}' may not create or update a {}",
            context.role().label(),
            domain.label()
        )));
    }

    Ok(())
}

/// Checks that the acting member may mutate a record shared between several
/// party accounts (e.g. client and supplier, payor and payee).
///
/// # Errors
///
/// Returns [`AppError::Forbidden`] when the member's account is not one of
/// the parties, or when the membership checks of [`authorize_mutation`] fail.
pub fn authorize_party_mutation(
    context: Option<&MemberContext>,
    domain: BusinessDomain,
    parties: &[AccountId],
) -> AppResult<()> {
    if let Some(context) = context
        && !parties.contains(&context.account_id())
    {
        return Err(AppError::Forbidden(
            "the acting account is not a party to the transaction".to_owned(),
        ));
    }

    authorize_mutation(context, domain, None)
}

#[cfg(test)]
mod tests {
    use flexup_core::AccountId;

    use super::{MemberContext, MemberRole, authorize_mutation, authorize_party_mutation};
    use crate::business_domain::BusinessDomain;
    use crate::status::Status;

    fn active(role: MemberRole) -> (AccountId, MemberContext) {
        let account_id = AccountId::new();
        (account_id, MemberContext::new(account_id, role, Status::Active))
    }

    #[test]
    fn system_action_is_always_allowed() {
        let result = authorize_mutation(None, BusinessDomain::Account, Some(AccountId::new()));
        assert!(result.is_ok());
    }

    #[test]
    fn owner_mismatch_is_forbidden() {
        let (_, context) = active(MemberRole::Admin);
        let result = authorize_mutation(
            Some(&context),
            BusinessDomain::Product,
            Some(AccountId::new()),
        );
        assert!(result.is_err());
    }

    #[test]
    fn inactive_member_is_forbidden() {
        let account_id = AccountId::new();
        let context = MemberContext::new(account_id, MemberRole::Admin, Status::Suspended);
        let result = authorize_mutation(Some(&context), BusinessDomain::Product, Some(account_id));
        assert!(result.is_err());
    }

    #[test]
    fn editor_may_mutate_transactional_domains_only() {
        let (account_id, context) = active(MemberRole::Editor);
        assert!(
            authorize_mutation(Some(&context), BusinessDomain::Product, Some(account_id)).is_ok()
        );
        assert!(
            authorize_mutation(Some(&context), BusinessDomain::Account, Some(account_id)).is_err()
        );
    }

    #[test]
    fn viewer_may_not_mutate() {
        let (account_id, context) = active(MemberRole::Viewer);
        let result = authorize_mutation(Some(&context), BusinessDomain::Product, Some(account_id));
        assert!(result.is_err());
    }

    #[test]
    fn system_domains_reject_every_member() {
        let (account_id, context) = active(MemberRole::Admin);
        let result =
            authorize_mutation(Some(&context), BusinessDomain::StatusLog, Some(account_id));
        assert!(result.is_err());
    }

    #[test]
    fn party_check_requires_membership_in_parties() {
        let (account_id, context) = active(MemberRole::Editor);
        let other = AccountId::new();
        assert!(
            authorize_party_mutation(
                Some(&context),
                BusinessDomain::Order,
                &[account_id, other]
            )
            .is_ok()
        );
        assert!(
            authorize_party_mutation(Some(&context), BusinessDomain::Order, &[other]).is_err()
        );
    }
}

//! Catalogue of the business record kinds handled by the platform.

use flexup_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

use crate::lookup;
use crate::member::MemberRole;
use crate::registry::{FlexEnum, PropertyValue, members_of_table, undeclared_property};

const TRANSACT: &[MemberRole] = &[MemberRole::Admin, MemberRole::Editor];
const ADMIN_ONLY: &[MemberRole] = &[MemberRole::Admin];
const SYSTEM_ONLY: &[MemberRole] = &[];

/// Kind of business record, with the roles allowed to mutate it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum BusinessDomain {
    Account,
    AccountingDocument,
    Charter,
    Commitment,
    Contract,
    Constituent,
    ContractPaymentStructure,
    ContractProduct,
    ContractTemplate,
    Custodian,
    Grouping,
    Individual,
    InterestPaymentTerm,
    LegalEntity,
    Lettering,
    Member,
    MyPaymentTerm,
    Order,
    OrderItem,
    Payment,
    PaymentStructure,
    PaymentTerm,
    Pocket,
    PrimaryPaymentTerm,
    Product,
    ResiduePaymentTerm,
    Resolution,
    StatusLog,
    Subaccount,
    ThirdParty,
    Tranche,
    User,
    Wallet,
    Unspecified,
}

struct BusinessDomainRow {
    member: BusinessDomain,
    code: &'static str,
    label: &'static str,
    plural: &'static str,
    entity: &'static str,
    rights: &'static [MemberRole],
}

#[rustfmt::skip]
const BUSINESS_DOMAIN_TABLE: &[BusinessDomainRow] = &[
    BusinessDomainRow { member: BusinessDomain::Account,                  code: "AC", label: "Account",                    plural: "Accounts",                    entity: "Account",                  rights: ADMIN_ONLY },
    BusinessDomainRow { member: BusinessDomain::AccountingDocument,       code: "AD", label: "Accounting document",        plural: "Accounting documents",        entity: "AccountingDocument",       rights: TRANSACT },
    BusinessDomainRow { member: BusinessDomain::Charter,                  code: "CH", label: "Charter",                    plural: "Charters",                    entity: "Charter",                  rights: ADMIN_ONLY },
    BusinessDomainRow { member: BusinessDomain::Commitment,               code: "CM", label: "Commitment",                 plural: "Commitments",                 entity: "Commitment",               rights: TRANSACT },
    BusinessDomainRow { member: BusinessDomain::Contract,                 code: "CO", label: "Contract",                   plural: "Contracts",                   entity: "Contract",                 rights: TRANSACT },
    BusinessDomainRow { member: BusinessDomain::Constituent,              code: "CN", label: "Constituent",                plural: "Constituents",                entity: "Constituent",              rights: ADMIN_ONLY },
    BusinessDomainRow { member: BusinessDomain::ContractPaymentStructure, code: "CS", label: "Contract payment structure", plural: "Contract payment structures", entity: "ContractPaymentStructure", rights: ADMIN_ONLY },
    BusinessDomainRow { member: BusinessDomain::ContractProduct,          code: "CP", label: "Contract product",           plural: "Contract products",           entity: "ContractProduct",          rights: TRANSACT },
    BusinessDomainRow { member: BusinessDomain::ContractTemplate,         code: "CT", label: "Contract template",          plural: "Contract templates",          entity: "ContractTemplate",         rights: SYSTEM_ONLY },
    BusinessDomainRow { member: BusinessDomain::Custodian,                code: "CU", label: "Custodian",                  plural: "Custodians",                  entity: "Custodian",                rights: SYSTEM_ONLY },
    BusinessDomainRow { member: BusinessDomain::Grouping,                 code: "GR", label: "Grouping",                   plural: "Groupings",                   entity: "Grouping",                 rights: ADMIN_ONLY },
    BusinessDomainRow { member: BusinessDomain::Individual,               code: "IN", label: "Individual",                 plural: "Individuals",                 entity: "Individual",               rights: ADMIN_ONLY },
    BusinessDomainRow { member: BusinessDomain::InterestPaymentTerm,      code: "IP", label: "Interest payment term",      plural: "Interest payment terms",      entity: "InterestPaymentTerm",      rights: TRANSACT },
    BusinessDomainRow { member: BusinessDomain::LegalEntity,              code: "LE", label: "Legal entity",               plural: "Legal entities",              entity: "LegalEntity",              rights: ADMIN_ONLY },
    BusinessDomainRow { member: BusinessDomain::Lettering,                code: "LT", label: "Lettering",                  plural: "Letterings",                  entity: "Lettering",                rights: TRANSACT },
    BusinessDomainRow { member: BusinessDomain::Member,                   code: "ME", label: "Account member",             plural: "Account members",             entity: "Member",                   rights: ADMIN_ONLY },
    BusinessDomainRow { member: BusinessDomain::MyPaymentTerm,            code: "MP", label: "My payment term",            plural: "My payment terms",            entity: "MyPaymentTerm",            rights: TRANSACT },
    BusinessDomainRow { member: BusinessDomain::Order,                    code: "OR", label: "Order",                      plural: "Orders",                      entity: "Order",                    rights: TRANSACT },
    BusinessDomainRow { member: BusinessDomain::OrderItem,                code: "OI", label: "Order item",                 plural: "Order items",                 entity: "OrderItem",                rights: TRANSACT },
    BusinessDomainRow { member: BusinessDomain::Payment,                  code: "PA", label: "Payment",                    plural: "Payments",                    entity: "Payment",                  rights: TRANSACT },
    BusinessDomainRow { member: BusinessDomain::PaymentStructure,         code: "PS", label: "Payment structure",          plural: "Payment structures",          entity: "PaymentStructure",         rights: TRANSACT },
    BusinessDomainRow { member: BusinessDomain::PaymentTerm,              code: "PT", label: "Payment term",               plural: "Payment terms",               entity: "PaymentTerm",              rights: TRANSACT },
    BusinessDomainRow { member: BusinessDomain::Pocket,                   code: "PO", label: "Pocket",                     plural: "Pockets",                     entity: "Pocket",                   rights: ADMIN_ONLY },
    BusinessDomainRow { member: BusinessDomain::PrimaryPaymentTerm,       code: "PP", label: "Primary payment term",       plural: "Primary payment terms",       entity: "PrimaryPaymentTerm",       rights: TRANSACT },
    BusinessDomainRow { member: BusinessDomain::Product,                  code: "PR", label: "Product",                    plural: "Products",                    entity: "Product",                  rights: TRANSACT },
    BusinessDomainRow { member: BusinessDomain::ResiduePaymentTerm,       code: "RP", label: "Residue payment term",       plural: "Residue payment terms",       entity: "ResiduePaymentTerm",       rights: TRANSACT },
    BusinessDomainRow { member: BusinessDomain::Resolution,               code: "RE", label: "Resolution",                 plural: "Resolutions",                 entity: "Resolution",               rights: ADMIN_ONLY },
    BusinessDomainRow { member: BusinessDomain::StatusLog,                code: "SL", label: "Status log",                 plural: "Status logs",                 entity: "StatusLog",                rights: SYSTEM_ONLY },
    BusinessDomainRow { member: BusinessDomain::Subaccount,               code: "SA", label: "Subaccount",                 plural: "Subaccounts",                 entity: "Subaccount",               rights: TRANSACT },
    BusinessDomainRow { member: BusinessDomain::ThirdParty,               code: "TP", label: "Third party",                plural: "Third parties",               entity: "ThirdParty",               rights: TRANSACT },
    BusinessDomainRow { member: BusinessDomain::Tranche,                  code: "TR", label: "Tranche",                    plural: "Tranches",                    entity: "Tranche",                  rights: TRANSACT },
    BusinessDomainRow { member: BusinessDomain::User,                     code: "US", label: "User",                       plural: "Users",                       entity: "User",                     rights: SYSTEM_ONLY },
    BusinessDomainRow { member: BusinessDomain::Wallet,                   code: "WA", label: "Wallet",                     plural: "Wallets",                     entity: "Wallet",                   rights: ADMIN_ONLY },
    BusinessDomainRow { member: BusinessDomain::Unspecified,              code: "UN", label: "Unspecified",                plural: "Unspecified",                 entity: "Unspecified",              rights: TRANSACT },
];

members_of_table!(
    BUSINESS_DOMAIN_MEMBERS,
    BusinessDomain,
    BUSINESS_DOMAIN_TABLE,
    BusinessDomain::Account
);

impl BusinessDomain {
    fn row(self) -> &'static BusinessDomainRow {
        &BUSINESS_DOMAIN_TABLE[self as usize]
    }

    /// Returns the plural label of this domain.
    #[must_use]
    pub fn plural(self) -> &'static str {
        self.row().plural
    }

    /// Returns the entity type name backing this domain.
    #[must_use]
    pub fn entity(self) -> &'static str {
        self.row().entity
    }

    /// Returns the roles allowed to create or update records of this domain.
    /// List-typed, so it is exposed here rather than through the name-based
    /// property lookup.
    #[must_use]
    pub fn rights(self) -> &'static [MemberRole] {
        self.row().rights
    }

    /// Resolves the domain responsible for an entity type name.
    ///
    /// # Errors
    ///
    /// Returns [`flexup_core::AppError::NotFound`] when no domain is declared
    /// for the entity.
    pub fn for_entity(name: &str) -> AppResult<Self> {
        lookup::find_by_property::<Self>("entity", &PropertyValue::text(name))?
            .into_iter()
            .next()
            .ok_or_else(|| {
                AppError::NotFound(format!("no domain is declared for entity '{name}'"))
            })
    }
}

impl FlexEnum for BusinessDomain {
    fn members() -> &'static [Self] {
        &BUSINESS_DOMAIN_MEMBERS
    }

    fn code(self) -> &'static str {
        self.row().code
    }

    fn label(self) -> &'static str {
        self.row().label
    }

    fn property_names() -> &'static [&'static str] {
        &["label", "plural", "entity"]
    }

    fn property(self, name: &str) -> AppResult<Option<PropertyValue>> {
        let row = self.row();
        match name {
            "label" => Ok(Some(PropertyValue::text(row.label))),
            "plural" => Ok(Some(PropertyValue::text(row.plural))),
            "entity" => Ok(Some(PropertyValue::text(row.entity))),
            _ => Err(undeclared_property::<Self>(name)),
        }
    }
}

impl std::fmt::Display for BusinessDomain {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.label())
    }
}

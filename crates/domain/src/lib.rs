//! Domain model of the FlexUp back office.
//!
//! The heart of the crate is the enum metadata framework: every enumerated
//! domain type ([`Status`], [`Currency`], [`SystemUnit`], ...) implements
//! [`FlexEnum`] over an immutable table of members and named properties, and
//! the [`lookup`] and [`codec`] modules query and persist those tables
//! generically. On top of it sit the business entities: products, users,
//! status logs and field change logs.

#![forbid(unsafe_code)]

mod business_domain;
mod change_log;
pub mod codec;
mod currency;
pub mod diff;
mod general;
pub mod lookup;
mod member;
mod product;
mod registry;
mod status;
mod status_log;
mod unit;
mod user;

pub use business_domain::BusinessDomain;
pub use change_log::{ChangeEntry, FieldChange};
pub use currency::Currency;
pub use general::{ContentOrigin, Focus, FocusGroup, Visibility};
pub use member::{
    MemberContext, MemberRole, authorize_mutation, authorize_party_mutation,
};
pub use product::{Product, ProductInput, product_statuses, product_visibilities};
pub use registry::{Choice, FlexEnum, PropertyValue, ShortList};
pub use status::{ActionMode, Status, StatusAction, Tone};
pub use status_log::StatusLogEntry;
pub use unit::{Dimension, SystemUnit, convert};
pub use user::{EmailAddress, UserAccount, user_statuses};

//! Products offered for sale by an account.

use flexup_core::{AccountId, AppError, AppResult, NonEmptyString, RecordId};
use serde::{Deserialize, Serialize};

use crate::currency::Currency;
use crate::general::{Focus, Visibility};
use crate::registry::{FlexEnum, ShortList};
use crate::status::Status;
use crate::unit::SystemUnit;

/// Statuses a product may take.
#[must_use]
pub fn product_statuses() -> ShortList<Status> {
    ShortList::new([
        Status::Draft,
        Status::Pending,
        Status::Active,
        Status::Paused,
        Status::Expired,
        Status::Suspended,
    ])
}

/// Visibilities a product may take.
#[must_use]
pub fn product_visibilities() -> ShortList<Visibility> {
    ShortList::new([Visibility::Private, Visibility::Public])
}

fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Formats an amount with a space as thousands separator and up to two
/// decimals, trailing zeros trimmed.
fn format_amount(value: f64) -> String {
    let text = format!("{value:.2}");
    let (integer_part, decimal_part) = match text.split_once('.') {
        Some((integer_part, decimal_part)) => (integer_part, decimal_part),
        None => (text.as_str(), ""),
    };

    let (sign, unsigned) = match integer_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", integer_part),
    };
    let mut grouped = sign.to_owned();
    let digits: Vec<char> = unsigned.chars().collect();
    for (position, digit) in digits.iter().enumerate() {
        if position > 0 && (digits.len() - position) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(*digit);
    }

    let decimals = decimal_part.trim_end_matches('0');
    if decimals.is_empty() {
        grouped
    } else {
        format!("{grouped}.{decimals}")
    }
}

/// Input fields for creating or updating a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductInput {
    /// Product name.
    pub name: String,
    /// Pricing currency.
    pub currency: Option<Currency>,
    /// Base price without tax.
    pub price_excluding_tax: Option<f64>,
    /// Tax percentage, 0 to 200.
    pub tax_rate: Option<f64>,
    /// Free-form description.
    pub description: Option<String>,
    /// Standard unit of measurement.
    pub system_unit: Option<SystemUnit>,
    /// Custom unit, when no standard unit applies.
    pub custom_unit: Option<String>,
    /// Lifecycle status, restricted to [`product_statuses`].
    pub status: Status,
    /// Directory visibility, restricted to [`product_visibilities`].
    pub visibility: Visibility,
    /// List prominence.
    pub focus: Focus,
}

impl Default for ProductInput {
    fn default() -> Self {
        Self {
            name: String::new(),
            currency: None,
            price_excluding_tax: None,
            tax_rate: None,
            description: None,
            system_unit: None,
            custom_unit: None,
            status: Status::Draft,
            visibility: Visibility::Private,
            focus: Focus::Normal,
        }
    }
}

/// A product owned by an account, with pricing and measurement data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    id: RecordId,
    account_id: AccountId,
    name: NonEmptyString,
    currency: Option<Currency>,
    price_excluding_tax: Option<f64>,
    tax_rate: Option<f64>,
    description: Option<String>,
    system_unit: Option<SystemUnit>,
    custom_unit: Option<String>,
    status: Status,
    visibility: Visibility,
    focus: Focus,
}

impl Product {
    /// Creates a validated product.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when the name is empty, both a system
    /// and a custom unit are given, the price is negative, the tax rate falls
    /// outside 0 to 200, or the status or visibility is outside its product
    /// short-list.
    pub fn new(id: RecordId, account_id: AccountId, input: ProductInput) -> AppResult<Self> {
        let name = NonEmptyString::new(input.name)?;

        let custom_unit = input
            .custom_unit
            .filter(|unit| !unit.trim().is_empty());
        if input.system_unit.is_some() && custom_unit.is_some() {
            return Err(AppError::Validation(
                "a product cannot have both a system unit and a custom unit".to_owned(),
            ));
        }

        if let Some(price) = input.price_excluding_tax
            && price < 0.0
        {
            return Err(AppError::Validation(format!("invalid price: {price}")));
        }

        if let Some(tax_rate) = input.tax_rate
            && !(0.0..=200.0).contains(&tax_rate)
        {
            return Err(AppError::Validation(format!(
                "invalid tax rate: {tax_rate}"
            )));
        }

        if !product_statuses().contains(input.status) {
            return Err(AppError::Validation(format!(
                "'{}' is not a valid product status",
                input.status.label()
            )));
        }
        if !product_visibilities().contains(input.visibility) {
            return Err(AppError::Validation(format!(
                "'{}' is not a valid product visibility",
                input.visibility.label()
            )));
        }

        Ok(Self {
            id,
            account_id,
            name,
            currency: input.currency,
            price_excluding_tax: input.price_excluding_tax.map(round_to_cents),
            tax_rate: input.tax_rate.map(round_to_cents),
            description: input.description,
            system_unit: input.system_unit,
            custom_unit,
            status: input.status,
            visibility: input.visibility,
            focus: input.focus,
        })
    }

    /// Replaces the editable fields with a new validated input.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] under the same rules as [`Self::new`].
    pub fn apply(&mut self, input: ProductInput) -> AppResult<()> {
        *self = Self::new(self.id, self.account_id, input)?;
        Ok(())
    }

    /// Moves the product to a new lifecycle status.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when the status is outside
    /// [`product_statuses`].
    pub fn set_status(&mut self, status: Status) -> AppResult<()> {
        if !product_statuses().contains(status) {
            return Err(AppError::Validation(format!(
                "'{}' is not a valid product status",
                status.label()
            )));
        }

        self.status = status;
        Ok(())
    }

    /// Creates a copy of this product under a new identifier, named
    /// "(copy)" and awaiting approval.
    #[must_use]
    pub fn duplicate(&self, new_id: RecordId) -> Self {
        let mut copy = self.clone();
        copy.id = new_id;
        copy.name = NonEmptyString::new(format!("{} (copy)", self.name))
            .unwrap_or_else(|_| self.name.clone());
        copy.status = Status::Pending;
        copy
    }

    /// Returns the product identifier.
    #[must_use]
    pub fn id(&self) -> RecordId {
        self.id
    }

    /// Returns the owning account.
    #[must_use]
    pub fn account_id(&self) -> AccountId {
        self.account_id
    }

    /// Returns the product name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the pricing currency.
    #[must_use]
    pub fn currency(&self) -> Option<Currency> {
        self.currency
    }

    /// Returns the base price without tax.
    #[must_use]
    pub fn price_excluding_tax(&self) -> Option<f64> {
        self.price_excluding_tax
    }

    /// Returns the tax percentage.
    #[must_use]
    pub fn tax_rate(&self) -> Option<f64> {
        self.tax_rate
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the system unit.
    #[must_use]
    pub fn system_unit(&self) -> Option<SystemUnit> {
        self.system_unit
    }

    /// Returns the custom unit.
    #[must_use]
    pub fn custom_unit(&self) -> Option<&str> {
        self.custom_unit.as_deref()
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    /// Returns the directory visibility.
    #[must_use]
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Returns the list prominence.
    #[must_use]
    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Returns the price including tax, rounded to cents.
    #[must_use]
    pub fn price_including_tax(&self) -> Option<f64> {
        let price = self.price_excluding_tax?;
        match self.tax_rate {
            Some(tax_rate) => Some(round_to_cents(price * (1.0 + tax_rate / 100.0))),
            None => Some(price),
        }
    }

    /// Returns the tax amount, rounded to cents.
    #[must_use]
    pub fn tax_amount(&self) -> f64 {
        match (self.price_excluding_tax, self.tax_rate) {
            (Some(price), Some(tax_rate)) => round_to_cents(price * tax_rate / 100.0),
            _ => 0.0,
        }
    }

    /// Returns the unit of measurement, `None` when the product needs none.
    #[must_use]
    pub fn unit(&self) -> Option<&str> {
        self.system_unit
            .map(SystemUnit::symbol)
            .or(self.custom_unit.as_deref())
    }

    /// Returns the currency symbol together with the unit, e.g. `€/kg`.
    #[must_use]
    pub fn currency_with_unit(&self) -> Option<String> {
        let symbol = self.currency?.symbol();
        match self.unit() {
            Some(unit) => Some(format!("{symbol}/{unit}")),
            None => Some(symbol.to_owned()),
        }
    }

    /// Returns the formatted pricing line, e.g.
    /// `100 €/kg + 20% tax = 120 €/kg`, empty when the product has no price.
    #[must_use]
    pub fn price_summary(&self) -> String {
        let Some(price) = self.price_excluding_tax else {
            return String::new();
        };

        let per_unit = self.currency_with_unit().unwrap_or_default();
        let mut summary = format!("{} {per_unit}", format_amount(price));
        if let (Some(tax_rate), Some(including)) = (self.tax_rate, self.price_including_tax())
            && tax_rate > 0.0
        {
            summary.push_str(&format!(
                " + {}% tax = {} {per_unit}",
                format_amount(tax_rate),
                format_amount(including)
            ));
        }

        summary.trim_end().to_owned()
    }

    /// Returns the current field values keyed by field name, in the shape the
    /// change log compares snapshots in.
    #[must_use]
    pub fn field_values(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            ("name", Some(self.name.to_string())),
            ("currency", self.currency.map(|c| c.code().to_owned())),
            (
                "price_excluding_tax",
                self.price_excluding_tax.map(|price| price.to_string()),
            ),
            ("tax_rate", self.tax_rate.map(|rate| rate.to_string())),
            ("description", self.description.clone()),
            (
                "system_unit",
                self.system_unit.map(|unit| unit.code().to_owned()),
            ),
            ("custom_unit", self.custom_unit.clone()),
            ("status", Some(self.status.code().to_owned())),
            ("visibility", Some(self.visibility.code().to_owned())),
            ("focus", Some(self.focus.code().to_owned())),
        ]
    }
}

impl std::fmt::Display for Product {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut label = self.name.to_string();
        let summary = self.price_summary();
        if !summary.is_empty() {
            label.push_str(", ");
            label.push_str(&summary);
        }
        write!(
            formatter,
            "{label} {}{}",
            self.visibility.symbol(),
            self.status.symbol()
        )
    }
}

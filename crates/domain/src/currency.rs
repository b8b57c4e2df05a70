//! ISO currency table with display symbols and activity windows.

use flexup_core::AppResult;
use serde::{Deserialize, Serialize};

use crate::registry::{FlexEnum, PropertyValue, ShortList, members_of_table, undeclared_property};

/// Currency a price or amount is denominated in.
///
/// Members carry their ISO 4217 alpha code as the storage code. Inactive
/// members stay in the table so that historical records keep resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum Currency {
    Aud,
    Brl,
    Cad,
    Chf,
    Cny,
    Czk,
    Dkk,
    Egp,
    Eur,
    Gbp,
    Ggp,
    Hkd,
    Huf,
    Inr,
    Isk,
    Jpy,
    Krw,
    Mxn,
    Nok,
    Nzd,
    Pln,
    Rub,
    Sek,
    Sgd,
    Thb,
    Try,
    Uah,
    Usd,
    Ved,
    Vef,
    Ves,
    Vnd,
    Xaf,
    Xof,
    Zar,
}

struct CurrencyRow {
    member: Currency,
    code: &'static str,
    label: &'static str,
    short_name: &'static str,
    symbol: &'static str,
    unique_symbol: &'static str,
    alternative_symbol: Option<&'static str>,
    iso_number: Option<i64>,
    is_active: bool,
    since_year: Option<i64>,
    until_year: Option<i64>,
}

#[rustfmt::skip]
const CURRENCY_TABLE: &[CurrencyRow] = &[
    CurrencyRow { member: Currency::Aud, code: "AUD", label: "Australian dollar",          short_name: "dollar",   symbol: "$",    unique_symbol: "$Au",     alternative_symbol: None,        iso_number: Some(36),  is_active: true,  since_year: None,       until_year: None },
    CurrencyRow { member: Currency::Brl, code: "BRL", label: "Brazilian real",             short_name: "real",     symbol: "R$",   unique_symbol: "R$",      alternative_symbol: None,        iso_number: Some(986), is_active: true,  since_year: None,       until_year: None },
    CurrencyRow { member: Currency::Cad, code: "CAD", label: "Canadian dollar",            short_name: "dollar",   symbol: "$",    unique_symbol: "$CA",     alternative_symbol: None,        iso_number: Some(124), is_active: true,  since_year: None,       until_year: None },
    CurrencyRow { member: Currency::Chf, code: "CHF", label: "Swiss franc",                short_name: "franc",    symbol: "CHF",  unique_symbol: "CHF",     alternative_symbol: None,        iso_number: Some(756), is_active: true,  since_year: None,       until_year: None },
    CurrencyRow { member: Currency::Cny, code: "CNY", label: "Chinese Yuan",               short_name: "Yuan",     symbol: "¥",    unique_symbol: "¥",       alternative_symbol: Some("CN¥"), iso_number: Some(156), is_active: true,  since_year: None,       until_year: None },
    CurrencyRow { member: Currency::Czk, code: "CZK", label: "Czech koruna",               short_name: "koruna",   symbol: "Kč",   unique_symbol: "Kč",      alternative_symbol: None,        iso_number: Some(203), is_active: true,  since_year: None,       until_year: None },
    CurrencyRow { member: Currency::Dkk, code: "DKK", label: "Danish krone",               short_name: "krone",    symbol: "kr",   unique_symbol: "kr",      alternative_symbol: None,        iso_number: Some(208), is_active: true,  since_year: None,       until_year: None },
    CurrencyRow { member: Currency::Egp, code: "EGP", label: "Egyptian pound",             short_name: "pound",    symbol: "£",    unique_symbol: "£EG",     alternative_symbol: None,        iso_number: Some(818), is_active: true,  since_year: None,       until_year: None },
    CurrencyRow { member: Currency::Eur, code: "EUR", label: "Euro",                       short_name: "euro",     symbol: "€",    unique_symbol: "€",       alternative_symbol: None,        iso_number: Some(978), is_active: true,  since_year: None,       until_year: None },
    CurrencyRow { member: Currency::Gbp, code: "GBP", label: "Pound Sterling",             short_name: "sterling", symbol: "£",    unique_symbol: "£GB",     alternative_symbol: None,        iso_number: Some(826), is_active: true,  since_year: None,       until_year: None },
    CurrencyRow { member: Currency::Ggp, code: "GGP", label: "Guernsey Pound",             short_name: "pound",    symbol: "£",    unique_symbol: "£G",      alternative_symbol: None,        iso_number: None,      is_active: true,  since_year: None,       until_year: None },
    CurrencyRow { member: Currency::Hkd, code: "HKD", label: "Hong Kong Dollar",           short_name: "dollar",   symbol: "$",    unique_symbol: "$HK",     alternative_symbol: None,        iso_number: Some(344), is_active: true,  since_year: None,       until_year: None },
    CurrencyRow { member: Currency::Huf, code: "HUF", label: "Forint",                     short_name: "forint",   symbol: "Ft",   unique_symbol: "Ft",      alternative_symbol: None,        iso_number: Some(348), is_active: true,  since_year: None,       until_year: None },
    CurrencyRow { member: Currency::Inr, code: "INR", label: "Indian rupee",               short_name: "rupee",    symbol: "₹",    unique_symbol: "₹",       alternative_symbol: None,        iso_number: Some(356), is_active: true,  since_year: None,       until_year: None },
    CurrencyRow { member: Currency::Isk, code: "ISK", label: "Iceland Krona",              short_name: "krona",    symbol: "kr",   unique_symbol: "krIS",    alternative_symbol: None,        iso_number: Some(352), is_active: true,  since_year: None,       until_year: None },
    CurrencyRow { member: Currency::Jpy, code: "JPY", label: "Yen",                        short_name: "yen",      symbol: "¥",    unique_symbol: "¥JP",     alternative_symbol: None,        iso_number: Some(392), is_active: true,  since_year: None,       until_year: None },
    CurrencyRow { member: Currency::Krw, code: "KRW", label: "Won",                        short_name: "won",      symbol: "₩",    unique_symbol: "₩SK",     alternative_symbol: None,        iso_number: Some(410), is_active: true,  since_year: None,       until_year: None },
    CurrencyRow { member: Currency::Mxn, code: "MXN", label: "Mexican peso",               short_name: "peso",     symbol: "$",    unique_symbol: "$MX",     alternative_symbol: None,        iso_number: Some(484), is_active: true,  since_year: None,       until_year: None },
    CurrencyRow { member: Currency::Nok, code: "NOK", label: "Norwegian krone",            short_name: "krone",    symbol: "kr",   unique_symbol: "krNO",    alternative_symbol: None,        iso_number: Some(578), is_active: true,  since_year: None,       until_year: None },
    CurrencyRow { member: Currency::Nzd, code: "NZD", label: "New Zealand Dollar",         short_name: "dollar",   symbol: "$",    unique_symbol: "$NZ",     alternative_symbol: None,        iso_number: Some(554), is_active: true,  since_year: None,       until_year: None },
    CurrencyRow { member: Currency::Pln, code: "PLN", label: "Polish Złoty",               short_name: "Złoty",    symbol: "zł",   unique_symbol: "zł",      alternative_symbol: Some("PLN"), iso_number: Some(985), is_active: true,  since_year: None,       until_year: None },
    CurrencyRow { member: Currency::Rub, code: "RUB", label: "Russian ruble",              short_name: "ruble",    symbol: "₽",    unique_symbol: "₽",       alternative_symbol: None,        iso_number: Some(643), is_active: true,  since_year: None,       until_year: None },
    CurrencyRow { member: Currency::Sek, code: "SEK", label: "Swedish krona",              short_name: "krona",    symbol: "kr",   unique_symbol: "krSE",    alternative_symbol: None,        iso_number: Some(752), is_active: true,  since_year: None,       until_year: None },
    CurrencyRow { member: Currency::Sgd, code: "SGD", label: "Singapore Dollar",           short_name: "dollar",   symbol: "$",    unique_symbol: "$S",      alternative_symbol: None,        iso_number: Some(702), is_active: true,  since_year: None,       until_year: None },
    CurrencyRow { member: Currency::Thb, code: "THB", label: "Baht",                       short_name: "baht",     symbol: "฿",    unique_symbol: "฿",       alternative_symbol: None,        iso_number: Some(764), is_active: true,  since_year: None,       until_year: None },
    CurrencyRow { member: Currency::Try, code: "TRY", label: "Turkish lira",               short_name: "lira",     symbol: "₺",    unique_symbol: "₺",       alternative_symbol: None,        iso_number: Some(949), is_active: true,  since_year: None,       until_year: None },
    CurrencyRow { member: Currency::Uah, code: "UAH", label: "Hryvnia",                    short_name: "hryvnia",  symbol: "₴",    unique_symbol: "₴",       alternative_symbol: None,        iso_number: Some(980), is_active: true,  since_year: None,       until_year: None },
    CurrencyRow { member: Currency::Usd, code: "USD", label: "US Dollar",                  short_name: "dollar",   symbol: "$",    unique_symbol: "$US",     alternative_symbol: None,        iso_number: Some(840), is_active: true,  since_year: None,       until_year: None },
    CurrencyRow { member: Currency::Ved, code: "VED", label: "Venezuela Bolívar Digital",  short_name: "bolívar",  symbol: "Bs.D", unique_symbol: "Bs.D",    alternative_symbol: None,        iso_number: Some(926), is_active: true,  since_year: Some(2021), until_year: None },
    CurrencyRow { member: Currency::Vef, code: "VEF", label: "Venezuela Bolívar Fuerte",   short_name: "bolívar",  symbol: "Bs.F", unique_symbol: "Bs.F",    alternative_symbol: None,        iso_number: None,      is_active: false, since_year: None,       until_year: Some(2018) },
    CurrencyRow { member: Currency::Ves, code: "VES", label: "Venezuela Bolívar Soberano", short_name: "bolívar",  symbol: "Bs.S", unique_symbol: "Bs.S",    alternative_symbol: None,        iso_number: Some(928), is_active: false, since_year: Some(2018), until_year: Some(2021) },
    CurrencyRow { member: Currency::Vnd, code: "VND", label: "Dong",                       short_name: "dong",     symbol: "₫",    unique_symbol: "₫",       alternative_symbol: None,        iso_number: Some(704), is_active: true,  since_year: None,       until_year: None },
    CurrencyRow { member: Currency::Xaf, code: "XAF", label: "CFA Franc BEAC",             short_name: "franc",    symbol: "Fr",   unique_symbol: "Fr(XAF)", alternative_symbol: None,        iso_number: Some(950), is_active: true,  since_year: None,       until_year: None },
    CurrencyRow { member: Currency::Xof, code: "XOF", label: "CFA Franc BCEAO",            short_name: "franc",    symbol: "Fr",   unique_symbol: "Fr(XOF)", alternative_symbol: None,        iso_number: Some(952), is_active: true,  since_year: None,       until_year: None },
    CurrencyRow { member: Currency::Zar, code: "ZAR", label: "Rand",                       short_name: "rand",     symbol: "R",    unique_symbol: "R",       alternative_symbol: None,        iso_number: Some(710), is_active: true,  since_year: None,       until_year: None },
];

members_of_table!(CURRENCY_MEMBERS, Currency, CURRENCY_TABLE, Currency::Aud);

impl Currency {
    fn row(self) -> &'static CurrencyRow {
        &CURRENCY_TABLE[self as usize]
    }

    /// Returns the display symbol of this currency.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        self.row().symbol
    }

    /// Returns the symbol that stays unambiguous when several currencies are
    /// shown together.
    #[must_use]
    pub fn unique_symbol(self) -> &'static str {
        self.row().unique_symbol
    }

    /// Returns the ISO 4217 numeric code, when one is assigned.
    #[must_use]
    pub fn iso_number(self) -> Option<i64> {
        self.row().iso_number
    }

    /// Returns whether the currency is in circulation today.
    #[must_use]
    pub fn is_active(self) -> bool {
        self.row().is_active
    }

    /// Returns the short-list of currencies offered for new records.
    #[must_use]
    pub fn active_short_list() -> ShortList<Self> {
        ShortList::new(
            CURRENCY_MEMBERS
                .iter()
                .copied()
                .filter(|currency| currency.is_active()),
        )
    }
}

impl FlexEnum for Currency {
    fn members() -> &'static [Self] {
        &CURRENCY_MEMBERS
    }

    fn code(self) -> &'static str {
        self.row().code
    }

    fn label(self) -> &'static str {
        self.row().label
    }

    fn property_names() -> &'static [&'static str] {
        &[
            "label",
            "short_name",
            "symbol",
            "unique_symbol",
            "alternative_symbol",
            "iso_number",
            "is_active",
            "since_year",
            "until_year",
        ]
    }

    fn property(self, name: &str) -> AppResult<Option<PropertyValue>> {
        let row = self.row();
        match name {
            "label" => Ok(Some(PropertyValue::text(row.label))),
            "short_name" => Ok(Some(PropertyValue::text(row.short_name))),
            "symbol" => Ok(Some(PropertyValue::text(row.symbol))),
            "unique_symbol" => Ok(Some(PropertyValue::text(row.unique_symbol))),
            "alternative_symbol" => Ok(row.alternative_symbol.map(PropertyValue::text)),
            "iso_number" => Ok(row.iso_number.map(PropertyValue::integer)),
            "is_active" => Ok(Some(PropertyValue::boolean(row.is_active))),
            "since_year" => Ok(row.since_year.map(PropertyValue::integer)),
            "until_year" => Ok(row.until_year.map(PropertyValue::integer)),
            _ => Err(undeclared_property::<Self>(name)),
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.code())
    }
}

//! Physical dimensions, system measurement units and unit conversion.

use flexup_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

use crate::registry::{FlexEnum, PropertyValue, members_of_table, undeclared_property};

/// Physical dimension a measurement unit belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum Dimension {
    Time,
    Mass,
    Length,
    Area,
    Volume,
    Data,
    Duration,
    Item,
    Weight,
    Bandwidth,
}

struct DimensionRow {
    member: Dimension,
    code: &'static str,
    label: &'static str,
}

#[rustfmt::skip]
const DIMENSION_TABLE: &[DimensionRow] = &[
    DimensionRow { member: Dimension::Time,      code: "T", label: "Time" },
    DimensionRow { member: Dimension::Mass,      code: "M", label: "Mass" },
    DimensionRow { member: Dimension::Length,    code: "L", label: "Length" },
    DimensionRow { member: Dimension::Area,      code: "A", label: "Area" },
    DimensionRow { member: Dimension::Volume,    code: "V", label: "Volume" },
    DimensionRow { member: Dimension::Data,      code: "D", label: "Data" },
    DimensionRow { member: Dimension::Duration,  code: "R", label: "Duration" },
    DimensionRow { member: Dimension::Item,      code: "I", label: "Item" },
    DimensionRow { member: Dimension::Weight,    code: "W", label: "Weight" },
    DimensionRow { member: Dimension::Bandwidth, code: "B", label: "Bandwidth" },
];

members_of_table!(DIMENSION_MEMBERS, Dimension, DIMENSION_TABLE, Dimension::Time);

impl Dimension {
    fn row(self) -> &'static DimensionRow {
        &DIMENSION_TABLE[self as usize]
    }
}

impl FlexEnum for Dimension {
    fn members() -> &'static [Self] {
        &DIMENSION_MEMBERS
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

/// Measurement unit provided by the system.
///
/// Each unit converts into the base unit of its dimension through a fixed
/// factor. Age units carry no physical dimension and never convert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum SystemUnit {
    Barrel,
    Bit,
    BitsPerSecond,
    Byte,
    Centiliter,
    Centimeter,
    Day,
    Deciliter,
    Dozen,
    FluidOunceUk,
    FluidOunceUs,
    Foot,
    SquareFoot,
    CubicFoot,
    Gram,
    GallonUk,
    GallonUs,
    Gigabyte,
    GigabytesPerSecond,
    Hectare,
    Hour,
    Inch,
    CubicInch,
    Kilobyte,
    KilobytesPerSecond,
    Kilogram,
    Kilometer,
    Liter,
    Meter,
    SquareMeter,
    CubicMeter,
    Megabyte,
    MegabytesPerSecond,
    Milligram,
    Mile,
    Minute,
    Milliliter,
    Millimeter,
    Month,
    AgeInMonths,
    NauticalMile,
    Number,
    Pair,
    Person,
    PintUk,
    PintUsDry,
    PintUsLiquid,
    Quarter,
    Second,
    MetricTon,
    Terabyte,
    TerabytesPerSecond,
    Ten,
    Unit,
    Week,
    Yard,
    SquareYard,
    CubicYard,
    Year,
    AgeInYears,
}

struct SystemUnitRow {
    member: SystemUnit,
    code: &'static str,
    label: &'static str,
    symbol: &'static str,
    dimension: Option<Dimension>,
    base_unit: &'static str,
    units_to_base: f64,
    can_be_priced: bool,
    sort_factor: i64,
}

#[rustfmt::skip]
const SYSTEM_UNIT_TABLE: &[SystemUnitRow] = &[
    SystemUnitRow { member: SystemUnit::Barrel,             code: "BAR", label: "Barrel",                symbol: "barrel",         dimension: Some(Dimension::Volume),    base_unit: "LIT", units_to_base: 158.987_289_4,    can_be_priced: true,  sort_factor: 20 },
    SystemUnitRow { member: SystemUnit::Bit,                code: "BIT", label: "Binary digit",          symbol: "bit",            dimension: Some(Dimension::Data),      base_unit: "BYT", units_to_base: 0.125,            can_be_priced: true,  sort_factor: 36 },
    SystemUnitRow { member: SystemUnit::BitsPerSecond,      code: "BIS", label: "Bits per second",       symbol: "bit-s",          dimension: Some(Dimension::Bandwidth), base_unit: "GBS", units_to_base: 1.25e-10,         can_be_priced: false, sort_factor: 41 },
    SystemUnitRow { member: SystemUnit::Byte,               code: "BYT", label: "Byte",                  symbol: "byte",           dimension: Some(Dimension::Data),      base_unit: "BYT", units_to_base: 1.0,              can_be_priced: true,  sort_factor: 36 },
    SystemUnitRow { member: SystemUnit::Centiliter,         code: "CL",  label: "Centiliter",            symbol: "cl",             dimension: Some(Dimension::Volume),    base_unit: "LIT", units_to_base: 0.01,             can_be_priced: true,  sort_factor: 21 },
    SystemUnitRow { member: SystemUnit::Centimeter,         code: "CM",  label: "Centimeter",            symbol: "cm",             dimension: Some(Dimension::Length),    base_unit: "M",   units_to_base: 0.01,             can_be_priced: true,  sort_factor: 46 },
    SystemUnitRow { member: SystemUnit::Day,                code: "DAY", label: "Day",                   symbol: "day",            dimension: Some(Dimension::Duration),  base_unit: "HR",  units_to_base: 24.0,             can_be_priced: true,  sort_factor: 9 },
    SystemUnitRow { member: SystemUnit::Deciliter,          code: "DL",  label: "Deciliter",             symbol: "dl",             dimension: Some(Dimension::Volume),    base_unit: "LIT", units_to_base: 0.1,              can_be_priced: true,  sort_factor: 22 },
    SystemUnitRow { member: SystemUnit::Dozen,              code: "DOZ", label: "Dozen",                 symbol: "dozen",          dimension: Some(Dimension::Item),      base_unit: "UNI", units_to_base: 12.0,             can_be_priced: true,  sort_factor: 7 },
    SystemUnitRow { member: SystemUnit::FluidOunceUk,       code: "FLK", label: "Fluid ounce (uk)",      symbol: "fl-oz-uk",       dimension: Some(Dimension::Volume),    base_unit: "LIT", units_to_base: 0.028_413_063,    can_be_priced: true,  sort_factor: 23 },
    SystemUnitRow { member: SystemUnit::FluidOunceUs,       code: "FLU", label: "Fluid ounce (us)",      symbol: "fl-oz-us",       dimension: Some(Dimension::Volume),    base_unit: "LIT", units_to_base: 0.029_573_53,     can_be_priced: true,  sort_factor: 24 },
    SystemUnitRow { member: SystemUnit::Foot,               code: "FT",  label: "Foot",                  symbol: "ft",             dimension: Some(Dimension::Length),    base_unit: "M",   units_to_base: 0.3048,           can_be_priced: true,  sort_factor: 47 },
    SystemUnitRow { member: SystemUnit::SquareFoot,         code: "FT2", label: "Square foot",           symbol: "ft2",            dimension: Some(Dimension::Area),      base_unit: "M2",  units_to_base: 0.092_903_04,     can_be_priced: true,  sort_factor: 55 },
    SystemUnitRow { member: SystemUnit::CubicFoot,          code: "FT3", label: "Cubic foot",            symbol: "ft3",            dimension: Some(Dimension::Volume),    base_unit: "LIT", units_to_base: 28.316_846_85,    can_be_priced: true,  sort_factor: 25 },
    SystemUnitRow { member: SystemUnit::Gram,               code: "GRM", label: "Gram",                  symbol: "g",              dimension: Some(Dimension::Weight),    base_unit: "KG",  units_to_base: 0.001,            can_be_priced: true,  sort_factor: 16 },
    SystemUnitRow { member: SystemUnit::GallonUk,           code: "GAK", label: "Gallon (uk)",           symbol: "gal-uk",         dimension: Some(Dimension::Volume),    base_unit: "LIT", units_to_base: 4.546_090_126,    can_be_priced: true,  sort_factor: 26 },
    SystemUnitRow { member: SystemUnit::GallonUs,           code: "GAS", label: "Gallon (us)",           symbol: "gal-us",         dimension: Some(Dimension::Volume),    base_unit: "LIT", units_to_base: 3.785_411_835,    can_be_priced: true,  sort_factor: 27 },
    SystemUnitRow { member: SystemUnit::Gigabyte,           code: "GB",  label: "Gigabyte",              symbol: "gb",             dimension: Some(Dimension::Data),      base_unit: "BYT", units_to_base: 1_000_000_000.0,  can_be_priced: true,  sort_factor: 37 },
    SystemUnitRow { member: SystemUnit::GigabytesPerSecond, code: "GBS", label: "Gigabytes per second",  symbol: "gb-s",           dimension: Some(Dimension::Bandwidth), base_unit: "GBS", units_to_base: 1.0,              can_be_priced: false, sort_factor: 42 },
    SystemUnitRow { member: SystemUnit::Hectare,            code: "HEC", label: "Hectare",               symbol: "hectare",        dimension: Some(Dimension::Area),      base_unit: "M2",  units_to_base: 10_000.0,         can_be_priced: true,  sort_factor: 56 },
    SystemUnitRow { member: SystemUnit::Hour,               code: "HR",  label: "Hour",                  symbol: "hr",             dimension: Some(Dimension::Duration),  base_unit: "HR",  units_to_base: 1.0,              can_be_priced: true,  sort_factor: 8 },
    SystemUnitRow { member: SystemUnit::Inch,               code: "INC", label: "Inch",                  symbol: "inch",           dimension: Some(Dimension::Length),    base_unit: "M",   units_to_base: 0.0254,           can_be_priced: true,  sort_factor: 48 },
    SystemUnitRow { member: SystemUnit::CubicInch,          code: "IN3", label: "Cubic inch",            symbol: "inch3",          dimension: Some(Dimension::Volume),    base_unit: "LIT", units_to_base: 0.016_387_064,    can_be_priced: true,  sort_factor: 28 },
    SystemUnitRow { member: SystemUnit::Kilobyte,           code: "KB",  label: "Kilobyte",              symbol: "kb",             dimension: Some(Dimension::Data),      base_unit: "BYT", units_to_base: 1000.0,           can_be_priced: true,  sort_factor: 38 },
    SystemUnitRow { member: SystemUnit::KilobytesPerSecond, code: "KBS", label: "Kilobytes per second",  symbol: "kb-s",           dimension: Some(Dimension::Bandwidth), base_unit: "GBS", units_to_base: 0.000_001,        can_be_priced: false, sort_factor: 43 },
    SystemUnitRow { member: SystemUnit::Kilogram,           code: "KG",  label: "Kilogram",              symbol: "kg",             dimension: Some(Dimension::Weight),    base_unit: "KG",  units_to_base: 1.0,              can_be_priced: true,  sort_factor: 17 },
    SystemUnitRow { member: SystemUnit::Kilometer,          code: "KM",  label: "Kilometer",             symbol: "km",             dimension: Some(Dimension::Length),    base_unit: "M",   units_to_base: 1000.0,           can_be_priced: true,  sort_factor: 49 },
    SystemUnitRow { member: SystemUnit::Liter,              code: "LIT", label: "Liter",                 symbol: "l",              dimension: Some(Dimension::Volume),    base_unit: "LIT", units_to_base: 1.0,              can_be_priced: true,  sort_factor: 29 },
    SystemUnitRow { member: SystemUnit::Meter,              code: "M",   label: "Meter",                 symbol: "m",              dimension: Some(Dimension::Length),    base_unit: "M",   units_to_base: 1.0,              can_be_priced: true,  sort_factor: 50 },
    SystemUnitRow { member: SystemUnit::SquareMeter,        code: "M2",  label: "Square meter",          symbol: "m2",             dimension: Some(Dimension::Area),      base_unit: "M2",  units_to_base: 1.0,              can_be_priced: true,  sort_factor: 58 },
    SystemUnitRow { member: SystemUnit::CubicMeter,         code: "M3",  label: "Cubic meter",           symbol: "m3",             dimension: Some(Dimension::Volume),    base_unit: "LIT", units_to_base: 1000.0,           can_be_priced: true,  sort_factor: 30 },
    SystemUnitRow { member: SystemUnit::Megabyte,           code: "MB",  label: "Megabyte",              symbol: "mb",             dimension: Some(Dimension::Data),      base_unit: "BYT", units_to_base: 1_000_000.0,      can_be_priced: true,  sort_factor: 39 },
    SystemUnitRow { member: SystemUnit::MegabytesPerSecond, code: "MBS", label: "Megabytes per second",  symbol: "mb-s",           dimension: Some(Dimension::Bandwidth), base_unit: "GBS", units_to_base: 0.001,            can_be_priced: false, sort_factor: 44 },
    SystemUnitRow { member: SystemUnit::Milligram,          code: "MG",  label: "Milligram",             symbol: "mg",             dimension: Some(Dimension::Weight),    base_unit: "KG",  units_to_base: 0.000_001,        can_be_priced: true,  sort_factor: 18 },
    SystemUnitRow { member: SystemUnit::Mile,               code: "MIL", label: "Mile",                  symbol: "mile",           dimension: Some(Dimension::Length),    base_unit: "M",   units_to_base: 1609.34,          can_be_priced: true,  sort_factor: 51 },
    SystemUnitRow { member: SystemUnit::Minute,             code: "MIN", label: "Minute",                symbol: "min",            dimension: Some(Dimension::Duration),  base_unit: "HR",  units_to_base: 0.016_666_667,    can_be_priced: true,  sort_factor: 10 },
    SystemUnitRow { member: SystemUnit::Milliliter,         code: "ML",  label: "Milliliter",            symbol: "ml",             dimension: Some(Dimension::Volume),    base_unit: "LIT", units_to_base: 0.001,            can_be_priced: true,  sort_factor: 31 },
    SystemUnitRow { member: SystemUnit::Millimeter,         code: "MM",  label: "Millimeter",            symbol: "mm",             dimension: Some(Dimension::Length),    base_unit: "M",   units_to_base: 0.001,            can_be_priced: true,  sort_factor: 52 },
    SystemUnitRow { member: SystemUnit::Month,              code: "MON", label: "Month",                 symbol: "month",          dimension: Some(Dimension::Duration),  base_unit: "HR",  units_to_base: 730.5,            can_be_priced: true,  sort_factor: 11 },
    SystemUnitRow { member: SystemUnit::AgeInMonths,        code: "AMO", label: "Age in months",         symbol: "month-age",      dimension: None,                       base_unit: "AYR", units_to_base: 0.083_333_333,    can_be_priced: false, sort_factor: 59 },
    SystemUnitRow { member: SystemUnit::NauticalMile,       code: "NAU", label: "Nautical mile",         symbol: "nautical-mile",  dimension: Some(Dimension::Length),    base_unit: "M",   units_to_base: 1852.0,           can_be_priced: true,  sort_factor: 53 },
    SystemUnitRow { member: SystemUnit::Number,             code: "NR",  label: "Number",                symbol: "nr",             dimension: Some(Dimension::Item),      base_unit: "UNI", units_to_base: 1.0,              can_be_priced: true,  sort_factor: 3 },
    SystemUnitRow { member: SystemUnit::Pair,               code: "PAI", label: "Pair",                  symbol: "pair",           dimension: Some(Dimension::Item),      base_unit: "UNI", units_to_base: 2.0,              can_be_priced: true,  sort_factor: 5 },
    SystemUnitRow { member: SystemUnit::Person,             code: "PER", label: "Person",                symbol: "person",         dimension: Some(Dimension::Item),      base_unit: "UNI", units_to_base: 1.0,              can_be_priced: true,  sort_factor: 6 },
    SystemUnitRow { member: SystemUnit::PintUk,             code: "PIK", label: "Pint (uk)",             symbol: "pint-uk",        dimension: Some(Dimension::Volume),    base_unit: "LIT", units_to_base: 0.568_261_266,    can_be_priced: true,  sort_factor: 32 },
    SystemUnitRow { member: SystemUnit::PintUsDry,          code: "PUD", label: "Pint (us dry)",         symbol: "pint-us-dry",    dimension: Some(Dimension::Volume),    base_unit: "LIT", units_to_base: 0.550_610_483,    can_be_priced: true,  sort_factor: 33 },
    SystemUnitRow { member: SystemUnit::PintUsLiquid,       code: "PUL", label: "Pint (us liquid)",      symbol: "pint-us-liquid", dimension: Some(Dimension::Volume),    base_unit: "LIT", units_to_base: 0.473_176_479,    can_be_priced: true,  sort_factor: 34 },
    SystemUnitRow { member: SystemUnit::Quarter,            code: "QUA", label: "Quarter",               symbol: "quarter",        dimension: Some(Dimension::Duration),  base_unit: "HR",  units_to_base: 2191.5,           can_be_priced: true,  sort_factor: 12 },
    SystemUnitRow { member: SystemUnit::Second,             code: "SEC", label: "Second",                symbol: "s",              dimension: Some(Dimension::Duration),  base_unit: "HR",  units_to_base: 0.000_277_778,    can_be_priced: true,  sort_factor: 13 },
    SystemUnitRow { member: SystemUnit::MetricTon,          code: "TON", label: "Metric ton",            symbol: "t",              dimension: Some(Dimension::Weight),    base_unit: "KG",  units_to_base: 1000.0,           can_be_priced: true,  sort_factor: 19 },
    SystemUnitRow { member: SystemUnit::Terabyte,           code: "TB",  label: "Terabyte",              symbol: "tb",             dimension: Some(Dimension::Data),      base_unit: "BYT", units_to_base: 1e12,             can_be_priced: true,  sort_factor: 40 },
    SystemUnitRow { member: SystemUnit::TerabytesPerSecond, code: "TBS", label: "Terabytes per second",  symbol: "tb-s",           dimension: Some(Dimension::Bandwidth), base_unit: "GBS", units_to_base: 1000.0,           can_be_priced: false, sort_factor: 45 },
    SystemUnitRow { member: SystemUnit::Ten,                code: "TEN", label: "Tens",                  symbol: "tens",           dimension: Some(Dimension::Item),      base_unit: "UNI", units_to_base: 10.0,             can_be_priced: true,  sort_factor: 4 },
    SystemUnitRow { member: SystemUnit::Unit,               code: "UNI", label: "Unit",                  symbol: "unit",           dimension: Some(Dimension::Item),      base_unit: "UNI", units_to_base: 1.0,              can_be_priced: true,  sort_factor: 2 },
    SystemUnitRow { member: SystemUnit::Week,               code: "WEE", label: "Week",                  symbol: "week",           dimension: Some(Dimension::Duration),  base_unit: "HR",  units_to_base: 168.0,            can_be_priced: true,  sort_factor: 14 },
    SystemUnitRow { member: SystemUnit::Yard,               code: "YAR", label: "Yard",                  symbol: "yard",           dimension: Some(Dimension::Length),    base_unit: "M",   units_to_base: 0.9144,           can_be_priced: true,  sort_factor: 54 },
    SystemUnitRow { member: SystemUnit::SquareYard,         code: "YA2", label: "Square yard",           symbol: "yard2",          dimension: Some(Dimension::Area),      base_unit: "M2",  units_to_base: 0.836_127_36,     can_be_priced: true,  sort_factor: 57 },
    SystemUnitRow { member: SystemUnit::CubicYard,          code: "YA3", label: "Cubic yard",            symbol: "yard3",          dimension: Some(Dimension::Volume),    base_unit: "LIT", units_to_base: 764.554_870_6,    can_be_priced: true,  sort_factor: 35 },
    SystemUnitRow { member: SystemUnit::Year,               code: "YEA", label: "Year",                  symbol: "year",           dimension: Some(Dimension::Duration),  base_unit: "HR",  units_to_base: 8766.0,           can_be_priced: true,  sort_factor: 15 },
    SystemUnitRow { member: SystemUnit::AgeInYears,         code: "AYR", label: "Age in years",          symbol: "year-age",       dimension: None,                       base_unit: "AYR", units_to_base: 1.0,              can_be_priced: false, sort_factor: 60 },
];

members_of_table!(
    SYSTEM_UNIT_MEMBERS,
    SystemUnit,
    SYSTEM_UNIT_TABLE,
    SystemUnit::Barrel
);

impl SystemUnit {
    fn row(self) -> &'static SystemUnitRow {
        &SYSTEM_UNIT_TABLE[self as usize]
    }

    /// Returns the display symbol of this unit.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        self.row().symbol
    }

    /// Returns the physical dimension, `None` for age units.
    #[must_use]
    pub fn dimension(self) -> Option<Dimension> {
        self.row().dimension
    }

    /// Returns the storage code of the base unit of this unit's dimension.
    #[must_use]
    pub fn base_unit_code(self) -> &'static str {
        self.row().base_unit
    }

    /// Returns how many base units one of this unit represents.
    #[must_use]
    pub fn units_to_base(self) -> f64 {
        self.row().units_to_base
    }

    /// Returns whether a price can be attached per this unit.
    #[must_use]
    pub fn can_be_priced(self) -> bool {
        self.row().can_be_priced
    }

    /// Returns the position weight used when sorting unit dropdowns.
    #[must_use]
    pub fn sort_factor(self) -> i64 {
        self.row().sort_factor
    }
}

impl FlexEnum for SystemUnit {
    fn members() -> &'static [Self] {
        &SYSTEM_UNIT_MEMBERS
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
            "symbol",
            "dimension",
            "base_unit",
            "units_to_base",
            "can_be_priced",
            "sort_factor",
        ]
    }

    fn property(self, name: &str) -> AppResult<Option<PropertyValue>> {
        let row = self.row();
        match name {
            "label" => Ok(Some(PropertyValue::text(row.label))),
            "symbol" => Ok(Some(PropertyValue::text(row.symbol))),
            "dimension" => Ok(row
                .dimension
                .map(|dimension| PropertyValue::text(dimension.code()))),
            "base_unit" => Ok(Some(PropertyValue::text(row.base_unit))),
            "units_to_base" => Ok(Some(PropertyValue::float(row.units_to_base))),
            "can_be_priced" => Ok(Some(PropertyValue::boolean(row.can_be_priced))),
            "sort_factor" => Ok(Some(PropertyValue::integer(row.sort_factor))),
            _ => Err(undeclared_property::<Self>(name)),
        }
    }
}

impl std::fmt::Display for SystemUnit {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.symbol())
    }
}

/// Converts a value from one system unit to another of the same dimension.
///
/// # Errors
///
/// Returns [`AppError::Validation`] when either unit has no physical
/// dimension or when the two dimensions differ.
pub fn convert(value: f64, from: SystemUnit, to: SystemUnit) -> AppResult<f64> {
    if from == to {
        return Ok(value);
    }

    let (Some(from_dimension), Some(to_dimension)) = (from.dimension(), to.dimension()) else {
        return Err(AppError::Validation(format!(
            "cannot convert between '{}' and '{}': unit without a physical dimension",
            from.label(),
            to.label()
        )));
    };
    if from_dimension != to_dimension {
        return Err(AppError::Validation(format!(
            "cannot convert {} ({}) into {} ({})",
            from.label(),
            from_dimension.label(),
            to.label(),
            to_dimension.label()
        )));
    }

    Ok(value * from.units_to_base() / to.units_to_base())
}

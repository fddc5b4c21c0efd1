//! Trade-effect record and date ordinal
//!
//! A [`Record`] holds the ten fields of one dataset row. Records are plain
//! owned values: every index stores its own copy, nothing is shared.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Year the date ordinal counts from
pub const ORDINAL_EPOCH_YEAR: i64 = 2010;

/// Number of fields in one data row
pub const FIELD_COUNT: usize = 10;

/// Column names, in file order
pub const HEADER: [&str; FIELD_COUNT] = [
    "Direction",
    "Year",
    "Date",
    "Weekday",
    "Country",
    "Commodity",
    "Transport_Mode",
    "Measure",
    "Value",
    "Cumulative",
];

/// Derived ordering key used by the ordered index
pub type DateOrdinal = i64;

/// One row of the trade-effects dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "Direction")]
    pub direction: String,

    #[serde(rename = "Year")]
    pub year: i32,

    /// Day/month/year string, e.g. `01/01/2015`. Not validated at load.
    #[serde(rename = "Date")]
    pub date: String,

    #[serde(rename = "Weekday")]
    pub weekday: String,

    #[serde(rename = "Country")]
    pub country: String,

    #[serde(rename = "Commodity")]
    pub commodity: String,

    #[serde(rename = "Transport_Mode")]
    pub transport_mode: String,

    #[serde(rename = "Measure")]
    pub measure: String,

    /// Key of the balanced index
    #[serde(rename = "Value")]
    pub value: i64,

    #[serde(rename = "Cumulative")]
    pub cumulative: i64,
}

impl Record {
    /// Ordinal of this record's date, see [`date_ordinal`]
    pub fn date_ordinal(&self) -> Option<DateOrdinal> {
        date_ordinal(&self.date)
    }

    /// Copy of this record with a different `value`
    pub fn with_value(&self, value: i64) -> Self {
        Record {
            value,
            ..self.clone()
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {}, {}, {}, {}, {}, {}, {}, {}",
            self.direction,
            self.year,
            self.date,
            self.weekday,
            self.country,
            self.commodity,
            self.transport_mode,
            self.measure,
            self.value,
            self.cumulative
        )
    }
}

/// Convert a `D/M/Y` date string into a linear ordinal
///
/// The formula is `(year - 2010) * 365 + (month - 1) * 30 + day`. It is not
/// calendar accurate and only serves as a total order for comparisons.
/// Returns `None` unless the string has exactly three numeric parts, or if
/// the ordinal does not fit in an `i64`.
///
/// ```
/// use effects_index::types::date_ordinal;
///
/// assert_eq!(date_ordinal("1/1/2010"), Some(1));
/// assert_eq!(date_ordinal("15/03/2011"), Some(365 + 60 + 15));
/// assert_eq!(date_ordinal("not a date"), None);
/// ```
pub fn date_ordinal(date: &str) -> Option<DateOrdinal> {
    let mut parts = date.trim().split('/');
    let day = parts.next()?.trim().parse::<i64>().ok()?;
    let month = parts.next()?.trim().parse::<i64>().ok()?;
    let year = parts.next()?.trim().parse::<i64>().ok()?;
    if parts.next().is_some() {
        return None;
    }

    year.checked_sub(ORDINAL_EPOCH_YEAR)?
        .checked_mul(365)?
        .checked_add(month.checked_sub(1)?.checked_mul(30)?)?
        .checked_add(day)
}

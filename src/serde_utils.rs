/// Serde utility functions for lenient client input
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserializer;
use std::fmt;

/// Parse a hire date the way clients actually send it.
///
/// Accepts `2020-01-10`, `2020-01-10T00:00:00` (with optional fraction) and
/// full RFC 3339 timestamps. Only the calendar date is kept.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

/// Deserialize an optional date through [`parse_date`].
///
/// - Missing field (with `#[serde(default)]`), `null` or `""` → `None`
/// - Unparseable text → error
///
/// Usage:
/// ```ignore
/// #[derive(Deserialize)]
/// struct Example {
///     #[serde(default, deserialize_with = "crate::serde_utils::optional_date")]
///     start: Option<NaiveDate>,
/// }
/// ```
pub fn optional_date<'de, D>(de: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    struct OptionalDateVisitor;

    impl<'de> serde::de::Visitor<'de> for OptionalDateVisitor {
        type Value = Option<NaiveDate>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a date such as 2020-01-10")
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(None)
        }

        fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_str(self)
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            if value.trim().is_empty() {
                return Ok(None);
            }
            parse_date(value)
                .map(Some)
                .ok_or_else(|| E::custom(format!("invalid date: {}", value)))
        }
    }

    de.deserialize_option(OptionalDateVisitor)
}

/// Like [`optional_date`], but unparseable text becomes `None` instead of
/// an error, so the value is reported by field validation.
pub fn lenient_date<'de, D>(de: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = serde::Deserialize::deserialize(de)?;
    Ok(raw.as_deref().and_then(parse_date))
}

/// Deserialize a salary that may arrive as a JSON string or number.
///
/// Numbers are kept in their textual form so `50000` and `"50000"` store
/// the same value. `null` → `None`.
pub fn optional_amount<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct OptionalAmountVisitor;

    impl<'de> serde::de::Visitor<'de> for OptionalAmountVisitor {
        type Value = Option<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an amount as a string or number")
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(None)
        }

        fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_any(self)
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value.to_string()))
        }
    }

    de.deserialize_option(OptionalAmountVisitor)
}

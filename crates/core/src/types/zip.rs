//! US ZIP code type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`ZipCode`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum ZipCodeError {
    /// The input string is empty.
    #[error("ZIP code cannot be empty")]
    Empty,
    /// The input does not match the 5-digit or 5+4 format.
    #[error("ZIP code must be 5 digits, optionally followed by a dash and 4 digits")]
    InvalidFormat,
}

/// A US ZIP code in 5-digit (`12345`) or ZIP+4 (`12345-6789`) form.
///
/// ## Examples
///
/// ```
/// use steer_core::ZipCode;
///
/// assert!(ZipCode::parse("78701").is_ok());
/// assert!(ZipCode::parse("78701-1234").is_ok());
///
/// assert!(ZipCode::parse("1234").is_err());       // too short
/// assert!(ZipCode::parse("787015").is_err());     // too long
/// assert!(ZipCode::parse("78701-12").is_err());   // bad plus-four
/// assert!(ZipCode::parse("ABCDE").is_err());      // not digits
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct ZipCode(String);

impl ZipCode {
    /// Parse a `ZipCode` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty or does not match
    /// `\d{5}` or `\d{5}-\d{4}`.
    pub fn parse(s: &str) -> Result<Self, ZipCodeError> {
        if s.is_empty() {
            return Err(ZipCodeError::Empty);
        }

        let valid = match s.split_once('-') {
            None => is_digits(s, 5),
            Some((first, plus_four)) => is_digits(first, 5) && is_digits(plus_four, 4),
        };

        if !valid {
            return Err(ZipCodeError::InvalidFormat);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the ZIP code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `ZipCode` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Returns the 5-digit prefix, dropping any plus-four extension.
    #[must_use]
    pub fn prefix(&self) -> &str {
        self.0.split('-').next().unwrap_or("")
    }
}

fn is_digits(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| b.is_ascii_digit())
}

impl fmt::Display for ZipCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ZipCode {
    type Err = ZipCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for ZipCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for ZipCode {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for ZipCode {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        // Database values are assumed valid
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for ZipCode {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_five_digit() {
        assert!(ZipCode::parse("00501").is_ok());
        assert!(ZipCode::parse("78701").is_ok());
        assert!(ZipCode::parse("99950").is_ok());
    }

    #[test]
    fn test_parse_plus_four() {
        let zip = ZipCode::parse("78701-1234").unwrap();
        assert_eq!(zip.as_str(), "78701-1234");
        assert_eq!(zip.prefix(), "78701");
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(ZipCode::parse(""), Err(ZipCodeError::Empty)));
    }

    #[test]
    fn test_parse_wrong_length() {
        assert!(matches!(
            ZipCode::parse("1234"),
            Err(ZipCodeError::InvalidFormat)
        ));
        assert!(matches!(
            ZipCode::parse("123456"),
            Err(ZipCodeError::InvalidFormat)
        ));
    }

    #[test]
    fn test_parse_bad_plus_four() {
        assert!(ZipCode::parse("78701-12").is_err());
        assert!(ZipCode::parse("78701-12345").is_err());
        assert!(ZipCode::parse("78701-abcd").is_err());
    }

    #[test]
    fn test_parse_non_digits() {
        assert!(ZipCode::parse("ABCDE").is_err());
        assert!(ZipCode::parse("7870a").is_err());
        // Unicode digits must not sneak past the ASCII check
        assert!(ZipCode::parse("٧٨٧٠١").is_err());
    }

    #[test]
    fn test_display() {
        let zip = ZipCode::parse("78701").unwrap();
        assert_eq!(format!("{zip}"), "78701");
    }

    #[test]
    fn test_serde_roundtrip() {
        let zip = ZipCode::parse("78701-1234").unwrap();
        let json = serde_json::to_string(&zip).unwrap();
        assert_eq!(json, "\"78701-1234\"");

        let parsed: ZipCode = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, zip);
    }
}

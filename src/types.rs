//! Common types used throughout keyset-pager
//!
//! This module contains the record model served by the stores and the
//! pagination discriminator shared by the wire and the dispatcher.

use crate::error::{Error, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Keyed Records
// ============================================================================

/// A record addressable by a unique, monotonically assigned integer key.
///
/// Pagination always orders by ascending `id` and only ever sees records
/// for which `is_active` returns true.
pub trait Keyed {
    /// Unique, strictly increasing key. Never reused.
    fn id(&self) -> i64;

    /// Whether the record belongs to the paginated (active) subset
    fn is_active(&self) -> bool {
        true
    }
}

// ============================================================================
// User
// ============================================================================

/// The record type served over HTTP
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub phone_number: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
    pub profile_picture_url: Option<String>,
    pub is_email_verified: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    pub updated_at: DateTime<Utc>,
    pub updated_by: String,
    pub last_login_at: Option<DateTime<Utc>>,
    pub role: String,
}

impl Keyed for User {
    fn id(&self) -> i64 {
        self.id
    }

    fn is_active(&self) -> bool {
        self.is_active
    }
}

// ============================================================================
// Pagination Type
// ============================================================================

/// Which pagination strategy a request asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaginationType {
    /// Page number + page size (skip/take)
    Offset,
    /// Last seen id + page size (keyset range scan)
    Cursor,
}

impl PaginationType {
    /// Numeric code used on the wire
    pub fn code(self) -> i64 {
        match self {
            Self::Offset => 0,
            Self::Cursor => 1,
        }
    }

    /// Resolve a numeric wire code
    pub fn from_code(code: i64) -> Result<Self> {
        match code {
            0 => Ok(Self::Offset),
            1 => Ok(Self::Cursor),
            other => Err(Error::invalid_request(format!(
                "invalid pagination type: {other}"
            ))),
        }
    }
}

impl fmt::Display for PaginationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Offset => write!(f, "offset"),
            Self::Cursor => write!(f, "cursor"),
        }
    }
}

impl FromStr for PaginationType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if let Ok(code) = trimmed.parse::<i64>() {
            return Self::from_code(code);
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "offset" => Ok(Self::Offset),
            "cursor" => Ok(Self::Cursor),
            _ => Err(Error::invalid_request(format!(
                "invalid pagination type: {s}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_type_from_str() {
        assert_eq!("offset".parse::<PaginationType>().unwrap(), PaginationType::Offset);
        assert_eq!("Cursor".parse::<PaginationType>().unwrap(), PaginationType::Cursor);
        assert_eq!("0".parse::<PaginationType>().unwrap(), PaginationType::Offset);
        assert_eq!(" 1 ".parse::<PaginationType>().unwrap(), PaginationType::Cursor);
    }

    #[test]
    fn test_pagination_type_rejects_unknown() {
        assert!("keyset".parse::<PaginationType>().unwrap_err().is_client_error());
        assert!("2".parse::<PaginationType>().is_err());
        assert!(PaginationType::from_code(-1).is_err());
    }

    #[test]
    fn test_pagination_type_code_round_trip() {
        for kind in [PaginationType::Offset, PaginationType::Cursor] {
            assert_eq!(PaginationType::from_code(kind.code()).unwrap(), kind);
        }
    }
}

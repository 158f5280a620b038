//! Catalog painting types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::StatusError;
use crate::PaintingId;

/// Availability of a painting in the catalog.
///
/// Parsing is lenient: surrounding whitespace is trimmed and case is folded,
/// so `" Sold"` and `"AVAILABLE"` are accepted. Serialization is always
/// lower-case.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum PaintingStatus {
    /// Listed and purchasable.
    #[default]
    Available,

    /// Purchased through an order.
    Sold,
}

impl PaintingStatus {
    /// The stored, lower-case form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Sold => "sold",
        }
    }
}

impl FromStr for PaintingStatus {
    type Err = StatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "available" => Ok(Self::Available),
            "sold" => Ok(Self::Sold),
            _ => Err(StatusError {
                kind: "painting",
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for PaintingStatus {
    type Error = StatusError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for PaintingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A painting row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Painting {
    /// Primary key.
    pub painting_id: PaintingId,
    /// Title shown in the catalog.
    pub title: String,
    /// Artist name.
    pub artist: String,
    /// Price; the store rejects negative values.
    pub price: Decimal,
    /// Image location, served by the frontend as-is.
    pub image_url: String,
    /// Availability.
    pub status: PaintingStatus,
    /// Insertion time, the catalog sort key.
    pub created_at: DateTime<Utc>,
}

impl Painting {
    /// Check whether the painting can still be bought.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.status == PaintingStatus::Available
    }
}

/// The writable fields of a painting, used for both create and full update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaintingInput {
    /// Title shown in the catalog.
    pub title: String,
    /// Artist name.
    pub artist: String,
    /// Price.
    pub price: Decimal,
    /// Image location.
    pub image_url: String,
    /// Availability; defaults to available when omitted.
    #[serde(default)]
    pub status: PaintingStatus,
}

/// Painting entry for the order form dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaintingOption {
    /// Primary key.
    pub painting_id: PaintingId,
    /// Title.
    pub title: String,
}

impl From<&Painting> for PaintingOption {
    fn from(painting: &Painting) -> Self {
        Self {
            painting_id: painting.painting_id,
            title: painting.title.clone(),
        }
    }
}

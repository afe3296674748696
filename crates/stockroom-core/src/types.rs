//! # Domain Types
//!
//! Core domain types used throughout Stockroom.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │   NewProduct    │   │  SortCriterion  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (rowid)     │   │  name           │   │  Name           │       │
//! │  │  name           │   │  description    │   │  Price          │       │
//! │  │  description    │   │  quantity       │   └─────────────────┘       │
//! │  │  quantity       │   │  price          │                              │
//! │  │  price          │   └─────────────────┘   ┌─────────────────┐       │
//! │  └─────────────────┘                         │   PriceRange    │       │
//! │                                              │  min ..= max    │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! `id` is the SQLite rowid. It is assigned by the engine on insert and never
//! handed out again, even after the row holding it is deleted. `NewProduct` is what callers hand to insert and
//! update; it has no id because the caller never chooses one.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

// =============================================================================
// Product
// =============================================================================

/// A stored inventory record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Engine-assigned primary key.
    pub id: i64,

    /// Display name. May be empty.
    pub name: String,

    /// Free-text description. May be empty.
    pub description: String,

    /// Units on hand. Not range checked.
    pub quantity: i64,

    /// Unit price. Not range checked.
    pub price: f64,
}

impl Product {
    /// Returns the editable fields of this product.
    pub fn to_new(&self) -> NewProduct {
        NewProduct {
            name: self.name.clone(),
            description: self.description.clone(),
            quantity: self.quantity,
            price: self.price,
        }
    }
}

/// One console line per product.
///
/// ```rust
/// use stockroom_core::Product;
///
/// let product = Product {
///     id: 1,
///     name: "Widget".into(),
///     description: "Blue".into(),
///     quantity: 3,
///     price: 15.0,
/// };
/// assert_eq!(
///     product.to_string(),
///     "ID: 1, Name: Widget, Description: Blue, Quantity: 3, Price: 15"
/// );
/// ```
impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {}, Name: {}, Description: {}, Quantity: {}, Price: {}",
            self.id, self.name, self.description, self.quantity, self.price
        )
    }
}

// =============================================================================
// New Product
// =============================================================================

/// Field values for an insert or a full-overwrite update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub quantity: i64,

    #[serde(default)]
    pub price: f64,
}

impl NewProduct {
    /// Creates a new set of product fields.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        quantity: i64,
        price: f64,
    ) -> Self {
        NewProduct {
            name: name.into(),
            description: description.into(),
            quantity,
            price,
        }
    }

    /// Attaches an engine-assigned id.
    pub fn with_id(self, id: i64) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            quantity: self.quantity,
            price: self.price,
        }
    }
}

// =============================================================================
// Sort Criterion
// =============================================================================

/// Field a listing can be ordered by (ascending).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortCriterion {
    Name,
    Price,
}

impl SortCriterion {
    /// Returns the column name this criterion orders by.
    pub const fn as_str(&self) -> &'static str {
        match self {
            SortCriterion::Name => "name",
            SortCriterion::Price => "price",
        }
    }
}

impl fmt::Display for SortCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses `name` or `price`, ignoring surrounding whitespace and ASCII case.
impl FromStr for SortCriterion {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if s.eq_ignore_ascii_case("name") {
            Ok(SortCriterion::Name)
        } else if s.eq_ignore_ascii_case("price") {
            Ok(SortCriterion::Price)
        } else {
            Err(CoreError::InvalidCriterion(s.to_string()))
        }
    }
}

// =============================================================================
// Price Range
// =============================================================================

/// Inclusive price filter.
///
/// A range with `min > max` is legal and simply matches nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    /// Creates a range covering `min..=max`.
    pub const fn new(min: f64, max: f64) -> Self {
        PriceRange { min, max }
    }

    /// True when no price can match.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # stockroom-core: Domain Types for Stockroom
//!
//! This crate holds the product model and the parsing rules for everything a
//! user can type into the menu. It has zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockroom Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/cli (menu loop)                         │   │
//! │  │    prompt ──► parse ──► repository call ──► print rows          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ stockroom-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐  ┌───────────────┐  ┌───────────────────┐  │   │
//! │  │   │     types     │  │  validation   │  │      error        │  │   │
//! │  │   │  Product      │  │  parse_id     │  │  CoreError        │  │   │
//! │  │   │  NewProduct   │  │  parse_price  │  │  ValidationError  │  │   │
//! │  │   │  SortCriterion│  │  parse_qty    │  │                   │  │   │
//! │  │   └───────────────┘  └───────────────┘  └───────────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • PURE FUNCTIONS                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  stockroom-db (Database Layer)                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example Usage
//!
//! ```rust
//! use stockroom_core::{PriceRange, SortCriterion};
//!
//! let criterion: SortCriterion = "price".parse().unwrap();
//! assert_eq!(criterion, SortCriterion::Price);
//!
//! assert!(PriceRange::new(20.0, 10.0).is_empty());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, ValidationError};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// File name of the inventory database when no path is configured.
pub const DEFAULT_DATABASE_FILE: &str = "inventory.db";

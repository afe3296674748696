//! # Repository Module
//!
//! Database repository implementations for Stockroom.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  Menu loop                                                             │
//! │       │                                                                 │
//! │       │  db.products().search_by_name("pro")                           │
//! │       ▼                                                                 │
//! │  ProductRepository                                                     │
//! │  ├── insert / update / delete                                          │
//! │  ├── list_all / list_sorted                                            │
//! │  └── search_by_name / search_by_price_range                            │
//! │       │                                                                 │
//! │       │  One SQL statement per call                                    │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - Product CRUD and search

pub mod product;

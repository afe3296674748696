//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Key Operations
//! - Insert / full-overwrite update / delete by id
//! - Streaming reads: all rows, name search, price range, sorted listing
//!
//! ## Streaming Reads
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How a Read Reaches the Console                       │
//! │                                                                         │
//! │  repo.search_by_name("pro")                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SELECT ... WHERE name LIKE '%pro%' ESCAPE '\'                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ProductStream  ──► row 1 ──► printed                                  │
//! │                 ──► row 2 ──► printed                                  │
//! │                 ──► None  (stream finished, connection released)       │
//! │                                                                         │
//! │  Rows are decoded one at a time. Nothing is collected up front.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Name Matching
//! The search term is matched literally: `%`, `_` and `\` are escaped before
//! the term is wrapped in wildcards. By default SQLite's `LIKE` applies,
//! which folds ASCII case only. With `case_sensitive_search` the match uses
//! `instr`, a plain byte-wise substring test.

use sqlx::SqlitePool;
use std::pin::Pin;
use tokio_stream::{Stream, StreamExt};
use tracing::debug;

use crate::error::{DbError, DbResult};
use stockroom_core::{NewProduct, PriceRange, Product, SortCriterion};

/// Lazy, finite, non-restartable sequence of products.
///
/// Holds the connection until it is exhausted or dropped.
pub type ProductStream<'a> = Pin<Box<dyn Stream<Item = DbResult<Product>> + Send + 'a>>;

/// Prefixes a tail clause with the product column list.
///
/// NULL cells (written by other tools) read back as empty text or zero.
macro_rules! select_products {
    ($tail:literal) => {
        concat!(
            "SELECT id, ",
            "COALESCE(name, '') AS name, ",
            "COALESCE(description, '') AS description, ",
            "COALESCE(quantity, 0) AS quantity, ",
            "COALESCE(price, 0.0) AS price ",
            "FROM products ",
            $tail
        )
    };
}

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.products();
///
/// let id = repo.insert(&NewProduct::new("Bolt", "M6", 100, 0.1)).await?;
/// let found = repo.update(id, &NewProduct::new("Bolt", "M8", 80, 0.15)).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
    case_sensitive_search: bool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool, case_sensitive_search: bool) -> Self {
        ProductRepository {
            pool,
            case_sensitive_search,
        }
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Inserts a new product.
    ///
    /// ## Returns
    /// * `Ok(id)` - The engine-assigned id of the new row
    pub async fn insert(&self, product: &NewProduct) -> DbResult<i64> {
        debug!(name = %product.name, "Inserting product");

        let result = sqlx::query(
            "INSERT INTO products (name, description, quantity, price) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(product.name.as_str())
        .bind(product.description.as_str())
        .bind(product.quantity)
        .bind(product.price)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        debug!(id, "Product inserted");
        Ok(id)
    }

    /// Overwrites every field of the product with the given id.
    ///
    /// ## Returns
    /// * `Ok(true)` - A row was updated
    /// * `Ok(false)` - No row has this id; nothing changed, still a success
    pub async fn update(&self, id: i64, product: &NewProduct) -> DbResult<bool> {
        debug!(id, "Updating product");

        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = ?1,
                description = ?2,
                quantity = ?3,
                price = ?4
            WHERE id = ?5
            "#,
        )
        .bind(product.name.as_str())
        .bind(product.description.as_str())
        .bind(product.quantity)
        .bind(product.price)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Deletes the product with the given id.
    ///
    /// ## Returns
    /// * `Ok(true)` - A row was removed
    /// * `Ok(false)` - No row has this id; nothing changed, still a success
    pub async fn delete(&self, id: i64) -> DbResult<bool> {
        debug!(id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // =========================================================================
    // Streaming reads
    // =========================================================================

    /// Streams every product in storage order.
    pub fn list_all(&self) -> ProductStream<'_> {
        debug!("Listing products");

        Box::pin(
            sqlx::query_as::<_, Product>(select_products!(""))
                .fetch(&self.pool)
                .map(|row| row.map_err(DbError::from)),
        )
    }

    /// Streams products whose name contains `substring`.
    ///
    /// An empty substring matches every product with a name.
    pub fn search_by_name(&self, substring: &str) -> ProductStream<'_> {
        debug!(
            substring = %substring,
            case_sensitive = self.case_sensitive_search,
            "Searching products by name"
        );

        let query = if self.case_sensitive_search {
            sqlx::query_as::<_, Product>(select_products!("WHERE instr(name, ?1) > 0"))
                .bind(substring.to_string())
        } else {
            sqlx::query_as::<_, Product>(select_products!(r"WHERE name LIKE ?1 ESCAPE '\'"))
                .bind(like_pattern(substring))
        };

        Box::pin(
            query
                .fetch(&self.pool)
                .map(|row| row.map_err(DbError::from)),
        )
    }

    /// Streams products priced within `range`, both ends included.
    ///
    /// An inverted range (`min > max`) yields nothing without querying.
    pub fn search_by_price_range(&self, range: PriceRange) -> ProductStream<'_> {
        debug!(min = range.min, max = range.max, "Searching products by price");

        if range.is_empty() {
            return Box::pin(tokio_stream::empty::<DbResult<Product>>());
        }

        Box::pin(
            sqlx::query_as::<_, Product>(select_products!("WHERE price BETWEEN ?1 AND ?2"))
                .bind(range.min)
                .bind(range.max)
                .fetch(&self.pool)
                .map(|row| row.map_err(DbError::from)),
        )
    }

    /// Streams every product in ascending order of `criterion`.
    ///
    /// Equal keys keep insertion (id) order.
    pub fn list_sorted(&self, criterion: SortCriterion) -> ProductStream<'_> {
        debug!(%criterion, "Listing sorted products");

        let sql = match criterion {
            SortCriterion::Name => select_products!("ORDER BY name, id"),
            SortCriterion::Price => select_products!("ORDER BY price, id"),
        };

        Box::pin(
            sqlx::query_as::<_, Product>(sql)
                .fetch(&self.pool)
                .map(|row| row.map_err(DbError::from)),
        )
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    /// Gets a product by its id.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(select_products!("WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    /// Counts stored products (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Builds a `LIKE` pattern matching `substring` anywhere, taken literally.
///
/// ```rust
/// use stockroom_db::repository::product::like_pattern;
///
/// assert_eq!(like_pattern("Pro"), "%Pro%");
/// assert_eq!(like_pattern("50%_off"), r"%50\%\_off%");
/// ```
pub fn like_pattern(substring: &str) -> String {
    let mut pattern = String::with_capacity(substring.len() + 2);
    pattern.push('%');
    for c in substring.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    async fn collect(mut rows: ProductStream<'_>) -> Vec<Product> {
        let mut products = Vec::new();
        while let Some(row) = rows.next().await {
            products.push(row.unwrap());
        }
        products
    }

    async fn seed(repo: &ProductRepository, products: &[NewProduct]) -> Vec<i64> {
        let mut ids = Vec::new();
        for product in products {
            ids.push(repo.insert(product).await.unwrap());
        }
        ids
    }

    fn names(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_insert_then_list_round_trips() {
        let db = test_db().await;
        let repo = db.products();

        let widget = NewProduct::new("Widget", "Blue widget", 3, 15.5);
        let gadget = NewProduct::new("", "", -1, -2.0);
        let ids = seed(&repo, &[widget.clone(), gadget.clone()]).await;

        assert_ne!(ids[0], ids[1]);

        let mut listed = collect(repo.list_all()).await;
        listed.sort_by_key(|p| p.id);
        assert_eq!(listed, vec![widget.with_id(ids[0]), gadget.with_id(ids[1])]);
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let db = test_db().await;
        let repo = db.products();

        let first = repo.insert(&NewProduct::new("a", "", 0, 0.0)).await.unwrap();
        let highest = repo.insert(&NewProduct::new("b", "", 0, 0.0)).await.unwrap();
        assert!(repo.delete(highest).await.unwrap());
        let next = repo.insert(&NewProduct::new("c", "", 0, 0.0)).await.unwrap();

        assert!(next > highest);
        assert_ne!(next, first);
        assert!(repo.get_by_id(highest).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_overwrites_only_target_row() {
        let db = test_db().await;
        let repo = db.products();
        let ids = seed(
            &repo,
            &[
                NewProduct::new("Widget", "Blue", 3, 15.0),
                NewProduct::new("Gadget", "Red", 5, 25.0),
            ],
        )
        .await;

        let replacement = NewProduct::new("Widget v2", "Green", 7, 17.5);
        assert!(repo.update(ids[0], &replacement).await.unwrap());

        assert_eq!(
            repo.get_by_id(ids[0]).await.unwrap(),
            Some(replacement.with_id(ids[0]))
        );
        assert_eq!(
            repo.get_by_id(ids[1]).await.unwrap(),
            Some(NewProduct::new("Gadget", "Red", 5, 25.0).with_id(ids[1]))
        );
    }

    #[tokio::test]
    async fn test_update_missing_id_succeeds_without_changes() {
        let db = test_db().await;
        let repo = db.products();
        let ids = seed(&repo, &[NewProduct::new("Widget", "Blue", 3, 15.0)]).await;

        let matched = repo
            .update(ids[0] + 100, &NewProduct::new("Ghost", "", 0, 0.0))
            .await
            .unwrap();

        assert!(!matched);
        assert_eq!(repo.count().await.unwrap(), 1);
        assert_eq!(names(&collect(repo.list_all()).await), vec!["Widget"]);
    }

    #[tokio::test]
    async fn test_delete_then_read() {
        let db = test_db().await;
        let repo = db.products();
        let ids = seed(
            &repo,
            &[
                NewProduct::new("Widget", "", 1, 1.0),
                NewProduct::new("Gadget", "", 2, 2.0),
            ],
        )
        .await;

        assert!(repo.delete(ids[0]).await.unwrap());
        assert_eq!(names(&collect(repo.list_all()).await), vec!["Gadget"]);

        // Deleting a missing id is not an error and changes nothing
        assert!(!repo.delete(ids[0]).await.unwrap());
        assert!(!repo.delete(9999).await.unwrap());
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_search_by_name_contains() {
        let db = test_db().await;
        let repo = db.products();
        seed(
            &repo,
            &[
                NewProduct::new("Product A", "", 1, 1.0),
                NewProduct::new("Other", "", 1, 1.0),
            ],
        )
        .await;

        assert_eq!(names(&collect(repo.search_by_name("Pro")).await), vec!["Product A"]);
        assert_eq!(names(&collect(repo.search_by_name("duct")).await), vec!["Product A"]);
        assert!(collect(repo.search_by_name("Missing")).await.is_empty());
    }

    #[tokio::test]
    async fn test_search_by_name_ignores_ascii_case_by_default() {
        let db = test_db().await;
        let repo = db.products();
        seed(&repo, &[NewProduct::new("Product A", "", 1, 1.0)]).await;

        assert_eq!(names(&collect(repo.search_by_name("pRO")).await), vec!["Product A"]);
    }

    #[tokio::test]
    async fn test_search_by_name_case_sensitive() {
        let db = Database::new(DbConfig::in_memory().case_sensitive_search(true))
            .await
            .unwrap();
        let repo = db.products();
        seed(&repo, &[NewProduct::new("Product A", "", 1, 1.0)]).await;

        assert!(collect(repo.search_by_name("pro")).await.is_empty());
        assert_eq!(names(&collect(repo.search_by_name("Pro")).await), vec!["Product A"]);
    }

    #[tokio::test]
    async fn test_search_by_name_treats_wildcards_literally() {
        let db = test_db().await;
        let repo = db.products();
        seed(
            &repo,
            &[
                NewProduct::new("50% off", "", 1, 1.0),
                NewProduct::new("500 off", "", 1, 1.0),
                NewProduct::new("a_b", "", 1, 1.0),
                NewProduct::new("axb", "", 1, 1.0),
            ],
        )
        .await;

        assert_eq!(names(&collect(repo.search_by_name("0%")).await), vec!["50% off"]);
        assert_eq!(names(&collect(repo.search_by_name("a_b")).await), vec!["a_b"]);
    }

    #[tokio::test]
    async fn test_search_by_empty_name_matches_everything() {
        let db = test_db().await;
        let repo = db.products();
        seed(
            &repo,
            &[
                NewProduct::new("Widget", "", 1, 1.0),
                NewProduct::new("", "", 1, 1.0),
            ],
        )
        .await;

        assert_eq!(collect(repo.search_by_name("")).await.len(), 2);
    }

    #[tokio::test]
    async fn test_search_by_price_range_inclusive() {
        let db = test_db().await;
        let repo = db.products();
        seed(
            &repo,
            &[
                NewProduct::new("five", "", 1, 5.0),
                NewProduct::new("fifteen", "", 1, 15.0),
                NewProduct::new("twenty-five", "", 1, 25.0),
            ],
        )
        .await;

        let found = collect(repo.search_by_price_range(PriceRange::new(10.0, 20.0))).await;
        assert_eq!(names(&found), vec!["fifteen"]);

        let edges = collect(repo.search_by_price_range(PriceRange::new(5.0, 15.0))).await;
        assert_eq!(edges.len(), 2);
    }

    #[tokio::test]
    async fn test_inverted_price_range_is_empty_not_error() {
        let db = test_db().await;
        let repo = db.products();
        seed(&repo, &[NewProduct::new("fifteen", "", 1, 15.0)]).await;

        let found = collect(repo.search_by_price_range(PriceRange::new(20.0, 10.0))).await;
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_inverted_price_range_skips_storage() {
        let db = Database::new(DbConfig::in_memory().ensure_schema(false))
            .await
            .unwrap();
        let repo = db.products();

        // No table: any query would fail
        let found = collect(repo.search_by_price_range(PriceRange::new(20.0, 10.0))).await;
        assert!(found.is_empty());
        assert!(repo.count().await.is_err());
    }

    #[tokio::test]
    async fn test_list_sorted_by_price() {
        let db = test_db().await;
        let repo = db.products();
        seed(
            &repo,
            &[
                NewProduct::new("thirty", "", 1, 30.0),
                NewProduct::new("ten", "", 1, 10.0),
                NewProduct::new("twenty", "", 1, 20.0),
            ],
        )
        .await;

        let sorted = collect(repo.list_sorted(SortCriterion::Price)).await;
        let prices: Vec<f64> = sorted.iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![10.0, 20.0, 30.0]);
    }

    #[tokio::test]
    async fn test_list_sorted_by_name_breaks_ties_by_id() {
        let db = test_db().await;
        let repo = db.products();
        let ids = seed(
            &repo,
            &[
                NewProduct::new("bolt", "second", 1, 1.0),
                NewProduct::new("anchor", "", 1, 1.0),
                NewProduct::new("bolt", "first", 1, 1.0),
            ],
        )
        .await;

        let sorted = collect(repo.list_sorted(SortCriterion::Name)).await;
        let order: Vec<i64> = sorted.iter().map(|p| p.id).collect();
        assert_eq!(order, vec![ids[1], ids[0], ids[2]]);
    }

    #[tokio::test]
    async fn test_bogus_criterion_is_rejected_before_storage() {
        let db = test_db().await;
        let repo = db.products();
        seed(&repo, &[NewProduct::new("Widget", "", 1, 1.0)]).await;

        let parsed = "bogus".parse::<SortCriterion>();
        assert!(parsed.is_err());
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_null_cells_read_back_as_defaults() {
        let db = test_db().await;
        sqlx::query("INSERT INTO products (id) VALUES (5)")
            .execute(db.pool())
            .await
            .unwrap();

        let product = db.products().get_by_id(5).await.unwrap().unwrap();
        assert_eq!(product, NewProduct::new("", "", 0, 0.0).with_id(5));
    }

    #[tokio::test]
    async fn test_query_on_missing_table_fails() {
        let db = Database::new(DbConfig::in_memory().ensure_schema(false))
            .await
            .unwrap();

        let err = db
            .products()
            .insert(&NewProduct::new("a", "", 1, 1.0))
            .await
            .unwrap_err();
        match err {
            DbError::QueryFailed(message) => assert!(message.contains("no such table")),
            other => panic!("unexpected error: {other:?}"),
        }

        let products = db.products();
        let mut rows = products.list_all();
        let first = rows.next().await.unwrap();
        assert!(matches!(first, Err(DbError::QueryFailed(_))));
    }

    #[test]
    fn test_like_pattern_escapes_backslash() {
        assert_eq!(like_pattern(r"a\b"), r"%a\\b%");
        assert_eq!(like_pattern(""), "%%");
    }
}

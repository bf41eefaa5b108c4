// Postgres CRUD and paginated search for products
//
// Implements:
// - Create product (store assigns id and timestamps via RETURNING *)
// - Read product by id or exact name
// - Batch read by id list (missing ids silently omitted)
// - Update mutable fields, refreshing updated_at
// - Delete by id (no-op when the id does not exist)
// - Paginated search with sort allow-list and ILIKE name filter

use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::traits::repository::{
    resolve_sort_field, Repository, SearchInput, SearchOutput, DEFAULT_SORT_FIELD,
};
use crate::core::Result;
use crate::modules::products::models::{CreateProductProps, Product, ProductId};

/// Product-specific repository contract, on top of the generic CRUD surface
#[async_trait]
pub trait ProductsRepository: Repository<Product, CreateProductProps> {
    /// Find the product whose name matches exactly
    async fn find_by_name(&self, name: &str) -> Result<Option<Product>>;

    /// Find every product whose id appears in `ids`. Order is not guaranteed
    /// and ids with no matching row are omitted without error.
    async fn find_all_by_ids(&self, ids: &[ProductId]) -> Result<Vec<Product>>;
}

/// Postgres adapter for the products table
pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    /// Columns a caller may sort by. Sort fields end up interpolated into the
    /// ORDER BY clause, so anything outside this list falls back to
    /// `created_at` instead of reaching the SQL text.
    pub const SORTABLE_FIELDS: &'static [&'static str] = &["name", "created_at"];

    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn like_pattern(filter: &str) -> String {
    format!("%{filter}%")
}

#[async_trait]
impl Repository<Product, CreateProductProps> for PgProductRepository {
    async fn create(&self, props: CreateProductProps) -> Result<Product> {
        let product = sqlx::query_as::<_, Product>(
            "INSERT INTO products (name, price, quantity) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(&props.name)
        .bind(props.price)
        .bind(props.quantity)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(id = %product.id, name = %product.name, "created product");

        Ok(product)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Product>> {
        let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    async fn update(&self, model: Product) -> Result<Option<Product>> {
        let updated = sqlx::query_as::<_, Product>(
            "UPDATE products \
             SET name = $1, price = $2, quantity = $3, updated_at = now() \
             WHERE id = $4 \
             RETURNING *",
        )
        .bind(&model.name)
        .bind(model.price)
        .bind(model.quantity)
        .bind(&model.id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        // Deleting a missing id is indistinguishable from a successful
        // delete; callers that care must check existence first.
        sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn select_all(&self, input: SearchInput) -> Result<SearchOutput<Product>> {
        let sort = resolve_sort_field(
            Self::SORTABLE_FIELDS,
            input.sort.as_deref(),
            DEFAULT_SORT_FIELD,
        );
        let direction = input.sort_direction();
        let page = input.page();
        let per_page = input.per_page();
        let offset = input.offset();

        // Count and page share the same predicate so total stays consistent
        // with the returned items.
        let (page_sql, count_sql) = if input.filter.is_some() {
            (
                format!(
                    "SELECT * FROM products WHERE name ILIKE $1 \
                     ORDER BY {sort} {dir} LIMIT $2 OFFSET $3",
                    dir = direction.as_sql()
                ),
                "SELECT COUNT(*) FROM products WHERE name ILIKE $1",
            )
        } else {
            (
                format!(
                    "SELECT * FROM products ORDER BY {sort} {dir} LIMIT $1 OFFSET $2",
                    dir = direction.as_sql()
                ),
                "SELECT COUNT(*) FROM products",
            )
        };

        let pattern = input.filter.as_deref().map(like_pattern);

        let mut count_query = sqlx::query_scalar::<_, i64>(count_sql);
        let mut page_query = sqlx::query_as::<_, Product>(&page_sql);
        if let Some(pattern) = &pattern {
            count_query = count_query.bind(pattern);
            page_query = page_query.bind(pattern);
        }
        page_query = page_query.bind(per_page).bind(offset);

        tracing::debug!(
            sort,
            dir = direction.as_sql(),
            page,
            per_page,
            filtered = pattern.is_some(),
            "searching products"
        );

        let (total, items) = tokio::try_join!(
            count_query.fetch_one(&self.pool),
            page_query.fetch_all(&self.pool),
        )?;

        Ok(SearchOutput {
            items,
            per_page,
            total,
            current_page: page,
            sort: sort.to_string(),
            sort_dir: direction.as_sql().to_string(),
            filter: input.filter,
        })
    }
}

#[async_trait]
impl ProductsRepository for PgProductRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Product>> {
        let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    async fn find_all_by_ids(&self, ids: &[ProductId]) -> Result<Vec<Product>> {
        let id_values: Vec<String> = ids.iter().map(|product_id| product_id.id.clone()).collect();

        let products =
            sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = ANY($1)")
                .bind(&id_values)
                .fetch_all(&self.pool)
                .await?;

        Ok(products)
    }
}

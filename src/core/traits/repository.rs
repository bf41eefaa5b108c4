use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::error::Result;

/// Default page number when the caller does not supply one
pub const DEFAULT_PAGE: i64 = 1;
/// Default page size when the caller does not supply one
pub const DEFAULT_PER_PAGE: i64 = 10;
/// Sort field used whenever the requested one is not allow-listed
pub const DEFAULT_SORT_FIELD: &str = "created_at";

/// Search and pagination parameters accepted by `Repository::select_all`.
///
/// All fields are optional; resolution rules live in the accessors so every
/// adapter applies the same defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchInput {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub sort: Option<String>,
    pub sort_dir: Option<String>,
    pub filter: Option<String>,
}

impl SearchInput {
    /// Resolved page number, 1-based. Non-positive pages clamp to 1 so the
    /// offset handed to the store is never negative.
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(DEFAULT_PAGE).max(1)
    }

    /// Resolved page size, always at least 1.
    pub fn per_page(&self) -> i64 {
        self.per_page.unwrap_or(DEFAULT_PER_PAGE).max(1)
    }

    /// Row offset for the resolved page. Saturates instead of overflowing
    /// for absurdly large page numbers.
    pub fn offset(&self) -> i64 {
        (self.page() - 1).saturating_mul(self.per_page())
    }

    /// Resolved sort direction.
    pub fn sort_direction(&self) -> SortDirection {
        SortDirection::resolve(self.sort_dir.as_deref())
    }
}

/// Sort order for `select_all`, resolved from caller input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Case-insensitive match against "asc"; anything else, including an
    /// omitted value, resolves to descending.
    pub fn resolve(raw: Option<&str>) -> Self {
        match raw {
            Some(dir) if dir.eq_ignore_ascii_case("asc") => SortDirection::Asc,
            _ => SortDirection::Desc,
        }
    }

    /// Uppercase SQL keyword for the ORDER BY clause.
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Pick the sort column for an ORDER BY clause.
///
/// The requested field must appear in the adapter's allow-list, otherwise the
/// fallback is used. Sort fields are interpolated into SQL text (they cannot
/// be bound parameters), so this check is the injection boundary.
pub fn resolve_sort_field<'a>(
    allowed: &[&'a str],
    requested: Option<&str>,
    fallback: &'a str,
) -> &'a str {
    match requested {
        Some(field) => allowed
            .iter()
            .copied()
            .find(|candidate| *candidate == field)
            .unwrap_or(fallback),
        None => fallback,
    }
}

/// One page of results plus the pagination metadata echoed back to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchOutput<Model> {
    pub items: Vec<Model>,
    pub per_page: i64,
    pub total: i64,
    pub current_page: i64,
    /// Sort field actually applied after allow-list resolution
    pub sort: String,
    /// Uppercase direction actually applied
    pub sort_dir: String,
    /// Filter exactly as received, untrimmed
    pub filter: Option<String>,
}

/// Base repository trait for CRUD operations
/// All repositories should implement this trait for consistency
///
/// "Not found" on reads is an absence, not an error: `find_by_id` and
/// `update` return `Ok(None)` when no row matches. Store failures propagate
/// unchanged as `AppError::Database`.
#[async_trait]
pub trait Repository<Model, CreateProps>: Send + Sync {
    /// Persist a new entity; the store assigns the id and timestamps
    async fn create(&self, props: CreateProps) -> Result<Model>;

    /// Find entity by ID
    async fn find_by_id(&self, id: &str) -> Result<Option<Model>>;

    /// Rewrite the mutable fields of an existing entity
    async fn update(&self, model: Model) -> Result<Option<Model>>;

    /// Delete an entity by ID. Deleting an id that does not exist is a
    /// silent no-op.
    async fn delete(&self, id: &str) -> Result<()>;

    /// Paginated search across all entities
    async fn select_all(&self, input: SearchInput) -> Result<SearchOutput<Model>>;
}

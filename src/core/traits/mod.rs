pub mod repository;

pub use repository::{
    resolve_sort_field, Repository, SearchInput, SearchOutput, SortDirection,
};

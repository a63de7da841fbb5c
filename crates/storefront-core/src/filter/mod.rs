//! Filter, sort and paginate pipeline over the catalog.
//!
//! Everything here is a pure function of its inputs; memoization lives in the
//! application layer.

pub mod engine;
pub mod model;
pub mod page;

pub use engine::{
    SearchQuery, filter_and_sort, filter_by_category, filter_by_search, filter_products,
    locale_compare, sort_products,
};
pub use model::{ALL_CATEGORIES, CategoryFilter, FilterSpec, SortOrder};
pub use page::{DEFAULT_PER_PAGE, PageView, paginate};

//! Filter, search and sort over a product list.
//!
//! Category and search filters commute, so the cheap category equality check
//! runs first and the substring search only sees what survives it.

use std::cmp::Ordering;

use crate::filter::{CategoryFilter, FilterSpec, SortOrder};
use crate::product::Product;

/// Lower-cased search needle. An empty term matches everything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    needle: String,
}

impl SearchQuery {
    pub fn new(term: &str) -> Self {
        Self {
            needle: term.to_lowercase(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    /// Substring match against title, category or description, ignoring case.
    pub fn matches(&self, product: &Product) -> bool {
        self.is_empty()
            || [&product.title, &product.category, &product.description]
                .iter()
                .any(|field| field.to_lowercase().contains(&self.needle))
    }
}

/// Keeps products in `category`, preserving order.
pub fn filter_by_category<'a, I>(products: I, category: &CategoryFilter) -> Vec<Product>
where
    I: IntoIterator<Item = &'a Product>,
{
    products
        .into_iter()
        .filter(|product| category.matches(&product.category))
        .cloned()
        .collect()
}

/// Keeps products matching `term`, preserving order.
pub fn filter_by_search<'a, I>(products: I, term: &str) -> Vec<Product>
where
    I: IntoIterator<Item = &'a Product>,
{
    let query = SearchQuery::new(term);
    products
        .into_iter()
        .filter(|product| query.matches(product))
        .cloned()
        .collect()
}

/// Applies both filters in one pass, category first.
pub fn filter_products(products: &[Product], category: &CategoryFilter, term: &str) -> Vec<Product> {
    let query = SearchQuery::new(term);
    products
        .iter()
        .filter(|product| category.matches(&product.category))
        .filter(|product| query.matches(product))
        .cloned()
        .collect()
}

/// Stable in-place sort. `SortOrder::Default` leaves the order untouched.
pub fn sort_products(products: &mut [Product], order: SortOrder) {
    match order {
        SortOrder::Default => {}
        SortOrder::PriceAsc => products.sort_by(|a, b| compare_price(a.price, b.price)),
        SortOrder::PriceDesc => products.sort_by(|a, b| compare_price(b.price, a.price)),
        SortOrder::NameAsc => products.sort_by(|a, b| locale_compare(&a.title, &b.title)),
        SortOrder::NameDesc => products.sort_by(|a, b| locale_compare(&b.title, &a.title)),
    }
}

/// Filters by category and search term, then sorts.
pub fn filter_and_sort(products: &[Product], spec: &FilterSpec, term: &str) -> Vec<Product> {
    let mut filtered = filter_products(products, &spec.category, term);
    sort_products(&mut filtered, spec.sort);
    filtered
}

fn compare_price(a: f64, b: f64) -> Ordering {
    a.total_cmp(&b)
}

/// Case-insensitive ordering in the spirit of a locale collator.
///
/// Letters compare by their lower-case form first; on a tie the lower-case
/// spelling sorts before the upper-case one ("apple" < "Apple" < "banana"),
/// and only then does the raw byte order decide.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    folded
        .then_with(|| {
            a.chars()
                .map(char::is_uppercase)
                .cmp(b.chars().map(char::is_uppercase))
        })
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::ProductId;

    fn product(id: u64, title: &str, category: &str, price: f64, description: &str) -> Product {
        Product {
            id: ProductId::Numeric(id),
            title: title.to_string(),
            category: category.to_string(),
            price,
            image: String::new(),
            description: description.to_string(),
            rating: None,
        }
    }

    fn catalog() -> Vec<Product> {
        vec![
            product(1, "Backpack", "men's clothing", 109.95, "Everyday pack"),
            product(2, "Slim Fit T-Shirt", "men's clothing", 22.3, "Slim fitting style"),
            product(3, "Gold Bracelet", "jewelery", 695.0, "Dragon station chain"),
            product(4, "SSD 1TB", "electronics", 109.0, "Fast storage"),
            product(5, "monitor 27in", "electronics", 599.0, "Gaming display"),
            product(6, "Rain Jacket", "women's clothing", 39.99, "Lightweight backpack-friendly"),
        ]
    }

    fn ids(products: &[Product]) -> Vec<u64> {
        products
            .iter()
            .map(|p| match p.id {
                ProductId::Numeric(id) => id,
                ProductId::Text(_) => 0,
            })
            .collect()
    }

    #[test]
    fn test_identity() {
        let products = catalog();
        assert_eq!(filter_and_sort(&products, &FilterSpec::identity(), ""), products);
    }

    #[test]
    fn test_category_filter() {
        let spec = FilterSpec::identity().with_category(CategoryFilter::only("electronics"));
        assert_eq!(ids(&filter_and_sort(&catalog(), &spec, "")), vec![4, 5]);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let products = catalog();
        assert_eq!(ids(&filter_by_search(&products, "BACKPACK")), vec![1, 6]);
        assert_eq!(ids(&filter_by_search(&products, "cloth")), vec![1, 2, 6]);
        assert_eq!(ids(&filter_by_search(&products, "dragon")), vec![3]);
        assert!(filter_by_search(&products, "slim fit shirt").is_empty());
    }

    #[test]
    fn test_filters_commute() {
        let products = catalog();
        let categories = [
            CategoryFilter::All,
            CategoryFilter::only("men's clothing"),
            CategoryFilter::only("electronics"),
            CategoryFilter::only("missing"),
        ];
        let terms = ["", "a", "back", "GOLD", "s", "zzz"];

        for category in &categories {
            for term in terms {
                let category_first = filter_by_search(&filter_by_category(&products, category), term);
                let search_first = filter_by_category(&filter_by_search(&products, term), category);
                assert_eq!(category_first, search_first, "{category} / {term}");
                assert_eq!(filter_products(&products, category, term), category_first);
            }
        }
    }

    #[test]
    fn test_price_orders_are_reverses_without_ties() {
        let products = catalog();
        let asc = filter_and_sort(&products, &FilterSpec::identity().with_sort(SortOrder::PriceAsc), "");
        let mut desc =
            filter_and_sort(&products, &FilterSpec::identity().with_sort(SortOrder::PriceDesc), "");
        assert_eq!(ids(&asc), vec![2, 6, 4, 1, 5, 3]);
        desc.reverse();
        assert_eq!(asc, desc);
    }

    #[test]
    fn test_price_sort_is_stable_on_ties() {
        let products = vec![
            product(1, "A", "x", 5.0, ""),
            product(2, "B", "x", 1.0, ""),
            product(3, "C", "x", 5.0, ""),
            product(4, "D", "x", 1.0, ""),
        ];
        let spec = FilterSpec::identity().with_sort(SortOrder::PriceAsc);
        assert_eq!(ids(&filter_and_sort(&products, &spec, "")), vec![2, 4, 1, 3]);
        let spec = FilterSpec::identity().with_sort(SortOrder::PriceDesc);
        assert_eq!(ids(&filter_and_sort(&products, &spec, "")), vec![1, 3, 2, 4]);
    }

    #[test]
    fn test_price_sort_places_nan_last() {
        let products = vec![
            product(1, "A", "x", f64::NAN, ""),
            product(2, "B", "x", 3.0, ""),
            product(3, "C", "x", 1.0, ""),
            product(4, "D", "x", 2.0, ""),
        ];
        let spec = FilterSpec::identity().with_sort(SortOrder::PriceAsc);
        assert_eq!(ids(&filter_and_sort(&products, &spec, "")), vec![3, 4, 2, 1]);
        let spec = FilterSpec::identity().with_sort(SortOrder::PriceDesc);
        assert_eq!(ids(&filter_and_sort(&products, &spec, "")), vec![1, 2, 4, 3]);
    }

    #[test]
    fn test_name_sort_ignores_case() {
        let spec = FilterSpec::identity().with_sort(SortOrder::NameAsc);
        assert_eq!(ids(&filter_and_sort(&catalog(), &spec, "")), vec![1, 3, 5, 6, 2, 4]);

        let spec = FilterSpec::identity().with_sort(SortOrder::NameDesc);
        assert_eq!(ids(&filter_and_sort(&catalog(), &spec, "")), vec![4, 2, 6, 5, 3, 1]);
    }

    #[test]
    fn test_locale_compare() {
        assert_eq!(locale_compare("apple", "Banana"), Ordering::Less);
        assert_eq!(locale_compare("apple", "Apple"), Ordering::Less);
        assert_eq!(locale_compare("Apple", "apple"), Ordering::Greater);
        assert_eq!(locale_compare("same", "same"), Ordering::Equal);
        assert_eq!(locale_compare("ab", "abc"), Ordering::Less);
    }
}

//! Filter/query evaluator.
//!
//! Pure, deterministic evaluation of a [`ProductFilter`] over an in-memory
//! collection: conjunctive predicates, a stable sort, then a page slice.
//! The in-memory repository runs entirely on this module; the raw-SQL
//! repository reuses the page slice after the database has filtered and
//! sorted.

use crate::models::{Product, ProductFilter, ProductPage, SortField};

/// Page size applied when a caller passes a value below 1.
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// True when the product passes every predicate of the filter. Predicates
/// are independent and AND-combined.
pub fn matches(product: &Product, filter: &ProductFilter) -> bool {
    if let Some(active) = filter.is_active {
        if product.is_active() != active {
            return false;
        }
    }

    if let Some(fragment) = filter.name_fragment() {
        if !product
            .name()
            .to_lowercase()
            .contains(&fragment.to_lowercase())
        {
            return false;
        }
    }

    if let Some(min) = filter.min_price {
        if product.price() < min {
            return false;
        }
    }

    if let Some(max) = filter.max_price {
        if product.price() > max {
            return false;
        }
    }

    true
}

/// Stable sort by the resolved sort key. Equal keys keep their original
/// relative order in both directions, so repeated calls paginate
/// deterministically.
pub fn sort(products: &mut [Product], field: SortField, ascending: bool) {
    match (field, ascending) {
        (SortField::Name, true) => products.sort_by(|a, b| a.name().cmp(b.name())),
        (SortField::Name, false) => products.sort_by(|a, b| b.name().cmp(a.name())),
        (SortField::Price, true) => products.sort_by(|a, b| a.price().cmp(&b.price())),
        (SortField::Price, false) => products.sort_by(|a, b| b.price().cmp(&a.price())),
    }
}

/// Slice out the requested page: skip `(page-1) * page_size`, take up to
/// `page_size`. A page past the end yields an empty vector.
pub fn paginate<T>(items: Vec<T>, filter: &ProductFilter) -> Vec<T> {
    items
        .into_iter()
        .skip(filter.offset() as usize)
        .take(filter.effective_page_size() as usize)
        .collect()
}

/// Full evaluation: filter, count, stable-sort, slice.
///
/// The total count is taken after filtering and before pagination, so it is
/// independent of `page`/`page_size`.
pub fn evaluate(products: &[Product], filter: &ProductFilter) -> ProductPage {
    let mut matching: Vec<Product> = products
        .iter()
        .filter(|p| matches(p, filter))
        .cloned()
        .collect();

    let total_count = matching.len() as u64;

    sort(&mut matching, filter.sort_field(), filter.ascending);

    ProductPage {
        products: paginate(matching, filter),
        total_count,
    }
}

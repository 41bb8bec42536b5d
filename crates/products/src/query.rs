//! Read-only views over product records: filtering, pagination, search, and
//! per-category aggregation. Nothing here touches the store.

use std::collections::BTreeMap;

use catalog_core::{DomainError, DomainResult};

use crate::product::Product;

/// Category → record count. Only categories that occur are present.
pub type CategoryStats = BTreeMap<String, usize>;

/// Records whose category equals `category` exactly (case-sensitive).
/// `None` keeps everything.
pub fn filter_by_category(records: Vec<Product>, category: Option<&str>) -> Vec<Product> {
    match category {
        Some(category) => records
            .into_iter()
            .filter(|p| p.category() == category)
            .collect(),
        None => records,
    }
}

/// Records whose name contains `query`, ignoring case.
///
/// An empty query matches everything; a missing one is an input error.
pub fn search_by_name(records: Vec<Product>, query: Option<&str>) -> DomainResult<Vec<Product>> {
    let query = query.ok_or_else(|| DomainError::invalid_input("query parameter `q` is required"))?;
    let needle = query.to_lowercase();

    Ok(records
        .into_iter()
        .filter(|p| p.name().to_lowercase().contains(&needle))
        .collect())
}

/// Count records per category.
pub fn aggregate_by_category(records: &[Product]) -> CategoryStats {
    let mut stats = CategoryStats::new();
    for product in records {
        *stats.entry(product.category().to_string()).or_insert(0) += 1;
    }
    stats
}

/// Category filter followed by pagination; `total` counts the filtered set.
pub fn list(records: Vec<Product>, category: Option<&str>, request: PageRequest) -> Page<Product> {
    paginate(filter_by_category(records, category), request)
}

/// Raw pagination input as supplied by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageRequest {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl PageRequest {
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        Self { page, limit }
    }

    /// Lenient parse of query-string values: `"2"`, `" 2"`, `"2abc"` all give 2;
    /// text without a leading integer counts as absent.
    pub fn parse(page: Option<&str>, limit: Option<&str>) -> Self {
        Self {
            page: page.and_then(parse_leading_int),
            limit: limit.and_then(parse_leading_int),
        }
    }
}

/// One window of a record sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Resolved 1-based page number.
    pub page: usize,
    /// Resolved page size.
    pub limit: usize,
    /// Length of the sequence before slicing.
    pub total: usize,
    pub items: Vec<T>,
}

/// Slice `records` into the window described by `request`.
///
/// `page` falls back to 1 and `limit` to the full length when absent or
/// below 1. A window starting past the end is empty.
pub fn paginate<T>(records: Vec<T>, request: PageRequest) -> Page<T> {
    let total = records.len();
    let page = positive(request.page).unwrap_or(1);
    let limit = positive(request.limit).unwrap_or(total);

    let start = (page - 1).saturating_mul(limit);
    let end = start.saturating_add(limit).min(total);

    let items = if start >= total {
        Vec::new()
    } else {
        records.into_iter().skip(start).take(end - start).collect()
    };

    Page {
        page,
        limit,
        total,
        items,
    }
}

fn positive(value: Option<i64>) -> Option<usize> {
    value
        .filter(|v| *v >= 1)
        .map(|v| usize::try_from(v).unwrap_or(usize::MAX))
}

fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    let digits = &rest[..digits_len];
    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::NewProduct;
    use crate::store::{InMemoryProductStore, ProductRepository};

    fn seeded(items: &[(&str, &str)]) -> Vec<Product> {
        let store = InMemoryProductStore::new();
        for (name, category) in items {
            store.insert(NewProduct::new(*name, 1.0, *category));
        }
        store.list_all()
    }

    fn numbered(count: usize) -> Vec<Product> {
        let names: Vec<String> = (0..count).map(|i| i.to_string()).collect();
        let items: Vec<(&str, &str)> = names.iter().map(|n| (n.as_str(), "c")).collect();
        seeded(&items)
    }

    fn names(products: &[Product]) -> Vec<&str> {
        products.iter().map(Product::name).collect()
    }

    #[test]
    fn filter_is_exact_and_case_sensitive() {
        let records = seeded(&[("a", "Tools"), ("b", "tools"), ("c", "Tools"), ("d", "Toolset")]);

        let filtered = filter_by_category(records.clone(), Some("Tools"));
        assert_eq!(names(&filtered), vec!["a", "c"]);

        assert_eq!(filter_by_category(records.clone(), None), records);
        assert!(filter_by_category(records, Some("garden")).is_empty());
    }

    #[test]
    fn second_page_of_three() {
        let page = paginate(numbered(10), PageRequest::new(Some(2), Some(3)));

        assert_eq!(page.page, 2);
        assert_eq!(page.limit, 3);
        assert_eq!(page.total, 10);
        assert_eq!(names(&page.items), vec!["3", "4", "5"]);
    }

    #[test]
    fn last_page_is_short() {
        let page = paginate(numbered(10), PageRequest::new(Some(4), Some(3)));
        assert_eq!(names(&page.items), vec!["9"]);
        assert_eq!(page.total, 10);
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let page = paginate(numbered(10), PageRequest::new(Some(5), Some(3)));
        assert!(page.items.is_empty());
        assert_eq!(page.total, 10);
    }

    #[test]
    fn defaults_return_everything_on_one_page() {
        let page = paginate(numbered(4), PageRequest::default());
        assert_eq!(page.page, 1);
        assert_eq!(page.limit, 4);
        assert_eq!(page.items.len(), 4);
    }

    #[test]
    fn empty_input_has_zero_limit_and_no_items() {
        let page = paginate(Vec::<Product>::new(), PageRequest::default());
        assert_eq!(page.page, 1);
        assert_eq!(page.limit, 0);
        assert_eq!(page.total, 0);
        assert!(page.items.is_empty());
    }

    #[test]
    fn non_positive_values_fall_back_to_defaults() {
        let page = paginate(numbered(5), PageRequest::new(Some(0), Some(-2)));
        assert_eq!(page.page, 1);
        assert_eq!(page.limit, 5);
        assert_eq!(page.items.len(), 5);

        let page = paginate(numbered(5), PageRequest::new(Some(-3), Some(2)));
        assert_eq!(page.page, 1);
        assert_eq!(names(&page.items), vec!["0", "1"]);
    }

    #[test]
    fn huge_page_does_not_overflow() {
        let page = paginate(numbered(3), PageRequest::new(Some(i64::MAX), Some(i64::MAX)));
        assert!(page.items.is_empty());
        assert_eq!(page.total, 3);
    }

    #[test]
    fn page_request_parses_leniently() {
        assert_eq!(
            PageRequest::parse(Some("2"), Some("10")),
            PageRequest::new(Some(2), Some(10))
        );
        assert_eq!(
            PageRequest::parse(Some(" 3abc"), Some("+4")),
            PageRequest::new(Some(3), Some(4))
        );
        assert_eq!(
            PageRequest::parse(Some("-1"), Some("1.9")),
            PageRequest::new(Some(-1), Some(1))
        );
        assert_eq!(
            PageRequest::parse(Some("abc"), Some("")),
            PageRequest::new(None, None)
        );
        assert_eq!(PageRequest::parse(None, Some("-")), PageRequest::default());
    }

    #[test]
    fn list_reports_total_after_filter() {
        let records = seeded(&[("a", "x"), ("b", "y"), ("c", "x"), ("d", "x")]);
        let page = list(records, Some("x"), PageRequest::new(Some(1), Some(2)));

        assert_eq!(page.total, 3);
        assert_eq!(names(&page.items), vec!["a", "c"]);
    }

    #[test]
    fn search_ignores_case() {
        let records = seeded(&[("Widget", "a"), ("gadget", "a"), ("WIDGET-X", "b")]);
        let found = search_by_name(records, Some("widget")).unwrap();
        assert_eq!(names(&found), vec!["Widget", "WIDGET-X"]);
    }

    #[test]
    fn empty_search_matches_everything() {
        let records = seeded(&[("Widget", "a"), ("gadget", "a")]);
        let found = search_by_name(records.clone(), Some("")).unwrap();
        assert_eq!(found, records);
    }

    #[test]
    fn search_without_query_is_invalid_input() {
        let err = search_by_name(seeded(&[("Widget", "a")]), None).unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }

    #[test]
    fn aggregation_counts_each_category() {
        let records = seeded(&[("1", "a"), ("2", "a"), ("3", "b")]);
        let stats = aggregate_by_category(&records);

        let expected: CategoryStats = [("a".to_string(), 2), ("b".to_string(), 1)]
            .into_iter()
            .collect();
        assert_eq!(stats, expected);
    }

    #[test]
    fn aggregation_of_nothing_is_empty() {
        assert!(aggregate_by_category(&[]).is_empty());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: a page is exactly the corresponding slice of the input.
            #[test]
            fn page_matches_slice(len in 0usize..60, page in 1i64..20, limit in 1i64..20) {
                let records: Vec<usize> = (0..len).collect();
                let result = paginate(records.clone(), PageRequest::new(Some(page), Some(limit)));

                let start = ((page - 1) * limit) as usize;
                let end = (start + limit as usize).min(len);
                let expected = if start >= len { Vec::new() } else { records[start..end].to_vec() };

                prop_assert_eq!(result.total, len);
                prop_assert!(result.items.len() <= limit as usize);
                prop_assert_eq!(result.items, expected);
            }

            /// Property: every record lands in exactly one category bucket.
            #[test]
            fn aggregation_accounts_for_every_record(
                categories in prop::collection::vec("[a-c]{1,2}", 0..40)
            ) {
                let items: Vec<(&str, &str)> = categories.iter().map(|c| ("p", c.as_str())).collect();
                let records = seeded(&items);
                let stats = aggregate_by_category(&records);

                prop_assert_eq!(stats.values().sum::<usize>(), records.len());
                prop_assert!(stats.values().all(|count| *count > 0));
                for (category, count) in &stats {
                    let filtered = filter_by_category(records.clone(), Some(category.as_str()));
                    prop_assert_eq!(filtered.len(), *count);
                }
            }
        }
    }
}

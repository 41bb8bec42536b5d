use catalog_products::{Page, PageRequest, Product};

// -------------------------
// Query DTOs
// -------------------------

/// Raw query string pairs in arrival order. Repeated keys are kept.
pub type QueryPairs = Vec<(String, String)>;

/// First value supplied for `key`; later repeats are ignored.
fn first_value(pairs: &[(String, String)], key: &str) -> Option<String> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.clone())
}

/// `GET /api/products` query string. Values stay raw text; parsing is lenient.
#[derive(Debug, Default)]
pub struct ListProductsQuery {
    pub category: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl ListProductsQuery {
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            category: first_value(pairs, "category"),
            page: first_value(pairs, "page"),
            limit: first_value(pairs, "limit"),
        }
    }

    /// An empty `category=` means no filter.
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.is_empty())
    }

    pub fn page_request(&self) -> PageRequest {
        PageRequest::parse(self.page.as_deref(), self.limit.as_deref())
    }
}

/// `GET /api/products/search/name` query string.
#[derive(Debug, Default)]
pub struct SearchQuery {
    pub q: Option<String>,
}

impl SearchQuery {
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            q: first_value(pairs, "q"),
        }
    }
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn page_to_json(page: Page<Product>) -> serde_json::Value {
    serde_json::json!({
        "page": page.page,
        "limit": page.limit,
        "total": page.total,
        "products": page.items,
    })
}

//! List query parameters

use crate::config::ListDefaults;

/// Caller-supplied list parameters, merged over the configured defaults
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub page_size: Option<u32>,
    pub page: Option<u32>,
    pub total_required: Option<bool>,
    /// Endpoint specific filters, e.g. `product_id` for plans
    pub filters: Vec<(String, String)>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn total_required(mut self, total_required: bool) -> Self {
        self.total_required = Some(total_required);
        self
    }

    pub fn filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((key.into(), value.into()));
        self
    }

    /// Query pairs in wire order: `page_size`, `total_required`, `page`, then filters.
    /// A filter naming one of the first three overrides it in place.
    pub fn into_pairs(self, defaults: ListDefaults) -> Vec<(String, String)> {
        let mut pairs = vec![
            (
                "page_size".to_string(),
                self.page_size.unwrap_or(defaults.page_size).to_string(),
            ),
            (
                "total_required".to_string(),
                self.total_required
                    .unwrap_or(defaults.total_required)
                    .to_string(),
            ),
            (
                "page".to_string(),
                self.page.unwrap_or(defaults.page).to_string(),
            ),
        ];

        for (key, value) in self.filters {
            match pairs.iter_mut().find(|(existing, _)| *existing == key) {
                Some(slot) => slot.1 = value,
                None => pairs.push((key, value)),
            }
        }

        pairs
    }
}

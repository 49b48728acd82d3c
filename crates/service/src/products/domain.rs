use std::cmp::Ordering;

use models::product;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;
use crate::pagination::Pagination;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Price,
    Name,
    #[default]
    CreatedAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Raw listing request as it arrives from the query string. Every field is
/// optional; `normalize` turns it into a `ProductQuery`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFilter {
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub search: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub sort_by: Option<SortField>,
    pub sort_order: Option<SortOrder>,
}

/// Inclusive price bounds; a missing bound is unbounded on that side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PriceRange {
    pub min: Option<Decimal>,
    pub max: Option<Decimal>,
}

impl PriceRange {
    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    pub fn contains(&self, price: Decimal) -> bool {
        self.min.map_or(true, |min| price >= min) && self.max.map_or(true, |max| price <= max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sort {
    pub field: SortField,
    pub order: SortOrder,
}

/// Fully-populated listing query. Only active products are ever selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuery {
    pub price: PriceRange,
    /// trimmed, never empty
    pub search: Option<String>,
    pub sort: Sort,
    pub pagination: Pagination,
}

impl ProductFilter {
    /// Fill defaults and reject values no query can honour.
    pub fn normalize(self) -> Result<ProductQuery, ServiceError> {
        let pagination = Pagination::new(self.page, self.limit)?;
        let price = PriceRange { min: self.min_price, max: self.max_price };
        if let (Some(min), Some(max)) = (price.min, price.max) {
            if min > max {
                return Err(ServiceError::validation("minPrice must not exceed maxPrice"));
            }
        }
        let search = self
            .search
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        let sort = Sort {
            field: self.sort_by.unwrap_or_default(),
            order: self.sort_order.unwrap_or_default(),
        };
        Ok(ProductQuery { price, search, sort, pagination })
    }
}

impl ProductQuery {
    /// In-memory form of the listing predicate.
    pub fn matches(&self, p: &product::Model) -> bool {
        if !p.active || !self.price.contains(p.price) {
            return false;
        }
        match &self.search {
            None => true,
            Some(needle) => {
                let needle = needle.to_lowercase();
                p.name.to_lowercase().contains(&needle) || p.description.to_lowercase().contains(&needle)
            }
        }
    }

    /// Ordering of the listing, with `id` as the tiebreaker.
    pub fn compare(&self, a: &product::Model, b: &product::Model) -> Ordering {
        let by_field = match self.sort.field {
            SortField::Price => a.price.cmp(&b.price),
            SortField::Name => a.name.cmp(&b.name),
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        };
        let by_field = match self.sort.order {
            SortOrder::Asc => by_field,
            SortOrder::Desc => by_field.reverse(),
        };
        by_field.then_with(|| a.id.cmp(&b.id))
    }
}

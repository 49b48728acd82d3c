use async_trait::async_trait;
use models::product;

use super::domain::ProductQuery;
use crate::errors::ServiceError;

/// Read side of the catalog as the listing needs it. Both calls must apply
/// the same predicate so `count` describes the rows `find_page` pages over.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn find_page(&self, query: &ProductQuery) -> Result<Vec<product::Model>, ServiceError>;
    async fn count(&self, query: &ProductQuery) -> Result<u64, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    use chrono::{Duration, TimeZone, Utc};
    use models::product::NewProduct;
    use uuid::Uuid;

    #[derive(Default)]
    pub struct MockProductRepository {
        products: Mutex<Vec<product::Model>>,
        unavailable: bool,
    }

    impl MockProductRepository {
        pub fn new(products: Vec<product::Model>) -> Self {
            Self { products: Mutex::new(products), unavailable: false }
        }

        /// Materialize catalog entries; creation times increase with position.
        pub fn from_catalog(entries: Vec<NewProduct>) -> Self {
            let base = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
            let products = entries
                .into_iter()
                .enumerate()
                .map(|(i, p)| {
                    let at = (base + Duration::minutes(i as i64)).into();
                    product::Model {
                        id: Uuid::new_v4(),
                        name: p.name,
                        slug: p.slug,
                        description: p.description,
                        price: p.price,
                        images: p.images,
                        sizes: p.sizes,
                        colors: p.colors,
                        stock: p.stock,
                        active: p.active,
                        created_at: at,
                        updated_at: at,
                    }
                })
                .collect();
            Self::new(products)
        }

        /// Every call fails as if the database were down.
        pub fn unavailable() -> Self {
            Self { products: Mutex::new(Vec::new()), unavailable: true }
        }

        fn matching(&self, query: &ProductQuery) -> Result<Vec<product::Model>, ServiceError> {
            if self.unavailable {
                return Err(ServiceError::Db("connection refused".into()));
            }
            let products = self.products.lock().unwrap();
            let mut rows: Vec<product::Model> = products.iter().filter(|p| query.matches(p)).cloned().collect();
            rows.sort_by(|a, b| query.compare(a, b));
            Ok(rows)
        }
    }

    #[async_trait]
    impl ProductRepository for MockProductRepository {
        async fn find_page(&self, query: &ProductQuery) -> Result<Vec<product::Model>, ServiceError> {
            let rows = self.matching(query)?;
            Ok(rows
                .into_iter()
                .skip(query.pagination.offset() as usize)
                .take(query.pagination.limit as usize)
                .collect())
        }

        async fn count(&self, query: &ProductQuery) -> Result<u64, ServiceError> {
            Ok(self.matching(query)?.len() as u64)
        }
    }
}

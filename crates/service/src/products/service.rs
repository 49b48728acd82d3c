use std::sync::Arc;

use models::product;
use tracing::{debug, instrument};

use super::domain::ProductFilter;
use super::repository::ProductRepository;
use crate::errors::ServiceError;
use crate::pagination::Page;

/// Catalog listing service independent of web framework
pub struct ProductService<R: ProductRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: ProductRepository + ?Sized> ProductService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// List active products matching `filter`, one page at a time.
    ///
    /// The page and the total are fetched concurrently against the same
    /// predicate.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::products::{ProductFilter, ProductService, repository::mock::MockProductRepository};
    /// let repo = Arc::new(MockProductRepository::from_catalog(service::seed::catalog()));
    /// let svc = ProductService::new(repo);
    /// let page = tokio_test::block_on(svc.list(ProductFilter::default())).unwrap();
    /// assert_eq!(page.meta.total, 10);
    /// assert_eq!(page.items.len(), 10);
    /// ```
    #[instrument(skip(self, filter))]
    pub async fn list(&self, filter: ProductFilter) -> Result<Page<product::Model>, ServiceError> {
        let query = filter.normalize()?;
        let (items, total) = tokio::try_join!(self.repo.find_page(&query), self.repo.count(&query))?;
        debug!(
            total,
            returned = items.len(),
            page = query.pagination.page,
            limit = query.pagination.limit,
            "products_listed"
        );
        Ok(Page { items, meta: query.pagination.meta(total) })
    }
}

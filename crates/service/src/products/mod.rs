//! Product listing: filter normalization, predicate translation and the
//! concurrent page + count execution.

pub mod domain;
pub mod repository;
pub mod service;
pub mod repo;

pub use domain::{ProductFilter, ProductQuery};
pub use service::ProductService;

//! Service layer for the storefront: product listing and customer auth.
//! - Separates business logic from data access (repository traits per module).
//! - Reuses validation and entity definitions in `models` crate.
//! - Each repository has a SeaORM implementation and an in-memory mock.

pub mod errors;
pub mod pagination;
pub mod products;
pub mod auth;
pub mod seed;
#[cfg(test)]
pub mod test_support;

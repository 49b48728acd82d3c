//! SeaORM entities for the catalog and accounts, plus the small set of
//! entity-level helpers (validation, inserts) the service layer builds on.

pub mod errors;
pub mod db;
pub mod product;
pub mod user;

#[cfg(test)]
mod tests;

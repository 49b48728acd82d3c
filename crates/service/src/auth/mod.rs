//! Auth module: three-layer architecture (domain, repository, service).
//!
//! Registration and login live in `AuthService`; signing and checking
//! bearer tokens is the separate `token::TokenIssuer`.

pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;
pub mod token;
pub mod repo;

pub use service::AuthService;

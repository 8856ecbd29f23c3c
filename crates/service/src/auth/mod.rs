//! Auth module: domain types, error taxonomy, credential/token core,
//! storage capability and its adapters, and the orchestration service.

pub mod domain;
pub mod errors;
pub mod password;
pub mod repo;
pub mod repository;
pub mod service;
pub mod token;

pub use service::AuthService;

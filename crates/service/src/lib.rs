//! Business logic for credential issuance.
//! - Keeps the domain independent of the web framework.
//! - Storage is a capability trait so the service tests against an
//!   in-memory fake as well as the SeaORM adapter.

pub mod auth;

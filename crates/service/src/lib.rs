//! Service layer for fauna
//!
//! Sits between the HTTP handlers and the store: runs validation, the
//! slug-uniqueness round-trip, and turns storage outcomes into typed errors.

#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]

mod animal_service;
mod error;

pub use animal_service::AnimalService;
pub use error::ServiceError;

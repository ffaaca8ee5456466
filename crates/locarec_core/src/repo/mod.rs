//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the locale-aware data access contract.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Repository writes must enforce `Translatable::validate()` before
//!   persistence.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

pub mod translated_repo;

//! Domain model for entities split across base and translation tables.
//!
//! # Responsibility
//! - Define the compile-time contract between entities and the accessor.
//! - Host concrete entity types shipped with the crate.
//!
//! # Invariants
//! - Every entity names its translated columns exactly once, in its
//!   `TranslationMapping`; nothing else is ever copied into translations.

pub mod post;
pub mod translatable;

//! # Domain Layer
//!
//! Catalog types and the pure logic of a ranking pass.
//!
//! - [`value_objects`]: identifiers, closed enumerations, filters, scores
//! - [`entities`]: listings, filter state, compare selection
//! - [`services`]: filter predicates and value scoring
//! - [`errors`]: invariant violations

pub mod entities;
pub mod errors;
pub mod services;
pub mod value_objects;

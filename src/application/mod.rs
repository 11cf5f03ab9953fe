//! # Application Layer
//!
//! Ranking passes, currency display and the comparison workflow.

pub mod error;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};

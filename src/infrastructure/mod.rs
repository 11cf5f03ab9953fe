//! # Infrastructure Layer
//!
//! Adapters around the engine: storage ports, backend ingestion,
//! analytics, configuration and logging.

pub mod backend;
pub mod config;
pub mod persistence;
pub mod telemetry;
pub mod tracking;

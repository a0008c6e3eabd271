//! Search backend implementations.
//!
//! Each module provides a struct implementing
//! [`crate::backend::SearchBackend`] against a concrete search engine.

pub mod duckduckgo;

pub use duckduckgo::DuckDuckGoBackend;

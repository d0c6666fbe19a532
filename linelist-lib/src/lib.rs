//! Linelist API client library
//!
//! A Rust async client library for linelist (case and contact listing) REST
//! backends that implement the JSON filter-envelope query convention.

pub mod error;
pub mod model;
pub mod query;

mod client;

pub use client::*;

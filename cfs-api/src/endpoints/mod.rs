//! API endpoint modules organized by category.
//!
//! Each module adds typed methods to [`crate::ApiClient`] for a group of
//! related server endpoints.

pub mod account;

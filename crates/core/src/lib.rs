//! Online Store Core - Shared types library.
//!
//! This crate provides the identifier types used across the online store
//! components:
//! - `api` - HTTP service exposing carts and orders
//! - `cli` - Command-line tools for migrations and catalog seeding
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access,
//! no HTTP clients. The `postgres` feature adds sqlx encoding so the
//! identifiers can be bound and decoded directly.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe entity IDs

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;

//! Core types for the online store.

pub mod id;

pub use id::*;

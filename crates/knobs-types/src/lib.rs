//! Shared types, adapter traits, and core utilities for the knobs settings registry.
//!
//! This crate contains the foundational types that are shared between the
//! settings engine and all store adapter implementations. Keeping them in a
//! separate crate lets adapter crates compile without the engine.

pub mod error;
pub mod prelude;
pub mod store_adapter;
pub mod types;
pub mod value;

// vim: ts=4

//! Domain logic for the panel-holder / jig tracking system.
//!
//! This crate has no internal dependencies and performs no I/O, so the
//! storage layer, the API server, and any future CLI tooling can all share
//! it. The storage and presentation layers live in `jigtrack-store` and
//! `jigtrack-api`.

pub mod asset;
pub mod error;
pub mod ident;
pub mod lookup;
pub mod reporting;
pub mod transaction;
pub mod types;

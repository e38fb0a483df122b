//! URL shortener service implementation.
//!
//! This crate composes a [`Generator`](snip_generator::Generator) and a
//! [`Registry`](snip_core::Registry) into the allocation pipeline. Core
//! types are re-exported from `snip_core`.

pub mod service;
pub mod validate;

pub use service::{AllocationSettings, ShortenerService};
pub use snip_core::{Shortener, ShortenerError};

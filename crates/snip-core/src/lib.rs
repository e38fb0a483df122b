//! Core types and traits for the Snip URL shortener.
//!
//! This crate provides the types shared by the code generator, the
//! registry backends, the shortener service and the HTTP gateway.

pub mod clock;
pub mod error;
pub mod record;
pub mod registry;
pub mod shortcode;
pub mod shortener;

pub use clock::{Clock, SystemClock};
pub use error::{CoreError, ShortenerError, StorageError};
pub use record::UrlRecord;
pub use registry::{ReadRegistry, Registry};
pub use shortcode::ShortCode;
pub use shortener::Shortener;

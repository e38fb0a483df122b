//! Short code generation.
//!
//! Generators only propose candidate codes; uniqueness is settled by the
//! registry that the caller checks each candidate against.

pub mod random;

pub use random::RandomGenerator;

use snip_core::ShortCode;

/// Trait for generating short codes.
///
/// Implementations are pure generators that don't interact with storage.
/// A generated code is only a candidate: callers must check it against
/// the registry and generate again on collision.
pub trait Generator: Send + Sync + 'static {
    type Output: Into<ShortCode>;
    /// Generates one candidate short code.
    fn generate(&self) -> Self::Output;
}

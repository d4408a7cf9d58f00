#![forbid(unsafe_code)]
//! Sum-check arguments (linear and product-of-multilinear claims) and the
//! two-phase GKR round sum-check, over a runtime prime field.
#![deny(unused_import_braces, unused_qualifications, trivial_casts)]
#![deny(trivial_numeric_casts, variant_size_differences)]
#![deny(stable_features, unreachable_pub, non_shorthand_field_patterns)]
#![deny(unused_attributes, unused_mut)]
#![warn(missing_docs)]
#![deny(unused_imports)]
#![deny(renamed_and_removed_lints, stable_features, unused_allocation)]
#![deny(unused_comparisons, bare_trait_objects, unused_must_use)]

pub use error::Error;

/// The crate-wide error type.
mod error;

/// Modular arithmetic over a runtime prime.
pub mod field;

/// Sparse multilinear polynomials.
pub mod mvlinear;

/// Claims about a product of multilinear polynomials.
pub mod pmf;

/// Multilinear extensions of hypercube-indexed data.
pub mod mle;

/// Where verifier challenges come from (real randomness or a transcript).
pub mod challenge;

/// The Fiat–Shamir transcript.
pub mod transcript;

/// The sum-check interactive argument.
pub mod sumcheck;

/// The two-phase GKR round sum-check.
pub mod gkr;

/// Non-interactive proof generation/verification entry points.
pub mod fs;

#[cfg(test)]
mod tests {}

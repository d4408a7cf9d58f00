use std::fmt;

/// Error type for this crate.
///
/// Every variant carries a short message describing the offending context.
/// Variants split into two groups: invariant violations (`FieldMismatch`,
/// `NonMultilinear`, `TermOutOfRange`, `ShapeMismatch`, `ProtocolClosed`,
/// `WrongPhase`, `SoundnessErrorTooLarge`, `NotConvinced`) are caller bugs
/// and propagate as `Err`. A rejected proof is not an error: the verifier
/// transitions to a terminal rejected state and `verify()` returns `false`.
/// The `*_verify` entry points never let an `Err` escape to the caller —
/// any internal error raised while processing untrusted proof bytes is
/// caught there and folded into `false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Operation between polynomials/claims defined over different primes.
    FieldMismatch(String),
    /// Multiplying two `MVLinear`s whose term keys share a set bit.
    NonMultilinear(String),
    /// A term key is `>= 2^num_variables`.
    TermOutOfRange(String),
    /// A bookkeeping table, argument vector, or message has the wrong length.
    ShapeMismatch(String),
    /// A message was sent to a verifier that already terminated.
    ProtocolClosed(String),
    /// A GKR message arrived while the verifier was in the wrong phase.
    WrongPhase(String),
    /// The verifier's configured soundness bound exceeds the caller's ceiling.
    SoundnessErrorTooLarge(String),
    /// The sub-claim of an unconvinced verifier was requested.
    NotConvinced(String),
    /// A serialized proof could not be parsed into a well-formed structure.
    MalformedProof(String),
    /// Caller passed an otherwise-invalid argument (e.g. inverting zero).
    InvalidArgument(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::FieldMismatch(s) => write!(f, "field mismatch: {}", s),
            Error::NonMultilinear(s) => write!(f, "product is not multilinear: {}", s),
            Error::TermOutOfRange(s) => write!(f, "term out of range: {}", s),
            Error::ShapeMismatch(s) => write!(f, "shape mismatch: {}", s),
            Error::ProtocolClosed(s) => write!(f, "protocol closed: {}", s),
            Error::WrongPhase(s) => write!(f, "wrong phase: {}", s),
            Error::SoundnessErrorTooLarge(s) => write!(f, "soundness error too large: {}", s),
            Error::NotConvinced(s) => write!(f, "verifier not convinced: {}", s),
            Error::MalformedProof(s) => write!(f, "malformed proof: {}", s),
            Error::InvalidArgument(s) => write!(f, "invalid argument: {}", s),
        }
    }
}

impl std::error::Error for Error {}

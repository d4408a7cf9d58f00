//! The sum-check interactive argument, unified over the claim's
//! multiplicand count `k` (`k = 1` is the "linear" flavor of `spec.md`
//! §4.E, sum-checking a single `MVLinear`; `k > 1` is the "product"
//! flavor, sum-checking a [`crate::pmf::PMF`]).
//!
//! Grounded on `examples/arkworks-rs-sumcheck/src/ml_sumcheck/protocol/`.
//! The prover holds one dense bookkeeping table per multiplicand and folds
//! all of them in lockstep each round (`examples/original_source/
//! IPProverLinear.py`/`IPPMFProver`'s approach generalizes identically).

pub mod prover;
pub mod verifier;

use crate::error::Error;
use num_bigint::BigUint;

pub use prover::{ProverMsg, ProverState};
pub use verifier::{SubClaim, VerifierState};

/// Default ceiling on soundness error for a verifier that does not take an
/// explicit `epsilon` from its caller (GKR's inner checksum-only
/// verifiers). Grounded on `examples/original_source/IPPMFVerifier.py`'s
/// `MAX_ALLOWED_SOUNDNESS_ERROR`.
pub const DEFAULT_MAX_SOUNDNESS_ERROR: f64 = 2e-64;

/// Minimal bit length `ell` of a prime so that the soundness error
/// `num_variables^2 * max_multiplicands / 2^ell` is at most `epsilon`.
/// Grounded on `spec.md` §4.E's `required_field_length_bit`.
pub fn required_field_length_bit(num_variables: usize, max_multiplicands: usize, epsilon: f64) -> usize {
    let numerator = (num_variables * num_variables * max_multiplicands) as f64;
    if numerator <= 0.0 {
        return 0;
    }
    let bits = (numerator / epsilon).log2();
    if bits <= 0.0 {
        0
    } else {
        bits.ceil() as usize
    }
}

/// The soundness error of a sum-check over `num_variables` variables with
/// `max_multiplicands`-degree round polynomials and prime `p`:
/// `num_variables^2 * max_multiplicands / p`. `k = 1` recovers the linear
/// flavor's `n^2 / p` bound exactly.
pub fn soundness_error(num_variables: usize, max_multiplicands: usize, p: &BigUint) -> f64 {
    use num_traits::ToPrimitive;
    let numerator = (num_variables * num_variables * max_multiplicands) as f64;
    let p = p.to_f64().unwrap_or(f64::INFINITY);
    numerator / p
}

/// Reject a verifier/prover configuration whose conservative soundness
/// bound exceeds `epsilon`. Grounded on `IPPMFVerifier.py::__init__`'s
/// `if self.soundnessError() > maxAllowedSoundnessError: raise
/// SoundnessErrorException(...)`, performed on construction before any
/// round is exchanged.
pub fn check_soundness(num_variables: usize, max_multiplicands: usize, p: &BigUint, epsilon: f64) -> Result<(), Error> {
    let error = soundness_error(num_variables, max_multiplicands, p);
    if error > epsilon {
        return Err(Error::SoundnessErrorTooLarge(format!(
            "soundness error {:e} exceeds the maximum allowed {:e} for a {}-variable, degree-{} sum-check; \
             try a prime with at least {} bits",
            error,
            epsilon,
            num_variables,
            max_multiplicands,
            required_field_length_bit(num_variables, max_multiplicands, epsilon)
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn k_one_matches_linear_bound() {
        // n=4, k=1: bound should be n^2/p exactly.
        let p = BigUint::from(10_000_019u32);
        let bound = soundness_error(4, 1, &p);
        let expected = 16.0 / 10_000_019.0;
        assert!((bound - expected).abs() < 1e-12);
    }

    #[test]
    fn required_length_grows_with_variables() {
        let a = required_field_length_bit(4, 1, 1e-6);
        let b = required_field_length_bit(8, 1, 1e-6);
        assert!(b >= a);
    }

    #[test]
    fn check_soundness_accepts_large_prime() {
        let p = BigUint::from(10_000_019u32);
        assert!(check_soundness(4, 1, &p, 1e-3).is_ok());
    }

    #[test]
    fn check_soundness_rejects_small_prime() {
        let p = BigUint::from(101u32);
        let err = check_soundness(4, 1, &p, 1e-6);
        assert!(matches!(err, Err(Error::SoundnessErrorTooLarge(_))));
    }
}

//! Abstraction over "where the next verifier challenge comes from".
//!
//! Grounded on `examples/arkworks-rs-sumcheck/src/data_structures/random.rs`'s
//! split between a plain RNG-backed source and a transcript-fed one: the
//! sum-check and GKR verifiers are generic over [`ChallengeGenerator`] so the
//! same protocol code drives both an interactive (real-randomness) verifier
//! and a non-interactive (Fiat–Shamir transcript) one.

use num_bigint::BigUint;
use rand_core::RngCore;

/// Produces the verifier's next field challenge in `[0, p)`.
pub trait ChallengeGenerator {
    /// Sample a uniform element of `[0, p)`, recording it in the
    /// implementation's transcript/state as appropriate.
    fn next_challenge(&mut self, p: &BigUint) -> BigUint;

    /// Absorb a prover message — a list of field elements reduced mod `p`
    /// — before the next challenge is sampled. A no-op for real-randomness
    /// sources; a Fiat–Shamir transcript overrides this to fold the
    /// message into the hash state, which is what makes the resulting
    /// challenge bind to everything sent so far.
    fn absorb(&mut self, _p: &BigUint, _elements: &[BigUint]) {}
}

/// A `ChallengeGenerator` backed by a real source of randomness, for
/// interactive use. Draws via rejection sampling over the minimal byte
/// width covering `p`, matching `random.rs::RnFg::random_field`'s
/// uniformity guarantee.
pub struct RngChallenge<R: RngCore> {
    rng: R,
}

impl<R: RngCore> RngChallenge<R> {
    pub fn new(rng: R) -> Self {
        RngChallenge { rng }
    }
}

impl<R: RngCore> ChallengeGenerator for RngChallenge<R> {
    fn next_challenge(&mut self, p: &BigUint) -> BigUint {
        sample_uniform(p, |buf| self.rng.fill_bytes(buf))
    }
}

/// Rejection-sample a uniform value in `[0, p)` using `fill` to draw random
/// bytes of the minimal width covering `p`. Shared by [`RngChallenge`] and
/// the Fiat–Shamir [`crate::transcript::Transcript`].
pub fn sample_uniform(p: &BigUint, mut fill: impl FnMut(&mut [u8])) -> BigUint {
    let byte_len = ((p.bits() as usize) + 7) / 8;
    let mut buf = vec![0u8; byte_len.max(1)];
    loop {
        fill(&mut buf);
        let candidate = BigUint::from_bytes_le(&buf);
        if &candidate < p {
            return candidate;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn rng_challenge_stays_in_range() {
        let p = BigUint::from(101u32);
        let mut gen = RngChallenge::new(StdRng::seed_from_u64(7));
        for _ in 0..50 {
            let c = gen.next_challenge(&p);
            assert!(c < p);
        }
    }

    #[test]
    fn sample_uniform_rejects_out_of_range() {
        let p = BigUint::from(3u32);
        // Feed bytes that are initially out of range, then in range.
        let mut calls = 0usize;
        let seq = [255u8, 2u8];
        let got = sample_uniform(&p, |buf| {
            buf[0] = seq[calls.min(seq.len() - 1)];
            calls += 1;
        });
        assert!(got < p);
    }
}

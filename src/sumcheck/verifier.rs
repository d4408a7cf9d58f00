//! Sum-check verifier: samples a challenge each round and defers all
//! consistency checks to the end, exactly as
//! `examples/arkworks-rs-sumcheck/src/ml_sumcheck/protocol/verifier.rs`
//! does (`verify_round` only samples/stores; `check_and_generate_subclaim`
//! performs the `P(0) + P(1) == expected` checks retroactively).

use crate::challenge::ChallengeGenerator;
use crate::error::Error;
use crate::field::Field;
use crate::sumcheck::prover::ProverMsg;
use num_bigint::BigUint;
use num_traits::Zero;

/// Subclaim produced by a convinced verifier: the multiplicand(s) are
/// claimed to evaluate, at `point`, to a product equal to
/// `expected_evaluation`.
#[derive(Clone, Debug)]
pub struct SubClaim {
    pub point: Vec<BigUint>,
    pub expected_evaluation: BigUint,
}

pub struct VerifierState {
    round: usize,
    num_vars: usize,
    max_multiplicands: usize,
    finished: bool,
    polynomials_received: Vec<Vec<BigUint>>,
    randomness: Vec<BigUint>,
    p: BigUint,
}

/// Build a verifier for a claim over `num_vars` variables with round
/// messages of length `max_multiplicands + 1`, rejecting with
/// `SoundnessErrorTooLarge` if the conservative bound
/// `num_vars^2 * max_multiplicands / p` exceeds `epsilon`. Grounded on
/// `IPPMFVerifier.py::__init__`'s soundness check, performed before any
/// round is exchanged.
pub fn verifier_init(
    num_vars: usize,
    max_multiplicands: usize,
    p: BigUint,
    epsilon: f64,
) -> Result<VerifierState, Error> {
    crate::sumcheck::check_soundness(num_vars, max_multiplicands, &p, epsilon)?;
    Ok(VerifierState {
        round: 1,
        num_vars,
        max_multiplicands,
        finished: false,
        polynomials_received: Vec::with_capacity(num_vars),
        randomness: Vec::with_capacity(num_vars),
        p,
    })
}

/// Process one round: store the prover's message, sample and store a
/// challenge, and return it. Panics if the verifier already finished
/// (mirrors the teacher's `verify_round`, which treats this as caller
/// misuse rather than adversarial input).
pub fn verify_round<C: ChallengeGenerator>(
    prover_msg: ProverMsg,
    state: &mut VerifierState,
    challenge_gen: &mut C,
) -> Result<BigUint, Error> {
    if state.finished {
        return Err(Error::ProtocolClosed(
            "verifier already finished this sum-check".into(),
        ));
    }
    if prover_msg.evaluations.len() != state.max_multiplicands + 1 {
        return Err(Error::ShapeMismatch(format!(
            "expected {} evaluations, got {}",
            state.max_multiplicands + 1,
            prover_msg.evaluations.len()
        )));
    }
    let r = absorb_and_sample(challenge_gen, &state.p, &prover_msg.evaluations);
    state.randomness.push(r.clone());
    state.polynomials_received.push(prover_msg.evaluations);
    if state.round == state.num_vars {
        state.finished = true;
    } else {
        state.round += 1;
    }
    Ok(r)
}

/// Run every deferred consistency check and, if they all pass, return the
/// sub-claim. `Err(Error::NotConvinced(_))` signals a rejected proof, not
/// a programming error; callers at the `*_verify` boundary fold this into
/// `false`.
pub fn check_and_generate_subclaim(state: VerifierState, asserted_sum: &BigUint) -> Result<SubClaim, Error> {
    if !state.finished {
        return Err(Error::ProtocolClosed(
            "cannot finalize a sum-check that has not run all rounds".into(),
        ));
    }
    if state.polynomials_received.len() != state.num_vars {
        return Err(Error::ShapeMismatch("insufficient rounds recorded".into()));
    }
    let field = Field::new(state.p.clone());
    let mut expected = field.reduce(asserted_sum);
    for i in 0..state.num_vars {
        let evaluations = &state.polynomials_received[i];
        let sum_at_0_1 = field.add(&evaluations[0], &evaluations[1]);
        if sum_at_0_1 != expected {
            return Err(Error::NotConvinced(format!(
                "round {}: P(0) + P(1) does not match the running claim",
                i
            )));
        }
        expected = interpolate_uni_poly(evaluations, &state.randomness[i], &field);
    }
    Ok(SubClaim {
        point: state.randomness,
        expected_evaluation: expected,
    })
}

/// Absorb a round message into `challenge_gen` and draw the next
/// challenge. Shared by the verifier's round loop and by the
/// Fiat–Shamir prover driver (`crate::fs`), which must derive the exact
/// same challenge the verifier will, without a live verifier object.
pub fn absorb_and_sample<C: ChallengeGenerator>(
    challenge_gen: &mut C,
    p: &BigUint,
    evaluations: &[BigUint],
) -> BigUint {
    challenge_gen.absorb(p, evaluations);
    challenge_gen.next_challenge(p)
}

/// Evaluate the unique degree-`len-1` polynomial through `(0, p_i[0]),
/// (1, p_i[1]), ...` at `eval_at`, via direct Lagrange interpolation.
/// Grounded on `examples/original_source/IPPMFVerifier.py`'s interpolation
/// step, which uses `modInverse` rather than the teacher's integer-divisor
/// optimization (not needed here: every value is already a field element).
pub(crate) fn interpolate_uni_poly(p_i: &[BigUint], eval_at: &BigUint, field: &Field) -> BigUint {
    let len = p_i.len();
    let mut result = BigUint::zero();
    for i in 0..len {
        let mut numerator = p_i[i].clone();
        let mut denominator = BigUint::from(1u32);
        for j in 0..len {
            if j == i {
                continue;
            }
            let diff_eval = field.sub(eval_at, &BigUint::from(j as u64));
            numerator = field.mul(&numerator, &diff_eval);
            let diff_idx = field.sub(&BigUint::from(i as u64), &BigUint::from(j as u64));
            denominator = field.mul(&denominator, &diff_idx);
        }
        let inv_denominator = field
            .inv(&denominator)
            .expect("distinct integer nodes are invertible for any prime larger than len");
        let term = field.mul(&numerator, &inv_denominator);
        result = field.add(&result, &term);
    }
    result
}

impl VerifierState {
    pub fn round(&self) -> usize {
        self.round
    }
}

//! Non-interactive (Fiat–Shamir) entry points: the public surface most
//! callers use, pairing a `*_prove` constructor with a `*_verify` that
//! never lets an internal `Error` escape, per `spec.md` §6.
//!
//! Each pair is keyed by a caller-supplied `statement` byte string (the
//! encoding of whatever public context identifies the claim: the prime,
//! the polynomial's shape, an external protocol's transcript-so-far,
//! ...). Both sides must derive the same statement bytes for the
//! transcript challenges to match.

use crate::error::Error;
use crate::gkr::prover::GKRProof;
use crate::gkr::{self, GKR};
use crate::mvlinear::MVLinear;
use crate::pmf::PMF;
use crate::sumcheck::prover::{prove_round, prover_init, ProverMsg};
use crate::sumcheck::verifier::{check_and_generate_subclaim, verifier_init, verify_round};
use crate::transcript::Transcript;
use num_bigint::BigUint;
use num_traits::Zero;

/// Prove that `poly` sums to some value over the Boolean hypercube;
/// returns that sum along with the proof. `k = 1` specialization of
/// [`pmf_sumcheck_prove`]. Mirrors `examples/original_source/IPVerifier.py`:
/// the linear flavor takes no `epsilon` and never performs a soundness
/// check, so the underlying PMF call is given an infinite ceiling.
pub fn linear_sumcheck_prove(poly: &MVLinear, statement: &[u8]) -> Result<(BigUint, Vec<ProverMsg>), Error> {
    let pmf = PMF::new(vec![poly.clone()], poly.num_variables, poly.modulus().clone())?;
    pmf_sumcheck_prove(&pmf, f64::INFINITY, statement)
}

/// Verify a [`linear_sumcheck_prove`] proof. Never returns `Err`: any
/// internal failure (malformed proof, failed round check, mismatched
/// final evaluation) is folded into `false`.
pub fn linear_sumcheck_verify(poly: &MVLinear, asserted_sum: &BigUint, proof: &[ProverMsg], statement: &[u8]) -> bool {
    let pmf = match PMF::new(vec![poly.clone()], poly.num_variables, poly.modulus().clone()) {
        Ok(p) => p,
        Err(_) => return false,
    };
    pmf_sumcheck_verify(&pmf, f64::INFINITY, asserted_sum, proof, statement)
}

/// Prove that `pmf` (the product of its multiplicands) sums to some value
/// over the Boolean hypercube; returns that sum along with the proof.
/// Rejects with `Error::SoundnessErrorTooLarge` if `pmf`'s prime is too
/// small to meet `max_soundness_error`, mirroring
/// `examples/original_source/FSPMFProver.py::generateTheoremAndProof`,
/// which constructs a real `InteractivePMFVerifier` (and so performs this
/// check) even while proving.
pub fn pmf_sumcheck_prove(pmf: &PMF, max_soundness_error: f64, statement: &[u8]) -> Result<(BigUint, Vec<ProverMsg>), Error> {
    let n = pmf.num_variables();
    let p = pmf.modulus().clone();
    crate::sumcheck::check_soundness(n, pmf.num_multiplicands(), &p, max_soundness_error)?;
    if n == 0 {
        let sum = pmf.eval(&[])?;
        return Ok((sum, Vec::new()));
    }
    let multiplicands = pmf.multiplicands()?;
    let asserted_sum = (0..1u64 << n)
        .try_fold(BigUint::zero(), |acc, b| -> Result<BigUint, Error> {
            let args: Vec<BigUint> = (0..n).map(|i| BigUint::from((b >> i) & 1)).collect();
            let mut term = BigUint::from(1u32);
            for m in multiplicands {
                term = (term * m.eval(&args)) % &p;
            }
            Ok((acc + term) % &p)
        })?;

    let mut transcript = Transcript::new(statement);
    let mut state = prover_init(pmf);
    let mut messages = Vec::with_capacity(n);
    let mut challenge: Option<BigUint> = None;
    for _ in 0..n {
        let msg = prove_round(&mut state, challenge.as_ref());
        let r = crate::sumcheck::verifier::absorb_and_sample(&mut transcript, &p, &msg.evaluations);
        messages.push(msg);
        challenge = Some(r);
    }
    Ok((asserted_sum, messages))
}

/// Verify a [`pmf_sumcheck_prove`] proof. Never returns `Err`: a prime too
/// small for `max_soundness_error` is folded into `false`, the same as any
/// other rejected proof.
pub fn pmf_sumcheck_verify(pmf: &PMF, max_soundness_error: f64, asserted_sum: &BigUint, proof: &[ProverMsg], statement: &[u8]) -> bool {
    let n = pmf.num_variables();
    if n == 0 {
        return match pmf.eval(&[]) {
            Ok(v) => &v == asserted_sum,
            Err(_) => false,
        };
    }
    if proof.len() != n {
        return false;
    }
    let mut transcript = Transcript::new(statement);
    let mut state = match verifier_init(n, pmf.num_multiplicands(), pmf.modulus().clone(), max_soundness_error) {
        Ok(s) => s,
        Err(_) => return false,
    };
    for msg in proof.iter().cloned() {
        if verify_round(msg, &mut state, &mut transcript).is_err() {
            return false;
        }
    }
    let subclaim = match check_and_generate_subclaim(state, asserted_sum) {
        Ok(s) => s,
        Err(_) => return false,
    };
    match pmf.eval(&subclaim.point) {
        Ok(v) => v == subclaim.expected_evaluation,
        Err(_) => false,
    }
}

/// Prove a GKR round claim at challenge point `g`: returns the claimed sum
/// and the proof.
pub fn gkr_proof_generate(gkr: &GKR, g: &[BigUint], statement: &[u8]) -> Result<(BigUint, GKRProof), Error> {
    let asserted_sum = gkr.evaluate_claim(g)?;
    let mut transcript = Transcript::new(statement);
    let proof = gkr::prover::prove(gkr, g, &mut transcript)?;
    Ok((asserted_sum, proof))
}

/// Verify a [`gkr_proof_generate`] proof. Never returns `Err`.
pub fn gkr_verify(gkr: &GKR, g: &[BigUint], asserted_sum: &BigUint, proof: &GKRProof, statement: &[u8]) -> bool {
    let mut transcript = Transcript::new(statement);
    gkr::verifier::verify(gkr, g, asserted_sum, proof, &mut transcript).unwrap_or(false)
}

//! GKR prover: runs phase one's sparsity-exploiting sum-check, recovers
//! `f2` at the phase-one challenge point, then runs phase two's sum-check
//! scaled by that value.
//!
//! Grounded on `examples/original_source/GKRProver.py::talkToVerifierPhase1`
//! / `talk_to_verifier_phase2`.

use crate::challenge::ChallengeGenerator;
use crate::error::Error;
use crate::field::Field;
use crate::gkr::{initialize_phase_one, initialize_phase_two, GKR};
use crate::sumcheck::prover::{finalize, prove_round, prover_init_from_tables, ProverMsg};
use crate::sumcheck::verifier::absorb_and_sample;
use num_bigint::BigUint;

/// A complete GKR round sum-check proof: the two phases' round messages.
/// The verifier derives phase-one/two challenges itself (from the same
/// `ChallengeGenerator`), so they are not carried in the proof.
#[derive(Clone, Debug)]
pub struct GKRProof {
    pub phase1_msgs: Vec<ProverMsg>,
    pub phase2_msgs: Vec<ProverMsg>,
}

/// Prove `sum_{x,y} f1(g,x,y) f2(x) f3(y) == gkr.evaluate_claim(g)`.
pub fn prove<C: ChallengeGenerator>(gkr: &GKR, g: &[BigUint], challenge_gen: &mut C) -> Result<GKRProof, Error> {
    let l = gkr.num_variables();
    let p = gkr.modulus().clone();
    // Both phases run an `l`-variable, degree-2 sum-check; checking once
    // covers both, matching `FSGKR.py`'s proving path constructing a real
    // `GKRVerifier` (which always checks at the Python default epsilon).
    crate::sumcheck::check_soundness(l, 2, &p, crate::sumcheck::DEFAULT_MAX_SOUNDNESS_ERROR)?;
    let field = Field::new(p.clone());

    let (a_hg, g_table) = initialize_phase_one(gkr.f1_sparse(), l, &field, gkr.f3(), g)?;

    let mut phase1_state = prover_init_from_tables(vec![a_hg, gkr.f2().to_vec()], l, p.clone());
    let mut phase1_msgs = Vec::with_capacity(l);
    let mut u = Vec::with_capacity(l);
    let mut challenge: Option<BigUint> = None;
    for _ in 0..l {
        let msg = prove_round(&mut phase1_state, challenge.as_ref());
        let r = absorb_and_sample(challenge_gen, &p, &msg.evaluations);
        phase1_msgs.push(msg);
        u.push(r.clone());
        challenge = Some(r);
    }
    let phase1_finals = finalize(&mut phase1_state, u.last().expect("l > 0"));
    let f2_at_u = phase1_finals[1].clone();

    let a_f1_at_g_u = initialize_phase_two(gkr.f1_sparse(), l, &field, &g_table, &u)?;
    let a_f3_scaled: Vec<BigUint> = gkr.f3().iter().map(|v| field.mul(v, &f2_at_u)).collect();

    let mut phase2_state = prover_init_from_tables(vec![a_f1_at_g_u, a_f3_scaled], l, p.clone());
    let mut phase2_msgs = Vec::with_capacity(l);
    let mut challenge2: Option<BigUint> = None;
    for _ in 0..l {
        let msg = prove_round(&mut phase2_state, challenge2.as_ref());
        let r = absorb_and_sample(challenge_gen, &p, &msg.evaluations);
        phase2_msgs.push(msg);
        challenge2 = Some(r);
    }

    Ok(GKRProof {
        phase1_msgs,
        phase2_msgs,
    })
}

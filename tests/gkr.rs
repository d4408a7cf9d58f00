//! End-to-end GKR round sum-check tests over randomly generated circuits,
//! mirroring `examples/arkworks-rs-sumcheck/src/gkr_round_sumcheck/test.rs`'s
//! `test_circuit::<F>(nv)` pattern: build a random circuit of a given
//! variable count, prove it, and check the verifier's verdict against both
//! an honest and a forged run.

use num_bigint::BigUint;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sumcheck_gkr::fs::{gkr_proof_generate, gkr_verify};
use sumcheck_gkr::gkr::GKR;

// secp256k1's field prime. Large enough that every circuit size exercised
// below clears `sumcheck::DEFAULT_MAX_SOUNDNESS_ERROR` (2e-64) by a wide
// margin, unlike a toy illustrative prime.
fn modulus() -> BigUint {
    BigUint::parse_bytes(
        b"FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFC2F",
        16,
    )
    .unwrap()
}

fn random_field_element(rng: &mut StdRng) -> BigUint {
    let bytes: [u8; 32] = rng.gen();
    BigUint::from_bytes_be(&bytes) % modulus()
}

fn random_circuit(l: usize, rng: &mut StdRng) -> GKR {
    let size = 1usize << l;
    let f2: Vec<BigUint> = (0..size).map(|_| random_field_element(rng)).collect();
    let f3: Vec<BigUint> = (0..size).map(|_| random_field_element(rng)).collect();
    // f1 is sparse: only touch a handful of (z, x, y) triples out of 2^(3l).
    let num_terms = size.max(4);
    let term_space = 1u64 << (3 * l);
    let mut f1 = Vec::with_capacity(num_terms);
    for _ in 0..num_terms {
        let key = rng.gen_range(0..term_space);
        let val = random_field_element(rng);
        if val != BigUint::from(0u32) {
            f1.push((key, val));
        }
    }
    GKR::new(f1, f2, f3, modulus(), l).unwrap()
}

fn test_circuit(l: usize, seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    let gkr = random_circuit(l, &mut rng);
    let g: Vec<BigUint> = (0..l).map(|_| random_field_element(&mut rng)).collect();

    let (asserted_sum, proof) = gkr_proof_generate(&gkr, &g, b"gkr-integration-test").unwrap();
    assert!(gkr_verify(&gkr, &g, &asserted_sum, &proof, b"gkr-integration-test"));

    let forged_sum = (&asserted_sum + BigUint::from(1u32)) % modulus();
    assert!(!gkr_verify(&gkr, &g, &forged_sum, &proof, b"gkr-integration-test"));
}

#[test]
fn small_circuit_one_variable() {
    test_circuit(1, 1);
}

#[test]
fn medium_circuit_three_variables() {
    test_circuit(3, 2);
}

#[test]
fn larger_circuit_five_variables() {
    test_circuit(5, 3);
}

#[test]
fn empty_f1_circuit_sums_to_zero() {
    // A circuit whose f1 is entirely zero always claims a sum of zero,
    // regardless of f2/f3, since every term of the triple product vanishes.
    let mut rng = StdRng::seed_from_u64(7);
    let l = 2;
    let size = 1usize << l;
    let f2: Vec<BigUint> = (0..size).map(|_| random_field_element(&mut rng)).collect();
    let f3: Vec<BigUint> = (0..size).map(|_| random_field_element(&mut rng)).collect();
    let gkr = GKR::new(Vec::<(u64, BigUint)>::new(), f2, f3, modulus(), l).unwrap();
    let g: Vec<BigUint> = (0..l).map(|_| random_field_element(&mut rng)).collect();
    let claim = gkr.evaluate_claim(&g).unwrap();
    assert_eq!(claim, BigUint::from(0u32));

    let (asserted_sum, proof) = gkr_proof_generate(&gkr, &g, b"empty-f1").unwrap();
    assert_eq!(asserted_sum, BigUint::from(0u32));
    assert!(gkr_verify(&gkr, &g, &asserted_sum, &proof, b"empty-f1"));
}

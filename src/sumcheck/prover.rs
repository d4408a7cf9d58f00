//! Sum-check prover: maintains one dense bookkeeping table per
//! multiplicand and folds them in lockstep as verifier challenges arrive.
//!
//! Grounded on `examples/arkworks-rs-sumcheck/src/ml_sumcheck/protocol/
//! prover.rs`'s `sum_over_list_of_products`/`compute_sum`, specialized to a
//! single product claim (a [`crate::pmf::PMF`] is already one product, not
//! a sum of several as the teacher's `ListOfProductsOfPolynomials` allows).

use crate::field::Field;
use crate::pmf::PMF;
use num_bigint::BigUint;
use num_traits::Zero;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A single round message: evaluations of the round polynomial at
/// `0, 1, ..., max_multiplicands`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProverMsg {
    pub evaluations: Vec<BigUint>,
}

/// Prover state: one dense evaluation table per multiplicand, each halved
/// every round.
pub struct ProverState {
    tables: Vec<Vec<BigUint>>,
    num_vars: usize,
    max_multiplicands: usize,
    round: usize,
    field: Field,
}

/// Build the initial dense bookkeeping tables for `pmf`: `tables[j][b]` is
/// multiplicand `j` evaluated at the Boolean point `b`.
pub fn prover_init(pmf: &PMF) -> ProverState {
    let n = pmf.num_variables();
    let multiplicands = pmf
        .multiplicands()
        .expect("prover_init requires a concrete PMF");
    let tables: Vec<Vec<BigUint>> = multiplicands
        .iter()
        .map(|m| (0..1u64 << n).map(|b| m.eval_bin(b)).collect())
        .collect();
    prover_init_from_tables(tables, n, pmf.modulus().clone())
}

/// Build a prover directly from already-evaluated dense tables, one per
/// multiplicand, each of length `2^num_vars`. Used by the GKR round
/// sum-check (`crate::gkr`), whose multiplicands (`h_g`, `f2`, ...) are
/// produced by sparsity-exploiting precomputation rather than by
/// evaluating an `MVLinear` at every Boolean point.
pub fn prover_init_from_tables(tables: Vec<Vec<BigUint>>, num_vars: usize, p: BigUint) -> ProverState {
    if num_vars == 0 {
        panic!("attempt to sum-check a constant (0-variable) claim");
    }
    let max_multiplicands = tables.len();
    for t in &tables {
        assert_eq!(t.len(), 1usize << num_vars, "bookkeeping table has the wrong length");
    }
    ProverState {
        tables,
        num_vars,
        max_multiplicands,
        round: 0,
        field: Field::new(p),
    }
}

/// Advance the prover by one round. `challenge` is `None` only for the
/// very first call; every subsequent call must carry the verifier's
/// randomness from the previous round.
pub fn prove_round(state: &mut ProverState, challenge: Option<&BigUint>) -> ProverMsg {
    match challenge {
        Some(r) => {
            if state.round == 0 {
                panic!("first round should be prover first");
            }
            fold_tables(state, r);
        }
        None => {
            if state.round > 0 {
                panic!("verifier challenge is required after round 0");
            }
        }
    }
    state.round += 1;
    if state.round > state.num_vars {
        panic!("prover is not active: all rounds already completed");
    }
    ProverMsg {
        evaluations: compute_round_evaluations(state),
    }
}

/// Fold every table with the final round's challenge and return each
/// table's single remaining value (its evaluation at the full challenge
/// point). `prove_round`'s own folding is deferred to the *start* of the
/// next round (matching the teacher), so after the last round the tables
/// still need one more fold to collapse to a point evaluation; callers
/// that need that value (GKR's cross-phase consistency check) call this
/// once after the final `prove_round`.
pub fn finalize(state: &mut ProverState, last_challenge: &BigUint) -> Vec<BigUint> {
    fold_tables(state, last_challenge);
    state.tables.iter().map(|t| t[0].clone()).collect()
}

fn fold_tables(state: &mut ProverState, r: &BigUint) {
    let field = &state.field;
    for table in state.tables.iter_mut() {
        let half = table.len() / 2;
        for b in 0..half {
            let lo = &table[2 * b];
            let hi = &table[2 * b + 1];
            let diff = field.sub(hi, lo);
            table[b] = field.add(lo, &field.mul(&diff, r));
        }
        table.truncate(half);
    }
}

#[cfg(not(feature = "parallel"))]
fn compute_round_evaluations(state: &ProverState) -> Vec<BigUint> {
    let degree = state.max_multiplicands;
    let half = state.tables[0].len() / 2;
    let mut sum = vec![BigUint::zero(); degree + 1];
    for b in 0..half {
        accumulate_point(state, b, &mut sum);
    }
    sum
}

#[cfg(feature = "parallel")]
fn compute_round_evaluations(state: &ProverState) -> Vec<BigUint> {
    let degree = state.max_multiplicands;
    let half = state.tables[0].len() / 2;
    (0..half)
        .into_par_iter()
        .fold(
            || vec![BigUint::zero(); degree + 1],
            |mut acc, b| {
                accumulate_point(state, b, &mut acc);
                acc
            },
        )
        .reduce(
            || vec![BigUint::zero(); degree + 1],
            |mut a, b| {
                for (x, y) in a.iter_mut().zip(b.iter()) {
                    *x = state.field.add(x, y);
                }
                a
            },
        )
}

/// For hypercube-half-index `b`, evaluate the product of all multiplicands
/// at `t = 0, 1, ..., degree` (where `t` interpolates linearly between the
/// table's `2b` and `2b+1` entries) and accumulate into `sum`.
fn accumulate_point(state: &ProverState, b: usize, sum: &mut [BigUint]) {
    let field = &state.field;
    let degree = state.max_multiplicands;
    let mut point_values = vec![BigUint::zero(); degree + 1];
    for (t_idx, slot) in point_values.iter_mut().enumerate() {
        *slot = BigUint::from(t_idx as u64);
    }
    let mut product_scratch: Vec<BigUint> = vec![BigUint::from(1u32); degree + 1];
    for table in &state.tables {
        let lo = &table[2 * b];
        let hi = &table[2 * b + 1];
        let diff = field.sub(hi, lo);
        for (t, scratch) in point_values.iter().zip(product_scratch.iter_mut()) {
            let val = field.add(lo, &field.mul(&diff, t));
            *scratch = field.mul(scratch, &val);
        }
    }
    for (s, p) in sum.iter_mut().zip(product_scratch.iter()) {
        *s = field.add(s, p);
    }
}

impl ProverState {
    pub fn num_vars(&self) -> usize {
        self.num_vars
    }

    pub fn round(&self) -> usize {
        self.round
    }
}

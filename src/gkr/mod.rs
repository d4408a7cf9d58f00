//! The GKR round sum-check: a two-phase sum-check over
//! `f1(z,x,y)*f2(x)*f3(y)` that exploits sparsity of `f1` by precomputing
//! `h_g(x) = sum_y f1(g,x,y)*f3(y)` before running an ordinary product
//! sum-check, instead of materializing the dense triple product.
//!
//! Grounded on `examples/original_source/GKR.py`/`GKRProver.py` (the
//! `precompute`/`_three_split`/`initialize_PhaseOne`/`initialize_PhaseTwo`
//! functions) and, for the overall shape, on
//! `examples/arkworks-rs-sumcheck/src/gkr_round_sumcheck/mod.rs`.

pub mod prover;
pub mod verifier;

use crate::error::Error;
use crate::field::Field;
use hashbrown::HashMap;
use num_bigint::BigUint;
use num_traits::Zero;

/// A GKR circuit layer's wiring and evaluations: sparse `f1(z,x,y)` over
/// `3*l` variables, dense `f2` and `f3` over `l` variables each.
#[derive(Clone, Debug)]
pub struct GKR {
    f1: HashMap<u64, BigUint>,
    f2: Vec<BigUint>,
    f3: Vec<BigUint>,
    p: BigUint,
    l: usize,
}

impl GKR {
    pub fn new(
        f1: impl IntoIterator<Item = (u64, BigUint)>,
        f2: Vec<BigUint>,
        f3: Vec<BigUint>,
        p: BigUint,
        l: usize,
    ) -> Result<Self, Error> {
        if f2.len() != 1usize << l {
            return Err(Error::ShapeMismatch("f2 must have length 2^l".into()));
        }
        if f3.len() != 1usize << l {
            return Err(Error::ShapeMismatch("f3 must have length 2^l".into()));
        }
        let limit = 1u64 << (3 * l);
        let field = Field::new(p.clone());
        let mut map = HashMap::new();
        for (k, v) in f1 {
            if k >= limit {
                return Err(Error::TermOutOfRange(format!(
                    "f1 term {:#b} needs more than {} variables",
                    k,
                    3 * l
                )));
            }
            let v = field.reduce(&v);
            if !v.is_zero() {
                map.insert(k, v);
            }
        }
        Ok(GKR { f1: map, f2, f3, p, l })
    }

    pub fn num_variables(&self) -> usize {
        self.l
    }

    pub fn modulus(&self) -> &BigUint {
        &self.p
    }

    pub fn f1_sparse(&self) -> &HashMap<u64, BigUint> {
        &self.f1
    }

    pub fn f2(&self) -> &[BigUint] {
        &self.f2
    }

    pub fn f3(&self) -> &[BigUint] {
        &self.f3
    }

    /// The asserted sum `sum_{x,y} f1(g,x,y) f2(x) f3(y)` this circuit
    /// claims for challenge point `g`, computed directly (for tests and
    /// for an honest prover to announce its claim).
    pub fn evaluate_claim(&self, g: &[BigUint]) -> Result<BigUint, Error> {
        let field = Field::new(self.p.clone());
        let (a_hg, _) = initialize_phase_one(&self.f1, self.l, &field, &self.f3, g)?;
        Ok(sum_of_gkr(&a_hg, &self.f2, &field))
    }
}

/// `precompute(g, p)[b]` is the multilinear equality indicator
/// `eq(b, g) = prod_i (g_i if bit i of b is set else 1 - g_i)`, i.e. the
/// table of Lagrange basis weights at `g`. Grounded on `GKRProver.py
/// ::precompute`.
pub fn precompute(g: &[BigUint], field: &Field) -> Vec<BigUint> {
    if g.is_empty() {
        return vec![BigUint::from(1u32)];
    }
    let mut table = vec![field.sub(&BigUint::from(1u32), &g[0]), g[0].clone()];
    for gi in &g[1..] {
        let old = table.clone();
        let mut next = vec![BigUint::zero(); old.len() * 2];
        for (b, v) in old.iter().enumerate() {
            next[b] = field.mul(v, &field.sub(&BigUint::from(1u32), gi));
            next[b + old.len()] = field.mul(v, gi);
        }
        table = next;
    }
    table
}

fn three_split(arg: u64, l: usize) -> (u64, u64, u64) {
    let mask = if l >= 64 { u64::MAX } else { (1u64 << l) - 1 };
    let z = arg & mask;
    let x = (arg >> l) & mask;
    let y = (arg >> (2 * l)) & mask;
    (z, x, y)
}

/// Phase one: fold `f1` against `g` (via `precompute`) and `f3`, producing
/// the dense table of `h_g(x) = sum_y f1(g,x,y) f3(y)`, plus the
/// precomputed `g`-table reused in phase two. Grounded on
/// `GKRProver.py::initialize_PhaseOne`.
pub fn initialize_phase_one(
    f1: &HashMap<u64, BigUint>,
    l: usize,
    field: &Field,
    a_f3: &[BigUint],
    g: &[BigUint],
) -> Result<(Vec<BigUint>, Vec<BigUint>), Error> {
    if a_f3.len() != 1usize << l {
        return Err(Error::ShapeMismatch("f3 table must have length 2^l".into()));
    }
    if g.len() != l {
        return Err(Error::ShapeMismatch("g must have l coordinates".into()));
    }
    let mut a_hg = vec![BigUint::zero(); 1usize << l];
    let g_table = precompute(g, field);
    for (&arg, ev) in f1.iter() {
        let (z, x, y) = three_split(arg, l);
        let term = field.mul(&field.mul(&g_table[z as usize], ev), &a_f3[y as usize]);
        let slot = &mut a_hg[x as usize];
        *slot = field.add(slot, &term);
    }
    Ok((a_hg, g_table))
}

/// `sum_i a_hg[i] * f2[i]`: the claimed GKR sum once phase one's table is
/// built. Grounded on `GKR.py::sumOfGKR`.
pub fn sum_of_gkr(a_hg: &[BigUint], f2: &[BigUint], field: &Field) -> BigUint {
    let mut s = BigUint::zero();
    for (a, b) in a_hg.iter().zip(f2.iter()) {
        s = field.add(&s, &field.mul(a, b));
    }
    s
}

/// Phase two: fold `f1` against the phase-one `g`-table and the phase-one
/// randomness `u`, producing the dense table of `f1(g,u,y)` over `y`.
/// Grounded on `GKRProver.py::initialize_PhaseTwo`.
pub fn initialize_phase_two(
    f1: &HashMap<u64, BigUint>,
    l: usize,
    field: &Field,
    g_table: &[BigUint],
    u: &[BigUint],
) -> Result<Vec<BigUint>, Error> {
    if u.len() != l {
        return Err(Error::ShapeMismatch("u must have l coordinates".into()));
    }
    let u_table = precompute(u, field);
    if u_table.len() != g_table.len() {
        return Err(Error::ShapeMismatch("u-table and g-table length mismatch".into()));
    }
    let mut a_f1 = vec![BigUint::zero(); 1usize << l];
    for (&arg, ev) in f1.iter() {
        let (z, x, y) = three_split(arg, l);
        let term = field.mul(&field.mul(&g_table[z as usize], &u_table[x as usize]), ev);
        let slot = &mut a_f1[y as usize];
        *slot = field.add(slot, &term);
    }
    Ok(a_f1)
}

//! Multilinear extensions of functions on the Boolean hypercube.
//!
//! Grounded on `examples/original_source/multilinear_extension.py`. Given a
//! table of `2^n` values indexed by the `n`-bit Boolean hypercube, `extend`
//! builds the unique multilinear polynomial agreeing with the table on every
//! Boolean point, via the divide-and-conquer `(1 - x_i)` product
//! construction; `evaluate` gets the same answer at a single point without
//! materializing the polynomial, by folding the table directly (the
//! bookkeeping-table trick also used by the sum-check prover).

use crate::error::Error;
use crate::field::Field;
use crate::mvlinear::MVLinear;
use hashbrown::HashMap;
use num_bigint::BigUint;
use num_traits::{One, Zero};

fn num_vars_for(len: usize) -> Result<usize, Error> {
    if len == 0 || !len.is_power_of_two() {
        return Err(Error::ShapeMismatch(
            "table length must be a positive power of two".into(),
        ));
    }
    Ok(len.trailing_zeros() as usize)
}

/// Build the dense multilinear extension of `data` (indexed by the
/// `n`-bit Boolean hypercube, low bit = `x_0`) as an `MVLinear`.
pub fn extend(data: &[BigUint], p: BigUint) -> Result<MVLinear, Error> {
    let n = num_vars_for(data.len())?;
    let field = Field::new(p.clone());
    let mut terms: HashMap<u64, BigUint> = HashMap::new();
    for (b, val) in data.iter().enumerate() {
        if val.is_zero() {
            continue;
        }
        // The Lagrange basis polynomial for point b is
        // prod_i ( x_i if bit i of b is set else (1 - x_i) ).
        // Expand that product into MVLinear terms directly: each bit of b
        // contributes a factor of x_i (term key bit i set, coefficient
        // unchanged) or (1 - x_i) (splits into a constant term and a
        // -x_i term), accumulated via repeated polynomial multiplication
        // restricted to disjoint-variable multiplicands, so it's safe to
        // build term-by-term without going through MVLinear::mul.
        let mut basis: HashMap<u64, BigUint> = HashMap::new();
        basis.insert(0u64, val.clone());
        for i in 0..n {
            let mut next: HashMap<u64, BigUint> = HashMap::new();
            let bit_set = (b >> i) & 1 == 1;
            for (k, v) in &basis {
                if bit_set {
                    let nk = k | (1u64 << i);
                    let e = next.entry(nk).or_insert_with(BigUint::zero);
                    *e = field.add(e, v);
                } else {
                    // (1 - x_i) * v = v - v*x_i
                    let e0 = next.entry(*k).or_insert_with(BigUint::zero);
                    *e0 = field.add(e0, v);
                    let nk = k | (1u64 << i);
                    let e1 = next.entry(nk).or_insert_with(BigUint::zero);
                    *e1 = field.sub(e1, v);
                }
            }
            basis = next;
        }
        for (k, v) in basis {
            let e = terms.entry(k).or_insert_with(BigUint::zero);
            *e = field.add(e, &v);
        }
    }
    MVLinear::new(n, terms, p)
}

/// Evaluate the multilinear extension of `data` at `args` directly, by
/// folding the table in place (no intermediate `MVLinear` is built).
/// Grounded on `multilinear_extension.py::evaluate`.
pub fn evaluate(data: &[BigUint], args: &[BigUint], p: BigUint) -> Result<BigUint, Error> {
    let n = num_vars_for(data.len())?;
    if args.len() != n {
        return Err(Error::ShapeMismatch(format!(
            "expected {} evaluation coordinates, got {}",
            n,
            args.len()
        )));
    }
    let field = Field::new(p);
    let mut table = data.to_vec();
    let mut half = table.len() / 2;
    for r in args {
        for b in 0..half {
            let lo = &table[2 * b];
            let hi = &table[2 * b + 1];
            // lo + r*(hi - lo)
            let diff = field.sub(hi, lo);
            table[b] = field.add(lo, &field.mul(&diff, r));
        }
        half /= 2;
    }
    Ok(table[0].clone())
}

/// Sparse variant: `data` is given as `(index, value)` pairs over an
/// implicit `2^n`-sized domain, omitting zero entries.
pub fn extend_sparse(
    num_variables: usize,
    data: &[(u64, BigUint)],
    p: BigUint,
) -> Result<MVLinear, Error> {
    let full_len = 1usize << num_variables;
    let mut dense = vec![BigUint::zero(); full_len];
    for (idx, v) in data {
        if *idx as usize >= full_len {
            return Err(Error::ShapeMismatch(
                "sparse index out of range for num_variables".into(),
            ));
        }
        dense[*idx as usize] = v.clone();
    }
    extend(&dense, p)
}

/// Sparse variant of `evaluate`: same value as `evaluate`, computed without
/// densifying, by summing the weight of each nonzero entry's Lagrange
/// basis polynomial at `args`.
pub fn evaluate_sparse(
    num_variables: usize,
    data: &[(u64, BigUint)],
    args: &[BigUint],
    p: BigUint,
) -> Result<BigUint, Error> {
    if args.len() != num_variables {
        return Err(Error::ShapeMismatch(format!(
            "expected {} evaluation coordinates, got {}",
            num_variables,
            args.len()
        )));
    }
    let field = Field::new(p);
    let mut sum = BigUint::zero();
    for (idx, v) in data {
        if v.is_zero() {
            continue;
        }
        if (*idx as usize) >= (1usize << num_variables) {
            return Err(Error::ShapeMismatch(
                "sparse index out of range for num_variables".into(),
            ));
        }
        let mut weight = v.clone();
        for i in 0..num_variables {
            let bit_set = (idx >> i) & 1 == 1;
            let factor = if bit_set {
                args[i].clone()
            } else {
                field.sub(&BigUint::one(), &args[i])
            };
            weight = field.mul(&weight, &factor);
            if weight.is_zero() {
                break;
            }
        }
        sum = field.add(&sum, &weight);
    }
    Ok(sum)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p() -> BigUint {
        BigUint::from(101u32)
    }

    fn bu(v: u64) -> BigUint {
        BigUint::from(v)
    }

    #[test]
    fn extend_agrees_on_boolean_points() {
        let data = vec![bu(3), bu(5), bu(7), bu(11)];
        let mle = extend(&data, p()).unwrap();
        for b in 0..4u64 {
            assert_eq!(mle.eval_bin(b), data[b as usize]);
        }
    }

    #[test]
    fn evaluate_matches_extend_eval() {
        let data = vec![bu(3), bu(5), bu(7), bu(11)];
        let mle = extend(&data, p()).unwrap();
        let args = vec![bu(9), bu(13)];
        let via_extend = mle.eval(&args);
        let via_evaluate = evaluate(&data, &args, p()).unwrap();
        assert_eq!(via_extend, via_evaluate);
    }

    #[test]
    fn evaluate_rejects_wrong_arity() {
        let data = vec![bu(1), bu(2), bu(3), bu(4)];
        assert!(evaluate(&data, &[bu(1)], p()).is_err());
    }

    #[test]
    fn extend_sparse_matches_dense_on_same_table() {
        let dense = vec![bu(0), bu(5), bu(0), bu(11)];
        let sparse = vec![(1u64, bu(5)), (3u64, bu(11))];
        let a = extend(&dense, p()).unwrap();
        let b = extend_sparse(2, &sparse, p()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn evaluate_sparse_matches_evaluate() {
        let dense = vec![bu(0), bu(5), bu(0), bu(11)];
        let sparse = vec![(1u64, bu(5)), (3u64, bu(11))];
        let args = vec![bu(9), bu(13)];
        let a = evaluate(&dense, &args, p()).unwrap();
        let b = evaluate_sparse(2, &sparse, &args, p()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn non_power_of_two_length_rejected() {
        let data = vec![bu(1), bu(2), bu(3)];
        assert!(extend(&data, p()).is_err());
    }
}

//! Sparse multilinear polynomials over a runtime prime field.
//!
//! Grounded on `examples/original_source/polynomial.py::MVLinear`. A term
//! key is a bit-mask in `[0, 2^n)`: bit `i` set means variable `x_i`
//! participates in that monomial. Terms with a zero coefficient are never
//! stored.

use crate::error::Error;
use crate::field::Field;
use hashbrown::HashMap;
use num_bigint::BigUint;
use num_traits::Zero;

/// A sparse multilinear polynomial in `num_variables` variables over `F_p`.
#[derive(Clone, Debug)]
pub struct MVLinear {
    pub num_variables: usize,
    terms: HashMap<u64, BigUint>,
    field: Field,
}

impl MVLinear {
    /// Construct a polynomial from `num_variables`, a term map, and the
    /// prime `p`. Coefficients are normalized mod `p`; zero coefficients are
    /// dropped. Rejects any term key `>= 2^num_variables`.
    pub fn new(
        num_variables: usize,
        terms: impl IntoIterator<Item = (u64, BigUint)>,
        p: BigUint,
    ) -> Result<Self, Error> {
        let field = Field::new(p);
        let limit: u64 = if num_variables >= 64 {
            u64::MAX
        } else {
            1u64 << num_variables
        };
        let mut map: HashMap<u64, BigUint> = HashMap::new();
        for (k, v) in terms {
            if num_variables < 64 && k >= limit {
                return Err(Error::TermOutOfRange(format!(
                    "term {:#b} is out of range for {} variables",
                    k, num_variables
                )));
            }
            let v = field.reduce(&v);
            if v.is_zero() {
                continue;
            }
            let entry = map.entry(k).or_insert_with(BigUint::zero);
            *entry = field.add(entry, &v);
            if entry.is_zero() {
                map.remove(&k);
            }
        }
        Ok(MVLinear {
            num_variables,
            terms: map,
            field,
        })
    }

    /// The zero polynomial in `num_variables` variables.
    pub fn zero(num_variables: usize, p: BigUint) -> Self {
        MVLinear {
            num_variables,
            terms: HashMap::new(),
            field: Field::new(p),
        }
    }

    /// A constant polynomial.
    pub fn constant(num_variables: usize, value: BigUint, p: BigUint) -> Self {
        MVLinear::new(num_variables, [(0u64, value)], p).expect("0 is always in range")
    }

    /// The prime this polynomial is defined over.
    pub fn modulus(&self) -> &BigUint {
        self.field.modulus()
    }

    /// Number of non-zero terms.
    pub fn num_terms(&self) -> usize {
        self.terms.len()
    }

    /// Coefficient of a given term key (`0` if absent).
    pub fn coefficient(&self, key: u64) -> BigUint {
        self.terms.get(&key).cloned().unwrap_or_else(BigUint::zero)
    }

    fn check_same_field(&self, other: &MVLinear) -> Result<(), Error> {
        if self.field != other.field {
            return Err(Error::FieldMismatch(
                "operands are defined over different primes".into(),
            ));
        }
        Ok(())
    }

    /// `self + other`.
    pub fn add(&self, other: &MVLinear) -> Result<MVLinear, Error> {
        self.check_same_field(other)?;
        let num_variables = self.num_variables.max(other.num_variables);
        let mut terms = self.terms.clone();
        for (k, v) in &other.terms {
            let entry = terms.entry(*k).or_insert_with(BigUint::zero);
            *entry = self.field.add(entry, v);
        }
        terms.retain(|_, v| !v.is_zero());
        Ok(MVLinear {
            num_variables,
            terms,
            field: self.field.clone(),
        })
    }

    /// `self - other`.
    pub fn sub(&self, other: &MVLinear) -> Result<MVLinear, Error> {
        self.check_same_field(other)?;
        let num_variables = self.num_variables.max(other.num_variables);
        let mut terms = self.terms.clone();
        for (k, v) in &other.terms {
            let entry = terms.entry(*k).or_insert_with(BigUint::zero);
            *entry = self.field.sub(entry, v);
        }
        terms.retain(|_, v| !v.is_zero());
        Ok(MVLinear {
            num_variables,
            terms,
            field: self.field.clone(),
        })
    }

    /// Additive inverse.
    pub fn neg(&self) -> MVLinear {
        let terms = self
            .terms
            .iter()
            .map(|(k, v)| (*k, self.field.neg(v)))
            .collect();
        MVLinear {
            num_variables: self.num_variables,
            terms,
            field: self.field.clone(),
        }
    }

    /// `self * other`. Fails with `NonMultilinear` if any pair of term keys
    /// shares a set bit (the product would square a variable).
    pub fn mul(&self, other: &MVLinear) -> Result<MVLinear, Error> {
        self.check_same_field(other)?;
        let num_variables = self.num_variables.max(other.num_variables);
        let mut terms: HashMap<u64, BigUint> = HashMap::new();
        for (sk, sv) in &self.terms {
            for (ok, ov) in &other.terms {
                if sk & ok != 0 {
                    return Err(Error::NonMultilinear(format!(
                        "terms {:#b} and {:#b} share a variable",
                        sk, ok
                    )));
                }
                let nk = sk | ok;
                let prod = self.field.mul(sv, ov);
                let entry = terms.entry(nk).or_insert_with(BigUint::zero);
                *entry = self.field.add(entry, &prod);
            }
        }
        terms.retain(|_, v| !v.is_zero());
        Ok(MVLinear {
            num_variables,
            terms,
            field: self.field.clone(),
        })
    }

    /// Evaluate at an arbitrary field point `x[0..num_variables)`.
    pub fn eval(&self, x: &[BigUint]) -> BigUint {
        let mut s = BigUint::zero();
        for (key, coef) in &self.terms {
            let mut val = coef.clone();
            let mut k = *key;
            let mut i = 0usize;
            while k != 0 {
                if k & 1 == 1 {
                    val = self.field.mul(&val, &x[i]);
                    if val.is_zero() {
                        break;
                    }
                }
                k >>= 1;
                i += 1;
            }
            s = self.field.add(&s, &val);
        }
        s
    }

    /// Evaluate at the Boolean point whose `i`th bit is `(at >> i) & 1`.
    pub fn eval_bin(&self, at: u64) -> BigUint {
        let args: Vec<BigUint> = (0..self.num_variables)
            .map(|i| BigUint::from((at >> i) & 1))
            .collect();
        self.eval(&args)
    }

    /// Fix the first `args.len()` variables to `args`, returning a
    /// polynomial in `num_variables - args.len()` variables.
    pub fn eval_part(&self, args: &[BigUint]) -> Result<MVLinear, Error> {
        let s = args.len();
        if s > self.num_variables {
            return Err(Error::ShapeMismatch(format!(
                "cannot fix {} variables of a {}-variable polynomial",
                s, self.num_variables
            )));
        }
        let mut new_terms: HashMap<u64, BigUint> = HashMap::new();
        for (term, coef) in &self.terms {
            let mut t = *term;
            let mut v = coef.clone();
            for k in 0..s {
                if t & (1 << k) != 0 {
                    v = self.field.mul(&v, &args[k]);
                    t &= !(1u64 << k);
                }
            }
            let shifted = t >> s;
            let entry = new_terms.entry(shifted).or_insert_with(BigUint::zero);
            *entry = self.field.add(entry, &v);
        }
        new_terms.retain(|_, v| !v.is_zero());
        MVLinear::new(self.num_variables - s, new_terms, self.field.modulus().clone())
    }

    /// Drop `n` variables from the low (left) end; fails if any of them
    /// actually appears in a term.
    pub fn collapse_left(&self, n: usize) -> Result<MVLinear, Error> {
        let mask = (1u64 << n) - 1;
        let mut new_terms = HashMap::new();
        for (t, v) in &self.terms {
            if t & mask != 0 {
                return Err(Error::ShapeMismatch(
                    "cannot collapse: variable exists in term".into(),
                ));
            }
            new_terms.insert(t >> n, v.clone());
        }
        MVLinear::new(self.num_variables - n, new_terms, self.field.modulus().clone())
    }

    /// Drop `n` variables from the high (right) end; fails if any of them
    /// actually appears in a term.
    pub fn collapse_right(&self, n: usize) -> Result<MVLinear, Error> {
        let mask = ((1u64 << n) - 1) << (self.num_variables - n);
        let anti_mask = (1u64 << (self.num_variables - n)) - 1;
        let mut new_terms = HashMap::new();
        for (t, v) in &self.terms {
            if t & mask != 0 {
                return Err(Error::ShapeMismatch(
                    "cannot collapse: variable exists in term".into(),
                ));
            }
            new_terms.insert(t & anti_mask, v.clone());
        }
        MVLinear::new(self.num_variables - n, new_terms, self.field.modulus().clone())
    }
}

impl PartialEq for MVLinear {
    fn eq(&self, other: &Self) -> bool {
        match self.sub(other) {
            Ok(diff) => diff.terms.is_empty(),
            Err(_) => false,
        }
    }
}

impl std::fmt::Display for MVLinear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        const LIMIT: usize = 8;
        write!(f, "MVLinear(")?;
        for (i, (k, v)) in self.terms.iter().enumerate() {
            if i == LIMIT {
                write!(f, " + ...")?;
                break;
            }
            write!(f, " + {}", v)?;
            let mut k = *k;
            let mut var = 0usize;
            while k != 0 {
                if k & 1 == 1 {
                    write!(f, "*x{}", var)?;
                }
                var += 1;
                k >>= 1;
            }
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p() -> BigUint {
        BigUint::from(17u32)
    }

    #[test]
    fn construct_normalizes_and_drops_zero() {
        // 2*x0 + 3*x0*x1, plus a term that cancels to zero.
        let m = MVLinear::new(
            2,
            [(0b01, BigUint::from(2u32)), (0b11, BigUint::from(3u32)), (0b10, BigUint::from(17u32))],
            p(),
        )
        .unwrap();
        assert_eq!(m.num_terms(), 2);
        assert_eq!(m.coefficient(0b10), BigUint::zero());
    }

    #[test]
    fn out_of_range_term_rejected() {
        let err = MVLinear::new(2, [(0b100, BigUint::from(1u32))], p());
        assert!(matches!(err, Err(Error::TermOutOfRange(_))));
    }

    #[test]
    fn eval_matches_spec_example() {
        // p=17, n=2, 2*x0 + 3*x0*x1; sum over boolean hypercube = 9 (spec.md scenario 1)
        let m = MVLinear::new(
            2,
            [(0b01, BigUint::from(2u32)), (0b11, BigUint::from(3u32))],
            p(),
        )
        .unwrap();
        let sum: BigUint = (0..4u64)
            .map(|b| m.eval_bin(b))
            .fold(BigUint::zero(), |a, b| (a + b) % p());
        assert_eq!(sum, BigUint::from(9u32));
    }

    #[test]
    fn mul_overlapping_vars_fails() {
        let a = MVLinear::new(2, [(0b01, BigUint::from(1u32))], p()).unwrap();
        let b = MVLinear::new(2, [(0b01, BigUint::from(1u32))], p()).unwrap();
        assert!(matches!(a.mul(&b), Err(Error::NonMultilinear(_))));
    }

    #[test]
    fn eval_part_then_eval_matches_direct_eval() {
        let m = MVLinear::new(
            3,
            [
                (0b001, BigUint::from(2u32)),
                (0b110, BigUint::from(5u32)),
                (0b011, BigUint::from(3u32)),
            ],
            p(),
        )
        .unwrap();
        let args = vec![BigUint::from(4u32), BigUint::from(9u32)];
        let rest = vec![BigUint::from(13u32)];
        let direct = m.eval(&[args[0].clone(), args[1].clone(), rest[0].clone()]);
        let partial = m.eval_part(&args).unwrap();
        assert_eq!(partial.eval(&rest), direct);
    }

    #[test]
    fn collapse_left_and_right_round_trip() {
        let m = MVLinear::new(3, [(0b100, BigUint::from(7u32))], p()).unwrap();
        let collapsed = m.collapse_left(2).unwrap();
        assert_eq!(collapsed.num_variables, 1);
        assert_eq!(collapsed.coefficient(0b1), BigUint::from(7u32));

        let m2 = MVLinear::new(3, [(0b001, BigUint::from(7u32))], p()).unwrap();
        let collapsed2 = m2.collapse_right(2).unwrap();
        assert_eq!(collapsed2.num_variables, 1);
        assert_eq!(collapsed2.coefficient(0b1), BigUint::from(7u32));
    }

    #[test]
    fn collapse_fails_if_variable_present() {
        let m = MVLinear::new(3, [(0b001, BigUint::from(1u32))], p()).unwrap();
        assert!(m.collapse_left(1).is_err());
    }

    #[test]
    fn equality_is_definitional() {
        let a = MVLinear::new(2, [(0b01, BigUint::from(2u32))], p()).unwrap();
        let b = MVLinear::new(2, [(0b01, BigUint::from(2u32)), (0b10, BigUint::from(17u32))], p()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn field_mismatch_is_rejected() {
        let a = MVLinear::new(1, [(0, BigUint::from(1u32))], BigUint::from(17u32)).unwrap();
        let b = MVLinear::new(1, [(0, BigUint::from(1u32))], BigUint::from(19u32)).unwrap();
        assert!(matches!(a.add(&b), Err(Error::FieldMismatch(_))));
    }
}

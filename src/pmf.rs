//! Claims about a product of multilinear polynomials.
//!
//! Grounded on `examples/original_source/PMF.py`. A `PMF` is either a
//! concrete list of `MVLinear` multiplicands sharing a variable count and
//! prime, or a *dummy* placeholder carrying only the shape
//! `(num_variables, num_multiplicands, p)` — for a checksum-only verifier
//! that checks a sum-check transcript's internal consistency without ever
//! evaluating the claimed polynomial itself (`GKRVerifier.py`'s inner
//! verifiers are built this way; this crate's `gkr::verifier` talks to
//! `sumcheck::verifier` directly by shape instead of via a `PMF`, but the
//! placeholder remains useful to anyone wiring up the same pattern by hand).

use crate::error::Error;
use crate::mvlinear::MVLinear;
use num_bigint::BigUint;
use num_traits::One;

#[derive(Clone, Debug)]
pub enum PMF {
    Concrete {
        num_variables: usize,
        p: BigUint,
        multiplicands: Vec<MVLinear>,
    },
    Dummy {
        num_variables: usize,
        p: BigUint,
        k: usize,
    },
}

impl PMF {
    /// Build a concrete PMF from multiplicands sharing `num_variables`
    /// variables and prime `p`.
    pub fn new(multiplicands: Vec<MVLinear>, num_variables: usize, p: BigUint) -> Result<Self, Error> {
        if multiplicands.is_empty() {
            return Err(Error::InvalidArgument(
                "a PMF must have at least one multiplicand".into(),
            ));
        }
        for m in &multiplicands {
            if m.num_variables != num_variables {
                return Err(Error::ShapeMismatch(
                    "all multiplicands must share the same variable count".into(),
                ));
            }
            if m.modulus() != &p {
                return Err(Error::FieldMismatch(
                    "all multiplicands must share the same prime".into(),
                ));
            }
        }
        Ok(PMF::Concrete {
            num_variables,
            p,
            multiplicands,
        })
    }

    /// A placeholder PMF of the given shape, carrying no polynomial data.
    pub fn dummy(num_variables: usize, k: usize, p: BigUint) -> Self {
        PMF::Dummy { num_variables, p, k }
    }

    pub fn num_variables(&self) -> usize {
        match self {
            PMF::Concrete { num_variables, .. } => *num_variables,
            PMF::Dummy { num_variables, .. } => *num_variables,
        }
    }

    pub fn modulus(&self) -> &BigUint {
        match self {
            PMF::Concrete { p, .. } => p,
            PMF::Dummy { p, .. } => p,
        }
    }

    /// The degree of the round polynomial: the number of multiplicands.
    pub fn num_multiplicands(&self) -> usize {
        match self {
            PMF::Concrete { multiplicands, .. } => multiplicands.len(),
            PMF::Dummy { k, .. } => *k,
        }
    }

    /// The multiplicands, if this PMF is concrete.
    pub fn multiplicands(&self) -> Result<&[MVLinear], Error> {
        match self {
            PMF::Concrete { multiplicands, .. } => Ok(multiplicands),
            PMF::Dummy { .. } => Err(Error::InvalidArgument(
                "a dummy PMF carries no polynomial data".into(),
            )),
        }
    }

    /// Evaluate `prod_i multiplicands[i](x)`. Fails on a dummy PMF.
    pub fn eval(&self, x: &[BigUint]) -> Result<BigUint, Error> {
        let multiplicands = self.multiplicands()?;
        let mut acc = BigUint::one();
        let p = self.modulus();
        for m in multiplicands {
            acc = (acc * m.eval(x)) % p;
        }
        Ok(acc)
    }

    /// Multiply in one more multiplicand, growing the product claim.
    /// Grounded on `examples/original_source/PMF.py::__mul__`.
    pub fn with_factor(&self, factor: MVLinear) -> Result<PMF, Error> {
        let multiplicands = self.multiplicands()?;
        if factor.num_variables != self.num_variables() {
            return Err(Error::ShapeMismatch(
                "factor must share the PMF's variable count".into(),
            ));
        }
        if factor.modulus() != self.modulus() {
            return Err(Error::FieldMismatch(
                "factor must share the PMF's prime".into(),
            ));
        }
        let mut multiplicands = multiplicands.to_vec();
        multiplicands.push(factor);
        PMF::new(multiplicands, self.num_variables(), self.modulus().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p() -> BigUint {
        BigUint::from(17u32)
    }

    fn lin(key: u64, coef: u32, n: usize) -> MVLinear {
        MVLinear::new(n, [(key, BigUint::from(coef))], p()).unwrap()
    }

    #[test]
    fn eval_multiplies_all_factors() {
        let a = lin(0b01, 2, 2);
        let b = lin(0b10, 3, 2);
        let pmf = PMF::new(vec![a, b], 2, p()).unwrap();
        let x = vec![BigUint::from(5u32), BigUint::from(7u32)];
        // (2*5) * (3*7) mod 17 = 10 * 21 mod 17 = 10*4 = 40 mod 17 = 6
        assert_eq!(pmf.eval(&x).unwrap(), BigUint::from(6u32));
    }

    #[test]
    fn dummy_eval_fails() {
        let pmf = PMF::dummy(2, 3, p());
        assert!(pmf.eval(&[BigUint::from(1u32), BigUint::from(1u32)]).is_err());
        assert_eq!(pmf.num_multiplicands(), 3);
    }

    #[test]
    fn with_factor_grows_product() {
        let a = lin(0b01, 2, 2);
        let pmf = PMF::new(vec![a], 2, p()).unwrap();
        let b = lin(0b10, 3, 2);
        let grown = pmf.with_factor(b).unwrap();
        assert_eq!(grown.num_multiplicands(), 2);
    }

    #[test]
    fn shape_mismatch_rejected() {
        let a = lin(0b01, 2, 2);
        let pmf = PMF::new(vec![a], 2, p()).unwrap();
        let bad = lin(0b001, 1, 3);
        assert!(matches!(pmf.with_factor(bad), Err(Error::ShapeMismatch(_))));
    }

    #[test]
    fn empty_multiplicands_rejected() {
        assert!(matches!(PMF::new(vec![], 2, p()), Err(Error::InvalidArgument(_))));
    }
}

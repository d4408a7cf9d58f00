//! Modular arithmetic over a runtime prime `p`.
//!
//! Unlike a compile-time field (e.g. a curve's scalar field), `p` here is an
//! ordinary [`BigUint`] chosen by the caller, matching
//! `examples/original_source/polynomial.py`'s `self.p: int`. `Field` is a
//! small context object bundling `p` with the handful of operations the rest
//! of the crate needs; field elements themselves are plain `BigUint`s,
//! always kept canonical in `[0, p)`.

use crate::error::Error;
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};

/// Modular arithmetic context for a fixed prime `p`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field {
    p: BigUint,
}

impl Field {
    /// Build a field context for prime `p`. `p` is trusted to be prime; this
    /// crate does not perform primality testing (prime generation/testing is
    /// explicitly out of scope, see `spec.md` §1).
    pub fn new(p: BigUint) -> Self {
        Field { p }
    }

    /// The modulus.
    pub fn modulus(&self) -> &BigUint {
        &self.p
    }

    /// Number of bytes needed to encode any element of `[0, p)`, i.e.
    /// `ceil(log2(p) / 8)`.
    pub fn canonical_byte_len(&self) -> usize {
        ((self.p.bits() as usize) + 7) / 8
    }

    /// Reduce an arbitrary integer into `[0, p)`.
    pub fn reduce(&self, a: &BigUint) -> BigUint {
        a % &self.p
    }

    /// `(a + b) mod p`.
    pub fn add(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a + b) % &self.p
    }

    /// `(a - b) mod p`, always returning a value in `[0, p)`.
    pub fn sub(&self, a: &BigUint, b: &BigUint) -> BigUint {
        let a = a % &self.p;
        let b = b % &self.p;
        if a >= b {
            a - b
        } else {
            &self.p - (b - a)
        }
    }

    /// `-a mod p`.
    pub fn neg(&self, a: &BigUint) -> BigUint {
        self.sub(&BigUint::zero(), a)
    }

    /// `(a * b) mod p`.
    pub fn mul(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a * b) % &self.p
    }

    /// Modular multiplicative inverse of `a`, via the extended Euclidean
    /// algorithm. Grounded on
    /// `examples/original_source/IPPMFVerifier.py::modInverse`.
    pub fn inv(&self, a: &BigUint) -> Result<BigUint, Error> {
        let a = a % &self.p;
        if a.is_zero() {
            return Err(Error::InvalidArgument("cannot invert zero".into()));
        }
        let p = num_bigint::BigInt::from(self.p.clone());
        let a = num_bigint::BigInt::from(a);
        let gcd = a.extended_gcd(&p);
        if gcd.gcd != num_bigint::BigInt::one() {
            return Err(Error::InvalidArgument(
                "value is not invertible modulo p".into(),
            ));
        }
        let mut x = gcd.x % &p;
        if x.sign() == num_bigint::Sign::Minus {
            x += &p;
        }
        Ok(x.to_biguint().expect("non-negative by construction"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn f17() -> Field {
        Field::new(BigUint::from(17u32))
    }

    #[test]
    fn add_sub_wrap_around() {
        let f = f17();
        assert_eq!(f.add(&BigUint::from(15u32), &BigUint::from(5u32)), BigUint::from(3u32));
        assert_eq!(f.sub(&BigUint::from(3u32), &BigUint::from(5u32)), BigUint::from(15u32));
    }

    #[test]
    fn neg_is_additive_inverse() {
        let f = f17();
        let a = BigUint::from(9u32);
        let na = f.neg(&a);
        assert!(f.add(&a, &na).is_zero());
    }

    #[test]
    fn inv_round_trips() {
        let f = f17();
        for v in 1u32..17 {
            let a = BigUint::from(v);
            let inv = f.inv(&a).unwrap();
            assert_eq!(f.mul(&a, &inv), BigUint::one());
        }
    }

    #[test]
    fn inv_zero_errors() {
        let f = f17();
        assert!(f.inv(&BigUint::zero()).is_err());
    }

    #[test]
    fn canonical_byte_len_matches_bit_length() {
        // 17 needs 5 bits -> 1 byte
        assert_eq!(f17().canonical_byte_len(), 1);
        // a 65-bit prime needs 9 bytes
        let big = Field::new(BigUint::from(1u128 << 64) + BigUint::from(1u32));
        assert_eq!(big.canonical_byte_len(), 9);
    }
}

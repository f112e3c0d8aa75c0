//! Arbitrary precision integers.
//!
//! JKSN integers have no upper bound on the wire: anything that does not fit a fixed
//! width is written as a varint. [`Inum`] keeps the common case cheap by holding an
//! `i64` whenever the value fits, and only falls back to a [`BigInt`] otherwise.

use num_bigint::{BigInt, BigUint};
use num_traits::{Signed, ToPrimitive};
use std::{
    convert::TryFrom,
    fmt,
    ops::{Add, Neg, Sub},
};

/// `Inum`s are either `i64` or `BigInt`s.
///
/// The representation is normalized: a value that fits in an `i64` is always an
/// [`Inum::I64`], so structural equality is numeric equality.
#[derive(Eq, PartialEq, Clone, Hash, Debug)]
pub enum Inum {
    I64(i64),
    Int(BigInt),
}

use Inum::*;

from_fn!(Inum, i64, I64);
from_fn!(Inum, u64, |u: u64| {
    if u <= i64::max_value() as u64 {
        I64(u as i64)
    } else {
        Int(BigInt::from(u))
    }
});
from_fn!(Inum, i128, |i: i128| {
    if i64::min_value() as i128 <= i && i <= i64::max_value() as i128 {
        I64(i as i64)
    } else {
        Int(BigInt::from(i))
    }
});
from_fn!(Inum, u128, |u: u128| {
    if u <= i64::max_value() as u128 {
        I64(u as i64)
    } else {
        Int(BigInt::from(u))
    }
});
from_fn!(Inum, BigInt, |i: BigInt| i.to_i64().map_or_else(|| Int(i), I64));
from_fn!(Inum, BigUint, |u: BigUint| Inum::from(BigInt::from(u)));
from_as!(Inum, isize, i64);
from_as!(Inum, usize, u64);

from_prims!(Inum);

impl From<Inum> for BigInt {
    fn from(i: Inum) -> BigInt { i.into_bigint() }
}

impl TryFrom<Inum> for i64 {
    type Error = Inum;

    fn try_from(i: Inum) -> Result<Self, Inum> {
        match i {
            I64(i) => Ok(i),
            n => Err(n),
        }
    }
}

impl TryFrom<Inum> for u64 {
    type Error = Inum;

    fn try_from(n: Inum) -> Result<Self, Inum> {
        let u = match &n {
            I64(i) if *i >= 0 => Some(*i as u64),
            Int(i) => i.to_u64(),
            _ => None,
        };
        u.ok_or(n)
    }
}

impl Inum {
    /// Consumes `self` to produce a `BigInt`.
    pub fn into_bigint(self) -> BigInt {
        match self {
            I64(i) => BigInt::from(i),
            Int(i) => i,
        }
    }

    /// Produces a `BigInt`.
    pub fn to_bigint(&self) -> BigInt {
        match self {
            I64(i) => BigInt::from(*i),
            Int(i) => i.clone(),
        }
    }

    /// Produces an `i64` if the value fits, otherwise returns `None`.
    pub fn to_i64(&self) -> Option<i64> {
        match self {
            I64(i) => Some(*i),
            Int(_) => None,
        }
    }

    /// Whether the value is strictly below zero.
    pub fn is_negative(&self) -> bool {
        match self {
            I64(i) => *i < 0,
            Int(i) => i.is_negative(),
        }
    }

    /// The absolute value, as an unsigned big integer.
    pub fn magnitude(&self) -> BigUint {
        match self {
            I64(i) => BigUint::from(i.unsigned_abs()),
            Int(i) => i.magnitude().clone(),
        }
    }

    /// `|self| < |other|`.
    pub fn abs_lt(&self, other: &Inum) -> bool {
        match (self, other) {
            (I64(a), I64(b)) => a.unsigned_abs() < b.unsigned_abs(),
            _ => self.magnitude() < other.magnitude(),
        }
    }
}

impl<'a, 'b> Add<&'b Inum> for &'a Inum {
    type Output = Inum;

    fn add(self, other: &'b Inum) -> Inum {
        if let (I64(a), I64(b)) = (self, other) {
            if let Some(c) = a.checked_add(*b) {
                return I64(c);
            }
        }
        Inum::from(self.to_bigint() + other.to_bigint())
    }
}

impl<'a, 'b> Sub<&'b Inum> for &'a Inum {
    type Output = Inum;

    fn sub(self, other: &'b Inum) -> Inum {
        if let (I64(a), I64(b)) = (self, other) {
            if let Some(c) = a.checked_sub(*b) {
                return I64(c);
            }
        }
        Inum::from(self.to_bigint() - other.to_bigint())
    }
}

impl<'a> Neg for &'a Inum {
    type Output = Inum;

    fn neg(self) -> Inum {
        match self {
            I64(i) => i.checked_neg().map_or_else(|| Inum::from(-BigInt::from(*i)), I64),
            Int(i) => Inum::from(-i.clone()),
        }
    }
}

impl PartialEq<i64> for Inum {
    fn eq(&self, other: &i64) -> bool {
        match self {
            I64(i) => i.eq(other),
            Int(_) => false,
        }
    }
}

impl fmt::Display for Inum {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            I64(i) => write!(f, "{}", i),
            Int(i) => write!(f, "{}", i),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes() {
        assert_eq!(Inum::from(BigInt::from(5)), I64(5));
        assert_eq!(Inum::from(u64::max_value()), Int(BigInt::from(u64::max_value())));
        assert_eq!(Inum::from(i128::from(i64::min_value())), I64(i64::min_value()));
        assert_eq!(Inum::from(7u8), 7);
    }

    #[test]
    fn arithmetic_overflows_into_bigint() {
        let max = Inum::from(i64::max_value());
        let one = Inum::from(1);
        let sum = &max + &one;
        assert_eq!(sum, Int(BigInt::from(i64::max_value()) + 1));

        // and comes back down again
        assert_eq!(&sum - &one, max);

        let min = Inum::from(i64::min_value());
        assert_eq!(-&min, Int(-BigInt::from(i64::min_value())));
    }

    #[test]
    fn magnitudes() {
        assert!(Inum::from(-3).abs_lt(&Inum::from(4)));
        assert!(!Inum::from(-4).abs_lt(&Inum::from(4)));
        assert!(Inum::from(i64::min_value()).abs_lt(&Inum::from(u64::max_value())));
        assert_eq!(Inum::from(i64::min_value()).magnitude(), BigUint::from(1u64 << 63));
    }
}

use num_bigint::BigInt;
use num_traits::{One, Signed, ToPrimitive, FromPrimitive};
use crate::*;

/// Integers: `i64` for small exact arithmetic, `BigInt` under `Q`.
pub trait IntOps<T = Self>: EucRingOps<T> {}

pub trait Integer: EucRing + IntOps + Signed + Ord + FromPrimitive + ToPrimitive
where for<'a> &'a Self: IntOps<Self> {}

macro_rules! impl_integer {
    ($type:ty) => {
        impl AddMonOps for $type {}
        impl AddGrpOps for $type {}
        impl MonOps for $type {}
        impl RingOps for $type {}
        impl EucRingOps for $type {}
        impl IntOps for $type {}
        impl<'a> AddMonOps<$type> for &'a $type {}
        impl<'a> AddGrpOps<$type> for &'a $type {}
        impl<'a> MonOps<$type> for &'a $type {}
        impl<'a> RingOps<$type> for &'a $type {}
        impl<'a> EucRingOps<$type> for &'a $type {}
        impl<'a> IntOps<$type> for &'a $type {}

        impl Elem for $type {
            fn math_symbol() -> String {
                String::from("Z")
            }
        }

        impl AddMon for $type {}
        impl AddGrp for $type {}
        impl Mon for $type {}

        impl Ring for $type {
            fn inv(&self) -> Option<Self> {
                self.is_unit().then(|| self.clone())
            }

            fn is_unit(&self) -> bool {
                self.abs().is_one()
            }

            fn normalizing_unit(&self) -> Self {
                if self.is_negative() { -Self::one() } else { Self::one() }
            }
        }

        impl EucRing for $type {
            fn gcd(x: &Self, y: &Self) -> Self {
                num_integer::Integer::gcd(x, y)
            }

            fn lcm(x: &Self, y: &Self) -> Self {
                num_integer::Integer::lcm(x, y)
            }
        }

        impl Integer for $type {}
    }
}

impl_integer!(i64);
impl_integer!(BigInt);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn units() {
        assert_eq!((-1i64).inv(), Some(-1));
        assert_eq!(5i64.inv(), None);
        assert!(!BigInt::from(0).is_unit());
        assert_eq!(BigInt::from(-7).normalizing_unit(), BigInt::from(-1));
    }

    #[test]
    fn gcd_lcm() {
        let (a, b) = (BigInt::from(-84), BigInt::from(36));
        assert_eq!(BigInt::gcd(&a, &b), BigInt::from(12));
        assert_eq!(BigInt::lcm(&a, &b), BigInt::from(252));
        assert_eq!(i64::gcd(&0, &-9), 9);
    }

    #[test]
    fn divides() {
        assert!(3i64.divides(&-9));
        assert!(!0i64.divides(&0));
        assert!(!BigInt::from(4).divides(&BigInt::from(6)));
    }
}

use std::fmt::{Display, Debug, Formatter};
use std::str::FromStr;
use std::cmp::Ordering;
use std::iter::{Sum, Product};
use std::ops::{Mul, Add, Sub, Neg, AddAssign, SubAssign, MulAssign, Div, DivAssign, Rem, RemAssign};
use num_traits::{Zero, One, Signed};
use auto_impl_ops::auto_ops;
use crate::util::format::paren_expr;
use crate::{EucRing, EucRingOps, Elem, Mon, AddMon, AddGrp, AddMonOps, AddGrpOps, MonOps, RingOps, Ring, FieldOps, Field, Integer, IntOps};

/// The fraction field of a Euclidean ring.
///
/// Values are always stored in lowest terms,
/// with the denominator in normal form (positive for integers).
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Ratio<T> {
    numer: T,
    denom: T,
}

impl<T> Ratio<T> {
    pub fn numer(&self) -> &T {
        &self.numer
    }

    pub fn denom(&self) -> &T {
        &self.denom
    }
}

impl<T> Ratio<T>
where T: EucRing, for<'x> &'x T: EucRingOps<T> {
    pub fn new(numer: T, denom: T) -> Self {
        assert!(!denom.is_zero(), "zero denominator");
        Self::reduced(numer, denom)
    }

    fn reduced(numer: T, denom: T) -> Self {
        if numer.is_zero() {
            return Self::zero()
        }

        let g = T::gcd(&numer, &denom);
        let (numer, denom) = if g.is_one() {
            (numer, denom)
        } else {
            (numer / &g, denom / &g)
        };

        let u = denom.normalizing_unit();
        if u.is_one() {
            Self { numer, denom }
        } else {
            Self { numer: numer * &u, denom: denom * u }
        }
    }

    pub fn from_numer(a: T) -> Self {
        Self { numer: a, denom: T::one() }
    }

    pub fn is_numer(&self) -> bool {
        self.denom.is_one()
    }
}

impl<T> From<i32> for Ratio<T>
where T: EucRing, for<'x> &'x T: EucRingOps<T> {
    fn from(i: i32) -> Self {
        Self::from_numer(T::from(i))
    }
}

impl<T> FromStr for Ratio<T>
where T: EucRing + FromStr, for<'x> &'x T: EucRingOps<T> {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || format!("cannot parse rational: '{s}'");
        let parse = |x: &str| x.trim().parse::<T>().map_err(|_| err());

        match s.split_once('/') {
            None => parse(s).map(Self::from_numer),
            Some((p, q)) => {
                let (p, q) = (parse(p)?, parse(q)?);
                if q.is_zero() {
                    Err(err())
                } else {
                    Ok(Self::new(p, q))
                }
            }
        }
    }
}

impl<T> Default for Ratio<T>
where T: EucRing, for<'x> &'x T: EucRingOps<T> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<T> Display for Ratio<T>
where T: EucRing, for<'x> &'x T: EucRingOps<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let p = paren_expr(self.numer.to_string());
        if self.is_numer() {
            write!(f, "{p}")
        } else {
            let q = paren_expr(self.denom.to_string());
            write!(f, "{p}/{q}")
        }
    }
}

impl<T> Debug for Ratio<T>
where T: EucRing, for<'x> &'x T: EucRingOps<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl<T> Zero for Ratio<T>
where T: EucRing, for<'x> &'x T: EucRingOps<T> {
    fn zero() -> Self {
        Self::from_numer(T::zero())
    }

    fn is_zero(&self) -> bool {
        self.numer.is_zero()
    }
}

impl<T> One for Ratio<T>
where T: EucRing, for<'x> &'x T: EucRingOps<T> {
    fn one() -> Self {
        Self::from_numer(T::one())
    }

    fn is_one(&self) -> bool {
        self.is_numer() && self.numer.is_one()
    }
}

impl<T> Neg for Ratio<T>
where T: EucRing, for<'x> &'x T: EucRingOps<T> {
    type Output = Self;
    fn neg(self) -> Self {
        Self { numer: -self.numer, denom: self.denom }
    }
}

impl<T> Neg for &Ratio<T>
where T: EucRing, for<'x> &'x T: EucRingOps<T> {
    type Output = Ratio<T>;
    fn neg(self) -> Ratio<T> {
        Ratio { numer: -&self.numer, denom: self.denom.clone() }
    }
}

#[auto_ops]
impl<T> AddAssign<&Ratio<T>> for Ratio<T>
where T: EucRing, for<'x> &'x T: EucRingOps<T> {
    fn add_assign(&mut self, rhs: &Ratio<T>) {
        let n = &self.numer * &rhs.denom + &rhs.numer * &self.denom;
        let d = &self.denom * &rhs.denom;
        *self = Self::reduced(n, d)
    }
}

#[auto_ops]
impl<T> SubAssign<&Ratio<T>> for Ratio<T>
where T: EucRing, for<'x> &'x T: EucRingOps<T> {
    fn sub_assign(&mut self, rhs: &Ratio<T>) {
        *self += -rhs
    }
}

#[auto_ops]
impl<T> MulAssign<&Ratio<T>> for Ratio<T>
where T: EucRing, for<'x> &'x T: EucRingOps<T> {
    fn mul_assign(&mut self, rhs: &Ratio<T>) {
        if self.is_zero() || rhs.is_one() {
            return
        }
        let n = &self.numer * &rhs.numer;
        let d = &self.denom * &rhs.denom;
        *self = Self::reduced(n, d)
    }
}

#[auto_ops]
impl<T> DivAssign<&Ratio<T>> for Ratio<T>
where T: EucRing, for<'x> &'x T: EucRingOps<T> {
    fn div_assign(&mut self, rhs: &Ratio<T>) {
        let Some(inv) = rhs.inv() else {
            panic!("division by zero")
        };
        *self *= inv
    }
}

#[auto_ops]
impl<'a, 'b, T> Rem<&'b Ratio<T>> for &'a Ratio<T>
where T: EucRing, for<'x> &'x T: EucRingOps<T> {
    type Output = Ratio<T>;
    fn rem(self, rhs: &'b Ratio<T>) -> Ratio<T> {
        assert!(!rhs.is_zero(), "division by zero");
        Ratio::zero()
    }
}

impl<T> Sum for Ratio<T>
where T: EucRing, for<'x> &'x T: EucRingOps<T> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, r| acc + r)
    }
}

impl<'a, T> Sum<&'a Ratio<T>> for Ratio<T>
where T: EucRing, for<'x> &'x T: EucRingOps<T> {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, r| acc + r)
    }
}

impl<T> Product for Ratio<T>
where T: EucRing, for<'x> &'x T: EucRingOps<T> {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::one(), |acc, r| acc * r)
    }
}

macro_rules! decl_alg_ops {
    ($trait:ident) => {
        impl<T> $trait for Ratio<T>
        where T: EucRing, for<'x> &'x T: EucRingOps<T> {}

        impl<T> $trait<Ratio<T>> for &Ratio<T>
        where T: EucRing, for<'x> &'x T: EucRingOps<T> {}
    };
}

decl_alg_ops!(AddMonOps);
decl_alg_ops!(AddGrpOps);
decl_alg_ops!(MonOps);
decl_alg_ops!(RingOps);
decl_alg_ops!(EucRingOps);
decl_alg_ops!(FieldOps);

impl<T> Elem for Ratio<T>
where T: EucRing, for<'x> &'x T: EucRingOps<T> {
    fn math_symbol() -> String {
        let t = T::math_symbol();
        if &t == "Z" {
            String::from("Q")
        } else {
            format!("Frac({t})")
        }
    }
}

impl<T> Mon for Ratio<T>
where T: EucRing, for<'x> &'x T: EucRingOps<T> {}

impl<T> AddMon for Ratio<T>
where T: EucRing, for<'x> &'x T: EucRingOps<T> {}

impl<T> AddGrp for Ratio<T>
where T: EucRing, for<'x> &'x T: EucRingOps<T> {}

impl<T> Ring for Ratio<T>
where T: EucRing, for<'x> &'x T: EucRingOps<T> {
    fn inv(&self) -> Option<Self> {
        if self.is_zero() {
            None
        } else {
            Some(Self::new(self.denom.clone(), self.numer.clone()))
        }
    }

    fn is_unit(&self) -> bool {
        !self.is_zero()
    }

    fn normalizing_unit(&self) -> Self {
        self.inv().unwrap_or_else(Self::one)
    }
}

impl<T> EucRing for Ratio<T>
where T: EucRing, for<'x> &'x T: EucRingOps<T> {}

impl<T> Field for Ratio<T>
where T: EucRing, for<'x> &'x T: EucRingOps<T> {}

impl<T> Ratio<T>
where T: Integer, for<'x> &'x T: IntOps<T> {
    pub fn abs(&self) -> Self {
        if self.numer.is_negative() {
            -self
        } else {
            self.clone()
        }
    }

    pub fn is_negative(&self) -> bool {
        self.numer.is_negative()
    }
}

impl<T> Ord for Ratio<T>
where T: Integer, for<'x> &'x T: IntOps<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // denominators are positive.
        let l = &self.numer * &other.denom;
        let r = &other.numer * &self.denom;
        l.cmp(&r)
    }
}

impl<T> PartialOrd for Ratio<T>
where T: Integer, for<'x> &'x T: IntOps<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

//! The algebraic layers used by path values.
//!
//! Every layer comes in two parts: `XOps<T>`, the operators on `T` and on `&T`,
//! and `X`, the structure itself, bounded by `for<'a> &'a Self: XOps<Self>`
//! so that generic code can compute on references without cloning.

use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign};
use num_traits::{One, Zero};
use crate::Elem;

pub trait AddMonOps<T = Self>:
    Sized +
    Add<T, Output = T> +
    for<'a> Add<&'a T, Output = T>
{}

pub trait AddMon:
    Elem +
    Zero +
    AddMonOps +
    AddAssign +
    for<'a> AddAssign<&'a Self>
where
    for<'a> &'a Self: AddMonOps<Self>
{}

pub trait AddGrpOps<T = Self>:
    AddMonOps<T> +
    Neg<Output = T> +
    Sub<T, Output = T> +
    for<'a> Sub<&'a T, Output = T>
{}

pub trait AddGrp:
    AddMon +
    AddGrpOps +
    SubAssign +
    for<'a> SubAssign<&'a Self>
where
    for<'a> &'a Self: AddGrpOps<Self>
{}

pub trait MonOps<T = Self>:
    Sized +
    Mul<T, Output = T> +
    for<'a> Mul<&'a T, Output = T>
{}

pub trait Mon:
    Elem +
    One +
    MonOps +
    MulAssign +
    for<'a> MulAssign<&'a Self>
where
    for<'a> &'a Self: MonOps<Self>
{}

pub trait RingOps<T = Self>:
    AddGrpOps<T> +
    MonOps<T>
{}

/// Commutative rings with a distinguished unit normalizing each associate class.
pub trait Ring:
    AddGrp +
    Mon +
    RingOps +
    From<i32>
where
    for<'a> &'a Self: RingOps<Self>
{
    fn inv(&self) -> Option<Self>;
    fn is_unit(&self) -> bool;

    /// `u` with `self * u` the normal form of `self`,
    /// e.g. positive integers, monic polynomials.
    fn normalizing_unit(&self) -> Self;
}

pub trait EucRingOps<T = Self>:
    RingOps<T> +
    Div<T, Output = T> +
    for<'a> Div<&'a T, Output = T> +
    Rem<T, Output = T> +
    for<'a> Rem<&'a T, Output = T>
{}

pub trait EucRing:
    Ring +
    EucRingOps +
    DivAssign +
    for<'a> DivAssign<&'a Self> +
    RemAssign +
    for<'a> RemAssign<&'a Self>
where
    for<'a> &'a Self: EucRingOps<Self>,
{
    fn divides(&self, y: &Self) -> bool {
        !self.is_zero() && (y % self).is_zero()
    }

    /// Normalized gcd by the Euclidean algorithm.
    fn gcd(x: &Self, y: &Self) -> Self {
        let (mut x, mut y) = (x.clone(), y.clone());
        while !y.is_zero() {
            let r = &x % &y;
            (x, y) = (y, r);
        }
        let u = x.normalizing_unit();
        x * u
    }

    fn lcm(x: &Self, y: &Self) -> Self {
        if x.is_zero() || y.is_zero() {
            return Self::zero()
        }
        let l = x * (y / Self::gcd(x, y));
        let u = l.normalizing_unit();
        l * u
    }
}

pub trait FieldOps<T = Self>:
    EucRingOps<T>
{}

pub trait Field:
    EucRing +
    FieldOps
where
    for<'a> &'a Self: FieldOps<Self>
{}

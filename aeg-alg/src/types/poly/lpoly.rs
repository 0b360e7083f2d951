use std::fmt::{Display, Debug};
use std::iter::{Sum, Product};
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign, Mul, MulAssign};
use ahash::AHashMap;
use itertools::Itertools;
use num_traits::{Zero, One, Pow};
use auto_impl_ops::auto_ops;
use crate::{Elem, AddMon, AddMonOps, AddGrp, AddGrpOps, Mon, MonOps, Ring, RingOps, Field, FieldOps};
use super::MDeg;

/// Multivariate Laurent polynomials `Σ r·t^d` over `R`.
///
/// Zero coefficients are never stored, so structural equality
/// is equality of polynomials.
#[derive(Clone, PartialEq, Eq)]
pub struct LPoly<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    data: AHashMap<MDeg, R>,
}

impl<R> LPoly<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    pub fn new() -> Self {
        let hasher = ahash::RandomState::with_seeds(0, 0, 0, 0);
        let data = AHashMap::with_hasher(hasher);
        Self { data }
    }

    pub fn from_const(r: R) -> Self {
        Self::mono(MDeg::one(), r)
    }

    pub fn mono(d: MDeg, r: R) -> Self {
        let mut res = Self::new();
        if !r.is_zero() {
            res.data.insert(d, r);
        }
        res
    }

    /// The `i`-th variable `tᵢ`.
    pub fn variable(i: usize) -> Self {
        Self::mono(MDeg::from((i, 1)), R::one())
    }

    fn clean(&mut self) {
        self.data.retain(|_, r| !r.is_zero());
    }

    // must clean after call
    fn add_term(&mut self, d: MDeg, r: R) {
        if r.is_zero() { return }
        if let Some(v) = self.data.get_mut(&d) {
            *v += r;
        } else {
            self.data.insert(d, r);
        }
    }

    pub fn nterms(&self) -> usize {
        self.data.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MDeg, &R)> {
        self.data.iter()
    }

    /// Terms in descending monomial order.
    pub fn sorted_terms(&self) -> impl Iterator<Item = (&MDeg, &R)> {
        self.data.iter().sorted_by(|(x, _), (y, _)| y.cmp(x))
    }

    pub fn coeff(&self, d: &MDeg) -> R {
        self.data.get(d).cloned().unwrap_or_else(R::zero)
    }

    pub fn const_term(&self) -> R {
        self.coeff(&MDeg::one())
    }

    pub fn is_const(&self) -> bool {
        self.data.keys().all(|d| d.is_one())
    }

    pub fn is_mono(&self) -> bool {
        self.nterms() == 1
    }

    pub fn lead_term(&self) -> Option<(&MDeg, &R)> {
        self.data.iter().max_by(|(x, _), (y, _)| x.cmp(y))
    }

    pub fn lead_coeff(&self) -> R {
        self.lead_term().map(|(_, r)| r.clone()).unwrap_or_else(R::zero)
    }

    /// Indices of the variables occurring in some term, sorted.
    pub fn vars(&self) -> Vec<usize> {
        self.data.keys().flat_map(|d| d.indices()).sorted().dedup().collect()
    }

    /// Componentwise minimum of the exponents over all terms.
    pub fn min_degs(&self) -> MDeg {
        self.data.keys().fold(None, |res: Option<MDeg>, d|
            Some(match res {
                Some(m) => m.min_each(d),
                None => d.clone()
            })
        ).unwrap_or_default()
    }

    /// Componentwise maximum of the exponents over all terms.
    pub fn max_degs(&self) -> MDeg {
        self.data.keys().fold(None, |res: Option<MDeg>, d|
            Some(match res {
                Some(m) => m.max_each(d),
                None => d.clone()
            })
        ).unwrap_or_default()
    }

    /// No negative exponent occurs.
    pub fn is_polynomial(&self) -> bool {
        self.data.keys().all(|d| d.is_nonneg())
    }

    /// Multiplication by the monomial `t^d`.
    pub fn shift(&self, d: &MDeg) -> Self {
        if d.is_one() {
            return self.clone()
        }
        self.iter().map(|(x, r)| (x + d, r.clone())).collect()
    }

    /// Writes `self = t^m · f` with `f` a polynomial divisible by no variable.
    pub fn split_mono(&self) -> (MDeg, Self) {
        let m = self.min_degs();
        let f = self.shift(&-&m);
        (m, f)
    }

    /// Substitutes `v` for the variable `tᵢ`.
    /// Returns `None` when a negative power of a non-unit `v` is required.
    pub fn eval(&self, i: usize, v: &Self) -> Option<Self> {
        let v_inv = v.inv();
        let mut res = Self::zero();

        for (x, r) in self.iter() {
            let e = x[i];
            let rest = Self::mono(x - MDeg::from((i, e)), r.clone());
            let p = if e >= 0 {
                v.pow(e as usize)
            } else {
                v_inv.as_ref()?.pow((-e) as usize)
            };
            res += rest * p;
        }

        Some(res)
    }

    pub fn fmt_with(&self, f: &mut std::fmt::Formatter<'_>, debug: bool) -> std::fmt::Result {
        use crate::util::format::lc;

        let terms = self.sorted_terms().map(|(x, r)| {
            let r = if debug { format!("{r:?}") } else { r.to_string() };
            (r, x.to_string())
        });

        write!(f, "{}", lc(terms))
    }
}

impl<R> Default for LPoly<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> From<i32> for LPoly<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    fn from(i: i32) -> Self {
        Self::from_const(R::from(i))
    }
}

impl<R> From<(MDeg, R)> for LPoly<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    fn from(value: (MDeg, R)) -> Self {
        let (d, r) = value;
        Self::mono(d, r)
    }
}

impl<R> FromIterator<(MDeg, R)> for LPoly<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    fn from_iter<T: IntoIterator<Item = (MDeg, R)>>(iter: T) -> Self {
        let mut res = Self::new();
        for (d, r) in iter {
            res.add_term(d, r);
        }
        res.clean();
        res
    }
}

impl<R> IntoIterator for LPoly<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    type Item = (MDeg, R);
    type IntoIter = std::collections::hash_map::IntoIter<MDeg, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<R> Display for LPoly<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.fmt_with(f, false)
    }
}

impl<R> Debug for LPoly<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.fmt_with(f, true)
    }
}

impl<R> Zero for LPoly<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    fn zero() -> Self {
        Self::new()
    }

    fn is_zero(&self) -> bool {
        self.data.is_empty()
    }
}

impl<R> One for LPoly<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    fn one() -> Self {
        Self::from_const(R::one())
    }

    fn is_one(&self) -> bool {
        self.is_mono() && self.const_term().is_one()
    }
}

impl<R> Neg for LPoly<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    type Output = Self;
    fn neg(self) -> Self::Output {
        self.into_iter().map(|(x, r)| (x, -r)).collect()
    }
}

impl<R> Neg for &LPoly<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    type Output = LPoly<R>;
    fn neg(self) -> Self::Output {
        self.iter().map(|(x, r)| (x.clone(), -r)).collect()
    }
}

#[auto_ops]
impl<R> AddAssign<&LPoly<R>> for LPoly<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    fn add_assign(&mut self, rhs: &LPoly<R>) {
        for (x, r) in rhs.iter() {
            self.add_term(x.clone(), r.clone());
        }
        self.clean()
    }
}

#[auto_ops]
impl<R> SubAssign<&LPoly<R>> for LPoly<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    fn sub_assign(&mut self, rhs: &LPoly<R>) {
        for (x, r) in rhs.iter() {
            self.add_term(x.clone(), -r);
        }
        self.clean()
    }
}

#[auto_ops]
impl<R> MulAssign<&R> for LPoly<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    fn mul_assign(&mut self, rhs: &R) {
        let data = std::mem::take(&mut self.data);
        self.data = data.into_iter().map(|(x, r)| (x, &r * rhs)).collect();
        self.clean()
    }
}

#[auto_ops]
impl<R> MulAssign<&LPoly<R>> for LPoly<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    fn mul_assign(&mut self, rhs: &LPoly<R>) {
        if rhs.is_one() {
            return
        }

        let mut res = Self::new();
        res.data.reserve(self.nterms() * rhs.nterms());

        for (x, r) in self.iter() {
            for (y, s) in rhs.iter() {
                res.add_term(x + y, r * s);
            }
        }

        res.clean();
        *self = res
    }
}

impl<R> Pow<usize> for &LPoly<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    type Output = LPoly<R>;
    fn pow(self, n: usize) -> Self::Output {
        // square-and-multiply
        let mut res = LPoly::one();
        let mut base = self.clone();
        let mut n = n;
        while n > 0 {
            if n & 1 == 1 {
                res *= &base;
            }
            n >>= 1;
            if n > 0 {
                base = &base * &base;
            }
        }
        res
    }
}

impl<R> Pow<isize> for &LPoly<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    type Output = LPoly<R>;
    fn pow(self, n: isize) -> Self::Output {
        if n >= 0 {
            self.pow(n as usize)
        } else {
            let Some(inv) = self.inv() else {
                panic!("{self} is not invertible.")
            };
            (&inv).pow((-n) as usize)
        }
    }
}

impl<R> Sum for LPoly<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |res, f| res + f)
    }
}

impl<'a, R> Sum<&'a LPoly<R>> for LPoly<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |res, f| res + f)
    }
}

impl<R> Product for LPoly<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::one(), |res, f| res * f)
    }
}

macro_rules! impl_alg_op {
    ($trait:ident) => {
        impl<R> $trait<Self> for LPoly<R>
        where R: Ring, for<'x> &'x R: RingOps<R> {}

        impl<R> $trait<LPoly<R>> for &LPoly<R>
        where R: Ring, for<'x> &'x R: RingOps<R> {}
    };
}

impl_alg_op!(AddMonOps);
impl_alg_op!(AddGrpOps);
impl_alg_op!(MonOps);
impl_alg_op!(RingOps);

impl<R> Elem for LPoly<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    fn math_symbol() -> String {
        format!("{}[t±]", R::math_symbol())
    }
}

impl<R> AddMon for LPoly<R>
where R: Ring, for<'x> &'x R: RingOps<R> {}

impl<R> AddGrp for LPoly<R>
where R: Ring, for<'x> &'x R: RingOps<R> {}

impl<R> Mon for LPoly<R>
where R: Ring, for<'x> &'x R: RingOps<R> {}

impl<R> Ring for LPoly<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    fn inv(&self) -> Option<Self> {
        if !self.is_mono() {
            return None
        }
        let (x, r) = self.iter().next()?;
        Some(Self::mono(-x, r.inv()?))
    }

    fn is_unit(&self) -> bool {
        self.is_mono() && self.lead_coeff().is_unit()
    }

    fn normalizing_unit(&self) -> Self {
        Self::from_const(self.lead_coeff().normalizing_unit())
    }
}

impl<R> LPoly<R>
where R: Field, for<'x> &'x R: FieldOps<R> {
    /// Scales `self` so that its leading coefficient is `1`.
    pub fn monic(&self) -> Self {
        if self.is_zero() {
            return Self::zero()
        }
        let u = self.lead_coeff().normalizing_unit();
        self * &u
    }

    /// Division of polynomials (no negative exponent) with remainder,
    /// by repeatedly cancelling leading terms.
    fn poly_div_rem(&self, g: &Self) -> (Self, Self) {
        assert!(!g.is_zero(), "division by zero");

        let (lg, cg) = match g.lead_term() {
            Some((x, r)) => (x.clone(), r.clone()),
            None => unreachable!()
        };

        let mut q = Self::zero();
        let mut r = Self::zero();
        let mut f = self.clone();

        while let Some((x, c)) = f.lead_term().map(|(x, c)| (x.clone(), c.clone())) {
            if x.all_geq(&lg) {
                let m = Self::mono(&x - &lg, &c / &cg);
                f -= g * &m;
                q += m;
            } else {
                f -= Self::mono(x.clone(), c.clone());
                r += Self::mono(x, c);
            }
        }

        (q, r)
    }

    /// Exact division in the Laurent polynomial ring.
    /// Returns `None` if `g` does not divide `self`.
    pub fn div_exact(&self, g: &Self) -> Option<Self> {
        assert!(!g.is_zero(), "division by zero");

        if self.is_zero() {
            return Some(Self::zero())
        }

        let (mf, f) = self.split_mono();
        let (mg, g) = g.split_mono();
        let (q, r) = f.poly_div_rem(&g);

        if r.is_zero() {
            Some(q.shift(&(mf - mg)))
        } else {
            None
        }
    }

    pub fn divides(&self, f: &Self) -> bool {
        !self.is_zero() && f.div_exact(self).is_some()
    }
}

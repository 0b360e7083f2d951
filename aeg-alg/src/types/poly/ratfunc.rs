use std::fmt::Display;
use num_traits::{Zero, One};
use crate::factor::gcd;
use crate::{Ring, Q};
use super::{LPoly, MDeg};

/// Rational function `numer / denom` over Q in reduced form:
/// both parts are polynomials, coprime, and `denom` is monic.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct RatFunc {
    numer: LPoly<Q>,
    denom: LPoly<Q>,
}

impl RatFunc {
    /// `f / g` for Laurent polynomials `f, g`.
    pub fn new(f: LPoly<Q>, g: LPoly<Q>) -> Self {
        assert!(!g.is_zero(), "zero denominator");

        if f.is_zero() {
            return Self::zero()
        }

        let (mf, f) = f.split_mono();
        let (mg, g) = g.split_mono();

        // t^m with m = mf - mg, distributed to the side where it is a polynomial.
        let m = mf - mg;
        let pos: MDeg = m.iter().filter(|(_, d)| *d > 0).collect();
        let neg: MDeg = m.iter().filter(|(_, d)| *d < 0).map(|(i, d)| (i, -d)).collect();

        let h = gcd(&f, &g);
        let (f, g) = match (f.div_exact(&h), g.div_exact(&h)) {
            (Some(f), Some(g)) => (f, g),
            _ => unreachable!("gcd must divide both")
        };

        let numer = f.shift(&pos);
        let denom = g.shift(&neg);

        let u = denom.lead_coeff().normalizing_unit();
        Self { numer: numer * &u, denom: denom * &u }
    }

    pub fn zero() -> Self {
        Self { numer: LPoly::zero(), denom: LPoly::one() }
    }

    pub fn numer(&self) -> &LPoly<Q> {
        &self.numer
    }

    pub fn denom(&self) -> &LPoly<Q> {
        &self.denom
    }

    pub fn is_zero(&self) -> bool {
        self.numer.is_zero()
    }

    /// The denominator is a unit.
    pub fn is_polynomial(&self) -> bool {
        self.denom.is_one()
    }

    /// The denominator is a monomial.
    pub fn is_laurent(&self) -> bool {
        self.denom.is_mono()
    }

    /// The denominator is exactly `tᵢ`.
    pub fn denom_is_var(&self, i: usize) -> bool {
        self.denom == LPoly::variable(i)
    }

    /// The Laurent polynomial equal to `self`, if the denominator is a monomial.
    pub fn to_lpoly(&self) -> Option<LPoly<Q>> {
        let inv = self.denom.inv()?;
        Some(&self.numer * &inv)
    }
}

impl From<LPoly<Q>> for RatFunc {
    fn from(f: LPoly<Q>) -> Self {
        Self::new(f, LPoly::one())
    }
}

impl Display for RatFunc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use crate::util::format::paren_expr;

        if self.is_polynomial() {
            write!(f, "{}", self.numer)
        } else {
            write!(f, "{}/{}", paren_expr(&self.numer), paren_expr(&self.denom))
        }
    }
}

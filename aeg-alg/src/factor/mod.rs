//! Factorization of Laurent polynomials over Q.
//!
//! A Laurent polynomial is split into a unit, a Laurent monomial and
//! primitive integral irreducible polynomials. Univariate polynomials are
//! factored modulo a small prime, lifted and recombined; multivariate ones
//! are reduced to the univariate case by Kronecker substitution.

mod zpoly;
mod modp;
mod hensel;
mod univar;

use std::fmt::Display;
use itertools::Itertools;
use log::debug;
use num_bigint::BigInt;
use num_traits::{Zero, One};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::{LPoly, MDeg, Q, Ring};
use zpoly::ZPoly;

pub use univar::squarefree_decomp;

/// `unit · t^mono · ∏ fᵢ^mᵢ`
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Factorization {
    pub unit: Q,
    pub mono: MDeg,
    pub factors: Vec<(LPoly<Q>, usize)>,
}

impl Factorization {
    pub fn zero() -> Self {
        Self { unit: Q::zero(), mono: MDeg::one(), factors: vec![] }
    }

    pub fn is_zero(&self) -> bool {
        self.unit.is_zero()
    }

    pub fn expand(&self) -> LPoly<Q> {
        let p: LPoly<Q> = self.factors.iter().map(|(f, m)| {
            num_traits::Pow::pow(f, *m)
        }).product();
        p.shift(&self.mono) * &self.unit
    }

    /// Multiplicity of `f` among the irreducible factors, up to sign and scaling.
    pub fn multiplicity(&self, f: &LPoly<Q>) -> usize {
        let (_, f) = primitive_part(&f.split_mono().1);
        self.factors.iter().find(|(g, _)| g == &f).map(|(_, m)| *m).unwrap_or(0)
    }

    pub fn nfactors(&self) -> usize {
        self.factors.iter().map(|(_, m)| m).sum()
    }
}

impl Display for Factorization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use crate::util::format::superscript;

        if self.is_zero() {
            return write!(f, "0")
        }

        let mut parts = vec![];
        if !self.unit.is_one() || (self.mono.is_one() && self.factors.is_empty()) {
            parts.push(self.unit.to_string());
        }
        if !self.mono.is_one() {
            parts.push(self.mono.to_string());
        }
        for (g, m) in self.factors.iter() {
            let e = if *m > 1 { superscript(*m as isize) } else { String::new() };
            parts.push(format!("({g}){e}"));
        }

        write!(f, "{}", parts.join(" "))
    }
}

/// `f = c · g` with `g` integral, primitive, with positive leading coefficient.
pub fn primitive_part(f: &LPoly<Q>) -> (Q, LPoly<Q>) {
    if f.is_zero() {
        return (Q::zero(), f.clone())
    }

    let (mut n, mut d) = (BigInt::zero(), BigInt::one());
    for (_, r) in f.iter() {
        n = num_integer::Integer::gcd(&n, r.numer());
        d = num_integer::Integer::lcm(&d, r.denom());
    }

    let mut c = Q::new(n, d);
    if f.lead_coeff().is_negative() {
        c = -c;
    }

    let g = match c.inv() {
        Some(u) => f * &u,
        None => unreachable!()
    };
    (c, g)
}

fn to_zpoly(f: &LPoly<Q>, exponent: impl Fn(&MDeg) -> usize) -> ZPoly {
    let n = f.iter().map(|(x, _)| exponent(x)).max().unwrap_or(0);
    let mut coeffs = vec![BigInt::zero(); n + 1];
    for (x, r) in f.iter() {
        debug_assert!(r.is_numer());
        coeffs[exponent(x)] += r.numer();
    }
    ZPoly::new(coeffs)
}

/// The substitution `tᵢ ↦ y^{eᵢ}` for the variables of a polynomial,
/// with mixed radix `eᵢ₊₁ = eᵢ·(degᵢ + 1)`. It is injective on monomials
/// of bounded degree, so each factor is recovered from its image.
struct Kronecker {
    vars: Vec<usize>,
    bounds: Vec<usize>,
    radix: Vec<usize>,
}

impl Kronecker {
    fn new(f: &LPoly<Q>) -> Self {
        let vars = f.vars();
        let max = f.max_degs();
        let bounds = vars.iter().map(|&i| max[i] as usize).collect_vec();
        let radix = bounds.iter().scan(1usize, |e, &d| {
            let r = *e;
            *e *= d + 1;
            Some(r)
        }).collect_vec();
        Self { vars, bounds, radix }
    }

    fn exponent(&self, x: &MDeg) -> usize {
        self.vars.iter().zip(self.radix.iter()).map(|(&i, &e)| x[i] as usize * e).sum()
    }

    fn apply(&self, f: &LPoly<Q>) -> ZPoly {
        to_zpoly(f, |x| self.exponent(x))
    }

    fn invert(&self, g: &ZPoly) -> Option<LPoly<Q>> {
        let k = self.vars.len();
        let mut terms = vec![];

        for (n, c) in g.coeffs().iter().enumerate() {
            if c.is_zero() { continue }

            let mut n = n;
            let mut x = vec![];
            for j in (0..k).rev() {
                let d = n / self.radix[j];
                if d > self.bounds[j] {
                    return None
                }
                n -= d * self.radix[j];
                x.push((self.vars[j], d as isize));
            }
            terms.push((MDeg::from_iter(x), Q::from_numer(c.clone())));
        }

        Some(LPoly::from_iter(terms))
    }
}

/// Factors a non-constant primitive integral polynomial divisible by no variable.
fn factor_poly(f: &LPoly<Q>, rng: &mut StdRng) -> Vec<LPoly<Q>> {
    let kr = Kronecker::new(f);
    let image = kr.apply(f);

    // the image may be divisible by y even though f is divisible by no variable.
    let ord = image.ord();
    let y = ZPoly::mono(1, BigInt::one());
    let mut pieces = vec![y; ord];

    for (u, m) in univar::factor_univariate(&image.shift_down(ord).primitive(), rng) {
        pieces.extend(std::iter::repeat(u).take(m));
    }

    debug!("kronecker image of {f}: {} pieces", pieces.len());

    if kr.vars.len() == 1 && ord == 0 {
        return pieces.iter().filter_map(|u| kr.invert(u)).collect()
    }

    let mut g = f.clone();
    let mut res = vec![];
    let mut s = 1;

    while 2 * s <= pieces.len() {
        let found = (0..pieces.len()).combinations(s).find_map(|subset| {
            let c = subset.iter().fold(ZPoly::constant(BigInt::one()), |res, &i| &res * &pieces[i]);
            let c = primitive_part(&kr.invert(&c)?).1;
            if c.is_const() {
                return None
            }
            let q = g.div_exact(&c)?;
            q.is_polynomial().then_some((subset, c, q))
        });

        if let Some((subset, c, q)) = found {
            res.push(c);
            g = q;
            pieces = pieces.into_iter().enumerate().filter(|(i, _)| !subset.contains(i)).map(|(_, u)| u).collect();
        } else {
            s += 1;
        }
    }

    if !g.is_const() {
        res.push(primitive_part(&g).1);
    }

    res
}

/// Factors a Laurent polynomial over Q into irreducibles.
///
/// The factors are primitive integral polynomials divisible by no variable,
/// with positive leading coefficient, sorted by degree.
/// `factor(f).expand() == f` holds for every `f`.
pub fn factor(f: &LPoly<Q>) -> Factorization {
    if f.is_zero() {
        return Factorization::zero()
    }

    let (mono, g) = f.split_mono();
    let (_, g) = primitive_part(&g);

    let mut rng = StdRng::seed_from_u64(0);
    let irr = if g.is_const() { vec![] } else { factor_poly(&g, &mut rng) };

    let mut factors: Vec<(LPoly<Q>, usize)> = vec![];
    for h in irr {
        if let Some(e) = factors.iter_mut().find(|(g, _)| g == &h) {
            e.1 += 1;
        } else {
            factors.push((h, 1));
        }
    }

    factors.sort_by_cached_key(|(h, m)| {
        let d = h.lead_term().map(|(x, _)| x.total()).unwrap_or(0);
        (d, h.nterms(), h.to_string(), *m)
    });

    let mut res = Factorization { unit: Q::one(), mono, factors };
    let e = res.expand();
    res.unit = f.lead_coeff() / e.lead_coeff();
    res
}

/// Greatest common divisor of Laurent polynomials over Q, up to units:
/// the product of the common irreducible factors, as a primitive integral
/// polynomial divisible by no variable.
pub fn gcd(f: &LPoly<Q>, g: &LPoly<Q>) -> LPoly<Q> {
    match (f.is_zero(), g.is_zero()) {
        (true, true)  => return LPoly::zero(),
        (true, false) => return primitive_part(&g.split_mono().1).1,
        (false, true) => return primitive_part(&f.split_mono().1).1,
        _ => ()
    }

    let (ff, fg) = (factor(f), factor(g));
    ff.factors.iter().filter_map(|(h, m)| {
        let k = usize::min(*m, fg.multiplicity(h));
        (k > 0).then(|| num_traits::Pow::pow(h, k))
    }).product()
}

#[cfg(test)]
mod tests {
    use num_traits::Pow;
    use super::*;

    type P = LPoly<Q>;

    fn t(i: usize) -> P {
        P::variable(i)
    }

    fn c(i: i32) -> P {
        P::from(i)
    }

    fn q(a: i32, b: i32) -> Q {
        Q::new(a.into(), b.into())
    }

    #[test]
    fn primitive() {
        let x = t(0);
        let f = (&x * &P::from_const(q(-2, 3))) + P::from_const(q(4, 9));
        let (k, g) = primitive_part(&f);
        assert_eq!(k, q(-2, 9));
        assert_eq!(g, c(3) * &x - c(2));
    }

    #[test]
    fn zero() {
        let fz = factor(&P::zero());
        assert!(fz.is_zero());
        assert_eq!(fz.to_string(), "0");
        assert_eq!(fz.expand(), P::zero());
    }

    #[test]
    fn constant_and_mono() {
        let f = P::from_const(q(-3, 2)) * t(0).inv().unwrap();
        let fz = factor(&f);
        assert_eq!(fz.unit, q(-3, 2));
        assert_eq!(fz.mono, MDeg::from((0, -1)));
        assert!(fz.factors.is_empty());
        assert_eq!(fz.expand(), f);
    }

    #[test]
    fn univariate() {
        let x = t(0);
        // t - t^{-1} = t^{-1}(t - 1)(t + 1)
        let f = &x - x.inv().unwrap();
        let fz = factor(&f);
        assert_eq!(fz.unit, Q::one());
        assert_eq!(fz.mono, MDeg::from((0, -1)));
        assert_eq!(fz.factors, vec![(&x + c(1), 1), (&x - c(1), 1)]);
        assert_eq!(fz.expand(), f);
    }

    #[test]
    fn univariate_repeated() {
        let x = t(0);
        let a = x.pow(2usize) - &x + c(1);
        let f = P::from_const(q(1, 2)) * a.pow(2usize) * (&x - c(1));
        let fz = factor(&f);
        assert_eq!(fz.unit, q(1, 2));
        assert_eq!(fz.factors, vec![(&x - c(1), 1), (a, 2)]);
        assert_eq!(fz.expand(), f);
    }

    #[test]
    fn bivariate() {
        let (x, y) = (t(1), t(2));
        // -(t1 - 1)(t2 - 1)(t1 - t2)/t1
        let f = -((&x - c(1)) * (&y - c(1)) * (&x - &y)) * x.inv().unwrap();
        let fz = factor(&f);
        assert_eq!(fz.unit, -Q::one());
        assert_eq!(fz.mono, MDeg::from((1, -1)));
        assert_eq!(fz.nfactors(), 3);
        assert_eq!(fz.multiplicity(&(&x - c(1))), 1);
        assert_eq!(fz.multiplicity(&(&y - c(1))), 1);
        assert_eq!(fz.multiplicity(&(&y - &x)), 1);
        assert_eq!(fz.expand(), f);
    }

    #[test]
    fn bivariate_irreducible() {
        let (x, y) = (t(1), t(2));
        let f = &x * &y + c(1);
        let fz = factor(&f);
        assert_eq!(fz.factors, vec![(f.clone(), 1)]);

        let g = x.pow(2usize) + y.pow(2usize);
        let fz = factor(&g);
        assert_eq!(fz.factors, vec![(g.clone(), 1)]);
    }

    #[test]
    fn trivariate() {
        let (x, y, z) = (t(1), t(2), t(3));
        let f = (&x * &y - &z) * (&x + &z + c(1)) * (&y - c(1)).pow(2usize);
        let fz = factor(&f);
        assert_eq!(fz.nfactors(), 4);
        assert_eq!(fz.multiplicity(&(&y - c(1))), 2);
        assert_eq!(fz.multiplicity(&(&x * &y - &z)), 1);
        assert_eq!(fz.expand(), f);
    }

    #[test]
    fn display() {
        let x = t(0);
        let f = c(-2) * (&x - c(1)).pow(2usize) * x.inv().unwrap();
        assert_eq!(factor(&f).to_string(), "-2 t⁻¹ (t - 1)²");
    }

    #[test]
    fn gcd_test() {
        let (x, y) = (t(1), t(2));
        let f = (&x - c(1)) * (&x - &y) * c(6);
        let g = (&x - c(1)).pow(2usize) * x.inv().unwrap();
        assert_eq!(gcd(&f, &g), &x - c(1));
        assert_eq!(gcd(&f, &(&y + c(1))), P::one());
        assert_eq!(gcd(&P::zero(), &g), (&x - c(1)).pow(2usize));
    }
}

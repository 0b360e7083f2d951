use itertools::Itertools;
use log::debug;
use num_bigint::BigInt;
use num_traits::{One, Signed};
use rand::Rng;
use super::hensel::{hensel_lift, lift_exponent, is_unit_mod};
use super::modp::{ModPoly, factor_mod_p, is_small_prime};
use super::zpoly::ZPoly;

/// Number of admissible primes tried before settling on the one
/// with the fewest modular factors.
const PRIME_TRIALS: usize = 5;

fn exact(f: &ZPoly, g: &ZPoly) -> ZPoly {
    match f.div_exact(g) {
        Some(q) => q,
        None => panic!("{g} does not divide {f}")
    }
}

/// Square-free decomposition (Yun) of a primitive `f` with positive leading coefficient:
/// `f = ∏ aᵢ^i` with each `aᵢ` square-free, primitive and pairwise coprime.
/// Only non-constant `aᵢ` are returned.
pub fn squarefree_decomp(f: &ZPoly) -> Vec<(ZPoly, usize)> {
    let mut res = vec![];
    if f.deg() == 0 {
        return res
    }

    let df = f.derivative();
    let a = f.gcd(&df);
    let mut b = exact(f, &a);
    let c = exact(&df, &a);
    let mut d = &c - &b.derivative();
    let mut i = 1;

    while b.deg() > 0 {
        let a = b.gcd(&d);
        let c = exact(&d, &a);
        b = exact(&b, &a);
        if a.deg() > 0 {
            res.push((a, i));
        }
        d = &c - &b.derivative();
        i += 1;
    }

    res
}

/// Picks an odd prime `p ∤ lc(f)` keeping `f mod p` square-free,
/// and factors `f mod p` into monic irreducibles.
fn modular_factors<R: Rng>(f: &ZPoly, rng: &mut R) -> (BigInt, Vec<ModPoly>) {
    let lc = f.lc();
    let mut best: Option<(BigInt, Vec<ModPoly>)> = None;
    let mut trials = 0;

    for p in (3u64..).step_by(2).filter(|&p| is_small_prime(p)) {
        let p = BigInt::from(p);
        if !is_unit_mod(&lc, &p) {
            continue
        }

        let fp = ModPoly::from_zpoly(f, &p);
        if fp.deg() != f.deg() || !fp.is_squarefree() {
            continue
        }

        let gs = factor_mod_p(&fp.monic(), rng);
        let n = gs.len();
        if best.as_ref().map(|(_, b)| n < b.len()).unwrap_or(true) {
            best = Some((p, gs));
        }

        trials += 1;
        if n == 1 || trials >= PRIME_TRIALS {
            break
        }
    }

    match best {
        Some(res) => res,
        None => unreachable!("a square-free polynomial stays square-free modulo almost all primes")
    }
}

/// Factors a primitive square-free `f` of positive degree into irreducibles over Z.
pub fn factor_squarefree<R: Rng>(f: &ZPoly, rng: &mut R) -> Vec<ZPoly> {
    let n = f.deg();
    if n <= 1 {
        return vec![f.primitive()]
    }

    let (p, gs) = modular_factors(f, rng);

    debug!("factor {f}: p = {p}, {} modular factors", gs.len());

    if gs.len() == 1 {
        return vec![f.primitive()]
    }

    // coefficients of factors of f, multiplied by lc(f), are bounded by b.
    let b = (BigInt::one() << n) * f.norm1() * f.lc().abs();
    let k = lift_exponent(&p, &(&b * 2));
    let m = p.pow(k);

    debug!("lift to {p}^{k}");

    let lifted = hensel_lift(f, &gs, &p, k);
    recombine(f, lifted, &m)
}

/// Zassenhaus recombination: tries products of `s` lifted factors,
/// `s = 1, 2, …`, and keeps those that divide over Z.
fn recombine(f: &ZPoly, mut rest: Vec<ModPoly>, m: &BigInt) -> Vec<ZPoly> {
    let mut g = f.primitive();
    let mut res = vec![];
    let mut s = 1;

    while 2 * s <= rest.len() {
        let found = (0..rest.len()).combinations(s).find_map(|subset| {
            let lc = ModPoly::new(m, vec![g.lc()]);
            let c = subset.iter().fold(lc, |res, &i| res.mul(&rest[i]));
            let c = c.to_zpoly().primitive();
            g.div_exact(&c).map(|q| (subset, c, q))
        });

        if let Some((subset, c, q)) = found {
            res.push(c);
            g = q;
            rest = rest.into_iter().enumerate().filter(|(i, _)| !subset.contains(i)).map(|(_, h)| h).collect();
        } else {
            s += 1;
        }
    }

    if g.deg() > 0 {
        res.push(g.primitive());
    }

    res
}

/// Complete factorization of a primitive `f` with positive leading coefficient.
pub fn factor_univariate<R: Rng>(f: &ZPoly, rng: &mut R) -> Vec<(ZPoly, usize)> {
    squarefree_decomp(f).into_iter().flat_map(|(a, i)|
        factor_squarefree(&a, rng).into_iter().map(move |g| (g, i))
    ).collect()
}

use log::trace;
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Zero, One};
use super::modp::ModPoly;
use super::zpoly::ZPoly;

/// Lifts `F ≡ g₀·h₀ (mod p)`, with `g₀` monic and `gcd(g₀, h₀) = 1`,
/// to `F ≡ g·h (mod pᵏ)` with `g` monic.
fn lift_pair(f: &ZPoly, g0: &ModPoly, h0: &ModPoly, p: &BigInt, k: u32) -> (ZPoly, ZPoly) {
    let (d, s, t) = g0.gcdx(h0);
    assert!(d.is_one(), "factors must be coprime modulo {p}");

    let mut g = g0.to_zpoly();
    let mut h = h0.to_zpoly();
    let mut pj = p.clone();

    for _ in 1..k {
        let diff = f - &(&g * &h);
        let e = ZPoly::new(diff.coeffs().iter().map(|c| {
            let (q, r) = c.div_rem(&pj);
            assert!(r.is_zero(), "lifting invariant violated");
            q
        }).collect());

        let e = ModPoly::from_zpoly(&e, p);
        let (q, tau) = t.mul(&e).div_rem(g0);
        let sigma = s.mul(&e).add(&q.mul(h0));

        g = &g + &tau.to_zpoly().mul_scalar(&pj);
        h = &h + &sigma.to_zpoly().mul_scalar(&pj);
        pj *= p;

        g = ModPoly::from_zpoly(&g, &pj).to_zpoly();
        h = ModPoly::from_zpoly(&h, &pj).to_zpoly();
    }

    (g, h)
}

/// Lifts `f ≡ lc(f)·g₁⋯gᵣ (mod p)`, where the `gᵢ` are monic, pairwise coprime
/// and `p ∤ lc(f)`, to monic factors modulo `pᵏ`.
pub fn hensel_lift(f: &ZPoly, factors: &[ModPoly], p: &BigInt, k: u32) -> Vec<ModPoly> {
    let m = p.pow(k);
    let r = factors.len();

    trace!("hensel: {} factors, p = {p}, k = {k}", r);

    if r == 0 {
        return vec![]
    }

    let mut res = Vec::with_capacity(r);
    let mut target = f.clone();

    for i in 0 .. r - 1 {
        let g0 = &factors[i];
        let lc = ModPoly::new(p, vec![target.lc()]);
        let h0 = factors[i + 1..].iter().fold(lc, |res, g| res.mul(g));

        let (g, h) = lift_pair(&target, g0, &h0, p, k);
        res.push(ModPoly::from_zpoly(&g, &m));
        target = h;
    }

    res.push(ModPoly::from_zpoly(&target, &m).monic());
    res
}

/// Smallest `k` with `pᵏ > b`.
pub fn lift_exponent(p: &BigInt, b: &BigInt) -> u32 {
    let mut k = 1;
    let mut pk = p.clone();
    while &pk <= b {
        pk *= p;
        k += 1;
    }
    k
}

pub fn is_unit_mod(a: &BigInt, m: &BigInt) -> bool {
    a.gcd(m).is_one()
}

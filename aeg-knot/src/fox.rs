//! Alexander polynomials of two-generator one-relator presentations
//! by the Fox free differential calculus.

use num_traits::{Zero, One, Pow};
use aeg_alg::{EucRing, LPoly, MDeg, Q};
use aeg_core::Word;

type P = LPoly<Q>;

fn t_pow(e: isize) -> P {
    P::mono(MDeg::var(0, e), Q::one())
}

/// The abelianization `φ: ⟨x, y | r⟩ → ⟨t⟩` as exponents `(φ(x), φ(y))`,
/// primitive with `φ(r) = 1`. `None` if both exponent sums of `r` vanish.
pub fn abelianization(word: &Word, x: char, y: char) -> Option<(isize, isize)> {
    let (ex, ey) = (word.exponent_sum(x) as i64, word.exponent_sum(y) as i64);
    if ex.is_zero() && ey.is_zero() {
        return None
    }
    let g = i64::gcd(&ex, &ey).abs();
    Some(((ey / g) as isize, (-ex / g) as isize))
}

/// `φ(∂r/∂x)`, where `phi` gives the exponent of `φ(g)` for each generator `g`.
pub fn fox_derivative<F>(word: &Word, x: char, phi: F) -> P
where F: Fn(char) -> isize {
    let mut e = 0;
    let mut res = P::zero();

    for s in word.iter() {
        let d = phi(s.gen());
        if s.gen() == x {
            if s.is_inv() {
                res -= t_pow(e - d);
            } else {
                res += t_pow(e);
            }
        }
        e += s.exponent() * d;
    }

    res
}

/// The Alexander polynomial of `⟨a, b | r⟩`, normalized to lowest degree `0`
/// and positive leading coefficient.
///
/// `None` unless `r` involves exactly two generators and the group has
/// infinite cyclic abelianization.
pub fn alexander_from_relator(word: &Word) -> Option<P> {
    let gens = word.generators();
    let [x, y] = gens[..] else {
        return None
    };

    let (ax, ay) = abelianization(word, x, y)?;
    let phi = |g: char| if g == x { ax } else { ay };

    // Δ = φ(∂r/∂x)·(t - 1) / (φ(y) - 1), with φ(y) ≠ 1.
    let (x, ay) = if ay != 0 { (x, ay) } else { (y, ax) };

    let t = P::variable(0);
    let dx = fox_derivative(word, x, phi);
    let num = dx * (&t - P::one());
    let den = (&t).pow(ay) - P::one();
    let delta = num.div_exact(&den)?;

    Some(normalize(&delta))
}

/// Removes the monomial part and makes the leading coefficient positive.
pub fn normalize(f: &P) -> P {
    let (_, g) = f.split_mono();
    if g.lead_coeff().is_negative() {
        -g
    } else {
        g
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w(s: &str) -> Word {
        s.parse().unwrap()
    }

    fn poly(cs: &[i32]) -> P {
        cs.iter().enumerate().map(|(i, &c)| t_pow(i as isize) * &Q::from(c)).sum()
    }

    #[test]
    fn abelian() {
        assert_eq!(abelianization(&w("abaBAB"), 'a', 'b'), Some((-1, -1)));
        assert_eq!(abelianization(&w("aaaBB"), 'a', 'b'), Some((-2, -3)));
        assert_eq!(abelianization(&w("abAB"), 'a', 'b'), None);
        assert_eq!(abelianization(&w("abABaBabABaBAbAb"), 'a', 'b'), None);
    }

    #[test]
    fn fox() {
        // ∂(aba)/∂a = 1 + ab
        let phi = |_| 1;
        assert_eq!(fox_derivative(&w("aba"), 'a', phi), poly(&[1, 0, 1]));
        // ∂(A)/∂a = -A
        assert_eq!(fox_derivative(&w("A"), 'a', phi), -t_pow(-1));
        assert_eq!(fox_derivative(&w("bbb"), 'a', phi), P::zero());
    }

    #[test]
    fn trefoil() {
        assert_eq!(alexander_from_relator(&w("abaBAB")), Some(poly(&[1, -1, 1])));
        // torus presentation a³ = b²
        assert_eq!(alexander_from_relator(&w("aaaBB")), Some(poly(&[1, -1, 1])));
    }

    #[test]
    fn figure_eight() {
        let r = w("abABaBAbaB");
        assert_eq!(alexander_from_relator(&r), Some(poly(&[1, -3, 1])));
    }

    #[test]
    fn invariant_under_rotation_and_inversion() {
        let r = w("abABaBAbaB");
        let d = alexander_from_relator(&r);
        assert_eq!(alexander_from_relator(&r.rotate(5)), d);
        assert_eq!(alexander_from_relator(&r.inverse()), d);
        assert_eq!(alexander_from_relator(&r.swap_letters('a', 'b')), d);
    }

    #[test]
    fn not_a_knot_group() {
        assert_eq!(alexander_from_relator(&w("abAB")), None);
        assert_eq!(alexander_from_relator(&w("aaa")), None);
        assert_eq!(alexander_from_relator(&w("abcABC")), None);
    }

    #[test]
    fn normalized() {
        let f = -(poly(&[2, -3, 2])) * t_pow(-3);
        assert_eq!(normalize(&f), poly(&[2, -3, 2]));
    }
}

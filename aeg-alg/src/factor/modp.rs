use num_bigint::{BigInt, RandBigInt};
use num_integer::Integer;
use num_traits::{Zero, One};
use rand::Rng;
use super::zpoly::ZPoly;

/// Dense polynomial over `Z/mZ`, coefficients in `[0, m)`, ascending.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ModPoly {
    m: BigInt,
    coeffs: Vec<BigInt>,
}

impl ModPoly {
    pub fn new(m: &BigInt, coeffs: Vec<BigInt>) -> Self {
        let mut coeffs: Vec<_> = coeffs.into_iter().map(|c| c.mod_floor(m)).collect();
        while coeffs.last().is_some_and(|c| c.is_zero()) {
            coeffs.pop();
        }
        Self { m: m.clone(), coeffs }
    }

    pub fn from_zpoly(f: &ZPoly, m: &BigInt) -> Self {
        Self::new(m, f.coeffs().to_vec())
    }

    /// Lifts to Z using the symmetric residues `(-m/2, m/2]`.
    pub fn to_zpoly(&self) -> ZPoly {
        let half = &self.m / 2;
        ZPoly::new(self.coeffs.iter().map(|c|
            if c > &half { c - &self.m } else { c.clone() }
        ).collect())
    }

    pub fn zero(m: &BigInt) -> Self {
        Self { m: m.clone(), coeffs: vec![] }
    }

    pub fn one(m: &BigInt) -> Self {
        Self::new(m, vec![BigInt::one()])
    }

    /// `y`
    pub fn x(m: &BigInt) -> Self {
        Self::new(m, vec![BigInt::zero(), BigInt::one()])
    }

    pub fn modulus(&self) -> &BigInt {
        &self.m
    }

    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    pub fn is_one(&self) -> bool {
        self.coeffs.len() == 1 && self.coeffs[0].is_one()
    }

    pub fn deg(&self) -> usize {
        self.coeffs.len().saturating_sub(1)
    }

    pub fn lc(&self) -> BigInt {
        self.coeffs.last().cloned().unwrap_or_default()
    }

    fn coeff(&self, i: usize) -> BigInt {
        self.coeffs.get(i).cloned().unwrap_or_default()
    }

    pub fn add(&self, rhs: &Self) -> Self {
        let n = usize::max(self.coeffs.len(), rhs.coeffs.len());
        Self::new(&self.m, (0..n).map(|i| self.coeff(i) + rhs.coeff(i)).collect())
    }

    pub fn sub(&self, rhs: &Self) -> Self {
        let n = usize::max(self.coeffs.len(), rhs.coeffs.len());
        Self::new(&self.m, (0..n).map(|i| self.coeff(i) - rhs.coeff(i)).collect())
    }

    pub fn mul(&self, rhs: &Self) -> Self {
        if self.is_zero() || rhs.is_zero() {
            return Self::zero(&self.m)
        }
        let mut coeffs = vec![BigInt::zero(); self.coeffs.len() + rhs.coeffs.len() - 1];
        for (i, a) in self.coeffs.iter().enumerate() {
            if a.is_zero() { continue }
            for (j, b) in rhs.coeffs.iter().enumerate() {
                coeffs[i + j] += a * b;
            }
        }
        Self::new(&self.m, coeffs)
    }

    pub fn scale(&self, c: &BigInt) -> Self {
        Self::new(&self.m, self.coeffs.iter().map(|a| a * c).collect())
    }

    /// Inverse of `a` modulo `m`, if any.
    fn inv_mod(a: &BigInt, m: &BigInt) -> Option<BigInt> {
        let e = a.extended_gcd(m);
        if e.gcd.is_one() {
            Some(e.x.mod_floor(m))
        } else {
            None
        }
    }

    pub fn monic(&self) -> Self {
        if self.is_zero() {
            return self.clone()
        }
        match Self::inv_mod(&self.lc(), &self.m) {
            Some(u) => self.scale(&u),
            None => panic!("leading coefficient of {:?} is not a unit", self)
        }
    }

    /// Division with remainder. The leading coefficient of `g` must be a unit.
    pub fn div_rem(&self, g: &Self) -> (Self, Self) {
        assert!(!g.is_zero(), "division by zero");

        let Some(u) = Self::inv_mod(&g.lc(), &self.m) else {
            panic!("leading coefficient of {:?} is not a unit", g)
        };

        if self.coeffs.len() < g.coeffs.len() {
            return (Self::zero(&self.m), self.clone())
        }

        let n = g.deg();
        let mut r = self.coeffs.clone();
        let mut q = vec![BigInt::zero(); self.deg() - n + 1];

        for k in (0..q.len()).rev() {
            let a = (&r[k + n] * &u).mod_floor(&self.m);
            if a.is_zero() { continue }
            for (j, b) in g.coeffs.iter().enumerate() {
                r[k + j] = (&r[k + j] - &a * b).mod_floor(&self.m);
            }
            q[k] = a;
        }

        (Self::new(&self.m, q), Self::new(&self.m, r))
    }

    pub fn rem(&self, g: &Self) -> Self {
        self.div_rem(g).1
    }

    pub fn derivative(&self) -> Self {
        Self::new(&self.m, self.coeffs.iter().enumerate().skip(1).map(|(i, c)|
            c * BigInt::from(i)
        ).collect())
    }

    /// Monic gcd. The modulus must be prime.
    pub fn gcd(&self, other: &Self) -> Self {
        let (mut f, mut g) = (self.clone(), other.clone());
        while !g.is_zero() {
            let r = f.rem(&g);
            (f, g) = (g, r);
        }
        f.monic()
    }

    /// `(d, s, t)` with `s·self + t·other = d`, `d` monic. The modulus must be prime.
    pub fn gcdx(&self, other: &Self) -> (Self, Self, Self) {
        let m = &self.m;
        let (mut f, mut g) = (self.clone(), other.clone());
        let (mut s0, mut s1) = (Self::one(m), Self::zero(m));
        let (mut t0, mut t1) = (Self::zero(m), Self::one(m));

        while !g.is_zero() {
            let (q, r) = f.div_rem(&g);
            (f, g) = (g, r);
            (s0, s1) = (s1.clone(), s0.sub(&q.mul(&s1)));
            (t0, t1) = (t1.clone(), t0.sub(&q.mul(&t1)));
        }

        if f.is_zero() {
            return (f, s0, t0)
        }

        let Some(u) = Self::inv_mod(&f.lc(), m) else {
            panic!("leading coefficient of {:?} is not a unit", f)
        };
        (f.scale(&u), s0.scale(&u), t0.scale(&u))
    }

    /// `self^e mod g`
    pub fn pow_mod(&self, e: &BigInt, g: &Self) -> Self {
        let mut res = Self::one(&self.m).rem(g);
        let mut base = self.rem(g);
        let bits = e.bits();

        for i in 0..bits {
            if e.bit(i) {
                res = res.mul(&base).rem(g);
            }
            if i + 1 < bits {
                base = base.mul(&base).rem(g);
            }
        }
        res
    }

    pub fn random<R: Rng>(m: &BigInt, deg: usize, rng: &mut R) -> Self {
        let zero = BigInt::zero();
        Self::new(m, (0..=deg).map(|_| rng.gen_bigint_range(&zero, m)).collect())
    }

    pub fn is_squarefree(&self) -> bool {
        self.deg() > 0 && self.gcd(&self.derivative()).is_one()
    }
}

/// Distinct-degree factorization of a monic square-free `f` modulo a prime.
/// Returns `(g, d)` where `g` is the product of all irreducible factors of degree `d`.
pub fn distinct_degree(f: &ModPoly) -> Vec<(ModPoly, usize)> {
    let p = f.modulus().clone();
    let x = ModPoly::x(&p);

    let mut res = vec![];
    let mut f = f.clone();
    let mut h = x.rem(&f);
    let mut d = 1;

    while f.deg() >= 2 * d {
        h = h.pow_mod(&p, &f);
        let g = h.sub(&x).gcd(&f);
        if !g.is_one() {
            f = f.div_rem(&g).0;
            h = h.rem(&f);
            res.push((g, d));
        }
        d += 1;
    }

    if f.deg() > 0 {
        let d = f.deg();
        res.push((f, d));
    }

    res
}

/// Equal-degree splitting (Cantor–Zassenhaus) of a monic `f` modulo an odd prime,
/// all of whose irreducible factors have degree `d`.
pub fn equal_degree<R: Rng>(f: &ModPoly, d: usize, rng: &mut R) -> Vec<ModPoly> {
    let p = f.modulus().clone();
    let e: BigInt = (p.pow(d as u32) - 1u32) / 2u32;

    let mut res = vec![];
    let mut stack = vec![f.clone()];

    while let Some(g) = stack.pop() {
        if g.deg() <= d {
            res.push(g);
            continue;
        }
        loop {
            let a = ModPoly::random(&p, g.deg() - 1, rng);
            if a.deg() == 0 { continue }

            let b = a.pow_mod(&e, &g).sub(&ModPoly::one(&p));
            let h = b.gcd(&g);

            if h.deg() > 0 && h.deg() < g.deg() {
                let k = g.div_rem(&h).0;
                stack.push(h);
                stack.push(k);
                break;
            }
        }
    }

    res
}

/// Complete factorization of a monic square-free `f` modulo an odd prime into monic irreducibles.
pub fn factor_mod_p<R: Rng>(f: &ModPoly, rng: &mut R) -> Vec<ModPoly> {
    distinct_degree(f).into_iter().flat_map(|(g, d)|
        equal_degree(&g, d, rng)
    ).collect()
}

pub fn is_small_prime(p: u64) -> bool {
    p >= 2 && (2..).take_while(|i| i * i <= p).all(|i| p % i != 0)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use super::*;
    use super::super::zpoly::zpoly;

    fn mp(p: i64, coeffs: &[i64]) -> ModPoly {
        ModPoly::from_zpoly(&zpoly(coeffs), &BigInt::from(p))
    }

    #[test]
    fn reduce() {
        let f = mp(5, &[-1, 6, 10]);
        assert_eq!(f, mp(5, &[4, 1]));
        assert_eq!(f.to_zpoly(), zpoly(&[-1, 1]));
    }

    #[test]
    fn div_rem() {
        let f = mp(7, &[1, 0, 0, 1]);
        let g = mp(7, &[1, 1]);
        let (q, r) = f.div_rem(&g);
        assert_eq!(q, mp(7, &[1, -1, 1]));
        assert!(r.is_zero());
    }

    #[test]
    fn gcdx() {
        let f = mp(5, &[-1, 0, 1]);
        let g = mp(5, &[2, 1]);
        let (d, s, t) = f.gcdx(&g);
        assert!(d.is_one());
        assert_eq!(s.mul(&f).add(&t.mul(&g)), d);
    }

    #[test]
    fn pow_mod() {
        let p = BigInt::from(3);
        let x = ModPoly::x(&p);
        let f = mp(3, &[1, 0, 1]);
        // y^3 = -y mod (y^2 + 1)
        assert_eq!(x.pow_mod(&p, &f), mp(3, &[0, -1]));
    }

    #[test]
    fn factor() {
        let mut rng = StdRng::seed_from_u64(0);
        // y^4 - 1 = (y - 1)(y + 1)(y^2 + 1) mod 3
        let f = mp(3, &[-1, 0, 0, 0, 1]);
        let mut fs = factor_mod_p(&f, &mut rng);
        fs.sort_by_key(|g| (g.deg(), g.coeffs.clone()));
        assert_eq!(fs, vec![mp(3, &[1, 1]), mp(3, &[2, 1]), mp(3, &[1, 0, 1])]);

        // y^4 + 1 splits into two quadratics mod 5
        let f = mp(5, &[1, 0, 0, 0, 1]);
        let fs = factor_mod_p(&f, &mut rng);
        assert_eq!(fs.len(), 2);
        assert!(fs.iter().all(|g| g.deg() == 2));
    }

    #[test]
    fn squarefree() {
        assert!(mp(5, &[-1, 0, 1]).is_squarefree());
        assert!(!mp(5, &[1, 2, 1]).is_squarefree());
    }

    #[test]
    fn small_prime() {
        assert!(is_small_prime(3));
        assert!(is_small_prime(97));
        assert!(!is_small_prime(91));
        assert!(!is_small_prime(1));
    }
}

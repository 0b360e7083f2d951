use std::fmt::Display;
use std::ops::{Add, Sub, Mul, Neg};
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Zero, One, Signed};

/// Dense univariate polynomial over Z, coefficients in ascending degree.
/// Trailing zeros are never stored.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct ZPoly {
    coeffs: Vec<BigInt>,
}

impl ZPoly {
    pub fn new(mut coeffs: Vec<BigInt>) -> Self {
        while coeffs.last().is_some_and(|c| c.is_zero()) {
            coeffs.pop();
        }
        Self { coeffs }
    }

    pub fn zero() -> Self {
        Self { coeffs: vec![] }
    }

    pub fn constant(c: BigInt) -> Self {
        Self::new(vec![c])
    }

    /// `c·yⁿ`
    pub fn mono(n: usize, c: BigInt) -> Self {
        let mut coeffs = vec![BigInt::zero(); n + 1];
        coeffs[n] = c;
        Self::new(coeffs)
    }

    pub fn coeffs(&self) -> &[BigInt] {
        &self.coeffs
    }

    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Degree, with `deg(0) = 0`.
    pub fn deg(&self) -> usize {
        self.coeffs.len().saturating_sub(1)
    }

    pub fn coeff(&self, i: usize) -> BigInt {
        self.coeffs.get(i).cloned().unwrap_or_default()
    }

    pub fn lc(&self) -> BigInt {
        self.coeffs.last().cloned().unwrap_or_default()
    }

    pub fn content(&self) -> BigInt {
        self.coeffs.iter().fold(BigInt::zero(), |g, c| g.gcd(c))
    }

    /// Divides out the content and makes the leading coefficient positive.
    pub fn primitive(&self) -> Self {
        if self.is_zero() {
            return Self::zero()
        }
        let mut c = self.content();
        if self.lc().is_negative() {
            c = -c;
        }
        self.div_scalar(&c)
    }

    pub fn div_scalar(&self, c: &BigInt) -> Self {
        Self::new(self.coeffs.iter().map(|a| a / c).collect())
    }

    pub fn mul_scalar(&self, c: &BigInt) -> Self {
        Self::new(self.coeffs.iter().map(|a| a * c).collect())
    }

    /// `‖f‖₁`
    pub fn norm1(&self) -> BigInt {
        self.coeffs.iter().map(|c| c.abs()).sum()
    }

    /// Number of times `y` divides `self`.
    pub fn ord(&self) -> usize {
        self.coeffs.iter().take_while(|c| c.is_zero()).count()
    }

    /// `self / yⁿ`, dropping lower terms.
    pub fn shift_down(&self, n: usize) -> Self {
        Self::new(self.coeffs.iter().skip(n).cloned().collect())
    }

    pub fn derivative(&self) -> Self {
        Self::new(self.coeffs.iter().enumerate().skip(1).map(|(i, c)|
            c * BigInt::from(i)
        ).collect())
    }

    /// Exact division over Z. `None` if `g` does not divide `self` in Z[y].
    pub fn div_exact(&self, g: &Self) -> Option<Self> {
        assert!(!g.is_zero(), "division by zero");

        if self.is_zero() {
            return Some(Self::zero())
        }
        if self.deg() < g.deg() {
            return None
        }

        let n = g.deg();
        let lc = g.lc();
        let mut r = self.coeffs.clone();
        let mut q = vec![BigInt::zero(); self.deg() - n + 1];

        for k in (0..q.len()).rev() {
            let (a, rem) = r[k + n].div_rem(&lc);
            if !rem.is_zero() {
                return None
            }
            for (j, b) in g.coeffs.iter().enumerate() {
                r[k + j] -= &a * b;
            }
            q[k] = a;
        }

        if r.iter().all(|c| c.is_zero()) {
            Some(Self::new(q))
        } else {
            None
        }
    }

    /// Pseudo-remainder `lc(g)^(deg f - deg g + 1)·f mod g`.
    fn pseudo_rem(&self, g: &Self) -> Self {
        let n = g.deg();
        let lc = g.lc();
        let mut r = self.clone();

        while !r.is_zero() && r.deg() >= n {
            let k = r.deg() - n;
            let a = r.lc();
            r = r.mul_scalar(&lc) - g.mul_scalar(&a).shift_up(k);
        }
        r
    }

    fn shift_up(&self, n: usize) -> Self {
        if self.is_zero() {
            return Self::zero()
        }
        let mut coeffs = vec![BigInt::zero(); n];
        coeffs.extend(self.coeffs.iter().cloned());
        Self::new(coeffs)
    }

    /// Primitive gcd with positive leading coefficient,
    /// by the primitive polynomial remainder sequence.
    pub fn gcd(&self, other: &Self) -> Self {
        let (mut f, mut g) = (self.primitive(), other.primitive());
        if f.deg() < g.deg() {
            std::mem::swap(&mut f, &mut g);
        }
        while !g.is_zero() {
            let r = f.pseudo_rem(&g).primitive();
            (f, g) = (g, r);
        }
        f.primitive()
    }

    pub fn is_one(&self) -> bool {
        self.coeffs.len() == 1 && self.coeffs[0].is_one()
    }
}

impl Add for &ZPoly {
    type Output = ZPoly;
    fn add(self, rhs: Self) -> ZPoly {
        let n = usize::max(self.coeffs.len(), rhs.coeffs.len());
        ZPoly::new((0..n).map(|i| self.coeff(i) + rhs.coeff(i)).collect())
    }
}

impl Sub for &ZPoly {
    type Output = ZPoly;
    fn sub(self, rhs: Self) -> ZPoly {
        let n = usize::max(self.coeffs.len(), rhs.coeffs.len());
        ZPoly::new((0..n).map(|i| self.coeff(i) - rhs.coeff(i)).collect())
    }
}

impl Sub for ZPoly {
    type Output = ZPoly;
    fn sub(self, rhs: Self) -> ZPoly {
        &self - &rhs
    }
}

impl Mul for &ZPoly {
    type Output = ZPoly;
    fn mul(self, rhs: Self) -> ZPoly {
        if self.is_zero() || rhs.is_zero() {
            return ZPoly::zero()
        }
        let mut coeffs = vec![BigInt::zero(); self.coeffs.len() + rhs.coeffs.len() - 1];
        for (i, a) in self.coeffs.iter().enumerate() {
            if a.is_zero() { continue }
            for (j, b) in rhs.coeffs.iter().enumerate() {
                coeffs[i + j] += a * b;
            }
        }
        ZPoly::new(coeffs)
    }
}

impl Neg for &ZPoly {
    type Output = ZPoly;
    fn neg(self) -> ZPoly {
        ZPoly::new(self.coeffs.iter().map(|c| -c).collect())
    }
}

impl Display for ZPoly {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use crate::util::format::{lc, superscript};

        let terms = self.coeffs.iter().enumerate().rev().filter(|(_, c)| !c.is_zero()).map(|(i, c)| {
            let x = match i {
                0 => String::from("1"),
                1 => String::from("y"),
                _ => format!("y{}", superscript(i as isize))
            };
            (c.to_string(), x)
        });
        write!(f, "{}", lc(terms))
    }
}

#[cfg(test)]
pub(crate) fn zpoly(coeffs: &[i64]) -> ZPoly {
    ZPoly::new(coeffs.iter().map(|&c| BigInt::from(c)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trim_and_deg() {
        let f = zpoly(&[1, 2, 0, 0]);
        assert_eq!(f.deg(), 1);
        assert_eq!(f.lc(), BigInt::from(2));
        assert!(zpoly(&[0, 0]).is_zero());
    }

    #[test]
    fn primitive() {
        let f = zpoly(&[-4, 0, -6]);
        assert_eq!(f.content(), BigInt::from(2));
        assert_eq!(f.primitive(), zpoly(&[2, 0, 3]));
    }

    #[test]
    fn mul_div() {
        let f = zpoly(&[-1, 1]);
        let g = zpoly(&[1, 1, 1]);
        let h = &f * &g;
        assert_eq!(h, zpoly(&[-1, 0, 0, 1]));
        assert_eq!(h.div_exact(&f), Some(g.clone()));
        assert_eq!(h.div_exact(&zpoly(&[1, 1])), None);
        assert_eq!(zpoly(&[1, 2]).div_exact(&zpoly(&[0, 2])), None);
    }

    #[test]
    fn gcd() {
        let f = &zpoly(&[-1, 1]) * &zpoly(&[2, 3]);
        let g = &zpoly(&[-1, 1]) * &zpoly(&[5, 0, 1]);
        assert_eq!(f.gcd(&g), zpoly(&[-1, 1]));
        assert_eq!(f.gcd(&ZPoly::zero()), f.primitive());

        let f = zpoly(&[1, 0, 1]);
        let g = zpoly(&[1, 1]);
        assert!(f.gcd(&g).is_one());
    }

    #[test]
    fn derivative() {
        assert_eq!(zpoly(&[5, 3, 0, 2]).derivative(), zpoly(&[3, 0, 6]));
    }

    #[test]
    fn display() {
        assert_eq!(zpoly(&[1, -2, 1]).to_string(), "y² - 2y + 1");
    }
}

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Display;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign, Index};

use auto_impl_ops::auto_ops;
use derive_more::Debug;
use num_traits::Zero;

use crate::util::format::{subscript, superscript};

/// Exponent vector of a Laurent monomial: `{ index => degree }`,
/// zero degrees are never stored.
#[derive(Clone, Default, PartialEq, Eq, Hash, Debug)]
#[debug("{:?}", data)]
pub struct MDeg {
    data: BTreeMap<usize, isize>,
}

impl MDeg {
    pub fn one() -> Self {
        Self::default()
    }

    pub fn var(i: usize, d: isize) -> Self {
        Self::from_iter([(i, d)])
    }

    fn reduce(&mut self) {
        self.data.retain(|_, d| *d != 0)
    }

    pub fn is_one(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, isize)> + '_ {
        self.data.iter().map(|(&i, &d)| (i, d))
    }

    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.data.keys().cloned()
    }

    pub fn total(&self) -> isize {
        self.data.values().sum()
    }

    pub fn is_nonneg(&self) -> bool {
        self.data.values().all(|&d| d >= 0)
    }

    pub fn all_geq(&self, other: &Self) -> bool {
        self.iter().all(|(i, d)| d >= other[i]) &&
        other.iter().all(|(i, d)| self[i] >= d)
    }

    fn union(&self, other: &Self) -> BTreeSet<usize> {
        self.indices().chain(other.indices()).collect()
    }

    /// Componentwise minimum.
    pub fn min_each(&self, other: &Self) -> Self {
        self.union(other).into_iter().map(|i|
            (i, isize::min(self[i], other[i]))
        ).collect()
    }

    /// Componentwise maximum.
    pub fn max_each(&self, other: &Self) -> Self {
        self.union(other).into_iter().map(|i|
            (i, isize::max(self[i], other[i]))
        ).collect()
    }

    pub fn scale(&self, k: isize) -> Self {
        self.iter().map(|(i, d)| (i, k * d)).collect()
    }

    /// Lexicographic order: the variable of smallest index decides first.
    pub fn cmp_lex(&self, other: &Self) -> Ordering {
        self.union(other).into_iter().fold(Ordering::Equal, |res, i|
            res.then_with(|| self[i].cmp(&other[i]))
        )
    }

    /// Graded lexicographic order.
    pub fn cmp_grlex(&self, other: &Self) -> Ordering {
        self.total().cmp(&other.total()).then_with(||
            self.cmp_lex(other)
        )
    }
}

impl From<(usize, isize)> for MDeg {
    fn from(value: (usize, isize)) -> Self {
        Self::from_iter([value])
    }
}

impl<const N: usize> From<[isize; N]> for MDeg {
    fn from(degrees: [isize; N]) -> Self {
        Self::from_iter(degrees.into_iter().enumerate())
    }
}

impl FromIterator<(usize, isize)> for MDeg {
    fn from_iter<T: IntoIterator<Item = (usize, isize)>>(iter: T) -> Self {
        let mut data = BTreeMap::new();
        for (i, d) in iter {
            *data.entry(i).or_insert(0) += d;
        }
        let mut res = Self { data };
        res.reduce();
        res
    }
}

impl Index<usize> for MDeg {
    type Output = isize;

    fn index(&self, i: usize) -> &Self::Output {
        self.data.get(&i).unwrap_or(&0)
    }
}

impl Ord for MDeg {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cmp_grlex(other)
    }
}

impl PartialOrd for MDeg {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[auto_ops]
impl AddAssign<&MDeg> for MDeg {
    fn add_assign(&mut self, rhs: &MDeg) {
        for (i, d) in rhs.iter() {
            *self.data.entry(i).or_insert(0) += d;
        }
        self.reduce()
    }
}

#[auto_ops]
impl SubAssign<&MDeg> for MDeg {
    fn sub_assign(&mut self, rhs: &MDeg) {
        for (i, d) in rhs.iter() {
            *self.data.entry(i).or_insert(0) -= d;
        }
        self.reduce()
    }
}

impl Neg for &MDeg {
    type Output = MDeg;
    fn neg(self) -> Self::Output {
        self.scale(-1)
    }
}

impl Neg for MDeg {
    type Output = MDeg;
    fn neg(self) -> Self::Output {
        -&self
    }
}

impl Zero for MDeg {
    fn zero() -> Self {
        Self::one()
    }

    fn is_zero(&self) -> bool {
        self.is_one()
    }
}

/// Name of the `i`-th variable: `t` for `0`, `tᵢ` otherwise.
pub fn var_name(i: usize) -> String {
    if i == 0 {
        String::from("t")
    } else {
        format!("t{}", subscript(i as isize))
    }
}

impl Display for MDeg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_one() {
            return write!(f, "1")
        }
        for (i, d) in self.iter() {
            write!(f, "{}", var_name(i))?;
            if d != 1 {
                write!(f, "{}", superscript(d))?;
            }
        }
        Ok(())
    }
}

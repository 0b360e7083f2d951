use std::str::FromStr;
use itertools::Itertools;
use regex::Regex;
use crate::OracleError;

/// Number of prime knots with `n` crossings in the Rolfsen table, `n = 3, …, 12`.
pub const ROLFSEN_COUNTS: [usize; 10] = [1, 1, 2, 3, 7, 21, 49, 165, 552, 2176];

/// A Rolfsen knot identifier `<crossings>_<index>`, e.g. `4_1`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, derive_more::Display)]
#[display("{crossings}_{index}")]
pub struct KnotName {
    pub crossings: usize,
    pub index: usize,
}

impl KnotName {
    pub fn new(crossings: usize, index: usize) -> Self {
        Self { crossings, index }
    }
}

impl FromStr for KnotName {
    type Err = OracleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let r = Regex::new(r"^([0-9]+)_([1-9][0-9]*)$").unwrap();
        let err = || OracleError::InvalidName(s.to_string());

        let caps = r.captures(s).ok_or_else(err)?;
        let crossings = caps[1].parse().map_err(|_| err())?;
        let index = caps[2].parse().map_err(|_| err())?;

        Ok(Self { crossings, index })
    }
}

/// All prime knots with `3 ≤ n ≤ max_crossings` crossings, in table order.
pub fn rolfsen_names(max_crossings: usize) -> Vec<KnotName> {
    (3..).zip(ROLFSEN_COUNTS).take_while(|(n, _)| *n <= max_crossings).flat_map(|(n, m)|
        (1..=m).map(move |i| KnotName::new(n, i))
    ).collect_vec()
}

use std::fmt;
use std::str::FromStr;
use std::ops::{MulAssign, Mul};
use auto_impl_ops::auto_ops;
use delegate::delegate;
use itertools::Itertools;

/// A generator letter or its formal inverse.
/// Lowercase letters are generators, uppercase letters their inverses.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol {
    gen: char,
    inv: bool,
}

impl Symbol {
    pub fn new(gen: char, inv: bool) -> Self {
        assert!(gen.is_ascii_lowercase(), "invalid generator: {gen}");
        Self { gen, inv }
    }

    pub fn gen(&self) -> char {
        self.gen
    }

    pub fn is_inv(&self) -> bool {
        self.inv
    }

    pub fn exponent(&self) -> isize {
        if self.inv { -1 } else { 1 }
    }

    pub fn inverse(&self) -> Self {
        Self { gen: self.gen, inv: !self.inv }
    }

    pub fn letter(&self) -> char {
        if self.inv {
            self.gen.to_ascii_uppercase()
        } else {
            self.gen
        }
    }
}

impl TryFrom<char> for Symbol {
    type Error = ParseError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        if c.is_ascii_lowercase() {
            Ok(Self::new(c, false))
        } else if c.is_ascii_uppercase() {
            Ok(Self::new(c.to_ascii_lowercase(), true))
        } else {
            Err(ParseError::InvalidSymbol(c, 0))
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self, f)
    }
}

#[derive(Clone, PartialEq, Eq, Debug, derive_more::Display)]
pub enum ParseError {
    #[display("invalid symbol '{_0}' at position {_1}")]
    InvalidSymbol(char, usize),
}

impl std::error::Error for ParseError {}

/// A word in the generators, e.g. a relator of a group presentation.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Word {
    symbols: Vec<Symbol>,
}

impl Word {
    pub fn new(symbols: Vec<Symbol>) -> Self {
        Self { symbols }
    }

    pub fn id() -> Self {
        Self::new(vec![])
    }

    pub fn gen(gen: char) -> Self {
        Self::new(vec![Symbol::new(gen, false)])
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    delegate! {
        to self.symbols {
            pub fn len(&self) -> usize;
            pub fn is_empty(&self) -> bool;
        }
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Symbol> {
        self.symbols.iter()
    }

    pub fn reversed(&self) -> Self {
        self.symbols.iter().rev().cloned().collect()
    }

    pub fn inverse(&self) -> Self {
        self.symbols.iter().rev().map(|s| s.inverse()).collect()
    }

    pub fn exponent_sum(&self, gen: char) -> isize {
        self.symbols.iter().filter(|s| s.gen == gen).map(|s| s.exponent()).sum()
    }

    pub fn is_balanced(&self, gen: char) -> bool {
        self.exponent_sum(gen) == 0
    }

    /// Distinct base letters, sorted.
    pub fn generators(&self) -> Vec<char> {
        self.symbols.iter().map(|s| s.gen).sorted().dedup().collect()
    }

    /// Exchanges the letters `x` and `y`, keeping the case of each symbol.
    pub fn swap_letters(&self, x: char, y: char) -> Self {
        self.symbols.iter().map(|s| {
            let gen = if s.gen == x { y } else if s.gen == y { x } else { s.gen };
            Symbol::new(gen, s.inv)
        }).collect()
    }

    /// Replaces every occurrence of `gen` by `image`,
    /// and of its inverse by the inverse of `image`.
    pub fn substitute(&self, gen: char, image: &Word) -> Self {
        let inv = image.inverse();
        self.symbols.iter().flat_map(|s| {
            if s.gen != gen {
                vec![*s]
            } else if s.inv {
                inv.symbols.clone()
            } else {
                image.symbols.clone()
            }
        }).collect()
    }

    pub fn free_reduce(&self) -> Self {
        let mut stack: Vec<Symbol> = Vec::with_capacity(self.len());
        for s in self.symbols.iter() {
            if stack.last() == Some(&s.inverse()) {
                stack.pop();
            } else {
                stack.push(*s);
            }
        }
        Self::new(stack)
    }

    pub fn cyclic_reduce(&self) -> Self {
        let w = self.free_reduce();
        let n = w.len();
        let k = (0..n / 2).take_while(|&i|
            w.symbols[i] == w.symbols[n - 1 - i].inverse()
        ).count();
        Self::new(w.symbols[k .. n - k].to_vec())
    }

    /// Cyclic rotation moving the first `k` symbols to the end.
    pub fn rotate(&self, k: usize) -> Self {
        let mut symbols = self.symbols.clone();
        if !symbols.is_empty() {
            let n = symbols.len();
            symbols.rotate_left(k % n);
        }
        Self::new(symbols)
    }

    /// Every symbol's inverse also occurs in the word.
    pub fn is_inverse_closed(&self) -> bool {
        self.symbols.iter().all(|s| self.symbols.contains(&s.inverse()))
    }
}

impl FromStr for Word {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars().enumerate().map(|(i, c)|
            Symbol::try_from(c).map_err(|_| ParseError::InvalidSymbol(c, i))
        ).collect()
    }
}

impl FromIterator<Symbol> for Word {
    fn from_iter<T: IntoIterator<Item = Symbol>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Word {
    type Item = &'a Symbol;
    type IntoIter = std::slice::Iter<'a, Symbol>;

    fn into_iter(self) -> Self::IntoIter {
        self.symbols.iter()
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for s in self.symbols.iter() {
            write!(f, "{s}")?
        }
        Ok(())
    }
}

impl fmt::Debug for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self, f)
    }
}

#[auto_ops]
impl MulAssign<&Word> for Word {
    fn mul_assign(&mut self, rhs: &Word) {
        self.symbols.extend(rhs.symbols.iter().cloned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w(s: &str) -> Word {
        s.parse().unwrap()
    }

    #[test]
    fn parse() {
        let x = w("abAB");
        assert_eq!(x.len(), 4);
        assert_eq!(x.symbols()[2], Symbol::new('a', true));
        assert_eq!(x.to_string(), "abAB");
        assert!(w("").is_empty());
    }

    #[test]
    fn parse_err() {
        let e = "ab1B".parse::<Word>();
        assert_eq!(e, Err(ParseError::InvalidSymbol('1', 2)));
        assert_eq!(e.unwrap_err().to_string(), "invalid symbol '1' at position 2");
    }

    #[test]
    fn symbol() {
        let s = Symbol::try_from('B').unwrap();
        assert_eq!(s.gen(), 'b');
        assert!(s.is_inv());
        assert_eq!(s.exponent(), -1);
        assert_eq!(s.inverse().letter(), 'b');
    }

    #[test]
    fn reversed_and_inverse() {
        let x = w("aabC");
        assert_eq!(x.reversed(), w("Cbaa"));
        assert_eq!(x.inverse(), w("cBAA"));
        assert_eq!((&x * &x.inverse()).free_reduce(), Word::id());
    }

    #[test]
    fn exponent_sum() {
        let x = w("abABaBabABaBAbAb");
        assert_eq!(x.exponent_sum('a'), 0);
        assert_eq!(x.exponent_sum('b'), 0);
        assert!(x.is_balanced('a'));

        let x = w("aaaBB");
        assert_eq!(x.exponent_sum('a'), 3);
        assert_eq!(x.exponent_sum('b'), -2);
        assert!(!x.is_balanced('b'));
        assert_eq!(x.exponent_sum('c'), 0);
    }

    #[test]
    fn generators() {
        assert_eq!(w("cBAabC").generators(), vec!['a', 'b', 'c']);
        assert_eq!(Word::id().generators(), Vec::<char>::new());
    }

    #[test]
    fn swap_letters() {
        assert_eq!(w("abAcB").swap_letters('a', 'b'), w("baBcA"));
        assert_eq!(w("abAcB").swap_letters('a', 'b').swap_letters('a', 'b'), w("abAcB"));
    }

    #[test]
    fn substitute() {
        // a ↦ ab
        let x = w("aBA").substitute('a', &w("ab"));
        assert_eq!(x, w("abBBA"));
        assert_eq!(x.free_reduce(), w("aBA"));
    }

    #[test]
    fn reduce() {
        assert_eq!(w("abBAab").free_reduce(), w("ab"));
        assert_eq!(w("aAbB").free_reduce(), Word::id());
        assert_eq!(w("babAB").cyclic_reduce(), w("b"));
        assert_eq!(w("abAB").cyclic_reduce(), w("abAB"));
        assert_eq!(w("bAbB").cyclic_reduce(), w("bA"));
    }

    #[test]
    fn rotate() {
        let x = w("abAB");
        assert_eq!(x.rotate(1), w("bABa"));
        assert_eq!(x.rotate(5), w("bABa"));
        assert_eq!(Word::id().rotate(3), Word::id());
    }

    #[test]
    fn inverse_closed() {
        assert!(w("abAB").is_inverse_closed());
        assert!(!w("aaB").is_inverse_closed());
    }
}

use std::fmt::Display;
use itertools::Itertools;
use num_traits::{Zero, One};
use aeg_alg::{LPoly, MDeg, Q, Ring, var_name};
use crate::{Symbol, Word};

type P = LPoly<Q>;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, derive_more::Display)]
pub enum Role {
    #[display("multiplicative")]
    Multiplicative,
    #[display("additive")]
    Additive,
}

/// Assigns the multiplicative role to one letter.
/// Every other letter is additive.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct RoleAssignment {
    mult: char,
    others: Vec<char>,
}

impl RoleAssignment {
    pub fn new<I>(mult: char, others: I) -> Self
    where I: IntoIterator<Item = char> {
        let others = others.into_iter().filter(|&c| c != mult).sorted().dedup().collect();
        Self { mult, others }
    }

    /// `mult` multiplicative, the remaining generators of `word` additive.
    pub fn for_word(mult: char, word: &Word) -> Self {
        Self::new(mult, word.generators())
    }

    pub fn mult(&self) -> char {
        self.mult
    }

    pub fn additive(&self) -> &[char] {
        &self.others
    }

    pub fn role(&self, gen: char) -> Role {
        if gen == self.mult {
            Role::Multiplicative
        } else {
            Role::Additive
        }
    }

    pub fn describe(&self) -> String {
        let mut s = format!("'{}' as multiplicative ({})", self.mult, var_name(0));
        if !self.others.is_empty() {
            let others = self.others.iter().map(|c| format!("'{c}'")).join(", ");
            s += &format!(", {others} as additive");
        }
        s
    }
}

impl Display for RoleAssignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.describe())
    }
}

/// `x ↦ scale·x + shift`
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct AffineMap {
    pub scale: P,
    pub shift: P,
}

impl AffineMap {
    pub fn new(scale: P, shift: P) -> Self {
        Self { scale, shift }
    }

    pub fn id() -> Self {
        Self::new(P::one(), P::zero())
    }

    pub fn apply(&self, x: &P) -> P {
        &self.scale * x + &self.shift
    }

    /// `self ∘ g`
    pub fn compose(&self, g: &Self) -> Self {
        Self::new(
            &self.scale * &g.scale,
            &self.scale * &g.shift + &self.shift,
        )
    }

    /// `[[scale, shift], [0, 1]]`
    pub fn matrix(&self) -> [[P; 2]; 2] {
        [
            [self.scale.clone(), self.shift.clone()],
            [P::zero(), P::one()],
        ]
    }

    /// `x ↦ (x - shift) / scale`, if `scale` is invertible.
    pub fn inverse(&self) -> Option<Self> {
        let s = self.scale.inv()?;
        let b = -(&s * &self.shift);
        Some(Self::new(s, b))
    }
}

/// Interprets each symbol as an affine map of the path value.
pub trait GeneratorAction {
    fn action(&self, s: &Symbol) -> AffineMap;
    fn role(&self, gen: char) -> Role;
    fn variables(&self, word: &Word) -> Vec<usize>;
    fn describe(&self) -> String;
}

impl<A> GeneratorAction for Box<A>
where A: GeneratorAction + ?Sized {
    fn action(&self, s: &Symbol) -> AffineMap {
        (**self).action(s)
    }

    fn role(&self, gen: char) -> Role {
        (**self).role(gen)
    }

    fn variables(&self, word: &Word) -> Vec<usize> {
        (**self).variables(word)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

impl<A> GeneratorAction for &A
where A: GeneratorAction + ?Sized {
    fn action(&self, s: &Symbol) -> AffineMap {
        (**self).action(s)
    }

    fn role(&self, gen: char) -> Role {
        (**self).role(gen)
    }

    fn variables(&self, word: &Word) -> Vec<usize> {
        (**self).variables(word)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

fn t(i: usize, e: isize) -> P {
    P::mono(MDeg::var(i, e), Q::one())
}

/// One multiplicative generator acting by `x ↦ t·x`,
/// all others acting by `x ↦ x + 1`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Affine {
    roles: RoleAssignment,
}

impl Affine {
    pub fn new(roles: RoleAssignment) -> Self {
        Self { roles }
    }

    pub fn roles(&self) -> &RoleAssignment {
        &self.roles
    }
}

impl GeneratorAction for Affine {
    fn action(&self, s: &Symbol) -> AffineMap {
        match self.roles.role(s.gen()) {
            Role::Multiplicative => AffineMap::new(t(0, s.exponent()), P::zero()),
            Role::Additive => AffineMap::new(P::one(), P::from(s.exponent() as i32)),
        }
    }

    fn role(&self, gen: char) -> Role {
        self.roles.role(gen)
    }

    fn variables(&self, _word: &Word) -> Vec<usize> {
        vec![0]
    }

    fn describe(&self) -> String {
        self.roles.describe()
    }
}

/// Every generator `g` acts by `x ↦ t_g·x + 1`, with its own variable:
/// `a, b, c, …` correspond to `t₁, t₂, t₃, …`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Symmetric;

impl Symmetric {
    pub fn var_index(gen: char) -> usize {
        (gen as usize) - ('a' as usize) + 1
    }
}

impl GeneratorAction for Symmetric {
    fn action(&self, s: &Symbol) -> AffineMap {
        let i = Self::var_index(s.gen());
        if s.is_inv() {
            // (x - 1)/t
            AffineMap::new(t(i, -1), -t(i, -1))
        } else {
            AffineMap::new(t(i, 1), P::one())
        }
    }

    fn role(&self, _gen: char) -> Role {
        Role::Multiplicative
    }

    fn variables(&self, word: &Word) -> Vec<usize> {
        word.generators().into_iter().map(Self::var_index).collect()
    }

    fn describe(&self) -> String {
        String::from("all generators multiplicative (x ↦ tᵢ·x + 1)")
    }
}

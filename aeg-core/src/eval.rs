//! Evaluation of words as composites of affine maps.
//!
//! The first symbol of a word is the outermost map:
//! `w₀w₁…wₙ₋₁` evaluates to `f_{w₀}(f_{w₁}(…f_{wₙ₋₁}(0)))`.
//! This is the scalar fold over the reversed word starting from `0`,
//! and equally the entry `[0][1]` of the matrix product `M_{w₀}⋯M_{wₙ₋₁}`.

use log::trace;
use num_traits::Zero;
use rand::Rng;
use rand::seq::SliceRandom;
use aeg_alg::{LPoly, Q};
use crate::{GeneratorAction, Role, Word};

type P = LPoly<Q>;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, derive_more::Display)]
pub enum FoldOrder {
    #[display("forward")]
    Forward,
    #[display("reverse")]
    Reverse,
    #[display("A→M")]
    AThenM,
    #[display("M→A")]
    MThenA,
    #[display("shuffled")]
    Shuffled,
}

pub fn fold_scalar<A>(word: &Word, action: &A) -> P
where A: GeneratorAction + ?Sized {
    word.iter().rev().fold(P::zero(), |x, s| {
        let y = action.action(s).apply(&x);
        trace!("{s}: {x} -> {y}");
        y
    })
}

fn mat_mul(a: &[[P; 2]; 2], b: &[[P; 2]; 2]) -> [[P; 2]; 2] {
    let e = |i: usize, j: usize| &a[i][0] * &b[0][j] + &a[i][1] * &b[1][j];
    [[e(0, 0), e(0, 1)], [e(1, 0), e(1, 1)]]
}

pub fn fold_matrix<A>(word: &Word, action: &A) -> P
where A: GeneratorAction + ?Sized {
    let id = crate::AffineMap::id().matrix();
    let m = word.iter().fold(id, |m, s|
        mat_mul(&m, &action.action(s).matrix())
    );
    let [[_, shift], _] = m;
    shift
}

/// Splits `word` into its additive and multiplicative subsequences,
/// each in its original order.
pub fn partition<A>(word: &Word, action: &A) -> (Word, Word)
where A: GeneratorAction + ?Sized {
    let (m, a): (Vec<_>, Vec<_>) = word.iter().cloned().partition(|s|
        action.role(s.gen()) == Role::Multiplicative
    );
    (Word::new(a), Word::new(m))
}

pub fn canonical_a_then_m<A>(word: &Word, action: &A) -> Word
where A: GeneratorAction + ?Sized {
    let (a, m) = partition(word, action);
    a * m
}

pub fn canonical_m_then_a<A>(word: &Word, action: &A) -> Word
where A: GeneratorAction + ?Sized {
    let (a, m) = partition(word, action);
    m * a
}

pub fn shuffled<R: Rng>(word: &Word, rng: &mut R) -> Word {
    let mut symbols = word.symbols().to_vec();
    symbols.shuffle(rng);
    Word::new(symbols)
}

pub fn reorder<A, R>(word: &Word, order: FoldOrder, action: &A, rng: &mut R) -> Word
where A: GeneratorAction + ?Sized, R: Rng {
    use FoldOrder::*;
    match order {
        Forward  => word.clone(),
        Reverse  => word.reversed(),
        AThenM   => canonical_a_then_m(word, action),
        MThenA   => canonical_m_then_a(word, action),
        Shuffled => shuffled(word, rng),
    }
}

/// Evaluates `word` rearranged by `order`.
pub fn evaluate<A, R>(word: &Word, action: &A, order: FoldOrder, rng: &mut R) -> P
where A: GeneratorAction + ?Sized, R: Rng {
    let w = reorder(word, order, action, rng);
    trace!("evaluate {order}: {w}");
    fold_scalar(&w, action)
}

#[cfg(test)]
mod tests {
    use num_traits::One;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use aeg_alg::{MDeg, Ring};
    use crate::{Affine, RoleAssignment, Symmetric};
    use super::*;

    fn w(s: &str) -> Word {
        s.parse().unwrap()
    }

    fn t(i: usize) -> P {
        P::variable(i)
    }

    fn affine(mult: char) -> Affine {
        Affine::new(RoleAssignment::new(mult, ['a', 'b', 'c']))
    }

    #[test]
    fn fold_agrees() {
        let words = ["", "a", "B", "abAB", "abABAbab", "aaaBB", "abABaBabABaBAbAb", "cAbbCaB"];
        for s in words {
            let x = w(s);
            for m in ['a', 'b'] {
                let a = affine(m);
                assert_eq!(fold_scalar(&x, &a), fold_matrix(&x, &a), "{s}");
            }
            assert_eq!(fold_scalar(&x, &Symmetric), fold_matrix(&x, &Symmetric), "{s}");
        }
    }

    #[test]
    fn outermost_first() {
        // a(b(0)) = t, b(a(0)) = 1
        let a = affine('a');
        assert_eq!(fold_scalar(&w("ab"), &a), t(0));
        assert_eq!(fold_scalar(&w("ba"), &a), P::one());
    }

    #[test]
    fn commutator() {
        let mut rng = StdRng::seed_from_u64(0);
        let a = affine('a');
        let x = w("abAB");

        let p = evaluate(&x, &a, FoldOrder::Forward, &mut rng);
        let q = evaluate(&x, &a, FoldOrder::Reverse, &mut rng);
        assert_eq!(p, t(0) - P::one());
        assert_eq!(q, t(0).inv().unwrap() - P::one());

        // the same order twice
        assert!((&p - evaluate(&x, &a, FoldOrder::Forward, &mut rng)).is_zero());

        assert_eq!(canonical_a_then_m(&x, &a), w("bBaA"));
        assert_eq!(canonical_m_then_a(&x, &a), w("aAbB"));
        assert!(evaluate(&x, &a, FoldOrder::AThenM, &mut rng).is_zero());
        assert!(evaluate(&x, &a, FoldOrder::MThenA, &mut rng).is_zero());
    }

    #[test]
    fn symmetric_whitehead() {
        let x = w("abABAbab");
        let (t1, t2) = (t(1), t(2));
        let p = fold_scalar(&x, &Symmetric);
        assert_eq!(p, &t1 + &t2 * t1.inv().unwrap());
    }

    #[test]
    fn canonical_is_idempotent() {
        let a = affine('a');
        for s in ["abAB", "abABAbab", "abABaBabABaBAbAb", "aaaBB"] {
            let x = w(s);
            let y = canonical_a_then_m(&x, &a);
            assert_eq!(canonical_a_then_m(&y, &a), y);
            let y = canonical_m_then_a(&x, &a);
            assert_eq!(canonical_m_then_a(&y, &a), y);
        }
    }

    #[test]
    fn canonical_keeps_relative_order() {
        let a = affine('b');
        let x = w("aBbAcb");
        assert_eq!(canonical_a_then_m(&x, &a), w("aAcBbb"));
        assert_eq!(canonical_m_then_a(&x, &a), w("BbbaAc"));
    }

    #[test]
    fn shuffle_is_permutation() {
        let mut rng = StdRng::seed_from_u64(1);
        let x = w("abABaBabABaBAbAb");
        let y = shuffled(&x, &mut rng);
        assert_eq!(y.len(), x.len());
        assert_eq!(y.exponent_sum('a'), x.exponent_sum('a'));
        assert_eq!(y.exponent_sum('b'), x.exponent_sum('b'));

        let mut s1 = x.symbols().to_vec();
        let mut s2 = y.symbols().to_vec();
        s1.sort();
        s2.sort();
        assert_eq!(s1, s2);
    }

    #[test]
    fn reverse_is_reversed_word() {
        let mut rng = StdRng::seed_from_u64(0);
        let a = affine('b');
        let x = w("abABaBabABaBAbAb");
        let q = evaluate(&x, &a, FoldOrder::Reverse, &mut rng);
        assert_eq!(q, evaluate(&x.reversed(), &a, FoldOrder::Forward, &mut rng));
    }

    #[test]
    fn laurent_values() {
        let a = affine('a');
        let p = fold_scalar(&w("AAb"), &a);
        assert_eq!(p, P::mono(MDeg::var(0, -2), Q::one()));
    }
}

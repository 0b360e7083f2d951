use std::collections::HashSet;
use std::fmt::Display;
use log::{debug, info, warn};
use aeg_alg::{LPoly, Q};
use aeg_core::{RoleAssignment, Word};
use crate::{KnotName, Manifold, Oracle, OracleError};

/// How a canonical presentation fixes the multiplicative letter.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, derive_more::Display)]
pub enum Normalize {
    /// Keep the letters, assign the roles.
    #[default]
    #[display("roles")]
    Roles,
    /// Swap `a ↔ b` so that `a` is always multiplicative.
    #[display("relabel")]
    Relabel,
}

/// Per-knot search state: the attempt counter and the relators already seen.
#[derive(Clone, Debug)]
pub struct KnotSearch {
    max_attempts: usize,
    attempts: usize,
    seen: HashSet<Word>,
}

impl KnotSearch {
    pub const DEFAULT_MAX_ATTEMPTS: usize = 8192;

    pub fn new(max_attempts: usize) -> Self {
        Self { max_attempts, attempts: 0, seen: HashSet::new() }
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    pub fn attempts(&self) -> usize {
        self.attempts
    }

    pub fn seen(&self) -> &HashSet<Word> {
        &self.seen
    }

    pub fn is_exhausted(&self) -> bool {
        self.attempts >= self.max_attempts
    }
}

impl Default for KnotSearch {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_ATTEMPTS)
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct Presentation {
    pub name: KnotName,
    pub relator: Word,
    pub alexander: LPoly<Q>,
    pub generator_count: usize,
    pub roles: RoleAssignment,
    pub mapping: String,
}

impl Display for Presentation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "knot: {}", self.name)?;
        writeln!(f, "relator: {}", self.relator)?;
        writeln!(f, "mapping: {}", self.mapping)?;
        write!(f, "alexander: {}", self.alexander)
    }
}

#[derive(Clone, PartialEq, Debug)]
pub enum FetchOutcome {
    Found(Presentation),
    Exhausted,
}

impl FetchOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, FetchOutcome::Found(_))
    }

    pub fn found(self) -> Option<Presentation> {
        match self {
            FetchOutcome::Found(p) => Some(p),
            FetchOutcome::Exhausted => None
        }
    }
}

/// Assigns the multiplicative role to the exponent-balanced generator,
/// preferring `a`. `None` if neither `a` nor `b` is balanced.
pub fn canonicalize(relator: &Word, normalize: Normalize) -> Option<(Word, RoleAssignment)> {
    let mult = if relator.is_balanced('a') {
        'a'
    } else if relator.is_balanced('b') {
        'b'
    } else {
        return None
    };

    let (relator, mult) = match normalize {
        Normalize::Roles => (relator.clone(), mult),
        Normalize::Relabel if mult == 'a' => (relator.clone(), 'a'),
        Normalize::Relabel => (relator.swap_letters('a', 'b'), 'a'),
    };

    let roles = RoleAssignment::new(mult, ['a', 'b']);
    Some((relator, roles))
}

/// Randomizes `manifold` until it yields a new canonical presentation,
/// or until `search` runs out of attempts.
pub fn fetch_from<M>(manifold: &mut M, name: &KnotName, search: &mut KnotSearch, normalize: Normalize) -> FetchOutcome
where M: Manifold + ?Sized {
    while !search.is_exhausted() {
        search.attempts += 1;
        let n = search.attempts;

        manifold.randomize();
        let group = manifold.fundamental_group();

        if group.num_generators != 2 {
            debug!("{name} #{n}: {} generators", group.num_generators);
            continue
        }

        let [relator] = &group.relators[..] else {
            debug!("{name} #{n}: {} relators", group.relators.len());
            continue
        };

        let Some((relator, roles)) = canonicalize(relator, normalize) else {
            debug!("{name} #{n}: {relator} is balanced in neither generator");
            continue
        };

        if !search.seen.insert(relator.clone()) {
            debug!("{name} #{n}: {relator} already seen");
            continue
        }

        let alexander = match manifold.alexander_polynomial() {
            Ok(d) => d,
            Err(e) => {
                warn!("{name} #{n}: {e}");
                continue
            }
        };
        info!("{name}: found {relator} ({roles}) after {n} attempts");

        return FetchOutcome::Found(Presentation {
            name: *name,
            mapping: roles.describe(),
            relator,
            alexander,
            generator_count: group.num_generators,
            roles,
        })
    }

    info!("{name}: exhausted after {} attempts", search.attempts);
    FetchOutcome::Exhausted
}

/// Opens the manifold for `name` and runs one bounded search on it.
pub fn fetch_presentation<O>(oracle: &O, name: &KnotName, search: &mut KnotSearch, normalize: Normalize) -> Result<FetchOutcome, OracleError>
where O: Oracle {
    let mut manifold = oracle.manifold(name)?;
    Ok(fetch_from(&mut manifold, name, search, normalize))
}

/// Up to `count` distinct canonical presentations of `name`.
pub fn collect_distinct<O>(oracle: &O, name: &KnotName, count: usize, max_attempts: usize, normalize: Normalize) -> Result<Vec<Presentation>, OracleError>
where O: Oracle {
    let mut manifold = oracle.manifold(name)?;
    let mut search = KnotSearch::new(max_attempts);
    let mut res = vec![];

    while res.len() < count {
        match fetch_from(&mut manifold, name, &mut search, normalize) {
            FetchOutcome::Found(p) => res.push(p),
            FetchOutcome::Exhausted => break
        }
    }

    debug!("{name}: {} distinct presentations in {} attempts", res.len(), search.attempts);

    Ok(res)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use num_traits::One;
    use crate::{GroupPresentation, TwoBridgeOracle};
    use super::*;

    struct Scripted {
        gens: usize,
        relators: Vec<Word>,
        current: usize,
        alexander: Option<LPoly<Q>>,
    }

    impl Manifold for Scripted {
        fn randomize(&mut self) {
            self.current = (self.current + 1) % self.relators.len();
        }

        fn fundamental_group(&self) -> GroupPresentation {
            GroupPresentation {
                num_generators: self.gens,
                relators: vec![self.relators[self.current].clone()],
            }
        }

        fn alexander_polynomial(&self) -> Result<LPoly<Q>, OracleError> {
            self.alexander.clone().ok_or(OracleError::Unavailable("no Alexander polynomial".into()))
        }
    }

    struct ScriptedOracle {
        scripts: HashMap<KnotName, (usize, Vec<&'static str>)>,
    }

    impl Oracle for ScriptedOracle {
        type Manifold = Scripted;

        fn manifold(&self, name: &KnotName) -> Result<Scripted, OracleError> {
            let (gens, rels) = self.scripts.get(name).ok_or(OracleError::UnknownKnot(*name))?;
            Ok(Scripted {
                gens: *gens,
                relators: rels.iter().map(|r| r.parse().unwrap()).collect(),
                current: rels.len() - 1,
                alexander: (name.to_string() != "7_1").then(LPoly::one),
            })
        }
    }

    fn name(s: &str) -> KnotName {
        s.parse().unwrap()
    }

    fn w(s: &str) -> Word {
        s.parse().unwrap()
    }

    fn oracle() -> ScriptedOracle {
        ScriptedOracle { scripts: HashMap::from([
            (name("3_1"), (2, vec!["aaab", "aaBAb"])),
            (name("4_1"), (2, vec!["aaab", "abbb"])),
            (name("5_1"), (2, vec!["abAB"])),
            (name("5_2"), (3, vec!["abAB"])),
            (name("7_1"), (2, vec!["abAB", "aaBAb"])),
        ])}
    }

    #[test]
    fn canonical() {
        let (r, roles) = canonicalize(&w("abAB"), Normalize::Roles).unwrap();
        assert_eq!(r, w("abAB"));
        assert_eq!(roles.mult(), 'a');

        let (r, roles) = canonicalize(&w("aaBAb"), Normalize::Roles).unwrap();
        assert_eq!(r, w("aaBAb"));
        assert_eq!(roles.mult(), 'b');
        assert_eq!(roles.additive(), &['a']);

        let (r, roles) = canonicalize(&w("aaBAb"), Normalize::Relabel).unwrap();
        assert_eq!(r, w("bbABa"));
        assert_eq!(roles.mult(), 'a');

        assert_eq!(canonicalize(&w("aaab"), Normalize::Roles), None);
    }

    #[test]
    fn found() {
        let mut search = KnotSearch::new(10);
        let res = fetch_presentation(&oracle(), &name("3_1"), &mut search, Normalize::Roles).unwrap();
        let p = res.found().unwrap();

        assert_eq!(search.attempts(), 2);
        assert_eq!(p.relator, w("aaBAb"));
        assert_eq!(p.generator_count, 2);
        assert_eq!(p.mapping, "'b' as multiplicative (t), 'a' as additive");
        assert_eq!(p.alexander, LPoly::one());
    }

    #[test]
    fn relabel() {
        let mut search = KnotSearch::new(10);
        let res = fetch_presentation(&oracle(), &name("3_1"), &mut search, Normalize::Relabel).unwrap();
        let p = res.found().unwrap();

        assert_eq!(p.relator, w("bbABa"));
        assert_eq!(p.roles.mult(), 'a');
    }

    #[test]
    fn exhausted() {
        let mut search = KnotSearch::new(10);
        let res = fetch_presentation(&oracle(), &name("4_1"), &mut search, Normalize::Roles).unwrap();
        assert_eq!(res, FetchOutcome::Exhausted);
        assert_eq!(search.attempts(), 10);
        assert!(search.seen().is_empty());
    }

    #[test]
    fn wrong_generator_count() {
        let mut search = KnotSearch::new(5);
        let res = fetch_presentation(&oracle(), &name("5_2"), &mut search, Normalize::Roles).unwrap();
        assert!(!res.is_found());
        assert!(search.is_exhausted());
    }

    #[test]
    fn memo() {
        let ps = collect_distinct(&oracle(), &name("5_1"), 3, 10, Normalize::Roles).unwrap();
        assert_eq!(ps.len(), 1);

        let mut search = KnotSearch::new(10);
        let o = oracle();
        assert!(fetch_presentation(&o, &name("5_1"), &mut search, Normalize::Roles).unwrap().is_found());
        assert!(!fetch_presentation(&o, &name("5_1"), &mut search, Normalize::Roles).unwrap().is_found());
        assert_eq!(search.attempts(), 10);
    }

    #[test]
    fn alexander_unavailable() {
        let mut search = KnotSearch::new(6);
        let res = fetch_presentation(&oracle(), &name("7_1"), &mut search, Normalize::Roles).unwrap();
        assert_eq!(res, FetchOutcome::Exhausted);
        assert_eq!(search.attempts(), 6);
        assert_eq!(search.seen().len(), 2);
    }

    #[test]
    fn unknown() {
        let mut search = KnotSearch::default();
        let res = fetch_presentation(&oracle(), &name("6_1"), &mut search, Normalize::Roles);
        assert_eq!(res, Err(OracleError::UnknownKnot(name("6_1"))));
        assert_eq!(search.attempts(), 0);
    }

    #[test]
    fn two_bridge() {
        let o = TwoBridgeOracle::load().unwrap().with_seed(Some(1));
        let mut search = KnotSearch::default();
        let res = fetch_presentation(&o, &name("4_1"), &mut search, Normalize::Relabel).unwrap();
        let p = res.found().unwrap();

        assert!(p.relator.is_balanced('a'));
        assert_eq!(p.roles.mult(), 'a');
        assert_eq!(p.alexander.to_string(), "t² - 3t + 1");
    }

    #[test]
    fn two_bridge_distinct() {
        let o = TwoBridgeOracle::load().unwrap().with_seed(Some(2));
        let ps = collect_distinct(&o, &name("5_2"), 3, KnotSearch::DEFAULT_MAX_ATTEMPTS, Normalize::Roles).unwrap();
        assert_eq!(ps.len(), 3);

        let rels: HashSet<_> = ps.iter().map(|p| p.relator.clone()).collect();
        assert_eq!(rels.len(), 3);

        for p in ps {
            assert!(p.relator.is_balanced(p.roles.mult()));
            assert_eq!(p.alexander.to_string(), "2t² - 3t + 2");
        }
    }
}

use std::collections::BTreeMap;
use log::{debug, trace};
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use serde::Deserialize;
use aeg_alg::{LPoly, Q};
use aeg_core::{Symbol, Word};
use crate::fox::alexander_from_relator;
use crate::{GroupPresentation, KnotName, Manifold, Oracle, OracleError};

const RESOURCE_DIR: &str = "resources/";

/// Schubert's presentation `⟨a, b | a·w·b⁻¹·w⁻¹⟩` of the two-bridge knot `S(p, q)`,
/// with `w = b^{ε₁}a^{ε₂}⋯a^{ε_{p-1}}` and `εᵢ = (-1)^⌊iq/p⌋`. `p`, `q` must be odd.
pub fn two_bridge_relator(p: usize, q: usize) -> Word {
    assert!(p % 2 == 1 && q % 2 == 1 && q < p, "invalid Schubert pair ({p}, {q})");

    let w: Word = (1..p).map(|i| {
        let gen = if i % 2 == 1 { 'b' } else { 'a' };
        let inv = (i * q / p) % 2 == 1;
        Symbol::new(gen, inv)
    }).collect();

    Word::gen('a') * &w * Word::gen('b').inverse() * w.inverse()
}

/// Applies one to three random Nielsen transformations of `F(a, b)` to `relator`,
/// then a random cyclic rotation and possibly an inversion.
/// The result presents an isomorphic group.
pub fn random_presentation<R: Rng>(relator: &Word, rng: &mut R) -> Word {
    let (a, b) = (Word::gen('a'), Word::gen('b'));
    let mut r = relator.clone();

    for _ in 0..rng.gen_range(1..=3) {
        r = match rng.gen_range(0..6) {
            0 => r.substitute('b', &(&b * &a)),
            1 => r.substitute('b', &(&a * &b)),
            2 => r.substitute('a', &(&a * &b)),
            3 => r.substitute('a', &(&b * &a)),
            4 => r.swap_letters('a', 'b'),
            _ => r.substitute('a', &a.inverse()),
        }.free_reduce();
    }

    let r = r.cyclic_reduce();
    let r = r.rotate(rng.gen_range(0..r.len().max(1)));
    if rng.gen_bool(0.5) {
        r.inverse()
    } else {
        r
    }
}

#[derive(Deserialize)]
struct Entry {
    name: String,
    p: usize,
    q: usize,
}

/// Two-bridge knots from a table of Schubert pairs.
#[derive(Clone, Debug)]
pub struct TwoBridgeOracle {
    table: BTreeMap<KnotName, (usize, usize)>,
    seed: Option<u64>,
}

impl TwoBridgeOracle {
    pub fn new<I>(entries: I) -> Self
    where I: IntoIterator<Item = (KnotName, (usize, usize))> {
        Self { table: entries.into_iter().collect(), seed: None }
    }

    /// Loads the bundled table.
    pub fn load() -> Result<Self, OracleError> {
        let dir = std::env!("CARGO_MANIFEST_DIR");
        let path = format!("{dir}/{RESOURCE_DIR}two_bridge.json");
        Self::load_from(&path)
    }

    pub fn load_from(path: &str) -> Result<Self, OracleError> {
        let unavailable = |e: String| OracleError::Unavailable(format!("{path}: {e}"));

        let json = std::fs::read_to_string(path).map_err(|e| unavailable(e.to_string()))?;
        let entries: Vec<Entry> = serde_json::from_str(&json).map_err(|e| unavailable(e.to_string()))?;

        let table = entries.into_iter().map(|e| {
            let name = e.name.parse::<KnotName>()?;
            if e.p % 2 == 0 || e.q % 2 == 0 || e.q >= e.p {
                return Err(unavailable(format!("invalid Schubert pair ({}, {}) for {name}", e.p, e.q)))
            }
            Ok((name, (e.p, e.q)))
        }).collect::<Result<BTreeMap<_, _>, _>>()?;

        debug!("loaded {} two-bridge knots from {path}", table.len());

        Ok(Self { table, seed: None })
    }

    /// Makes presentations reproducible.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn schubert(&self, name: &KnotName) -> Option<(usize, usize)> {
        self.table.get(name).cloned()
    }

    pub fn names(&self) -> impl Iterator<Item = &KnotName> {
        self.table.keys()
    }

    fn rng_for(&self, name: &KnotName) -> StdRng {
        match self.seed {
            Some(s) => {
                let k = ((name.crossings as u64) << 32) | name.index as u64;
                StdRng::seed_from_u64(s ^ k)
            },
            None => StdRng::from_entropy()
        }
    }
}

impl Oracle for TwoBridgeOracle {
    type Manifold = TwoBridgeKnot;

    fn manifold(&self, name: &KnotName) -> Result<TwoBridgeKnot, OracleError> {
        let Some((p, q)) = self.schubert(name) else {
            return Err(OracleError::UnknownKnot(*name))
        };
        Ok(TwoBridgeKnot::new(*name, p, q, self.rng_for(name)))
    }
}

#[derive(Clone, Debug)]
pub struct TwoBridgeKnot {
    name: KnotName,
    base: Word,
    relator: Word,
    rng: StdRng,
}

impl TwoBridgeKnot {
    pub fn new(name: KnotName, p: usize, q: usize, rng: StdRng) -> Self {
        let base = two_bridge_relator(p, q);
        let relator = base.clone();
        Self { name, base, relator, rng }
    }

    pub fn name(&self) -> &KnotName {
        &self.name
    }

    pub fn relator(&self) -> &Word {
        &self.relator
    }
}

impl Manifold for TwoBridgeKnot {
    fn randomize(&mut self) {
        self.relator = random_presentation(&self.base, &mut self.rng);
        trace!("{}: {}", self.name, self.relator);
    }

    fn fundamental_group(&self) -> GroupPresentation {
        GroupPresentation {
            num_generators: 2,
            relators: vec![self.relator.clone()],
        }
    }

    fn alexander_polynomial(&self) -> Result<LPoly<Q>, OracleError> {
        alexander_from_relator(&self.relator).ok_or_else(||
            OracleError::Unavailable(format!("{}: {} is not a knot group relator", self.name, self.relator))
        )
    }
}

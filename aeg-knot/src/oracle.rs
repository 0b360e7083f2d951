use aeg_alg::{LPoly, Q};
use aeg_core::Word;
use crate::KnotName;

#[derive(Clone, PartialEq, Eq, Debug, derive_more::Display)]
pub enum OracleError {
    #[display("unknown knot: {_0}")]
    UnknownKnot(KnotName),
    #[display("invalid knot name: '{_0}'")]
    InvalidName(String),
    #[display("oracle unavailable: {_0}")]
    Unavailable(String),
}

impl std::error::Error for OracleError {}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct GroupPresentation {
    pub num_generators: usize,
    pub relators: Vec<Word>,
}

/// A knot complement with a current, randomizable, group presentation.
pub trait Manifold {
    fn randomize(&mut self);
    fn fundamental_group(&self) -> GroupPresentation;
    /// The Alexander polynomial of the current presentation.
    fn alexander_polynomial(&self) -> Result<LPoly<Q>, OracleError>;
}

/// Supplies manifolds by knot name.
pub trait Oracle {
    type Manifold: Manifold;
    fn manifold(&self, name: &KnotName) -> Result<Self::Manifold, OracleError>;
}

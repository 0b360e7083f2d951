pub mod word;
pub mod action;
pub mod eval;
pub mod torsion;

pub use word::{Symbol, Word, ParseError};
pub use action::{Role, RoleAssignment, AffineMap, GeneratorAction, Affine, Symmetric};
pub use eval::{FoldOrder, evaluate};
pub use torsion::{AcceptancePolicy, FactorizationReport, Experiment, ExperimentResult};

use clap::ValueEnum;
use derive_more::Display;
use aeg_core::{AcceptancePolicy, FoldOrder};
use aeg_knot::Normalize;

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum, Display, Debug, Default)]
#[clap(rename_all="lower")]
pub enum Convention {
    #[default] Affine,
    Symmetric
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum, Display, Debug, Default)]
#[clap(rename_all="kebab-case")]
pub enum Order {
    Forward,
    #[default] Reverse,
    AThenM,
    MThenA,
    Canonical,
    Shuffled
}

impl Order {
    /// The fold orders compared against the forward evaluation.
    pub fn fold_orders(&self) -> Vec<FoldOrder> {
        match self {
            Order::Forward   => vec![FoldOrder::Forward],
            Order::Reverse   => vec![FoldOrder::Reverse],
            Order::AThenM    => vec![FoldOrder::AThenM],
            Order::MThenA    => vec![FoldOrder::MThenA],
            Order::Canonical => vec![FoldOrder::AThenM, FoldOrder::MThenA],
            Order::Shuffled  => vec![FoldOrder::Shuffled],
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum, Display, Debug, Default)]
#[clap(rename_all="kebab-case")]
pub enum Policy {
    #[default] Polynomial,
    Laurent,
    SimplePole
}

impl Policy {
    /// `pole_var` is the index `i` of the tolerated pole `tᵢ`.
    pub fn with_pole(&self, pole_var: usize) -> AcceptancePolicy {
        match self {
            Policy::Polynomial => AcceptancePolicy::Polynomial,
            Policy::Laurent    => AcceptancePolicy::Laurent,
            Policy::SimplePole => AcceptancePolicy::SimplePole(pole_var),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum, Display, Debug, Default)]
#[clap(rename_all="lower")]
pub enum Norm {
    #[default] Roles,
    Relabel
}

impl From<Norm> for Normalize {
    fn from(n: Norm) -> Self {
        match n {
            Norm::Roles   => Normalize::Roles,
            Norm::Relabel => Normalize::Relabel,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum, Display, Debug, Default)]
#[clap(rename_all="lower")]
pub enum Reference {
    #[default] None,
    Alexander
}

mod int;
mod ratio;
mod poly;

pub use int::*;
pub use ratio::*;
pub use poly::*;

use num_bigint::BigInt;

/// The coefficient field of every path value: exact rationals.
pub type Q = Ratio<BigInt>;

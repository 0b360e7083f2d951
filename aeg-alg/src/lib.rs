mod abst;
mod types;

pub use abst::*;
pub use types::*;

pub mod factor;
pub mod util;

pub use factor::{factor, Factorization};

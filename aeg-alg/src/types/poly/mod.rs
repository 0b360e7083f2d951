mod mdeg;
mod lpoly;
mod ratfunc;

pub use mdeg::*;
pub use lpoly::*;
pub use ratfunc::*;

mod helper;
mod opts;

pub use helper::*;
pub use opts::*;

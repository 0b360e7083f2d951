mod name;
mod oracle;
mod two_bridge;
mod adapter;

pub mod fox;

pub use name::*;
pub use oracle::*;
pub use two_bridge::*;
pub use adapter::*;

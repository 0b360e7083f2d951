pub mod eval;
pub mod link;
pub mod dual;
pub mod knot;
pub mod table;
pub mod search;

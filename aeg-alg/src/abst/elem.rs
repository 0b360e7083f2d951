use std::fmt::{Debug, Display};

/// Coefficients and path values: exact, printable, shareable across threads.
pub trait Elem:
    Default +
    PartialEq +
    Eq +
    Clone +
    Send +
    Sync +
    Display +
    Debug +
    'static
{
    /// Name of the structure the element lives in, e.g. `Q[t±]`.
    fn math_symbol() -> String;
}

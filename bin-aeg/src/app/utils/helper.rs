use rand::SeedableRng;
use rand::rngs::StdRng;
use aeg_core::{Affine, GeneratorAction, RoleAssignment, Symmetric, Word};
use aeg_knot::{KnotName, TwoBridgeOracle};
use crate::app::err::*;
use super::Convention;

pub fn measure<F, Res>(proc: F) -> (Res, std::time::Duration)
where F: FnOnce() -> Res {
    let start = std::time::Instant::now();
    let res = proc();
    let time = start.elapsed();
    (res, time)
}

pub fn guard_panic<F, R>(f: F) -> Result<R, Box<dyn std::error::Error>>
where F: FnOnce() -> Result<R, Box<dyn std::error::Error>> + std::panic::UnwindSafe {
    std::panic::catch_unwind(|| {
        f()
    }).unwrap_or_else(|e| {
        let info = match e.downcast::<String>() {
            Ok(v) => *v,
            Err(e) => match e.downcast::<&str>() {
                Ok(v) => v.to_string(),
                _ => "Unknown Source of Error".to_owned()
            }
        };
        err!("panic: {info}")
    })
}

pub fn parse_word(input: &str) -> Result<Word, Box<dyn std::error::Error>> {
    match input.parse::<Word>() {
        Ok(w) if w.is_empty() => err!("empty word."),
        Ok(w) => Ok(w),
        Err(e) => err!("invalid word '{input}': {e}")
    }
}

pub fn parse_knot(input: &str) -> Result<KnotName, Box<dyn std::error::Error>> {
    Ok(input.parse::<KnotName>()?)
}

pub fn make_action(conv: Convention, mult: char, word: &Word) -> Result<Box<dyn GeneratorAction>, Box<dyn std::error::Error>> {
    match conv {
        Convention::Affine => {
            ensure!(mult.is_ascii_lowercase(), "invalid multiplicative generator: '{mult}'");
            let roles = RoleAssignment::for_word(mult, word);
            Ok(Box::new(Affine::new(roles)))
        },
        Convention::Symmetric => {
            Ok(Box::new(Symmetric))
        }
    }
}

/// Seeded from entropy when `seed` is `None`.
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy()
    }
}

pub fn load_oracle(seed: Option<u64>) -> Result<TwoBridgeOracle, Box<dyn std::error::Error>> {
    let oracle = TwoBridgeOracle::load()?;
    Ok(oracle.with_seed(seed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse() {
        assert!(parse_word("abAB").is_ok());
        assert!(parse_word("ab1").is_err());
        assert!(parse_word("").is_err());
        assert!(parse_knot("4_1").is_ok());
        assert!(parse_knot("4-1").is_err());
    }

    #[test]
    fn action() {
        let w = parse_word("abAB").unwrap();
        assert!(make_action(Convention::Affine, 'b', &w).is_ok());
        assert!(make_action(Convention::Affine, 'B', &w).is_err());
        assert_eq!(make_action(Convention::Symmetric, 'a', &w).unwrap().variables(&w), vec![1, 2]);
    }

    #[test]
    fn guarded() {
        let res: Result<(), _> = guard_panic(|| panic!("boom"));
        assert_eq!(res.unwrap_err().to_string(), "panic: boom");
    }
}

use num_traits::Zero;
use aeg_core::{Affine, RoleAssignment};
use aeg_core::eval::fold_scalar;
use aeg_core::torsion::{dual_sum, torsion};
use crate::app::err::*;
use crate::app::utils::*;

pub fn dispatch(args: &Args) -> Result<String, Box<dyn std::error::Error>> {
    App::new(args.clone()).run()
}

#[derive(Clone, Default, Debug, clap::Args)]
pub struct Args {
    pub word: String,

    #[arg(short, long, default_value = "a")]
    pub mult: char,

    #[arg(long, default_value = "0")]
    pub log: u8,
}

pub struct App {
    args: Args,
    buff: String,
}

impl App {
    pub fn new(args: Args) -> Self {
        let buff = String::with_capacity(1024);
        App { args, buff }
    }

    pub fn run(&mut self) -> Result<String, Box<dyn std::error::Error>> {
        let word = parse_word(&self.args.word)?;
        let mult = self.args.mult;

        ensure!(mult.is_ascii_lowercase(), "invalid multiplicative generator: '{mult}'");

        let roles = RoleAssignment::for_word(mult, &word);
        let action = Affine::new(roles.clone());

        let p = fold_scalar(&word, &action);
        let q = fold_scalar(&word.reversed(), &action);
        let tau = torsion(&p, &q);
        let sum = dual_sum(&word, &roles);
        let residual = &tau - &sum;

        self.out(&format!("relator: {word}"));
        self.out(&format!("mapping: {roles}"));
        if !word.is_balanced(mult) {
            self.out(&format!("warning: not balanced in '{mult}' (exponent sum {})", word.exponent_sum(mult)));
        }
        self.out(&format!("p: {p}"));
        self.out(&format!("q: {q}"));
        self.out(&format!("torsion: {tau}"));
        self.out(&format!("dual sum: {sum}"));
        self.out(&format!("residual: {residual}"));
        self.out(&format!("verified: {}", residual.is_zero()));

        Ok(self.flush())
    }

    fn out(&mut self, str: &str) {
        self.buff.push_str(str);
        self.buff.push('\n');
    }

    fn flush(&mut self) -> String {
        let res = std::mem::take(&mut self.buff);
        res.trim().to_string()
    }
}

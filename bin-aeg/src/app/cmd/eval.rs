use aeg_alg::{factor, LPoly, Q};
use aeg_core::{GeneratorAction, Word};
use aeg_core::eval::{fold_scalar, reorder};
use aeg_core::torsion::torsion;
use crate::app::utils::*;

pub fn dispatch(args: &Args) -> Result<String, Box<dyn std::error::Error>> {
    App::new(args.clone()).run()
}

#[derive(Clone, Default, Debug, clap::Args)]
pub struct Args {
    pub word: String,

    #[arg(short, long, default_value = "affine")]
    pub convention: Convention,

    #[arg(short, long, default_value = "a")]
    pub mult: char,

    #[arg(short, long, default_value = "reverse")]
    pub order: Order,

    #[arg(long)]
    pub seed: Option<u64>,

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
        let action = make_action(self.args.convention, self.args.mult, &word)?;
        let mut rng = make_rng(self.args.seed);

        let p = fold_scalar(&word, &action);

        self.out(&format!("relator: {word}"));
        self.out(&format!("mapping: {}", action.describe()));
        self.out(&format!("p: {p}"));

        for order in self.args.order.fold_orders() {
            let w = reorder(&word, order, &action, &mut rng);
            self.compare(&w, &p, &action, &order.to_string());
        }

        Ok(self.flush())
    }

    fn compare(&mut self, w: &Word, p: &LPoly<Q>, action: &dyn GeneratorAction, label: &str) {
        let q = fold_scalar(w, action);
        let tau = torsion(p, &q);

        self.out("");
        self.out(&format!("{label} path: {w}"));
        self.out(&format!("q: {q}"));
        self.out(&format!("torsion: {tau}"));
        self.out(&format!("factors: {}", factor(&tau)));
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

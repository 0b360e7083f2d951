use log::info;
use aeg_core::{Experiment, GeneratorAction, Symmetric};
use aeg_core::torsion::cyclotomic_check;
use crate::app::utils::*;

pub fn dispatch(args: &Args) -> Result<String, Box<dyn std::error::Error>> {
    App::new(args.clone()).run()
}

#[derive(Clone, Default, Debug, clap::Args)]
pub struct Args {
    pub word: String,

    #[arg(short, long, default_value = "reverse")]
    pub order: Order,

    #[arg(short, long, default_value = "polynomial")]
    pub policy: Policy,

    #[arg(long, default_value = "1")]
    pub pole_var: usize,

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
        let action = Symmetric;
        let vars = action.variables(&word);
        let reference = cyclotomic_check(&vars);
        let policy = self.args.policy.with_pole(self.args.pole_var);
        let mut rng = make_rng(self.args.seed);

        info!("reference: {reference}, policy: {policy}");

        self.out(&format!("mapping: {}", action.describe()));

        for order in self.args.order.fold_orders() {
            let e = Experiment::new(action, order, policy);
            let res = e.run(&word, &reference, &mut rng);
            self.out("");
            self.out(&res.to_string());
        }

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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitehead() {
        let args = Args {
            word: "abABAbab".to_string(),
            policy: Policy::Laurent,
            ..Default::default()
        };
        let out = dispatch(&args).unwrap();
        assert!(out.contains("found (laurent)"));
    }

    #[test]
    fn whitehead_simple_pole() {
        let args = Args {
            word: "abABAbab".to_string(),
            policy: Policy::SimplePole,
            pole_var: 1,
            ..Default::default()
        };
        let out = dispatch(&args).unwrap();
        assert!(out.contains("found (simple-pole(t₁))"));
    }

    #[test]
    fn borromean() {
        let args = Args {
            word: "abCBcACbcB".to_string(),
            order: Order::Canonical,
            ..Default::default()
        };
        let res = dispatch(&args);
        assert!(res.is_ok());
    }

    #[test]
    fn hopf() {
        let args = Args {
            word: "abAB".to_string(),
            ..Default::default()
        };
        let out = dispatch(&args).unwrap();
        assert!(out.contains("not found (polynomial)"));
    }
}

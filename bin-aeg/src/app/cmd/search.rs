use aeg_knot::{collect_distinct, KnotSearch};
use crate::app::err::*;
use crate::app::utils::*;
use super::knot::{KnotOpts, KnotRunner};

pub fn dispatch(args: &Args) -> Result<String, Box<dyn std::error::Error>> {
    App::new(args.clone()).run()
}

#[derive(Clone, Debug, clap::Args)]
pub struct Args {
    pub name: String,

    #[arg(short, long, default_value = "10")]
    pub count: usize,

    #[arg(short, long, default_value = "reverse")]
    pub order: Order,

    #[arg(short, long, default_value = "roles")]
    pub normalize: Norm,

    #[arg(long, default_value_t = KnotSearch::DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: usize,

    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long, default_value = "0")]
    pub log: u8,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            name: String::new(),
            count: 10,
            order: Order::default(),
            normalize: Norm::default(),
            max_attempts: KnotSearch::DEFAULT_MAX_ATTEMPTS,
            seed: None,
            log: 0,
        }
    }
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
        let name = parse_knot(&self.args.name)?;
        ensure!(self.args.count > 0, "count must be positive.");

        let oracle = load_oracle(self.args.seed)?;
        let normalize = self.args.normalize.into();
        let found = collect_distinct(&oracle, &name, self.args.count, self.args.max_attempts, normalize)?;

        let opts = KnotOpts {
            order: self.args.order,
            normalize: self.args.normalize,
            max_attempts: self.args.max_attempts,
            seed: self.args.seed,
            ..Default::default()
        };
        let mut runner = KnotRunner::new(&oracle, &opts);

        for pres in found.iter() {
            runner.report(pres, &mut self.buff);
        }

        self.buff.push_str(&format!("{name}: {} distinct presentations (requested {})", found.len(), self.args.count));

        Ok(self.flush())
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
    fn distinct() {
        let args = Args {
            name: "5_2".to_string(),
            count: 3,
            seed: Some(0),
            ..Default::default()
        };
        let out = dispatch(&args).unwrap();
        assert!(out.ends_with("5_2: 3 distinct presentations (requested 3)"));
        assert_eq!(out.matches("knot: 5_2").count(), 3);
    }

    #[test]
    fn unknown() {
        let args = Args {
            name: "9_1".to_string(),
            ..Default::default()
        };
        assert!(dispatch(&args).is_err());
    }

    #[test]
    fn zero_count() {
        let args = Args {
            name: "3_1".to_string(),
            count: 0,
            ..Default::default()
        };
        assert!(dispatch(&args).is_err());
    }
}

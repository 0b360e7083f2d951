use log::debug;
use aeg_knot::rolfsen_names;
use crate::app::utils::*;
use super::knot::{KnotOpts, KnotRunner, KnotStatus};

pub fn dispatch(args: &Args) -> Result<String, Box<dyn std::error::Error>> {
    App::new(args.clone()).run()
}

#[derive(Clone, Debug, clap::Args)]
pub struct Args {
    #[arg(short, long, default_value = "8")]
    pub max_crossings: usize,

    #[command(flatten)]
    pub opts: KnotOpts,
}

impl Default for Args {
    fn default() -> Self {
        Self { max_crossings: 8, opts: KnotOpts::default() }
    }
}

#[derive(Clone, Copy, Default, Debug)]
struct Summary {
    total: usize,
    reported: usize,
    filtered: usize,
    exhausted: usize,
    unavailable: usize,
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
        let oracle = load_oracle(self.args.opts.seed)?;
        let mut runner = KnotRunner::new(&oracle, &self.args.opts);
        let mut summary = Summary::default();

        for name in rolfsen_names(self.args.max_crossings) {
            let mut out = String::new();
            let status = runner.run(&name, &mut out);

            summary.total += 1;
            match status {
                KnotStatus::Reported    => summary.reported += 1,
                KnotStatus::Filtered    => summary.filtered += 1,
                KnotStatus::Exhausted   => summary.exhausted += 1,
                KnotStatus::Unavailable => summary.unavailable += 1,
            }

            if status == KnotStatus::Unavailable {
                debug!("{}", out.trim());
            } else {
                self.buff.push_str(&out);
            }
        }

        let Summary { total, reported, filtered, exhausted, unavailable } = summary;
        self.buff.push_str(&format!(
            "knots: {total}, reported: {reported}, filtered: {filtered}, exhausted: {exhausted}, unavailable: {unavailable}"
        ));

        Ok(self.flush())
    }

    fn flush(&mut self) -> String {
        let res = std::mem::take(&mut self.buff);
        res.trim().to_string()
    }
}

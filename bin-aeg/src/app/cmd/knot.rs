use log::info;
use rand::rngs::StdRng;
use aeg_alg::factor;
use aeg_core::{Affine, FoldOrder};
use aeg_core::eval::evaluate;
use aeg_core::torsion::{contains_factors, torsion, try_factor_out};
use aeg_knot::{fetch_presentation, FetchOutcome, KnotName, KnotSearch, Presentation, TwoBridgeOracle};
use crate::app::utils::*;

pub fn dispatch(args: &Args) -> Result<String, Box<dyn std::error::Error>> {
    App::new(args.clone()).run()
}

/// Options shared by the knot drivers.
#[derive(Clone, Debug, clap::Args)]
pub struct KnotOpts {
    #[arg(short, long, default_value = "reverse")]
    pub order: Order,

    #[arg(short, long, default_value = "roles")]
    pub normalize: Norm,

    #[arg(long, default_value_t = KnotSearch::DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: usize,

    #[arg(long)]
    pub seed: Option<u64>,

    /// Only report knots whose forward evaluation contains every Alexander factor.
    #[arg(short, long)]
    pub alexander_filter: bool,

    #[arg(short, long, default_value = "none")]
    pub reference: Reference,

    #[arg(short, long, default_value = "polynomial")]
    pub policy: Policy,

    #[arg(long, default_value = "0")]
    pub pole_var: usize,

    #[arg(long, default_value = "0")]
    pub log: u8,
}

impl Default for KnotOpts {
    fn default() -> Self {
        Self {
            order: Order::default(),
            normalize: Norm::default(),
            max_attempts: KnotSearch::DEFAULT_MAX_ATTEMPTS,
            seed: None,
            alexander_filter: false,
            reference: Reference::default(),
            policy: Policy::default(),
            pole_var: 0,
            log: 0,
        }
    }
}

#[derive(Clone, Default, Debug, clap::Args)]
pub struct Args {
    #[arg(required = true)]
    pub names: Vec<String>,

    #[command(flatten)]
    pub opts: KnotOpts,
}

/// What became of one knot.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum KnotStatus {
    Reported,
    Filtered,
    Exhausted,
    Unavailable,
}

/// Fetches a presentation of one knot and reports its evaluations.
/// Oracle failures are reported, never returned.
pub struct KnotRunner<'a> {
    oracle: &'a TwoBridgeOracle,
    opts: &'a KnotOpts,
    rng: StdRng,
}

impl<'a> KnotRunner<'a> {
    pub fn new(oracle: &'a TwoBridgeOracle, opts: &'a KnotOpts) -> Self {
        let rng = make_rng(opts.seed);
        Self { oracle, opts, rng }
    }

    pub fn run(&mut self, name: &KnotName, buff: &mut String) -> KnotStatus {
        let mut search = KnotSearch::new(self.opts.max_attempts);
        let normalize = self.opts.normalize.into();

        match fetch_presentation(self.oracle, name, &mut search, normalize) {
            Ok(FetchOutcome::Found(p)) => self.report(&p, buff),
            Ok(FetchOutcome::Exhausted) => {
                info!("{name}: skipped");
                push(buff, &format!("{name}: no balanced presentation in {} attempts\n", search.attempts()));
                KnotStatus::Exhausted
            },
            Err(e) => {
                push(buff, &format!("{name}: {e}\n"));
                KnotStatus::Unavailable
            }
        }
    }

    pub fn report(&mut self, pres: &Presentation, buff: &mut String) -> KnotStatus {
        let action = Affine::new(pres.roles.clone());
        let p = evaluate(&pres.relator, &action, FoldOrder::Forward, &mut self.rng);

        if self.opts.alexander_filter && !contains_factors(&p, &pres.alexander) {
            info!("{}: p does not contain the Alexander factors", pres.name);
            return KnotStatus::Filtered
        }

        push(buff, &pres.to_string());
        push(buff, &format!("p: {p}"));
        push(buff, &format!("p factors: {}", factor(&p)));

        for order in self.opts.order.fold_orders() {
            let q = evaluate(&pres.relator, &action, order, &mut self.rng);
            let tau = torsion(&p, &q);

            push(buff, &format!("q ({order}): {q}"));

            match self.opts.reference {
                Reference::None => {
                    push(buff, &format!("torsion ({order}): {tau}"));
                    push(buff, &format!("factors ({order}): {}", factor(&tau)));
                },
                Reference::Alexander => {
                    let policy = self.opts.policy.with_pole(self.opts.pole_var);
                    let report = try_factor_out(&tau, &pres.alexander, policy);
                    push(buff, &report.to_string());
                }
            }
        }

        buff.push('\n');
        KnotStatus::Reported
    }
}

fn push(buff: &mut String, str: &str) {
    buff.push_str(str);
    if !str.ends_with('\n') {
        buff.push('\n');
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
        let names = self.args.names.iter().map(|s| parse_knot(s)).collect::<Result<Vec<_>, _>>()?;
        let oracle = load_oracle(self.args.opts.seed)?;
        let mut runner = KnotRunner::new(&oracle, &self.args.opts);

        for name in names.iter() {
            runner.run(name, &mut self.buff);
        }

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

    fn args(names: &[&str], opts: KnotOpts) -> Args {
        Args {
            names: names.iter().map(|s| s.to_string()).collect(),
            opts,
        }
    }

    #[test]
    fn figure_eight() {
        let args = args(&["4_1"], KnotOpts { seed: Some(0), ..Default::default() });
        let out = dispatch(&args).unwrap();
        assert!(out.contains("knot: 4_1"));
        assert!(out.contains("alexander: t² - 3t + 1"));
    }

    #[test]
    fn canonical_with_reference() {
        let args = args(&["3_1", "5_2"], KnotOpts {
            order: Order::Canonical,
            reference: Reference::Alexander,
            policy: Policy::Laurent,
            seed: Some(1),
            ..Default::default()
        });
        let out = dispatch(&args).unwrap();
        assert!(out.contains("q (A→M)"));
        assert!(out.contains("q (M→A)"));
    }

    #[test]
    fn unknown_is_reported() {
        let args = args(&["3_1", "9_42"], KnotOpts { seed: Some(2), ..Default::default() });
        let out = dispatch(&args).unwrap();
        assert!(out.contains("9_42: unknown knot: 9_42"));
    }

    #[test]
    fn exhausted_is_reported() {
        let args = args(&["6_1"], KnotOpts { max_attempts: 0, ..Default::default() });
        let out = dispatch(&args).unwrap();
        assert_eq!(out, "6_1: no balanced presentation in 0 attempts");
    }

    #[test]
    fn invalid_name() {
        let args = args(&["4-1"], KnotOpts::default());
        assert!(dispatch(&args).is_err());
    }

    #[test]
    fn filter() {
        let args = args(&["3_1", "4_1", "5_1"], KnotOpts {
            alexander_filter: true,
            normalize: Norm::Relabel,
            seed: Some(3),
            ..Default::default()
        });
        assert!(dispatch(&args).is_ok());
    }
}

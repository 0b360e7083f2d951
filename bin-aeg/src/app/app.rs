use log::info;
use clap::{Parser, Subcommand};
use aeg_alg::util::log::{init_simple_logger, level_filter};

use super::cmd::{dual, eval, knot, link, search, table};
use super::utils::*;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Cmd
}

#[derive(Subcommand, Debug)]
#[clap(rename_all="lower")]
pub enum Cmd {
    Eval(eval::Args),
    Link(link::Args),
    Dual(dual::Args),
    Knot(knot::Args),
    Table(table::Args),
    Search(search::Args),
}

impl CliArgs {
    fn log_level(&self) -> log::LevelFilter {
        let level = match &self.command {
            Cmd::Eval(args)   => args.log,
            Cmd::Link(args)   => args.log,
            Cmd::Dual(args)   => args.log,
            Cmd::Knot(args)   => args.opts.log,
            Cmd::Table(args)  => args.opts.log,
            Cmd::Search(args) => args.log,
        };
        level_filter(level)
    }
}

pub struct App {
    pub args: CliArgs
}

impl App {
    pub fn new() -> Self {
        let args = CliArgs::parse();
        App { args }
    }

    pub fn run(&self) -> Result<String, Box<dyn std::error::Error>> {
        self.init_logger()?;

        info!("args: {:?}", self.args);

        let (res, time) = measure(||
            self.dispatch()
        );

        info!("time: {:?}", time);

        res
    }

    fn init_logger(&self) -> Result<(), Box<dyn std::error::Error>> {
        let l = self.args.log_level();
        init_simple_logger(l)?;
        Ok(())
    }

    fn dispatch(&self) -> Result<String, Box<dyn std::error::Error>> {
        guard_panic(||
            match &self.args.command {
                Cmd::Eval(args)   => eval::dispatch(args),
                Cmd::Link(args)   => link::dispatch(args),
                Cmd::Dual(args)   => dual::dispatch(args),
                Cmd::Knot(args)   => knot::dispatch(args),
                Cmd::Table(args)  => table::dispatch(args),
                Cmd::Search(args) => search::dispatch(args),
            }
        )
    }
}

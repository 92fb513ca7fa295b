#![deny(unsafe_code)]
pub mod commands;
mod materialize;
mod oracle;

use anyhow::Result;
use clap::Parser;
use commands::command::Command;
use commands::estimate::Estimate;
use commands::sort::Sort;
use commands::status::Status;
use enum_dispatch::enum_dispatch;
use env_logger::Env;
use log::debug;

#[derive(Parser, Debug)]
#[command(version, about = "Rank files by answering one pairwise question at a time")]
struct Args {
    #[command(subcommand)]
    subcommand: Subcommand,
}

#[enum_dispatch(Command)]
#[derive(Parser, Debug)]
enum Subcommand {
    #[command(display_order = 1)]
    Sort(Sort),
    #[command(display_order = 2)]
    Status(Status),
    #[command(display_order = 3)]
    Estimate(Estimate),
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    debug!("running monkeysort {}", env!("CARGO_PKG_VERSION"));

    args.subcommand.execute()
}

///
/// TESTS
///

//! Estimate how many questions a sort of `N` items will ask.

use anyhow::Result;
use clap::Parser;
use log::debug;
use monkeysort_core::obs::estimate_questions;

use crate::commands::command::Command;

/// Simulate a sort over pseudo-random keys and count distinct questions.
#[derive(Debug, Parser)]
#[command(
    name = "estimate",
    about = "Estimate how many questions ranking N files takes"
)]
pub struct Estimate {
    /// Number of items to simulate.
    #[arg(short = 'n', long = "count")]
    pub count: usize,

    /// Seed for the simulated keys.
    #[arg(long = "seed", default_value = "0")]
    pub seed: u64,

    /// Print the estimate as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

impl Command for Estimate {
    fn execute(&self) -> Result<()> {
        debug!("simulating {} items with seed {}", self.count, self.seed);
        let estimate = estimate_questions(self.count, self.seed)?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&estimate)?);
        } else {
            println!(
                "{} items: {} questions simulated (seed {}), {} worst case",
                estimate.elements, estimate.simulated, self.seed, estimate.worst_case
            );
        }

        Ok(())
    }
}

//! Magnitude response table.

#![allow(clippy::print_literal)] // Table headers use literal strings intentionally

use std::sync::Arc;

use clap::Args;
use jeq_core::{ChainPosition, DEFAULT_BLOCK_SIZE, EqualizerEngine, linear_to_db};

use super::common::{EqArgs, log_frequencies};

/// Lowest frequency in the table.
const START_HZ: f32 = 20.0;

/// Highest frequency in the table, before the Nyquist limit.
const END_HZ: f32 = 20000.0;

#[derive(Args)]
pub struct ResponseArgs {
    #[command(flatten)]
    eq: EqArgs,

    /// Sample rate the filters are designed for
    #[arg(long, default_value = "48000")]
    sample_rate: f32,

    /// Number of log-spaced frequency points
    #[arg(long, default_value = "31")]
    points: usize,
}

pub fn run(args: ResponseArgs) -> anyhow::Result<()> {
    if args.points < 2 {
        anyhow::bail!("--points must be at least 2");
    }

    let params = args.eq.build_params()?;
    let mut engine = EqualizerEngine::new(Arc::clone(&params));
    engine.prepare(args.sample_rate, DEFAULT_BLOCK_SIZE)?;

    let end = END_HZ.min(args.sample_rate * 0.5);
    let chain = engine.left();

    println!("Magnitude response at {} Hz", args.sample_rate);
    println!();
    println!(
        "  {:>10}  {:>9}  {:>9}  {:>9}  {:>9}",
        "Freq (Hz)", "Low cut", "Peak", "High cut", "Total"
    );
    println!(
        "  {:>10}  {:>9}  {:>9}  {:>9}  {:>9}",
        "---------", "-------", "----", "--------", "-----"
    );

    for freq in log_frequencies(START_HZ, end, args.points) {
        let [low, peak, high] = ChainPosition::ALL
            .map(|p| linear_to_db(chain.position_magnitude_at(p, freq, args.sample_rate)));
        println!(
            "  {:>10.1}  {:>9.2}  {:>9.2}  {:>9.2}  {:>9.2}",
            freq,
            low,
            peak,
            high,
            engine.magnitude_db_at(freq)
        );
    }

    Ok(())
}

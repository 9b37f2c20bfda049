//! File-based equalizer processing command.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use jeq_core::EqualizerEngine;
use jeq_io::{SignalStats, WavSpec, read_wav_stereo, render_offline_with_progress, write_wav_stereo};

use super::common::EqArgs;

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    #[command(flatten)]
    eq: EqArgs,

    /// Processing block size
    #[arg(long, default_value = "512")]
    block_size: usize,

    /// Output bit depth (16, 24, or 32). Defaults to the input's depth.
    #[arg(long)]
    bit_depth: Option<u16>,
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    println!("Reading {}...", args.input.display());
    let (input, spec) = read_wav_stereo(&args.input)?;
    let sample_rate = spec.sample_rate as f32;

    println!(
        "  {} frames, {} Hz, {} ch, {:.2}s",
        input.len(),
        spec.sample_rate,
        spec.channels,
        input.len() as f32 / sample_rate
    );

    let params = args.eq.build_params()?;
    let mut engine = EqualizerEngine::new(Arc::clone(&params));
    engine.prepare(sample_rate, args.block_size)?;

    let settings = engine.settings();
    println!(
        "Low cut {:.1} Hz @ {} dB/oct | Peak {:.1} Hz {:+.1} dB Q {:.2} | High cut {:.1} Hz @ {} dB/oct",
        settings.low_cut_freq,
        settings.low_cut_slope.db_per_octave(),
        settings.peak_freq,
        settings.peak_gain_db,
        settings.peak_quality,
        settings.high_cut_freq,
        settings.high_cut_slope.db_per_octave(),
    );

    let pb = ProgressBar::new(input.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("##-"),
    );

    let output = render_offline_with_progress(&mut engine, &input, args.block_size, |frames| {
        pb.inc(frames as u64);
    })?;
    pb.finish_with_message("done");

    let input_stats = SignalStats::measure(&input);
    let output_stats = SignalStats::measure(&output);

    println!("\nStats:");
    println!(
        "  Input:  RMS {:.1} dB, Peak {:.1} dB",
        input_stats.rms_db(),
        input_stats.peak_db()
    );
    println!(
        "  Output: RMS {:.1} dB, Peak {:.1} dB",
        output_stats.rms_db(),
        output_stats.peak_db()
    );

    let bits_per_sample = args.bit_depth.unwrap_or(match spec.bits_per_sample {
        bits @ (16 | 24 | 32) => bits,
        _ => 32,
    });
    let out_spec = WavSpec {
        channels: 2,
        sample_rate: spec.sample_rate,
        bits_per_sample,
    };

    println!("\nWriting {}...", args.output.display());
    write_wav_stereo(&args.output, &output, out_spec)?;
    println!("Done!");

    Ok(())
}

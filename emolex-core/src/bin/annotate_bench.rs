//! Review Annotation Benchmarking Tool
//!
//! Measures how fast the full pipeline annotates a file of review texts,
//! one review per line. Useful for sizing batch runs and for spotting
//! lexicons whose patterns are unexpectedly slow.
//!
//! ## Usage
//!
//! ```bash
//! # Annotate every line of reviews.txt with the resources named in config.json
//! ./target/release/annotate_bench config.json reviews.txt
//!
//! # Show lexicon/profile loading details
//! RUST_LOG=debug ./target/release/annotate_bench config.json reviews.txt
//! ```
//!
//! ## Output
//!
//! ```text
//! --------------------------------
//! Blocks      : 120_000
//! Elapsed     : 0.845 s
//! Throughput  : 21.40 MiB/s
//! Blocks/sec  : 142_011
//! With emoji  : 35_118
//! With emotic.: 9_204
//! Undetermined: 1_302
//! --------------------------------
//! ```
//!
//! Run with `--release`; debug builds are an order of magnitude slower.

use std::env;
use std::fs;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use emolex_core::{BlockAnnotation, PipelineConfig, ReviewAnnotationPipeline};
use tracing_subscriber::EnvFilter;

const WARMUP_RUNS: usize = 1;
const MEASURE_RUNS: usize = 5;

#[derive(Default)]
struct Totals {
    blocks: u64,
    with_emoji: u64,
    with_emoticons: u64,
    undetermined: u64,
}

impl Totals {
    fn add(&mut self, block: &BlockAnnotation) {
        self.blocks += 1;
        self.with_emoji += u64::from(!block.emoji_symbols.is_empty());
        self.with_emoticons += u64::from(!block.emoticon_symbols.is_empty());
        self.undetermined += u64::from(block.language_code == emolex_types::UNDETERMINED_LANGUAGE);
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: annotate_bench <config.json> <reviews.txt>");
        return ExitCode::FAILURE;
    }

    let pipeline = match PipelineConfig::from_file(&args[1])
        .and_then(|config| ReviewAnnotationPipeline::from_config(&config))
    {
        Ok(pipeline) => pipeline,
        Err(e) => {
            tracing::error!(error = %e, "cannot build pipeline");
            return ExitCode::FAILURE;
        }
    };

    let input = match fs::read_to_string(&args[2]) {
        Ok(input) => input,
        Err(e) => {
            tracing::error!(error = %e, path = %args[2], "cannot read input");
            return ExitCode::FAILURE;
        }
    };
    let lines: Vec<&str> = input.lines().filter(|l| !l.trim().is_empty()).collect();

    println!("Input size : {}", fmt_bytes(input.len() as u64));
    println!("Emoji      : {} entries", pipeline.emoji_lexicon().len());
    println!("Emoticons  : {} entries\n", pipeline.emoticon_lexicon().len());

    let run = |totals: &mut Totals| {
        for line in &lines {
            let block = pipeline.annotate_review_text(line);
            totals.add(&block);
            std::hint::black_box(block);
        }
    };

    for _ in 0..WARMUP_RUNS {
        run(&mut Totals::default());
    }

    let mut totals = Totals::default();
    let mut elapsed = Duration::ZERO;
    for _ in 0..MEASURE_RUNS {
        totals = Totals::default();
        let start = Instant::now();
        run(&mut totals);
        elapsed += start.elapsed();
    }
    elapsed /= MEASURE_RUNS as u32;

    print_perf(input.len(), elapsed, &totals);
    ExitCode::SUCCESS
}

fn print_perf(input_bytes: usize, elapsed: Duration, totals: &Totals) {
    let secs = elapsed.as_secs_f64().max(f64::MIN_POSITIVE);
    let mib = input_bytes as f64 / (1024.0 * 1024.0);

    println!("--------------------------------");
    println!("Blocks      : {}", fmt_count(totals.blocks));
    println!("Elapsed     : {:.3} s", secs);
    println!("Throughput  : {:.2} MiB/s", mib / secs);
    println!("Blocks/sec  : {}", fmt_count((totals.blocks as f64 / secs) as u64));
    println!("With emoji  : {}", fmt_count(totals.with_emoji));
    println!("With emotic.: {}", fmt_count(totals.with_emoticons));
    println!("Undetermined: {}", fmt_count(totals.undetermined));
    println!("--------------------------------");
}

fn fmt_bytes(b: u64) -> String {
    if b >= 1024 * 1024 {
        format!("{:.2} MiB", b as f64 / (1024.0 * 1024.0))
    } else if b >= 1024 {
        format!("{:.2} KiB", b as f64 / 1024.0)
    } else {
        format!("{} B", b)
    }
}

fn fmt_count(n: u64) -> String {
    let s = n.to_string();
    let mut out = String::with_capacity(s.len() + s.len() / 3);

    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push('_');
        }
        out.push(ch);
    }

    out.chars().rev().collect()
}

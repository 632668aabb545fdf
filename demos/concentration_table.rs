//! Concentration Table
//!
//! Runs the default configuration and prints one row per dimension:
//! measured spread of cosine distances next to the `1/√d` prediction.
//!
//! ```bash
//! RUST_LOG=concentration=debug cargo run --example concentration_table --release
//! ```
//!
//! Pass a seed as the first argument for a reproducible table.

use concentration::{CancellationToken, SimulationConfig};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = SimulationConfig::default();
    let token = CancellationToken::new();
    let mut last_percent = 0;
    let progress = |p: concentration::Progress| {
        let percent = (p.fraction_complete * 100.0) as u32;
        if percent >= last_percent + 10 {
            last_percent = percent;
            eprintln!("{:>3}% (dimension {})", percent, p.current_dimension);
        }
    };

    let outcome = match std::env::args().nth(1).map(|s| s.parse::<u64>()) {
        Some(Ok(seed)) => config.run_seeded(seed, progress, &token),
        Some(Err(e)) => {
            eprintln!("seed must be an unsigned integer: {}", e);
            std::process::exit(2);
        }
        None => config.run_entropy(progress, &token),
    };

    let result = match outcome {
        Ok(result) => result,
        Err(e) => {
            eprintln!("no data: {}", e);
            std::process::exit(1);
        }
    };

    println!(
        "{:>6} {:>7} {:>9} {:>9} {:>9} {:>9} {:>9} {:>7}",
        "dim", "n", "mean", "std", "1/√d", "ratio", "norm std", "err %"
    );
    for rec in result.records() {
        println!(
            "{:>6} {:>7} {:>9.5} {:>9.5} {:>9.5} {:>9.4} {:>9.4} {:>7.2}",
            rec.dimension,
            rec.sample_count,
            rec.original_mean,
            rec.original_std,
            rec.theoretical_std,
            rec.ratio,
            rec.normalized_std,
            rec.relative_error() * 100.0
        );
    }
}

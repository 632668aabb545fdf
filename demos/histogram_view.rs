//! Histogram View
//!
//! Samples a few dimensions once, then redraws density histograms of the
//! raw and normalized distances from the retained samples.
//!
//! ```bash
//! cargo run --example histogram_view --release
//! ```

use concentration::{
    CancellationToken, DistanceKind, SimulationConfig, TieredSampleSize,
};

const BAR_WIDTH: f64 = 60.0;

fn main() {
    tracing_subscriber::fmt().init();

    let config = SimulationConfig::default()
        .with_dimensions(vec![2, 16, 256])
        .with_sample_size(TieredSampleSize::new(Vec::new(), 20_000));

    let result = match config.run_seeded(42, |_| {}, &CancellationToken::new()) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("no data: {}", e);
            std::process::exit(1);
        }
    };

    for kind in [DistanceKind::Original, DistanceKind::Normalized] {
        let view = config.view(kind);
        let histograms = match result.histograms(result.dimensions(), kind, view) {
            Ok(h) => h,
            Err(e) => {
                eprintln!("cannot bin {:?} distances: {}", kind, e);
                std::process::exit(1);
            }
        };

        for (dimension, bins) in histograms {
            println!("\n{:?} distances, d = {}", kind, dimension);
            let peak = bins.iter().map(|b| b.density).fold(0.0_f64, f64::max);
            for bin in bins {
                let len = if peak > 0.0 {
                    (bin.density / peak * BAR_WIDTH).round() as usize
                } else {
                    0
                };
                println!("{:>7.3} | {}", bin.x, "#".repeat(len));
            }
        }
    }
}

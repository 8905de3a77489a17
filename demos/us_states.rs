//! Rank-frequency table for the "Name a US state" prompt.
//!
//! Loads the US-states fixture, ranks states by their pretraining frequency, and prints
//! the reference, direct-prompting, and verbalized-sampling probabilities side by side,
//! followed by each method's KL divergence from the reference.
//!
//! Run: cargo run --example us_states [path/to/fixture.json]

use vsdist::{load_fixture_or_none, DistributionFixture};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter("vsdist=debug")
        .init();

    let path = std::env::args().nth(1).unwrap_or_else(|| {
        concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/us-states.json").to_string()
    });

    let Some(fixture) = load_fixture_or_none::<DistributionFixture>(&path) else {
        eprintln!("no fixture at {path}");
        std::process::exit(1);
    };

    println!(
        "{:<5} {:<16} {:>4} {:>10} {:>10} {:>10}",
        "rank", "state", "code", "reference", "direct", "vs"
    );
    println!("{}", "-".repeat(60));

    for row in fixture.rank_frequency() {
        println!(
            "{:<5} {:<16} {:>4} {:>10.4} {:>10.4} {:>10.4}",
            row.rank, row.state_name, row.state_code, row.reference, row.direct, row.vs
        );
    }

    let stored = fixture.kl_divergence;
    let recomputed = fixture.recompute_kl();

    println!();
    println!("KL from reference (nats)   stored   recomputed");
    println!("  direct                 {:>8.3}   {:>10.3}", stored.direct, recomputed.direct);
    println!("  vs                     {:>8.3}   {:>10.3}", stored.vs, recomputed.vs);
}

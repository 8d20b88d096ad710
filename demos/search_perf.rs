//! Quick search performance test

use std::time::Instant;

use evocrack::schema::{HandshakeDescriptor, SearchConfig};
use evocrack::search::SearchEngine;

fn main() {
    println!("=== Search Performance Test ===\n");

    // The target passphrase sits outside the default charset, so every run
    // exhausts its full generation budget.
    let descriptor = HandshakeDescriptor::synthesize(
        "S3cret-Pass!",
        b"PerfNetwork",
        [0x00, 0x11, 0x22, 0x33, 0x44, 0x55],
        [0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff],
        [0x01; 32],
        [0x02; 32],
        vec![0x02; 121],
    )
    .expect("synthetic handshake inputs are valid");

    for population_size in [8, 16, 32, 64] {
        let config = SearchConfig {
            population_size,
            password_length: 8,
            generations: 3,
            random_seed: Some(42),
            ..Default::default()
        };

        let start = Instant::now();
        let mut engine =
            SearchEngine::new(config, descriptor.clone()).expect("perf config is valid");
        let outcome = engine.run();
        let elapsed = start.elapsed();

        println!(
            "Population {:>3}: {:>4} evals in {:.2}s ({:.1} evals/sec), best {}/128",
            population_size,
            outcome.stats.total_evaluations,
            elapsed.as_secs_f64(),
            outcome.stats.total_evaluations as f64 / elapsed.as_secs_f64(),
            outcome.stats.best_fitness
        );
    }

    println!("\n=== Candidate Length Sweep (population 16) ===\n");

    // Throughput is dominated by the master-key derivation, so it should be
    // flat across candidate lengths.
    for password_length in [6, 8, 12, 16] {
        let config = SearchConfig {
            population_size: 16,
            password_length,
            generations: 2,
            random_seed: Some(42),
            ..Default::default()
        };

        let start = Instant::now();
        let mut engine =
            SearchEngine::new(config, descriptor.clone()).expect("perf config is valid");
        let outcome = engine.run();
        let elapsed = start.elapsed();

        println!(
            "Length {:>2}: {:>4} evals in {:.2}s ({:.1} evals/sec)",
            password_length,
            outcome.stats.total_evaluations,
            elapsed.as_secs_f64(),
            outcome.stats.total_evaluations as f64 / elapsed.as_secs_f64()
        );
    }
}

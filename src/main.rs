//! Evocrack CLI - Run an evolutionary passphrase search from JSON inputs.

use std::fs;
use std::path::PathBuf;

use evocrack::schema::{HandshakeDescriptor, SearchConfig, format_mac};
use evocrack::search::{PERFECT_SCORE, SearchEngine, StopReason};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <handshake.json> [config.json]", args[0]);
        eprintln!();
        eprintln!("Search for a WPA2 passphrase with an evolutionary algorithm.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  handshake.json  Path to an extracted handshake descriptor");
        eprintln!("  config.json     Search configuration (defaults used if omitted)");
        eprintln!();
        eprintln!("Example inputs are generated with the --example flag.");

        std::process::exit(1);
    }

    if args[1] == "--example" {
        print_example_inputs();
        return;
    }

    let handshake_path = PathBuf::from(&args[1]);
    let descriptor = HandshakeDescriptor::load_from_file(&handshake_path).unwrap_or_else(|e| {
        eprintln!("Error loading handshake: {}", e);
        std::process::exit(1);
    });

    let config: SearchConfig = match args.get(2) {
        Some(path) => {
            let config_str = fs::read_to_string(path).unwrap_or_else(|e| {
                eprintln!("Error reading config file: {}", e);
                std::process::exit(1);
            });
            serde_json::from_str(&config_str).unwrap_or_else(|e| {
                eprintln!("Error parsing config: {}", e);
                std::process::exit(1);
            })
        }
        None => SearchConfig::default(),
    };

    println!("Evocrack Passphrase Search");
    println!("==========================");
    println!(
        "Population: {} x length {} over {} characters",
        config.population_size,
        config.password_length,
        config.charset_chars().len()
    );
    println!(
        "Generations: {} (mutation {}, elites {}, tournament {})",
        config.generations, config.mutation_rate, config.elite_size, config.tournament_size
    );

    let mut engine = SearchEngine::new(config, descriptor).unwrap_or_else(|e| {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(1);
    });

    let target = engine.descriptor();
    println!("SSID: {}", target.ssid_lossy());
    println!(
        "AP: {}  Client: {}",
        format_mac(&target.ap_mac),
        format_mac(&target.client_mac)
    );
    println!("EAPOL frame: {} bytes", target.eapol_frame.len());
    println!();

    println!("Running search...");
    let outcome = engine.run_with_callback(|progress| {
        println!(
            "  Generation {}: best {}/{} bits, best so far {}/{} ({})",
            progress.generation,
            progress.generation_best,
            PERFECT_SCORE,
            progress.best_fitness,
            PERFECT_SCORE,
            progress.best_passphrase
        );
    });

    println!();
    match outcome.stats.stop_reason {
        StopReason::MicMatch => {
            println!("Exact tag match found!");
            println!("Passphrase: {}", outcome.best.passphrase);
        }
        StopReason::MaxGenerations => {
            println!("Generation budget exhausted; best-effort result:");
            println!(
                "  {} ({}/{} bits, first seen in generation {})",
                outcome.best.passphrase,
                outcome.best.fitness,
                PERFECT_SCORE,
                outcome.best.generation
            );
        }
        StopReason::Cancelled => {
            println!("Search cancelled; best candidate so far:");
            println!(
                "  {} ({}/{} bits)",
                outcome.best.passphrase, outcome.best.fitness, PERFECT_SCORE
            );
        }
    }
    println!();
    println!(
        "Time: {:.2}s ({} evaluations, {:.1} candidates/s)",
        outcome.stats.elapsed_seconds,
        outcome.stats.total_evaluations,
        outcome.stats.evaluations_per_second
    );
}

fn print_example_inputs() {
    let config = SearchConfig::default();
    let descriptor = HandshakeDescriptor::synthesize(
        "testpass",
        b"TestNetwork",
        [0x00, 0x11, 0x22, 0x33, 0x44, 0x55],
        [0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff],
        [0x10; 32],
        [0x20; 32],
        vec![0x02; 121],
    )
    .unwrap();

    println!("Example search configuration (config.json):");
    println!("{}", serde_json::to_string_pretty(&config).unwrap());
    println!();
    println!("Example handshake input (handshake.json), passphrase \"testpass\":");
    println!("{}", serde_json::to_string_pretty(&descriptor).unwrap());
}

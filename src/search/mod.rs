//! Evolutionary search module for recovering WPA2 passphrases.
//!
//! This module couples a genetic algorithm over fixed-length candidate
//! strings to a fitness function that replays the WPA2 key-derivation chain
//! against a captured handshake.
//!
//! # Overview
//!
//! The search system consists of:
//!
//! - **Fitness** (`fitness`): scoring candidates by bitwise tag similarity
//! - **Operators** (`operators`): initialization, selection, crossover,
//!   mutation, and elitism
//! - **Engine** (`engine`): the generational loop, termination logic, and
//!   result types
//!
//! # Example
//!
//! ```rust,no_run
//! use evocrack::schema::{HandshakeDescriptor, SearchConfig};
//! use evocrack::search::SearchEngine;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Synthesize a handshake whose passphrase is known.
//! let descriptor = HandshakeDescriptor::synthesize(
//!     "testpass",
//!     b"TestNetwork",
//!     [0x00, 0x11, 0x22, 0x33, 0x44, 0x55],
//!     [0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff],
//!     [0x10; 32],
//!     [0x20; 32],
//!     vec![0x02; 121],
//! )?;
//!
//! // Create and run the search engine
//! let mut engine = SearchEngine::new(SearchConfig::default(), descriptor)?;
//! let outcome = engine.run_with_callback(|progress| {
//!     println!(
//!         "Generation {}: best fitness = {}/128",
//!         progress.generation, progress.best_fitness
//!     );
//! });
//!
//! println!("Best candidate: {}", outcome.best.passphrase);
//! println!("Stop reason: {:?}", outcome.stats.stop_reason);
//! # Ok(())
//! # }
//! ```
//!
//! # Caveat
//!
//! The keyed-hash tag is designed so that nearby passphrases produce
//! uncorrelated tags. Partial fitness therefore gives the search no real
//! gradient, and the algorithm has no expected advantage over uniform
//! random sampling. The metric is preserved as the search objective anyway;
//! see the crate-level documentation.

mod engine;
mod fitness;
mod operators;

pub use engine::{
    BestCandidate, Progress, SearchEngine, SearchHistory, SearchOutcome, SearchStats, StopReason,
};
pub use fitness::{EvaluationError, FitnessEvaluator, PERFECT_SCORE, hamming_similarity};
pub use operators::{OperatorError, OperatorRng, elitism};

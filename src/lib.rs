//! Evocrack - Evolutionary WPA2 passphrase search.
//!
//! This crate frames WPA2-PSK passphrase recovery as an evolutionary
//! optimization problem: a genetic algorithm evolves fixed-length candidate
//! passphrases, scoring each by replaying the WPA2 key-derivation chain
//! (PBKDF2 master key, PRF-512 pairwise key, HMAC-SHA1 frame tag) against a
//! captured 4-way handshake and counting the bits its derived tag shares
//! with the captured one.
//!
//! # Architecture
//!
//! The crate is split into three main modules:
//!
//! - `crypto`: the WPA2 key-derivation chain (PBKDF2, PRF-512, HMAC tag)
//! - `schema`: configuration and handshake input types
//! - `search`: fitness evaluation, genetic operators, and the search engine
//!
//! # Example
//!
//! ```rust,no_run
//! use evocrack::schema::{HandshakeDescriptor, SearchConfig};
//! use evocrack::search::{SearchEngine, StopReason};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Load a previously extracted handshake
//! let descriptor =
//!     HandshakeDescriptor::load_from_file(std::path::Path::new("handshake.json"))?;
//!
//! // Configure and run the search
//! let config = SearchConfig {
//!     population_size: 200,
//!     generations: 500,
//!     ..Default::default()
//! };
//! let mut engine = SearchEngine::new(config, descriptor)?;
//! let outcome = engine.run();
//!
//! match outcome.stats.stop_reason {
//!     StopReason::MicMatch => println!("Passphrase: {}", outcome.best.passphrase),
//!     _ => println!("Best effort: {} ({} / 128 bits)",
//!         outcome.best.passphrase, outcome.best.fitness),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # A note on the fitness function
//!
//! Bitwise similarity between HMAC outputs does not correlate with
//! similarity between the passphrases that produced them; the avalanche
//! property of the underlying hash guarantees exactly that. Every wrong
//! candidate scores like an independent random 128-bit draw, so this search
//! has no theoretical edge over uniform random sampling. The fitness
//! function is kept regardless, as the point of the crate is the coupling
//! of the derivation chain to the evolutionary machinery, not a practical
//! recovery speedup.

pub mod crypto;
pub mod schema;
pub mod search;

// Re-export commonly used types
pub use schema::{HandshakeDescriptor, SearchConfig};
pub use search::{SearchEngine, SearchOutcome, StopReason};

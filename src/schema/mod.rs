//! Schema module - Configuration and handshake input types for passphrase searches.

mod config;
mod handshake;

pub use config::*;
pub use handshake::*;

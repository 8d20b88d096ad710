//! Search configuration types.

use serde::{Deserialize, Serialize};

/// Configuration for an evolutionary passphrase search.
///
/// Validated once at engine construction; an invalid bundle is rejected
/// before the initial population is seeded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Characters candidates are drawn from. Treated as a set: duplicate
    /// characters are dropped (first occurrence wins) before sampling, so
    /// sampling stays uniform over the distinct characters.
    #[serde(default = "default_charset")]
    pub charset: String,
    /// Number of candidates per generation.
    #[serde(default = "default_population_size")]
    pub population_size: usize,
    /// Candidate length in characters. Two-point crossover needs at least 3.
    #[serde(default = "default_password_length")]
    pub password_length: usize,
    /// Generation budget: number of generational transitions to run. The
    /// seeded generation 0 is always evaluated, even with a budget of 0.
    #[serde(default = "default_generations")]
    pub generations: usize,
    /// Per-character mutation probability (0.0-1.0).
    #[serde(default = "default_mutation_rate")]
    pub mutation_rate: f64,
    /// Number of best candidates carried into the next generation unchanged.
    #[serde(default = "default_elite_size")]
    pub elite_size: usize,
    /// Tournament size for parent selection.
    #[serde(default = "default_tournament_size")]
    pub tournament_size: usize,
    /// Random seed for reproducibility.
    #[serde(default)]
    pub random_seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            charset: default_charset(),
            population_size: default_population_size(),
            password_length: default_password_length(),
            generations: default_generations(),
            mutation_rate: default_mutation_rate(),
            elite_size: default_elite_size(),
            tournament_size: default_tournament_size(),
            random_seed: None,
        }
    }
}

fn default_charset() -> String {
    "abcdefghijklmnopqrstuvwxyz0123456789".to_string()
}
fn default_population_size() -> usize {
    50
}
fn default_password_length() -> usize {
    8
}
fn default_generations() -> usize {
    100
}
fn default_mutation_rate() -> f64 {
    0.1
}
fn default_elite_size() -> usize {
    2
}
fn default_tournament_size() -> usize {
    3
}

/// Search configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Charset must contain at least one character")]
    EmptyCharset,
    #[error("Population size must be at least 2")]
    PopulationTooSmall,
    #[error("Password length must be at least 3 (required by two-point crossover)")]
    PasswordTooShort,
    #[error("Mutation rate {0} must be within 0.0-1.0")]
    InvalidMutationRate(f64),
    #[error("Elite size {elite_size} exceeds population size {population_size}")]
    EliteSizeTooLarge {
        elite_size: usize,
        population_size: usize,
    },
    #[error("Tournament size {tournament_size} must be between 1 and population size {population_size}")]
    InvalidTournamentSize {
        tournament_size: usize,
        population_size: usize,
    },
    #[error("Seed candidate {0:?} does not match the configured length and charset")]
    InvalidSeedCandidate(String),
    #[error("{given} seed candidates exceed the population size {population_size}")]
    TooManySeedCandidates {
        given: usize,
        population_size: usize,
    },
}

impl SearchConfig {
    /// Validate the configuration bundle.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.charset.chars().next().is_none() {
            return Err(ConfigError::EmptyCharset);
        }
        if self.population_size < 2 {
            return Err(ConfigError::PopulationTooSmall);
        }
        if self.password_length < 3 {
            return Err(ConfigError::PasswordTooShort);
        }
        if !self.mutation_rate.is_finite() || !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(ConfigError::InvalidMutationRate(self.mutation_rate));
        }
        if self.elite_size > self.population_size {
            return Err(ConfigError::EliteSizeTooLarge {
                elite_size: self.elite_size,
                population_size: self.population_size,
            });
        }
        if self.tournament_size == 0 || self.tournament_size > self.population_size {
            return Err(ConfigError::InvalidTournamentSize {
                tournament_size: self.tournament_size,
                population_size: self.population_size,
            });
        }
        Ok(())
    }

    /// The charset as distinct characters, first occurrence first.
    pub fn charset_chars(&self) -> Vec<char> {
        let mut chars: Vec<char> = Vec::new();
        for c in self.charset.chars() {
            if !chars.contains(&c) {
                chars.push(c);
            }
        }
        chars
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        let config = SearchConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_out_of_range_bundles() {
        let ok = SearchConfig::default();

        let empty_charset = SearchConfig {
            charset: String::new(),
            ..ok.clone()
        };
        assert!(matches!(
            empty_charset.validate(),
            Err(ConfigError::EmptyCharset)
        ));

        let tiny_population = SearchConfig {
            population_size: 1,
            ..ok.clone()
        };
        assert!(matches!(
            tiny_population.validate(),
            Err(ConfigError::PopulationTooSmall)
        ));

        let short_password = SearchConfig {
            password_length: 2,
            ..ok.clone()
        };
        assert!(matches!(
            short_password.validate(),
            Err(ConfigError::PasswordTooShort)
        ));

        let bad_rate = SearchConfig {
            mutation_rate: 1.5,
            ..ok.clone()
        };
        assert!(matches!(
            bad_rate.validate(),
            Err(ConfigError::InvalidMutationRate(_))
        ));

        let nan_rate = SearchConfig {
            mutation_rate: f64::NAN,
            ..ok.clone()
        };
        assert!(matches!(
            nan_rate.validate(),
            Err(ConfigError::InvalidMutationRate(_))
        ));

        let oversized_elite = SearchConfig {
            elite_size: 51,
            ..ok.clone()
        };
        assert!(matches!(
            oversized_elite.validate(),
            Err(ConfigError::EliteSizeTooLarge { .. })
        ));

        let zero_tournament = SearchConfig {
            tournament_size: 0,
            ..ok.clone()
        };
        assert!(matches!(
            zero_tournament.validate(),
            Err(ConfigError::InvalidTournamentSize { .. })
        ));

        let oversized_tournament = SearchConfig {
            tournament_size: 51,
            ..ok
        };
        assert!(matches!(
            oversized_tournament.validate(),
            Err(ConfigError::InvalidTournamentSize { .. })
        ));
    }

    #[test]
    fn test_charset_deduplication_keeps_first_occurrence() {
        let config = SearchConfig {
            charset: "abcabca".to_string(),
            ..SearchConfig::default()
        };
        assert_eq!(config.charset_chars(), vec!['a', 'b', 'c']);
    }

    #[test]
    fn test_serialization_roundtrip() {
        let config = SearchConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: SearchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.population_size, config.population_size);
        assert_eq!(parsed.charset, config.charset);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let parsed: SearchConfig = serde_json::from_str(r#"{"password_length": 10}"#).unwrap();
        assert_eq!(parsed.password_length, 10);
        assert_eq!(parsed.population_size, default_population_size());
        assert_eq!(parsed.tournament_size, default_tournament_size());
    }
}

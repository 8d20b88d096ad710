//! Generational search loop coupling the genetic operators to the
//! handshake-tag fitness function.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::schema::{ConfigError, HandshakeDescriptor, SearchConfig};

use super::fitness::{FitnessEvaluator, PERFECT_SCORE};
use super::operators::{OperatorRng, elitism};

/// Best candidate observed across a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BestCandidate {
    /// The passphrase guess.
    pub passphrase: String,
    /// Its fitness score.
    pub fitness: u32,
    /// Generation in which it was first observed.
    pub generation: usize,
}

/// Progress snapshot reported once per evaluated generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Progress {
    /// Current generation number.
    pub generation: usize,
    /// Best fitness within this generation.
    pub generation_best: u32,
    /// Best fitness observed so far.
    pub best_fitness: u32,
    /// Best candidate observed so far.
    pub best_passphrase: String,
}

/// Per-generation fitness traces.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchHistory {
    /// Best fitness per generation.
    pub best_fitness: Vec<u32>,
    /// Average fitness per generation.
    pub avg_fitness: Vec<f64>,
}

/// Statistics from a search run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchStats {
    /// Generations completed beyond the initial one.
    pub generations: usize,
    /// Total candidate evaluations performed.
    pub total_evaluations: u64,
    /// Best fitness achieved.
    pub best_fitness: u32,
    /// Average fitness of the final population.
    pub final_avg_fitness: f64,
    /// Wall-clock duration of the run.
    pub elapsed_seconds: f64,
    /// Evaluation throughput.
    pub evaluations_per_second: f64,
    /// Why the run stopped.
    pub stop_reason: StopReason,
}

/// Reason the search stopped.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum StopReason {
    /// A candidate reproduced the captured tag exactly.
    MicMatch,
    /// Reached the generation budget.
    MaxGenerations,
    /// Caller cancelled.
    Cancelled,
}

/// Complete result of a search run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchOutcome {
    /// Best candidate found.
    pub best: BestCandidate,
    /// Statistics from the run.
    pub stats: SearchStats,
    /// Full history for analysis.
    pub history: SearchHistory,
}

/// Search engine that evolves candidate passphrases against one handshake.
pub struct SearchEngine {
    config: SearchConfig,
    charset: Vec<char>,
    rng: OperatorRng,
    evaluator: FitnessEvaluator,
    population: Vec<String>,
    fitnesses: Vec<u32>,
    generation: usize,
    best: Option<BestCandidate>,
    history: SearchHistory,
    cancelled: Arc<AtomicBool>,
    seed_candidates: Vec<String>,
}

impl SearchEngine {
    /// Create a new engine, rejecting invalid configuration before any
    /// generation runs.
    pub fn new(
        config: SearchConfig,
        descriptor: HandshakeDescriptor,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let charset = config.charset_chars();
        let rng = match config.random_seed {
            Some(seed) => OperatorRng::new(seed),
            None => OperatorRng::random(),
        };

        Ok(Self {
            config,
            charset,
            rng,
            evaluator: FitnessEvaluator::new(descriptor),
            population: Vec::new(),
            fitnesses: Vec::new(),
            generation: 0,
            best: None,
            history: SearchHistory::default(),
            cancelled: Arc::new(AtomicBool::new(false)),
            seed_candidates: Vec::new(),
        })
    }

    /// Plant known candidates into generation 0, replacing that many random
    /// ones. Each must match the configured length and charset.
    pub fn with_initial_candidates(
        mut self,
        candidates: Vec<String>,
    ) -> Result<Self, ConfigError> {
        if candidates.len() > self.config.population_size {
            return Err(ConfigError::TooManySeedCandidates {
                given: candidates.len(),
                population_size: self.config.population_size,
            });
        }
        for candidate in &candidates {
            let fits = candidate.chars().count() == self.config.password_length
                && candidate.chars().all(|c| self.charset.contains(&c));
            if !fits {
                return Err(ConfigError::InvalidSeedCandidate(candidate.clone()));
            }
        }

        self.seed_candidates = candidates;
        Ok(self)
    }

    /// Get cancellation handle.
    ///
    /// Setting the flag stops the run at the next generation boundary; the
    /// last completed generation's best candidate remains the result.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }

    /// The handshake this engine searches against.
    pub fn descriptor(&self) -> &HandshakeDescriptor {
        self.evaluator.descriptor()
    }

    /// Build generation 0 from seed candidates plus random fill.
    fn initialize(&mut self) {
        self.generation = 0;
        self.best = None;
        self.history = SearchHistory::default();
        self.fitnesses.clear();

        let random_fill = self.config.population_size - self.seed_candidates.len();
        let mut population = self.seed_candidates.clone();
        population.extend(self.rng.random_population(
            &self.charset,
            self.config.password_length,
            random_fill,
        ));
        self.population = population;
    }

    /// Score every candidate, collecting into an index-aligned fitness
    /// vector. Evaluations are independent, so they fan out across the
    /// rayon pool.
    fn evaluate_population(&mut self) {
        let evaluator = &self.evaluator;
        self.fitnesses = self
            .population
            .par_iter()
            .map(|candidate| evaluator.score(candidate))
            .collect();
    }

    /// Fold the freshly evaluated generation into best-so-far and history.
    fn record_generation(&mut self) {
        let mut gen_best_index = 0;
        for (i, &fitness) in self.fitnesses.iter().enumerate() {
            if fitness > self.fitnesses[gen_best_index] {
                gen_best_index = i;
            }
        }
        let gen_best = self.fitnesses[gen_best_index];

        if self.best.as_ref().is_none_or(|b| gen_best > b.fitness) {
            self.best = Some(BestCandidate {
                passphrase: self.population[gen_best_index].clone(),
                fitness: gen_best,
                generation: self.generation,
            });
        }

        let avg = self.fitnesses.iter().map(|&f| f as f64).sum::<f64>()
            / self.fitnesses.len() as f64;
        self.history.best_fitness.push(gen_best);
        self.history.avg_fitness.push(avg);
    }

    /// Current progress snapshot.
    fn progress(&self) -> Progress {
        let best = self
            .best
            .as_ref()
            .expect("population evaluated at least once");

        Progress {
            generation: self.generation,
            generation_best: self.history.best_fitness.last().copied().unwrap_or(0),
            best_fitness: best.fitness,
            best_passphrase: best.passphrase.clone(),
        }
    }

    /// Check if the search should stop. An exact tag match wins over a
    /// pending cancellation, which wins over budget exhaustion.
    fn should_stop(&self) -> Option<StopReason> {
        let best = self
            .best
            .as_ref()
            .expect("population evaluated at least once");

        if best.fitness == PERFECT_SCORE {
            return Some(StopReason::MicMatch);
        }
        if self.cancelled.load(Ordering::Relaxed) {
            return Some(StopReason::Cancelled);
        }
        if self.generation >= self.config.generations {
            return Some(StopReason::MaxGenerations);
        }

        None
    }

    /// Produce the next generation: tournament parents, paired crossover,
    /// mutation, then elitist replacement.
    fn advance_generation(&mut self) {
        let parent_count = self.config.population_size - self.config.elite_size;
        let parents = self.rng.tournament_select(
            &self.population,
            &self.fitnesses,
            parent_count,
            self.config.tournament_size,
        );

        let mut offspring = Vec::with_capacity(parent_count);
        for pair in parents.chunks(2) {
            match pair {
                [first, second] => {
                    let (child1, child2) = self
                        .rng
                        .crossover(first, second)
                        .expect("population candidates share a fixed length");
                    offspring.push(child1);
                    offspring.push(child2);
                }
                // An odd parent count leaves one trailing parent, which
                // passes through to the offspring pool unmodified.
                [leftover] => offspring.push(leftover.clone()),
                _ => unreachable!(),
            }
        }

        let mut mutated = Vec::with_capacity(offspring.len());
        for child in &offspring {
            mutated.push(
                self.rng
                    .mutate(child, &self.charset, self.config.mutation_rate),
            );
        }

        self.population = elitism(
            &self.population,
            &self.fitnesses,
            mutated,
            self.config.elite_size,
        );
        self.generation += 1;
    }

    /// Run the search with a per-generation progress callback.
    pub fn run_with_callback<F>(&mut self, callback: F) -> SearchOutcome
    where
        F: Fn(&Progress),
    {
        let start_time = std::time::Instant::now();

        self.initialize();
        log::debug!(
            "searching {} candidates of length {} over {} characters, budget {} generations",
            self.config.population_size,
            self.config.password_length,
            self.charset.len(),
            self.config.generations
        );
        self.evaluate_population();
        self.record_generation();
        callback(&self.progress());

        let stop_reason = loop {
            if let Some(reason) = self.should_stop() {
                break reason;
            }

            self.advance_generation();
            self.evaluate_population();
            self.record_generation();
            callback(&self.progress());
        };

        let elapsed = start_time.elapsed().as_secs_f64();
        let total_evaluations =
            (self.generation as u64 + 1) * self.config.population_size as u64;
        let best = self
            .best
            .clone()
            .expect("population evaluated at least once");
        let best_fitness = best.fitness;

        log::info!(
            "search stopped after generation {} ({:?}), best fitness {}/{}",
            self.generation,
            stop_reason,
            best_fitness,
            PERFECT_SCORE
        );

        SearchOutcome {
            best,
            stats: SearchStats {
                generations: self.generation,
                total_evaluations,
                best_fitness,
                final_avg_fitness: self.history.avg_fitness.last().copied().unwrap_or(0.0),
                elapsed_seconds: elapsed,
                evaluations_per_second: total_evaluations as f64 / elapsed,
                stop_reason,
            },
            history: self.history.clone(),
        }
    }

    /// Run the search (blocking).
    pub fn run(&mut self) -> SearchOutcome {
        self.run_with_callback(|_| {})
    }
}

//! Genetic operators acting on candidate passphrase populations.
//!
//! Provides random initialization, tournament selection, two-point
//! crossover, per-character mutation, and elitist replacement.

use rand::prelude::*;
use rand::seq::index::sample;

/// Operator precondition violations.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum OperatorError {
    #[error("Crossover requires two parents of equal length >= 3, got {left} and {right}")]
    LengthMismatch { left: usize, right: usize },
}

/// Random number generator wrapper for population operations.
pub struct OperatorRng {
    rng: StdRng,
}

impl OperatorRng {
    /// Create from seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create with random seed.
    pub fn random() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Draw a candidate of `length` characters sampled uniformly from
    /// `charset`.
    pub fn random_candidate(&mut self, charset: &[char], length: usize) -> String {
        (0..length)
            .map(|_| charset[self.rng.gen_range(0..charset.len())])
            .collect()
    }

    /// Draw an initial population of `size` candidates.
    pub fn random_population(
        &mut self,
        charset: &[char],
        length: usize,
        size: usize,
    ) -> Vec<String> {
        (0..size)
            .map(|_| self.random_candidate(charset, length))
            .collect()
    }

    /// Select `count` parents by tournament.
    ///
    /// Each slot samples `tournament_size` distinct population indices and
    /// keeps the strictly highest-fitness contestant, ties going to the one
    /// encountered first. Requires `tournament_size <= population.len()`,
    /// which configuration validation guarantees.
    pub fn tournament_select(
        &mut self,
        population: &[String],
        fitnesses: &[u32],
        count: usize,
        tournament_size: usize,
    ) -> Vec<String> {
        debug_assert_eq!(population.len(), fitnesses.len());

        (0..count)
            .map(|_| {
                let contestants = sample(&mut self.rng, population.len(), tournament_size);
                let mut winner = contestants.index(0);
                for idx in contestants.iter().skip(1) {
                    if fitnesses[idx] > fitnesses[winner] {
                        winner = idx;
                    }
                }
                population[winner].clone()
            })
            .collect()
    }

    /// Two-point crossover producing a complementary pair of children.
    ///
    /// Cut points satisfy `1 <= pt1 < pt2 <= len - 1`, so each child keeps
    /// both ends of one parent and the middle segment of the other.
    pub fn crossover(
        &mut self,
        parent1: &str,
        parent2: &str,
    ) -> Result<(String, String), OperatorError> {
        let left: Vec<char> = parent1.chars().collect();
        let right: Vec<char> = parent2.chars().collect();
        if left.len() != right.len() || left.len() < 3 {
            return Err(OperatorError::LengthMismatch {
                left: left.len(),
                right: right.len(),
            });
        }

        let length = left.len();
        let point1 = self.rng.gen_range(1..=length - 2);
        let point2 = self.rng.gen_range(point1 + 1..=length - 1);

        let child1: String = left[..point1]
            .iter()
            .chain(&right[point1..point2])
            .chain(&left[point2..])
            .collect();
        let child2: String = right[..point1]
            .iter()
            .chain(&left[point1..point2])
            .chain(&right[point2..])
            .collect();

        Ok((child1, child2))
    }

    /// Replace each character independently with probability `rate`.
    ///
    /// The replacement is drawn uniformly from `charset` and may coincide
    /// with the original character.
    pub fn mutate(&mut self, candidate: &str, charset: &[char], rate: f64) -> String {
        candidate
            .chars()
            .map(|c| {
                if self.rng.gen_bool(rate) {
                    charset[self.rng.gen_range(0..charset.len())]
                } else {
                    c
                }
            })
            .collect()
    }
}

/// Build the next generation from elites and offspring.
///
/// The `elite_size` highest-fitness candidates carry over unchanged, ties
/// broken by original population order, and the remaining slots are filled
/// from `offspring` in order. Short offspring pools are a programming error.
pub fn elitism(
    population: &[String],
    fitnesses: &[u32],
    offspring: Vec<String>,
    elite_size: usize,
) -> Vec<String> {
    debug_assert_eq!(population.len(), fitnesses.len());
    assert!(
        offspring.len() >= population.len() - elite_size,
        "offspring pool too small: {} for {} open slots",
        offspring.len(),
        population.len() - elite_size
    );

    let mut order: Vec<usize> = (0..population.len()).collect();
    order.sort_by(|&a, &b| fitnesses[b].cmp(&fitnesses[a]));

    let mut next: Vec<String> = order
        .iter()
        .take(elite_size)
        .map(|&i| population[i].clone())
        .collect();
    next.extend(
        offspring
            .into_iter()
            .take(population.len() - elite_size),
    );
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn charset() -> Vec<char> {
        "abc123".chars().collect()
    }

    #[test]
    fn test_random_candidate_respects_length_and_charset() {
        let mut rng = OperatorRng::new(7);
        let chars = charset();
        let candidate = rng.random_candidate(&chars, 12);
        assert_eq!(candidate.chars().count(), 12);
        assert!(candidate.chars().all(|c| chars.contains(&c)));
    }

    #[test]
    fn test_random_population_has_requested_size() {
        let mut rng = OperatorRng::new(7);
        let population = rng.random_population(&charset(), 8, 25);
        assert_eq!(population.len(), 25);
        assert!(population.iter().all(|c| c.chars().count() == 8));
    }

    #[test]
    fn test_same_seed_reproduces_population() {
        let chars = charset();
        let a = OperatorRng::new(99).random_population(&chars, 8, 10);
        let b = OperatorRng::new(99).random_population(&chars, 8, 10);
        assert_eq!(a, b);

        let c = OperatorRng::new(100).random_population(&chars, 8, 10);
        assert_ne!(a, c);
    }

    #[test]
    fn test_tournament_returns_requested_count() {
        let mut rng = OperatorRng::new(1);
        let population: Vec<String> = (0..6).map(|i| format!("cand{i}")).collect();
        let fitnesses = vec![10, 20, 30, 40, 50, 60];
        let parents = rng.tournament_select(&population, &fitnesses, 9, 3);
        assert_eq!(parents.len(), 9);
        assert!(parents.iter().all(|p| population.contains(p)));
    }

    #[test]
    fn test_tournament_picks_unique_maximum_when_sampling_everyone() {
        let mut rng = OperatorRng::new(1);
        let population = vec![
            "low1".to_string(),
            "best".to_string(),
            "low2".to_string(),
            "low3".to_string(),
        ];
        let fitnesses = vec![3, 90, 15, 40];
        // Tournament of the whole population always contains the maximum.
        for parent in rng.tournament_select(&population, &fitnesses, 20, 4) {
            assert_eq!(parent, "best");
        }
    }

    #[test]
    fn test_tournament_is_deterministic_per_seed() {
        let population: Vec<String> = (0..8).map(|i| format!("c{i}")).collect();
        let fitnesses = vec![5, 5, 5, 5, 5, 5, 5, 5];
        let a = OperatorRng::new(42).tournament_select(&population, &fitnesses, 6, 3);
        let b = OperatorRng::new(42).tournament_select(&population, &fitnesses, 6, 3);
        assert_eq!(a, b);
    }

    #[test]
    fn test_crossover_children_swap_a_middle_segment() {
        let mut rng = OperatorRng::new(3);
        let p1 = "aaaaaaaa";
        let p2 = "bbbbbbbb";
        let (c1, c2) = rng.crossover(p1, p2).unwrap();

        assert_eq!(c1.len(), p1.len());
        assert_eq!(c2.len(), p2.len());
        // Both ends of each child come from its leading parent.
        assert!(c1.starts_with('a') && c1.ends_with('a'));
        assert!(c2.starts_with('b') && c2.ends_with('b'));
        // The swap is complementary position by position.
        for ((x, y), (a, b)) in c1.chars().zip(c2.chars()).zip(p1.chars().zip(p2.chars())) {
            assert!((x, y) == (a, b) || (x, y) == (b, a));
        }
        // At least one position actually swapped (pt1 < pt2 guarantees it).
        assert!(c1.contains('b'));
        assert!(c2.contains('a'));
    }

    #[test]
    fn test_crossover_rejects_unequal_lengths() {
        let mut rng = OperatorRng::new(3);
        assert_eq!(
            rng.crossover("abcdefgh", "abcdefg"),
            Err(OperatorError::LengthMismatch { left: 8, right: 7 })
        );
    }

    #[test]
    fn test_crossover_rejects_too_short_parents() {
        let mut rng = OperatorRng::new(3);
        assert!(matches!(
            rng.crossover("ab", "cd"),
            Err(OperatorError::LengthMismatch { left: 2, right: 2 })
        ));
    }

    #[test]
    fn test_mutate_rate_zero_is_identity() {
        let mut rng = OperatorRng::new(5);
        assert_eq!(rng.mutate("abc123", &charset(), 0.0), "abc123");
    }

    #[test]
    fn test_mutate_rate_one_replaces_every_position() {
        let mut rng = OperatorRng::new(5);
        // 'z' is outside the charset, so any survivor would be visible.
        let mutated = rng.mutate("zzzzzzzz", &charset(), 1.0);
        assert_eq!(mutated.len(), 8);
        assert!(!mutated.contains('z'));
        assert!(mutated.chars().all(|c| charset().contains(&c)));
    }

    #[test]
    fn test_elitism_carries_top_candidates_in_order() {
        let population = vec![
            "aa".to_string(),
            "bb".to_string(),
            "cc".to_string(),
            "dd".to_string(),
        ];
        let fitnesses = vec![5, 9, 9, 1];
        let offspring = vec!["xx".to_string(), "yy".to_string()];

        let next = elitism(&population, &fitnesses, offspring, 2);
        // Tied elites keep original population order.
        assert_eq!(next, vec!["bb", "cc", "xx", "yy"]);
    }

    #[test]
    fn test_elitism_without_elites_is_offspring_only() {
        let population = vec!["aa".to_string(), "bb".to_string()];
        let fitnesses = vec![1, 2];
        let offspring = vec!["xx".to_string(), "yy".to_string(), "zz".to_string()];
        // Extra offspring beyond the open slots are dropped.
        assert_eq!(elitism(&population, &fitnesses, offspring, 0), vec!["xx", "yy"]);
    }

    #[test]
    fn test_elitism_full_elite_ignores_offspring() {
        let population = vec!["aa".to_string(), "bb".to_string()];
        let fitnesses = vec![1, 2];
        assert_eq!(
            elitism(&population, &fitnesses, Vec::new(), 2),
            vec!["bb", "aa"]
        );
    }

    #[test]
    #[should_panic(expected = "offspring pool too small")]
    fn test_elitism_panics_on_short_offspring_pool() {
        let population = vec!["aa".to_string(), "bb".to_string(), "cc".to_string()];
        let fitnesses = vec![1, 2, 3];
        elitism(&population, &fitnesses, vec!["xx".to_string()], 0);
    }

    proptest! {
        #[test]
        fn prop_crossover_preserves_length_and_material(seed in any::<u64>(), length in 3usize..24) {
            let mut rng = OperatorRng::new(seed);
            let chars = charset();
            let p1 = rng.random_candidate(&chars, length);
            let p2 = rng.random_candidate(&chars, length);

            let (c1, c2) = rng.crossover(&p1, &p2).unwrap();
            prop_assert_eq!(c1.chars().count(), length);
            prop_assert_eq!(c2.chars().count(), length);
            for ((x, y), (a, b)) in c1.chars().zip(c2.chars()).zip(p1.chars().zip(p2.chars())) {
                prop_assert!((x, y) == (a, b) || (x, y) == (b, a));
            }
        }

        #[test]
        fn prop_mutation_stays_inside_charset(seed in any::<u64>(), rate in 0.0f64..=1.0) {
            let mut rng = OperatorRng::new(seed);
            let chars = charset();
            let candidate = rng.random_candidate(&chars, 10);
            let mutated = rng.mutate(&candidate, &chars, rate);
            prop_assert_eq!(mutated.chars().count(), 10);
            prop_assert!(mutated.chars().all(|c| chars.contains(&c)));
        }
    }
}

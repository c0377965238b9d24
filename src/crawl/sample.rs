// src/crawl/sample.rs
// =============================================================================
// Picks which outbound links the crawler follows from a page.
//
// Rule: draw exactly `count` distinct links, uniformly at random, without
// replacement. If the page has fewer links than that, we report an error
// instead of quietly following fewer.
// =============================================================================

use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SampleError {
    #[error("cannot sample {requested} links, only {available} available")]
    InsufficientLinks { available: usize, requested: usize },
}

// Draws `count` distinct links in random order
pub fn sample_links<R: Rng + ?Sized>(
    links: &[String],
    count: usize,
    rng: &mut R,
) -> Result<Vec<String>, SampleError> {
    if links.len() < count {
        return Err(SampleError::InsufficientLinks {
            available: links.len(),
            requested: count,
        });
    }

    Ok(links.choose_multiple(rng, count).cloned().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn links(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_samples_distinct_links() {
        let mut rng = StdRng::seed_from_u64(7);
        let all = links(&["A", "B", "C", "D", "E"]);

        let picked = sample_links(&all, 3, &mut rng).unwrap();
        let unique: HashSet<_> = picked.iter().collect();

        assert_eq!(picked.len(), 3);
        assert_eq!(unique.len(), 3);
        assert!(picked.iter().all(|link| all.contains(link)));
    }

    #[test]
    fn test_exact_count_takes_everything() {
        let mut rng = StdRng::seed_from_u64(1);
        let all = links(&["A", "B"]);

        let picked: HashSet<_> = sample_links(&all, 2, &mut rng).unwrap().into_iter().collect();
        assert_eq!(picked, all.into_iter().collect());
    }

    #[test]
    fn test_too_few_links_is_an_error() {
        let mut rng = StdRng::seed_from_u64(1);
        let result = sample_links(&links(&["A"]), 2, &mut rng);
        assert_eq!(
            result,
            Err(SampleError::InsufficientLinks { available: 1, requested: 2 })
        );
    }

    #[test]
    fn test_same_seed_same_sample() {
        let all = links(&["A", "B", "C", "D", "E", "F", "G"]);
        let first = sample_links(&all, 4, &mut StdRng::seed_from_u64(42)).unwrap();
        let second = sample_links(&all, 4, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_every_link_can_be_picked() {
        let mut rng = StdRng::seed_from_u64(3);
        let all = links(&["A", "B", "C", "D"]);
        let mut seen = HashSet::new();

        for _ in 0..200 {
            seen.extend(sample_links(&all, 1, &mut rng).unwrap());
        }
        assert_eq!(seen.len(), 4);
    }
}

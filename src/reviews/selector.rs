// Loaded review list and uniform random selection

use rand::seq::SliceRandom;
use rand::Rng;

/// Review texts from the last successful load, in file order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewSet {
    reviews: Vec<String>,
}

impl ReviewSet {
    pub fn new(reviews: Vec<String>) -> Self {
        Self { reviews }
    }

    pub fn len(&self) -> usize {
        self.reviews.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.reviews
    }

    /// Pick one review uniformly at random. None only for an empty set.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
        self.reviews.choose(rng).map(String::as_str)
    }

    /// `pick` with the thread-local RNG
    pub fn random(&self) -> Option<&str> {
        self.pick(&mut rand::thread_rng())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn sample_set() -> ReviewSet {
        ReviewSet::new(vec![
            "Great blender, crushes ice.".to_string(),
            "Broke after two days.".to_string(),
            "It is a blender.".to_string(),
            "Would buy again!".to_string(),
        ])
    }

    #[test]
    fn test_empty_set_returns_none() {
        let set = ReviewSet::default();
        let mut rng = SmallRng::seed_from_u64(7);
        assert!(set.pick(&mut rng).is_none());
        assert!(set.random().is_none());
    }

    #[test]
    fn test_pick_always_returns_member() {
        let set = sample_set();
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..1_000 {
            let picked = set.pick(&mut rng).unwrap();
            assert!(set.as_slice().iter().any(|r| r == picked));
            assert!(!picked.is_empty());
        }
    }

    #[test]
    fn test_single_review_always_selected() {
        let set = ReviewSet::new(vec!["only one".to_string()]);
        for _ in 0..50 {
            assert_eq!(set.random(), Some("only one"));
        }
    }

    #[test]
    fn test_selection_is_roughly_uniform() {
        let set = sample_set();
        let mut rng = SmallRng::seed_from_u64(1234);
        let mut counts = [0usize; 4];
        for _ in 0..10_000 {
            let picked = set.pick(&mut rng).unwrap();
            let idx = set.as_slice().iter().position(|r| r == picked).unwrap();
            counts[idx] += 1;
        }
        // Expected 2500 each
        for count in counts {
            assert!((2_100..2_900).contains(&count), "skewed counts: {:?}", counts);
        }
    }
}

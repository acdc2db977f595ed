//! Randomized popularity-weighted selection among compatible candidates.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::item::{PopularityTier, WardrobeItem};

use super::{DEFAULT_TOP_K, DEFAULT_WEIGHTS, PURCHASE_BONUS_CAP};

/// Weights for scoring components
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    /// Weight for the popularity tier bonus (default: 0.6)
    pub popularity: f64,
    /// Weight for the rating bonus (default: 0.3)
    pub rating: f64,
    /// Weight for the capped purchases bonus (default: 0.1)
    pub purchases: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        DEFAULT_WEIGHTS
    }
}

/// Scores wardrobe items and picks one among the best few.
#[derive(Debug, Clone)]
pub struct ItemScorer {
    weights: ScoringWeights,
    top_k: usize,
}

impl ItemScorer {
    /// Create a scorer with default weights
    pub fn new() -> Self {
        Self { weights: ScoringWeights::default(), top_k: DEFAULT_TOP_K }
    }

    /// Create with custom weights
    pub fn with_weights(weights: ScoringWeights) -> Self {
        Self { weights, top_k: DEFAULT_TOP_K }
    }

    /// Size of the pool the final pick is drawn from (at least 1)
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k.max(1);
        self
    }

    pub fn weights(&self) -> ScoringWeights {
        self.weights
    }

    /// Unweighted bonus magnitude for a popularity tier
    pub fn tier_bonus(tier: Option<PopularityTier>) -> f64 {
        match tier {
            Some(PopularityTier::Trending) => 0.4,
            Some(PopularityTier::High) => 0.3,
            Some(PopularityTier::Medium) => 0.2,
            Some(PopularityTier::Low) | None => 0.0,
        }
    }

    /// Deterministic part of the score: popularity, rating and purchases.
    ///
    /// Missing or non-numeric sales fields contribute nothing.
    pub fn signal_score(&self, item: &WardrobeItem) -> f64 {
        let popularity = Self::tier_bonus(item.popularity()) * self.weights.popularity;
        let rating = item.sales_number("rating").map(|rating| rating * 0.1).unwrap_or(0.0)
            * self.weights.rating;
        let purchases = item
            .sales_number("purchases")
            .map(|purchases| (purchases / 100.0).min(PURCHASE_BONUS_CAP))
            .unwrap_or(0.0)
            * self.weights.purchases;

        popularity + rating + purchases
    }

    /// Uniform random base in [0, 1) plus the signal score.
    pub fn score<R>(&self, item: &WardrobeItem, rng: &mut R) -> f64
    where
        R: Rng + ?Sized,
    {
        rng.gen::<f64>() + self.signal_score(item)
    }

    /// Scores every candidate and draws uniformly among the top `top_k`.
    pub fn select<'a, R>(&self, candidates: &[&'a WardrobeItem], rng: &mut R) -> Option<&'a WardrobeItem>
    where
        R: Rng + ?Sized,
    {
        if candidates.is_empty() {
            return None;
        }

        let mut scored = candidates
            .iter()
            .map(|item| (*item, self.score(item, rng)))
            .collect::<Vec<_>>();
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        let pool = scored.iter().take(self.top_k).map(|(item, _)| *item).collect::<Vec<_>>();
        pool.choose(rng).copied()
    }
}

impl Default for ItemScorer {
    fn default() -> Self {
        Self::new()
    }
}

//! Outfit recommendation engine
//!
//! Filters the catalog with deterministic compatibility rules, then lets a
//! randomized, popularity-weighted scorer pick among the survivors.

mod assembler;
pub mod popularity;
pub mod rules;
mod scoring;
mod states;

pub use assembler::{OutfitAssembler, RequiredCategories};
pub use popularity::{popularity_score, rank_by_popularity, DEFAULT_POPULAR_LIMIT};
pub use rules::CompatibilityTables;
pub use scoring::{ItemScorer, ScoringWeights};
pub use states::{AssemblyFailure, AssemblyState, RecommendationBatch};

/// Default scoring weights
pub const DEFAULT_WEIGHTS: ScoringWeights =
    ScoringWeights { popularity: 0.6, rating: 0.3, purchases: 0.1 };

/// Candidates kept for the final random draw
pub const DEFAULT_TOP_K: usize = 3;

/// Ceiling on purchases / 100 before weighting
pub const PURCHASE_BONUS_CAP: f64 = 0.5;

/// Attempts allowed per requested outfit
pub const DEFAULT_ATTEMPT_MULTIPLIER: usize = 3;

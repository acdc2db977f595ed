//! Category-by-category outfit assembly: top, then bottom, then footwear.
//!
//! A chosen item is never reconsidered. When a later category has no compatible
//! candidate the attempt fails, even if another earlier pick could have worked.

use rand::Rng;
use tracing::debug;

use crate::catalog::Catalog;
use crate::domain::item::{normalize_value, WardrobeItem};
use crate::domain::outfit::Outfit;
use crate::domain::season::season_eligible;

use super::rules::CompatibilityTables;
use super::scoring::ItemScorer;
use super::states::{AssemblyFailure, AssemblyState, RecommendationBatch};
use super::DEFAULT_ATTEMPT_MULTIPLIER;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequiredCategories {
    pub top: String,
    pub bottom: String,
    pub footwear: String,
}

impl RequiredCategories {
    pub fn new(top: &str, bottom: &str, footwear: &str) -> Self {
        Self { top: normalize_value(top), bottom: normalize_value(bottom), footwear: normalize_value(footwear) }
    }

    fn in_order(&self) -> [&str; 3] {
        [self.top.as_str(), self.bottom.as_str(), self.footwear.as_str()]
    }
}

impl Default for RequiredCategories {
    fn default() -> Self {
        Self::new("shirt", "pants", "shoes")
    }
}

pub struct OutfitAssembler<'t> {
    tables: &'t CompatibilityTables,
    scorer: ItemScorer,
    categories: RequiredCategories,
    attempt_multiplier: usize,
}

impl<'t> OutfitAssembler<'t> {
    pub fn new(tables: &'t CompatibilityTables, scorer: ItemScorer) -> Self {
        Self {
            tables,
            scorer,
            categories: RequiredCategories::default(),
            attempt_multiplier: DEFAULT_ATTEMPT_MULTIPLIER,
        }
    }

    pub fn with_categories(mut self, categories: RequiredCategories) -> Self {
        self.categories = categories;
        self
    }

    pub fn with_attempt_multiplier(mut self, multiplier: usize) -> Self {
        self.attempt_multiplier = multiplier.max(1);
        self
    }

    pub fn categories(&self) -> &RequiredCategories {
        &self.categories
    }

    /// Runs one attempt of the state machine to a terminal state.
    pub fn assemble<'a, R>(
        &self,
        catalog: &'a Catalog,
        season: &str,
        rng: &mut R,
    ) -> Result<Outfit<'a>, AssemblyFailure>
    where
        R: Rng + ?Sized,
    {
        let season = normalize_value(season);
        let eligible = catalog
            .items()
            .iter()
            .filter(|item| season_eligible(item, &season))
            .collect::<Vec<_>>();

        let mut state = AssemblyState::Idle;
        loop {
            let from = state.name();
            let next = self.step(state, &eligible, &season, rng);
            debug!(
                event_name = "assembly.transition",
                from,
                to = next.name(),
                season = %season,
                "outfit assembly transition"
            );

            state = match next {
                AssemblyState::Complete(outfit) => return Ok(outfit),
                AssemblyState::Failed(failure) => return Err(failure),
                next => next,
            };
        }
    }

    /// Repeats whole attempts until `count` outfits exist or the attempt budget is spent.
    pub fn recommend<'a, R>(
        &self,
        catalog: &'a Catalog,
        season: &str,
        count: usize,
        rng: &mut R,
    ) -> RecommendationBatch<'a>
    where
        R: Rng + ?Sized,
    {
        let max_attempts = count.saturating_mul(self.attempt_multiplier);
        let mut batch = RecommendationBatch::default();

        while batch.outfits.len() < count && batch.attempts < max_attempts {
            batch.attempts += 1;
            match self.assemble(catalog, season, rng) {
                Ok(outfit) => batch.outfits.push(outfit),
                Err(failure) => batch.failures.push(failure),
            }
        }

        batch
    }

    fn step<'a, R>(
        &self,
        state: AssemblyState<'a>,
        eligible: &[&'a WardrobeItem],
        season: &str,
        rng: &mut R,
    ) -> AssemblyState<'a>
    where
        R: Rng + ?Sized,
    {
        match state {
            AssemblyState::Idle => {
                if eligible.is_empty() {
                    return AssemblyState::Failed(AssemblyFailure::NoItemsForSeason {
                        season: season.to_owned(),
                    });
                }

                let missing = self
                    .categories
                    .in_order()
                    .into_iter()
                    .filter(|category| !eligible.iter().any(|item| item.category == *category))
                    .map(str::to_owned)
                    .collect::<Vec<_>>();
                if missing.is_empty() {
                    AssemblyState::SelectingTop
                } else {
                    AssemblyState::Failed(AssemblyFailure::MissingCategories { missing })
                }
            }
            AssemblyState::SelectingTop => {
                let tops = self.candidates(eligible, &self.categories.top, &[]);
                match self.scorer.select(&tops, rng) {
                    Some(top) => AssemblyState::SelectingBottom { top },
                    None => AssemblyState::Failed(AssemblyFailure::NoTopAvailable {
                        category: self.categories.top.clone(),
                    }),
                }
            }
            AssemblyState::SelectingBottom { top } => {
                let bottoms = self.candidates(eligible, &self.categories.bottom, &[top]);
                match self.scorer.select(&bottoms, rng) {
                    Some(bottom) => AssemblyState::SelectingFootwear { top, bottom },
                    None => AssemblyState::Failed(AssemblyFailure::NoCompatibleBottom {
                        category: self.categories.bottom.clone(),
                    }),
                }
            }
            AssemblyState::SelectingFootwear { top, bottom } => {
                let footwear = self.candidates(eligible, &self.categories.footwear, &[top, bottom]);
                match self.scorer.select(&footwear, rng) {
                    Some(footwear) => {
                        AssemblyState::Complete(Outfit::new(top, bottom, footwear, season))
                    }
                    None => AssemblyState::Failed(AssemblyFailure::NoCompatibleFootwear {
                        category: self.categories.footwear.clone(),
                    }),
                }
            }
            terminal @ (AssemblyState::Complete(_) | AssemblyState::Failed(_)) => terminal,
        }
    }

    /// Eligible items of `category` compatible with every already chosen item.
    fn candidates<'a>(
        &self,
        eligible: &[&'a WardrobeItem],
        category: &str,
        chosen: &[&WardrobeItem],
    ) -> Vec<&'a WardrobeItem> {
        eligible
            .iter()
            .copied()
            .filter(|item| item.category == category)
            .filter(|item| chosen.iter().all(|picked| self.tables.items_compatible(picked, item)))
            .collect()
    }
}

use serde::Serialize;
use thiserror::Error;

use crate::domain::item::WardrobeItem;
use crate::domain::outfit::Outfit;

/// Why a single assembly attempt produced no outfit. These are ordinary outcomes.
#[derive(Clone, Debug, Error, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AssemblyFailure {
    #[error("no items for season {season}")]
    NoItemsForSeason { season: String },
    #[error("missing required categories: {}", missing.join(", "))]
    MissingCategories { missing: Vec<String> },
    #[error("no {category} available for season")]
    NoTopAvailable { category: String },
    #[error("no compatible bottom found")]
    NoCompatibleBottom { category: String },
    #[error("no compatible footwear found")]
    NoCompatibleFootwear { category: String },
}

#[derive(Clone, Debug, PartialEq)]
pub enum AssemblyState<'a> {
    Idle,
    SelectingTop,
    SelectingBottom { top: &'a WardrobeItem },
    SelectingFootwear { top: &'a WardrobeItem, bottom: &'a WardrobeItem },
    Complete(Outfit<'a>),
    Failed(AssemblyFailure),
}

impl AssemblyState<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::SelectingTop => "selecting_top",
            Self::SelectingBottom { .. } => "selecting_bottom",
            Self::SelectingFootwear { .. } => "selecting_footwear",
            Self::Complete(_) => "complete",
            Self::Failed(_) => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete(_) | Self::Failed(_))
    }
}

/// Outcome of a multi-attempt recommendation request.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RecommendationBatch<'a> {
    pub outfits: Vec<Outfit<'a>>,
    pub failures: Vec<AssemblyFailure>,
    pub attempts: usize,
}

impl RecommendationBatch<'_> {
    pub fn is_empty(&self) -> bool {
        self.outfits.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_messages_are_human_readable() {
        let missing = AssemblyFailure::MissingCategories {
            missing: vec!["pants".to_owned(), "shoes".to_owned()],
        };
        assert_eq!(missing.to_string(), "missing required categories: pants, shoes");
        assert_eq!(
            AssemblyFailure::NoCompatibleBottom { category: "pants".to_owned() }.to_string(),
            "no compatible bottom found"
        );
        assert_eq!(
            AssemblyFailure::NoItemsForSeason { season: "winter".to_owned() }.to_string(),
            "no items for season winter"
        );
    }

    #[test]
    fn only_complete_and_failed_are_terminal() {
        assert!(!AssemblyState::Idle.is_terminal());
        assert!(!AssemblyState::SelectingTop.is_terminal());
        assert!(AssemblyState::Failed(AssemblyFailure::NoCompatibleFootwear {
            category: "shoes".to_owned()
        })
        .is_terminal());
    }

    #[test]
    fn failure_serializes_with_kind_tag() {
        let value = serde_json::to_value(AssemblyFailure::NoCompatibleFootwear {
            category: "shoes".to_owned(),
        })
        .expect("serializable");
        assert_eq!(value["kind"], "no_compatible_footwear");
        assert_eq!(value["category"], "shoes");
    }
}

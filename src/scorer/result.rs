use serde::Serialize;

use crate::prelude::*;

/// Scored item.
#[derive(Serialize, Debug, Copy, Clone, PartialEq)]
pub struct ScoreResult {
    pub item_id: ItemId,
    pub score: f64,
}

/// Breakdown of a single score.
#[derive(Serialize, Debug, Copy, Clone, PartialEq)]
pub struct ScoreDetails {
    /// Intercept plus the user and item biases.
    pub baseline: f64,

    /// Weighted inner product of the user and item latent vectors.
    pub personalized: f64,
}

impl ScoreDetails {
    #[must_use]
    pub fn score(&self) -> f64 {
        self.baseline + self.personalized
    }
}

/// Item scores of a single scoring call, at most one per item.
#[derive(Debug, Default, Clone)]
pub struct ScoreMap(AHashMap<ItemId, f64>);

impl ScoreMap {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self(AHashMap::with_capacity_and_hasher(capacity, Default::default()))
    }

    pub(crate) fn insert(&mut self, item_id: ItemId, score: f64) {
        self.0.insert(item_id, score);
    }

    #[must_use]
    pub fn get(&self, item_id: ItemId) -> Option<f64> {
        self.0.get(&item_id).copied()
    }

    #[must_use]
    pub fn contains(&self, item_id: ItemId) -> bool {
        self.0.contains_key(&item_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Best scores first, ties broken by the item ID.
    #[must_use]
    pub fn into_ranked(self) -> Vec<ScoreResult> {
        let mut results = self
            .0
            .into_iter()
            .map(|(item_id, score)| ScoreResult { item_id, score })
            .collect::<Vec<_>>();
        results.sort_unstable_by(|lhs, rhs| {
            rhs.score
                .total_cmp(&lhs.score)
                .then(lhs.item_id.cmp(&rhs.item_id))
        });
        results
    }
}

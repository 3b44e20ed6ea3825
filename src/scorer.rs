//! Latent factor item scorer.
//!
//! The score is the bias baseline plus the user and item latent vectors multiplied
//! through the diagonal matrix of the feature weights:
//!
//! `score = intercept + user_bias + item_bias + Σ user[d] × weight[d] × item[d]`.

use itertools::Itertools;

pub use self::bias::{BiasModel, Biases};
pub use self::error::{Entity, ScoreError};
pub use self::result::{ScoreDetails, ScoreMap, ScoreResult};
pub use self::store::{FactorStore, FactorTable};
pub use self::weights::FeatureWeights;
use crate::math::vector::Vector;
use crate::prelude::*;

pub mod bias;
pub mod error;
pub mod result;
pub mod store;
pub mod weights;

/// Read-only scorer over a trained model, safe to share between threads.
pub struct Scorer<S, B> {
    store: S,
    weights: FeatureWeights,
    biases: B,
}

impl<S: FactorStore, B: BiasModel> Scorer<S, B> {
    pub fn new(store: S, weights: FeatureWeights, biases: B) -> Self {
        Self {
            store,
            weights,
            biases,
        }
    }

    /// Scores the items for the user.
    ///
    /// Duplicate item IDs are scored once. Items unknown to the model are left out,
    /// and an unknown user gets no scores at all.
    #[instrument(level = "debug", skip_all, fields(user_id = user_id))]
    pub fn score_items(
        &self,
        user_id: UserId,
        item_ids: impl IntoIterator<Item = ItemId>,
    ) -> Result<ScoreMap> {
        let Some(user_vector) = self.user_vector(user_id)? else {
            return Ok(ScoreMap::default());
        };

        let start_instant = Instant::now();
        let item_ids = item_ids.into_iter().unique().collect_vec();
        let user_baseline = self.biases.intercept() + self.biases.user_bias(user_id);

        let mut scores = ScoreMap::with_capacity(item_ids.len());
        for item_id in item_ids.iter().copied() {
            if let Some(details) = self.details(user_baseline, user_vector, item_id)? {
                scores.insert(item_id, details.score());
            }
        }

        debug!(
            n_items = item_ids.len(),
            n_scored = scores.len(),
            elapsed = ?start_instant.elapsed(),
            "scored",
        );
        Ok(scores)
    }

    /// Scores a single item, `None` when either the user or the item is unknown.
    pub fn score(&self, user_id: UserId, item_id: ItemId) -> Result<Option<f64>> {
        Ok(self
            .explain(user_id, item_id)?
            .map(|details| details.score()))
    }

    /// Splits the item score into the baseline and personalized parts.
    pub fn explain(&self, user_id: UserId, item_id: ItemId) -> Result<Option<ScoreDetails>> {
        let Some(user_vector) = self.user_vector(user_id)? else {
            return Ok(None);
        };
        let user_baseline = self.biases.intercept() + self.biases.user_bias(user_id);
        self.details(user_baseline, user_vector, item_id)
    }

    fn user_vector(&self, user_id: UserId) -> Result<Option<&Vector>, ScoreError> {
        match self.store.user_vector(user_id) {
            Some(user_vector) => {
                self.weights.ensure_rank(Entity::User(user_id), user_vector)?;
                Ok(Some(user_vector))
            }
            None => {
                debug!(user_id, "unknown user");
                Ok(None)
            }
        }
    }

    fn details(
        &self,
        user_baseline: f64,
        user_vector: &Vector,
        item_id: ItemId,
    ) -> Result<Option<ScoreDetails>> {
        let Some(item_vector) = self.store.item_vector(item_id) else {
            trace!(item_id, "unknown item");
            return Ok(None);
        };
        self.weights.ensure_rank(Entity::Item(item_id), item_vector)?;

        Ok(Some(ScoreDetails {
            baseline: user_baseline + self.biases.item_bias(item_id),
            personalized: user_vector.weighted_dot(self.weights.as_slice(), item_vector),
        }))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;

    const USER_ID: UserId = 1;
    const ITEM_ID: ItemId = 10;
    const UNKNOWN_USER_ID: UserId = 999;
    const UNKNOWN_ITEM_ID: ItemId = 20;

    fn scorer() -> Scorer<FactorTable, Biases> {
        let store = FactorTable {
            users: AHashMap::from_iter([(USER_ID, Vector::from(vec![1.0, 3.0]))]),
            items: AHashMap::from_iter([
                (ITEM_ID, Vector::from(vec![4.0, 2.0])),
                (11, Vector::from(vec![-1.0, 0.5])),
            ]),
        };
        let biases = Biases {
            intercept: 0.1,
            users: AHashMap::from_iter([(USER_ID, 0.2)]),
            items: AHashMap::from_iter([(ITEM_ID, 0.05)]),
        };
        Scorer::new(store, FeatureWeights::from(vec![2.0, 0.5]), biases)
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= 1e-9 * expected.abs().max(1.0),
            "{} != {}",
            actual,
            expected,
        );
    }

    #[test]
    fn score_items_ok() -> crate::Result {
        let scores = scorer().score_items(USER_ID, [ITEM_ID])?;
        assert_eq!(scores.len(), 1);
        assert_close(scores.get(ITEM_ID).unwrap(), 11.35);
        Ok(())
    }

    #[test]
    fn unbiased_item_ok() -> crate::Result {
        let scores = scorer().score_items(USER_ID, [11])?;
        // 0.1 + 0.2 + (1.0 × 2.0 × -1.0 + 3.0 × 0.5 × 0.5)
        assert_close(scores.get(11).unwrap(), 0.3 - 2.0 + 0.75);
        Ok(())
    }

    #[test]
    fn unknown_user_ok() -> crate::Result {
        let scores = scorer().score_items(UNKNOWN_USER_ID, [ITEM_ID, UNKNOWN_ITEM_ID])?;
        assert!(scores.is_empty());
        Ok(())
    }

    #[test]
    fn unknown_item_ok() -> crate::Result {
        let scores = scorer().score_items(USER_ID, [ITEM_ID, UNKNOWN_ITEM_ID])?;
        assert_eq!(scores.len(), 1);
        assert!(scores.contains(ITEM_ID));
        assert!(!scores.contains(UNKNOWN_ITEM_ID));
        Ok(())
    }

    #[test]
    fn duplicate_items_ok() -> crate::Result {
        let scores = scorer().score_items(USER_ID, [ITEM_ID, 11, ITEM_ID, ITEM_ID, 11])?;
        assert_eq!(scores.len(), 2);
        assert_close(scores.get(ITEM_ID).unwrap(), 11.35);
        Ok(())
    }

    #[test]
    fn empty_items_ok() -> crate::Result {
        assert!(scorer().score_items(USER_ID, Vec::new())?.is_empty());
        Ok(())
    }

    #[test]
    fn deterministic_ok() -> crate::Result {
        let scorer = scorer();
        let first = scorer.score_items(USER_ID, [ITEM_ID, 11])?;
        let second = scorer.score_items(USER_ID, [11, ITEM_ID])?;
        assert_eq!(first.get(ITEM_ID), second.get(ITEM_ID));
        assert_eq!(first.get(11), second.get(11));
        Ok(())
    }

    #[test]
    fn score_ok() -> crate::Result {
        let scorer = scorer();
        assert_close(scorer.score(USER_ID, ITEM_ID)?.unwrap(), 11.35);
        assert_eq!(scorer.score(USER_ID, UNKNOWN_ITEM_ID)?, None);
        assert_eq!(scorer.score(UNKNOWN_USER_ID, ITEM_ID)?, None);
        Ok(())
    }

    #[test]
    fn explain_ok() -> crate::Result {
        let details = scorer().explain(USER_ID, ITEM_ID)?.unwrap();
        assert_close(details.baseline, 0.35);
        assert_close(details.personalized, 11.0);
        assert_close(details.score(), 11.35);
        Ok(())
    }

    #[test]
    fn user_rank_mismatch() {
        let mut scorer = scorer();
        scorer.store.users.insert(2, Vector::from(vec![1.0]));
        let error = scorer.score_items(2, [ITEM_ID]).unwrap_err();
        assert_eq!(
            error.downcast_ref::<ScoreError>(),
            Some(&ScoreError::RankMismatch {
                entity: Entity::User(2),
                expected: 2,
                actual: 1,
            }),
        );
    }

    #[test]
    fn item_rank_mismatch() {
        let mut scorer = scorer();
        scorer.store.items.insert(12, Vector::from(vec![1.0, 2.0, 3.0]));
        let error = scorer.score_items(USER_ID, [ITEM_ID, 12]).unwrap_err();
        assert_eq!(
            error.downcast_ref::<ScoreError>(),
            Some(&ScoreError::RankMismatch {
                entity: Entity::Item(12),
                expected: 2,
                actual: 3,
            }),
        );
    }

    #[test]
    fn borrowed_collaborators_ok() -> crate::Result {
        let owned = scorer();
        let scorer = Scorer::new(&owned.store, owned.weights.clone(), &owned.biases);
        assert_close(scorer.score(USER_ID, ITEM_ID)?.unwrap(), 11.35);
        Ok(())
    }

    #[test]
    fn concurrent_scoring_ok() -> crate::Result {
        let scorer = Arc::new(scorer());
        let expected = scorer.score_items(USER_ID, [ITEM_ID, 11])?;

        let handles = (0..4)
            .map(|_| {
                let scorer = Arc::clone(&scorer);
                thread::spawn(move || scorer.score_items(USER_ID, [ITEM_ID, 11]))
            })
            .collect_vec();
        for handle in handles {
            let scores = handle.join().map_err(|_| anyhow!("scoring thread panicked"))??;
            assert_eq!(scores.get(ITEM_ID), expected.get(ITEM_ID));
            assert_eq!(scores.get(11), expected.get(11));
        }
        Ok(())
    }
}

use serde::{Deserialize, Serialize};

use crate::math::vector::Vector;
use crate::scorer::error::{Entity, ScoreError};

/// Per-factor weights, the diagonal of the singular value matrix.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct FeatureWeights(Vector);

impl From<Vec<f64>> for FeatureWeights {
    fn from(weights: Vec<f64>) -> Self {
        Self(Vector::from(weights))
    }
}

impl FeatureWeights {
    /// Model rank, every latent vector must have exactly this many factors.
    #[must_use]
    pub fn rank(&self) -> usize {
        self.0.rank()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        self.0.as_slice()
    }

    pub fn ensure_rank(&self, entity: Entity, factors: &Vector) -> Result<(), ScoreError> {
        match factors.rank() {
            actual if actual == self.rank() => Ok(()),
            actual => Err(ScoreError::RankMismatch {
                entity,
                expected: self.rank(),
                actual,
            }),
        }
    }
}

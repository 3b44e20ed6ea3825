use serde::{Deserialize, Serialize};

/// Latent factor vector of a user or an item.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct Vector(pub Vec<f64>);

impl From<Vec<f64>> for Vector {
    fn from(vec: Vec<f64>) -> Self {
        Self(vec)
    }
}

impl Vector {
    /// Number of latent factors.
    #[must_use]
    #[inline]
    pub fn rank(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// `self × diag(weights) × otherᵀ`.
    ///
    /// The caller is responsible for the equal ranks, otherwise the product gets truncated.
    #[must_use]
    #[inline]
    pub fn weighted_dot(&self, weights: &[f64], other: &Self) -> f64 {
        debug_assert_eq!(self.rank(), weights.len());
        debug_assert_eq!(other.rank(), weights.len());

        self.0
            .iter()
            .zip(weights)
            .zip(&other.0)
            .map(|((xi, wi), yi)| xi * wi * yi)
            .sum()
    }
}

use std::fmt::{Display, Formatter};

use thiserror::Error;

use crate::prelude::*;

/// Model entity that owns a latent vector.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Entity {
    User(UserId),
    Item(ItemId),
}

impl Display for Entity {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User(user_id) => write!(formatter, "user #{}", user_id),
            Self::Item(item_id) => write!(formatter, "item #{}", item_id),
        }
    }
}

/// Fatal scoring errors.
///
/// Unknown users and items are not errors: they produce empty or partial results instead.
#[derive(Debug, Error, PartialEq)]
pub enum ScoreError {
    /// The factors and the weights do not belong to the same model.
    #[error("{entity} has {actual} latent factors, but the model rank is {expected}")]
    RankMismatch {
        entity: Entity,
        expected: usize,
        actual: usize,
    },
}

use serde::{Deserialize, Serialize};

use crate::prelude::*;

/// Baseline predictor: global intercept plus user and item offsets.
pub trait BiasModel {
    fn intercept(&self) -> f64;

    fn user_bias(&self, user_id: UserId) -> f64;

    fn item_bias(&self, item_id: ItemId) -> f64;
}

/// In-memory bias model. Unknown users and items have zero bias.
#[derive(Serialize, Deserialize, Debug, Default, Clone)]
pub struct Biases {
    #[serde(default)]
    pub intercept: f64,

    #[serde(default)]
    pub users: AHashMap<UserId, f64>,

    #[serde(default)]
    pub items: AHashMap<ItemId, f64>,
}

impl BiasModel for Biases {
    fn intercept(&self) -> f64 {
        self.intercept
    }

    fn user_bias(&self, user_id: UserId) -> f64 {
        self.users.get(&user_id).copied().unwrap_or_default()
    }

    fn item_bias(&self, item_id: ItemId) -> f64 {
        self.items.get(&item_id).copied().unwrap_or_default()
    }
}

impl<T: BiasModel + ?Sized> BiasModel for &T {
    fn intercept(&self) -> f64 {
        (**self).intercept()
    }

    fn user_bias(&self, user_id: UserId) -> f64 {
        (**self).user_bias(user_id)
    }

    fn item_bias(&self, item_id: ItemId) -> f64 {
        (**self).item_bias(item_id)
    }
}

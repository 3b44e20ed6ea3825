use crate::math::vector::Vector;
use crate::prelude::*;

/// Source of the trained latent vectors.
pub trait FactorStore {
    /// Returns `None` for a user unknown to the model.
    fn user_vector(&self, user_id: UserId) -> Option<&Vector>;

    /// Returns `None` for an item unknown to the model.
    fn item_vector(&self, item_id: ItemId) -> Option<&Vector>;
}

/// In-memory factor store.
#[derive(Debug, Default, Clone)]
pub struct FactorTable {
    pub users: AHashMap<UserId, Vector>,
    pub items: AHashMap<ItemId, Vector>,
}

impl FactorStore for FactorTable {
    fn user_vector(&self, user_id: UserId) -> Option<&Vector> {
        self.users.get(&user_id)
    }

    fn item_vector(&self, item_id: ItemId) -> Option<&Vector> {
        self.items.get(&item_id)
    }
}

impl<T: FactorStore + ?Sized> FactorStore for &T {
    fn user_vector(&self, user_id: UserId) -> Option<&Vector> {
        (**self).user_vector(user_id)
    }

    fn item_vector(&self, item_id: ItemId) -> Option<&Vector> {
        (**self).item_vector(item_id)
    }
}

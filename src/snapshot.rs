//! Trained model snapshot, stored as JSON.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::math::vector::Vector;
use crate::prelude::*;
use crate::scorer::{Biases, Entity, FactorTable, FeatureWeights, ScoreError, Scorer};

#[derive(Serialize, Deserialize, Debug)]
pub struct Snapshot {
    pub weights: FeatureWeights,

    #[serde(default)]
    pub users: AHashMap<UserId, Vector>,

    #[serde(default)]
    pub items: AHashMap<ItemId, Vector>,

    #[serde(default)]
    pub biases: Biases,
}

impl Snapshot {
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self> {
        let start_instant = Instant::now();
        let file = File::open(path)
            .with_context(|| format!("failed to open the model `{}`", path.display()))?;
        let snapshot: Self = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("failed to parse the model `{}`", path.display()))?;
        snapshot.validate()?;
        info!(
            rank = snapshot.weights.rank(),
            n_users = snapshot.users.len(),
            n_items = snapshot.items.len(),
            elapsed = ?start_instant.elapsed(),
            "loaded",
        );
        Ok(snapshot)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: Self = serde_json::from_str(json).context("failed to parse the model")?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Checks that all the latent vectors match the weights.
    /// Reports the smallest offending user ID first, then the smallest item ID.
    pub fn validate(&self) -> Result<(), ScoreError> {
        let users = self
            .users
            .iter()
            .map(|(user_id, vector)| (Entity::User(*user_id), vector));
        let items = self
            .items
            .iter()
            .map(|(item_id, vector)| (Entity::Item(*item_id), vector));
        users
            .sorted_by_key(|(entity, _)| entity_id(*entity))
            .chain(items.sorted_by_key(|(entity, _)| entity_id(*entity)))
            .try_for_each(|(entity, vector)| self.weights.ensure_rank(entity, vector))
    }

    #[must_use]
    pub fn into_scorer(self) -> Scorer<FactorTable, Biases> {
        let store = FactorTable {
            users: self.users,
            items: self.items,
        };
        Scorer::new(store, self.weights, self.biases)
    }
}

const fn entity_id(entity: Entity) -> i64 {
    match entity {
        Entity::User(id) | Entity::Item(id) => id,
    }
}

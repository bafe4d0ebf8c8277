//! Flower service: planting and viewing.
//!
//! Ownership is proven solely by holding a flower's owner token. Viewing is
//! open to anyone who knows the flower id.

use tracing::{debug, info};
use uuid::Uuid;

use crate::db::{self, DbPool};
use crate::error::Result;
use crate::models::{Flower, NewFlower};

/// What a plant request ended up doing.
#[derive(Debug, Clone)]
pub enum PlantOutcome {
    /// The presented owner token already owns this flower.
    Existing(Flower),
    /// A new flower was planted; its owner token must be handed to the client.
    Planted(Flower),
}

impl PlantOutcome {
    pub fn flower(&self) -> &Flower {
        match self {
            Self::Existing(flower) | Self::Planted(flower) => flower,
        }
    }

    pub fn is_new(&self) -> bool {
        matches!(self, Self::Planted(_))
    }
}

/// Service for planting and looking up flowers.
#[derive(Clone)]
pub struct FlowerService {
    db: DbPool,
}

impl FlowerService {
    /// Create a new flower service.
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    /// Plant a flower, or return the one already owned by `owner_token`.
    ///
    /// An absent, empty or unknown token plants a new flower.
    pub async fn plant(&self, owner_token: Option<&str>) -> Result<PlantOutcome> {
        if let Some(token) = owner_token.filter(|t| !t.is_empty()) {
            if let Some(existing) = db::find_flower_by_owner_token(&self.db, token).await? {
                debug!(flower_id = %existing.id, "Owner token matched existing flower");
                return Ok(PlantOutcome::Existing(existing));
            }
            debug!("Owner token did not match any flower, planting a new one");
        }

        let flower = db::create_flower(&self.db, NewFlower::plant_now()).await?;
        info!("Planted {}", flower);

        Ok(PlantOutcome::Planted(flower))
    }

    /// Look up a flower by id.
    pub async fn get(&self, id: Uuid) -> Result<Flower> {
        // Stored ids are the hyphenated lowercase form
        db::get_flower(&self.db, &id.to_string()).await
    }

    /// Number of flowers planted so far.
    pub async fn count(&self) -> Result<i64> {
        db::count_flowers(&self.db).await
    }
}

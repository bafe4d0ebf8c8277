//! Flower model and the randomness it is planted with.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rand::{Rng, RngCore};
use serde::Serialize;
use sqlx::FromRow;

/// Number of random bytes behind an owner token (hex encoded to 64 chars).
pub const OWNER_TOKEN_BYTES: usize = 32;

/// Flower colour / type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variation {
    Red,
    Purple,
    Green,
}

impl Variation {
    pub const ALL: [Variation; 3] = [Variation::Red, Variation::Purple, Variation::Green];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Purple => "purple",
            Self::Green => "green",
        }
    }

    /// Human readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Red => "Red",
            Self::Purple => "Purple",
            Self::Green => "Green",
        }
    }

    /// Uniform choice over all variations.
    pub fn random() -> Self {
        Self::ALL[rand::thread_rng().gen_range(0..Self::ALL.len())]
    }
}

impl FromStr for Variation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "red" => Ok(Self::Red),
            "purple" => Ok(Self::Purple),
            "green" => Ok(Self::Green),
            _ => Err(format!("Unknown flower variation: {}", s)),
        }
    }
}

impl fmt::Display for Variation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Random seed for deterministic client-side visuals.
pub fn random_seed() -> u32 {
    rand::thread_rng().gen()
}

/// Generate a fresh owner token: 32 bytes from the thread CSPRNG, hex encoded.
pub fn generate_owner_token() -> String {
    let mut bytes = [0u8; OWNER_TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Flower record from the database.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Flower {
    pub id: String,
    pub planted_at: DateTime<Utc>,
    pub variation: String,
    pub seed: u32,
    #[serde(skip_serializing)]
    pub owner_token: String,
    pub created_at: DateTime<Utc>,
}

impl Flower {
    /// Get variation as enum.
    pub fn variation_enum(&self) -> Option<Variation> {
        self.variation.parse().ok()
    }
}

impl fmt::Display for Flower {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Flower {} ({})", self.id, self.variation)
    }
}

/// Input for planting a flower.
#[derive(Debug, Clone)]
pub struct NewFlower {
    pub id: String,
    pub planted_at: DateTime<Utc>,
    pub variation: Variation,
    pub seed: u32,
    /// Filled in by [`NewFlower::ensure_owner_token`] right before the insert.
    pub owner_token: Option<String>,
}

impl NewFlower {
    /// A flower planted right now with a random variation and seed.
    pub fn plant_now() -> Self {
        Self {
            id: super::new_id(),
            planted_at: super::now(),
            variation: Variation::random(),
            seed: random_seed(),
            owner_token: None,
        }
    }

    /// Generate the owner token if none has been assigned yet.
    ///
    /// An existing token is never replaced.
    pub fn ensure_owner_token(&mut self) -> &str {
        match &mut self.owner_token {
            Some(token) if !token.is_empty() => {}
            slot => *slot = Some(generate_owner_token()),
        }
        self.owner_token.as_deref().unwrap_or_default()
    }
}

//! Service layer for Flowerbed.
//!
//! Services hold the database pool and implement the operations the HTTP
//! handlers expose.

mod flower;
mod page;

pub use flower::{FlowerService, PlantOutcome};
pub use page::render_flower;

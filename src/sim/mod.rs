//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and
//! deterministic:
//! - Time advances only through the externally supplied `dt`
//! - Seeded RNG only, owned by the spawner
//! - Structural entity changes apply at one commit point per tick
//! - No rendering or platform dependencies

pub mod collision;
pub mod controllers;
pub mod entity;
pub mod orchestrator;
pub mod player;
pub mod registry;
pub mod spawn;
pub mod state;

pub use controllers::WeaponController;
pub use entity::{Body, Entity, EntityKind, EntitySnapshot};
pub use orchestrator::{GameOrchestrator, TickInput};
pub use player::Player;
pub use registry::EntityRegistry;
pub use spawn::EntityFactory;
pub use state::{GameEvent, GameState};

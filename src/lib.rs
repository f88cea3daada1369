//! Rock Blast - simulation core for a top-down arcade shooter
//!
//! Core modules:
//! - `config`: game tuning values and startup validation
//! - `sim`: deterministic tick simulation (entities, collisions, spawning)
//!
//! Rendering, audio and input devices live outside this crate. The embedder
//! samples its input sources into a [`sim::TickInput`] once per frame, calls
//! [`sim::GameOrchestrator::update`] with a non-negative `dt`, and drains the
//! resulting [`sim::GameEvent`]s for presentation.

pub mod config;
pub mod sim;

pub use config::{ConfigError, GameConfig};
pub use sim::{GameEvent, GameOrchestrator, TickInput};

use glam::Vec2;

/// Convert a heading in degrees to a unit direction vector.
#[inline]
pub fn heading_to_dir(degrees: f32) -> Vec2 {
    let radians = degrees.to_radians();
    Vec2::new(radians.cos(), radians.sin())
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(mut degrees: f32) -> f32 {
    while degrees >= 360.0 {
        degrees -= 360.0;
    }
    while degrees < 0.0 {
        degrees += 360.0;
    }
    degrees
}

/// Toroidal wrap: a position past a half extent teleports to the opposite
/// edge, per axis, independently.
#[inline]
pub fn wrap_position(mut pos: Vec2, half_width: f32, half_height: f32) -> Vec2 {
    if pos.x > half_width {
        pos.x = -half_width;
    } else if pos.x < -half_width {
        pos.x = half_width;
    }

    if pos.y > half_height {
        pos.y = -half_height;
    } else if pos.y < -half_height {
        pos.y = half_height;
    }

    pos
}

//! Game tuning values and startup validation
//!
//! The config is supplied by the embedder (or loaded from JSON) and validated
//! exactly once before a session starts. A bad config is fatal: there is no
//! degraded mode, a session either starts with a valid config or not at all.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation failure for a [`GameConfig`], naming the offending field.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
    #[error("min_spawn_delay ({min}) cannot be greater than initial_spawn_delay ({initial})")]
    SpawnDelayOrder { min: f32, initial: f32 },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Immutable game balance, in world units and seconds.
///
/// Asteroid speed and score tables are indexed by `3 - size`, so entry 0 is
/// the largest asteroid.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // Screen
    pub screen_width: f32,
    pub screen_height: f32,

    // Player
    pub player_acceleration: f32,
    pub player_max_speed: f32,
    /// Degrees per second at full rotation input.
    pub player_rotation_speed: f32,
    /// Per-tick velocity multiplier while not thrusting.
    pub player_drag: f32,

    // Weapons
    pub bullet_speed: f32,
    pub bullet_lifetime: f32,
    pub bullet_cooldown: f32,
    /// Muzzle distance from the player center.
    pub bullet_position_offset: f32,
    /// Fraction of player velocity inherited by a fired bullet.
    pub bullet_inherit_velocity_factor: f32,
    /// Added to the bullet's facing angle for sprite alignment.
    pub bullet_rotation_offset: f32,
    pub max_laser_charges: u32,
    pub laser_recharge_time: f32,
    pub laser_range: f32,

    // Asteroids
    pub asteroid_speeds: [f32; 3],
    pub asteroid_scores: [u32; 3],
    /// Children spawned when an asteroid of size > 1 is destroyed.
    pub asteroid_fragments: u32,
    pub asteroid_fragment_offset: f32,
    pub asteroid_radius_per_size: f32,

    // Ufo
    pub ufo_speed: f32,
    pub ufo_score: u32,
    pub ufo_radius: f32,

    // Spawning
    pub initial_spawn_delay: f32,
    pub min_spawn_delay: f32,
    /// Delay multiplier applied after every asteroid spawn.
    pub spawn_acceleration: f32,
    pub ufo_spawn_delay_multiplier: f32,
    pub initial_asteroid_count: u32,
    pub default_asteroid_size: u8,
    pub edge_spawn_margin: f32,

    // Collisions
    pub default_collider_radius: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: 20.0,
            screen_height: 15.0,

            player_acceleration: 10.0,
            player_max_speed: 8.0,
            player_rotation_speed: 180.0,
            player_drag: 0.99,

            bullet_speed: 15.0,
            bullet_lifetime: 2.0,
            bullet_cooldown: 0.25,
            bullet_position_offset: 0.5,
            bullet_inherit_velocity_factor: 0.5,
            bullet_rotation_offset: -90.0,
            max_laser_charges: 3,
            laser_recharge_time: 5.0,
            laser_range: 50.0,

            asteroid_speeds: [2.0, 3.0, 4.0],
            asteroid_scores: [20, 50, 100],
            asteroid_fragments: 2,
            asteroid_fragment_offset: 0.5,
            asteroid_radius_per_size: 0.3,

            ufo_speed: 3.0,
            ufo_score: 200,
            ufo_radius: 0.5,

            initial_spawn_delay: 3.0,
            min_spawn_delay: 0.5,
            spawn_acceleration: 0.95,
            ufo_spawn_delay_multiplier: 3.0,
            initial_asteroid_count: 3,
            default_asteroid_size: 3,
            edge_spawn_margin: 1.0,

            default_collider_radius: 0.3,
        }
    }
}

impl GameConfig {
    /// Parse a config from JSON and validate it. Missing fields fall back to
    /// their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    #[inline]
    pub fn half_width(&self) -> f32 {
        self.screen_width / 2.0
    }

    #[inline]
    pub fn half_height(&self) -> f32 {
        self.screen_height / 2.0
    }

    /// Check every documented constraint, reporting the first violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive(self.screen_width, "screen_width")?;
        positive(self.screen_height, "screen_height")?;

        positive(self.player_acceleration, "player_acceleration")?;
        positive(self.player_max_speed, "player_max_speed")?;
        positive(self.player_rotation_speed, "player_rotation_speed")?;
        in_range(self.player_drag, 0.0, 1.0, "player_drag")?;

        positive(self.bullet_speed, "bullet_speed")?;
        positive(self.bullet_lifetime, "bullet_lifetime")?;
        positive(self.bullet_cooldown, "bullet_cooldown")?;
        positive(self.bullet_position_offset, "bullet_position_offset")?;
        in_range(
            self.bullet_inherit_velocity_factor,
            0.0,
            1.0,
            "bullet_inherit_velocity_factor",
        )?;
        positive(self.max_laser_charges as f32, "max_laser_charges")?;
        positive(self.laser_recharge_time, "laser_recharge_time")?;
        positive(self.laser_range, "laser_range")?;

        positive(self.asteroid_speeds[0], "asteroid_speeds[0]")?;
        positive(self.asteroid_speeds[1], "asteroid_speeds[1]")?;
        positive(self.asteroid_speeds[2], "asteroid_speeds[2]")?;
        positive(self.asteroid_scores[0] as f32, "asteroid_scores[0]")?;
        positive(self.asteroid_scores[1] as f32, "asteroid_scores[1]")?;
        positive(self.asteroid_scores[2] as f32, "asteroid_scores[2]")?;
        positive(self.asteroid_fragment_offset, "asteroid_fragment_offset")?;
        positive(self.asteroid_radius_per_size, "asteroid_radius_per_size")?;
        in_range(
            self.default_asteroid_size as f32,
            1.0,
            3.0,
            "default_asteroid_size",
        )?;

        positive(self.ufo_speed, "ufo_speed")?;
        positive(self.ufo_score as f32, "ufo_score")?;
        positive(self.ufo_radius, "ufo_radius")?;

        positive(self.initial_spawn_delay, "initial_spawn_delay")?;
        positive(self.min_spawn_delay, "min_spawn_delay")?;
        in_range(self.spawn_acceleration, 0.01, 0.99, "spawn_acceleration")?;
        positive(
            self.ufo_spawn_delay_multiplier,
            "ufo_spawn_delay_multiplier",
        )?;
        positive(self.initial_asteroid_count as f32, "initial_asteroid_count")?;
        positive(self.edge_spawn_margin, "edge_spawn_margin")?;
        if self.min_spawn_delay > self.initial_spawn_delay {
            return Err(ConfigError::SpawnDelayOrder {
                min: self.min_spawn_delay,
                initial: self.initial_spawn_delay,
            });
        }

        positive(self.default_collider_radius, "default_collider_radius")?;

        Ok(())
    }
}

fn positive(value: f32, field: &'static str) -> Result<(), ConfigError> {
    if value <= 0.0 {
        return Err(ConfigError::NotPositive { field, value });
    }
    Ok(())
}

fn in_range(value: f32, min: f32, max: f32, field: &'static str) -> Result<(), ConfigError> {
    if value < min || value > max {
        return Err(ConfigError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}

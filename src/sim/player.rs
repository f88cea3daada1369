//! The player ship
//!
//! A singleton outside the entity registry, created once per session and
//! reused across restarts via [`Player::reset`].

use glam::Vec2;

use crate::config::GameConfig;
use crate::sim::state::{GameEvent, GameState};
use crate::{heading_to_dir, normalize_degrees, wrap_position};

#[derive(Debug)]
pub struct Player {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Degrees, kept in [0, 360).
    pub rotation: f32,
    pub laser_charges: u32,
    pub laser_cooldown: f32,
    pub thrusting: bool,
    pub alive: bool,
}

impl Player {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            rotation: 0.0,
            laser_charges: config.max_laser_charges,
            laser_cooldown: 0.0,
            thrusting: false,
            alive: true,
        }
    }

    /// Back to spawn defaults: origin, at rest, facing 0 degrees, full laser
    /// charges, alive.
    pub fn reset(&mut self, config: &GameConfig) {
        self.position = Vec2::ZERO;
        self.velocity = Vec2::ZERO;
        self.rotation = 0.0;
        self.laser_charges = config.max_laser_charges;
        self.laser_cooldown = 0.0;
        self.thrusting = false;
        self.alive = true;
    }

    /// Current speed, for the query surface.
    #[inline]
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Unit vector along the current facing.
    #[inline]
    pub fn heading(&self) -> Vec2 {
        heading_to_dir(self.rotation)
    }

    /// Turn by `input` (in [-1, 1]) scaled by the configured rotation speed.
    pub fn rotate(&mut self, input: f32, dt: f32, config: &GameConfig) {
        self.rotation =
            normalize_degrees(self.rotation + input * config.player_rotation_speed * dt);
    }

    /// Accelerate along the heading while thrusting, clamped to max speed;
    /// otherwise decay velocity by the drag factor (exponential falloff, not
    /// a fixed deceleration).
    pub fn thrust(&mut self, thrusting: bool, dt: f32, config: &GameConfig) {
        self.thrusting = thrusting;

        if thrusting {
            self.velocity += self.heading() * config.player_acceleration * dt;

            let speed = self.velocity.length();
            if speed > config.player_max_speed {
                self.velocity = self.velocity / speed * config.player_max_speed;
            }
        } else {
            self.velocity *= config.player_drag;
        }
    }

    /// Integrate and wrap, same torus rules as the entities.
    pub fn update_position(&mut self, dt: f32, config: &GameConfig) {
        self.position += self.velocity * dt;
        self.position = wrap_position(self.position, config.half_width(), config.half_height());
    }

    /// Accumulate recharge time while below max charges. One full recharge
    /// interval yields exactly one charge.
    pub fn update_laser(&mut self, dt: f32, config: &GameConfig, state: &mut GameState) {
        if self.laser_charges < config.max_laser_charges {
            self.laser_cooldown += dt;

            if self.laser_cooldown >= config.laser_recharge_time {
                self.laser_charges += 1;
                self.laser_cooldown = 0.0;
                state.push_event(GameEvent::LaserChargesChanged(self.laser_charges));
            }
        }
    }

    /// Spend one charge if available. Fails without side effects when empty.
    pub fn try_fire_laser(&mut self, state: &mut GameState) -> bool {
        if self.laser_charges > 0 {
            self.laser_charges -= 1;
            self.laser_cooldown = 0.0;
            state.push_event(GameEvent::LaserChargesChanged(self.laser_charges));
            return true;
        }

        false
    }

    /// Idempotent: only the first call flips `alive` and fires the
    /// destroyed notification.
    pub fn kill(&mut self, state: &mut GameState) {
        if self.alive {
            self.alive = false;
            state.push_event(GameEvent::PlayerDestroyed);
        }
    }
}

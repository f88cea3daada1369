//! Spawn scheduling and entity construction
//!
//! The factory is the only place entities are built, and the only consumer
//! of randomness in the simulation. All rolls come from one seeded Pcg32
//! stream so a session replays identically from its seed.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::config::GameConfig;
use crate::sim::entity::Entity;
use crate::sim::registry::EntityRegistry;
use crate::sim::state::GameState;

/// Spawns hazards on a decaying cadence and builds every entity kind.
#[derive(Debug)]
pub struct EntityFactory {
    rng: Pcg32,
    asteroid_timer: f32,
    ufo_timer: f32,
    current_delay: f32,
}

impl EntityFactory {
    pub fn new(config: &GameConfig, seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            asteroid_timer: 0.0,
            ufo_timer: 0.0,
            current_delay: config.initial_spawn_delay,
        }
    }

    /// Advance both spawn timers. Frozen once the game is over.
    ///
    /// Every asteroid spawn tightens the cadence:
    /// `delay = max(min_delay, delay * acceleration)`. The ufo threshold
    /// tracks the current decayed delay, not the initial one.
    pub fn update(
        &mut self,
        dt: f32,
        config: &GameConfig,
        state: &mut GameState,
        registry: &mut EntityRegistry,
    ) {
        if state.is_game_over() {
            return;
        }

        self.asteroid_timer += dt;
        self.ufo_timer += dt;

        if self.asteroid_timer >= self.current_delay {
            self.spawn_asteroid(config, state, registry, None, None);
            self.asteroid_timer = 0.0;
            self.current_delay =
                (self.current_delay * config.spawn_acceleration).max(config.min_spawn_delay);
            log::debug!("asteroid spawn delay now {:.2}s", self.current_delay);
        }

        if self.ufo_timer >= self.current_delay * config.ufo_spawn_delay_multiplier {
            self.spawn_ufo(config, state, registry);
            self.ufo_timer = 0.0;
        }
    }

    /// Queue a new asteroid. With no position it spawns just off a random
    /// screen edge; with no size it uses the configured default.
    pub fn spawn_asteroid(
        &mut self,
        config: &GameConfig,
        state: &mut GameState,
        registry: &mut EntityRegistry,
        position: Option<Vec2>,
        size: Option<u8>,
    ) {
        let position = position.unwrap_or_else(|| self.random_edge_position(config));
        let size = size.unwrap_or(config.default_asteroid_size);
        let velocity = self.random_velocity(config.asteroid_speeds[(3 - size) as usize]);
        let id = state.next_entity_id();
        registry.add(Entity::asteroid(id, position, velocity, size, &mut self.rng));
    }

    pub fn spawn_ufo(
        &mut self,
        config: &GameConfig,
        state: &mut GameState,
        registry: &mut EntityRegistry,
    ) {
        let position = self.random_edge_position(config);
        let id = state.next_entity_id();
        registry.add(Entity::ufo(id, position));
    }

    /// Queue a bullet with partial momentum inheritance: bullets fired
    /// prograde fly faster than retrograde ones.
    pub fn spawn_bullet(
        &mut self,
        config: &GameConfig,
        state: &mut GameState,
        registry: &mut EntityRegistry,
        position: Vec2,
        direction: Vec2,
        player_velocity: Vec2,
    ) {
        let velocity =
            direction * config.bullet_speed + player_velocity * config.bullet_inherit_velocity_factor;
        let rotation = direction.y.atan2(direction.x).to_degrees() + config.bullet_rotation_offset;
        let id = state.next_entity_id();
        registry.add(Entity::bullet(
            id,
            position,
            velocity,
            rotation,
            config.bullet_lifetime,
        ));
    }

    /// Zero the timers and restore the initial spawn delay.
    pub fn reset(&mut self, config: &GameConfig) {
        self.asteroid_timer = 0.0;
        self.ufo_timer = 0.0;
        self.current_delay = config.initial_spawn_delay;
    }

    /// One of the four screen edges, uniform along the edge, one margin
    /// beyond the boundary on the perpendicular axis.
    fn random_edge_position(&mut self, config: &GameConfig) -> Vec2 {
        let half_w = config.half_width();
        let half_h = config.half_height();
        let margin = config.edge_spawn_margin;

        match self.rng.random_range(0..4u8) {
            0 => Vec2::new(-half_w - margin, self.rng.random_range(-half_h..half_h)),
            1 => Vec2::new(half_w + margin, self.rng.random_range(-half_h..half_h)),
            2 => Vec2::new(self.rng.random_range(-half_w..half_w), -half_h - margin),
            _ => Vec2::new(self.rng.random_range(-half_w..half_w), half_h + margin),
        }
    }

    fn random_velocity(&mut self, speed: f32) -> Vec2 {
        let angle = self.rng.random_range(0.0..std::f32::consts::TAU);
        Vec2::new(angle.cos(), angle.sin()) * speed
    }
}

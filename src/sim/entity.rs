//! Transient entities: asteroids, bullets and ufos
//!
//! One struct, one closed set of variants. Per-kind behavior is a single
//! `match` in [`Entity::update`]; the set of kinds is exhaustive so adding a
//! variant is a compile error everywhere it matters.

use glam::Vec2;
use rand::Rng;

use crate::config::GameConfig;
use crate::wrap_position;

/// Discriminant for [`Entity`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Asteroid,
    Bullet,
    Ufo,
}

/// Per-variant state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Body {
    Asteroid {
        /// 1 (smallest) to 3 (largest).
        size: u8,
        /// Degrees per second, fixed at spawn.
        spin: f32,
    },
    Bullet {
        /// Seconds remaining before the bullet expires.
        lifetime: f32,
    },
    Ufo,
}

/// A single registry-owned entity.
///
/// Entities are mutated only by their own [`update`](Entity::update) (and
/// [`retarget`](Entity::retarget) for ufos). [`destroy`](Entity::destroy)
/// flips `active` synchronously; removal from the registry is a separate,
/// deferred request.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub id: u32,
    pub position: Vec2,
    pub velocity: Vec2,
    /// Degrees.
    pub rotation: f32,
    pub active: bool,
    pub body: Body,
}

/// Read-only view of an entity for the query surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntitySnapshot {
    pub id: u32,
    pub kind: EntityKind,
    pub position: Vec2,
    pub rotation: f32,
    pub active: bool,
    /// Asteroid size; `None` for other kinds.
    pub size: Option<u8>,
}

impl Entity {
    /// Spawn rotation and spin are rolled once here and never re-randomized.
    pub fn asteroid(
        id: u32,
        position: Vec2,
        velocity: Vec2,
        size: u8,
        rng: &mut impl Rng,
    ) -> Self {
        Self {
            id,
            position,
            velocity,
            rotation: rng.random_range(0.0..360.0),
            active: true,
            body: Body::Asteroid {
                size,
                spin: rng.random_range(-90.0..=90.0),
            },
        }
    }

    pub fn bullet(id: u32, position: Vec2, velocity: Vec2, rotation: f32, lifetime: f32) -> Self {
        Self {
            id,
            position,
            velocity,
            rotation,
            active: true,
            body: Body::Bullet { lifetime },
        }
    }

    /// Ufos spawn with zero velocity; the entity phase retargets them before
    /// their first integration step.
    pub fn ufo(id: u32, position: Vec2) -> Self {
        Self {
            id,
            position,
            velocity: Vec2::ZERO,
            rotation: 0.0,
            active: true,
            body: Body::Ufo,
        }
    }

    #[inline]
    pub fn kind(&self) -> EntityKind {
        match self.body {
            Body::Asteroid { .. } => EntityKind::Asteroid,
            Body::Bullet { .. } => EntityKind::Bullet,
            Body::Ufo => EntityKind::Ufo,
        }
    }

    /// Asteroids and ufos threaten the player; bullets do not.
    #[inline]
    pub fn is_hazard(&self) -> bool {
        matches!(self.body, Body::Asteroid { .. } | Body::Ufo)
    }

    /// Effective circle radius for overlap tests.
    pub fn collision_radius(&self, config: &GameConfig) -> f32 {
        match self.body {
            Body::Asteroid { size, .. } => size as f32 * config.asteroid_radius_per_size,
            Body::Ufo => config.ufo_radius,
            Body::Bullet { .. } => config.default_collider_radius,
        }
    }

    /// Advance one tick: integrate, run variant behavior, wrap.
    ///
    /// A bullet whose lifetime runs out deactivates and returns before the
    /// wrap, so its final position may sit outside the screen bounds.
    pub fn update(&mut self, dt: f32, config: &GameConfig) {
        if !self.active {
            return;
        }

        self.position += self.velocity * dt;

        match &mut self.body {
            Body::Asteroid { spin, .. } => {
                self.rotation += *spin * dt;
            }
            Body::Bullet { lifetime } => {
                *lifetime -= dt;
                if *lifetime <= 0.0 {
                    self.active = false;
                    return;
                }
            }
            Body::Ufo => {}
        }

        self.position = wrap_position(self.position, config.half_width(), config.half_height());
    }

    /// Point the ufo at `target` at the given speed. No-op for other kinds
    /// and for inactive entities; callers skip it while the player is dead,
    /// leaving the last heading in place.
    pub fn retarget(&mut self, target: Vec2, speed: f32) {
        if !self.active || !matches!(self.body, Body::Ufo) {
            return;
        }
        self.velocity = (target - self.position).normalize_or_zero() * speed;
    }

    /// Deactivate synchronously. The entity stays in the registry until a
    /// deferred removal commits.
    pub fn destroy(&mut self) {
        self.active = false;
    }

    pub fn snapshot(&self) -> EntitySnapshot {
        EntitySnapshot {
            id: self.id,
            kind: self.kind(),
            position: self.position,
            rotation: self.rotation,
            active: self.active,
            size: match self.body {
                Body::Asteroid { size, .. } => Some(size),
                _ => None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(7)
    }

    #[test]
    fn asteroid_integrates_and_spins() {
        let config = GameConfig::default();
        let mut asteroid = Entity::asteroid(1, Vec2::ZERO, Vec2::new(4.0, 0.0), 3, &mut rng());
        let start_rotation = asteroid.rotation;
        let spin = match asteroid.body {
            Body::Asteroid { spin, .. } => spin,
            _ => unreachable!(),
        };

        asteroid.update(0.5, &config);

        assert_eq!(asteroid.position, Vec2::new(2.0, 0.0));
        assert!((asteroid.rotation - (start_rotation + spin * 0.5)).abs() < 1e-4);
    }

    #[test]
    fn asteroid_wraps_past_right_edge() {
        // 20x15 screen: x just past +10 snaps to -10.
        let config = GameConfig::default();
        let mut asteroid = Entity::asteroid(1, Vec2::ZERO, Vec2::new(4.0, 0.0), 3, &mut rng());

        asteroid.update(2.6, &config);

        assert_eq!(asteroid.position.x, -10.0);
    }

    #[test]
    fn spawn_randomization_is_within_documented_ranges() {
        let mut rng = rng();
        for _ in 0..64 {
            let asteroid = Entity::asteroid(1, Vec2::ZERO, Vec2::ZERO, 2, &mut rng);
            let spin = match asteroid.body {
                Body::Asteroid { spin, .. } => spin,
                _ => unreachable!(),
            };
            assert!((0.0..360.0).contains(&asteroid.rotation));
            assert!((-90.0..=90.0).contains(&spin));
        }
    }

    #[test]
    fn inactive_entity_does_not_move() {
        let config = GameConfig::default();
        let mut ufo = Entity::ufo(1, Vec2::new(1.0, 1.0));
        ufo.velocity = Vec2::new(3.0, 0.0);
        ufo.destroy();

        ufo.update(1.0, &config);

        assert_eq!(ufo.position, Vec2::new(1.0, 1.0));
    }

    #[test]
    fn expired_bullet_deactivates_and_skips_wrap() {
        let config = GameConfig::default();
        let mut bullet = Entity::bullet(1, Vec2::new(9.95, 0.0), Vec2::new(1.0, 0.0), 0.0, 0.05);

        bullet.update(0.1, &config);

        assert!(!bullet.active);
        // Past the edge but unwrapped: lifetime expiry returns early.
        assert!((bullet.position.x - 10.05).abs() < 1e-4);
    }

    #[test]
    fn live_bullet_wraps_normally() {
        let config = GameConfig::default();
        let mut bullet = Entity::bullet(1, Vec2::new(9.95, 0.0), Vec2::new(1.0, 0.0), 0.0, 2.0);

        bullet.update(0.1, &config);

        assert!(bullet.active);
        assert_eq!(bullet.position.x, -10.0);
    }

    #[test]
    fn ufo_retargets_toward_player() {
        let mut ufo = Entity::ufo(1, Vec2::ZERO);
        ufo.retarget(Vec2::new(3.0, 4.0), 3.0);

        assert!((ufo.velocity - Vec2::new(1.8, 2.4)).length() < 1e-5);
    }

    #[test]
    fn retarget_is_a_no_op_for_asteroids() {
        let mut asteroid = Entity::asteroid(1, Vec2::ZERO, Vec2::new(1.0, 0.0), 2, &mut rng());
        asteroid.retarget(Vec2::new(5.0, 5.0), 3.0);
        assert_eq!(asteroid.velocity, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn collision_radius_scales_with_asteroid_size() {
        let config = GameConfig::default();
        let small = Entity::asteroid(1, Vec2::ZERO, Vec2::ZERO, 1, &mut rng());
        let large = Entity::asteroid(2, Vec2::ZERO, Vec2::ZERO, 3, &mut rng());

        assert!((small.collision_radius(&config) - 0.3).abs() < 1e-6);
        assert!((large.collision_radius(&config) - 0.9).abs() < 1e-6);
    }
}

//! Thin per-tick drivers for the player, weapons and entity phases
//!
//! Each driver translates the abstract input signals into calls on the core
//! types. Only the weapon driver carries state of its own (the bullet
//! cooldown); the other phases are plain functions the orchestrator calls in
//! a fixed order.

use crate::config::GameConfig;
use crate::sim::collision;
use crate::sim::entity::Body;
use crate::sim::orchestrator::TickInput;
use crate::sim::player::Player;
use crate::sim::registry::EntityRegistry;
use crate::sim::spawn::EntityFactory;
use crate::sim::state::{GameEvent, GameState};

/// Player phase: rotate, thrust, integrate, recharge. Dead players are
/// frozen; nothing here runs once the ship is gone.
pub fn update_player(
    player: &mut Player,
    input: &TickInput,
    dt: f32,
    config: &GameConfig,
    state: &mut GameState,
) {
    if !player.alive {
        return;
    }

    player.rotate(input.rotation, dt, config);
    player.thrust(input.thrusting, dt, config);
    player.update_position(dt, config);
    player.update_laser(dt, config, state);
}

/// Entity phase: retarget ufos, advance every entity, sweep expired
/// bullets, then commit all pending registry changes. The commit here is the
/// single point per tick where the visible entity list changes.
pub fn update_entities(
    registry: &mut EntityRegistry,
    player: &Player,
    dt: f32,
    config: &GameConfig,
) {
    for entity in registry.entities_mut() {
        // Homing, not pathfinding: a dead player stops retargeting and the
        // ufo keeps its last heading.
        if player.alive {
            entity.retarget(player.position, config.ufo_speed);
        }
        entity.update(dt, config);
    }

    let expired: Vec<u32> = registry
        .entities()
        .iter()
        .filter(|e| !e.active && matches!(e.body, Body::Bullet { .. }))
        .map(|e| e.id)
        .collect();
    for id in expired {
        registry.remove(id);
    }

    registry.commit();
}

/// Weapon phase driver. Owns the bullet cooldown between ticks.
#[derive(Debug, Default)]
pub struct WeaponController {
    bullet_cooldown: f32,
}

impl WeaponController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tick the cooldown and handle the edge-triggered fire inputs. A laser
    /// only fires when a charge is available; the ray resolves immediately,
    /// before this tick's entity commit.
    #[allow(clippy::too_many_arguments)]
    pub fn update(
        &mut self,
        input: &TickInput,
        dt: f32,
        config: &GameConfig,
        player: &mut Player,
        state: &mut GameState,
        registry: &mut EntityRegistry,
        spawner: &mut EntityFactory,
    ) {
        if !player.alive {
            return;
        }

        self.bullet_cooldown = (self.bullet_cooldown - dt).max(0.0);

        if input.fire_bullet && self.bullet_cooldown <= 0.0 {
            let direction = player.heading();
            let position = player.position + direction * config.bullet_position_offset;
            spawner.spawn_bullet(config, state, registry, position, direction, player.velocity);
            self.bullet_cooldown = config.bullet_cooldown;
        }

        if input.fire_laser && player.try_fire_laser(state) {
            let origin = player.position;
            let direction = player.heading();
            collision::handle_laser_fire(origin, direction, config, state, registry, spawner);
            state.push_event(GameEvent::LaserFired { origin, direction });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::{Entity, EntityKind};
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn dead_player_is_frozen() {
        let config = GameConfig::default();
        let mut state = GameState::new();
        let mut player = Player::new(&config);
        player.kill(&mut state);
        let position = player.position;

        let input = TickInput {
            thrusting: true,
            rotation: 1.0,
            ..TickInput::default()
        };
        update_player(&mut player, &input, 1.0, &config, &mut state);

        assert_eq!(player.position, position);
        assert_eq!(player.rotation, 0.0);
    }

    #[test]
    fn player_phase_runs_rotate_thrust_move_recharge() {
        let config = GameConfig::default();
        let mut state = GameState::new();
        let mut player = Player::new(&config);
        player.try_fire_laser(&mut state);

        let input = TickInput {
            thrusting: true,
            rotation: 0.5,
            ..TickInput::default()
        };
        update_player(&mut player, &input, 0.1, &config, &mut state);

        assert!(player.rotation > 0.0);
        assert!(player.speed() > 0.0);
        assert!(player.laser_cooldown > 0.0);
    }

    #[test]
    fn entity_phase_advances_and_commits() {
        let config = GameConfig::default();
        let player = Player::new(&config);
        let mut registry = EntityRegistry::new();
        let mut rng = Pcg32::seed_from_u64(3);
        registry.add(Entity::asteroid(
            1,
            Vec2::ZERO,
            Vec2::new(2.0, 0.0),
            2,
            &mut rng,
        ));
        registry.commit();
        registry.add(Entity::bullet(2, Vec2::ZERO, Vec2::ZERO, 0.0, 1.0));

        update_entities(&mut registry, &player, 0.5, &config);

        // The asteroid moved, and the pending bullet was committed without
        // being updated this tick.
        assert_eq!(registry.get(1).unwrap().position, Vec2::new(1.0, 0.0));
        let bullet = registry.get(2).unwrap();
        match bullet.body {
            Body::Bullet { lifetime } => assert_eq!(lifetime, 1.0),
            _ => panic!("expected a bullet"),
        }
    }

    #[test]
    fn entity_phase_retargets_ufos_before_moving_them() {
        let config = GameConfig::default();
        let mut player = Player::new(&config);
        player.position = Vec2::new(4.0, 0.0);
        let mut registry = EntityRegistry::new();
        registry.add(Entity::ufo(1, Vec2::ZERO));
        registry.commit();

        update_entities(&mut registry, &player, 1.0, &config);

        // Speed 3 toward +x for one second.
        let ufo = registry.get(1).unwrap();
        assert!((ufo.position - Vec2::new(3.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn dead_player_stops_retargeting() {
        let config = GameConfig::default();
        let mut state = GameState::new();
        let mut player = Player::new(&config);
        player.position = Vec2::new(4.0, 0.0);
        let mut registry = EntityRegistry::new();
        registry.add(Entity::ufo(1, Vec2::ZERO));
        registry.commit();
        update_entities(&mut registry, &player, 0.5, &config);
        let heading_before = registry.get(1).unwrap().velocity;

        player.kill(&mut state);
        player.position = Vec2::new(-4.0, 0.0);
        update_entities(&mut registry, &player, 0.5, &config);

        assert_eq!(registry.get(1).unwrap().velocity, heading_before);
    }

    #[test]
    fn expired_bullets_leave_the_registry() {
        let config = GameConfig::default();
        let player = Player::new(&config);
        let mut registry = EntityRegistry::new();
        registry.add(Entity::bullet(1, Vec2::ZERO, Vec2::ZERO, 0.0, 0.1));
        registry.commit();

        update_entities(&mut registry, &player, 0.2, &config);

        assert!(registry.entities().is_empty());
    }

    #[test]
    fn bullet_fires_on_edge_and_respects_cooldown() {
        let config = GameConfig::default();
        let mut state = GameState::new();
        let mut player = Player::new(&config);
        let mut registry = EntityRegistry::new();
        let mut spawner = EntityFactory::new(&config, 1);
        let mut weapons = WeaponController::new();

        let fire = TickInput {
            fire_bullet: true,
            ..TickInput::default()
        };
        weapons.update(
            &fire,
            0.01,
            &config,
            &mut player,
            &mut state,
            &mut registry,
            &mut spawner,
        );
        weapons.update(
            &fire,
            0.01,
            &config,
            &mut player,
            &mut state,
            &mut registry,
            &mut spawner,
        );
        registry.commit();

        // Second press lands inside the cooldown window.
        assert_eq!(registry.iter_active(EntityKind::Bullet).count(), 1);
        let bullet = registry.entities().first().unwrap();
        assert!((bullet.position - Vec2::new(config.bullet_position_offset, 0.0)).length() < 1e-5);
    }

    #[test]
    fn cooldown_expiry_allows_the_next_shot() {
        let config = GameConfig::default();
        let mut state = GameState::new();
        let mut player = Player::new(&config);
        let mut registry = EntityRegistry::new();
        let mut spawner = EntityFactory::new(&config, 1);
        let mut weapons = WeaponController::new();

        let fire = TickInput {
            fire_bullet: true,
            ..TickInput::default()
        };
        let idle = TickInput::default();
        weapons.update(
            &fire,
            0.01,
            &config,
            &mut player,
            &mut state,
            &mut registry,
            &mut spawner,
        );
        weapons.update(
            &idle,
            config.bullet_cooldown,
            &config,
            &mut player,
            &mut state,
            &mut registry,
            &mut spawner,
        );
        weapons.update(
            &fire,
            0.01,
            &config,
            &mut player,
            &mut state,
            &mut registry,
            &mut spawner,
        );
        registry.commit();

        assert_eq!(registry.iter_active(EntityKind::Bullet).count(), 2);
    }

    #[test]
    fn laser_fire_spends_a_charge_and_emits_the_event() {
        let config = GameConfig::default();
        let mut state = GameState::new();
        let mut player = Player::new(&config);
        let mut registry = EntityRegistry::new();
        let mut spawner = EntityFactory::new(&config, 1);
        let mut weapons = WeaponController::new();

        let input = TickInput {
            fire_laser: true,
            ..TickInput::default()
        };
        weapons.update(
            &input,
            0.01,
            &config,
            &mut player,
            &mut state,
            &mut registry,
            &mut spawner,
        );

        assert_eq!(player.laser_charges, config.max_laser_charges - 1);
        let events = state.drain_events();
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::LaserFired { .. }
        )));
    }

    #[test]
    fn laser_without_charges_does_nothing() {
        let config = GameConfig::default();
        let mut state = GameState::new();
        let mut player = Player::new(&config);
        let mut registry = EntityRegistry::new();
        let mut spawner = EntityFactory::new(&config, 1);
        let mut weapons = WeaponController::new();
        while player.try_fire_laser(&mut state) {}
        state.drain_events();

        let input = TickInput {
            fire_laser: true,
            ..TickInput::default()
        };
        weapons.update(
            &input,
            0.01,
            &config,
            &mut player,
            &mut state,
            &mut registry,
            &mut spawner,
        );

        assert!(state.drain_events().is_empty());
    }
}

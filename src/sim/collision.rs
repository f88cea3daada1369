//! Collision resolution: hazards vs player, bullets vs hazards, laser rays
//!
//! The tricky part of the tick: every pass reads the committed entity list
//! while destruction happens in two steps. `destroy()` flips the active flag
//! synchronously, hiding the entity from the rest of the pass; the registry
//! removal is deferred to the next commit. Getting that split wrong produces
//! duplicated hits.

use glam::Vec2;

use crate::config::GameConfig;
use crate::sim::entity::Body;
use crate::sim::player::Player;
use crate::sim::registry::EntityRegistry;
use crate::sim::spawn::EntityFactory;
use crate::sim::state::GameState;

/// Run the per-tick collision passes. Skipped entirely once the game is over.
///
/// Pass 1: hazards vs the living player. The first overlap kills the player
/// and ends the game; at most one hazard causes death per tick and the
/// bullet pass does not run on that tick.
///
/// Pass 2: bullets vs hazards. Bullet ids are snapshotted up front so the
/// scan stays stable while bullets are destroyed mid-pass. Each bullet kills
/// at most one hazard; a hazard destroyed earlier in the pass reads as
/// inactive and is skipped by later bullets.
pub fn check_collisions(
    config: &GameConfig,
    player: &mut Player,
    state: &mut GameState,
    registry: &mut EntityRegistry,
    spawner: &mut EntityFactory,
) {
    if state.is_game_over() {
        return;
    }

    if player.alive {
        let hit = registry.entities().iter().any(|entity| {
            entity.active
                && entity.is_hazard()
                && overlaps(player.position, entity.position, entity.collision_radius(config))
        });

        if hit {
            player.kill(state);
            state.set_game_over();
            return;
        }
    }

    let bullet_ids: Vec<u32> = registry
        .entities()
        .iter()
        .filter(|e| e.active && matches!(e.body, Body::Bullet { .. }))
        .map(|e| e.id)
        .collect();

    for bullet_id in bullet_ids {
        let bullet_position = match registry.get(bullet_id) {
            Some(bullet) if bullet.active => bullet.position,
            _ => continue,
        };

        let target = registry
            .entities()
            .iter()
            .find(|entity| {
                entity.active
                    && entity.is_hazard()
                    && overlaps(
                        bullet_position,
                        entity.position,
                        entity.collision_radius(config),
                    )
            })
            .map(|entity| entity.id);

        if let Some(target_id) = target {
            if let Some(bullet) = registry.get_mut(bullet_id) {
                bullet.destroy();
            }
            registry.remove(bullet_id);
            resolve_hazard_hit(target_id, config, state, registry, spawner);
        }
    }
}

/// Instantaneous multi-target beam from `origin` along `direction` (unit
/// vector). Unlike a bullet, the ray damages every hazard it touches within
/// range in a single call.
pub fn handle_laser_fire(
    origin: Vec2,
    direction: Vec2,
    config: &GameConfig,
    state: &mut GameState,
    registry: &mut EntityRegistry,
    spawner: &mut EntityFactory,
) {
    let hits: Vec<u32> = registry
        .entities()
        .iter()
        .filter(|entity| {
            entity.active
                && entity.is_hazard()
                && ray_hits(
                    origin,
                    direction,
                    entity.position,
                    entity.collision_radius(config),
                    config.laser_range,
                )
        })
        .map(|entity| entity.id)
        .collect();

    for target_id in hits {
        resolve_hazard_hit(target_id, config, state, registry, spawner);
    }
}

/// Destroy a hazard, queue its removal, score it, and for asteroids of
/// size > 1 spawn the configured fragments at fixed angular offsets.
fn resolve_hazard_hit(
    target_id: u32,
    config: &GameConfig,
    state: &mut GameState,
    registry: &mut EntityRegistry,
    spawner: &mut EntityFactory,
) {
    let Some(entity) = registry.get_mut(target_id) else {
        return;
    };
    let position = entity.position;
    let asteroid_size = match entity.body {
        Body::Asteroid { size, .. } => Some(size),
        Body::Ufo => None,
        Body::Bullet { .. } => return,
    };
    entity.destroy();
    registry.remove(target_id);

    match asteroid_size {
        Some(size) => {
            state.add_score(config.asteroid_scores[(3 - size) as usize]);

            if size > 1 && config.asteroid_fragments > 0 {
                // Fragments fan out at evenly spaced angles starting at 0,
                // deterministic given the fragment count.
                let step = 360.0 / config.asteroid_fragments as f32;
                for i in 0..config.asteroid_fragments {
                    let angle = (i as f32 * step).to_radians();
                    let offset =
                        Vec2::new(angle.cos(), angle.sin()) * config.asteroid_fragment_offset;
                    spawner.spawn_asteroid(
                        config,
                        state,
                        registry,
                        Some(position + offset),
                        Some(size - 1),
                    );
                }
            }
        }
        None => state.add_score(config.ufo_score),
    }
}

#[inline]
fn overlaps(point: Vec2, center: Vec2, radius: f32) -> bool {
    point.distance(center) < radius
}

/// A hazard is hit when its projection onto the ray lies in [0, range] and
/// the perpendicular distance from the ray is inside its collision radius.
fn ray_hits(origin: Vec2, direction: Vec2, target: Vec2, radius: f32, range: f32) -> bool {
    let to_target = target - origin;
    let along = to_target.dot(direction);

    if along < 0.0 || along > range {
        return false;
    }

    let closest = origin + direction * along;
    closest.distance(target) < radius
}

//! Top-level tick state machine
//!
//! Composes the whole simulation and advances it one tick at a time in a
//! fixed phase order: player, weapons, entities (with the registry commit),
//! spawner, collisions. While the game is over the world is frozen; a
//! restart input re-initializes the session and deliberately skips the rest
//! of that tick's processing.

use crate::config::{ConfigError, GameConfig};
use crate::sim::collision;
use crate::sim::controllers::{self, WeaponController};
use crate::sim::entity::EntitySnapshot;
use crate::sim::player::Player;
use crate::sim::registry::EntityRegistry;
use crate::sim::spawn::EntityFactory;
use crate::sim::state::{GameEvent, GameState};

/// Abstract input signals for one tick. The embedder samples its devices
/// once per tick; `fire_bullet`, `fire_laser` and `restart` are
/// edge-triggered (true only on the tick the button went down).
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub thrusting: bool,
    /// Turn input in [-1, 1].
    pub rotation: f32,
    pub fire_bullet: bool,
    pub fire_laser: bool,
    pub restart: bool,
}

/// Owns every simulation component and drives the per-tick phase order.
#[derive(Debug)]
pub struct GameOrchestrator {
    config: GameConfig,
    state: GameState,
    player: Player,
    registry: EntityRegistry,
    spawner: EntityFactory,
    weapons: WeaponController,
}

impl GameOrchestrator {
    /// Validate the config and start a fresh session. A bad config is fatal
    /// here; nothing is constructed.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;

        let player = Player::new(&config);
        let spawner = EntityFactory::new(&config, seed);
        let mut orchestrator = Self {
            config,
            state: GameState::new(),
            player,
            registry: EntityRegistry::new(),
            spawner,
            weapons: WeaponController::new(),
        };
        orchestrator.initialize();
        Ok(orchestrator)
    }

    /// Reset every component and pre-spawn the initial asteroid field.
    pub fn initialize(&mut self) {
        self.state.reset();
        self.player.reset(&self.config);
        self.registry.clear();
        self.spawner.reset(&self.config);

        for _ in 0..self.config.initial_asteroid_count {
            self.spawner
                .spawn_asteroid(&self.config, &mut self.state, &mut self.registry, None, None);
        }
        self.registry.commit();

        log::info!(
            "session initialized with {} asteroids",
            self.config.initial_asteroid_count
        );
    }

    /// Advance one tick. `dt` must be non-negative; zero is valid.
    pub fn update(&mut self, dt: f32, input: &TickInput) {
        if self.handle_restart(input) {
            return;
        }
        if self.state.is_game_over() {
            return;
        }

        controllers::update_player(&mut self.player, input, dt, &self.config, &mut self.state);
        self.weapons.update(
            input,
            dt,
            &self.config,
            &mut self.player,
            &mut self.state,
            &mut self.registry,
            &mut self.spawner,
        );
        controllers::update_entities(&mut self.registry, &self.player, dt, &self.config);
        self.spawner
            .update(dt, &self.config, &mut self.state, &mut self.registry);
        collision::check_collisions(
            &self.config,
            &mut self.player,
            &mut self.state,
            &mut self.registry,
            &mut self.spawner,
        );
    }

    /// The restart tick does no simulation work at all.
    fn handle_restart(&mut self, input: &TickInput) -> bool {
        if input.restart && self.state.is_game_over() {
            log::info!("restarting after game over (final score {})", self.state.score());
            self.initialize();
            return true;
        }

        false
    }

    #[inline]
    pub fn score(&self) -> u32 {
        self.state.score()
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    #[inline]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Read-only player state for presentation.
    #[inline]
    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Snapshots of the committed, active entities.
    pub fn entity_snapshots(&self) -> Vec<EntitySnapshot> {
        self.registry
            .entities()
            .iter()
            .filter(|e| e.active)
            .map(|e| e.snapshot())
            .collect()
    }

    /// Take all notifications queued since the last drain.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }
}

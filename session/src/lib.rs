#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative level session state for Neural Break.
//!
//! The [`LevelManager`] owns the active level configuration, the kill
//! counters accumulated against it and the injected spawner collaborator.
//! Adapters drive it through [`apply`] and observe it through [`query`].

pub mod progress;

use std::time::Duration;

use log::{debug, error, info, warn};
use neural_break_core::{
    Command, EnemyKind, Event, GameMode, LevelConfig, LevelId, LevelObjectives, SpawnControl,
    TOTAL_LEVELS,
};
use neural_break_system_level_generation::LevelGenerator;
use thiserror::Error;

pub use crate::progress::LevelProgress;

/// Lifecycle of the level state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LevelState {
    /// No level has been loaded yet.
    Idle,
    /// A level is loaded and kills accumulate toward its objectives.
    LevelActive,
    /// Objectives were met; spawning is halted until the level is advanced.
    ObjectivesComplete,
    /// The final campaign level was cleared. No further transitions occur.
    GameComplete,
}

/// Reasons a session transition had no effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum LevelError {
    /// No spawner collaborator is attached, so levels cannot be loaded.
    #[error("no spawner is attached to the level manager")]
    SpawnerUnavailable,
    /// The requested transition needs a loaded level.
    #[error("no level is active")]
    NoActiveLevel,
    /// The campaign is finished and accepts no further transitions.
    #[error("the game is already complete")]
    GameComplete,
    /// Rogue layers can only be advanced during a rogue run.
    #[error("cannot advance rogue layers while in {0:?} mode")]
    NotInRogueMode(GameMode),
    /// Campaign levels and rogue layers advance only once their objectives are met.
    #[error("objectives of {0} are not complete")]
    ObjectivesIncomplete(LevelId),
}

/// Level progression state machine.
#[derive(Debug)]
pub struct LevelManager<S> {
    generator: LevelGenerator,
    spawner: Option<S>,
    state: LevelState,
    config: Option<LevelConfig>,
    objectives: LevelObjectives,
    progress: LevelProgress,
    level_elapsed: Duration,
    game_elapsed: Duration,
}

impl<S> Default for LevelManager<S> {
    fn default() -> Self {
        Self {
            generator: LevelGenerator::new(),
            spawner: None,
            state: LevelState::Idle,
            config: None,
            objectives: LevelObjectives::default(),
            progress: LevelProgress::new(),
            level_elapsed: Duration::ZERO,
            game_elapsed: Duration::ZERO,
        }
    }
}

impl<S: SpawnControl> LevelManager<S> {
    /// Creates an idle manager without a spawner.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an idle manager driving the provided spawner.
    #[must_use]
    pub fn with_spawner(spawner: S) -> Self {
        Self {
            spawner: Some(spawner),
            ..Self::default()
        }
    }

    /// Attaches a spawner, returning the previously attached one.
    pub fn attach_spawner(&mut self, spawner: S) -> Option<S> {
        self.spawner.replace(spawner)
    }

    /// Detaches the spawner. Later level loads fail until a new one is attached.
    pub fn detach_spawner(&mut self) -> Option<S> {
        self.spawner.take()
    }

    /// Mutable access to the attached spawner so adapters can tick it.
    pub fn spawner_mut(&mut self) -> Option<&mut S> {
        self.spawner.as_mut()
    }

    /// Starts a new game in the provided mode.
    pub fn start_game(&mut self, mode: GameMode, out: &mut Vec<Event>) -> Result<(), LevelError> {
        match mode {
            GameMode::Arcade => self.start_new_game(out),
            GameMode::Test => self.start_test_mode(out),
            GameMode::Rogue => self.start_rogue_mode(out),
        }
    }

    /// Starts the campaign from level 1.
    pub fn start_new_game(&mut self, out: &mut Vec<Event>) -> Result<(), LevelError> {
        self.start_at_level(1, out)
    }

    /// Starts the campaign at `level`, clamped into `1..=TOTAL_LEVELS`.
    pub fn start_at_level(&mut self, level: i64, out: &mut Vec<Event>) -> Result<(), LevelError> {
        let config = self.generator.campaign_level_config(level);
        self.begin_game(config, out)
    }

    /// Starts the endless test arena.
    pub fn start_test_mode(&mut self, out: &mut Vec<Event>) -> Result<(), LevelError> {
        let config = self.generator.test_level_config();
        self.begin_game(config, out)
    }

    /// Starts a rogue run at layer 1.
    pub fn start_rogue_mode(&mut self, out: &mut Vec<Event>) -> Result<(), LevelError> {
        let config = self.generator.rogue_level_config(1);
        self.begin_game(config, out)
    }

    /// Counts a kill toward the active level's objectives.
    ///
    /// Kills arriving while no level is active, or after the objectives were
    /// met, are ignored so completion is reported exactly once.
    pub fn register_kill(&mut self, kind: EnemyKind, out: &mut Vec<Event>) {
        if self.state != LevelState::LevelActive {
            debug!("ignoring {kind} kill in state {:?}", self.state);
            return;
        }

        self.progress.register_kill(kind);
        if self.progress.meets_objectives(&self.objectives) {
            self.complete_objectives(out);
        }
    }

    /// Advances to the next campaign level, or completes the game after the last one.
    ///
    /// Rogue runs advance their layer instead and the test arena reloads itself.
    /// Campaign levels must have met their objectives first; the test arena
    /// never completes, so it may be reloaded at any time.
    pub fn advance_level(&mut self, out: &mut Vec<Event>) -> Result<(), LevelError> {
        let level = self.advanceable_level()?;
        if matches!(level, LevelId::Campaign(_)) {
            self.ensure_cleared(level)?;
        }
        match level {
            LevelId::Campaign(number) if number >= TOTAL_LEVELS => {
                self.complete_game(level, out);
                Ok(())
            }
            LevelId::Campaign(number) => {
                let config = self.generator.campaign_level_config(i64::from(number) + 1);
                self.load(config, out)
            }
            LevelId::Test => {
                let config = self.generator.test_level_config();
                self.load(config, out)
            }
            LevelId::Rogue { .. } => self.advance_rogue_layer(out),
        }
    }

    /// Advances a rogue run to its next layer. Rogue runs never terminate.
    pub fn advance_rogue_layer(&mut self, out: &mut Vec<Event>) -> Result<(), LevelError> {
        match self.advanceable_level()? {
            level @ LevelId::Rogue { layer } => {
                self.ensure_cleared(level)?;
                let config = self.generator.rogue_level_config(layer.saturating_add(1));
                self.load(config, out)
            }
            other => Err(LevelError::NotInRogueMode(other.mode())),
        }
    }

    /// Accumulates elapsed time while a level is in play.
    pub fn tick(&mut self, dt: Duration) {
        if self.state != LevelState::LevelActive {
            return;
        }
        self.level_elapsed = self.level_elapsed.saturating_add(dt);
        self.game_elapsed = self.game_elapsed.saturating_add(dt);
    }

    fn advanceable_level(&self) -> Result<LevelId, LevelError> {
        match (self.state, &self.config) {
            (LevelState::GameComplete, _) => Err(LevelError::GameComplete),
            (LevelState::Idle, _) | (_, None) => Err(LevelError::NoActiveLevel),
            (_, Some(config)) => Ok(config.level()),
        }
    }

    fn ensure_cleared(&self, level: LevelId) -> Result<(), LevelError> {
        if self.state == LevelState::ObjectivesComplete {
            Ok(())
        } else {
            Err(LevelError::ObjectivesIncomplete(level))
        }
    }

    fn begin_game(&mut self, config: LevelConfig, out: &mut Vec<Event>) -> Result<(), LevelError> {
        self.load(config, out)?;
        self.game_elapsed = Duration::ZERO;
        Ok(())
    }

    fn load(&mut self, config: LevelConfig, out: &mut Vec<Event>) -> Result<(), LevelError> {
        let Some(spawner) = self.spawner.as_mut() else {
            error!("cannot load {}: no spawner attached", config.level());
            return Err(LevelError::SpawnerUnavailable);
        };

        spawner.set_spawn_rates(&config.spawn_rates());
        spawner.start_spawning();

        info!("starting {} ({})", config.level(), config.name());
        self.objectives = config.objectives();
        self.progress.reset();
        self.level_elapsed = Duration::ZERO;
        self.state = LevelState::LevelActive;
        out.push(Event::LevelStarted {
            level: config.level(),
            name: config.name().to_owned(),
        });
        self.config = Some(config);
        Ok(())
    }

    fn complete_objectives(&mut self, out: &mut Vec<Event>) {
        let Some(config) = self.config.as_ref() else {
            return;
        };

        self.state = LevelState::ObjectivesComplete;
        if let Some(spawner) = self.spawner.as_mut() {
            spawner.stop_spawning();
        }

        info!(
            "{} complete after {:.1}s",
            config.level(),
            self.level_elapsed.as_secs_f32()
        );
        out.push(Event::LevelCompleted {
            level: config.level(),
            name: config.name().to_owned(),
            elapsed: self.level_elapsed,
        });
    }

    fn complete_game(&mut self, final_level: LevelId, out: &mut Vec<Event>) {
        self.state = LevelState::GameComplete;
        if let Some(spawner) = self.spawner.as_mut() {
            spawner.stop_spawning();
        }

        info!(
            "campaign complete after {:.1}s",
            self.game_elapsed.as_secs_f32()
        );
        out.push(Event::GameCompleted {
            final_level,
            total_elapsed: self.game_elapsed,
        });
    }
}

/// Applies the provided command to the session, mutating state deterministically.
///
/// Transitions that have no effect are logged and otherwise ignored.
pub fn apply<S: SpawnControl>(
    manager: &mut LevelManager<S>,
    command: Command,
    out_events: &mut Vec<Event>,
) {
    let outcome = match command {
        Command::StartGame { mode } => manager.start_game(mode, out_events),
        Command::StartAtLevel { level } => manager.start_at_level(level, out_events),
        Command::RegisterKill { kind } => {
            manager.register_kill(kind, out_events);
            Ok(())
        }
        Command::AdvanceLevel => manager.advance_level(out_events),
        Command::AdvanceRogueLayer => manager.advance_rogue_layer(out_events),
        Command::Tick { dt } => {
            manager.tick(dt);
            out_events.push(Event::TimeAdvanced { dt });
            Ok(())
        }
        // Enemy entities live in the adapter; the session only tracks kills.
        Command::SpawnEnemy { .. } => Ok(()),
    };

    if let Err(reason) = outcome {
        warn!("session command ignored: {reason}");
    }
}

/// Query functions that provide read-only access to the session state.
pub mod query {
    use std::time::Duration;

    use neural_break_core::{LevelConfig, LevelId, LevelObjectives, TOTAL_LEVELS};

    use super::{LevelManager, LevelProgress, LevelState};

    /// Current lifecycle state.
    #[must_use]
    pub fn state<S>(manager: &LevelManager<S>) -> LevelState {
        manager.state
    }

    /// Configuration of the loaded level, if any.
    #[must_use]
    pub fn level_config<S>(manager: &LevelManager<S>) -> Option<&LevelConfig> {
        manager.config.as_ref()
    }

    /// Identity of the loaded level, if any.
    #[must_use]
    pub fn current_level<S>(manager: &LevelManager<S>) -> Option<LevelId> {
        manager.config.as_ref().map(LevelConfig::level)
    }

    /// Player-facing level number, or zero when idle or in the test arena.
    #[must_use]
    pub fn level_number<S>(manager: &LevelManager<S>) -> u32 {
        current_level(manager).map_or(0, LevelId::number)
    }

    /// Display name of the loaded level, or an empty string when idle.
    #[must_use]
    pub fn level_name<S>(manager: &LevelManager<S>) -> &str {
        manager.config.as_ref().map_or("", LevelConfig::name)
    }

    /// Objectives of the loaded level.
    #[must_use]
    pub fn objectives<S>(manager: &LevelManager<S>) -> &LevelObjectives {
        &manager.objectives
    }

    /// Kill counters of the loaded level.
    #[must_use]
    pub fn progress<S>(manager: &LevelManager<S>) -> &LevelProgress {
        &manager.progress
    }

    /// Time spent in the loaded level.
    #[must_use]
    pub fn level_elapsed<S>(manager: &LevelManager<S>) -> Duration {
        manager.level_elapsed
    }

    /// Time spent across the whole game.
    #[must_use]
    pub fn game_elapsed<S>(manager: &LevelManager<S>) -> Duration {
        manager.game_elapsed
    }

    /// Objective completion of the loaded level in percent, zero when idle.
    #[must_use]
    pub fn objective_progress_percent<S>(manager: &LevelManager<S>) -> f32 {
        if manager.config.is_none() {
            return 0.0;
        }
        manager.progress.completion_percent(&manager.objectives)
    }

    /// Share of the campaign that has been cleared, in percent.
    ///
    /// Only campaign levels contribute; the test arena and rogue runs report zero.
    #[must_use]
    pub fn game_progress_percent<S>(manager: &LevelManager<S>) -> f32 {
        let Some(LevelId::Campaign(level)) = current_level(manager) else {
            return 0.0;
        };

        let current_cleared = matches!(
            manager.state,
            LevelState::ObjectivesComplete | LevelState::GameComplete
        );
        let cleared = level - 1 + u32::from(current_cleared);
        cleared as f32 / TOTAL_LEVELS as f32 * 100.0
    }
}

//! Headless session driver that wires the spawner, level manager and game flow.

use std::{io::Write, time::Duration};

use anyhow::{bail, Result};
use log::{debug, info};
use neural_break_core::{Command, EnemyKind, Event, GameMode, PerEnemy};
use neural_break_session::{self as session, query, LevelManager, LevelState};
use neural_break_system_game_flow::{Config as FlowConfig, GameFlow};
use neural_break_system_spawning::{Config as SpawnConfig, Spawning};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::SimulationConfig;

/// Keeps the player's random stream independent of the spawner's.
const PLAYER_STREAM: u64 = 0x706c_6179_6572;

/// How a simulation run begins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Start {
    /// Start a fresh game in the given mode.
    Mode(GameMode),
    /// Start the campaign at a specific level.
    Level(i64),
}

impl Start {
    /// Resolves command-line options into a start request.
    pub(crate) fn from_options(mode: GameMode, start_level: Option<i64>) -> Result<Self> {
        match (mode, start_level) {
            (_, None) => Ok(Self::Mode(mode)),
            (GameMode::Arcade, Some(level)) => Ok(Self::Level(level)),
            (other, Some(_)) => bail!("--start-level only applies to arcade runs, not {other:?}"),
        }
    }

    fn command(self) -> Command {
        match self {
            Self::Mode(mode) => Command::StartGame { mode },
            Self::Level(level) => Command::StartAtLevel { level },
        }
    }
}

/// Outcome of a simulation run.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Summary {
    /// Ticks that were simulated.
    pub(crate) ticks: u64,
    /// Session state when the run stopped.
    pub(crate) final_state: LevelState,
    /// Levels whose objectives were met.
    pub(crate) levels_cleared: u32,
    /// Enemies destroyed per kind.
    pub(crate) kills: PerEnemy<u32>,
    /// Simulated time spent inside levels.
    pub(crate) game_elapsed: Duration,
}

struct Simulation<W> {
    manager: LevelManager<Spawning>,
    flow: GameFlow,
    rng: ChaCha8Rng,
    kill_chance: f64,
    elapsed: Duration,
    alive: Vec<EnemyKind>,
    kills: PerEnemy<u32>,
    levels_cleared: u32,
    out: W,
}

/// Runs a headless session, writing one line per session event to `out`.
pub(crate) fn run<W: Write>(config: &SimulationConfig, start: Start, out: W) -> Result<Summary> {
    config.validate()?;
    let seed = config.session.seed;
    let mut simulation = Simulation {
        manager: LevelManager::with_spawner(Spawning::new(SpawnConfig::new(seed))),
        flow: GameFlow::new(FlowConfig::new(config.presentation_delay())),
        rng: ChaCha8Rng::seed_from_u64(seed ^ PLAYER_STREAM),
        kill_chance: config.simulation.kill_chance,
        elapsed: Duration::ZERO,
        alive: Vec::new(),
        kills: PerEnemy::default(),
        levels_cleared: 0,
        out,
    };

    info!("simulating {start:?} with seed {seed:#x}");
    simulation.dispatch(vec![start.command()])?;
    if query::state(&simulation.manager) == LevelState::Idle {
        bail!("session did not start");
    }

    let tick = config.tick();
    let mut ticks = 0;
    while ticks < config.session.max_ticks
        && query::state(&simulation.manager) != LevelState::GameComplete
    {
        ticks += 1;
        simulation.elapsed += tick;
        let mut commands = vec![Command::Tick { dt: tick }];
        commands.extend(simulation.attack());
        simulation.dispatch(commands)?;
    }

    Ok(Summary {
        ticks,
        final_state: query::state(&simulation.manager),
        levels_cleared: simulation.levels_cleared,
        kills: simulation.kills,
        game_elapsed: query::game_elapsed(&simulation.manager),
    })
}

impl<W: Write> Simulation<W> {
    fn attack(&mut self) -> Vec<Command> {
        let mut commands = Vec::new();
        let rng = &mut self.rng;
        let chance = self.kill_chance;
        self.alive.retain(|kind| {
            if rng.gen_bool(chance) {
                commands.push(Command::RegisterKill { kind: *kind });
                false
            } else {
                true
            }
        });
        commands
    }

    fn dispatch(&mut self, mut queue: Vec<Command>) -> Result<()> {
        while !queue.is_empty() {
            let mut events = Vec::new();
            for command in queue.drain(..) {
                match command {
                    Command::SpawnEnemy { kind } => self.alive.push(kind),
                    Command::RegisterKill { kind } => {
                        self.kills[kind] += 1;
                        session::apply(&mut self.manager, command, &mut events);
                    }
                    other => session::apply(&mut self.manager, other, &mut events),
                }
            }

            if let Some(spawning) = self.manager.spawner_mut() {
                spawning.handle(&events, &mut queue);
            }
            self.flow.handle(&events, &mut queue);
            for event in &events {
                self.observe(event)?;
            }
        }
        Ok(())
    }

    fn observe(&mut self, event: &Event) -> Result<()> {
        let stamp = self.elapsed.as_secs_f32();
        match event {
            Event::TimeAdvanced { .. } => return Ok(()),
            Event::LevelStarted { level, name } => {
                self.alive.clear();
                writeln!(self.out, "[{stamp:>8.1}s] started   {level}: {name}")?;
            }
            Event::LevelCompleted {
                level,
                name,
                elapsed,
            } => {
                self.levels_cleared += 1;
                writeln!(
                    self.out,
                    "[{stamp:>8.1}s] completed {level}: {name} in {:.1}s",
                    elapsed.as_secs_f32()
                )?;
            }
            Event::GameCompleted {
                final_level,
                total_elapsed,
            } => {
                writeln!(
                    self.out,
                    "[{stamp:>8.1}s] game complete after {final_level} in {:.1}s",
                    total_elapsed.as_secs_f32()
                )?;
            }
        }
        debug!(
            "objectives at {:.0}%, campaign at {:.1}%",
            query::objective_progress_percent(&self.manager),
            query::game_progress_percent(&self.manager)
        );
        Ok(())
    }
}

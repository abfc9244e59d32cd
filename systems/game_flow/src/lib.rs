#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Game-flow system that advances the session after a presentation delay.

use std::time::Duration;

use log::debug;
use neural_break_core::{Command, Event, GameMode, LevelId};

/// Pause between a completed level and the next one when no delay is configured.
pub const DEFAULT_PRESENTATION_DELAY: Duration = Duration::from_secs(2);

/// Configuration parameters required to construct the game-flow system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    presentation_delay: Duration,
}

impl Config {
    /// Creates a configuration with the provided presentation delay.
    #[must_use]
    pub const fn new(presentation_delay: Duration) -> Self {
        Self { presentation_delay }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_PRESENTATION_DELAY)
    }
}

#[derive(Clone, Debug, PartialEq)]
struct PendingAdvance {
    remaining: Duration,
    command: Command,
}

/// Pure system that turns level completions into delayed advance commands.
#[derive(Debug)]
pub struct GameFlow {
    presentation_delay: Duration,
    pending: Option<PendingAdvance>,
}

impl GameFlow {
    /// Creates a new game-flow system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            presentation_delay: config.presentation_delay,
            pending: None,
        }
    }

    /// Reports whether an advance is scheduled.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Time left before the scheduled advance, if any.
    #[must_use]
    pub fn remaining(&self) -> Option<Duration> {
        self.pending.as_ref().map(|pending| pending.remaining)
    }

    /// Consumes session events and emits advance commands once the delay elapsed.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Command>) {
        for event in events {
            match event {
                Event::LevelCompleted { level, .. } => self.schedule(*level, out),
                Event::LevelStarted { .. } | Event::GameCompleted { .. } => {
                    self.pending = None;
                }
                Event::TimeAdvanced { dt } => self.advance_clock(*dt, out),
            }
        }
    }

    fn schedule(&mut self, level: LevelId, out: &mut Vec<Command>) {
        let command = match level.mode() {
            GameMode::Rogue => Command::AdvanceRogueLayer,
            GameMode::Arcade | GameMode::Test => Command::AdvanceLevel,
        };
        debug!(
            "{level} cleared, advancing in {:.1}s",
            self.presentation_delay.as_secs_f32()
        );

        if self.presentation_delay.is_zero() {
            self.pending = None;
            out.push(command);
            return;
        }

        self.pending = Some(PendingAdvance {
            remaining: self.presentation_delay,
            command,
        });
    }

    fn advance_clock(&mut self, dt: Duration, out: &mut Vec<Command>) {
        let Some(pending) = self.pending.as_mut() else {
            return;
        };

        pending.remaining = pending.remaining.saturating_sub(dt);
        if pending.remaining.is_zero() {
            if let Some(pending) = self.pending.take() {
                out.push(pending.command);
            }
        }
    }
}

//! Simulation session: the scheduling shim around the engine
//!
//! The engine itself is synchronous and has no notion of running or
//! paused; this module owns that. A [`Session`] accepts [`Command`]s,
//! emits [`Event`]s, and holds the `{Idle, Running, Paused}` state
//! machine. An external timer drives stepping by calling
//! [`Session::tick`] at its own cadence; pausing simply means ticks
//! stop stepping, so there is never an in-flight operation to cancel.
//!
//! Snapshot emission is throttled independently of step cadence: a
//! snapshot event is only emitted when at least the configured minimum
//! interval (default 50 ms) has elapsed since the last one, measured
//! against caller-supplied timestamps so tests stay deterministic.

pub mod worker;

use std::time::Duration;

use crate::config::{ConfigError, SimConfig};
use crate::engine::SimulationEngine;
use crate::math::DVec3;
use crate::scene::SimulationState;

pub use worker::SessionWorker;

/// Minimum interval between two snapshot emissions.
pub const DEFAULT_SNAPSHOT_INTERVAL: Duration = Duration::from_millis(50);

/// Commands accepted by a session.
#[derive(Debug, Clone)]
pub enum Command {
    /// Build a fresh engine from a scene configuration.
    Init(Box<SimConfig>),
    /// Let ticks step the engine.
    Start,
    /// Stop ticks from stepping; the engine keeps its state.
    Pause,
    /// Step exactly once, running or paused.
    Step,
    /// Apply an instantaneous impulse to a body.
    ApplyImpulse {
        /// Target body id; unknown ids are silently ignored.
        id: String,
        /// Impulse vector (kg·m/s).
        impulse: DVec3,
    },
}

/// Events a session emits in response to commands and ticks.
#[derive(Debug, Clone)]
pub enum Event {
    /// A new engine was built from an `Init` command.
    Initialized,
    /// The session entered `Running`.
    Started,
    /// The session entered `Paused`.
    Paused,
    /// A throttled copy of the committed state.
    Snapshot(SimulationState),
}

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No engine yet; only `Init` does anything.
    Idle,
    /// Ticks step the engine.
    Running,
    /// Engine exists but ticks do not step it.
    Paused,
}

/// The scheduling shim: engine + lifecycle + snapshot throttling.
#[derive(Debug)]
pub struct Session {
    engine: Option<SimulationEngine>,
    state: SessionState,
    snapshot_min_interval: Duration,
    last_snapshot_at: Option<Duration>,
}

impl Session {
    /// A session with the default 50 ms snapshot throttle.
    pub fn new() -> Self {
        Self::with_snapshot_interval(DEFAULT_SNAPSHOT_INTERVAL)
    }

    /// A session with a custom snapshot throttle.
    pub fn with_snapshot_interval(snapshot_min_interval: Duration) -> Self {
        Self {
            engine: None,
            state: SessionState::Idle,
            snapshot_min_interval,
            last_snapshot_at: None,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The engine, if one has been initialized.
    pub fn engine(&self) -> Option<&SimulationEngine> {
        self.engine.as_ref()
    }

    /// Handle one command, pushing any resulting events.
    ///
    /// `now` is the caller's clock, used only for snapshot throttling.
    ///
    /// # Errors
    /// Only `Init` can fail, with the [`ConfigError`] from engine
    /// construction; the session then stays in its previous state.
    pub fn handle(
        &mut self,
        command: Command,
        now: Duration,
        events: &mut Vec<Event>,
    ) -> Result<(), ConfigError> {
        match command {
            Command::Init(config) => {
                self.engine = Some(SimulationEngine::new(*config)?);
                self.state = SessionState::Paused;
                self.last_snapshot_at = None;
                events.push(Event::Initialized);
            }
            Command::Start => {
                if self.engine.is_some() {
                    self.state = SessionState::Running;
                    events.push(Event::Started);
                }
            }
            Command::Pause => {
                if self.engine.is_some() {
                    self.state = SessionState::Paused;
                    events.push(Event::Paused);
                }
            }
            Command::Step => {
                // Single-stepping works while paused; that is its point.
                if let Some(engine) = self.engine.as_mut() {
                    engine.step();
                    self.maybe_snapshot(now, events);
                }
            }
            Command::ApplyImpulse { id, impulse } => {
                if let Some(engine) = self.engine.as_mut() {
                    engine.apply_impulse(&id, impulse);
                }
            }
        }
        Ok(())
    }

    /// One scheduler tick: step the engine if running, then emit a
    /// snapshot if the throttle allows.
    pub fn tick(&mut self, now: Duration, events: &mut Vec<Event>) {
        if self.state != SessionState::Running {
            return;
        }
        if let Some(engine) = self.engine.as_mut() {
            engine.step();
        }
        self.maybe_snapshot(now, events);
    }

    fn maybe_snapshot(&mut self, now: Duration, events: &mut Vec<Event>) {
        let Some(engine) = self.engine.as_ref() else {
            return;
        };
        let due = match self.last_snapshot_at {
            None => true,
            Some(last) => now.saturating_sub(last) >= self.snapshot_min_interval,
        };
        if due {
            events.push(Event::Snapshot(engine.state()));
            self.last_snapshot_at = Some(now);
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

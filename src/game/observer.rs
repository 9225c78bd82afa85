//! Seams through which the engine hands data to the host.
//!
//! Both traits are implemented for plain closures, so a host can pass
//! `|state: &EngineState| ...` without defining a type.

use super::state::{EngineState, ScoreEntry};

/// Receives the published snapshot after every tick
pub trait TickObserver {
    fn on_tick(&mut self, snapshot: &EngineState);
}

impl<F: FnMut(&EngineState)> TickObserver for F {
    fn on_tick(&mut self, snapshot: &EngineState) {
        self(snapshot)
    }
}

/// Receives the final scores, once, when a collision ends the session
pub trait ScoreReporter {
    fn report(&mut self, entries: &[ScoreEntry]);
}

impl<F: FnMut(&[ScoreEntry])> ScoreReporter for F {
    fn report(&mut self, entries: &[ScoreEntry]) {
        self(entries)
    }
}

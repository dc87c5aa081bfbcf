//! Scene clock shared with actors
//!
//! The scene owns its clock; actors keep a weak link and read the current
//! timestep from it when they publish step events.

use std::cell::Cell;
use std::rc::Rc;

/// Timestep and elapsed time of one scene
#[derive(Debug)]
pub struct SceneClock {
    timestep: Cell<f32>,
    elapsed: Cell<f64>,
    ticks: Cell<u64>,
}

impl SceneClock {
    pub fn new(timestep: f32) -> Rc<Self> {
        Rc::new(Self {
            timestep: Cell::new(timestep),
            elapsed: Cell::new(0.0),
            ticks: Cell::new(0),
        })
    }

    /// Duration of the current step, in seconds
    pub fn timestep(&self) -> f32 {
        self.timestep.get()
    }

    pub fn set_timestep(&self, timestep: f32) {
        self.timestep.set(timestep);
    }

    /// Total simulated time, in seconds
    pub fn elapsed(&self) -> f64 {
        self.elapsed.get()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks.get()
    }

    /// Record one completed step of the current timestep
    pub fn advance(&self) {
        self.elapsed.set(self.elapsed.get() + f64::from(self.timestep.get()));
        self.ticks.set(self.ticks.get() + 1);
    }
}

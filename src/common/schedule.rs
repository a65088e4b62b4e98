//! Explicit frame/step ordering.
//!
//! ```text
//!   RunFixedMainLoop / BeforeFixedMainLoop (variable dt)
//!     FrameSystems::Input -> FrameSystems::Probe -> FrameSystems::Transition
//!   FixedUpdate (fixed dt, once per accumulated step)
//!     StepSystems::Rope -> StepSystems::Locomotion -> StepSystems::Track
//!   FixedPostUpdate
//!     avian step
//! ```
//!
//! The frame half always finishes before the fixed loop of the same frame starts, so edge
//! triggers and state transitions are visible to every physics step that follows. Rope runs
//! before locomotion so a detach in one step is seen by movement in that same step.

use bevy::app::{RunFixedMainLoop, RunFixedMainLoopSystems};
use bevy::prelude::*;

#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameSystems {
    /// Device sampling into `PlayerActions`.
    Input,
    /// Ground and wall checks.
    Probe,
    /// Grapple trigger, jumps, wall slide.
    Transition,
}

#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepSystems {
    Rope,
    Locomotion,
    Track,
}

pub fn configure(app: &mut App) {
    app.configure_sets(
        RunFixedMainLoop,
        (FrameSystems::Input, FrameSystems::Probe, FrameSystems::Transition)
            .chain()
            .in_set(RunFixedMainLoopSystems::BeforeFixedMainLoop),
    );
    app.configure_sets(
        FixedUpdate,
        (StepSystems::Rope, StepSystems::Locomotion, StepSystems::Track).chain(),
    );
}

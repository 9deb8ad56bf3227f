//! Minesweeper game engine.
//!
//! [`Engine`] owns the board, the difficulty presets, the lifecycle and the clock. A UI forwards clicks and menu
//! choices to it and reads back a [`Snapshot`] or listens to [`GameEvent`]s.

#![no_std]

extern crate alloc;

pub use board::*;
pub use cell::*;
pub use engine::*;
pub use error::*;
pub use events::*;
pub use sampler::*;
pub use settings::*;
pub use snapshot::*;
pub use splash::*;
pub use timer::*;
pub use types::*;

mod board;
mod cell;
mod engine;
mod error;
mod events;
mod generator;
mod sampler;
mod settings;
mod snapshot;
mod splash;
mod timer;
mod types;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }
}

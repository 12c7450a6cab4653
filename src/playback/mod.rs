//! Playback: configuration, virtual-time scheduling, state, and the engine

pub mod config;
pub mod engine;
pub mod scheduler;
pub mod state;

pub use config::{PlaybackConfig, ResolvedConfig};
pub use engine::PlaybackEngine;
pub use scheduler::{Scheduler, TimerKind};
pub use state::{PlaybackPhase, PlaybackState};

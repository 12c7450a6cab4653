//! Deterministic playback engine for a durable-execution demo slide
//!
//! Simulates, for a live audience, how a durable workflow engine behaves when
//! a worker crashes mid-execution and a replacement worker resumes via
//! deterministic replay of the persisted event history. There is no real
//! engine behind it: the history is a fixed 23-event checkout execution, and
//! the "execution" is a scripted animation driven by a virtual-time scheduler.
//!
//! The crate is the state owner; a presentation layer renders
//! [`PlaybackState`] and the derived display predicates read-only.

pub mod display;
pub mod error;
pub mod playback;
pub mod source;
pub mod workflow;

// Re-export commonly used types
pub use display::{build_display_items, DisplayItem};
pub use error::{PlaybackError, Result};
pub use playback::{
    PlaybackConfig, PlaybackEngine, PlaybackPhase, PlaybackState, ResolvedConfig, Scheduler,
    TimerKind,
};
pub use source::highlight::{classify_line, Span, TokenKind};
pub use source::{CodeLine, LineKind, SdkLanguage, SourceListing};
pub use workflow::{Activity, EventCategory, EventHistory, EventName, HistoryEvent};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::display::{build_display_items, DisplayItem};
    pub use crate::error::{PlaybackError, Result};
    pub use crate::playback::{
        PlaybackConfig, PlaybackEngine, PlaybackPhase, PlaybackState, TimerKind,
    };
    pub use crate::source::highlight::{classify_line, Span, TokenKind};
    pub use crate::source::{CodeLine, LineKind, SdkLanguage, SourceListing};
    pub use crate::workflow::{Activity, EventCategory, EventHistory, EventName, HistoryEvent};
}

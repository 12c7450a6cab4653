//! Workflow event history: the immutable log the playback engine reveals

pub mod event;

pub use event::{Activity, EventCategory, EventHistory, EventName, HistoryEvent};

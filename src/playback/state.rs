//! Playback state: the single mutable value the presentation layer reads

use serde::Serialize;
use std::collections::BTreeSet;

/// Phase of the playback state machine.
///
/// One tagged variant instead of a set of booleans, so invalid combinations
/// (replaying while completed, playing while crashed) cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlaybackPhase {
    /// Not advancing; Play and Step are available
    Idle,
    /// The auto-play timer is driving `advance_one`
    Playing,
    /// The scripted crash halted progression; only Replay can move forward
    CrashedAwaitingReplay,
    /// The replay timer is walking source lines on the new worker
    Replaying,
    /// Every display item has been revealed
    Completed,
}

impl PlaybackPhase {
    /// Whether Play may start auto-play
    pub fn can_play(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Whether Step may advance one display item
    pub fn can_step(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Whether Replay-on-New-Worker may start
    pub fn can_start_replay(&self) -> bool {
        matches!(self, Self::CrashedAwaitingReplay)
    }
}

/// Mutable playback state, owned by the engine. The presentation layer is a
/// read-only consumer; all fields reset atomically via the engine's `reset`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackState {
    /// Event indices revealed so far, in reveal order. Grows monotonically
    /// except on reset.
    pub visible_events: Vec<usize>,
    /// Index of the next display item to reveal
    pub display_cursor: usize,
    /// Most recently revealed or user-selected event index
    pub selected_event: Option<usize>,
    pub phase: PlaybackPhase,
    /// Latched once the scripted crash has fired; prevents a second crash
    /// after replay resumes playback
    pub crash_fired: bool,
    /// Cursor into the active language's source lines during replay
    pub replay_index: usize,
    /// Display-item indices the viewer has manually expanded
    pub expanded_groups: BTreeSet<usize>,
    /// Whether the replay explanation callout is showing
    pub callout_visible: bool,
    /// Whether the one-shot auto-start is still pending for this reset cycle
    pub auto_play_armed: bool,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            visible_events: Vec::new(),
            display_cursor: 0,
            selected_event: None,
            phase: PlaybackPhase::Idle,
            crash_fired: false,
            replay_index: 0,
            expanded_groups: BTreeSet::new(),
            callout_visible: false,
            auto_play_armed: true,
        }
    }
}

impl PlaybackState {
    /// Whether the event at `index` has been revealed
    pub fn is_visible(&self, index: usize) -> bool {
        self.visible_events.contains(&index)
    }

    /// Number of revealed events
    pub fn visible_count(&self) -> usize {
        self.visible_events.len()
    }
}

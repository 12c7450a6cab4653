//! Playback configuration
//!
//! All knobs are fixed at build time: timer durations, the crash trigger
//! activity, and the initial source language. The crash display index is a
//! derived configuration value resolved once against the display items, never
//! a runtime search.

use crate::display::DisplayItem;
use crate::error::{PlaybackError, Result};
use crate::source::SdkLanguage;
use crate::workflow::{Activity, EventHistory, EventName};
use std::time::Duration;

/// Timing and crash configuration for the playback engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackConfig {
    /// Interval between auto-play reveals
    pub play_interval: Duration,
    /// Interval between replay cursor advances
    pub replay_tick_interval: Duration,
    /// How long the replay callout stays visible
    pub callout_duration: Duration,
    /// Pause between replay finishing and auto-play resuming
    pub post_replay_pause: Duration,
    /// Delay before auto-play starts after mount or reset
    pub auto_start_delay: Duration,
    /// Delay between the crash firing and replay auto-starting
    pub auto_replay_delay: Duration,
    /// The crash fires on the display item right after this activity's
    /// completion event
    pub crash_after: Activity,
    /// Source language shown initially
    pub initial_language: SdkLanguage,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl PlaybackConfig {
    /// Reference timings from the original scenario
    pub const DEFAULT: Self = Self {
        play_interval: Duration::from_millis(400),
        replay_tick_interval: Duration::from_millis(150),
        callout_duration: Duration::from_millis(3000),
        post_replay_pause: Duration::from_millis(500),
        auto_start_delay: Duration::from_millis(600),
        auto_replay_delay: Duration::from_millis(2000),
        crash_after: Activity::ChargeCard,
        initial_language: SdkLanguage::TypeScript,
    };

    /// Validate the configuration. Recurring intervals must be positive;
    /// one-shot delays may be zero.
    pub fn validate(&self) -> Result<()> {
        if self.play_interval.is_zero() {
            return Err(PlaybackError::InvalidConfiguration(
                "play_interval must be positive".to_string(),
            ));
        }
        if self.replay_tick_interval.is_zero() {
            return Err(PlaybackError::InvalidConfiguration(
                "replay_tick_interval must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Resolve the derived crash values against a concrete history and its
    /// display items.
    pub fn resolve(
        self,
        history: &EventHistory,
        display_items: &[DisplayItem],
    ) -> Result<ResolvedConfig> {
        self.validate()?;

        let completion_item = display_items
            .iter()
            .position(|item| match item {
                DisplayItem::Single { event_index } => history
                    .get(*event_index)
                    .is_some_and(|event| {
                        event.name == EventName::ActivityTaskCompleted
                            && event.activity == Some(self.crash_after)
                    }),
                DisplayItem::Group { .. } => false,
            })
            .ok_or_else(|| {
                PlaybackError::InvalidConfiguration(format!(
                    "history has no ActivityTaskCompleted event for {}",
                    self.crash_after.as_str()
                ))
            })?;

        // The crash fires when the engine tries to reveal the item after the
        // completion event.
        let crash_display_index = completion_item + 1;
        let pre_crash_event_count = display_items[..crash_display_index]
            .iter()
            .map(DisplayItem::event_count)
            .sum();

        Ok(ResolvedConfig {
            base: self,
            crash_display_index,
            pre_crash_event_count,
        })
    }
}

/// Configuration with derived crash values precomputed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub base: PlaybackConfig,
    /// Display item index at which the crash fires
    pub crash_display_index: usize,
    /// Events visible when the crash halts progression
    pub pre_crash_event_count: usize,
}

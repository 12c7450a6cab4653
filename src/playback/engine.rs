//! The playback engine: the state machine driving the slide
//!
//! Owns the event history, the derived display items, the playback state, and
//! the virtual-time scheduler. Advancing time fires due timers in order and
//! dispatches them here; manual controls call the operations directly. The
//! crash check always runs strictly before any reveal for the same step.

use crate::display::{build_display_items, DisplayItem};
use crate::error::{PlaybackError, Result};
use crate::playback::config::{PlaybackConfig, ResolvedConfig};
use crate::playback::scheduler::{Scheduler, TimerKind};
use crate::playback::state::{PlaybackPhase, PlaybackState};
use crate::source::{SdkLanguage, SourceListing};
use crate::workflow::{Activity, EventHistory};
use std::time::Duration;
use tracing::{debug, info};

/// Scripted playback over one recorded workflow execution
#[derive(Debug)]
pub struct PlaybackEngine {
    history: EventHistory,
    display_items: Vec<DisplayItem>,
    config: ResolvedConfig,
    language: SdkLanguage,
    state: PlaybackState,
    scheduler: Scheduler,
}

impl PlaybackEngine {
    /// Create an engine over the given history. Derives display items and the
    /// crash display index once, and arms the auto-start timer.
    pub fn new(history: EventHistory, config: PlaybackConfig) -> Result<Self> {
        let display_items = build_display_items(&history);
        let config = config.resolve(&history, &display_items)?;

        let mut scheduler = Scheduler::new();
        scheduler.schedule_after(TimerKind::AutoStart, config.base.auto_start_delay);

        Ok(Self {
            history,
            display_items,
            language: config.base.initial_language,
            config,
            state: PlaybackState::default(),
            scheduler,
        })
    }

    /// Engine over the reference checkout scenario
    pub fn checkout(config: PlaybackConfig) -> Result<Self> {
        Self::new(EventHistory::checkout(), config)
    }

    // === Read API (presentation layer is a read-only consumer) ===

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn history(&self) -> &EventHistory {
        &self.history
    }

    pub fn display_items(&self) -> &[DisplayItem] {
        &self.display_items
    }

    pub fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    pub fn language(&self) -> SdkLanguage {
        self.language
    }

    /// The source listing for the active language
    pub fn active_listing(&self) -> &'static SourceListing {
        SourceListing::for_language(self.language)
    }

    /// Read-only view of the scheduler, for drivers and tests
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Source line at which replay stops: where the crashed activity's
    /// recorded result is consumed in the active listing. Re-derived when the
    /// language changes.
    pub fn replay_stop_line(&self) -> usize {
        self.active_listing()
            .result_line_index(self.config.base.crash_after)
            .unwrap_or(0)
    }

    /// Activity to emphasize in the code pane, from the selected event
    pub fn highlighted_activity(&self) -> Option<Activity> {
        let index = self.state.selected_event?;
        self.history.get(index)?.activity
    }

    /// Whether the "result loaded from history" annotation shows: the replay
    /// cursor has reached the crashed activity's line.
    pub fn history_annotation_visible(&self) -> bool {
        self.state.phase == PlaybackPhase::Replaying
            && self.state.replay_index >= self.replay_stop_line()
    }

    /// Whether the crash overlay shows: crashed, replay not yet started, and
    /// the reveal halted exactly at the pre-crash count.
    pub fn crash_overlay_visible(&self) -> bool {
        self.state.phase == PlaybackPhase::CrashedAwaitingReplay
            && self.state.visible_count() == self.config.pre_crash_event_count
    }

    // === Time ===

    /// Advance virtual time, firing every timer due within the window in
    /// deadline order. Timers armed by fired timers join the same window.
    pub fn advance(&mut self, duration: Duration) {
        let target = self.scheduler.target_after(duration);
        while let Some(kind) = self.scheduler.fire_next_due(target) {
            self.on_timer(kind);
        }
        self.scheduler.advance_to(target);
    }

    fn on_timer(&mut self, kind: TimerKind) {
        match kind {
            TimerKind::AutoStart => {
                self.state.auto_play_armed = false;
                self.play();
            }
            TimerKind::PlayTick => {
                if self.state.phase == PlaybackPhase::Playing {
                    let progressed = self.advance_one();
                    if progressed && self.state.phase == PlaybackPhase::Playing {
                        self.scheduler
                            .schedule_after(TimerKind::PlayTick, self.config.base.play_interval);
                    }
                }
            }
            TimerKind::AutoReplay => {
                self.start_replay();
            }
            TimerKind::CalloutDismiss => {
                self.state.callout_visible = false;
            }
            TimerKind::ReplayTick => self.on_replay_tick(),
            TimerKind::ResumeAfterReplay => {
                if self.state.phase == PlaybackPhase::Replaying {
                    debug!("replay caught up, resuming auto-play");
                    self.state.phase = PlaybackPhase::Playing;
                    self.scheduler
                        .schedule_after(TimerKind::PlayTick, self.config.base.play_interval);
                }
            }
        }
    }

    fn on_replay_tick(&mut self) {
        if self.state.phase != PlaybackPhase::Replaying {
            return;
        }
        let stop_line = self.replay_stop_line();
        if self.state.replay_index < stop_line {
            self.state.replay_index += 1;
            self.scheduler.schedule_after(
                TimerKind::ReplayTick,
                self.config.base.replay_tick_interval,
            );
        } else {
            // The recorded result line has been reached; resume after the
            // scripted pause.
            self.scheduler.schedule_after(
                TimerKind::ResumeAfterReplay,
                self.config.base.post_replay_pause,
            );
        }
    }

    // === Operations ===

    /// The single unit of progress, shared by the auto-play timer and Step.
    ///
    /// Checks the crash point before revealing anything; otherwise reveals the
    /// display item at the cursor, selects its last event, and advances.
    /// Returns whether progress should continue.
    pub fn advance_one(&mut self) -> bool {
        let index = self.state.display_cursor;

        if index == self.config.crash_display_index && !self.state.crash_fired {
            self.state.crash_fired = true;
            self.state.phase = PlaybackPhase::CrashedAwaitingReplay;
            self.scheduler.cancel(TimerKind::PlayTick);
            self.scheduler
                .schedule_after(TimerKind::AutoReplay, self.config.base.auto_replay_delay);
            info!(
                display_index = index,
                revealed = self.state.visible_count(),
                "worker crashed before next workflow task completed"
            );
            return false;
        }

        let Some(item) = self.display_items.get(index) else {
            return false;
        };

        let revealed = item.event_indices();
        debug!(display_index = index, events = revealed.len(), "reveal");
        self.state.selected_event = revealed.last().copied();
        self.state.visible_events.extend(revealed);
        self.state.display_cursor = index + 1;

        if index + 1 == self.display_items.len() {
            self.state.phase = PlaybackPhase::Completed;
            self.scheduler.cancel(TimerKind::PlayTick);
            info!(
                events = self.state.visible_count(),
                "workflow execution completed"
            );
            return false;
        }
        true
    }

    /// Start auto-play. Blocked while crashed-awaiting-replay, replaying,
    /// already playing, or completed. Returns whether playback started.
    pub fn play(&mut self) -> bool {
        if !self.state.phase.can_play() {
            return false;
        }
        self.state.phase = PlaybackPhase::Playing;
        self.scheduler
            .schedule_after(TimerKind::PlayTick, self.config.base.play_interval);
        debug!("auto-play started");
        true
    }

    /// Reveal exactly one display item. Blocked under the same conditions as
    /// [`play`]. Returns whether anything progressed.
    ///
    /// [`play`]: PlaybackEngine::play
    pub fn step(&mut self) -> bool {
        if !self.state.phase.can_step() {
            return false;
        }
        self.advance_one()
    }

    /// Begin the scripted replay on the new worker. Only meaningful after the
    /// crash; shows the callout and starts the replay timer. Returns whether
    /// replay started.
    pub fn start_replay(&mut self) -> bool {
        if !self.state.phase.can_start_replay() {
            return false;
        }
        info!(
            stop_line = self.replay_stop_line(),
            language = self.language.label(),
            "new worker replaying from event history"
        );
        self.state.phase = PlaybackPhase::Replaying;
        self.state.callout_visible = true;
        self.state.replay_index = 0;
        self.scheduler.cancel(TimerKind::AutoReplay);
        self.scheduler
            .schedule_after(TimerKind::CalloutDismiss, self.config.base.callout_duration);
        self.scheduler.schedule_after(
            TimerKind::ReplayTick,
            self.config.base.replay_tick_interval,
        );
        true
    }

    /// Cancel every timer, restore the initial state in one step, and re-arm
    /// auto-start. Idempotent and safe from any state.
    pub fn reset(&mut self) {
        self.scheduler.cancel_all();
        self.state = PlaybackState::default();
        self.scheduler
            .schedule_after(TimerKind::AutoStart, self.config.base.auto_start_delay);
        info!("playback reset");
    }

    /// Select a revealed event for highlighting. Hidden events are rejected.
    pub fn select_event(&mut self, event_index: usize) -> Result<()> {
        if event_index >= self.history.len() {
            return Err(PlaybackError::InvalidIndex(event_index));
        }
        if !self.state.is_visible(event_index) {
            return Err(PlaybackError::HiddenEvent(event_index));
        }
        self.state.selected_event = Some(event_index);
        Ok(())
    }

    /// Toggle manual expansion of a group row. Presentation concern only;
    /// playback progress is unaffected.
    pub fn toggle_group(&mut self, display_index: usize) -> Result<()> {
        let item = self
            .display_items
            .get(display_index)
            .ok_or(PlaybackError::InvalidIndex(display_index))?;
        if !item.is_group() {
            return Err(PlaybackError::NotAGroup(display_index));
        }
        if !self.state.expanded_groups.remove(&display_index) {
            self.state.expanded_groups.insert(display_index);
        }
        Ok(())
    }

    /// Switch the active source language. The replay stop line follows the
    /// new listing; playback progress is untouched.
    pub fn set_language(&mut self, language: SdkLanguage) {
        self.language = language;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> PlaybackEngine {
        PlaybackEngine::checkout(PlaybackConfig::default()).unwrap()
    }

    #[test]
    fn test_new_arms_auto_start() {
        let engine = engine();
        assert!(engine.scheduler().is_pending(TimerKind::AutoStart));
        assert_eq!(engine.state().phase, PlaybackPhase::Idle);
        assert!(engine.state().auto_play_armed);
    }

    #[test]
    fn test_step_reveals_first_display_item() {
        let mut engine = engine();
        assert!(engine.step());

        assert_eq!(engine.state().visible_events, vec![0]);
        assert_eq!(engine.state().selected_event, Some(0));
        assert_eq!(engine.state().display_cursor, 1);
        assert_eq!(engine.state().phase, PlaybackPhase::Idle);
    }

    #[test]
    fn test_step_reveals_group_as_unit() {
        let mut engine = engine();
        engine.step();
        engine.step();

        // Second item is the first workflow-task group of three events.
        assert_eq!(engine.state().visible_events, vec![0, 1, 2, 3]);
        assert_eq!(engine.state().selected_event, Some(3));
    }

    #[test]
    fn test_crash_fires_at_configured_item() {
        let mut engine = engine();
        for _ in 0..5 {
            assert!(engine.step());
        }
        // Cursor now sits at the crash display index; the next step halts
        // without revealing anything.
        assert!(!engine.step());

        assert_eq!(engine.state().phase, PlaybackPhase::CrashedAwaitingReplay);
        assert!(engine.state().crash_fired);
        assert_eq!(engine.state().visible_count(), 7);
        assert_eq!(engine.state().display_cursor, 5);
        assert!(engine.scheduler().is_pending(TimerKind::AutoReplay));
        assert!(engine.crash_overlay_visible());
    }

    #[test]
    fn test_crashed_blocks_play_and_step() {
        let mut engine = engine();
        for _ in 0..6 {
            engine.step();
        }
        let before = engine.state().clone();

        assert!(!engine.step());
        assert!(!engine.play());
        assert_eq!(engine.state(), &before);
    }

    #[test]
    fn test_manual_replay_then_resume() {
        let mut engine = engine();
        for _ in 0..6 {
            engine.step();
        }
        assert!(engine.start_replay());
        assert_eq!(engine.state().phase, PlaybackPhase::Replaying);
        assert!(engine.state().callout_visible);
        assert!(!engine.scheduler().is_pending(TimerKind::AutoReplay));

        // Replay cannot start twice.
        assert!(!engine.start_replay());

        // Walk the replay ticks and the resume pause.
        engine.advance(Duration::from_secs(10));
        assert_eq!(engine.state().replay_index, engine.replay_stop_line());
        // Auto-play resumed and ran to completion; the crash did not refire.
        assert_eq!(engine.state().phase, PlaybackPhase::Completed);
        assert_eq!(engine.state().visible_count(), 23);
    }

    #[test]
    fn test_out_of_range_advance_is_noop() {
        let mut engine = engine();
        engine.advance(Duration::from_secs(60));
        assert_eq!(engine.state().phase, PlaybackPhase::Completed);

        let before = engine.state().clone();
        assert!(!engine.advance_one());
        assert_eq!(engine.state(), &before);
    }

    #[test]
    fn test_select_event_requires_visibility() {
        let mut engine = engine();
        assert!(matches!(
            engine.select_event(0),
            Err(PlaybackError::HiddenEvent(0))
        ));
        assert!(matches!(
            engine.select_event(99),
            Err(PlaybackError::InvalidIndex(99))
        ));

        engine.step();
        assert!(engine.select_event(0).is_ok());
        assert_eq!(engine.state().selected_event, Some(0));
    }

    #[test]
    fn test_toggle_group() {
        let mut engine = engine();
        assert!(engine.toggle_group(1).is_ok());
        assert!(engine.state().expanded_groups.contains(&1));
        assert!(engine.toggle_group(1).is_ok());
        assert!(!engine.state().expanded_groups.contains(&1));

        assert!(matches!(
            engine.toggle_group(0),
            Err(PlaybackError::NotAGroup(0))
        ));
        assert!(matches!(
            engine.toggle_group(99),
            Err(PlaybackError::InvalidIndex(99))
        ));
    }

    #[test]
    fn test_highlighted_activity_follows_selection() {
        let mut engine = engine();
        for _ in 0..3 {
            engine.step();
        }
        // Third item is ActivityTaskScheduled(chargeCard), event index 4.
        assert_eq!(engine.state().selected_event, Some(4));
        assert_eq!(engine.highlighted_activity(), Some(Activity::ChargeCard));

        engine.select_event(0).unwrap();
        assert_eq!(engine.highlighted_activity(), None);
    }

    #[test]
    fn test_set_language_rederives_stop_line() {
        let mut engine = engine();
        let ts_line = engine.replay_stop_line();
        assert_eq!(ts_line, 11);

        engine.set_language(SdkLanguage::Python);
        assert_eq!(engine.language(), SdkLanguage::Python);
        assert_eq!(engine.replay_stop_line(), 9);

        engine.set_language(SdkLanguage::Go);
        assert_eq!(engine.replay_stop_line(), 13);
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut engine = engine();
        engine.advance(Duration::from_secs(4));
        assert_eq!(engine.state().phase, PlaybackPhase::CrashedAwaitingReplay);

        engine.reset();
        assert_eq!(engine.state(), &PlaybackState::default());
        assert_eq!(engine.scheduler().pending_count(), 1);
        assert!(engine.scheduler().is_pending(TimerKind::AutoStart));

        // Idempotent.
        engine.reset();
        assert_eq!(engine.state(), &PlaybackState::default());
    }

    #[test]
    fn test_play_blocked_while_playing() {
        let mut engine = engine();
        assert!(engine.play());
        assert!(!engine.play());
        assert_eq!(engine.state().phase, PlaybackPhase::Playing);
    }
}

//! End-to-end scenario tests for the playback engine
//!
//! Drives the virtual scheduler through the whole reference run: auto-start,
//! auto-play, the scripted crash, the automatic replay on the new worker, and
//! resumption to completion. Timings are the reference values from
//! `PlaybackConfig::DEFAULT`.

use history_playback::playback::TimerKind;
use history_playback::prelude::*;
use std::time::Duration;

fn engine() -> PlaybackEngine {
    PlaybackEngine::checkout(PlaybackConfig::default()).expect("reference scenario resolves")
}

#[test]
fn full_auto_play_reveals_all_events_with_one_crash() {
    let mut engine = engine();
    engine.advance(Duration::from_secs(20));

    let state = engine.state();
    assert_eq!(state.phase, PlaybackPhase::Completed);
    assert_eq!(state.visible_count(), 23);
    assert!(state.crash_fired);

    // Reveals happened in original log order, each event exactly once.
    let expected: Vec<usize> = (0..23).collect();
    assert_eq!(state.visible_events, expected);

    // The crash point sits right after chargeCard's ActivityTaskCompleted.
    let crash_index = engine.config().crash_display_index;
    let item_before = &engine.display_items()[crash_index - 1];
    let event = &engine.history().events()[item_before.last_event_index()];
    assert_eq!(event.name, EventName::ActivityTaskCompleted);
    assert_eq!(event.activity, Some(Activity::ChargeCard));
}

#[test]
fn auto_start_fires_once_after_delay() {
    let mut engine = engine();

    // Nothing before the auto-start delay elapses.
    engine.advance(Duration::from_millis(599));
    assert_eq!(engine.state().phase, PlaybackPhase::Idle);
    assert!(engine.state().auto_play_armed);

    engine.advance(Duration::from_millis(1));
    assert_eq!(engine.state().phase, PlaybackPhase::Playing);
    assert!(!engine.state().auto_play_armed);

    // First reveal lands one play interval later.
    assert_eq!(engine.state().visible_count(), 0);
    engine.advance(Duration::from_millis(400));
    assert_eq!(engine.state().visible_events, vec![0]);
}

#[test]
fn crash_halts_auto_play_and_schedules_replay() {
    let mut engine = engine();

    // Auto-start at 600, reveals at 1000..2600, crash on the tick at 3000.
    engine.advance(Duration::from_millis(3000));
    let state = engine.state();
    assert_eq!(state.phase, PlaybackPhase::CrashedAwaitingReplay);
    assert_eq!(state.visible_count(), 7);
    assert_eq!(state.display_cursor, engine.config().crash_display_index);
    assert!(engine.crash_overlay_visible());
    assert!(engine.scheduler().is_pending(TimerKind::AutoReplay));
    assert!(!engine.scheduler().is_pending(TimerKind::PlayTick));

    // Manual controls stay blocked until replay.
    assert!(!engine.play());
    assert!(!engine.step());
    assert_eq!(engine.state().visible_count(), 7);
}

#[test]
fn auto_replay_starts_and_terminates() {
    let mut engine = engine();
    engine.advance(Duration::from_millis(3000));
    assert_eq!(engine.state().phase, PlaybackPhase::CrashedAwaitingReplay);

    // Auto-replay fires 2000 after the crash.
    engine.advance(Duration::from_millis(2000));
    assert_eq!(engine.state().phase, PlaybackPhase::Replaying);
    assert!(engine.state().callout_visible);
    assert_eq!(engine.state().replay_index, 0);

    // Replay walks to the chargeCard line and then auto-play resumes after
    // the scripted pause.
    let stop_line = engine.replay_stop_line();
    engine.advance(Duration::from_millis(
        150 * (stop_line as u64 + 1) + 500,
    ));
    assert_eq!(engine.state().replay_index, stop_line);
    assert_eq!(engine.state().phase, PlaybackPhase::Playing);
    assert!(!engine.crash_overlay_visible());

    // Callout dismisses on its own 3000 after replay started.
    assert!(!engine.state().callout_visible || engine.scheduler().is_pending(TimerKind::CalloutDismiss));
}

#[test]
fn history_annotation_appears_at_stop_line() {
    let mut engine = engine();
    engine.advance(Duration::from_millis(5000));
    assert_eq!(engine.state().phase, PlaybackPhase::Replaying);
    assert!(!engine.history_annotation_visible());

    let stop_line = engine.replay_stop_line();
    engine.advance(Duration::from_millis(150 * stop_line as u64));
    assert_eq!(engine.state().replay_index, stop_line);
    assert!(engine.history_annotation_visible());
}

#[test]
fn advance_one_exhaustively_partitions_the_run() {
    let mut engine = engine();
    let item_count = engine.display_items().len();

    // One call per display item plus the single crash halt.
    for _ in 0..item_count + 1 {
        engine.advance_one();
    }

    let state = engine.state();
    assert_eq!(state.phase, PlaybackPhase::Completed);
    assert_eq!(state.visible_count(), engine.history().len());
    let expected: Vec<usize> = (0..engine.history().len()).collect();
    assert_eq!(state.visible_events, expected);
    assert!(state.crash_fired);
}

#[test]
fn reset_cancels_stale_timers_and_restarts() {
    let mut engine = engine();

    // Reset mid-replay: the replay, callout, and resume timers must all die.
    engine.advance(Duration::from_millis(5600));
    assert_eq!(engine.state().phase, PlaybackPhase::Replaying);
    engine.reset();

    assert_eq!(engine.state(), &PlaybackState::default());
    assert_eq!(engine.scheduler().pending_count(), 1);
    assert!(engine.scheduler().is_pending(TimerKind::AutoStart));

    // The fresh cycle runs to completion again, so no stale callback touched
    // the reset state.
    engine.advance(Duration::from_secs(20));
    assert_eq!(engine.state().phase, PlaybackPhase::Completed);
    assert_eq!(engine.state().visible_count(), 23);
}

#[test]
fn reset_is_safe_from_every_phase() {
    let checkpoints_millis = [0u64, 700, 3000, 5200, 12_000];
    for checkpoint in checkpoints_millis {
        let mut engine = engine();
        engine.advance(Duration::from_millis(checkpoint));
        engine.reset();
        assert_eq!(engine.state(), &PlaybackState::default(), "at {checkpoint}ms");
        assert!(engine.scheduler().is_pending(TimerKind::AutoStart));
    }
}

#[test]
fn language_switch_mid_replay_keeps_replay_terminating() {
    let mut engine = engine();
    engine.advance(Duration::from_millis(5300));
    assert_eq!(engine.state().phase, PlaybackPhase::Replaying);

    engine.set_language(SdkLanguage::Go);
    assert_eq!(engine.replay_stop_line(), 13);

    engine.advance(Duration::from_secs(20));
    assert_eq!(engine.state().phase, PlaybackPhase::Completed);
    assert_eq!(engine.state().visible_count(), 23);
}

#[test]
fn step_once_from_initial_state() {
    let mut engine = engine();
    assert!(engine.step());

    let state = engine.state();
    assert_eq!(state.visible_events, vec![0]);
    assert_eq!(state.selected_event, Some(0));
    assert_eq!(state.phase, PlaybackPhase::Idle);
}

#[test]
fn selection_and_expansion_do_not_disturb_playback() {
    let mut engine = engine();
    engine.advance(Duration::from_millis(1400));
    let cursor = engine.state().display_cursor;

    engine.select_event(0).unwrap();
    engine.toggle_group(1).unwrap();
    assert_eq!(engine.state().display_cursor, cursor);
    assert_eq!(engine.state().phase, PlaybackPhase::Playing);

    engine.advance(Duration::from_secs(20));
    assert_eq!(engine.state().phase, PlaybackPhase::Completed);
    // Manual expansion survives playback, reset clears it.
    assert!(engine.state().expanded_groups.contains(&1));
    engine.reset();
    assert!(engine.state().expanded_groups.is_empty());
}

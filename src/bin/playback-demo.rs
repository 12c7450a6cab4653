//! Terminal driver for the playback engine
//!
//! Pumps the engine from a real-time tokio interval and prints the event
//! history as it is revealed, including the scripted crash and the replay on
//! the new worker. The same scenario the slide shows, without the visuals.

use history_playback::prelude::*;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const TICK: Duration = Duration::from_millis(50);

fn print_new_rows(engine: &PlaybackEngine, printed: &mut usize) {
    let state = engine.state();
    while *printed < state.visible_count() {
        let index = state.visible_events[*printed];
        let event = &engine.history().events()[index];
        let activity = event
            .activity
            .map(|a| format!(" ({})", a.as_str()))
            .unwrap_or_default();
        println!(
            "  {:>2}  {:<12}  {}{}  {}",
            event.id,
            format!("{:?}", event.category),
            event.name.as_str(),
            activity,
            event.timestamp
        );
        *printed += 1;
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let engine = PlaybackEngine::checkout(PlaybackConfig::default())
        .expect("reference scenario resolves");
    println!(
        "What happens when your server crashes mid-checkout?  [{}]",
        engine.active_listing().filename
    );

    let engine = Arc::new(Mutex::new(engine));
    let mut interval = tokio::time::interval(TICK);
    let mut printed = 0;
    let mut last_phase = PlaybackPhase::Idle;
    let mut replay_line = None;

    loop {
        interval.tick().await;
        let mut engine = engine.lock();
        engine.advance(TICK);

        print_new_rows(&engine, &mut printed);

        let phase = engine.state().phase;
        if phase != last_phase {
            match phase {
                PlaybackPhase::CrashedAwaitingReplay => {
                    println!("  -- worker crashed; history is persisted, a new worker can replay --")
                }
                PlaybackPhase::Replaying => println!("  -- replaying workflow code on new worker --"),
                PlaybackPhase::Playing if last_phase == PlaybackPhase::Replaying => {
                    println!("  -- caught up; resuming execution --")
                }
                PlaybackPhase::Completed => println!("  -- COMPLETED --"),
                _ => {}
            }
            last_phase = phase;
        }

        if phase == PlaybackPhase::Replaying {
            let line = engine.state().replay_index;
            if replay_line != Some(line) {
                if let Some(code) = engine.active_listing().line(line) {
                    let marker = if engine.history_annotation_visible() {
                        "  <- result loaded from history"
                    } else {
                        ""
                    };
                    println!("  replay | {:>2} {}{}", line + 1, code.text, marker);
                }
                replay_line = Some(line);
            }
        }

        if phase == PlaybackPhase::Completed {
            break;
        }
    }
}

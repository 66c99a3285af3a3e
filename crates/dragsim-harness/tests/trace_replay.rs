//! Trace determinism: identical scripted gestures produce identical JSONL
//! traces and checksums, and a behavioral change shows up as a divergence at
//! the first affected event.

use dragsim_core::config::SimulatorConfig;
use dragsim_core::event::EventProps;
use dragsim_core::geometry::{Rect, ViewportSize};
use dragsim_core::interpolation::{Interpolation, Jitter};
use dragsim_core::{DragAndDropOptions, DragOptions, DragSimulator, DropOptions};
use dragsim_harness::{FakeDocument, ManualClock, TraceLog, drive};
use serde_json::Value;
use web_time::Duration;

/// Paced, jittered drag-and-drop followed by a second drag and drop.
fn scripted_run(seed: u64, shaky: u32) -> TraceLog {
    let mut doc = FakeDocument::new(ViewportSize::new(640.0, 480.0));
    let card = doc.add_element("card", Rect::new(10.0, 10.0, 80.0, 40.0));
    let lane = doc.add_element("lane", Rect::new(200.0, 0.0, 150.0, 480.0));
    doc.scroll_to(0.0, 0.0);

    let clock = ManualClock::new();
    let mut sim = DragSimulator::new(SimulatorConfig {
        jitter_seed: Some(seed),
        ..SimulatorConfig::default()
    })
    .with_clock(clock.clone());

    sim.drag_and_drop(
        &mut doc,
        card,
        DragAndDropOptions::onto(lane).with_interpolation(
            Interpolation::step_width(20)
                .with_duration(Duration::from_millis(200))
                .with_jitter(Jitter::Amplitude(shaky)),
        ),
    );
    drive(&mut sim, &mut doc, &clock, 1_000);

    sim.drag(
        &mut doc,
        lane,
        DragOptions::by(0.0, 60.0).with_props(EventProps::new().with_field("pointerId", 2)),
    );
    sim.drop(&mut doc, lane, DropOptions::default().with_click_to_drop());

    TraceLog::capture(&doc)
}

#[test]
fn identical_runs_have_identical_traces() {
    let first = scripted_run(7, 2);
    let second = scripted_run(7, 2);

    assert!(!first.is_empty());
    assert_eq!(first.to_jsonl(), second.to_jsonl());
    assert_eq!(first.checksum(), second.checksum());
    assert_eq!(first.first_divergence(&second), None);
}

#[test]
fn trace_lines_are_valid_json_with_sequential_ids() {
    let trace = scripted_run(7, 0);
    for (i, line) in trace.lines().iter().enumerate() {
        let value: Value = serde_json::from_str(line).expect("valid json");
        assert_eq!(value["seq"], i);
        assert!(value["type"].is_string());
        assert!(value["target"].is_string());
    }
}

#[test]
fn jitter_changes_only_intermediate_moves() {
    let steady = scripted_run(7, 0);
    let shaky = scripted_run(7, 3);

    assert_eq!(steady.len(), shaky.len());
    // The mousedown is identical; divergence starts with the steps.
    assert_eq!(steady.lines()[0], shaky.lines()[0]);
    assert!(steady.first_divergence(&shaky).is_some_and(|i| i >= 1));

    let parse = |t: &TraceLog| -> Vec<Value> {
        t.lines()
            .iter()
            .map(|l| serde_json::from_str(l).expect("json"))
            .collect()
    };
    let (steady, shaky) = (parse(&steady), parse(&shaky));
    let drag_done = steady
        .iter()
        .position(|v| v["type"] == "simulate-drag")
        .expect("drag notification");
    // Final move of the drag, right before its notification.
    assert_eq!(steady[drag_done - 1], shaky[drag_done - 1]);
    assert_eq!(steady[drag_done - 1]["pageX"], 275);
    assert_eq!(steady.last(), shaky.last());
}

//! Paced interpolation driven by a manual clock.
//!
//! A paced drag fires its `mousedown` synchronously and everything else from
//! [`DragSimulator::poll`]. These tests check that:
//!
//! - the chain is armed by the `drag` call and steps one delay apart,
//! - a first poll that comes late still fires the first step on time,
//! - early wake-ups only report the remaining time,
//! - late wake-ups still advance a single step per poll,
//! - completion (notification, callback, chained drop) waits for the final
//!   move.

use std::cell::Cell;
use std::rc::Rc;

use dragsim_core::config::SimulatorConfig;
use dragsim_core::document::ElementId;
use dragsim_core::geometry::{Rect, ViewportSize};
use dragsim_core::interpolation::Interpolation;
use dragsim_core::schedule::{Clock, Poll, SystemClock, run_until_idle};
use dragsim_core::{DragAndDropOptions, DragOptions, DragSimulator, DragStatus};
use dragsim_harness::{FakeDocument, ManualClock, drive};
use web_time::Duration;

const MS_10: Duration = Duration::from_millis(10);

fn setup() -> (FakeDocument, ElementId, ElementId, DragSimulator, ManualClock) {
    let mut doc = FakeDocument::new(ViewportSize::new(800.0, 600.0));
    let a = doc.add_element("a", Rect::new(0.0, 0.0, 100.0, 100.0));
    let b = doc.add_element("b", Rect::new(300.0, 0.0, 100.0, 100.0));
    let clock = ManualClock::new();
    let sim = DragSimulator::new(SimulatorConfig {
        jitter_seed: Some(11),
        ..SimulatorConfig::default()
    })
    .with_clock(clock.clone());
    (doc, a, b, sim, clock)
}

fn paced(count: u32) -> Interpolation {
    Interpolation::step_count(count).with_step_delay(MS_10)
}

#[test]
fn paced_drag_returns_pending_after_mousedown() {
    let (mut doc, a, _, mut sim, _) = setup();

    let status = sim.drag(
        &mut doc,
        a,
        DragOptions::by(100.0, 0.0).with_interpolation(paced(3)),
    );

    assert_eq!(status, DragStatus::Pending);
    assert_eq!(doc.names(), vec!["mousedown"]);
    assert_eq!(sim.pending_count(), 1);
    assert!(sim.is_dragging(a), "drag is recorded before any move");
}

#[test]
fn steps_fire_one_delay_apart() {
    let (mut doc, a, _, mut sim, clock) = setup();
    sim.drag(
        &mut doc,
        a,
        DragOptions::by(100.0, 0.0).with_interpolation(paced(3)),
    );

    // Armed by the drag; polling right away only reports the wait.
    assert_eq!(sim.poll(&mut doc, clock.now()), Poll::Pending(MS_10));
    assert!(doc.move_positions().is_empty());

    for (i, expected_x) in [75, 100, 125].into_iter().enumerate() {
        clock.advance(MS_10);
        assert_eq!(sim.poll(&mut doc, clock.now()), Poll::Pending(MS_10));
        assert_eq!(doc.move_positions().len(), i + 1);
        assert_eq!(doc.move_positions()[i], (expected_x, 50));
    }

    clock.advance(MS_10);
    assert_eq!(sim.poll(&mut doc, clock.now()), Poll::Idle);
    assert_eq!(doc.move_positions().last(), Some(&(150, 50)));
    assert_eq!(doc.names().last(), Some(&"simulate-drag"));
    assert_eq!(sim.pending_count(), 0);
}

#[test]
fn first_step_is_due_one_delay_after_the_drag() {
    let (mut doc, a, _, mut sim, clock) = setup();
    sim.drag(
        &mut doc,
        a,
        DragOptions::by(100.0, 0.0).with_interpolation(paced(3)),
    );

    // The host does not poll until 25ms in; the first step was due at 10ms.
    clock.advance_ms(25);
    assert_eq!(sim.poll(&mut doc, clock.now()), Poll::Pending(MS_10));
    assert_eq!(doc.move_positions(), vec![(75, 50)]);

    clock.advance(MS_10);
    sim.poll(&mut doc, clock.now());
    assert_eq!(doc.move_positions(), vec![(75, 50), (100, 50)]);
}

#[test]
fn early_wake_reports_remaining_time_without_stepping() {
    let (mut doc, a, _, mut sim, clock) = setup();
    sim.drag(
        &mut doc,
        a,
        DragOptions::by(100.0, 0.0).with_interpolation(paced(3)),
    );
    sim.poll(&mut doc, clock.now());

    clock.advance_ms(4);
    assert_eq!(
        sim.poll(&mut doc, clock.now()),
        Poll::Pending(Duration::from_millis(6))
    );
    assert!(doc.move_positions().is_empty());

    clock.advance_ms(6);
    sim.poll(&mut doc, clock.now());
    assert_eq!(doc.move_positions(), vec![(75, 50)]);
}

#[test]
fn late_wake_still_advances_one_step() {
    let (mut doc, a, _, mut sim, clock) = setup();
    sim.drag(
        &mut doc,
        a,
        DragOptions::by(100.0, 0.0).with_interpolation(paced(3)),
    );
    sim.poll(&mut doc, clock.now());

    clock.advance_ms(35);
    assert_eq!(sim.poll(&mut doc, clock.now()), Poll::Pending(MS_10));
    assert_eq!(doc.move_positions(), vec![(75, 50)]);
}

#[test]
fn drive_runs_the_whole_chain() {
    let (mut doc, a, _, mut sim, clock) = setup();
    let done = Rc::new(Cell::new(false));
    let flag = Rc::clone(&done);
    sim.drag(
        &mut doc,
        a,
        DragOptions::by(100.0, 0.0)
            .with_interpolation(paced(3))
            .on_complete(move |_| flag.set(true)),
    );
    assert!(!done.get());

    let report = drive(&mut sim, &mut doc, &clock, 100);

    assert!(report.idle);
    assert_eq!(report.polls, 5);
    assert_eq!(report.elapsed, Duration::from_millis(40));
    assert!(done.get());
    assert_eq!(
        doc.move_positions(),
        vec![(75, 50), (100, 50), (125, 50), (150, 50)]
    );
}

#[test]
fn duration_is_spread_over_all_moves() {
    let (mut doc, a, _, mut sim, clock) = setup();
    sim.drag(
        &mut doc,
        a,
        DragOptions::by(100.0, 0.0).with_interpolation(
            Interpolation::step_count(3).with_duration(Duration::from_millis(100)),
        ),
    );

    let report = drive(&mut sim, &mut doc, &clock, 100);

    // 100ms over 4 moves = 25ms each.
    assert_eq!(report.elapsed, Duration::from_millis(100));
    assert_eq!(doc.move_positions().len(), 4);
}

#[test]
fn paced_drag_and_drop_drops_after_the_final_move() {
    let (mut doc, a, b, mut sim, clock) = setup();

    let status = sim.drag_and_drop(
        &mut doc,
        a,
        DragAndDropOptions::onto(b).with_interpolation(paced(1)),
    );
    assert_eq!(status, DragStatus::Pending);
    assert!(doc.notifications().is_empty());

    drive(&mut sim, &mut doc, &clock, 100);

    assert_eq!(
        doc.names(),
        vec![
            "mousedown",
            "mousemove",
            "mousemove",
            "simulate-drag",
            "mouseup",
            "simulate-drop"
        ]
    );
    assert!(sim.active_drag().is_none());
}

#[test]
fn budget_exhaustion_leaves_the_chain_in_flight() {
    let (mut doc, a, _, mut sim, clock) = setup();
    sim.drag(
        &mut doc,
        a,
        DragOptions::by(100.0, 0.0).with_interpolation(paced(3)),
    );

    let report = drive(&mut sim, &mut doc, &clock, 2);

    assert!(!report.idle);
    assert_eq!(sim.pending_count(), 1);
    assert_eq!(doc.move_positions().len(), 1);
}

#[test]
fn immediate_interpolation_never_needs_polling() {
    let (mut doc, a, _, mut sim, _) = setup();
    let status = sim.drag(
        &mut doc,
        a,
        DragOptions::by(100.0, 0.0).with_interpolation(
            Interpolation::step_count(3)
                .with_step_delay(Duration::ZERO)
                .with_duration(Duration::ZERO),
        ),
    );
    assert_eq!(status, DragStatus::Completed);
    assert_eq!(sim.poll(&mut doc, SystemClock.now()), Poll::Idle);
}

#[test]
fn system_clock_driver_finishes_short_chains() {
    let (mut doc, a, _, _, _) = setup();
    let mut sim = DragSimulator::default();
    sim.drag(
        &mut doc,
        a,
        DragOptions::by(30.0, 0.0).with_interpolation(
            Interpolation::step_count(2).with_step_delay(Duration::from_millis(1)),
        ),
    );

    let polls = run_until_idle(&mut sim, &mut doc, &SystemClock);

    assert!(polls >= 4);
    assert_eq!(doc.move_positions(), vec![(60, 50), (70, 50), (80, 50)]);
}

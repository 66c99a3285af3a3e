#![forbid(unsafe_code)]

//! The drag-and-drop simulator.
//!
//! [`DragSimulator`] turns `drag`, `drop` and `drag_and_drop` requests into
//! synthetic pointer events dispatched through a [`Document`]. It owns the
//! active-drag context, so independent simulators never interfere.
//!
//! # State Machine
//!
//! Per element the simulator is either idle or dragging; the active-drag
//! record represents "dragging" and at most one exists per simulator.
//!
//! - `drag` on an idle simulator fires `mousedown` at the element's center
//!   and records the drag.
//! - `drag` on the element already being dragged continues it: the new
//!   displacement is added to the recorded distance, no `mousedown` fires.
//! - `drag` on a different element first drops the active one.
//! - `drop` clears the record; so does an external `mouseup` reported
//!   through [`handle_host_event`](DragSimulator::handle_host_event).
//!
//! # Invariants
//!
//! 1. Within one drag, `mousedown` precedes every `mousemove`, and every
//!    intermediate move precedes the final move and the `simulate-drag`
//!    notification.
//! 2. The final move of a drag lands exactly on `start + distance` and is
//!    never jittered.
//! 3. For `drag_and_drop`, the drop's events follow the drag's completion.
//! 4. The recorded element is always the one that received the drag's
//!    `mousedown`.
//!
//! # Failure Modes
//!
//! - Hit testing that resolves nothing falls back to the dragged element
//!   (moves) or to the active drag's element, then the drop element (drops).
//! - Missing or non-finite displacement behaves as a zero-distance drag:
//!   no movement, immediate completion.

use std::fmt;

use web_time::{Duration, Instant};

use crate::config::SimulatorConfig;
use crate::coords::{find_center, page_to_client};
use crate::document::{Document, ElementId};
use crate::event::{EventProps, HostEvent, Notification, PointerEventKind, SimulatedEvent};
use crate::geometry::{Delta, PagePoint, round_half_up};
use crate::hit_test::HitTester;
use crate::interpolation::{Interpolation, InterpolationPlan, Jitter};
use crate::jitter::Shaker;
use crate::schedule::{Clock, Poll, StepTimer, SystemClock, TimerPoll};

/// Completion callback, invoked with the receiving element.
pub type Callback = Box<dyn FnOnce(ElementId)>;

/// Snapshot of the drag in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveDrag {
    /// Element that received the drag's `mousedown`.
    pub element: ElementId,
    /// Page position of the `mousedown`.
    pub start: PagePoint,
    /// Total displacement applied so far.
    pub distance: Delta,
}

impl ActiveDrag {
    /// Page position the pointer has been moved to.
    #[must_use]
    pub fn end(&self) -> PagePoint {
        self.start + self.distance
    }
}

/// Options for [`DragSimulator::drag`].
#[derive(Default)]
pub struct DragOptions {
    /// Horizontal displacement (ignored when `drag_target` is set).
    pub dx: f64,
    /// Vertical displacement (ignored when `drag_target` is set).
    pub dy: f64,
    /// Drag onto this element's center instead of by `dx`/`dy`.
    pub drag_target: Option<ElementId>,
    /// Fire `mouseup` and `click` right after the `mousedown`.
    pub click_to_drag: bool,
    /// Merged into every event of the drag.
    pub event_props: EventProps,
    /// Split the movement into intermediate steps. Falls back to the
    /// simulator's configured default.
    pub interpolation: Option<Interpolation>,
    /// Invoked with the dragged element after the final move.
    pub callback: Option<Callback>,
}

impl DragOptions {
    /// Drag by a displacement.
    #[must_use]
    pub fn by(dx: f64, dy: f64) -> Self {
        Self {
            dx,
            dy,
            ..Self::default()
        }
    }

    /// Drag onto another element's center.
    #[must_use]
    pub fn onto(target: ElementId) -> Self {
        Self {
            drag_target: Some(target),
            ..Self::default()
        }
    }

    /// Grab with a click before moving (builder pattern).
    #[must_use]
    pub fn with_click_to_drag(mut self) -> Self {
        self.click_to_drag = true;
        self
    }

    /// Merge `props` into every event (builder pattern).
    #[must_use]
    pub fn with_props(mut self, props: EventProps) -> Self {
        self.event_props = props;
        self
    }

    /// Interpolate the movement (builder pattern).
    #[must_use]
    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = Some(interpolation);
        self
    }

    /// Run `callback` once the drag completes (builder pattern).
    #[must_use]
    pub fn on_complete(mut self, callback: impl FnOnce(ElementId) + 'static) -> Self {
        self.callback = Some(Box::new(callback));
        self
    }
}

impl fmt::Debug for DragOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragOptions")
            .field("dx", &self.dx)
            .field("dy", &self.dy)
            .field("drag_target", &self.drag_target)
            .field("click_to_drag", &self.click_to_drag)
            .field("event_props", &self.event_props)
            .field("interpolation", &self.interpolation)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

/// Options for [`DragSimulator::drop`].
#[derive(Default)]
pub struct DropOptions {
    /// Fire `mousedown` before and `click` after the `mouseup`.
    pub click_to_drop: bool,
    /// Merged into every event of the drop.
    pub event_props: EventProps,
    /// Invoked with the resolved drop target.
    pub callback: Option<Callback>,
}

impl DropOptions {
    /// Drop with a full click (builder pattern).
    #[must_use]
    pub fn with_click_to_drop(mut self) -> Self {
        self.click_to_drop = true;
        self
    }

    /// Merge `props` into every event (builder pattern).
    #[must_use]
    pub fn with_props(mut self, props: EventProps) -> Self {
        self.event_props = props;
        self
    }

    /// Run `callback` after the drop (builder pattern).
    #[must_use]
    pub fn on_complete(mut self, callback: impl FnOnce(ElementId) + 'static) -> Self {
        self.callback = Some(Box::new(callback));
        self
    }
}

impl fmt::Debug for DropOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DropOptions")
            .field("click_to_drop", &self.click_to_drop)
            .field("event_props", &self.event_props)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

/// Options for [`DragSimulator::drag_and_drop`]: every drag option plus
/// the drop target and drop behavior.
#[derive(Default)]
pub struct DragAndDropOptions {
    /// Horizontal displacement of the drag.
    pub dx: f64,
    /// Vertical displacement of the drag.
    pub dy: f64,
    /// Drag onto this element's center instead of by `dx`/`dy`.
    pub drag_target: Option<ElementId>,
    /// Element to drop on. Without a drag target or displacement the drag
    /// goes straight onto this element.
    pub drop_target: Option<ElementId>,
    /// Grab with a click before moving.
    pub click_to_drag: bool,
    /// Drop with a full click.
    pub click_to_drop: bool,
    /// Merged into the events of both the drag and the drop.
    pub event_props: EventProps,
    /// Split the drag's movement into intermediate steps.
    pub interpolation: Option<Interpolation>,
    /// Invoked with the resolved drop target after the drop.
    pub callback: Option<Callback>,
}

impl DragAndDropOptions {
    /// Drag onto `target` and drop there.
    #[must_use]
    pub fn onto(target: ElementId) -> Self {
        Self {
            drop_target: Some(target),
            ..Self::default()
        }
    }

    /// Drag by a displacement, then drop.
    #[must_use]
    pub fn by(dx: f64, dy: f64) -> Self {
        Self {
            dx,
            dy,
            ..Self::default()
        }
    }

    /// Grab with a click before moving (builder pattern).
    #[must_use]
    pub fn with_click_to_drag(mut self) -> Self {
        self.click_to_drag = true;
        self
    }

    /// Drop with a full click (builder pattern).
    #[must_use]
    pub fn with_click_to_drop(mut self) -> Self {
        self.click_to_drop = true;
        self
    }

    /// Merge `props` into the events of both the drag and the drop
    /// (builder pattern).
    #[must_use]
    pub fn with_props(mut self, props: EventProps) -> Self {
        self.event_props = props;
        self
    }

    /// Interpolate the drag (builder pattern).
    #[must_use]
    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = Some(interpolation);
        self
    }

    /// Run `callback` after the drop (builder pattern).
    #[must_use]
    pub fn on_complete(mut self, callback: impl FnOnce(ElementId) + 'static) -> Self {
        self.callback = Some(Box::new(callback));
        self
    }
}

impl fmt::Debug for DragAndDropOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragAndDropOptions")
            .field("dx", &self.dx)
            .field("dy", &self.dy)
            .field("drag_target", &self.drag_target)
            .field("drop_target", &self.drop_target)
            .field("click_to_drag", &self.click_to_drag)
            .field("click_to_drop", &self.click_to_drop)
            .field("event_props", &self.event_props)
            .field("interpolation", &self.interpolation)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

/// Whether a drag finished within the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragStatus {
    /// All moves fired and completion was signalled.
    Completed,
    /// A paced interpolation is in flight; drive it with
    /// [`DragSimulator::poll`].
    Pending,
}

/// What happens once a drag's last move has fired.
enum AfterDrag {
    Callback(Option<Callback>),
    Drop {
        target: ElementId,
        options: DropOptions,
    },
}

/// A paced interpolation waiting for its timer.
struct PendingMoves {
    element: ElementId,
    plan: InterpolationPlan,
    jitter: Jitter,
    props: EventProps,
    /// Intermediate steps fired so far.
    step: u32,
    /// Armed when the drag was requested.
    timer: StepTimer,
    after: AfterDrag,
}

enum Advance {
    Waiting(PendingMoves, Duration),
    Done,
}

/// Simulates drag gestures against a [`Document`].
pub struct DragSimulator {
    active: Option<ActiveDrag>,
    /// One-shot external `mouseup` listener for the active drag.
    release_armed: bool,
    hit_tester: Box<dyn HitTester>,
    shaker: Shaker,
    default_interpolation: Option<Interpolation>,
    /// Stamps when paced drags start.
    clock: Box<dyn Clock>,
    pending: Vec<PendingMoves>,
}

impl fmt::Debug for DragSimulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragSimulator")
            .field("active", &self.active)
            .field("release_armed", &self.release_armed)
            .field("hit_tester", &self.hit_tester)
            .field("pending", &self.pending.len())
            .finish()
    }
}

impl Default for DragSimulator {
    fn default() -> Self {
        Self::new(SimulatorConfig::default())
    }
}

impl DragSimulator {
    /// Create a simulator from `config`.
    #[must_use]
    pub fn new(config: SimulatorConfig) -> Self {
        let shaker = config.jitter_seed.map_or_else(Shaker::from_os, Shaker::seeded);
        Self {
            active: None,
            release_armed: false,
            hit_tester: config.hit_test.build(),
            shaker,
            default_interpolation: config.interpolation(),
            clock: Box::new(SystemClock),
            pending: Vec::new(),
        }
    }

    /// Replace the time source paced drags are armed with (builder pattern).
    ///
    /// [`poll`](Self::poll) must be driven from the same clock.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Replace the hit-testing strategy (builder pattern).
    #[must_use]
    pub fn with_hit_tester(mut self, hit_tester: Box<dyn HitTester>) -> Self {
        self.hit_tester = hit_tester;
        self
    }

    /// Replace the jitter source (builder pattern).
    #[must_use]
    pub fn with_shaker(mut self, shaker: Shaker) -> Self {
        self.shaker = shaker;
        self
    }

    /// Copy of the active drag, if any.
    ///
    /// The snapshot is detached: changing it never affects the simulator.
    #[must_use]
    pub fn active_drag(&self) -> Option<ActiveDrag> {
        self.active
    }

    /// Whether `element` is the one currently being dragged.
    #[must_use]
    pub fn is_dragging(&self, element: ElementId) -> bool {
        self.active.is_some_and(|a| a.element == element)
    }

    /// Number of paced interpolations still in flight.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Drag `element`.
    ///
    /// Starts a new drag, continues the active one if it belongs to
    /// `element`, or drops a different active drag first. The `simulate-drag`
    /// notification and the callback follow the final move.
    pub fn drag(
        &mut self,
        doc: &mut dyn Document,
        element: ElementId,
        mut options: DragOptions,
    ) -> DragStatus {
        let callback = options.callback.take();
        self.drag_then(doc, element, options, AfterDrag::Callback(callback))
    }

    /// Drop `element` (or the active drag, when `element` is it or is the
    /// document). Returns the element the `mouseup` was fired on.
    pub fn drop(
        &mut self,
        doc: &mut dyn Document,
        element: ElementId,
        options: DropOptions,
    ) -> ElementId {
        let active = self.active;
        let drops_active_drag =
            active.is_some_and(|a| a.element == element || doc.is_document(element));
        let point = match active {
            Some(a) if drops_active_drag => a.end().round(),
            _ => find_center(&*doc, element).round(),
        };
        let target = self
            .hit_target(&*doc, point)
            .or(active.map(|a| a.element))
            .unwrap_or(element);
        let props = options.event_props;

        // An active drag already moved the pointer; otherwise move there first.
        if !drops_active_drag {
            self.fire(doc, target, PointerEventKind::MouseMove, point, &props);
        }
        if options.click_to_drop {
            self.fire(doc, target, PointerEventKind::MouseDown, point, &props);
        }
        self.fire(doc, target, PointerEventKind::MouseUp, point, &props);
        if options.click_to_drop {
            self.fire(doc, target, PointerEventKind::Click, point, &props);
        }

        self.clear_active();
        tracing::debug!(
            element = %element,
            target_element = %target,
            x = point.x,
            y = point.y,
            "drop"
        );
        doc.notify(target, Notification::Drop);
        if let Some(callback) = options.callback {
            callback(target);
        }
        target
    }

    /// Drag `element`, then drop once the drag completes.
    ///
    /// The drop happens on `drop_target` (or `element`) when a drag target or
    /// displacement is given; otherwise the drag goes onto `drop_target` and
    /// the dragged element is dropped there.
    pub fn drag_and_drop(
        &mut self,
        doc: &mut dyn Document,
        element: ElementId,
        options: DragAndDropOptions,
    ) -> DragStatus {
        let DragAndDropOptions {
            dx,
            dy,
            drag_target,
            drop_target,
            click_to_drag,
            click_to_drop,
            event_props,
            interpolation,
            callback,
        } = options;

        let displaced = drag_target.is_some() || dx != 0.0 || dy != 0.0;
        let drop_element = if displaced {
            drop_target.unwrap_or(element)
        } else {
            element
        };
        let drag = DragOptions {
            dx,
            dy,
            drag_target: if displaced { drag_target } else { drop_target },
            click_to_drag,
            event_props: event_props.clone(),
            interpolation,
            callback: None,
        };
        let drop = DropOptions {
            click_to_drop,
            event_props,
            callback,
        };
        self.drag_then(
            doc,
            element,
            drag,
            AfterDrag::Drop {
                target: drop_element,
                options: drop,
            },
        )
    }

    /// Report an event observed by the host.
    ///
    /// The first `mouseup` after a drag starts ends it, covering drops the
    /// simulator did not perform itself.
    pub fn handle_host_event(&mut self, event: HostEvent) {
        match event {
            HostEvent::MouseUp { target } => {
                if !self.release_armed {
                    return;
                }
                self.release_armed = false;
                if let Some(active) = self.active.take() {
                    tracing::debug!(
                        element = %active.element,
                        released_on = %target,
                        "external mouseup ended active drag"
                    );
                }
            }
        }
    }

    /// Advance paced interpolations that are due at `now`.
    ///
    /// Each in-flight drag advances by at most one move per call. A paced
    /// drag is armed when it is requested, so its first move is due one step
    /// delay after the `drag` call however late the first poll comes.
    pub fn poll(&mut self, doc: &mut dyn Document, now: Instant) -> Poll {
        let in_flight = std::mem::take(&mut self.pending);
        let mut waiting = Vec::with_capacity(in_flight.len());
        let mut next_wake: Option<Duration> = None;

        for moves in in_flight {
            if let Advance::Waiting(moves, wait) = self.advance(doc, moves, now) {
                next_wake = Some(next_wake.map_or(wait, |w| w.min(wait)));
                waiting.push(moves);
            }
        }
        self.pending = waiting;

        next_wake.map_or(Poll::Idle, Poll::Pending)
    }
}

// ---------------------------------------------------------------------------
// Internals
// ---------------------------------------------------------------------------

impl DragSimulator {
    fn drag_then(
        &mut self,
        doc: &mut dyn Document,
        element: ElementId,
        options: DragOptions,
        after: AfterDrag,
    ) -> DragStatus {
        let continuing = self.is_dragging(element);
        // A continued drag measures from its recorded (rounded) start, a new
        // one from the element's exact center.
        let origin = match self.active {
            Some(active) if continuing => active.start,
            _ => find_center(&*doc, element),
        };
        let start = origin.round();
        let delta = match options.drag_target {
            Some(target) => (find_center(&*doc, target) - origin).round(),
            None => Delta::sanitized(options.dx, options.dy),
        };
        let props = options.event_props;

        let segment_start = match self.active {
            Some(mut active) if continuing => {
                let previous_end = active.end();
                active.distance += delta;
                self.active = Some(active);
                tracing::debug!(
                    element = %element,
                    dx = delta.dx,
                    dy = delta.dy,
                    "continuing drag"
                );
                previous_end
            }
            _ => {
                self.begin(doc, element, start, delta, options.click_to_drag, &props);
                start
            }
        };

        if delta.is_zero() {
            self.finish_drag(doc, element, after);
            return DragStatus::Completed;
        }

        let interpolation = options
            .interpolation
            .or(self.default_interpolation)
            .filter(Interpolation::is_configured);
        let Some(interpolation) = interpolation else {
            self.final_move(doc, element, segment_start + delta, &props);
            self.finish_drag(doc, element, after);
            return DragStatus::Completed;
        };

        let plan = InterpolationPlan::new(segment_start, delta, &interpolation);
        tracing::debug!(
            element = %element,
            distance = plan.distance(),
            steps = plan.step_count(),
            step_delay = ?plan.step_delay(),
            "interpolating drag"
        );

        match plan.step_delay() {
            None => {
                let jitter = interpolation.jitter;
                for step in 1..=plan.step_count() {
                    self.interpolation_step(doc, element, &plan, step, jitter, &props);
                }
                self.final_move(doc, element, plan.destination(), &props);
                self.finish_drag(doc, element, after);
                DragStatus::Completed
            }
            Some(delay) => {
                self.pending.push(PendingMoves {
                    element,
                    plan,
                    jitter: interpolation.jitter,
                    props,
                    step: 0,
                    timer: StepTimer::start(delay, self.clock.now()),
                    after,
                });
                DragStatus::Pending
            }
        }
    }

    fn begin(
        &mut self,
        doc: &mut dyn Document,
        element: ElementId,
        start: PagePoint,
        delta: Delta,
        click_to_drag: bool,
        props: &EventProps,
    ) {
        if let Some(previous) = self.active {
            tracing::debug!(
                previous = %previous.element,
                element = %element,
                "new drag supersedes active drag"
            );
            self.drop(doc, previous.element, DropOptions::default());
        }

        tracing::debug!(element = %element, x = start.x, y = start.y, "drag started");
        self.fire(doc, element, PointerEventKind::MouseDown, start, props);
        if click_to_drag {
            self.fire(doc, element, PointerEventKind::MouseUp, start, props);
            self.fire(doc, element, PointerEventKind::Click, start, props);
        }
        self.release_armed = true;
        self.active = Some(ActiveDrag {
            element,
            start,
            distance: delta,
        });
    }

    fn advance(
        &mut self,
        doc: &mut dyn Document,
        mut moves: PendingMoves,
        now: Instant,
    ) -> Advance {
        match moves.timer.poll(now) {
            TimerPoll::Wait(remaining) => Advance::Waiting(moves, remaining),
            TimerPoll::Due if moves.step < moves.plan.step_count() => {
                moves.step += 1;
                self.interpolation_step(
                    doc,
                    moves.element,
                    &moves.plan,
                    moves.step,
                    moves.jitter,
                    &moves.props,
                );
                moves.timer.rearm(now);
                let wait = moves.timer.deadline().saturating_duration_since(now);
                Advance::Waiting(moves, wait)
            }
            TimerPoll::Due => {
                let destination = moves.plan.destination();
                self.final_move(doc, moves.element, destination, &moves.props);
                self.finish_drag(doc, moves.element, moves.after);
                Advance::Done
            }
        }
    }

    fn interpolation_step(
        &mut self,
        doc: &mut dyn Document,
        element: ElementId,
        plan: &InterpolationPlan,
        step: u32,
        jitter: Jitter,
        props: &EventProps,
    ) {
        let point = self.shaker.perturb(plan.waypoint(step), jitter);
        tracing::trace!(element = %element, step, x = point.x, y = point.y, "interpolation step");
        self.move_to(doc, element, point, props);
    }

    /// Fire a `mousemove` at `point` on whatever is rendered there.
    fn move_to(
        &mut self,
        doc: &mut dyn Document,
        element: ElementId,
        point: PagePoint,
        props: &EventProps,
    ) {
        let target = self.hit_target(&*doc, point).unwrap_or(element);
        self.fire(doc, target, PointerEventKind::MouseMove, point, props);
    }

    /// Fire the move that lands a drag. Hit testing uses the rounded point
    /// the event reports, so the receiver always contains `pageX`/`pageY`.
    fn final_move(
        &mut self,
        doc: &mut dyn Document,
        element: ElementId,
        point: PagePoint,
        props: &EventProps,
    ) {
        self.move_to(doc, element, point.round(), props);
    }

    fn finish_drag(&mut self, doc: &mut dyn Document, element: ElementId, after: AfterDrag) {
        doc.notify(element, Notification::Drag);
        match after {
            AfterDrag::Callback(callback) => {
                if let Some(callback) = callback {
                    callback(element);
                }
            }
            AfterDrag::Drop { target, options } => {
                self.drop(doc, target, options);
            }
        }
    }

    fn hit_target(&mut self, doc: &dyn Document, point: PagePoint) -> Option<ElementId> {
        let client = page_to_client(point, doc);
        let hit = self.hit_tester.element_at(doc, client);
        if hit.is_none() {
            tracing::trace!(x = point.x, y = point.y, "hit test resolved nothing; falling back");
        }
        hit
    }

    fn fire(
        &self,
        doc: &mut dyn Document,
        target: ElementId,
        kind: PointerEventKind,
        point: PagePoint,
        props: &EventProps,
    ) {
        let (page_x, page_y) = point.to_event_coords();
        let (client_x, client_y) = page_to_client((f64::from(page_x), f64::from(page_y)), &*doc);
        let event = SimulatedEvent {
            kind,
            page_x,
            page_y,
            client_x: round_half_up(client_x) as i32,
            client_y: round_half_up(client_y) as i32,
            button: props.button.unwrap_or_default(),
            modifiers: props.modifiers,
            extra: props.extra.clone(),
        };
        tracing::trace!(
            target_element = %target,
            kind = kind.name(),
            page_x,
            page_y,
            "dispatch"
        );
        doc.dispatch(target, &event);
    }

    fn clear_active(&mut self) {
        self.active = None;
        self.release_armed = false;
    }
}

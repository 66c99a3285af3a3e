#![forbid(unsafe_code)]

//! Synthetic pointer events and completion notifications.
//!
//! The simulator never constructs host events itself. It describes each
//! event as a [`SimulatedEvent`] and hands it to
//! [`Document::dispatch`](crate::document::Document::dispatch), which builds
//! and fires the real thing.
//!
//! # Design Notes
//!
//! - Page coordinates are integers, rounded half-up from the simulated
//!   floating-point position.
//! - Client coordinates are derived from the page coordinates and the
//!   document's scroll offset at dispatch time.
//! - Caller-provided [`EventProps`] are merged into every event of a gesture.

use std::collections::BTreeMap;

use bitflags::bitflags;
use serde_json::Value;

use crate::document::ElementId;

/// The pointer events the simulator fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    MouseDown,
    MouseMove,
    MouseUp,
    Click,
}

impl PointerEventKind {
    /// DOM event type name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::MouseDown => "mousedown",
            Self::MouseMove => "mousemove",
            Self::MouseUp => "mouseup",
            Self::Click => "click",
        }
    }

    /// Whether the event may be cancelled by a handler.
    ///
    /// Every simulated mouse event bubbles; only `mousemove` is not
    /// cancelable.
    #[must_use]
    pub const fn cancelable(self) -> bool {
        !matches!(self, Self::MouseMove)
    }
}

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MouseButton {
    /// Left mouse button.
    #[default]
    Left,

    /// Middle mouse button (scroll wheel click).
    Middle,

    /// Right mouse button.
    Right,
}

impl MouseButton {
    /// The DOM `button` code.
    #[must_use]
    pub const fn code(self) -> u16 {
        match self {
            Self::Left => 0,
            Self::Middle => 1,
            Self::Right => 2,
        }
    }
}

bitflags! {
    /// Modifier keys reported as held during a simulated event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Meta/Command key.
        const META  = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

/// Extra properties merged into every event of a gesture.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EventProps {
    /// Button reported by the events (left when unset).
    pub button: Option<MouseButton>,
    /// Modifier keys reported as held.
    pub modifiers: Modifiers,
    /// Any other event fields, passed through untouched.
    pub extra: BTreeMap<String, Value>,
}

impl EventProps {
    /// Empty property set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Report `button` on every event.
    #[must_use]
    pub fn with_button(mut self, button: MouseButton) -> Self {
        self.button = Some(button);
        self
    }

    /// Report `modifiers` as held on every event.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Add a pass-through field.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// A fully resolved synthetic pointer event.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatedEvent {
    pub kind: PointerEventKind,
    pub page_x: i32,
    pub page_y: i32,
    pub client_x: i32,
    pub client_y: i32,
    pub button: MouseButton,
    pub modifiers: Modifiers,
    pub extra: BTreeMap<String, Value>,
}

impl SimulatedEvent {
    /// Page position as a tuple.
    #[must_use]
    pub const fn page(&self) -> (i32, i32) {
        (self.page_x, self.page_y)
    }

    /// Client position as a tuple.
    #[must_use]
    pub const fn client(&self) -> (i32, i32) {
        (self.client_x, self.client_y)
    }
}

/// Custom events announcing that a simulated gesture finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Notification {
    /// Fired on the dragged element after the last move of a drag.
    Drag,
    /// Fired on the resolved drop target after the `mouseup` of a drop.
    Drop,
}

impl Notification {
    /// Event type name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Drag => "simulate-drag",
            Self::Drop => "simulate-drop",
        }
    }
}

/// An event observed by the host and forwarded to the simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    /// A `mouseup` reached `target` (or its document) outside of the
    /// simulator's own drop.
    MouseUp { target: ElementId },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_names_match_dom_types() {
        assert_eq!(PointerEventKind::MouseDown.name(), "mousedown");
        assert_eq!(PointerEventKind::MouseMove.name(), "mousemove");
        assert_eq!(PointerEventKind::MouseUp.name(), "mouseup");
        assert_eq!(PointerEventKind::Click.name(), "click");
        assert_eq!(Notification::Drag.name(), "simulate-drag");
        assert_eq!(Notification::Drop.name(), "simulate-drop");
    }

    #[test]
    fn only_mousemove_is_not_cancelable() {
        assert!(!PointerEventKind::MouseMove.cancelable());
        assert!(PointerEventKind::MouseDown.cancelable());
        assert!(PointerEventKind::Click.cancelable());
    }

    #[test]
    fn button_codes() {
        assert_eq!(MouseButton::Left.code(), 0);
        assert_eq!(MouseButton::Middle.code(), 1);
        assert_eq!(MouseButton::Right.code(), 2);
    }

    #[test]
    fn props_builder_collects_fields() {
        let props = EventProps::new()
            .with_button(MouseButton::Right)
            .with_modifiers(Modifiers::CTRL | Modifiers::SHIFT)
            .with_field("detail", 2);
        assert_eq!(props.button, Some(MouseButton::Right));
        assert!(props.modifiers.contains(Modifiers::CTRL));
        assert_eq!(props.extra.get("detail"), Some(&Value::from(2)));
    }
}

// Forbid unsafe in production; deny in tests.
#![cfg_attr(not(test), forbid(unsafe_code))]
#![cfg_attr(test, deny(unsafe_code))]

//! Core: drag-and-drop gesture simulation over an abstract document.
//!
//! # Role in dragsim
//! `dragsim-core` turns a high-level request ("drag this element 100px to the
//! right in 3 steps, then drop it") into the exact sequence of synthetic
//! pointer events a browser would see, dispatched through a host-provided
//! [`Document`](document::Document).
//!
//! # Primary responsibilities
//! - **Coordinates**: page/viewport conversion and element centers.
//! - **Hit testing**: resolving the real target under each simulated
//!   position, including the viewport-vs-document coordinate quirk.
//! - **Interpolation**: step planning, optional pacing and positional jitter.
//! - **DragSimulator**: the drag / continue-drag / drop state machine with a
//!   single active-drag context per simulator.
//!
//! # How it fits in the system
//! The host owns the DOM and the event loop. It implements
//! [`Document`](document::Document), calls the simulator, and, for paced
//! drags, drives [`DragSimulator::poll`](simulator::DragSimulator::poll) from
//! a real timer or from `dragsim-harness`'s manual clock.

pub mod config;
pub mod coords;
pub mod document;
pub mod error;
pub mod event;
pub mod geometry;
pub mod interpolation;
pub mod jitter;
pub mod logging;
pub mod schedule;
pub mod simulate;
pub mod simulator;

#[cfg(test)]
pub(crate) mod test_support;

pub use document::{Document, ElementId};
pub use error::SimulateError;
pub use simulate::{SimulateKind, SimulateOptions};
pub use simulator::{
    ActiveDrag, DragAndDropOptions, DragOptions, DragSimulator, DragStatus, DropOptions,
};

#![forbid(unsafe_code)]

//! Errors of the string-dispatched operation surface.
//!
//! Simulation itself never fails: missing geometry falls back to the origin,
//! failed hit tests fall back to the dragged element. Only dispatching by
//! name can be wrong.

use std::fmt;

/// Errors from [`DragSimulator::simulate`](crate::DragSimulator::simulate).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulateError {
    /// The simulation type is not one of `drag`, `drop`, `drag-n-drop`.
    UnknownKind(String),
    /// The options do not belong to the requested simulation type.
    OptionsMismatch {
        kind: &'static str,
        options: &'static str,
    },
}

impl fmt::Display for SimulateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownKind(kind) => write!(f, "unknown simulation type: {kind:?}"),
            Self::OptionsMismatch { kind, options } => {
                write!(f, "{options} options cannot drive a {kind} simulation")
            }
        }
    }
}

impl std::error::Error for SimulateError {}

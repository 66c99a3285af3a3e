#![forbid(unsafe_code)]

//! Name-dispatched entry point.
//!
//! Hosts that receive simulation requests as data (`"drag"`, `"drop"`,
//! `"drag-n-drop"` plus options) go through
//! [`DragSimulator::simulate`] instead of calling the typed operations.
//! A request may name several elements; only the first is simulated.

use std::fmt;
use std::str::FromStr;

use crate::document::{Document, ElementId};
use crate::error::SimulateError;
use crate::simulator::{DragAndDropOptions, DragOptions, DragSimulator, DropOptions};

/// Simulation type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulateKind {
    Drag,
    Drop,
    DragAndDrop,
}

impl SimulateKind {
    /// The request name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Drag => "drag",
            Self::Drop => "drop",
            Self::DragAndDrop => "drag-n-drop",
        }
    }
}

impl fmt::Display for SimulateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SimulateKind {
    type Err = SimulateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "drag" => Ok(Self::Drag),
            "drop" => Ok(Self::Drop),
            "drag-n-drop" => Ok(Self::DragAndDrop),
            other => Err(SimulateError::UnknownKind(other.to_owned())),
        }
    }
}

/// Options for one of the simulation types.
#[derive(Debug)]
pub enum SimulateOptions {
    Drag(DragOptions),
    Drop(DropOptions),
    DragAndDrop(DragAndDropOptions),
}

impl SimulateOptions {
    /// Default options for `kind`.
    #[must_use]
    pub fn for_kind(kind: SimulateKind) -> Self {
        match kind {
            SimulateKind::Drag => Self::Drag(DragOptions::default()),
            SimulateKind::Drop => Self::Drop(DropOptions::default()),
            SimulateKind::DragAndDrop => Self::DragAndDrop(DragAndDropOptions::default()),
        }
    }

    /// The simulation type these options belong to.
    #[must_use]
    pub const fn kind(&self) -> SimulateKind {
        match self {
            Self::Drag(_) => SimulateKind::Drag,
            Self::Drop(_) => SimulateKind::Drop,
            Self::DragAndDrop(_) => SimulateKind::DragAndDrop,
        }
    }
}

impl From<DragOptions> for SimulateOptions {
    fn from(options: DragOptions) -> Self {
        Self::Drag(options)
    }
}

impl From<DropOptions> for SimulateOptions {
    fn from(options: DropOptions) -> Self {
        Self::Drop(options)
    }
}

impl From<DragAndDropOptions> for SimulateOptions {
    fn from(options: DragAndDropOptions) -> Self {
        Self::DragAndDrop(options)
    }
}

impl DragSimulator {
    /// Run a `kind` simulation on the first of `targets`.
    ///
    /// Returns the simulated element, or `None` when `targets` is empty.
    ///
    /// # Errors
    ///
    /// [`SimulateError::OptionsMismatch`] when `options` belong to another
    /// simulation type.
    pub fn simulate(
        &mut self,
        doc: &mut dyn Document,
        targets: &[ElementId],
        kind: SimulateKind,
        options: SimulateOptions,
    ) -> Result<Option<ElementId>, SimulateError> {
        if options.kind() != kind {
            return Err(SimulateError::OptionsMismatch {
                kind: kind.name(),
                options: options.kind().name(),
            });
        }
        let Some(&element) = targets.first() else {
            return Ok(None);
        };
        if targets.len() > 1 {
            tracing::trace!(
                kind = kind.name(),
                ignored = targets.len() - 1,
                "only the first target is simulated"
            );
        }

        match options {
            SimulateOptions::Drag(options) => {
                self.drag(doc, element, options);
            }
            SimulateOptions::Drop(options) => {
                self.drop(doc, element, options);
            }
            SimulateOptions::DragAndDrop(options) => {
                self.drag_and_drop(doc, element, options);
            }
        }
        Ok(Some(element))
    }

    /// [`simulate`](Self::simulate) with the type given by name.
    ///
    /// # Errors
    ///
    /// [`SimulateError::UnknownKind`] for an unrecognized name, otherwise as
    /// [`simulate`](Self::simulate).
    pub fn simulate_named(
        &mut self,
        doc: &mut dyn Document,
        targets: &[ElementId],
        kind: &str,
        options: SimulateOptions,
    ) -> Result<Option<ElementId>, SimulateError> {
        let kind = kind.parse()?;
        self.simulate(doc, targets, kind, options)
    }
}

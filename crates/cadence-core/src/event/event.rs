// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::rc::Rc;

/// Identifies a category of [`GameEvent`]. Listeners register per kind.
///
/// The set of kinds is closed at build time; the tag is derived from the
/// event payload, never stored separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A player input action started or stopped.
    Input,
    /// The platform asked the application to shut down.
    Shutdown,
}

/// A logical player action synthesized from raw key transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Move up.
    MoveUp,
    /// Move down.
    MoveDown,
    /// Move left.
    MoveLeft,
    /// Move right.
    MoveRight,
    /// Fire (momentary: one event per press, none on release).
    Fire,
}

impl InputAction {
    /// Number of tracked actions, used to size per-action key state.
    pub(crate) const COUNT: usize = 5;

    #[inline]
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// Whether an input action just began or just ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionPhase {
    /// The action began (key edge down).
    Start,
    /// The action ended (key edge up).
    Stop,
}

/// An immutable application event: a tagged payload, read-only after
/// construction.
///
/// Events are passed around as [`SharedEvent`] because one instance may be
/// referenced by a queue entry and, transiently, by every listener invoked
/// for it; it is dropped when the last holder lets go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// An input action changed phase.
    Input {
        /// The logical action.
        action: InputAction,
        /// Whether the action started or stopped.
        phase: ActionPhase,
    },
    /// Shutdown was requested by the platform.
    Shutdown,
}

/// Shared, reference-counted handle to an immutable [`GameEvent`].
///
/// `Rc`, not `Arc`: the dispatch engine is single-threaded cooperative.
pub type SharedEvent = Rc<GameEvent>;

impl GameEvent {
    /// Builds an input event for `action` in `phase`.
    pub fn input(action: InputAction, phase: ActionPhase) -> Self {
        GameEvent::Input { action, phase }
    }

    /// Returns the kind tag matching this event's payload variant.
    pub fn kind(&self) -> EventKind {
        match self {
            GameEvent::Input { .. } => EventKind::Input,
            GameEvent::Shutdown => EventKind::Shutdown,
        }
    }

    /// Short human-readable name, for log lines.
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::Input { .. } => "Input",
            GameEvent::Shutdown => "Shutdown",
        }
    }

    /// Wraps the event in a [`SharedEvent`] for queueing.
    pub fn shared(self) -> SharedEvent {
        Rc::new(self)
    }
}

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

//! # Cadence Core
//!
//! Time-budgeted, double-buffered event dispatch for a real-time game loop.
//!
//! The core collects raw input records from a backend-agnostic channel,
//! normalizes them into discrete game events, queues them, and drains the
//! queue once per tick under a strict millisecond budget. Events that do not
//! fit in the budget are carried over to the next tick, never dropped.
//!
//! The whole engine is single-threaded and cooperative: listeners run
//! synchronously on the draining thread and may re-enter the system (queue
//! new events, register or remove listeners) through an [`EventHandle`].

#![warn(missing_docs)]

pub mod event;
pub mod input;
pub mod time;

pub use event::{
    ActionPhase, CallbackId, EventHandle, EventKind, EventSystem, GameEvent, InputAction,
    SharedEvent, TickReport,
};
pub use input::{raw_input_channel, InputTranslator, RawInput, RawKey};
pub use time::Stopwatch;

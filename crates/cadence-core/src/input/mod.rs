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

//! Backend-agnostic raw input records and their translation into game
//! events.
//!
//! A windowing backend (see the `cadence-infra` crate) publishes [`RawInput`]
//! records over a channel; the [`InputTranslator`] polls that channel once
//! per tick, detects press/release edges per tracked key, and queues the
//! corresponding higher-level events.

mod translator;

pub use self::translator::{InputTranslator, KeyState};

/// A physical key identifier, decoupled from any windowing backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawKey {
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Space bar.
    Space,
    /// Any other key, carrying the backend's numeric code.
    Other(u32),
}

/// One raw input record as delivered by the windowing backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawInput {
    /// A key transitioned to pressed. Backends may repeat this while the key
    /// is held; the translator suppresses the duplicates.
    KeyPressed(RawKey),
    /// A key transitioned to released.
    KeyReleased(RawKey),
    /// The platform asked the application to close.
    CloseRequested,
}

/// Creates the unbounded channel raw input records travel over.
///
/// The sender side belongs to the windowing backend; the receiver side is
/// handed to [`EventSystem::new`](crate::EventSystem::new). Polling is
/// non-blocking (`try_recv`), so an idle channel costs nothing per tick.
pub fn raw_input_channel() -> (flume::Sender<RawInput>, flume::Receiver<RawInput>) {
    flume::unbounded()
}

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

//! Event types, listener registry, dispatch queues and the tick scheduler.
//!
//! Events flow through the system in two ways:
//!
//! - [`EventHandle::queue_event`] appends to the active queue; the event is
//!   dispatched during a later [`EventSystem::run_tick`] drain pass.
//! - [`EventHandle::trigger_event`] dispatches immediately and synchronously,
//!   bypassing the queues, for events that must be handled before returning.
//!
//! Two queues are kept so that listeners can safely queue new events while a
//! drain pass is in progress: mid-drain events land in the other (active)
//! queue and are only seen by the next tick.

mod event;
pub mod registry;

pub(crate) mod queue;
mod system;

pub use self::event::{ActionPhase, EventKind, GameEvent, InputAction, SharedEvent};
pub use self::registry::{CallbackId, CallbackIdAllocator, EventCallback, ListenerRegistry};
pub use self::system::{EventHandle, EventSystem, TickReport};

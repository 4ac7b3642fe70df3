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

//! Ordered listener registration, keyed by event kind.

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

use super::event::{EventKind, SharedEvent};

/// A listener callback. Receives the event by shared reference; it may
/// re-enter the event system through a captured [`EventHandle`], but it must
/// never assume it can mutate the event itself.
///
/// [`EventHandle`]: super::EventHandle
pub type EventCallback = dyn Fn(&SharedEvent);

/// Uniquely names one registered listener within one event kind's set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallbackId(u64);

impl CallbackId {
    /// Returns the raw numeric identity, for log lines.
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Allocates [`CallbackId`]s from a monotonically increasing counter.
///
/// Owned by the [`EventSystem`](super::EventSystem) rather than hidden in a
/// global so identities are never shared across independent systems and the
/// registry stays testable in isolation. Identities never repeat within a
/// run; the first issued id is 1.
#[derive(Debug, Default)]
pub struct CallbackIdAllocator {
    current: Cell<u64>,
}

impl CallbackIdAllocator {
    /// Creates a fresh allocator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues the next identity.
    pub fn next_id(&self) -> CallbackId {
        let id = self.current.get() + 1;
        self.current.set(id);
        CallbackId(id)
    }
}

/// Maps each event kind to its ordered list of registered callbacks.
///
/// Registration order within one kind determines invocation order, so the
/// per-kind collection is a `Vec`, not a map.
#[derive(Default)]
pub struct ListenerRegistry {
    listeners: HashMap<EventKind, Vec<(CallbackId, Rc<EventCallback>)>>,
}

impl ListenerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callback` under `(kind, id)`, appending to the kind's
    /// invocation order.
    ///
    /// Returns `false` without mutating anything if `id` is already
    /// registered for `kind`. Duplicate registration is reported, not fatal.
    pub fn insert(&mut self, kind: EventKind, id: CallbackId, callback: Rc<EventCallback>) -> bool {
        let entries = self.listeners.entry(kind).or_default();
        if entries.iter().any(|(existing, _)| *existing == id) {
            log::warn!(
                "attempt to double register callback {:#010x} (event kind {kind:?})",
                id.raw()
            );
            return false;
        }
        entries.push((id, callback));
        log::trace!("added callback {:#010x} (event kind {kind:?})", id.raw());
        true
    }

    /// Removes the `(kind, id)` entry if present, returning whether a
    /// removal occurred. An unknown kind or id is reported, not fatal.
    pub fn remove(&mut self, kind: EventKind, id: CallbackId) -> bool {
        let Some(entries) = self.listeners.get_mut(&kind) else {
            log::warn!(
                "tried to remove callback {:#010x} (event kind {kind:?}), no listeners for kind",
                id.raw()
            );
            return false;
        };
        match entries.iter().position(|(existing, _)| *existing == id) {
            Some(pos) => {
                entries.remove(pos);
                log::trace!("removed callback {:#010x} (event kind {kind:?})", id.raw());
                true
            }
            None => {
                log::warn!(
                    "tried to remove callback {:#010x} (event kind {kind:?}), not found",
                    id.raw()
                );
                false
            }
        }
    }

    /// Returns a snapshot of `kind`'s callbacks in registration order.
    ///
    /// Dispatch iterates the snapshot with no registry borrow held, so a
    /// callback may register or unregister listeners mid-dispatch without
    /// invalidating the iteration. Mutations become visible on the next
    /// snapshot.
    pub fn snapshot(&self, kind: EventKind) -> Vec<Rc<EventCallback>> {
        self.listeners
            .get(&kind)
            .map(|entries| entries.iter().map(|(_, cb)| Rc::clone(cb)).collect())
            .unwrap_or_default()
    }

    /// Number of callbacks currently registered for `kind`.
    pub fn len(&self, kind: EventKind) -> usize {
        self.listeners.get(&kind).map_or(0, Vec::len)
    }

    /// True if no callback is registered for `kind`.
    pub fn is_empty(&self, kind: EventKind) -> bool {
        self.len(kind) == 0
    }
}

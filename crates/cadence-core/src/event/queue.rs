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

//! Double-buffered FIFO event queues.

use std::collections::VecDeque;
use std::mem;

use super::event::{EventKind, SharedEvent};

/// Two FIFO queues with a single active-queue selector.
///
/// Exactly one queue accepts writes at any instant. The scheduler flips the
/// roles once per tick via [`QueuePair::begin_drain`]: the previously active
/// queue is handed over for draining, while the other queue starts receiving
/// events generated mid-drain.
pub(crate) struct QueuePair {
    queues: [VecDeque<SharedEvent>; 2],
    active: usize,
}

impl QueuePair {
    pub(crate) fn new() -> Self {
        Self {
            queues: [VecDeque::new(), VecDeque::new()],
            active: 0,
        }
    }

    /// Appends an event to the active queue. Bounded only by memory.
    pub(crate) fn push(&mut self, event: SharedEvent) {
        log::trace!("queued event {} ({:?})", event.name(), event.kind());
        self.queues[self.active].push_back(event);
    }

    /// Removes the first not-yet-drained event of `kind` from the active
    /// queue. Events already handed to the current drain pass are out of
    /// reach.
    pub(crate) fn abort_first(&mut self, kind: EventKind) -> bool {
        let queue = &mut self.queues[self.active];
        match queue.iter().position(|evt| evt.kind() == kind) {
            Some(pos) => {
                let _ = queue.remove(pos);
                log::trace!("aborted one event of kind {kind:?}");
                true
            }
            None => {
                log::trace!("tried to abort event of kind {kind:?}, none queued");
                false
            }
        }
    }

    /// Removes every active-queue event of `kind`, returning the exact
    /// number erased.
    pub(crate) fn abort_all(&mut self, kind: EventKind) -> usize {
        let queue = &mut self.queues[self.active];
        let before = queue.len();
        queue.retain(|evt| evt.kind() != kind);
        let removed = before - queue.len();
        log::trace!("aborted {removed} events of kind {kind:?}");
        removed
    }

    /// Flips the queue roles and hands back the previously active queue for
    /// draining. Called exactly once per tick, after input polling.
    ///
    /// The drained contents are moved out so the scheduler can pop events
    /// while listeners push to the (now) active queue.
    pub(crate) fn begin_drain(&mut self) -> VecDeque<SharedEvent> {
        let drained = mem::take(&mut self.queues[self.active]);
        self.active = (self.active + 1) & 1;
        drained
    }

    /// Relocates the undrained remainder of an over-budget pass to the front
    /// of the active queue, preserving relative order, so carried-over
    /// events run before anything queued during the interrupted tick.
    pub(crate) fn carry_over(&mut self, remaining: VecDeque<SharedEvent>) {
        let queue = &mut self.queues[self.active];
        for event in remaining.into_iter().rev() {
            queue.push_front(event);
        }
    }

    /// Number of events waiting in the active queue.
    pub(crate) fn active_len(&self) -> usize {
        self.queues[self.active].len()
    }
}

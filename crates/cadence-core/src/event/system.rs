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

//! The tick scheduler: budget-aware queue draining with carry-over.

use std::cell::RefCell;
use std::rc::Rc;

use crate::input::{InputTranslator, RawInput};
use crate::time::Stopwatch;

use super::event::{EventKind, SharedEvent};
use super::queue::QueuePair;
use super::registry::{CallbackId, CallbackIdAllocator, ListenerRegistry};

/// Observability record for one [`EventSystem::run_tick`] pass.
#[derive(Debug, Clone, Copy)]
pub struct TickReport {
    /// Events dispatched this tick.
    pub processed: usize,
    /// Events relocated to the next tick because the budget ran out.
    pub carried_over: usize,
    /// Raw input records consumed while polling.
    pub raw_records: usize,
    /// Wall-clock drain time in milliseconds.
    pub elapsed_ms: f32,
}

/// Cloneable handle to the event system's registry, queues and id allocator.
///
/// Listeners capture one of these so they can queue events or mutate the
/// listener registry while a drain pass is in progress. All interior
/// borrows are short-lived: no borrow is held across a listener invocation,
/// which is what makes the re-entrancy safe.
#[derive(Clone)]
pub struct EventHandle {
    listeners: Rc<RefCell<ListenerRegistry>>,
    queues: Rc<RefCell<QueuePair>>,
    ids: Rc<CallbackIdAllocator>,
}

impl EventHandle {
    fn new() -> Self {
        Self {
            listeners: Rc::new(RefCell::new(ListenerRegistry::new())),
            queues: Rc::new(RefCell::new(QueuePair::new())),
            ids: Rc::new(CallbackIdAllocator::new()),
        }
    }

    /// Issues a fresh callback identity. Identities are process-unique
    /// within this system and never reused.
    pub fn next_callback_id(&self) -> CallbackId {
        self.ids.next_id()
    }

    /// Registers `callback` under `(kind, id)`.
    ///
    /// Returns `false` (reported, no mutation) if `id` is already registered
    /// for `kind`.
    pub fn add_listener<F>(&self, kind: EventKind, id: CallbackId, callback: F) -> bool
    where
        F: Fn(&SharedEvent) + 'static,
    {
        self.listeners.borrow_mut().insert(kind, id, Rc::new(callback))
    }

    /// Removes the listener registered under `(kind, id)`, returning whether
    /// a removal occurred.
    pub fn remove_listener(&self, kind: EventKind, id: CallbackId) -> bool {
        self.listeners.borrow_mut().remove(kind, id)
    }

    /// Appends `event` to the active queue for dispatch on a later tick.
    ///
    /// Called from inside a listener, the event lands in the non-drain queue
    /// and is invisible to the in-progress pass.
    pub fn queue_event(&self, event: SharedEvent) {
        self.queues.borrow_mut().push(event);
    }

    /// Dispatches `event` immediately and synchronously, bypassing the
    /// queues. Every listener registered for the event's kind runs, in
    /// registration order, before this returns.
    pub fn trigger_event(&self, event: &SharedEvent) {
        log::trace!("triggering event {} ({:?})", event.name(), event.kind());
        // Snapshot first, then invoke with no registry borrow held, so
        // listeners can register/unregister listeners mid-dispatch.
        let snapshot = self.listeners.borrow().snapshot(event.kind());
        for callback in snapshot {
            callback(event);
        }
    }

    /// Removes the first queued (not yet drained) event of `kind` from the
    /// active queue, returning whether one was removed.
    pub fn abort_event(&self, kind: EventKind) -> bool {
        self.queues.borrow_mut().abort_first(kind)
    }

    /// Removes all queued events of `kind` from the active queue, returning
    /// the exact count removed.
    pub fn abort_all_events(&self, kind: EventKind) -> usize {
        self.queues.borrow_mut().abort_all(kind)
    }
}

/// The event dispatch engine driven once per frame by the application loop.
///
/// Owns both queues, the active-queue selector, the listener registry, the
/// input translator and the drain stopwatch. Everything runs on the calling
/// thread; there is no parallelism and no locking.
pub struct EventSystem {
    handle: EventHandle,
    translator: InputTranslator,
    watch: Stopwatch,
}

impl EventSystem {
    /// Creates an event system polling `raw_input` for backend records.
    pub fn new(raw_input: flume::Receiver<RawInput>) -> Self {
        log::info!("event system initialized");
        Self {
            handle: EventHandle::new(),
            translator: InputTranslator::new(raw_input),
            watch: Stopwatch::new(),
        }
    }

    /// Returns a cloneable handle for listeners and external collaborators.
    pub fn handle(&self) -> EventHandle {
        self.handle.clone()
    }

    /// See [`EventHandle::next_callback_id`].
    pub fn next_callback_id(&self) -> CallbackId {
        self.handle.next_callback_id()
    }

    /// See [`EventHandle::add_listener`].
    pub fn add_listener<F>(&self, kind: EventKind, id: CallbackId, callback: F) -> bool
    where
        F: Fn(&SharedEvent) + 'static,
    {
        self.handle.add_listener(kind, id, callback)
    }

    /// See [`EventHandle::remove_listener`].
    pub fn remove_listener(&self, kind: EventKind, id: CallbackId) -> bool {
        self.handle.remove_listener(kind, id)
    }

    /// See [`EventHandle::queue_event`].
    pub fn queue_event(&self, event: SharedEvent) {
        self.handle.queue_event(event);
    }

    /// See [`EventHandle::trigger_event`].
    pub fn trigger_event(&self, event: &SharedEvent) {
        self.handle.trigger_event(event);
    }

    /// See [`EventHandle::abort_event`].
    pub fn abort_event(&self, kind: EventKind) -> bool {
        self.handle.abort_event(kind)
    }

    /// See [`EventHandle::abort_all_events`].
    pub fn abort_all_events(&self, kind: EventKind) -> usize {
        self.handle.abort_all_events(kind)
    }

    /// Runs one full poll + drain cycle against `budget_ms` of wall-clock
    /// time.
    ///
    /// The pass polls raw input, flips the queue roles, then pops and
    /// dispatches events until the drain queue is empty or the budget is
    /// exceeded. The budget check happens after each dispatch, never before
    /// the first, so a tick always makes progress by at least one event even
    /// with no time left; the cost is overshooting the budget by at most one
    /// event's processing time. On overrun the undrained remainder moves, in
    /// order, to the front of the next tick's queue.
    pub fn run_tick(&mut self, budget_ms: f32) -> TickReport {
        debug_assert!(budget_ms >= 0.0, "tick budget must be non-negative");
        log::trace!("starting event tick, time budget {budget_ms:.2}ms");

        let raw_records = self.translator.poll(&self.handle);

        // Flip so events generated by listeners land in the other queue.
        let mut drain = self.handle.queues.borrow_mut().begin_drain();

        self.watch.restart();
        let mut processed = 0;
        let mut carried_over = 0;
        while let Some(event) = drain.pop_front() {
            self.handle.trigger_event(&event);
            processed += 1;

            if self.watch.elapsed_ms_f32() > budget_ms && !drain.is_empty() {
                carried_over = drain.len();
                log::warn!(
                    "event draining stopped after {:.2}ms, carrying {carried_over} events to next tick",
                    self.watch.elapsed_ms_f32()
                );
                self.handle
                    .queues
                    .borrow_mut()
                    .carry_over(std::mem::take(&mut drain));
                break;
            }
        }

        let elapsed_ms = self.watch.elapsed_ms_f32();
        log::trace!("processed {processed} events in {elapsed_ms:.2}ms");
        TickReport {
            processed,
            carried_over,
            raw_records,
            elapsed_ms,
        }
    }

    /// Number of events waiting in the active queue. Observability only.
    pub fn pending_events(&self) -> usize {
        self.handle.queues.borrow().active_len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{ActionPhase, GameEvent, InputAction};
    use crate::input::raw_input_channel;
    use std::cell::RefCell;

    fn system() -> EventSystem {
        let (_tx, rx) = raw_input_channel();
        EventSystem::new(rx)
    }

    fn input_event(action: InputAction) -> SharedEvent {
        GameEvent::input(action, ActionPhase::Start).shared()
    }

    /// trigger_event must invoke listeners synchronously and in
    /// registration order.
    #[test]
    fn trigger_invokes_in_registration_order() {
        let system = system();
        let order: Rc<RefCell<Vec<&'static str>>> = Rc::new(RefCell::new(Vec::new()));

        let first = Rc::clone(&order);
        system.add_listener(EventKind::Input, system.next_callback_id(), move |_evt| {
            first.borrow_mut().push("L1");
        });
        let second = Rc::clone(&order);
        system.add_listener(EventKind::Input, system.next_callback_id(), move |_evt| {
            second.borrow_mut().push("L2");
        });

        system.trigger_event(&input_event(InputAction::Fire));
        assert_eq!(*order.borrow(), vec!["L1", "L2"]);
    }

    /// A listener that queues a new event mid-drain must not extend the
    /// current pass; the event runs on the next tick.
    #[test]
    fn events_queued_mid_drain_wait_for_next_tick() {
        let mut system = system();
        let handle = system.handle();
        let hits = Rc::new(RefCell::new(0u32));

        let counter = Rc::clone(&hits);
        system.add_listener(EventKind::Input, system.next_callback_id(), move |_evt| {
            *counter.borrow_mut() += 1;
            // Re-queue: without double buffering this would drain forever.
            handle.queue_event(GameEvent::input(InputAction::Fire, ActionPhase::Start).shared());
        });

        system.queue_event(input_event(InputAction::Fire));

        let report = system.run_tick(1000.0);
        assert_eq!(report.processed, 1);
        assert_eq!(*hits.borrow(), 1);
        assert_eq!(system.pending_events(), 1);

        let report = system.run_tick(1000.0);
        assert_eq!(report.processed, 1);
        assert_eq!(*hits.borrow(), 2);
    }

    /// Listeners may register and remove listeners during dispatch without
    /// corrupting the pass.
    #[test]
    fn listeners_can_mutate_registry_mid_dispatch() {
        let system = system();
        let handle = system.handle();
        let self_id = system.next_callback_id();
        let hits = Rc::new(RefCell::new(0u32));

        let counter = Rc::clone(&hits);
        let mutator = handle.clone();
        system.add_listener(EventKind::Input, self_id, move |_evt| {
            *counter.borrow_mut() += 1;
            // Unregister ourselves and add a listener for another kind.
            mutator.remove_listener(EventKind::Input, self_id);
            mutator.add_listener(EventKind::Shutdown, mutator.next_callback_id(), |_evt| {});
        });

        system.trigger_event(&input_event(InputAction::MoveUp));
        assert_eq!(*hits.borrow(), 1);

        // The self-removal took effect for subsequent dispatches.
        system.trigger_event(&input_event(InputAction::MoveUp));
        assert_eq!(*hits.borrow(), 1);
    }

    #[test]
    fn run_tick_reports_processed_and_empty_queue() {
        let mut system = system();
        let hits = Rc::new(RefCell::new(0u32));

        let counter = Rc::clone(&hits);
        system.add_listener(EventKind::Input, system.next_callback_id(), move |_evt| {
            *counter.borrow_mut() += 1;
        });

        for _ in 0..5 {
            system.queue_event(input_event(InputAction::MoveRight));
        }

        let report = system.run_tick(1000.0);
        assert_eq!(report.processed, 5);
        assert_eq!(report.carried_over, 0);
        assert_eq!(*hits.borrow(), 5);
        assert_eq!(system.pending_events(), 0);
    }
}

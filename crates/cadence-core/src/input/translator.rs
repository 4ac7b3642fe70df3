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

use crate::event::{ActionPhase, EventHandle, GameEvent, InputAction};

use super::{RawInput, RawKey};

/// How a bound action reacts to key edges.
#[derive(Debug, Clone, Copy)]
enum Binding {
    /// Start event on the press edge, Stop event on the release edge.
    Held(InputAction),
    /// Single event on the press edge, nothing on release.
    Momentary(InputAction),
}

/// Maps a raw key to its logical action. Unbound keys produce no event.
fn binding(key: RawKey) -> Option<Binding> {
    match key {
        RawKey::Up => Some(Binding::Held(InputAction::MoveUp)),
        RawKey::Down => Some(Binding::Held(InputAction::MoveDown)),
        RawKey::Left => Some(Binding::Held(InputAction::MoveLeft)),
        RawKey::Right => Some(Binding::Held(InputAction::MoveRight)),
        RawKey::Space => Some(Binding::Momentary(InputAction::Fire)),
        RawKey::Other(_) => None,
    }
}

/// Per-action pressed/released state, persisted across ticks.
///
/// Owned by the translator instance (not hidden in a static) and used only
/// to detect edges: it suppresses the duplicate Start/Stop synthesis that
/// backend key-repeat records would otherwise cause.
#[derive(Debug, Default)]
pub struct KeyState {
    down: [bool; InputAction::COUNT],
}

impl KeyState {
    /// Records a press. Returns `true` only on the up-to-down edge.
    fn press(&mut self, action: InputAction) -> bool {
        let slot = &mut self.down[action.index()];
        let edge = !*slot;
        *slot = true;
        edge
    }

    /// Records a release. Returns `true` only on the down-to-up edge.
    fn release(&mut self, action: InputAction) -> bool {
        let slot = &mut self.down[action.index()];
        let edge = *slot;
        *slot = false;
        edge
    }
}

/// Polls the raw input channel and synthesizes game events from key edges.
///
/// A pure edge detector: exactly one Start per physical press and one Stop
/// per physical release for held actions, exactly one event per press for
/// momentary actions, and nothing at all for repeats or unbound keys.
pub struct InputTranslator {
    raw: flume::Receiver<RawInput>,
    keys: KeyState,
}

impl InputTranslator {
    /// Creates a translator polling `raw` with all keys initially up.
    pub fn new(raw: flume::Receiver<RawInput>) -> Self {
        Self {
            raw,
            keys: KeyState::default(),
        }
    }

    /// Drains every pending raw record, queueing synthesized events through
    /// `handle`. Returns the number of raw records consumed.
    pub fn poll(&mut self, handle: &EventHandle) -> usize {
        let mut count = 0;
        while let Ok(record) = self.raw.try_recv() {
            count += 1;
            match record {
                RawInput::KeyPressed(key) => self.on_press(key, handle),
                RawInput::KeyReleased(key) => self.on_release(key, handle),
                RawInput::CloseRequested => {
                    log::info!("close requested by platform");
                    handle.queue_event(GameEvent::Shutdown.shared());
                }
            }
        }
        if count > 0 {
            log::trace!("translated {count} raw input records");
        }
        count
    }

    fn on_press(&mut self, key: RawKey, handle: &EventHandle) {
        match binding(key) {
            // Held and momentary actions both announce the press edge.
            Some(Binding::Held(action)) | Some(Binding::Momentary(action)) => {
                if self.keys.press(action) {
                    handle.queue_event(GameEvent::input(action, ActionPhase::Start).shared());
                }
            }
            None => log::trace!("ignoring unbound key {key:?}"),
        }
    }

    fn on_release(&mut self, key: RawKey, handle: &EventHandle) {
        match binding(key) {
            Some(Binding::Held(action)) => {
                if self.keys.release(action) {
                    handle.queue_event(GameEvent::input(action, ActionPhase::Stop).shared());
                }
            }
            Some(Binding::Momentary(action)) => {
                // State flips so the next press is an edge again, but a
                // momentary action emits nothing on release.
                self.keys.release(action);
            }
            None => log::trace!("ignoring unbound key {key:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{EventKind, EventSystem, SharedEvent};
    use crate::input::raw_input_channel;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Collects every input event dispatched during ticks.
    fn record_inputs(system: &EventSystem) -> Rc<RefCell<Vec<(InputAction, ActionPhase)>>> {
        let seen: Rc<RefCell<Vec<(InputAction, ActionPhase)>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        system.add_listener(
            EventKind::Input,
            system.next_callback_id(),
            move |evt: &SharedEvent| {
                if let GameEvent::Input { action, phase } = **evt {
                    sink.borrow_mut().push((action, phase));
                }
            },
        );
        seen
    }

    /// A press-hold-release sequence with key-repeat records must produce
    /// exactly one Start and one Stop.
    #[test]
    fn repeated_press_records_produce_single_edge_pair() {
        let (tx, rx) = raw_input_channel();
        let mut system = EventSystem::new(rx);
        let seen = record_inputs(&system);

        tx.send(RawInput::KeyPressed(RawKey::Up)).unwrap();
        tx.send(RawInput::KeyPressed(RawKey::Up)).unwrap();
        tx.send(RawInput::KeyPressed(RawKey::Up)).unwrap();
        tx.send(RawInput::KeyReleased(RawKey::Up)).unwrap();
        tx.send(RawInput::KeyReleased(RawKey::Up)).unwrap();

        let report = system.run_tick(1000.0);
        assert_eq!(report.raw_records, 5);
        assert_eq!(
            *seen.borrow(),
            vec![
                (InputAction::MoveUp, ActionPhase::Start),
                (InputAction::MoveUp, ActionPhase::Stop),
            ]
        );
    }

    /// Key state persists across ticks: a press in one tick and a release
    /// several ticks later still form one edge pair.
    #[test]
    fn key_state_persists_across_ticks() {
        let (tx, rx) = raw_input_channel();
        let mut system = EventSystem::new(rx);
        let seen = record_inputs(&system);

        tx.send(RawInput::KeyPressed(RawKey::Left)).unwrap();
        system.run_tick(1000.0);
        system.run_tick(1000.0);

        tx.send(RawInput::KeyPressed(RawKey::Left)).unwrap();
        tx.send(RawInput::KeyReleased(RawKey::Left)).unwrap();
        system.run_tick(1000.0);

        assert_eq!(
            *seen.borrow(),
            vec![
                (InputAction::MoveLeft, ActionPhase::Start),
                (InputAction::MoveLeft, ActionPhase::Stop),
            ]
        );
    }

    /// Momentary actions fire once per press and never emit a Stop.
    #[test]
    fn momentary_action_fires_only_on_press_edge() {
        let (tx, rx) = raw_input_channel();
        let mut system = EventSystem::new(rx);
        let seen = record_inputs(&system);

        tx.send(RawInput::KeyPressed(RawKey::Space)).unwrap();
        tx.send(RawInput::KeyPressed(RawKey::Space)).unwrap();
        tx.send(RawInput::KeyReleased(RawKey::Space)).unwrap();
        tx.send(RawInput::KeyPressed(RawKey::Space)).unwrap();

        system.run_tick(1000.0);
        assert_eq!(
            *seen.borrow(),
            vec![
                (InputAction::Fire, ActionPhase::Start),
                (InputAction::Fire, ActionPhase::Start),
            ]
        );
    }

    /// A release with no preceding press is not an edge.
    #[test]
    fn stray_release_is_suppressed() {
        let (tx, rx) = raw_input_channel();
        let mut system = EventSystem::new(rx);
        let seen = record_inputs(&system);

        tx.send(RawInput::KeyReleased(RawKey::Right)).unwrap();
        system.run_tick(1000.0);
        assert!(seen.borrow().is_empty());
    }

    /// Unbound keys are silently ignored, no event synthesized.
    #[test]
    fn unbound_keys_are_ignored() {
        let (tx, rx) = raw_input_channel();
        let mut system = EventSystem::new(rx);
        let seen = record_inputs(&system);

        tx.send(RawInput::KeyPressed(RawKey::Other(42))).unwrap();
        tx.send(RawInput::KeyReleased(RawKey::Other(42))).unwrap();

        let report = system.run_tick(1000.0);
        assert_eq!(report.raw_records, 2);
        assert_eq!(report.processed, 0);
        assert!(seen.borrow().is_empty());
    }

    /// A close request from the platform becomes a Shutdown event.
    #[test]
    fn close_request_queues_shutdown_event() {
        let (tx, rx) = raw_input_channel();
        let mut system = EventSystem::new(rx);
        let shutdowns = Rc::new(RefCell::new(0u32));

        let counter = Rc::clone(&shutdowns);
        system.add_listener(
            EventKind::Shutdown,
            system.next_callback_id(),
            move |_evt| {
                *counter.borrow_mut() += 1;
            },
        );

        tx.send(RawInput::CloseRequested).unwrap();
        system.run_tick(1000.0);
        assert_eq!(*shutdowns.borrow(), 1);
    }
}

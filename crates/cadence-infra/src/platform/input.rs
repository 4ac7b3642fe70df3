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

//! Translation from `winit` window events to the core's raw input records.
//!
//! This module is an adapter layer: it keeps `cadence-core` decoupled from
//! the specific event format of the `winit` crate. Only the transitions the
//! event core cares about (tracked key presses/releases and the close
//! request) produce a record; everything else is filtered out here.

use cadence_core::{RawInput, RawKey};
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Maps a `winit` key code to the engine's tracked [`RawKey`] set.
///
/// Keys outside the tracked set return `None` and never reach the event
/// core.
pub fn map_keycode(keycode: KeyCode) -> Option<RawKey> {
    match keycode {
        KeyCode::ArrowUp => Some(RawKey::Up),
        KeyCode::ArrowDown => Some(RawKey::Down),
        KeyCode::ArrowLeft => Some(RawKey::Left),
        KeyCode::ArrowRight => Some(RawKey::Right),
        KeyCode::Space => Some(RawKey::Space),
        _ => None,
    }
}

/// Translates a `winit::event::WindowEvent` into a [`RawInput`] record.
///
/// Returns `Some` for tracked key transitions and the close request, `None`
/// for anything else (resize, focus, cursor movement, untracked keys).
/// Backend key-repeat notifications are dropped here; the core's edge
/// detector suppresses any that a backend delivers anyway.
pub fn translate_window_event(event: &WindowEvent) -> Option<RawInput> {
    match event {
        WindowEvent::KeyboardInput {
            event: key_event, ..
        } => {
            if let PhysicalKey::Code(keycode) = key_event.physical_key {
                let key = map_keycode(keycode)?;
                match key_event.state {
                    ElementState::Pressed if !key_event.repeat => {
                        Some(RawInput::KeyPressed(key))
                    }
                    ElementState::Released => Some(RawInput::KeyReleased(key)),
                    _ => None,
                }
            } else {
                None
            }
        }
        WindowEvent::CloseRequested => Some(RawInput::CloseRequested),
        _ => None,
    }
}

/// Publishes translated window events onto the core's raw input channel.
///
/// Owned by the windowing side of the application; the matching receiver is
/// handed to `EventSystem::new`. Sending is fire-and-forget: if the event
/// core is gone the record is dropped with a logged error rather than
/// unwinding the event loop.
pub struct InputForwarder {
    sender: flume::Sender<RawInput>,
}

impl InputForwarder {
    /// Creates a forwarder publishing on `sender`.
    pub fn new(sender: flume::Sender<RawInput>) -> Self {
        Self { sender }
    }

    /// Translates `event` and, if it maps to a raw record, publishes it.
    /// Returns whether a record was published.
    pub fn forward(&self, event: &WindowEvent) -> bool {
        let Some(record) = translate_window_event(event) else {
            return false;
        };
        if let Err(e) = self.sender.send(record) {
            log::error!("failed to forward raw input: {e}. Receiver likely disconnected.");
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tracked keys map onto the engine's raw key set.
    #[test]
    fn test_map_keycode_tracked() {
        assert_eq!(map_keycode(KeyCode::ArrowUp), Some(RawKey::Up));
        assert_eq!(map_keycode(KeyCode::ArrowDown), Some(RawKey::Down));
        assert_eq!(map_keycode(KeyCode::ArrowLeft), Some(RawKey::Left));
        assert_eq!(map_keycode(KeyCode::ArrowRight), Some(RawKey::Right));
        assert_eq!(map_keycode(KeyCode::Space), Some(RawKey::Space));
    }

    /// Untracked keys are filtered at the adapter.
    #[test]
    fn test_map_keycode_untracked() {
        assert_eq!(map_keycode(KeyCode::KeyA), None);
        assert_eq!(map_keycode(KeyCode::Escape), None);
        assert_eq!(map_keycode(KeyCode::Digit1), None);
    }

    /// The close request becomes a raw record.
    #[test]
    fn test_translate_close_requested() {
        assert_eq!(
            translate_window_event(&WindowEvent::CloseRequested),
            Some(RawInput::CloseRequested)
        );
    }

    /// Non-input window events translate to nothing.
    #[test]
    fn test_translate_non_input_returns_none() {
        let resized = WindowEvent::Resized(winit::dpi::PhysicalSize::new(100, 100));
        let focused = WindowEvent::Focused(true);
        assert_eq!(translate_window_event(&resized), None);
        assert_eq!(translate_window_event(&focused), None);
    }

    /// Forwarded records arrive on the receiver end of the channel.
    #[test]
    fn test_forwarder_publishes_records() {
        let (tx, rx) = cadence_core::raw_input_channel();
        let forwarder = InputForwarder::new(tx);

        assert!(forwarder.forward(&WindowEvent::CloseRequested));
        assert_eq!(rx.try_recv(), Ok(RawInput::CloseRequested));

        assert!(!forwarder.forward(&WindowEvent::Focused(false)));
        assert!(rx.try_recv().is_err());
    }

    /// A dropped receiver must not panic the event loop.
    #[test]
    fn test_forwarder_survives_receiver_drop() {
        let (tx, rx) = cadence_core::raw_input_channel();
        let forwarder = InputForwarder::new(tx);
        drop(rx);

        assert!(!forwarder.forward(&WindowEvent::CloseRequested));
    }
}

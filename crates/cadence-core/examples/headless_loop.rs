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

//! Headless demonstration of the tick loop: scripted raw input, a couple of
//! listeners, and a deliberately tight budget so carry-over is visible.
//!
//! Run with `RUST_LOG=trace cargo run --example headless_loop` to watch the
//! scheduler's decisions.

use cadence_core::{
    raw_input_channel, EventKind, EventSystem, GameEvent, RawInput, RawKey, SharedEvent,
};
use std::thread;
use std::time::Duration;

fn main() {
    env_logger::init();

    let (raw_tx, raw_rx) = raw_input_channel();
    let mut system = EventSystem::new(raw_rx);

    system.add_listener(
        EventKind::Input,
        system.next_callback_id(),
        |evt: &SharedEvent| {
            if let GameEvent::Input { action, phase } = **evt {
                println!("input: {action:?} {phase:?}");
                // Pretend handling this event is expensive.
                thread::sleep(Duration::from_millis(4));
            }
        },
    );
    system.add_listener(
        EventKind::Shutdown,
        system.next_callback_id(),
        |_evt: &SharedEvent| println!("shutdown requested"),
    );

    // A burst of raw input: held movement keys (with backend repeats), a
    // fire press, then a close request.
    for record in [
        RawInput::KeyPressed(RawKey::Up),
        RawInput::KeyPressed(RawKey::Up),
        RawInput::KeyPressed(RawKey::Right),
        RawInput::KeyPressed(RawKey::Space),
        RawInput::KeyReleased(RawKey::Up),
        RawInput::KeyReleased(RawKey::Right),
        RawInput::CloseRequested,
    ] {
        raw_tx.send(record).unwrap();
    }

    // 5ms budget: too tight for five events at ~4ms each, so some carry
    // over to later ticks.
    for frame in 0..4 {
        let report = system.run_tick(5.0);
        println!(
            "frame {frame}: processed {} in {:.2}ms, carried {}, {} raw records",
            report.processed, report.elapsed_ms, report.carried_over, report.raw_records
        );
        if system.pending_events() == 0 {
            break;
        }
    }
}

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

use std::time::{Duration, Instant};

/// A monotonic stopwatch measuring time since its creation or last restart.
///
/// The scheduler restarts one of these at the beginning of every drain pass
/// and compares [`Stopwatch::elapsed_ms_f32`] against the tick's millisecond
/// budget after each dispatched event.
#[derive(Debug, Clone)]
pub struct Stopwatch {
    started_at: Instant,
}

impl Stopwatch {
    /// Creates a new stopwatch, already running.
    #[inline]
    pub fn new() -> Self {
        Self {
            started_at: Instant::now(),
        }
    }

    /// Resets the measurement origin to now.
    #[inline]
    pub fn restart(&mut self) {
        self.started_at = Instant::now();
    }

    /// Returns the time elapsed since the start (or last restart).
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// Returns the elapsed time in whole milliseconds.
    #[inline]
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed().as_millis() as u64
    }

    /// Returns the elapsed time in fractional milliseconds.
    ///
    /// This is the unit budget comparisons are made in.
    #[inline]
    pub fn elapsed_ms_f32(&self) -> f32 {
        self.elapsed().as_secs_f32() * 1000.0
    }
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

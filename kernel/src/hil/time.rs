// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Interfaces for software timers driven by a periodic hardware tick.

/// How a software timer behaves once it has fired.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerMode {
    /// Fire once, then leave the registry.
    OneShot,
    /// Fire repeatedly, reloading the full delay after each firing.
    Periodic,
}

/// A client of a software timer.
///
/// `fired` is only ever called from the dispatch task, with interrupts
/// enabled, and never from the tick interrupt. It must be short: the next
/// timer in the same pass waits until it returns.
pub trait TimerClient {
    /// Callback signaled when the timer's delay has elapsed.
    fn fired(&self);
}

/// Plain functions can be used as clients directly:
///
/// ```ignore
/// fn blink() { /* ... */ }
/// static BLINK: fn() = blink;
/// mux.create(timer, TimerMode::Periodic, 500, &BLINK)?;
/// ```
impl TimerClient for fn() {
    fn fired(&self) {
        self()
    }
}

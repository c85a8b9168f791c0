// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Interfaces the timer registry needs from the underlying chip.

/// Masks the hardware tick interrupt around list mutations.
///
/// The tick handler walks the timer list from interrupt context, so the
/// handful of pointer writes that link or unlink a timer must not be
/// observed half-done. Implementations disable the tick interrupt (or all
/// interrupts) for the duration of `f`.
///
/// Calling it is safe: masking places no obligation on the caller, and `f`
/// only touches memory the borrow checker already lets it touch.
pub trait InterruptMask {
    /// Run `f` with the tick interrupt masked and return its result.
    fn atomic<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R;
}

/// No masking at all.
///
/// Only correct when the tick handler is never run preemptively, e.g. when
/// the main loop calls it itself, or in unit tests.
impl InterruptMask for () {
    fn atomic<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        f()
    }
}

#[cfg(test)]
mod test {
    use super::InterruptMask;

    #[test]
    fn unit_mask_runs_closure_once() {
        let mut calls = 0;
        let res = ().atomic(|| {
            calls += 1;
            calls * 7
        });
        assert_eq!(res, 7);
        assert_eq!(calls, 1);
    }
}

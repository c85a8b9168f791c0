// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

use nix::sys::signal::{self, SigSet, SigmaskHow};
use nix::unistd;
use stimer::platform::InterruptMask;

/// Waits for a signal to be received
pub fn wfi() {
    let mut current_signals = SigSet::empty();
    let masked_signals = SigSet::empty();
    set_mask(&masked_signals, Some(&mut current_signals));

    unistd::pause();

    set_mask(&current_signals, None);
}

/// Run `f` with every signal masked, so the simulated tick interrupt cannot
/// preempt it.
pub fn atomic<F, R>(f: F) -> R
where
    F: FnOnce() -> R,
{
    let mut current_signals = SigSet::empty();
    let masked_signals = SigSet::all();

    // Mask Signals
    set_mask(&masked_signals, Some(&mut current_signals));
    let res = f();

    // Unmask Signals
    set_mask(&current_signals, None);
    res
}

/// Replace the signal mask, saving the previous one in `old`.
///
/// `sigprocmask` only fails for an invalid `how`, which `SIG_SETMASK` is
/// not.
fn set_mask(mask: &SigSet, old: Option<&mut SigSet>) {
    let res = signal::sigprocmask(SigmaskHow::SIG_SETMASK, Some(mask), old);
    debug_assert!(res.is_ok(), "sigprocmask failed: {:?}", res);
}

/// [`InterruptMask`] for a timer registry driven by [`PeriodicTick`](crate::PeriodicTick).
pub struct SignalMask;

impl InterruptMask for SignalMask {
    fn atomic<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        atomic(f)
    }
}

#[cfg(test)]
mod test {
    use super::SignalMask;
    use nix::sys::signal::{self, SigSet, SigmaskHow, Signal};
    use stimer::platform::InterruptMask;

    fn current_mask() -> SigSet {
        let mut current = SigSet::empty();
        signal::sigprocmask(SigmaskHow::SIG_BLOCK, None, Some(&mut current)).unwrap();
        current
    }

    #[test]
    fn atomic_masks_and_restores() {
        let before = current_mask().contains(Signal::SIGALRM);

        let inside = SignalMask.atomic(|| current_mask().contains(Signal::SIGALRM));

        assert!(inside);
        assert_eq!(current_mask().contains(Signal::SIGALRM), before);
    }

    #[test]
    fn nested_atomic_keeps_outer_mask() {
        let still_masked = SignalMask.atomic(|| {
            SignalMask.atomic(|| ());
            current_mask().contains(Signal::SIGALRM)
        });
        assert!(still_masked);
    }
}
